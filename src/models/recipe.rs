use serde::{Deserialize, Serialize};

/// One row of the recipe dataset after normalization. Read-only: tables are
/// loaded fresh from the backing file and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub name: String,
    pub diet_type: String,
    /// Same value under the legacy column spelling; older consumers still
    /// read `Diet_type`.
    #[serde(rename = "Diet_type")]
    pub diet_type_legacy: String,
    pub cuisine_type: Option<String>,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub calories_estimated: f64,
}

impl Recipe {
    pub fn matches_diet(&self, diet: &str) -> bool {
        self.diet_type.eq_ignore_ascii_case(diet)
    }
}

/// Recipes in dataset order.
#[derive(Debug, Clone, Default)]
pub struct RecipeTable {
    recipes: Vec<Recipe>,
}

impl RecipeTable {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Distinct diet types in first-seen order, for selector UIs.
    pub fn diet_types(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for recipe in &self.recipes {
            if !seen.iter().any(|d: &String| d.eq_ignore_ascii_case(&recipe.diet_type)) {
                seen.push(recipe.diet_type.clone());
            }
        }
        seen
    }

    /// Distinct cuisine types, sorted, for selector UIs.
    pub fn cuisine_types(&self) -> Vec<String> {
        let mut cuisines: Vec<String> = Vec::new();
        for recipe in &self.recipes {
            if let Some(cuisine) = &recipe.cuisine_type {
                if !cuisines.contains(cuisine) {
                    cuisines.push(cuisine.clone());
                }
            }
        }
        cuisines.sort();
        cuisines
    }

    /// First row whose name matches case-insensitively.
    pub fn find_by_name(&self, name: &str) -> Option<(usize, &Recipe)> {
        let needle = name.to_lowercase();
        self.recipes
            .iter()
            .enumerate()
            .find(|(_, recipe)| recipe.name.to_lowercase() == needle)
    }
}
