//! Recipe filtering by diet, calorie band, name text and cuisine.

use crate::models::{Recipe, RecipeTable};

/// Conjunctive recipe filter. All predicates must hold; since they only
/// narrow, their evaluation order does not matter. `None` on an optional
/// predicate means "no filter".
#[derive(Debug, Clone)]
pub struct MealQuery {
    pub diet_type: String,
    pub target_calories: f64,
    /// Symmetric band: estimated calories must lie in
    /// `[target - tolerance, target + tolerance]`
    pub tolerance: f64,
    /// Case-insensitive substring match against the recipe name
    pub name_contains: Option<String>,
    /// Exact cuisine match
    pub cuisine: Option<String>,
}

/// Recipes satisfying the query, in dataset order.
pub fn filter_recipes<'a>(table: &'a RecipeTable, query: &MealQuery) -> Vec<&'a Recipe> {
    let needle = query
        .name_contains
        .as_ref()
        .map(|text| text.to_lowercase());

    table
        .recipes()
        .iter()
        .filter(|recipe| matches(recipe, query, needle.as_deref()))
        .collect()
}

fn matches(recipe: &Recipe, query: &MealQuery, needle: Option<&str>) -> bool {
    if !recipe.matches_diet(&query.diet_type) {
        return false;
    }

    let lower = query.target_calories - query.tolerance;
    let upper = query.target_calories + query.tolerance;
    if recipe.calories_estimated < lower || recipe.calories_estimated > upper {
        return false;
    }

    if let Some(needle) = needle {
        if !recipe.name.to_lowercase().contains(needle) {
            return false;
        }
    }

    if let Some(cuisine) = &query.cuisine {
        if recipe.cuisine_type.as_deref() != Some(cuisine.as_str()) {
            return false;
        }
    }

    true
}
