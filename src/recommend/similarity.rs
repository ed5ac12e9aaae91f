//! Macro-vector similarity between recipes.
//!
//! Features are the three macro columns standardized to zero mean and unit
//! variance over the whole table (the scaler is fit on the full table, not
//! per query), ranked by cosine similarity against the query row.

use std::cmp::Ordering;

use ndarray::{Array2, ArrayView1};

use crate::models::{Recipe, RecipeTable};

/// One recommendation: a recipe snapshot and its similarity to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecipe {
    pub recipe: Recipe,
    pub score: f64,
}

/// Recipes most similar to the named one by standardized macro vector.
///
/// The first row whose name matches case-insensitively is the query; an
/// unmatched name yields an empty result, never an error. The query row is
/// excluded from the output, which is sorted by descending similarity with
/// ties kept in dataset order, truncated to `top_n`.
pub fn recommend_similar(table: &RecipeTable, recipe_name: &str, top_n: usize) -> Vec<ScoredRecipe> {
    let Some((query_index, _)) = table.find_by_name(recipe_name) else {
        return Vec::new();
    };

    let features = standardized_features(table);
    let query_row = features.row(query_index);

    let mut scored: Vec<(usize, f64)> = (0..table.len())
        .filter(|&index| index != query_index)
        .map(|index| (index, cosine_similarity(query_row, features.row(index))))
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored.truncate(top_n);

    scored
        .into_iter()
        .map(|(index, score)| ScoredRecipe {
            recipe: table.recipes()[index].clone(),
            score,
        })
        .collect()
}

/// n×3 macro matrix with each column scaled to zero mean / unit variance.
/// Zero-variance columns are left unscaled to avoid dividing by zero.
fn standardized_features(table: &RecipeTable) -> Array2<f64> {
    let n = table.len();
    let mut features = Array2::<f64>::zeros((n, 3));
    for (i, recipe) in table.recipes().iter().enumerate() {
        features[[i, 0]] = recipe.protein_g;
        features[[i, 1]] = recipe.carbs_g;
        features[[i, 2]] = recipe.fat_g;
    }

    for col in 0..3 {
        let mut column = features.column_mut(col);
        let mean = column.sum() / n as f64;
        let variance = column.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
        let scale = if variance > 0.0 { variance.sqrt() } else { 1.0 };
        column.mapv_inplace(|v| (v - mean) / scale);
    }

    features
}

fn cosine_similarity(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    let dot = a.dot(&b);
    let norm_a = a.dot(&a).sqrt();
    let norm_b = b.dot(&b).sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(name: &str, protein: f64, carbs: f64, fat: f64) -> Recipe {
        Recipe {
            name: name.to_string(),
            diet_type: "keto".to_string(),
            diet_type_legacy: "keto".to_string(),
            cuisine_type: None,
            protein_g: protein,
            carbs_g: carbs,
            fat_g: fat,
            calories_estimated: 4.0 * protein + 4.0 * carbs + 9.0 * fat,
        }
    }

    fn table() -> RecipeTable {
        RecipeTable::new(vec![
            recipe("Grilled Chicken Salad", 35.0, 10.0, 20.0),
            recipe("Chicken Wrap", 34.0, 12.0, 19.0),
            recipe("Sugar Bomb", 1.0, 90.0, 2.0),
            recipe("Butter Plate", 2.0, 1.0, 80.0),
            recipe("Second Salad", 36.0, 9.0, 21.0),
        ])
    }

    #[test]
    fn ranks_macro_neighbours_first_and_excludes_the_query() {
        let results = recommend_similar(&table(), "grilled chicken salad", 5);

        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.recipe.name != "Grilled Chicken Salad"));

        let names: Vec<&str> = results.iter().map(|r| r.recipe.name.as_str()).collect();
        assert!(names[0] == "Chicken Wrap" || names[0] == "Second Salad");
        assert!(names[1] == "Chicken Wrap" || names[1] == "Second Salad");

        for window in results.windows(2) {
            assert!(window[0].score >= window[1].score);
        }
    }

    #[test]
    fn respects_top_n() {
        let results = recommend_similar(&table(), "Grilled Chicken Salad", 2);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn unmatched_name_yields_empty_output() {
        assert!(recommend_similar(&table(), "Nonexistent Recipe", 5).is_empty());
    }

    #[test]
    fn duplicate_names_resolve_to_the_first_row() {
        let table = RecipeTable::new(vec![
            recipe("Twin", 30.0, 10.0, 10.0),
            recipe("Twin", 1.0, 80.0, 1.0),
            recipe("Near First", 29.0, 11.0, 10.0),
        ]);
        let results = recommend_similar(&table, "Twin", 2);
        // the second "Twin" stays a candidate; the first is the query
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].recipe.name, "Near First");
    }

    #[test]
    fn constant_column_does_not_poison_the_scaler() {
        let table = RecipeTable::new(vec![
            recipe("A", 10.0, 5.0, 3.0),
            recipe("B", 10.0, 6.0, 4.0),
            recipe("C", 10.0, 50.0, 40.0),
        ]);
        let results = recommend_similar(&table, "A", 2);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.score.is_finite()));
    }
}
