pub mod filter;
pub mod similarity;

pub use filter::{filter_recipes, MealQuery};
pub use similarity::{recommend_similar, ScoredRecipe};
