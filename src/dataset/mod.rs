//! Recipe dataset loading and column normalization.
//!
//! Source CSVs name their columns inconsistently ("Protein(g)",
//! "protein_g", "Protein"). Headers are trimmed and matched against a
//! fixed keyword table so schema drift fails deterministically instead of
//! depending on ad hoc string scanning at call sites.

use std::path::Path;

use crate::calories;
use crate::error::{Error, Result};
use crate::models::{Recipe, RecipeTable};
use crate::{log_info, log_warn};

const ENABLE_LOGS: bool = true;

/// Keyword → canonical column resolution table. For each entry the first
/// header containing a keyword (case-insensitive) wins; keywords are tried
/// in order. The first three are required, the rest optional.
const PROTEIN_KEYWORDS: &[&str] = &["protein"];
const CARBS_KEYWORDS: &[&str] = &["carb"];
const FAT_KEYWORDS: &[&str] = &["fat"];
const NAME_KEYWORDS: &[&str] = &["recipe", "name"];
const DIET_KEYWORDS: &[&str] = &["diet"];
const CUISINE_KEYWORDS: &[&str] = &["cuisine"];
const CALORIE_KEYWORDS: &[&str] = &["calor"];

#[derive(Debug)]
struct ColumnMap {
    protein: usize,
    carbs: usize,
    fat: usize,
    name: Option<usize>,
    diet: Option<usize>,
    cuisine: Option<usize>,
    calories: Option<usize>,
}

fn find_column(headers: &[String], keywords: &[&str]) -> Option<usize> {
    for keyword in keywords {
        let position = headers
            .iter()
            .position(|header| header.to_lowercase().contains(keyword));
        if position.is_some() {
            return position;
        }
    }
    None
}

fn resolve_columns(headers: &[String]) -> Result<ColumnMap> {
    let protein = find_column(headers, PROTEIN_KEYWORDS);
    let carbs = find_column(headers, CARBS_KEYWORDS);
    let fat = find_column(headers, FAT_KEYWORDS);

    let (Some(protein), Some(carbs), Some(fat)) = (protein, carbs, fat) else {
        return Err(Error::Schema {
            available: headers.to_vec(),
        });
    };

    Ok(ColumnMap {
        protein,
        carbs,
        fat,
        name: find_column(headers, NAME_KEYWORDS),
        diet: find_column(headers, DIET_KEYWORDS),
        cuisine: find_column(headers, CUISINE_KEYWORDS),
        calories: find_column(headers, CALORIE_KEYWORDS),
    })
}

fn parse_macro(record: &csv::StringRecord, index: usize) -> Option<f64> {
    record.get(index)?.trim().parse::<f64>().ok()
}

fn optional_text(record: &csv::StringRecord, index: Option<usize>) -> Option<String> {
    let value = record.get(index?)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Load the recipe dataset at `path` into a normalized table.
///
/// Rows whose macro cells fail numeric coercion are dropped. The calorie
/// estimate is taken from the source when a calorie column resolves and
/// the cell parses; otherwise it is derived with the fixed formula.
pub fn load(path: &Path) -> Result<RecipeTable> {
    if !path.exists() {
        return Err(Error::DataNotFound(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|header| header.trim().to_string())
        .collect();
    let columns = resolve_columns(&headers)?;

    let mut recipes = Vec::new();
    let mut dropped = 0usize;

    for record in reader.records() {
        let record = record?;

        let (Some(protein_g), Some(carbs_g), Some(fat_g)) = (
            parse_macro(&record, columns.protein),
            parse_macro(&record, columns.carbs),
            parse_macro(&record, columns.fat),
        ) else {
            dropped += 1;
            continue;
        };

        let calories_estimated = columns
            .calories
            .and_then(|index| parse_macro(&record, index))
            .unwrap_or_else(|| calories::estimate(protein_g, carbs_g, fat_g));

        let diet_type = optional_text(&record, columns.diet).unwrap_or_default();

        recipes.push(Recipe {
            name: optional_text(&record, columns.name).unwrap_or_default(),
            diet_type_legacy: diet_type.clone(),
            diet_type,
            cuisine_type: optional_text(&record, columns.cuisine),
            protein_g,
            carbs_g,
            fat_g,
            calories_estimated,
        });
    }

    if dropped > 0 {
        log_warn!(
            "dropped {dropped} rows with non-numeric macros from {}",
            path.display()
        );
    }
    log_info!("loaded {} recipes from {}", recipes.len(), path.display());

    Ok(RecipeTable::new(recipes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_csv(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diets.csv");
        let mut file = fs::File::create(&path).unwrap();
        write!(file, "{contents}").unwrap();
        (dir, path)
    }

    #[test]
    fn normalizes_variant_headers() {
        let (_dir, path) = write_csv(
            " Diet_type ,Recipe_name,Cuisine_type,Protein(g),Carbs(g),Fat(g)\n\
             keto,Grilled Chicken Salad,american,35,10,20\n",
        );
        let table = load(&path).unwrap();
        assert_eq!(table.len(), 1);

        let recipe = &table.recipes()[0];
        assert_eq!(recipe.name, "Grilled Chicken Salad");
        assert_eq!(recipe.diet_type, "keto");
        assert_eq!(recipe.diet_type_legacy, recipe.diet_type);
        assert_eq!(recipe.cuisine_type.as_deref(), Some("american"));
        assert_eq!(recipe.protein_g, 35.0);
        assert_eq!(recipe.calories_estimated, 4.0 * 35.0 + 4.0 * 10.0 + 9.0 * 20.0);
    }

    #[test]
    fn snake_case_headers_also_resolve() {
        let (_dir, path) = write_csv(
            "diet,name,protein_g,carbs_g,fat_g\n\
             vegan,Lentil Bowl,18,40,6\n",
        );
        let table = load(&path).unwrap();
        assert_eq!(table.recipes()[0].name, "Lentil Bowl");
        assert_eq!(table.recipes()[0].diet_type, "vegan");
    }

    #[test]
    fn missing_macro_columns_is_a_schema_error() {
        let (_dir, path) = write_csv("Diet_type,Recipe_name\nketo,Omelette\n");
        match load(&path) {
            Err(Error::Schema { available }) => {
                assert_eq!(available, vec!["Diet_type", "Recipe_name"]);
            }
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_data_not_found() {
        assert!(matches!(
            load(Path::new("no/such/diets.csv")),
            Err(Error::DataNotFound(_))
        ));
    }

    #[test]
    fn rows_with_unparsable_macros_are_dropped() {
        let (_dir, path) = write_csv(
            "Diet_type,Recipe_name,Protein(g),Carbs(g),Fat(g)\n\
             keto,Good,35,10,20\n\
             keto,Bad,n/a,10,20\n\
             keto,Short,12\n\
             keto,Also Good, 5 , 50 , 2 \n",
        );
        let table = load(&path).unwrap();
        let names: Vec<&str> = table.recipes().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Good", "Also Good"]);
    }

    #[test]
    fn precomputed_calories_are_kept() {
        let (_dir, path) = write_csv(
            "Diet_type,Recipe_name,Protein(g),Carbs(g),Fat(g),calories_estimated\n\
             keto,Precomputed,10,10,10,999\n\
             keto,Backfilled,10,10,10,\n",
        );
        let table = load(&path).unwrap();
        assert_eq!(table.recipes()[0].calories_estimated, 999.0);
        assert_eq!(table.recipes()[1].calories_estimated, 4.0 * 10.0 + 4.0 * 10.0 + 9.0 * 10.0);
    }

    #[test]
    fn empty_cuisine_becomes_none() {
        let (_dir, path) = write_csv(
            "Diet_type,Recipe_name,Cuisine_type,Protein(g),Carbs(g),Fat(g)\n\
             keto,No Cuisine,,35,10,20\n",
        );
        let table = load(&path).unwrap();
        assert_eq!(table.recipes()[0].cuisine_type, None);
    }
}
