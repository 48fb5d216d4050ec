use crate::domain::digit_sequence::DigitSequence;
use crate::domain::range_key::RangeKey;
use crate::domain::recipe::{RecipeRow, RecipeTable};
use crate::domain::region::RegionCode;
use crate::utils::error::{MigrationError, Result};
use serde::Deserialize;
use std::io::Read;

/// One line of a recipes CSV, before validation.
#[derive(Debug, Deserialize)]
struct RecipeRecord {
    #[serde(rename = "Old Range")]
    old_range: String,
    #[serde(rename = "Region")]
    region: String,
    #[serde(rename = "Country Code", default)]
    country_code: Option<String>,
    #[serde(rename = "Is Final Migration", default)]
    is_final_migration: Option<String>,
    #[serde(rename = "New Prefix", default)]
    new_prefix: Option<String>,
    #[serde(rename = "Description", default)]
    description: Option<String>,
}

impl RecipeRecord {
    fn into_entry(self, row: usize) -> Result<(RangeKey, RecipeRow)> {
        let invalid = |message: String| MigrationError::InvalidRecipeRow { row, message };

        let key: RangeKey = self
            .old_range
            .parse()
            .map_err(|e: MigrationError| invalid(e.to_string()))?;
        let region = RegionCode::new(&self.region).map_err(|e| invalid(e.to_string()))?;
        let country_code = non_empty(self.country_code)
            .map(|cc| DigitSequence::new(&cc))
            .transpose()
            .map_err(|e| invalid(e.to_string()))?;
        let is_final_migration = match non_empty(self.is_final_migration) {
            None => false,
            Some(flag) => parse_flag(&flag)
                .ok_or_else(|| invalid(format!("'{}' is not a yes/no value", flag)))?,
        };

        Ok((
            key,
            RecipeRow {
                region,
                country_code,
                is_final_migration,
                new_prefix: non_empty(self.new_prefix),
                description: non_empty(self.description),
            },
        ))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

/// Reads a recipes table from CSV with a header row.
///
/// Required columns are `Old Range` and `Region`; `Country Code`,
/// `Is Final Migration`, `New Prefix` and `Description` are optional.
/// Row numbers in errors count the header as row 1.
pub fn read_recipes_table<R: Read>(reader: R) -> Result<RecipeTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut table = RecipeTable::new();
    for (idx, record) in csv_reader.deserialize::<RecipeRecord>().enumerate() {
        let row = idx + 2;
        let (key, recipe) = record?.into_entry(row)?;
        tracing::debug!(row, recipe = %key, region = %recipe.region, "loaded recipe");
        table.insert(key, recipe)?;
    }
    Ok(table)
}

pub fn parse_recipes_csv(data: &[u8]) -> Result<RecipeTable> {
    read_recipes_table(data)
}
