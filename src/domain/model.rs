use crate::domain::digit_sequence::DigitSequence;
use crate::domain::range_key::RangeKey;
use crate::domain::region::RegionCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationCandidate {
    pub number: DigitSequence,
    pub raw: String,
    pub recipe_keys: Vec<RangeKey>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MigrationReport {
    pub region: RegionCode,
    /// Set when the run was limited to a single recipe.
    pub recipe_key: Option<RangeKey>,
    pub total_numbers: usize,
    pub candidates: Vec<MigrationCandidate>,
    pub unmatched: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl MigrationReport {
    pub fn migratable_count(&self) -> usize {
        self.candidates.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unsupported output format '{}'", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Text => "text",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        };
        f.write_str(name)
    }
}
