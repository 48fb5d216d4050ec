use crate::core::ConfigProvider;
use crate::domain::model::OutputFormat;
use crate::domain::range_key::RangeKey;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "number-migrator")]
#[command(about = "Reports which phone numbers fall inside a region's migration recipes")]
pub struct CliConfig {
    /// File with one E.164 number per line
    #[arg(long)]
    pub numbers: Option<String>,

    /// Number to check; repeat the flag or separate with commas
    #[arg(long = "number", value_delimiter = ',')]
    pub number: Vec<String>,

    /// Recipes table in CSV form
    #[arg(long)]
    pub recipes: String,

    /// Two-letter region code the recipes must belong to
    #[arg(long)]
    pub region: String,

    /// Only check the recipe with exactly this range key, e.g. 447100000000-447100999999
    #[arg(long)]
    pub recipe_key: Option<RangeKey>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn numbers_file(&self) -> Option<&str> {
        self.numbers.as_deref()
    }

    fn inline_numbers(&self) -> &[String] {
        &self.number
    }

    fn recipes_file(&self) -> &str {
        &self.recipes
    }

    fn region_code(&self) -> &str {
        &self.region
    }

    fn recipe_key(&self) -> Option<&RangeKey> {
        self.recipe_key.as_ref()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_format(&self) -> OutputFormat {
        self.format
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("recipes", &self.recipes)?;
        validation::validate_file_extension("recipes", &self.recipes, &["csv"])?;
        validation::validate_region_code("region", &self.region)?;
        validation::validate_number_sources(self.numbers.as_deref(), &self.number)?;
        validation::validate_path("output_path", &self.output_path)?;
        Ok(())
    }
}
