use crate::core::ConfigProvider;
use crate::domain::model::OutputFormat;
use crate::domain::range_key::RangeKey;
use crate::utils::error::{MigrationError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub job: JobConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub name: Option<String>,
    pub region: String,
    pub recipe_key: Option<RangeKey>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub recipes: String,
    pub numbers_file: Option<String>,
    #[serde(default)]
    pub numbers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub json: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MigrationError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MigrationError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${RECIPES_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MigrationError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(name) = &self.job.name {
            validation::validate_non_empty_string("job.name", name)?;
        }
        validation::validate_region_code("job.region", &self.job.region)?;
        validation::validate_path("input.recipes", &self.input.recipes)?;
        validation::validate_file_extension("input.recipes", &self.input.recipes, &["csv"])?;
        validation::validate_number_sources(self.input.numbers_file.as_deref(), &self.input.numbers)?;
        validation::validate_path("output.path", &self.output.path)?;
        Ok(())
    }

    pub fn job_name(&self) -> &str {
        self.job.name.as_deref().unwrap_or("migration")
    }

    pub fn verbose_logging(&self) -> bool {
        self.logging.as_ref().map(|l| l.verbose).unwrap_or(false)
    }

    pub fn json_logging(&self) -> bool {
        self.logging.as_ref().map(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn numbers_file(&self) -> Option<&str> {
        self.input.numbers_file.as_deref()
    }

    fn inline_numbers(&self) -> &[String] {
        &self.input.numbers
    }

    fn recipes_file(&self) -> &str {
        &self.input.recipes
    }

    fn region_code(&self) -> &str {
        &self.job.region
    }

    fn recipe_key(&self) -> Option<&RangeKey> {
        self.job.recipe_key.as_ref()
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn output_format(&self) -> OutputFormat {
        self.output.format
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
