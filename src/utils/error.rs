use crate::domain::range_key::RangeKey;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("{key} does not match any recipe row in the given recipes table")]
    InvalidRecipeKey { key: RangeKey },

    #[error("Duplicate recipe key: {key}")]
    DuplicateRecipeKey { key: RangeKey },

    #[error("Invalid digit sequence '{value}': {reason}")]
    InvalidDigitSequence { value: String, reason: String },

    #[error("Invalid range key '{value}': {reason}")]
    InvalidRangeKey { value: String, reason: String },

    #[error("Invalid region code '{value}'")]
    InvalidRegionCode { value: String },

    #[error("Invalid recipe row {row}: {message}")]
    InvalidRecipeRow { row: usize, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Recipe,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl MigrationError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MigrationError::InvalidDigitSequence { .. } | MigrationError::InvalidRegionCode { .. } => {
                ErrorCategory::Input
            }
            MigrationError::InvalidRecipeKey { .. }
            | MigrationError::DuplicateRecipeKey { .. }
            | MigrationError::InvalidRangeKey { .. }
            | MigrationError::InvalidRecipeRow { .. }
            | MigrationError::CsvError(_) => ErrorCategory::Recipe,
            MigrationError::ConfigError { .. }
            | MigrationError::ConfigValidationError { .. }
            | MigrationError::InvalidConfigValueError { .. }
            | MigrationError::MissingConfigError { .. } => ErrorCategory::Configuration,
            MigrationError::IoError(_) | MigrationError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Recipe => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Process exit status for a run that failed with this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MigrationError::InvalidRecipeKey { key } => {
                format!("No recipe with key {} exists in the recipes table", key)
            }
            MigrationError::DuplicateRecipeKey { key } => {
                format!("The recipes table declares the range {} more than once", key)
            }
            MigrationError::InvalidDigitSequence { value, .. } => {
                format!("'{}' is not a valid phone number", value)
            }
            MigrationError::InvalidRegionCode { value } => {
                format!("'{}' is not a two-letter region code", value)
            }
            MigrationError::IoError(e) => format!("Could not access a file: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Check the number list and region code for typos",
            ErrorCategory::Recipe => {
                "Check the recipes CSV: every row needs a unique 'Old Range' and a valid 'Region'"
            }
            ErrorCategory::Configuration => "Review the command line flags or TOML configuration",
            ErrorCategory::System => "Check that the input files exist and the output path is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, MigrationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_recipe_key_names_the_key() {
        let key: RangeKey = "447100000000-447100999999".parse().unwrap();
        let err = MigrationError::InvalidRecipeKey { key };
        assert!(err.to_string().contains("447100000000-447100999999"));
        assert_eq!(err.category(), ErrorCategory::Recipe);
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_io_errors_are_critical() {
        let err = MigrationError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().contains("gone"));
    }

    #[test]
    fn test_exit_codes_follow_severity() {
        let config = MigrationError::MissingConfigError {
            field: "numbers".to_string(),
        };
        assert_eq!(config.severity(), ErrorSeverity::Medium);
        assert_eq!(config.exit_code(), 2);

        let input = MigrationError::InvalidRegionCode {
            value: "GBR".to_string(),
        };
        assert_eq!(input.exit_code(), 1);

        let io = MigrationError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(io.exit_code(), 3);
    }
}
