pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{toml_config::TomlConfig, LocalStorage};

pub use crate::core::{engine::MigrationEngine, pipeline::MigrationPipeline};
pub use crate::domain::{
    digit_sequence::DigitSequence,
    job::MigrationJob,
    range_key::RangeKey,
    range_set::{Interval, RangeSet},
    recipe::{RecipeRow, RecipeTable},
    region::RegionCode,
};
pub use crate::utils::error::{MigrationError, Result};
