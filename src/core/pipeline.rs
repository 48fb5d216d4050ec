use crate::adapters::{number_map_from, parse_number_list, parse_recipes_csv};
use crate::core::report;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::job::MigrationJob;
use crate::domain::model::{MigrationCandidate, MigrationReport};
use crate::domain::region::RegionCode;
use crate::utils::error::{MigrationError, Result};
use chrono::Utc;
use std::path::Path;

pub const REPORT_FILE_STEM: &str = "migration_report";

/// Loads numbers and recipes through `Storage`, checks them, and writes a
/// report next to `output_path`.
pub struct MigrationPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> MigrationPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn report_path(&self) -> String {
        let file_name = format!(
            "{}.{}",
            REPORT_FILE_STEM,
            self.config.output_format().extension()
        );
        Path::new(self.config.output_path())
            .join(file_name)
            .to_string_lossy()
            .into_owned()
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for MigrationPipeline<S, C> {
    async fn extract(&self) -> Result<MigrationJob> {
        let region = RegionCode::new(self.config.region_code())?;

        let mut numbers = match self.config.numbers_file() {
            Some(path) => {
                tracing::debug!("Reading numbers from: {}", path);
                let data = self.storage.read_file(path).await?;
                let text = String::from_utf8(data).map_err(|e| MigrationError::InvalidDigitSequence {
                    value: path.to_string(),
                    reason: format!("number file is not UTF-8: {}", e),
                })?;
                parse_number_list(&text)?
            }
            None => Default::default(),
        };
        for (number, raw) in number_map_from(self.config.inline_numbers())? {
            numbers.entry(number).or_insert(raw);
        }

        tracing::debug!("Reading recipes from: {}", self.config.recipes_file());
        let recipes_data = self.storage.read_file(self.config.recipes_file()).await?;
        let recipes = parse_recipes_csv(&recipes_data)?;

        Ok(MigrationJob::new(numbers, region, recipes))
    }

    async fn transform(&self, job: MigrationJob) -> Result<MigrationReport> {
        let (candidates, unmatched) = match self.config.recipe_key() {
            Some(key) => {
                let numbers = job.migratable_numbers(key)?;
                if let Some(row) = job.recipes_table().get(key) {
                    if &row.region != job.region_code() {
                        tracing::warn!(
                            "Recipe {} is for region {}, not {}",
                            key,
                            row.region,
                            job.region_code()
                        );
                    }
                }
                let candidates: Vec<MigrationCandidate> = numbers
                    .map(|number| MigrationCandidate {
                        raw: job
                            .number_range_map()
                            .get(&number)
                            .cloned()
                            .unwrap_or_else(|| number.to_string()),
                        number,
                        recipe_keys: vec![key.clone()],
                    })
                    .collect();
                let unmatched = job
                    .number_range_map()
                    .iter()
                    .filter(|(number, _)| !key.contains(number))
                    .map(|(_, raw)| raw.clone())
                    .collect();
                (candidates, unmatched)
            }
            None => {
                let unmatched = job
                    .unmatched_numbers()
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                (job.migration_candidates(), unmatched)
            }
        };

        Ok(MigrationReport {
            region: *job.region_code(),
            recipe_key: self.config.recipe_key().cloned(),
            total_numbers: job.number_range_map().len(),
            candidates,
            unmatched,
            generated_at: Utc::now(),
        })
    }

    async fn load(&self, report: MigrationReport) -> Result<String> {
        let output_path = self.report_path();
        let data = report::render(&report, self.config.output_format())?;

        tracing::debug!("Writing report ({} bytes) to {}", data.len(), output_path);
        self.storage.write_file(&output_path, &data).await?;

        Ok(output_path)
    }
}
