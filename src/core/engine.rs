use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct MigrationEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> MigrationEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs extract, transform and load in order; returns the report path.
    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("Starting migration check...");

        tracing::info!("Loading numbers and recipes...");
        let job = self.pipeline.extract().await?;
        tracing::info!(
            "Loaded {} numbers and {} recipes for region {}",
            job.number_range_map().len(),
            job.recipes_table().len(),
            job.region_code()
        );

        tracing::info!("Matching numbers against recipes...");
        let report = self.pipeline.transform(job).await?;
        tracing::info!(
            "{} of {} numbers can be migrated",
            report.migratable_count(),
            report.total_numbers
        );

        tracing::info!("Writing report...");
        let output_path = self.pipeline.load(report).await?;
        tracing::info!("Report saved to: {} ({:?})", output_path, started.elapsed());

        Ok(output_path)
    }
}
