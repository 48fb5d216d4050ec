use crate::domain::job::MigrationJob;
use crate::domain::model::{MigrationReport, OutputFormat};
use crate::domain::range_key::RangeKey;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// File with one number per line, if any.
    fn numbers_file(&self) -> Option<&str>;
    /// Numbers given inline, in addition to `numbers_file`.
    fn inline_numbers(&self) -> &[String];
    fn recipes_file(&self) -> &str;
    fn region_code(&self) -> &str;
    fn recipe_key(&self) -> Option<&RangeKey>;
    fn output_path(&self) -> &str;
    fn output_format(&self) -> OutputFormat;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<MigrationJob>;
    async fn transform(&self, job: MigrationJob) -> Result<MigrationReport>;
    async fn load(&self, report: MigrationReport) -> Result<String>;
}
