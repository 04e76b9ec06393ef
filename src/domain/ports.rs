use crate::domain::model::{RawRecord, TransformResult};
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
    fn source_format(&self) -> &str;
    fn input_path(&self) -> &str;
    /// None disables the continent merge; only the cities file is written.
    fn continent_path(&self) -> Option<&str>;
    /// Base directory all reads and writes resolve against.
    fn data_dir(&self) -> &str;
    fn cities_filename(&self) -> &str;
    fn database_filename(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RawRecord>>;
    async fn transform(&self, data: Vec<RawRecord>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
