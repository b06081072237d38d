use crate::domain::model::DiseaseReport;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Durable key-value storage for small records.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn data_dir(&self) -> &str;
    fn namespace(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
}

#[async_trait]
pub trait DiseaseDetector: Send + Sync {
    async fn detect_disease(&self, file_name: &str, image: Vec<u8>) -> Result<DiseaseReport>;
}
