use crate::domain::model::DiseaseReport;
use crate::domain::ports::{ConfigProvider, DiseaseDetector};
use crate::utils::error::{KisanError, Result};
use crate::utils::validation::{validate_file_extension, validate_url};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;

pub const CROP_DISEASE_PATH: &str = "/api/crop-disease";
pub const HEALTH_PATH: &str = "/api/health";
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Client for the farmer-tools backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        validate_url("api.base_url", base_url)?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(config.api_base_url(), config.request_timeout())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Uploads an image as multipart field `file`.
    pub async fn detect_disease(&self, file_name: &str, image: Vec<u8>) -> Result<DiseaseReport> {
        validate_file_extension("file", file_name, &ALLOWED_IMAGE_EXTENSIONS)?;

        let url = self.endpoint(CROP_DISEASE_PATH);
        tracing::debug!("Uploading {} ({} bytes) to {}", file_name, image.len(), url);

        let part = Part::bytes(image).file_name(file_name.to_string());
        let form = Form::new().part("file", part);

        let response = self.client.post(&url).multipart(form).send().await?;
        let status = response.status();
        tracing::debug!("Crop disease response status: {}", status);

        if !status.is_success() {
            return Err(KisanError::ServiceUnavailable {
                endpoint: CROP_DISEASE_PATH.to_string(),
                status: status.as_u16(),
            });
        }

        let report: DiseaseReport = response.json().await?;
        tracing::info!(
            "Detected '{}' with confidence {:.2}",
            report.disease,
            report.confidence
        );
        Ok(report)
    }

    /// Never fails: any network or service error becomes [`DiseaseReport::fallback`].
    /// Input errors (such as an unsupported file type) are still returned.
    pub async fn detect_disease_or_fallback(
        &self,
        file_name: &str,
        image: Vec<u8>,
    ) -> Result<DiseaseReport> {
        detect_or_fallback(self, file_name, image).await
    }

    pub async fn health(&self) -> Result<serde_json::Value> {
        let url = self.endpoint(HEALTH_PATH);
        tracing::debug!("Checking backend health at {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(KisanError::ServiceUnavailable {
                endpoint: HEALTH_PATH.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl DiseaseDetector for ApiClient {
    async fn detect_disease(&self, file_name: &str, image: Vec<u8>) -> Result<DiseaseReport> {
        ApiClient::detect_disease(self, file_name, image).await
    }
}

pub async fn detect_or_fallback<D: DiseaseDetector + ?Sized>(
    detector: &D,
    file_name: &str,
    image: Vec<u8>,
) -> Result<DiseaseReport> {
    match detector.detect_disease(file_name, image).await {
        Ok(report) => Ok(report),
        Err(e) if e.is_service_failure() => {
            tracing::warn!("Disease detection unavailable, using fallback: {}", e);
            Ok(DiseaseReport::fallback())
        }
        Err(e) => Err(e),
    }
}
