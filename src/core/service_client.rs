// src/core/service_client.rs
//! HTTP client for the remote resume service - JSON for every request body

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{error, info, trace};

use crate::core::collaborators::ResumeApi;
use crate::types::{
    response::{stored_resume, EnhanceRequest, EnhanceResponse, SaveResponse},
    ExportFormat, ResumeDocument, SectionKey,
};

const GET_RESUME_ENDPOINT: &str = "/get-resume";
const SAVE_RESUME_ENDPOINT: &str = "/save-resume";
const AI_ENHANCE_ENDPOINT: &str = "/ai-enhance";
const EXPORT_RESUME_ENDPOINT: &str = "/export-resume";

pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    /// Create new service client with configuration
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Generic POST request with JSON
    pub async fn post_json<T, R>(&self, endpoint: &str, payload: &T) -> Result<R>
    where
        T: serde::Serialize + ?Sized,
        R: serde::de::DeserializeOwned,
    {
        let url = self.url(endpoint);

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .with_context(|| format!("Failed to POST to {}", url))?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<R>()
                .await
                .context("Failed to parse JSON response")
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("HTTP {} error: {}", status, error_text)
        }
    }

    /// Generic GET request
    pub async fn get<R>(&self, endpoint: &str) -> Result<R>
    where
        R: serde::de::DeserializeOwned,
    {
        let url = self.url(endpoint);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to GET from {}", url))?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<R>()
                .await
                .context("Failed to parse JSON response")
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("HTTP {} error: {}", status, error_text)
        }
    }
}

#[async_trait]
impl ResumeApi for ServiceClient {
    async fn fetch_resume(&self) -> Result<Option<ResumeDocument>> {
        info!("Fetching saved resume from {}", self.base_url);
        let body: serde_json::Value = self.get(GET_RESUME_ENDPOINT).await?;
        stored_resume(body)
    }

    async fn save_resume(&self, resume: &ResumeDocument) -> Result<String> {
        info!("Saving resume for {}", resume.name);
        let response: SaveResponse = self.post_json(SAVE_RESUME_ENDPOINT, resume).await?;
        Ok(response.status)
    }

    async fn enhance(&self, section: SectionKey, content: &str) -> Result<String> {
        let request = EnhanceRequest {
            section: section.wire_name().to_string(),
            content: content.to_string(),
        };

        trace!("Calling enhancement service for {}", section);
        let response: EnhanceResponse = self.post_json(AI_ENHANCE_ENDPOINT, &request).await?;
        Ok(response.enhanced)
    }

    async fn export_resume(
        &self,
        resume: &ResumeDocument,
        format: ExportFormat,
    ) -> Result<Vec<u8>> {
        let url = self.url(&format!("{}/{}", EXPORT_RESUME_ENDPOINT, format.extension()));
        info!("Calling export service: {}", url);

        let response = self
            .client
            .post(&url)
            .json(resume)
            .send()
            .await
            .context("Failed to call export service")?;

        let status = response.status();
        trace!("Export response status: {}", status);

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Export service error {}: {}", status, error_text);
            anyhow::bail!("Failed to download resume: {}", error_text);
        }

        let bytes = response
            .bytes()
            .await
            .context("Failed to read export payload")?;
        Ok(bytes.to_vec())
    }
}
