use crate::{
    config::BackendConfig,
    error::{extract_backend_message, ClientError},
    models::AppDescriptor,
};
use reqwest::Client;
use tracing::instrument;

/// Lists the inference apps the backend exposes.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(http: Client, config: &BackendConfig) -> Self {
        Self {
            http,
            base_url: config.get_base_url(),
        }
    }

    /// Fetches the catalog. Every call is a fresh round-trip.
    #[instrument(skip(self))]
    pub async fn list_apps(&self) -> Result<Vec<AppDescriptor>, ClientError> {
        let url = format!("{}/ml-apps/", self.base_url);

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            tracing::warn!("Catalog request to {} returned {}", url, status);
            return Err(ClientError::Unavailable {
                status,
                message: extract_backend_message(&body),
            });
        }

        let apps: Vec<AppDescriptor> = serde_json::from_slice(&body)?;
        tracing::debug!("Fetched {} apps from catalog", apps.len());

        Ok(apps)
    }
}
