use crate::{
    catalog::CatalogClient,
    config::BackendConfig,
    error::ClientError,
    image_payload::ImagePayload,
    models::{AppDescriptor, PredictionResult},
    prediction::PredictionClient,
};
use async_trait::async_trait;
use reqwest::Client;

/// What a view needs from the inference backend.
#[async_trait]
pub trait InferenceBackend: Send + Sync + 'static {
    async fn list_apps(&self) -> Result<Vec<AppDescriptor>, ClientError>;

    async fn predict(
        &self,
        app_id: &str,
        image: ImagePayload,
    ) -> Result<PredictionResult, ClientError>;
}

/// Catalog and prediction clients sharing one connection pool and timeout.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    catalog: CatalogClient,
    prediction: PredictionClient,
}

impl InferenceClient {
    pub fn new(config: &BackendConfig) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(config.get_timeout())
            .connect_timeout(config.get_connect_timeout())
            .build()?;

        tracing::info!(
            "Inference backend at {} (timeout {}ms)",
            config.get_base_url(),
            config.timeout_ms
        );

        Ok(Self {
            catalog: CatalogClient::new(http.clone(), config),
            prediction: PredictionClient::new(http, config),
        })
    }

    pub fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    pub fn prediction(&self) -> &PredictionClient {
        &self.prediction
    }
}

#[async_trait]
impl InferenceBackend for InferenceClient {
    async fn list_apps(&self) -> Result<Vec<AppDescriptor>, ClientError> {
        self.catalog.list_apps().await
    }

    async fn predict(
        &self,
        app_id: &str,
        image: ImagePayload,
    ) -> Result<PredictionResult, ClientError> {
        self.prediction.predict(app_id, image).await
    }
}
