use crate::{
    config::BackendConfig,
    error::{extract_backend_message, ClientError},
    image_payload::ImagePayload,
    models::PredictionResult,
};
use reqwest::{multipart::Form, Client};
use tracing::instrument;

const IMAGE_FIELD: &str = "image";

/// Submits one image to one app. Never retries: inference may be metered.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    http: Client,
    base_url: String,
}

impl PredictionClient {
    pub fn new(http: Client, config: &BackendConfig) -> Self {
        Self {
            http,
            base_url: config.get_base_url(),
        }
    }

    #[instrument(skip(self, image), fields(image_bytes = image.len()))]
    pub async fn predict(
        &self,
        app_id: &str,
        image: ImagePayload,
    ) -> Result<PredictionResult, ClientError> {
        let app_id = validate_app_id(app_id)?;
        let part = image.into_part()?;
        let form = Form::new().part(IMAGE_FIELD, part);

        let url = format!("{}/ml-apps/{}/predict/", self.base_url, app_id);
        let response = self.http.post(&url).multipart(form).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = extract_backend_message(&body);
            tracing::error!(
                "Prediction for app {} failed with {}: {:?}",
                app_id,
                status,
                message
            );
            return Err(ClientError::Server { status, message });
        }

        let result: PredictionResult = serde_json::from_slice(&body)?;
        tracing::debug!(
            "App {} predicted {} ({:.3}) on {} in {:.3}s",
            app_id,
            result.predicted_class,
            result.confidence,
            result.device,
            result.processing_time
        );

        Ok(result)
    }
}

/// Trims `app_id` and checks it can be used as a single URL path segment.
pub fn validate_app_id(app_id: &str) -> Result<&str, ClientError> {
    let app_id = app_id.trim();
    if app_id.is_empty() {
        return Err(ClientError::Validation("no app was selected".into()));
    }
    if app_id
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '/' | '?' | '#' | '%'))
    {
        return Err(ClientError::Validation(format!(
            "{} is not a valid app id",
            app_id
        )));
    }
    Ok(app_id)
}
