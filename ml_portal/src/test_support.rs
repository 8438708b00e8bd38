use async_trait::async_trait;
use axum::http::StatusCode;
use ml_client::{AppDescriptor, ClientError, ImagePayload, InferenceBackend, PredictionResult};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub enum Prediction {
    Succeed(PredictionResult),
    Fail(String),
}

/// In-process stand-in for the inference backend.
pub struct MockBackend {
    apps: Vec<AppDescriptor>,
    catalog_fails: bool,
    prediction: Prediction,
    predict_delay: Option<Duration>,
    catalog_calls: AtomicUsize,
    predict_calls: AtomicUsize,
    predictions_finished: AtomicUsize,
}

impl MockBackend {
    pub fn with_apps(apps: Vec<AppDescriptor>) -> Self {
        Self {
            apps,
            catalog_fails: false,
            prediction: Prediction::Succeed(cat_result()),
            predict_delay: None,
            catalog_calls: AtomicUsize::new(0),
            predict_calls: AtomicUsize::new(0),
            predictions_finished: AtomicUsize::new(0),
        }
    }

    pub fn failing_catalog() -> Self {
        Self {
            catalog_fails: true,
            ..Self::with_apps(Vec::new())
        }
    }

    pub fn failing_prediction(mut self, message: &str) -> Self {
        self.prediction = Prediction::Fail(message.to_string());
        self
    }

    pub fn slow_prediction(mut self, delay: Duration) -> Self {
        self.predict_delay = Some(delay);
        self
    }

    pub fn catalog_calls(&self) -> usize {
        self.catalog_calls.load(Ordering::SeqCst)
    }

    pub fn predict_calls(&self) -> usize {
        self.predict_calls.load(Ordering::SeqCst)
    }

    /// Predictions that ran to completion, whether or not anyone read the result.
    pub fn predictions_finished(&self) -> usize {
        self.predictions_finished.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InferenceBackend for MockBackend {
    async fn list_apps(&self) -> Result<Vec<AppDescriptor>, ClientError> {
        self.catalog_calls.fetch_add(1, Ordering::SeqCst);
        if self.catalog_fails {
            return Err(ClientError::Unavailable {
                status: StatusCode::SERVICE_UNAVAILABLE,
                message: Some("backend is down".into()),
            });
        }
        Ok(self.apps.clone())
    }

    async fn predict(
        &self,
        _app_id: &str,
        image: ImagePayload,
    ) -> Result<PredictionResult, ClientError> {
        self.predict_calls.fetch_add(1, Ordering::SeqCst);
        image.validate()?;
        if let Some(delay) = self.predict_delay {
            tokio::time::sleep(delay).await;
        }
        self.predictions_finished.fetch_add(1, Ordering::SeqCst);
        match &self.prediction {
            Prediction::Succeed(result) => Ok(result.clone()),
            Prediction::Fail(message) => Err(ClientError::Server {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: Some(message.clone()),
            }),
        }
    }
}

pub fn app(id: &str, name: &str) -> AppDescriptor {
    AppDescriptor {
        id: id.into(),
        name: name.into(),
        description: format!("{} description", name),
    }
}

pub fn cat_result() -> PredictionResult {
    PredictionResult {
        predicted_class: "cat".into(),
        confidence: 0.95,
        processing_time: 0.25,
        device: "cpu".into(),
        class_probabilities: BTreeMap::from([("cat".to_string(), 0.95), ("dog".to_string(), 0.05)]),
    }
}

/// A tiny but genuine PNG.
pub fn png_bytes() -> Vec<u8> {
    use image::{ImageBuffer, Rgb};
    use std::io::Cursor;

    let img = ImageBuffer::<Rgb<u8>, Vec<u8>>::from_pixel(4, 4, Rgb([0, 128, 255]));
    let mut cursor = Cursor::new(Vec::new());
    img.write_to(&mut cursor, image::ImageFormat::Png).unwrap();
    cursor.into_inner()
}
