use crate::{
    selection::ResolveError,
    server::SharedState,
    views::{self, Outcome},
};
use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use ml_client::{AppDescriptor, ClientError, ErrorKind, ImagePayload};
use std::time::Instant;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::instrument;

const IMAGE_FIELD: &str = "image";
const BUSY_MESSAGE: &str = "A prediction is already running. Wait for it to finish and try again.";

#[derive(Error, Debug)]
pub enum PredictError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("Failed to read the upload: {0}")]
    Upload(#[from] MultipartError),
    #[error("Prediction task failed: {0}")]
    Task(#[from] JoinError),
}

impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        let (status, title) = match &self {
            PredictError::Resolve(ResolveError::UnknownApp(_)) => {
                (StatusCode::NOT_FOUND, "App not found")
            }
            PredictError::Resolve(ResolveError::Catalog(_)) => {
                (StatusCode::BAD_GATEWAY, "Catalog unavailable")
            }
            PredictError::Upload(e) => (e.status(), "Upload failed"),
            PredictError::Task(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Prediction failed"),
        };
        (status, views::error_page(title, &self.to_string())).into_response()
    }
}

#[instrument(skip(state, multipart))]
pub async fn predict(
    State(state): State<SharedState>,
    Path(app_id): Path<String>,
    multipart: Multipart,
) -> Result<Response, PredictError> {
    state.metrics.record_request("/ml/{app_id}/predict");

    let app = state
        .selection
        .resolve(state.backend.as_ref(), &app_id)
        .await?;
    let image = read_image(multipart).await?;

    if let Err(e) = image.validate() {
        tracing::warn!("Rejected upload for app {}: {}", app.id, e);
        state.metrics.record_prediction_failure(e.kind(), &app.id);
        return Ok(failure_page(StatusCode::BAD_REQUEST, &app, &e));
    }

    let Some(in_flight) = state.prediction_gate.try_enter() else {
        tracing::warn!("Prediction for app {} refused, another one is in flight", app.id);
        let page = views::detail_page(&app, Some(Outcome::Failed(BUSY_MESSAGE)));
        return Ok((StatusCode::CONFLICT, page).into_response());
    };

    // Detached so that a client hanging up abandons the result rather than
    // cutting the backend call short.
    let backend = state.backend.clone();
    let target = app.id.clone();
    let started = Instant::now();
    let outcome = tokio::spawn(async move {
        let _in_flight = in_flight;
        backend.predict(&target, image).await
    })
    .await?;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match outcome {
        Ok(result) => {
            tracing::info!(
                "App {} predicted {} in {}ms",
                app.id,
                result.predicted_class,
                elapsed_ms
            );
            state.metrics.record_prediction_duration(elapsed_ms, &app.id);
            Ok(views::detail_page(&app, Some(Outcome::Succeeded(&result))).into_response())
        }
        Err(e) => {
            tracing::error!("Prediction for app {} failed: {:?}", app.id, e);
            state.metrics.record_prediction_failure(e.kind(), &app.id);
            let status = match e.kind() {
                ErrorKind::Validation => StatusCode::BAD_REQUEST,
                _ => StatusCode::BAD_GATEWAY,
            };
            Ok(failure_page(status, &app, &e))
        }
    }
}

/// Takes the `image` field; a form without one yields an empty payload.
async fn read_image(mut multipart: Multipart) -> Result<ImagePayload, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let mut image = ImagePayload::new(field.bytes().await?);
        if let Some(file_name) = file_name {
            image = image.with_file_name(file_name);
        }
        if let Some(content_type) = content_type {
            image = image.with_content_type(content_type);
        }
        return Ok(image);
    }

    Ok(ImagePayload::new(Vec::new()))
}

fn failure_page(status: StatusCode, app: &AppDescriptor, error: &ClientError) -> Response {
    let message = user_message(error);
    (status, views::detail_page(app, Some(Outcome::Failed(&message)))).into_response()
}

fn user_message(error: &ClientError) -> String {
    match error.kind() {
        ErrorKind::Validation => error.to_string(),
        ErrorKind::Network => {
            "The inference backend could not be reached. Try again later.".to_string()
        }
        ErrorKind::Server => format!(
            "The model failed to process the image: {}",
            error.backend_message().unwrap_or("no details were given")
        ),
        ErrorKind::Decode => "The inference backend sent a response that could not be read."
            .to_string(),
    }
}
