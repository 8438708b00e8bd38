use crate::{selection::ResolveError, server::SharedState, views};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use ml_client::{validate_app_id, AppDescriptor, ClientError};
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

#[derive(Error, Debug)]
pub enum AppPageError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("Failed to load the app catalog: {0}")]
    Catalog(#[from] ClientError),
    #[error("Invalid selection: {0}")]
    InvalidSelection(ClientError),
}

impl IntoResponse for AppPageError {
    fn into_response(self) -> Response {
        let (status, title) = match self {
            AppPageError::Resolve(ResolveError::UnknownApp(_)) => {
                (StatusCode::NOT_FOUND, "App not found")
            }
            AppPageError::Resolve(ResolveError::Catalog(_)) | AppPageError::Catalog(_) => {
                (StatusCode::BAD_GATEWAY, "Catalog unavailable")
            }
            AppPageError::InvalidSelection(_) => (StatusCode::BAD_REQUEST, "Invalid selection"),
        };
        (status, views::error_page(title, &self.to_string())).into_response()
    }
}

/// Form posted by a card of the selector view.
#[derive(Debug, Deserialize)]
pub struct SelectForm {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[instrument(skip(state))]
pub async fn list_apps(State(state): State<SharedState>) -> Result<Html<String>, AppPageError> {
    state.metrics.record_request("/ml-select");

    let apps = state.backend.list_apps().await.inspect_err(|e| {
        tracing::error!("Failed to list apps: {:?}", e);
    })?;

    Ok(views::selector_page(&apps))
}

#[instrument(skip(state))]
pub async fn select_app(
    State(state): State<SharedState>,
    Form(form): Form<SelectForm>,
) -> Result<Redirect, AppPageError> {
    state.metrics.record_request("/ml-select");

    let id = validate_app_id(&form.id)
        .map_err(AppPageError::InvalidSelection)?
        .to_string();

    state.selection.select(AppDescriptor {
        id: id.clone(),
        name: form.name,
        description: form.description,
    });

    Ok(Redirect::to(&format!("/ml/{}", id)))
}

#[instrument(skip(state))]
pub async fn app_detail(
    State(state): State<SharedState>,
    Path(app_id): Path<String>,
) -> Result<Html<String>, AppPageError> {
    state.metrics.record_request("/ml/{app_id}");

    let app = state
        .selection
        .resolve(state.backend.as_ref(), &app_id)
        .await?;

    Ok(views::detail_page(&app, None))
}
