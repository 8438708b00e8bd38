use ml_client::{AppDescriptor, ClientError, InferenceBackend};
use parking_lot::RwLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("No app with id {0} is available")]
    UnknownApp(String),
    #[error("Failed to load the app catalog: {0}")]
    Catalog(#[from] ClientError),
}

/// The single app the user last selected, shared between the selector and
/// detail views.
#[derive(Debug, Default)]
pub struct SelectionContext {
    selected: RwLock<Option<AppDescriptor>>,
}

impl SelectionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&self, app: AppDescriptor) {
        tracing::debug!("Selected app {} ({})", app.id, app.name);
        *self.selected.write() = Some(app);
    }

    pub fn current(&self) -> Option<AppDescriptor> {
        self.selected.read().clone()
    }

    /// Finds the descriptor for `app_id`.
    ///
    /// The current selection is used when it matches. Otherwise (a bookmarked
    /// or typed URL) the catalog is fetched again and the match becomes the
    /// new selection.
    pub async fn resolve(
        &self,
        backend: &dyn InferenceBackend,
        app_id: &str,
    ) -> Result<AppDescriptor, ResolveError> {
        if let Some(app) = self.current().filter(|app| app.id == app_id) {
            return Ok(app);
        }

        tracing::debug!("App {} not selected, fetching catalog", app_id);
        let app = backend
            .list_apps()
            .await?
            .into_iter()
            .find(|app| app.id == app_id)
            .ok_or_else(|| ResolveError::UnknownApp(app_id.to_string()))?;

        self.select(app.clone());
        Ok(app)
    }
}
