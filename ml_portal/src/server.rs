use crate::{
    config::Config, gate::PredictionGate, profile::ProfileStore, routes::api_routes,
    selection::SelectionContext, telemetry::Metrics,
};
use axum::{extract::DefaultBodyLimit, Router};
use axum_otel_metrics::HttpMetricsLayerBuilder;
use ml_client::InferenceBackend;
use std::sync::Arc;
use tokio::{net::TcpListener, sync::broadcast::Receiver, task::JoinHandle};

#[derive(Clone)]
pub struct SharedState {
    pub backend: Arc<dyn InferenceBackend>,
    pub selection: Arc<SelectionContext>,
    pub prediction_gate: PredictionGate,
    pub profile: Arc<ProfileStore>,
    pub metrics: Arc<Metrics>,
}

impl SharedState {
    pub fn new(backend: Arc<dyn InferenceBackend>, metrics: Arc<Metrics>) -> Self {
        Self {
            backend,
            selection: Arc::new(SelectionContext::new()),
            prediction_gate: PredictionGate::new(),
            profile: Arc::new(ProfileStore::new()),
            metrics,
        }
    }
}

pub fn build_router(state: SharedState, max_upload_bytes: usize) -> Router {
    Router::new()
        .merge(api_routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

pub struct HttpServer {
    router: Router,
    listener: TcpListener,
}

impl HttpServer {
    pub async fn new(backend: Arc<dyn InferenceBackend>, config: &Config) -> anyhow::Result<Self> {
        let addr = config.server.get_address();

        let metrics = Arc::new(Metrics::new()?);
        let metrics_layer = HttpMetricsLayerBuilder::new().build();

        let app_state = SharedState::new(backend, metrics);

        let router = build_router(app_state, config.server.max_upload_bytes).layer(metrics_layer);

        let listener = TcpListener::bind(addr).await?;

        Ok(Self { router, listener })
    }

    pub async fn run(
        self,
        shutdown_rx: Receiver<()>,
    ) -> anyhow::Result<JoinHandle<anyhow::Result<()>>> {
        tracing::info!("Starting portal on {}", self.listener.local_addr()?);

        let listener = self.listener;
        let router = self.router;
        let server_handle = tokio::spawn({
            let mut shutdown_rx = shutdown_rx.resubscribe();
            async move {
                axum::serve(listener, router)
                    .with_graceful_shutdown(async move {
                        shutdown_rx.recv().await.ok();
                    })
                    .await?;
                Ok(())
            }
        });

        Ok(server_handle)
    }
}
