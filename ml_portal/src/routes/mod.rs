mod apps;
mod health;
mod home;
mod metrics;
mod predict;
mod profile;

use crate::server::SharedState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health::healthcheck))
        .route("/metrics", get(metrics::metrics_handler))
        .route("/ml-select", get(apps::list_apps).post(apps::select_app))
        .route("/ml/{app_id}", get(apps::app_detail))
        .route("/ml/{app_id}/predict", post(predict::predict))
        .route(
            "/profile",
            get(profile::show_profile).post(profile::update_profile),
        )
}
