use crate::{server::SharedState, views};
use axum::{extract::State, response::Html};

pub async fn home(State(state): State<SharedState>) -> Html<String> {
    state.metrics.record_request("/");
    views::home_page()
}
