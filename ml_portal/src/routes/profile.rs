use crate::{profile::ProfileForm, server::SharedState, views};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};

pub async fn show_profile(State(state): State<SharedState>) -> Html<String> {
    state.metrics.record_request("/profile");
    let store = &state.profile;
    views::profile_page(
        &store.profile(),
        &store.stats(),
        &store.recent_predictions(),
        None,
    )
}

pub async fn update_profile(
    State(state): State<SharedState>,
    Form(form): Form<ProfileForm>,
) -> Response {
    state.metrics.record_request("/profile");
    let store = &state.profile;

    match store.update(form) {
        Ok(profile) => views::profile_page(
            &profile,
            &store.stats(),
            &store.recent_predictions(),
            Some(Ok("Saved.")),
        )
        .into_response(),
        Err(e) => {
            let message = e.to_string();
            let page = views::profile_page(
                &store.profile(),
                &store.stats(),
                &store.recent_predictions(),
                Some(Err(message.as_str())),
            );
            (StatusCode::BAD_REQUEST, page).into_response()
        }
    }
}
