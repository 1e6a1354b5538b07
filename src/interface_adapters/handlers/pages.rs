use crate::interface_adapters::protocol::HealthResponse;
use crate::interface_adapters::state::AppState;
use axum::{Json, extract::State, response::Redirect};
use std::sync::Arc;

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "🎡 The Wheel is running!",
    })
}

pub async fn privacy(State(state): State<Arc<AppState>>) -> Redirect {
    Redirect::temporary(&state.links.privacy_url)
}

pub async fn terms(State(state): State<Arc<AppState>>) -> Redirect {
    Redirect::temporary(&state.links.terms_url)
}

pub async fn support(State(state): State<Arc<AppState>>) -> Redirect {
    Redirect::temporary(&state.links.support_url)
}
