use crate::interface_adapters::handlers::action::edusign_action;
use crate::interface_adapters::handlers::pages::{health, privacy, support, terms};
use crate::interface_adapters::handlers::webhooks::{install, uninstall};
use crate::interface_adapters::handlers::wheel::{demo, wheel_view};
use crate::interface_adapters::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

pub fn app(state: Arc<AppState>) -> Router {
    // Wire the HTTP routes to their handlers.
    Router::new()
        .route("/", get(health))
        .route("/edusign-action", post(edusign_action))
        .route("/wheel-view", get(wheel_view))
        .route("/demo", get(demo))
        .route("/install", post(install))
        .route("/uninstall", post(uninstall))
        .route("/privacy", get(privacy))
        .route("/terms", get(terms))
        .route("/support", get(support))
        .with_state(state)
}
