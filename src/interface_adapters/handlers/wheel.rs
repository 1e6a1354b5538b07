use crate::domain::roster::demo_roster;
use crate::interface_adapters::handlers::course_query;
use crate::interface_adapters::protocol::CourseQuery;
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::view::render_wheel;
use axum::{
    extract::{Query, State, rejection::QueryRejection},
    response::Html,
};
use std::sync::Arc;
use tracing::field::Empty;

// Page loaded inside the Edusign iframe. Always answers 200 so the iframe keeps working.
#[tracing::instrument(
    name = "wheel_view",
    skip_all,
    fields(course_id = Empty, school_id = Empty)
)]
pub async fn wheel_view(
    State(state): State<Arc<AppState>>,
    query: Result<Query<CourseQuery>, QueryRejection>,
) -> Html<String> {
    let query = course_query(query);
    let span = tracing::Span::current();
    span.record("course_id", tracing::field::debug(&query.course_id));
    span.record("school_id", tracing::field::debug(&query.school_id));

    let course_id = query.course_id.as_deref().unwrap_or_default();
    let names = state
        .roster
        .resolve(course_id, query.school_id.as_deref())
        .await;

    render_wheel(&names)
}

// Wheel with the built-in names, bypassing the remote API entirely.
pub async fn demo() -> Html<String> {
    render_wheel(&demo_roster())
}
