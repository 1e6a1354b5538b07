use crate::interface_adapters::protocol::CourseQuery;
use axum::extract::{Query, rejection::QueryRejection};

pub mod action;
pub mod pages;
pub mod webhooks;
pub mod wheel;

// A query string serde refuses (e.g. `course_id` and `courseId` together) is
// treated as absent so the iframe endpoints keep answering 200.
pub(crate) fn course_query(query: Result<Query<CourseQuery>, QueryRejection>) -> CourseQuery {
    match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "ignoring unreadable query string.");
            CourseQuery::default()
        }
    }
}
