use crate::interface_adapters::handlers::course_query;
use crate::interface_adapters::protocol::{Block, CourseQuery};
use crate::interface_adapters::state::AppState;
use axum::{
    Json,
    body::Bytes,
    extract::{Query, State, rejection::QueryRejection},
};
use serde_json::Value;
use std::sync::Arc;
use url::Url;

const WHEEL_TITLE: &str = "🎲 La Roue du Hasard";
const WHEEL_INTRO: &str = "Lancez la roue pour désigner un étudiant aléatoirement !";
const IFRAME_HEIGHT: &str = "500px";

// Places where Edusign may put the course/school ids, by priority.
const BODY_SCOPES: [Option<&str>; 3] = [None, Some("data"), Some("context")];

// Identifiers resolved from an action invocation.
#[derive(Debug, Default, PartialEq)]
pub struct ActionTarget {
    pub course_id: Option<String>,
    pub school_id: Option<String>,
}

// Entry point invoked by the Edusign block builder.
#[tracing::instrument(name = "edusign_action", skip_all)]
pub async fn edusign_action(
    State(state): State<Arc<AppState>>,
    query: Result<Query<CourseQuery>, QueryRejection>,
    body: Bytes,
) -> Json<Vec<Block>> {
    let query = course_query(query);
    // A missing or malformed body is treated like an empty object.
    let body = serde_json::from_slice::<Value>(&body).unwrap_or(Value::Null);
    let target = resolve_target(&body, &query);
    tracing::info!(
        course_id = ?target.course_id,
        school_id = ?target.school_id,
        "edusign action invoked."
    );

    Json(vec![
        Block::Title {
            id: Some("wheel-title".to_string()),
            text: WHEEL_TITLE.to_string(),
        },
        Block::Text {
            id: Some("wheel-intro".to_string()),
            text: WHEEL_INTRO.to_string(),
        },
        Block::Iframe {
            id: Some("wheel-frame".to_string()),
            url: wheel_view_url(&state.links.app_url, &target),
            height: IFRAME_HEIGHT.to_string(),
        },
    ])
}

// Body (top level, then `data`, then `context`) wins over the query string.
pub fn resolve_target(body: &Value, query: &CourseQuery) -> ActionTarget {
    ActionTarget {
        course_id: find_id(body, &["course_id", "courseId"])
            .or_else(|| clean(query.course_id.as_deref())),
        school_id: find_id(body, &["school_id", "schoolId"])
            .or_else(|| clean(query.school_id.as_deref())),
    }
}

fn find_id(body: &Value, keys: &[&str]) -> Option<String> {
    BODY_SCOPES.iter().find_map(|scope| {
        let object = match scope {
            Some(scope) => body.get(scope)?,
            None => body,
        };
        keys.iter().find_map(|key| match object.get(key)? {
            Value::String(text) => clean(Some(text.as_str())),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        })
    })
}

fn clean(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

// `{app_url}/wheel-view?course_id=..&school_id=..`; unknown ids are left out.
pub fn wheel_view_url(app_url: &str, target: &ActionTarget) -> String {
    let base = format!("{}/wheel-view", app_url.trim_end_matches('/'));
    let Ok(mut url) = Url::parse(&base) else {
        tracing::warn!(app_url, "APP_URL is not an absolute url.");
        return base;
    };

    {
        let mut pairs = url.query_pairs_mut();
        if let Some(course_id) = &target.course_id {
            pairs.append_pair("course_id", course_id);
        }
        if let Some(school_id) = &target.school_id {
            pairs.append_pair("school_id", school_id);
        }
    }
    if url.query() == Some("") {
        url.set_query(None);
    }
    url.to_string()
}
