use serde::{Deserialize, Serialize};

// One UI block of the Edusign block builder, tagged by `block`.
#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "block", rename_all = "lowercase")]
pub enum Block {
    Title {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        text: String,
    },
    Text {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        text: String,
    },
    Iframe {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        url: String,
        height: String,
    },
}

// Query string accepted by the action and wheel endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct CourseQuery {
    #[serde(default, alias = "courseId")]
    pub course_id: Option<String>,
    #[serde(default, alias = "schoolId")]
    pub school_id: Option<String>,
}

// Install webhook payload.
#[derive(Debug, Deserialize)]
pub struct InstallRequest {
    #[serde(rename = "schoolId", alias = "school_id")]
    pub school_id: String,
    pub token: String,
}

// Uninstall webhook payload.
#[derive(Debug, Deserialize)]
pub struct UninstallRequest {
    #[serde(rename = "schoolId", alias = "school_id")]
    pub school_id: String,
}

// Acknowledgement returned to webhook callers.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed: Option<bool>,
}

// Health-check payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

// Simple error envelope for JSON responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}
