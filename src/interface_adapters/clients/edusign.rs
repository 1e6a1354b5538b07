use crate::domain::{Credential, RosterError, RosterSource, StudentRecord, StudentRef};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

// Thin wrapper around reqwest for the Edusign REST API.
#[derive(Clone)]
pub struct EdusignClient {
    http: Client,
    base_url: Url,
}

// Every Edusign payload is wrapped as `{ "status": ..., "result": ... }`.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: Option<String>,
    result: Option<T>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(default, alias = "error")]
    message: Option<String>,
}

// Course object as seen by the two-hop strategy; only the student list matters.
#[derive(Debug, Deserialize)]
struct CourseBody {
    #[serde(default, rename = "STUDENTS", alias = "students")]
    students: Option<Vec<StudentRef>>,
}

impl EdusignClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, String> {
        let base_url =
            Url::parse(base_url).map_err(|e| format!("invalid edusign base url {base_url}: {e}"))?;
        if base_url.cannot_be_a_base() {
            return Err(format!("edusign base url {base_url} cannot carry a path"));
        }
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| format!("failed to build http client: {e}"))?;
        Ok(Self { http, base_url })
    }

    // Base URL with the given path segments appended, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_result<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        credential: &Credential,
    ) -> Result<Option<T>, RosterError> {
        let url = self.endpoint(segments);
        tracing::debug!(%url, "edusign request.");
        let res = self
            .http
            .get(url)
            .bearer_auth(credential.token())
            .send()
            .await
            .map_err(|err| RosterError::Transport(err.to_string()))?;
        let status = res.status();

        // Keep upstream status/message so logs explain the failure.
        if !status.is_success() {
            let message = res
                .json::<ErrorPayload>()
                .await
                .ok()
                .and_then(|payload| payload.message);
            return Err(RosterError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let envelope = res
            .json::<Envelope<T>>()
            .await
            .map_err(|err| RosterError::Decode(err.to_string()))?;

        // Edusign sometimes reports errors with a 200 and `status: "error"`.
        if envelope.status.as_deref() == Some("error") {
            return Err(RosterError::Upstream {
                status: status.as_u16(),
                message: envelope.message,
            });
        }

        Ok(envelope.result)
    }
}

#[async_trait]
impl RosterSource for EdusignClient {
    async fn course_students(
        &self,
        course_id: &str,
        credential: &Credential,
    ) -> Result<Vec<StudentRecord>, RosterError> {
        let students = self
            .get_result::<Vec<StudentRecord>>(&["course", course_id, "students"], credential)
            .await?;
        Ok(students.unwrap_or_default())
    }

    async fn course_student_refs(
        &self,
        course_id: &str,
        credential: &Credential,
    ) -> Result<Vec<StudentRef>, RosterError> {
        let course = self
            .get_result::<CourseBody>(&["course", course_id], credential)
            .await?;
        Ok(course
            .and_then(|course| course.students)
            .unwrap_or_default())
    }

    async fn student(
        &self,
        student_id: &str,
        credential: &Credential,
    ) -> Result<StudentRecord, RosterError> {
        self.get_result::<StudentRecord>(&["student", student_id], credential)
            .await?
            .ok_or_else(|| RosterError::Decode("student payload has no result".to_string()))
    }
}
