use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, timeout_at};

use crate::domain::roster::{
    API_ERROR, MAX_STUDENT_REFS, NO_STUDENTS, UNAVAILABLE_STUDENT, demo_roster, is_demo_course,
};
use crate::domain::{Credential, RosterError, RosterSource, RosterStrategy, StudentRecord};
use crate::use_cases::credentials::CredentialResolver;

/// Turns a course reference into the names shown on the wheel.
///
/// Resolution never fails: every error path ends in a placeholder list, so the
/// embedding iframe always has something to render. The returned list is never
/// empty.
pub struct RosterResolver {
    source: Arc<dyn RosterSource>,
    credentials: CredentialResolver,
    strategy: RosterStrategy,
    // Budget for one resolution. Discovery past it fails the whole roster,
    // student fetches past it only lose their own slot.
    timeout: Duration,
}

impl RosterResolver {
    pub fn new(
        source: Arc<dyn RosterSource>,
        credentials: CredentialResolver,
        strategy: RosterStrategy,
        timeout: Duration,
    ) -> Self {
        Self {
            source,
            credentials,
            strategy,
            timeout,
        }
    }

    #[tracing::instrument(
        name = "resolve_roster",
        skip(self),
        fields(strategy = ?self.strategy)
    )]
    pub async fn resolve(&self, course_id: &str, school_id: Option<&str>) -> Vec<String> {
        // Demo references never touch the credential store or the network.
        if is_demo_course(course_id) {
            tracing::info!("demo course reference, serving demo roster.");
            return demo_roster();
        }

        let Some(credential) = self.credentials.resolve(school_id).await else {
            tracing::error!("no school credential and no default API key configured.");
            return vec![API_ERROR.to_string()];
        };

        let deadline = Instant::now() + self.timeout;
        let names = match self.fetch_names(course_id, &credential, deadline).await {
            Ok(names) => names,
            Err(error) => {
                tracing::error!(
                    step = "discovery",
                    %error,
                    timeout_ms = self.timeout.as_millis(),
                    "roster discovery failed."
                );
                return vec![API_ERROR.to_string()];
            }
        };

        if names.is_empty() {
            tracing::info!("course roster is empty.");
            return vec![NO_STUDENTS.to_string()];
        }

        tracing::info!(count = names.len(), "roster resolved.");
        names
    }

    // Only the discovery call can fail the whole resolution.
    async fn fetch_names(
        &self,
        course_id: &str,
        credential: &Credential,
        deadline: Instant,
    ) -> Result<Vec<String>, RosterError> {
        match self.strategy {
            RosterStrategy::Direct => {
                let discovery = self.source.course_students(course_id, credential);
                let records = before(deadline, discovery).await?;
                log_shapes(&records);
                Ok(records.iter().map(StudentRecord::display_name).collect())
            }
            RosterStrategy::TwoHop => self.fetch_two_hop(course_id, credential, deadline).await,
        }
    }

    async fn fetch_two_hop(
        &self,
        course_id: &str,
        credential: &Credential,
        deadline: Instant,
    ) -> Result<Vec<String>, RosterError> {
        let discovery = self.source.course_student_refs(course_id, credential);
        let mut refs = before(deadline, discovery).await?;
        if refs.len() > MAX_STUDENT_REFS {
            tracing::warn!(
                total = refs.len(),
                dropped = refs.len() - MAX_STUDENT_REFS,
                "course has more student references than the fetch cap."
            );
            refs.truncate(MAX_STUDENT_REFS);
        }

        // All fetches run concurrently; join_all waits for every branch and
        // yields results in input order whatever order they complete in.
        let fetches = refs.iter().map(|student_ref| async move {
            match student_ref.id.as_deref() {
                Some(id) => before(deadline, self.source.student(id, credential)).await,
                None => Err(RosterError::MissingStudentId),
            }
        });
        let results = join_all(fetches).await;

        let mut records = Vec::with_capacity(results.len());
        let names = results
            .into_iter()
            .enumerate()
            .map(|(index, result)| match result {
                Ok(record) => {
                    let name = record.display_name();
                    records.push(record);
                    name
                }
                Err(error) => {
                    tracing::warn!(index, %error, "student fetch failed.");
                    UNAVAILABLE_STUDENT.to_string()
                }
            })
            .collect::<Vec<_>>();

        log_shapes(&records);
        if records.len() < names.len() {
            tracing::warn!(
                failed = names.len() - records.len(),
                total = names.len(),
                "some student records could not be fetched."
            );
        }
        Ok(names)
    }
}

// Runs a remote call against the resolution deadline.
async fn before<T, F>(deadline: Instant, call: F) -> Result<T, RosterError>
where
    F: Future<Output = Result<T, RosterError>>,
{
    match timeout_at(deadline, call).await {
        Ok(result) => result,
        Err(_) => Err(RosterError::Timeout),
    }
}

// Per-shape counts make upstream schema drift visible in the logs.
fn log_shapes(records: &[StudentRecord]) {
    let count = |kind: &str| records.iter().filter(|record| record.kind() == kind).count();
    tracing::debug!(
        named = count("named"),
        single_name = count("single_name"),
        bare = count("bare"),
        "student record shapes."
    );
    if !records.is_empty() && count("bare") == records.len() {
        tracing::warn!(
            count = records.len(),
            "no student record carried a name; check the upstream schema."
        );
    }
}
