use async_trait::async_trait;

use crate::domain::errors::RosterError;
use crate::domain::roster::{Credential, StudentRecord, StudentRef};

// Port for the per-school token store. Last write wins.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get(&self, school_id: &str) -> Result<Option<String>, String>;
    async fn set(&self, school_id: &str, token: &str) -> Result<(), String>;
    async fn delete(&self, school_id: &str) -> Result<bool, String>;
}

// Port for the remote attendance API. A missing roster field is an empty list, not an error.
#[async_trait]
pub trait RosterSource: Send + Sync {
    // Direct strategy: the student records of a course.
    async fn course_students(
        &self,
        course_id: &str,
        credential: &Credential,
    ) -> Result<Vec<StudentRecord>, RosterError>;

    // Two-hop strategy, first hop: the bare student references of a course.
    async fn course_student_refs(
        &self,
        course_id: &str,
        credential: &Credential,
    ) -> Result<Vec<StudentRef>, RosterError>;

    // Two-hop strategy, second hop: one student's full record.
    async fn student(
        &self,
        student_id: &str,
        credential: &Credential,
    ) -> Result<StudentRecord, RosterError>;
}
