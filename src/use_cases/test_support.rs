use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{
    Credential, CredentialStore, RosterError, RosterSource, StudentRecord, StudentRef,
};

pub(crate) type TokenTable = Arc<Mutex<HashMap<String, String>>>;

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub get: bool,
    pub set: bool,
    pub delete: bool,
}

// In-memory credential store with switchable failures.
#[derive(Clone)]
pub(crate) struct RecordingStore {
    tokens: TokenTable,
    failures: FailureFlags,
}

impl RecordingStore {
    pub(crate) fn new() -> Self {
        Self {
            tokens: Arc::new(Mutex::new(HashMap::new())),
            failures: FailureFlags::default(),
        }
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn insert_test_token(&self, school_id: &str, token: &str) {
        let mut guard = self.tokens.lock().expect("tokens mutex poisoned");
        guard.insert(school_id.to_string(), token.to_string());
    }

    pub(crate) fn get_test_token(&self, school_id: &str) -> Option<String> {
        let guard = self.tokens.lock().expect("tokens mutex poisoned");
        guard.get(school_id).cloned()
    }
}

#[async_trait]
impl CredentialStore for RecordingStore {
    async fn get(&self, school_id: &str) -> Result<Option<String>, String> {
        if self.failures.get {
            return Err("get failed".to_string());
        }

        let guard = self.tokens.lock().expect("tokens mutex poisoned");
        Ok(guard.get(school_id).cloned())
    }

    async fn set(&self, school_id: &str, token: &str) -> Result<(), String> {
        if self.failures.set {
            return Err("set failed".to_string());
        }

        let mut guard = self.tokens.lock().expect("tokens mutex poisoned");
        guard.insert(school_id.to_string(), token.to_string());
        Ok(())
    }

    async fn delete(&self, school_id: &str) -> Result<bool, String> {
        if self.failures.delete {
            return Err("delete failed".to_string());
        }

        let mut guard = self.tokens.lock().expect("tokens mutex poisoned");
        Ok(guard.remove(school_id).is_some())
    }
}

// Canned remote API. Unknown courses and students answer with a 404.
#[derive(Clone, Default)]
pub(crate) struct ScriptedSource {
    pub rosters: HashMap<String, Result<Vec<StudentRecord>, RosterError>>,
    pub refs: HashMap<String, Result<Vec<StudentRef>, RosterError>>,
    pub students: HashMap<String, Result<StudentRecord, RosterError>>,
    // Artificial latency per course or student id.
    pub delays: HashMap<String, Duration>,
    // Every call as "<endpoint>:<id>:<token>".
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedSource {
    pub(crate) fn recorded_calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }

    async fn record(&self, endpoint: &str, id: &str, credential: &Credential) {
        {
            let mut guard = self.calls.lock().expect("calls mutex poisoned");
            guard.push(format!("{endpoint}:{id}:{}", credential.token()));
        }
        if let Some(delay) = self.delays.get(id) {
            tokio::time::sleep(*delay).await;
        }
    }
}

fn not_found() -> RosterError {
    RosterError::Upstream {
        status: 404,
        message: Some("not found".to_string()),
    }
}

#[async_trait]
impl RosterSource for ScriptedSource {
    async fn course_students(
        &self,
        course_id: &str,
        credential: &Credential,
    ) -> Result<Vec<StudentRecord>, RosterError> {
        self.record("students", course_id, credential).await;
        self.rosters
            .get(course_id)
            .cloned()
            .unwrap_or_else(|| Err(not_found()))
    }

    async fn course_student_refs(
        &self,
        course_id: &str,
        credential: &Credential,
    ) -> Result<Vec<StudentRef>, RosterError> {
        self.record("course", course_id, credential).await;
        self.refs
            .get(course_id)
            .cloned()
            .unwrap_or_else(|| Err(not_found()))
    }

    async fn student(
        &self,
        student_id: &str,
        credential: &Credential,
    ) -> Result<StudentRecord, RosterError> {
        self.record("student", student_id, credential).await;
        self.students
            .get(student_id)
            .cloned()
            .unwrap_or_else(|| Err(not_found()))
    }
}

pub(crate) fn named(first: &str, last: &str) -> StudentRecord {
    StudentRecord::Named {
        first: first.to_string(),
        last: Some(last.to_string()),
    }
}

pub(crate) fn student_ref(id: &str) -> StudentRef {
    StudentRef {
        id: Some(id.to_string()),
    }
}
