use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

// Course references that force the built-in demo roster (exact, case-sensitive).
pub const DEMO_COURSE_SENTINEL: &str = "TEST";
const UNDEFINED_COURSE: &str = "undefined";

// Placeholders shown on the wheel when real names cannot be produced.
pub const UNNAMED_STUDENT: &str = "Étudiant inconnu";
pub const UNAVAILABLE_STUDENT: &str = "Étudiant indisponible";
pub const NO_STUDENTS: &str = "Aucun étudiant trouvé";
pub const API_ERROR: &str = "Erreur API Edusign";

pub const DEMO_STUDENTS: [&str; 6] = [
    "Alice Martin",
    "Bob Dupont",
    "Charlie Durand",
    "Diana Lopez",
    "Emma Bernard",
    "Frank Petit",
];

// Upper bound on student references fetched per course in the two-hop strategy.
pub const MAX_STUDENT_REFS: usize = 50;

// Field spellings seen across Edusign API versions.
const FIRST_NAME_FIELDS: [&str; 4] = ["firstname", "FIRSTNAME", "first_name", "firstName"];
const LAST_NAME_FIELDS: [&str; 4] = ["lastname", "LASTNAME", "last_name", "lastName"];
const NAME_FIELDS: [&str; 4] = ["name", "NAME", "fullname", "FULLNAME"];
const ID_FIELDS: [&str; 6] = ["id", "ID", "_id", "studentId", "student_id", "STUDENT_ID"];

pub fn is_demo_course(course_ref: &str) -> bool {
    course_ref.trim().is_empty()
        || course_ref == DEMO_COURSE_SENTINEL
        || course_ref == UNDEFINED_COURSE
}

pub fn demo_roster() -> Vec<String> {
    DEMO_STUDENTS.iter().map(|name| name.to_string()).collect()
}

/// Bearer token used against the Edusign API for one school.
///
/// `Debug` is redacted so tokens never end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    // Blank tokens are rejected; surrounding whitespace is dropped.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn token(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

// How the roster of a course is discovered on the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterStrategy {
    // One call returns the student records of the course.
    Direct,
    // One call returns bare student references, then one call per student.
    TwoHop,
}

impl FromStr for RosterStrategy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(Self::Direct),
            "two_hop" | "two-hop" | "twohop" => Ok(Self::TwoHop),
            other => Err(format!("unknown roster strategy: {other}")),
        }
    }
}

/// A student as returned by the remote API, classified at decode time.
///
/// The upstream schema drifts between versions, so every payload is
/// classified into one of three shapes instead of probing fields later.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub enum StudentRecord {
    Named { first: String, last: Option<String> },
    SingleName(String),
    Bare { id: Option<String> },
}

impl From<Value> for StudentRecord {
    fn from(value: Value) -> Self {
        let fields = match value {
            Value::Object(fields) => fields,
            other => {
                return Self::Bare {
                    id: scalar_text(&other),
                };
            }
        };

        // The abbreviated form needs both halves; a combined name beats a
        // lone first name.
        match (
            text_field(&fields, &FIRST_NAME_FIELDS),
            text_field(&fields, &LAST_NAME_FIELDS),
            text_field(&fields, &NAME_FIELDS),
        ) {
            (Some(first), Some(last), _) => Self::Named {
                first,
                last: Some(last),
            },
            (_, _, Some(name)) => Self::SingleName(name),
            (Some(first), None, None) => Self::Named { first, last: None },
            _ => Self::Bare {
                id: text_field(&fields, &ID_FIELDS),
            },
        }
    }
}

impl StudentRecord {
    pub fn display_name(&self) -> String {
        match self {
            Self::Named { first, last } => abbreviate(first, last.as_deref()),
            Self::SingleName(name) => name.clone(),
            Self::Bare { .. } => UNNAMED_STUDENT.to_string(),
        }
    }

    // Short shape tag for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Named { .. } => "named",
            Self::SingleName(_) => "single_name",
            Self::Bare { .. } => "bare",
        }
    }
}

// "Marie" + "curie" -> "Marie C."
fn abbreviate(first: &str, last: Option<&str>) -> String {
    match last.and_then(|last| last.chars().next()) {
        Some(initial) => format!("{first} {}.", initial.to_uppercase()),
        None => first.to_string(),
    }
}

/// Identifier-only reference to a student inside a course object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub struct StudentRef {
    pub id: Option<String>,
}

impl From<Value> for StudentRef {
    fn from(value: Value) -> Self {
        let id = match &value {
            Value::Object(fields) => text_field(fields, &ID_FIELDS),
            other => scalar_text(other),
        };
        Self { id }
    }
}

// First non-blank string (or number) among the candidate keys, trimmed.
fn text_field(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .find_map(scalar_text)
}

fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}
