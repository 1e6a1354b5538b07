pub mod errors;
pub mod ports;
pub mod roster;

// Re-export the domain boundary types and ports.
pub use errors::{CredentialError, RosterError};
pub use ports::{CredentialStore, RosterSource};
pub use roster::{Credential, RosterStrategy, StudentRecord, StudentRef};
