// Use cases layer: roster resolution and school credential workflows.

pub mod credentials;
pub mod roster;

#[cfg(test)]
pub(crate) mod test_support;

pub use credentials::{CredentialResolver, InstallUseCase, UninstallUseCase};
pub use roster::RosterResolver;
