use std::sync::Arc;

use crate::domain::{Credential, CredentialError, CredentialStore};

// Picks the bearer token for a school, falling back to the process default.
#[derive(Clone)]
pub struct CredentialResolver {
    store: Arc<dyn CredentialStore>,
    default_credential: Option<Credential>,
}

impl CredentialResolver {
    pub fn new(store: Arc<dyn CredentialStore>, default_credential: Option<Credential>) -> Self {
        Self {
            store,
            default_credential,
        }
    }

    pub async fn resolve(&self, school_id: Option<&str>) -> Option<Credential> {
        let school_id = school_id.map(str::trim).filter(|id| !id.is_empty());

        if let Some(school_id) = school_id {
            match self.store.get(school_id).await {
                Ok(Some(token)) => {
                    if let Some(credential) = Credential::new(token) {
                        tracing::debug!(school_id, "using stored school credential");
                        return Some(credential);
                    }
                    tracing::warn!(school_id, "stored school credential is blank");
                }
                Ok(None) => tracing::debug!(school_id, "no stored school credential"),
                // Lookup failure must not break the wheel; the default key takes over.
                Err(error) => {
                    tracing::warn!(school_id, %error, "credential lookup failed");
                }
            }
        }

        self.default_credential.clone()
    }
}

// Install webhook: remember a school's API token.
pub struct InstallUseCase<'a, S: ?Sized> {
    pub store: &'a S,
}

impl<S> InstallUseCase<'_, S>
where
    S: CredentialStore + ?Sized,
{
    pub async fn execute(&self, school_id: &str, token: &str) -> Result<(), CredentialError> {
        let school_id = required(school_id).ok_or(CredentialError::MissingSchoolId)?;
        let token = required(token).ok_or(CredentialError::MissingToken)?;

        self.store
            .set(school_id, token)
            .await
            .map_err(|_| CredentialError::StorageFailure)
    }
}

// Response returned by the uninstall use case.
pub struct UninstallResponse {
    pub removed: bool,
}

// Uninstall webhook: forget a school's API token.
pub struct UninstallUseCase<'a, S: ?Sized> {
    pub store: &'a S,
}

impl<S> UninstallUseCase<'_, S>
where
    S: CredentialStore + ?Sized,
{
    pub async fn execute(&self, school_id: &str) -> Result<UninstallResponse, CredentialError> {
        let school_id = required(school_id).ok_or(CredentialError::MissingSchoolId)?;

        let removed = self
            .store
            .delete(school_id)
            .await
            .map_err(|_| CredentialError::StorageFailure)?;

        Ok(UninstallResponse { removed })
    }
}

fn required(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}
