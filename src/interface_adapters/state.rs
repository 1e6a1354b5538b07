use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::CredentialStore;
use crate::use_cases::RosterResolver;

// Externally visible links of this deployment.
#[derive(Debug, Clone)]
pub struct SiteLinks {
    // Public base URL of this service, used to build the iframe URL.
    pub app_url: String,
    pub privacy_url: String,
    pub terms_url: String,
    pub support_url: String,
}

#[derive(Clone)]
pub struct AppState {
    // We use Arc<dyn Trait> to hold any implementation (dependency injection).
    pub roster: Arc<RosterResolver>,
    pub credentials: Arc<dyn CredentialStore>,
    pub links: SiteLinks,
}

// In-memory token store, used when no database is configured.
#[derive(Clone, Default)]
pub struct InMemoryCredentialStore {
    pub tokens: Arc<Mutex<HashMap<String, String>>>,
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn get(&self, school_id: &str) -> Result<Option<String>, String> {
        let tokens = self.tokens.lock().await;
        Ok(tokens.get(school_id).cloned())
    }

    async fn set(&self, school_id: &str, token: &str) -> Result<(), String> {
        let mut tokens = self.tokens.lock().await;
        tokens.insert(school_id.to_string(), token.to_string());
        Ok(())
    }

    async fn delete(&self, school_id: &str) -> Result<bool, String> {
        let mut tokens = self.tokens.lock().await;
        Ok(tokens.remove(school_id).is_some())
    }
}

// PostgreSQL-backed token store (`school_tokens` table).
#[derive(Clone)]
pub struct PostgresCredentialStore {
    pub db: PgPool,
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn get(&self, school_id: &str) -> Result<Option<String>, String> {
        sqlx::query_scalar::<_, String>("SELECT token FROM school_tokens WHERE school_id = $1")
            .bind(school_id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| e.to_string())
    }

    async fn set(&self, school_id: &str, token: &str) -> Result<(), String> {
        // Upsert so a reinstall replaces the previous token.
        sqlx::query(
            r#"
            INSERT INTO school_tokens (school_id, token, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (school_id) DO UPDATE SET
                token = EXCLUDED.token,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(school_id)
        .bind(token)
        .execute(&self.db)
        .await
        .map_err(|e| e.to_string())?;

        Ok(())
    }

    async fn delete(&self, school_id: &str) -> Result<bool, String> {
        let result = sqlx::query("DELETE FROM school_tokens WHERE school_id = $1")
            .bind(school_id)
            .execute(&self.db)
            .await
            .map_err(|e| e.to_string())?;

        Ok(result.rows_affected() > 0)
    }
}
