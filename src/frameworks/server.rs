// Framework bootstrap for the wheel service runtime.

use crate::domain::{Credential, CredentialStore};
use crate::frameworks::config::{self, Settings};
use crate::frameworks::db;
use crate::interface_adapters::clients::edusign::EdusignClient;
use crate::interface_adapters::routes;
use crate::interface_adapters::state::{
    AppState, InMemoryCredentialStore, PostgresCredentialStore, SiteLinks,
};
use crate::use_cases::{CredentialResolver, RosterResolver};
use std::io::Result;
use std::net::SocketAddr;
use std::sync::Arc;

fn init_runtime() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run(listener: tokio::net::TcpListener, settings: Settings) -> Result<()> {
    let address = listener.local_addr()?;
    let state = build_state(&settings).await?;

    // Start the web server with the HTTP routes wired up.
    let app = routes::app(state);

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking.
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let settings = Settings::from_env();
    let address = SocketAddr::from(([0, 0, 0, 0], config::http_port()));

    // Bind TCP listener with error handling.
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener, settings).await
}

async fn build_state(settings: &Settings) -> Result<Arc<AppState>> {
    let edusign = EdusignClient::new(&settings.edusign_api_url, settings.edusign_timeout)
        .map_err(|e| std::io::Error::other(format!("failed to initialize edusign client: {e}")))?;
    tracing::debug!(
        edusign_api_url = %settings.edusign_api_url,
        edusign_timeout_ms = settings.edusign_timeout.as_millis(),
        roster_timeout_ms = settings.roster_timeout.as_millis(),
        strategy = ?settings.roster_strategy,
        "edusign client configured."
    );

    let credentials = build_credential_store(settings).await?;

    let default_credential = settings.default_api_key.clone().and_then(Credential::new);
    if default_credential.is_none() {
        tracing::warn!(
            "EDUSIGN_API_KEY not set; schools without a stored token get the error wheel."
        );
    }

    let roster = RosterResolver::new(
        Arc::new(edusign),
        CredentialResolver::new(credentials.clone(), default_credential),
        settings.roster_strategy,
        settings.roster_timeout,
    );

    Ok(Arc::new(AppState {
        roster: Arc::new(roster),
        credentials,
        links: SiteLinks {
            app_url: settings.app_url.clone(),
            privacy_url: settings.privacy_url.clone(),
            terms_url: settings.terms_url.clone(),
            support_url: settings.support_url.clone(),
        },
    }))
}

async fn build_credential_store(settings: &Settings) -> Result<Arc<dyn CredentialStore>> {
    let Some(database_url) = settings.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set; school tokens are kept in memory only.");
        return Ok(Arc::new(InMemoryCredentialStore::default()));
    };

    let pool = db::connect_pool(database_url)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "failed to connect to database"))
        .map_err(std::io::Error::other)?;

    db::run_migrations(&pool)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "failed to run migrations"))
        .map_err(std::io::Error::other)?;

    tracing::info!("school tokens stored in postgres.");
    Ok(Arc::new(PostgresCredentialStore { db: pool }))
}
