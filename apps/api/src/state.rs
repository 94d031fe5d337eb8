use sqlx::PgPool;

use crate::auth::client::AuthClient;
use crate::config::Config;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    pub auth: AuthClient,
    pub config: Config,
}
