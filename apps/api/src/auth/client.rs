use reqwest::Client;
use serde::Deserialize;
use sqlx::PgPool;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid or expired session (status {0})")]
    InvalidSession(u16),
}

/// The authenticated user as reported by the auth provider.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserMetadata {
    pub avatar_url: Option<String>,
}

/// Display identity used by the live session (greeting + in-call layout).
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub username: String,
    pub avatar_url: Option<String>,
    pub email: String,
}

/// Thin client for the hosted auth provider's user endpoint.
/// Session cookie refresh and the provider's internals stay on the provider's
/// side; we only exchange an access token for the user it belongs to.
#[derive(Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl AuthClient {
    pub fn new(base_url: String, anon_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
            anon_key,
        }
    }

    /// Verifies an access token and returns the user it identifies.
    pub async fn fetch_user(&self, access_token: &str) -> Result<AuthUser, AuthError> {
        let url = format!("{}/auth/v1/user", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::InvalidSession(status.as_u16()));
        }

        Ok(response.json::<AuthUser>().await?)
    }
}

/// Resolves the display profile for a verified user: the `profiles` table
/// username when present, otherwise the email local-part, otherwise "User".
pub async fn resolve_profile(
    pool: &PgPool,
    user_id: Uuid,
    email: &str,
    avatar_url: Option<&str>,
) -> UserProfile {
    let username: Option<String> =
        sqlx::query_scalar("SELECT username FROM profiles WHERE id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await
            .unwrap_or_else(|e| {
                warn!("Profile lookup failed for {user_id}: {e}");
                None
            })
            .flatten();

    UserProfile {
        username: display_name(username.as_deref(), email),
        avatar_url: avatar_url.map(str::to_string),
        email: email.to_string(),
    }
}

fn display_name(username: Option<&str>, email: &str) -> String {
    if let Some(name) = username {
        if !name.trim().is_empty() {
            return name.to_string();
        }
    }
    email
        .split('@')
        .next()
        .filter(|local| !local.is_empty())
        .unwrap_or("User")
        .to_string()
}
