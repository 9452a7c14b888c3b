//! Service-account authentication for the Sheets API.
//!
//! Google's OAuth2 JWT-bearer grant: sign a short-lived RS256 assertion with
//! the service account's private key, trade it for an access token at the
//! token endpoint, then reuse that token until shortly before it expires.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use configs::SheetsConfig;

use crate::errors::ServiceError;

pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const REFRESH_MARGIN_SECS: i64 = 60;

/// Something that can hand out a bearer token for the Sheets API.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn access_token(&self) -> Result<String, ServiceError>;
}

/// Fixed token, for emulators and tests.
pub struct StaticToken(pub String);

#[async_trait]
impl TokenSource for StaticToken {
    async fn access_token(&self) -> Result<String, ServiceError> {
        Ok(self.0.clone())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 { ASSERTION_LIFETIME_SECS }

struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(REFRESH_MARGIN_SECS) < self.expires_at
    }
}

/// Credentialed token source built once at startup and shared by all requests.
///
/// Missing credentials are not an error until the first token is requested.
pub struct ServiceAccountTokenSource {
    http: reqwest::Client,
    token_uri: String,
    client_email: Option<String>,
    private_key: Option<String>,
    cached: RwLock<Option<CachedToken>>,
}

impl ServiceAccountTokenSource {
    pub fn new(http: reqwest::Client, cfg: &SheetsConfig) -> Self {
        Self {
            http,
            token_uri: cfg.token_uri.clone(),
            client_email: cfg.client_email.clone(),
            private_key: cfg.private_key.as_deref().map(normalize_private_key),
            cached: RwLock::new(None),
        }
    }

    /// Build and sign the JWT assertion sent to the token endpoint.
    pub fn signed_assertion(&self, now: DateTime<Utc>) -> Result<String, ServiceError> {
        let email = self
            .client_email
            .as_deref()
            .ok_or(ServiceError::MissingCredentials("GOOGLE_SERVICE_ACCOUNT_EMAIL"))?;
        let pem = self
            .private_key
            .as_deref()
            .ok_or(ServiceError::MissingCredentials("GOOGLE_PRIVATE_KEY"))?;
        let key = EncodingKey::from_rsa_pem(pem.as_bytes())
            .map_err(|e| ServiceError::Auth(format!("invalid private key: {e}")))?;

        let iat = now.timestamp();
        let claims = AssertionClaims {
            iss: email.to_string(),
            scope: SHEETS_SCOPE.to_string(),
            aud: self.token_uri.clone(),
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };
        encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| ServiceError::Auth(format!("cannot sign assertion: {e}")))
    }

    async fn fetch(&self) -> Result<CachedToken, ServiceError> {
        let now = Utc::now();
        let assertion = self.signed_assertion(now)?;
        let resp = self
            .http
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ServiceError::Auth(format!("token endpoint returned {status}: {body}")));
        }
        let tr: TokenResponse = resp.json().await?;
        Ok(CachedToken {
            token: tr.access_token,
            expires_at: now + Duration::seconds(tr.expires_in),
        })
    }
}

#[async_trait]
impl TokenSource for ServiceAccountTokenSource {
    async fn access_token(&self) -> Result<String, ServiceError> {
        {
            let cached = self.cached.read().await;
            if let Some(t) = cached.as_ref().filter(|t| t.is_fresh(Utc::now())) {
                return Ok(t.token.clone());
            }
        }

        let mut cached = self.cached.write().await;
        // another request may have refreshed while we waited for the lock
        if let Some(t) = cached.as_ref().filter(|t| t.is_fresh(Utc::now())) {
            debug!("access token refreshed concurrently");
            return Ok(t.token.clone());
        }
        let fresh = self.fetch().await?;
        info!(event = "token_refreshed", expires_at = %fresh.expires_at, "obtained sheets access token");
        let token = fresh.token.clone();
        *cached = Some(fresh);
        Ok(token)
    }
}

/// Env files usually carry the PEM on one line with literal `\n` escapes.
pub fn normalize_private_key(raw: &str) -> String {
    raw.trim().trim_matches('"').replace("\\n", "\n")
}
