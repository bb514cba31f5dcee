//! Bearer token issuance and validation.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::AppError;

/// Claims carried by an access token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Token failures.
///
/// Every validation failure collapses into [`TokenError::Invalid`] so callers
/// cannot tell a bad signature from an expired token.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    Signing(String),

    #[error("Invalid token")]
    Invalid,
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Invalid => AppError::invalid_credentials(),
            TokenError::Signing(reason) => {
                tracing::error!(%reason, "Token signing failed");
                AppError::internal("Failed to issue token", serde_json::json!({}))
            }
        }
    }
}

/// Signs and verifies HMAC JWTs with a secret fixed at startup.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    default_ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, algorithm: Algorithm, default_ttl_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm,
            default_ttl: Duration::minutes(default_ttl_minutes),
        }
    }

    /// Builds the service from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured algorithm is not supported.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(
            &config.secret_key,
            config.signing_algorithm()?,
            config.access_token_expire_minutes,
        ))
    }

    /// Lifetime applied when [`Self::issue`] gets no explicit TTL.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Issues a token for `subject` expiring `ttl` from now.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Signing`] if encoding fails.
    pub fn issue(&self, subject: &str, ttl: Option<Duration>) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl.unwrap_or(self.default_ttl)).timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Decodes a token and returns its claims.
    ///
    /// Signature, algorithm and expiry are all checked with zero leeway.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Invalid`] for any failure.
    pub fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            TokenError::Invalid
        })?;

        // `exp == now` still passes the library check.
        if data.claims.exp <= Utc::now().timestamp() {
            return Err(TokenError::Invalid);
        }

        if data.claims.sub.is_empty() {
            return Err(TokenError::Invalid);
        }

        Ok(data.claims)
    }

    /// Validates a token and returns its subject.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Invalid`] for any failure.
    pub fn validate(&self, token: &str) -> Result<String, TokenError> {
        self.decode_claims(token).map(|claims| claims.sub)
    }
}
