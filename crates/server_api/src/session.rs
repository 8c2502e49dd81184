use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::error::ApiError;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub ttl_seconds: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub sid: Uuid,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub session_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// Signed session tokens plus each live session id with its expiry timestamp.
#[derive(Clone)]
pub struct SessionRegistry {
    config: SessionConfig,
    active: Arc<RwLock<HashMap<Uuid, i64>>>,
}

impl SessionRegistry {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            active: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn issue(&self, username: &str) -> Result<IssuedSession, ApiError> {
        let session_id = Uuid::new_v4();
        let now = Utc::now();
        let expires_at = Duration::try_seconds(self.config.ttl_seconds)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                ApiError::internal(format!(
                    "session ttl of {}s is out of range",
                    self.config.ttl_seconds
                ))
            })?;
        let claims = SessionClaims {
            sub: username.to_string(),
            sid: session_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.secret.as_bytes()),
        )
        .map_err(|e| ApiError::internal(format!("token mint failed: {e}")))?;

        let mut active = self.active.write().await;
        prune_expired(&mut active, now.timestamp());
        active.insert(session_id, claims.exp);
        Ok(IssuedSession {
            token,
            session_id,
            expires_at,
        })
    }

    pub async fn verify(&self, token: &str) -> Result<SessionClaims, ApiError> {
        prune_expired(&mut *self.active.write().await, Utc::now().timestamp());

        let mut validation = Validation::default();
        validation.leeway = 0;
        let claims = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.config.secret.as_bytes()),
            &validation,
        )
        .map_err(|_| ApiError::unauthorized("invalid or expired session token"))?
        .claims;

        if !self.active.read().await.contains_key(&claims.sid) {
            return Err(ApiError::unauthorized("session has been signed out"));
        }
        Ok(claims)
    }

    /// Returns whether the session was still active.
    pub async fn revoke(&self, session_id: Uuid) -> bool {
        self.active.write().await.remove(&session_id).is_some()
    }

    /// Sessions that are neither signed out nor expired.
    pub async fn active_count(&self) -> usize {
        let now = Utc::now().timestamp();
        self.active
            .read()
            .await
            .values()
            .filter(|exp| **exp >= now)
            .count()
    }
}

fn prune_expired(active: &mut HashMap<Uuid, i64>, now: i64) {
    active.retain(|_, exp| *exp >= now);
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
