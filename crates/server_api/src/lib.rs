use shared::{
    domain::{BeneficiaryId, BeneficiaryRecord, Category},
    error::ApiError,
    protocol::LoginResponse,
};
use storage::{DirectoryError, Storage};
use tracing::{info, warn};

mod session;

pub use session::{IssuedSession, SessionClaims, SessionConfig, SessionRegistry};

#[derive(Clone)]
pub struct ApiContext {
    pub storage: Storage,
    pub sessions: SessionRegistry,
}

impl ApiContext {
    pub fn new(storage: Storage, session: SessionConfig) -> Self {
        Self {
            storage,
            sessions: SessionRegistry::new(session),
        }
    }
}

/// Accepts any pair whose fields are non-empty after trimming.
pub async fn login(
    ctx: &ApiContext,
    username: &str,
    password: &str,
) -> Result<LoginResponse, ApiError> {
    let username = username.trim();
    if username.is_empty() || password.trim().is_empty() {
        warn!("rejected login with empty credentials");
        return Err(ApiError::unauthorized("invalid credentials"));
    }

    let issued = ctx.sessions.issue(username).await?;
    info!(%username, session_id = %issued.session_id, "session opened");
    Ok(LoginResponse {
        token: issued.token,
        expires_at: issued.expires_at,
    })
}

pub async fn logout(ctx: &ApiContext, claims: &SessionClaims) {
    if ctx.sessions.revoke(claims.sid).await {
        info!(username = %claims.sub, session_id = %claims.sid, "session closed");
    }
}

pub async fn authorize(ctx: &ApiContext, bearer: Option<&str>) -> Result<SessionClaims, ApiError> {
    let token = bearer
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::unauthorized("missing session token"))?;
    ctx.sessions.verify(token).await
}

pub async fn list_beneficiaries(ctx: &ApiContext) -> Vec<BeneficiaryRecord> {
    ctx.storage.load_all().await
}

pub async fn initiate_repayment(
    ctx: &ApiContext,
    id: &BeneficiaryId,
) -> Result<BeneficiaryRecord, ApiError> {
    let record = ctx
        .storage
        .set_status(id, Category::Eligible)
        .await
        .map_err(directory_error)?;
    info!(%id, tax_number = ?record.tax_number, "repayment initiated");
    Ok(record)
}

fn directory_error(err: DirectoryError) -> ApiError {
    match err {
        DirectoryError::NotFound(id) => ApiError::not_found(format!("beneficiary {id} not found")),
        other => ApiError::internal(other.to_string()),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
