use shared::domain::BeneficiaryId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("beneficiary {0} not found")]
    NotFound(BeneficiaryId),
    #[error("failed to load beneficiaries: {0}")]
    Load(String),
    #[error("session is not authenticated")]
    Unauthorized,
    #[error("an action is already in progress for this beneficiary")]
    ActionInFlight,
    #[error("no beneficiary is selected")]
    NoSelection,
    #[error("operation not supported by this backend: {0}")]
    Unsupported(String),
    #[error("transport error: {0}")]
    Transport(String),
}

impl ClientError {
    pub fn requires_reauth(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }
}
