//! Async boundaries between the admin client and whatever backs it.

use async_trait::async_trait;
use shared::domain::{BeneficiaryId, BeneficiaryRecord, Category};

use crate::error::ClientError;

#[async_trait]
pub trait AuthPort: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<(), ClientError>;
    async fn logout(&self) -> Result<(), ClientError>;
}

#[async_trait]
pub trait DirectoryPort: Send + Sync {
    /// Full ordered record set.
    async fn load_all(&self) -> Result<Vec<BeneficiaryRecord>, ClientError>;
    async fn set_status(
        &self,
        id: &BeneficiaryId,
        status: Category,
    ) -> Result<BeneficiaryRecord, ClientError>;
}
