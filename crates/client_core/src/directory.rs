use std::sync::Arc;

use shared::domain::{BeneficiaryId, BeneficiaryRecord, Category};
use tracing::{debug, info};

use crate::{error::ClientError, ports::DirectoryPort};

/// Client-side copy of the beneficiary directory, refreshed through a [`DirectoryPort`].
pub struct Directory {
    port: Arc<dyn DirectoryPort>,
    records: Vec<BeneficiaryRecord>,
    loaded: bool,
}

impl Directory {
    pub fn new(port: Arc<dyn DirectoryPort>) -> Self {
        Self {
            port,
            records: Vec::new(),
            loaded: false,
        }
    }

    pub fn records(&self) -> &[BeneficiaryRecord] {
        &self.records
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn get(&self, id: &BeneficiaryId) -> Option<&BeneficiaryRecord> {
        self.records.iter().find(|record| &record.id == id)
    }

    /// Replaces the local records with the backend's. A failed load keeps what was there.
    pub async fn load_all(&mut self) -> Result<&[BeneficiaryRecord], ClientError> {
        let records = self.port.load_all().await.map_err(|err| match err {
            ClientError::Unauthorized => ClientError::Unauthorized,
            ClientError::Load(reason) => ClientError::Load(reason),
            other => ClientError::Load(other.to_string()),
        })?;
        info!(count = records.len(), "beneficiaries loaded");
        self.records = records;
        self.loaded = true;
        Ok(&self.records)
    }

    pub async fn set_status(
        &mut self,
        id: &BeneficiaryId,
        status: Category,
    ) -> Result<BeneficiaryRecord, ClientError> {
        let index = self
            .records
            .iter()
            .position(|record| &record.id == id)
            .ok_or_else(|| ClientError::NotFound(id.clone()))?;

        let updated = self.port.set_status(id, status).await?;
        debug!(%id, category = %updated.category(), "local record replaced");
        self.records[index] = updated.clone();
        Ok(updated)
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.loaded = false;
    }
}

#[cfg(test)]
#[path = "tests/directory_tests.rs"]
mod tests;
