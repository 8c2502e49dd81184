use std::{collections::HashSet, fs, path::Path, sync::Arc};

use anyhow::{Context, Result};
use shared::domain::{BeneficiaryId, BeneficiaryRecord, Category};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};

mod seed;

pub use seed::seed_records;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    #[error("beneficiary {0} not found")]
    NotFound(BeneficiaryId),
    #[error("duplicate beneficiary id {0}")]
    DuplicateId(BeneficiaryId),
    #[error("duplicate identity number {0}")]
    DuplicateIdentityNumber(String),
}

/// In-memory beneficiary directory. Clones share the same record set.
#[derive(Clone, Default)]
pub struct Storage {
    records: Arc<RwLock<Vec<BeneficiaryRecord>>>,
}

impl Storage {
    pub fn new(records: Vec<BeneficiaryRecord>) -> Result<Self, DirectoryError> {
        validate_unique(&records)?;
        Ok(Self {
            records: Arc::new(RwLock::new(records)),
        })
    }

    pub fn seeded() -> Self {
        Self {
            records: Arc::new(RwLock::new(seed_records())),
        }
    }

    /// Opens a directory from a JSON array of records, falling back to the built-in seed.
    pub fn open(seed_path: Option<&Path>) -> Result<Self> {
        let Some(path) = seed_path else {
            return Ok(Self::seeded());
        };
        let records = load_seed_file(path)?;
        info!(path = %path.display(), count = records.len(), "loaded beneficiary seed file");
        Ok(Self::new(records)?)
    }

    pub async fn load_all(&self) -> Vec<BeneficiaryRecord> {
        self.records.read().await.clone()
    }

    /// Replaces the whole record set; never appends.
    pub async fn replace_all(&self, records: Vec<BeneficiaryRecord>) -> Result<(), DirectoryError> {
        validate_unique(&records)?;
        *self.records.write().await = records;
        Ok(())
    }

    pub async fn get(&self, id: &BeneficiaryId) -> Option<BeneficiaryRecord> {
        self.records
            .read()
            .await
            .iter()
            .find(|record| &record.id == id)
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Moves one record between categories and returns its updated snapshot.
    pub async fn set_status(
        &self,
        id: &BeneficiaryId,
        status: Category,
    ) -> Result<BeneficiaryRecord, DirectoryError> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|record| &record.id == id)
            .ok_or_else(|| DirectoryError::NotFound(id.clone()))?;
        apply_status(record, status);
        debug!(%id, category = %record.category(), "beneficiary status updated");
        Ok(record.clone())
    }
}

/// Eligible records keep an existing tax number so a retried transition is a no-op.
pub fn apply_status(record: &mut BeneficiaryRecord, status: Category) {
    match status {
        Category::Eligible => {
            if record.tax_number.is_none() {
                record.tax_number = Some(tax_number_for(&record.identity_number));
            }
        }
        Category::Granted => record.tax_number = None,
    }
}

pub fn tax_number_for(identity_number: &str) -> String {
    format!("TAX{identity_number}")
}

pub fn load_seed_file(path: &Path) -> Result<Vec<BeneficiaryRecord>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read seed file '{}'", path.display()))?;
    let records: Vec<BeneficiaryRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse seed file '{}'", path.display()))?;
    validate_unique(&records)?;
    Ok(records)
}

fn validate_unique(records: &[BeneficiaryRecord]) -> Result<(), DirectoryError> {
    let mut ids = HashSet::with_capacity(records.len());
    let mut identity_numbers = HashSet::with_capacity(records.len());
    for record in records {
        if !ids.insert(&record.id) {
            return Err(DirectoryError::DuplicateId(record.id.clone()));
        }
        if !identity_numbers.insert(record.identity_number.as_str()) {
            return Err(DirectoryError::DuplicateIdentityNumber(
                record.identity_number.clone(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
