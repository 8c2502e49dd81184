use std::time::Duration;

use async_trait::async_trait;
use shared::domain::{BeneficiaryId, BeneficiaryRecord, Category};
use storage::{DirectoryError, Storage};
use tracing::debug;

use crate::{
    error::ClientError,
    ports::{AuthPort, DirectoryPort},
};

/// Artificial delays applied by [`MockBackend`]. Zero by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MockLatency {
    pub login: Duration,
    pub logout: Duration,
    pub load: Duration,
    pub set_status: Duration,
}

impl MockLatency {
    /// Delays resembling a remote backend.
    pub fn simulated() -> Self {
        Self {
            login: Duration::from_millis(1000),
            logout: Duration::from_millis(500),
            load: Duration::from_millis(1000),
            set_status: Duration::from_millis(1000),
        }
    }
}

/// In-process backend over a [`Storage`] directory. Accepts any non-empty credentials.
#[derive(Clone)]
pub struct MockBackend {
    storage: Storage,
    latency: MockLatency,
}

impl MockBackend {
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            latency: MockLatency::default(),
        }
    }

    pub fn seeded() -> Self {
        Self::new(Storage::seeded())
    }

    pub fn with_latency(mut self, latency: MockLatency) -> Self {
        self.latency = latency;
        self
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[async_trait]
impl AuthPort for MockBackend {
    async fn login(&self, username: &str, password: &str) -> Result<(), ClientError> {
        pause(self.latency.login).await;
        if username.trim().is_empty() || password.trim().is_empty() {
            return Err(ClientError::InvalidCredentials);
        }
        debug!(%username, "mock login accepted");
        Ok(())
    }

    async fn logout(&self) -> Result<(), ClientError> {
        pause(self.latency.logout).await;
        Ok(())
    }
}

#[async_trait]
impl DirectoryPort for MockBackend {
    async fn load_all(&self) -> Result<Vec<BeneficiaryRecord>, ClientError> {
        pause(self.latency.load).await;
        Ok(self.storage.load_all().await)
    }

    async fn set_status(
        &self,
        id: &BeneficiaryId,
        status: Category,
    ) -> Result<BeneficiaryRecord, ClientError> {
        pause(self.latency.set_status).await;
        self.storage
            .set_status(id, status)
            .await
            .map_err(|err| match err {
                DirectoryError::NotFound(id) => ClientError::NotFound(id),
                other => ClientError::Transport(other.to_string()),
            })
    }
}
