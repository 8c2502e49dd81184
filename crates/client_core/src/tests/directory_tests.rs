use async_trait::async_trait;
use shared::domain::Address;
use storage::Storage;

use super::*;
use crate::mock::MockBackend;

fn record(id: &str, tax_number: Option<&str>) -> BeneficiaryRecord {
    BeneficiaryRecord {
        id: BeneficiaryId::new(id),
        name: format!("Name{id}"),
        surname: "Example".to_string(),
        identity_number: format!("ID{id}"),
        university: "University of Botswana".to_string(),
        accumulated_total: 25_000,
        year_of_completion: 2020,
        tax_number: tax_number.map(str::to_string),
        image_url: String::new(),
        email: format!("name{id}@example.org"),
        address: Address {
            street: "Plot 9".into(),
            city: "Francistown".into(),
            postal_code: "0000".into(),
            country: "Botswana".into(),
        },
    }
}

fn backend(records: Vec<BeneficiaryRecord>) -> Arc<MockBackend> {
    Arc::new(MockBackend::new(Storage::new(records).expect("storage")))
}

struct BrokenPort(ClientError);

#[async_trait]
impl DirectoryPort for BrokenPort {
    async fn load_all(&self) -> Result<Vec<BeneficiaryRecord>, ClientError> {
        Err(self.0.clone())
    }

    async fn set_status(
        &self,
        _id: &BeneficiaryId,
        _status: Category,
    ) -> Result<BeneficiaryRecord, ClientError> {
        Err(self.0.clone())
    }
}

#[tokio::test]
async fn load_all_replaces_local_records() {
    let backend = backend(vec![record("1", None), record("2", Some("T2"))]);
    let mut directory = Directory::new(backend.clone());
    assert!(!directory.is_loaded());

    directory.load_all().await.expect("first load");
    directory.load_all().await.expect("second load");

    assert!(directory.is_loaded());
    assert_eq!(directory.records().len(), 2);
    assert_eq!(directory.records(), backend.storage().load_all().await.as_slice());
}

#[tokio::test]
async fn set_status_replaces_only_the_matching_record() {
    let mut directory = Directory::new(backend(vec![
        record("1", None),
        record("2", None),
        record("3", Some("T3")),
    ]));
    directory.load_all().await.expect("load");
    let before = directory.records().to_vec();

    let updated = directory
        .set_status(&BeneficiaryId::new("2"), Category::Eligible)
        .await
        .expect("set status");

    assert_eq!(updated.tax_number.as_deref(), Some("TAXID2"));
    let after = directory.records();
    assert_eq!(after[0], before[0]);
    assert_eq!(after[1], updated);
    assert_eq!(after[2], before[2]);
}

#[tokio::test]
async fn unknown_id_is_not_found_and_changes_nothing() {
    let backend = backend(vec![record("1", None)]);
    let mut directory = Directory::new(backend.clone());
    directory.load_all().await.expect("load");

    let missing = BeneficiaryId::new("missing");
    let err = directory
        .set_status(&missing, Category::Eligible)
        .await
        .expect_err("missing id");

    assert_eq!(err, ClientError::NotFound(missing));
    assert_eq!(directory.records(), backend.storage().load_all().await.as_slice());
}

#[tokio::test]
async fn failed_load_keeps_previous_records_and_reports_load_error() {
    let mut directory = Directory::new(Arc::new(BrokenPort(ClientError::Transport(
        "connection refused".into(),
    ))));

    let err = directory.load_all().await.expect_err("broken backend");

    assert!(matches!(err, ClientError::Load(_)));
    assert!(!directory.is_loaded());
    assert!(directory.records().is_empty());
}

#[tokio::test]
async fn unauthorized_load_is_passed_through() {
    let mut directory = Directory::new(Arc::new(BrokenPort(ClientError::Unauthorized)));
    let err = directory.load_all().await.expect_err("expired session");
    assert!(err.requires_reauth());
}

#[tokio::test]
async fn clear_forgets_loaded_records() {
    let mut directory = Directory::new(backend(vec![record("1", None)]));
    directory.load_all().await.expect("load");
    directory.clear();
    assert!(!directory.is_loaded());
    assert!(directory.get(&BeneficiaryId::new("1")).is_none());
}
