use shared::domain::{Address, BeneficiaryId, BeneficiaryRecord, Category};
use storage::Storage;

fn person(id: &str, name: &str, tax_number: Option<&str>) -> BeneficiaryRecord {
    BeneficiaryRecord {
        id: BeneficiaryId::new(id),
        name: name.to_string(),
        surname: "Example".to_string(),
        identity_number: format!("ID-{id}"),
        university: "University of Botswana".to_string(),
        accumulated_total: 10_000,
        year_of_completion: 2021,
        tax_number: tax_number.map(str::to_string),
        image_url: String::new(),
        email: format!("{}@example.org", name.to_ascii_lowercase()),
        address: Address {
            street: "Plot 7".into(),
            city: "Gaborone".into(),
            postal_code: "0000".into(),
            country: "Botswana".into(),
        },
    }
}

fn names_in(records: &[BeneficiaryRecord], category: Category) -> Vec<String> {
    records
        .iter()
        .filter(|r| r.category() == category)
        .map(|r| r.name.clone())
        .collect()
}

#[tokio::test]
async fn transition_moves_record_between_partitions_preserving_order() {
    let storage = Storage::new(vec![person("1", "Alice", None), person("2", "Bob", Some("T1"))])
        .expect("storage");

    let records = storage.load_all().await;
    assert_eq!(names_in(&records, Category::Granted), vec!["Alice"]);
    assert_eq!(names_in(&records, Category::Eligible), vec!["Bob"]);

    storage
        .set_status(&BeneficiaryId::new("1"), Category::Eligible)
        .await
        .expect("transition");

    let records = storage.load_all().await;
    assert!(names_in(&records, Category::Granted).is_empty());
    assert_eq!(names_in(&records, Category::Eligible), vec!["Alice", "Bob"]);
}

#[tokio::test]
async fn clones_share_the_same_directory() {
    let storage = Storage::new(vec![person("1", "Alice", None)]).expect("storage");
    let handle = storage.clone();
    handle
        .set_status(&BeneficiaryId::new("1"), Category::Eligible)
        .await
        .expect("transition");
    let alice = storage
        .get(&BeneficiaryId::new("1"))
        .await
        .expect("alice");
    assert_eq!(alice.category(), Category::Eligible);
}
