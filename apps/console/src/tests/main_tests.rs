use clap::CommandFactory;

use super::*;

async fn signed_in_offline() -> AdminApp {
    let backend = Arc::new(MockBackend::seeded());
    let mut app = AdminApp::new(backend.clone(), backend);
    app.submit_login("admin", "secret").await.expect("login");
    app
}

#[test]
fn cli_definition_is_consistent() {
    Args::command().debug_assert();
}

#[test]
fn parses_list_filters() {
    let args = Args::try_parse_from([
        "beneficiary-console",
        "--username",
        "admin",
        "--password",
        "secret",
        "--offline",
        "list",
        "--category",
        "Eligible",
        "--search",
        "botswana",
        "--page",
        "2",
    ])
    .expect("parse");

    assert!(args.offline);
    assert_eq!(
        args.command,
        Command::List {
            category: Category::Eligible,
            search: "botswana".into(),
            page: 2,
        }
    );
}

#[test]
fn seed_path_requires_offline() {
    let result = Args::try_parse_from([
        "beneficiary-console",
        "--username",
        "admin",
        "--password",
        "secret",
        "--seed-path",
        "seed.json",
        "show",
        "1",
    ]);
    assert!(result.is_err());
}

#[tokio::test]
async fn list_renders_first_granted_page() {
    let mut app = signed_in_offline().await;
    let command = Command::List {
        category: Category::Granted,
        search: String::new(),
        page: 1,
    };

    let output = run(&mut app, &command, false).await.expect("list");

    assert!(output.starts_with("Granted Accounts (11 matching)"));
    assert!(output.ends_with("Page 1 of 2"));
    assert_eq!(output.lines().count(), 12);
}

#[tokio::test]
async fn list_reports_empty_search() {
    let mut app = signed_in_offline().await;
    let command = Command::List {
        category: Category::Eligible,
        search: "no such person".into(),
        page: 1,
    };

    let output = run(&mut app, &command, false).await.expect("list");

    assert!(output.ends_with("No beneficiaries found."));
}

#[tokio::test]
async fn show_prints_details_with_action() {
    let mut app = signed_in_offline().await;

    let output = run(&mut app, &Command::Show { id: "1".into() }, false)
        .await
        .expect("show");

    assert!(output.starts_with("John Doe"));
    assert!(output.contains("TAX123456"));
    assert!(output.ends_with("[Contact Beneficiary]"));
    assert!(app.modal().is_none());
}

#[tokio::test]
async fn make_eligible_then_contact() {
    let mut app = signed_in_offline().await;

    let output = run(&mut app, &Command::MakeEligible { id: "2".into() }, false)
        .await
        .expect("make eligible");
    assert!(output.contains("is now eligible to pay"));

    let again = run(&mut app, &Command::MakeEligible { id: "2".into() }, false).await;
    assert!(again.is_err());

    let link = run(&mut app, &Command::Contact { id: "2".into() }, false)
        .await
        .expect("contact");
    assert!(link.starts_with("mailto:"));
    assert!(link.ends_with("?subject=DTEF+repayment"));
}

#[tokio::test]
async fn contact_requires_eligible_record() {
    let mut app = signed_in_offline().await;
    let err = run(&mut app, &Command::Contact { id: "3".into() }, false)
        .await
        .expect_err("granted record");
    assert!(err.to_string().contains("make-eligible"));
}

#[tokio::test]
async fn json_list_contains_page_records() {
    let mut app = signed_in_offline().await;
    let command = Command::List {
        category: Category::Eligible,
        search: String::new(),
        page: 1,
    };

    let output = run(&mut app, &command, true).await.expect("list");

    let records: Vec<BeneficiaryRecord> = serde_json::from_str(&output).expect("json");
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.category() == Category::Eligible));
}
