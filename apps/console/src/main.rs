use std::{fmt::Write as _, path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    ActionResult, AdminApp, DetailView, HttpBackend, ListPage, MockBackend, MockLatency,
    ModalAction, LOGIN_FAILED_MESSAGE,
};
use shared::domain::{BeneficiaryId, BeneficiaryRecord, Category};
use storage::Storage;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "beneficiary-console", about = "Beneficiary repayment admin console")]
struct Args {
    #[arg(long, env = "BENEFICIARY_SERVER_URL", default_value = "http://127.0.0.1:8080")]
    server_url: String,
    #[arg(long, env = "BENEFICIARY_USERNAME")]
    username: String,
    #[arg(long, env = "BENEFICIARY_PASSWORD", hide_env_values = true)]
    password: String,
    /// Use the in-process mock backend instead of a server.
    #[arg(long)]
    offline: bool,
    /// Seed file for the mock backend.
    #[arg(long, requires = "offline")]
    seed_path: Option<PathBuf>,
    /// Add remote-like delays to the mock backend.
    #[arg(long, requires = "offline")]
    simulate_latency: bool,
    /// Print records as JSON.
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum Command {
    /// One page of a category tab.
    List {
        #[arg(long, default_value = "granted")]
        category: Category,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    Show {
        id: String,
    },
    /// Marks a granted beneficiary as eligible to pay.
    MakeEligible {
        id: String,
    },
    /// Prints the contact link for an eligible beneficiary.
    Contact {
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut app = build_app(&args)?;
    app.submit_login(&args.username, &args.password)
        .await
        .context(LOGIN_FAILED_MESSAGE)?;
    info!(username = %args.username, offline = args.offline, "console session opened");

    let result = run(&mut app, &args.command, args.json).await;
    if let Err(error) = app.logout().await {
        warn!(%error, "logout failed");
    }
    println!("{}", result?);
    Ok(())
}

fn build_app(args: &Args) -> Result<AdminApp> {
    if args.offline {
        let storage = Storage::open(args.seed_path.as_deref())?;
        let mut backend = MockBackend::new(storage);
        if args.simulate_latency {
            backend = backend.with_latency(MockLatency::simulated());
        }
        let backend = Arc::new(backend);
        return Ok(AdminApp::new(backend.clone(), backend));
    }
    let backend = Arc::new(HttpBackend::new(&args.server_url)?);
    Ok(AdminApp::new(backend.clone(), backend))
}

/// Runs one command against a signed-in app and returns what to print.
async fn run(app: &mut AdminApp, command: &Command, json: bool) -> Result<String> {
    if let Some(message) = app.list().load_error() {
        bail!("{message}");
    }

    match command {
        Command::List {
            category,
            search,
            page,
        } => {
            app.set_category(*category);
            app.set_search_term(search.as_str());
            app.go_to_page(*page);
            let page = app.page();
            if json {
                let records: Vec<&BeneficiaryRecord> = app
                    .records()
                    .iter()
                    .filter(|record| page.rows.iter().any(|row| row.id == record.id))
                    .collect();
                return Ok(serde_json::to_string_pretty(&records)?);
            }
            Ok(render_page(&page))
        }
        Command::Show { id } => {
            let modal = app.open_details(&BeneficiaryId::new(id.as_str()))?;
            let output = if json {
                serde_json::to_string_pretty(modal.record())?
            } else {
                let mut text = render_details(&modal.details());
                let _ = write!(text, "\n[{}]", modal.action_label());
                text
            };
            app.close_modal();
            Ok(output)
        }
        Command::MakeEligible { id } => {
            let modal = app.open_details(&BeneficiaryId::new(id.as_str()))?;
            if modal.action() != ModalAction::MakeEligible {
                let name = modal.record().full_name();
                app.close_modal();
                bail!("{name} is already eligible to pay");
            }
            match app.invoke_modal_action().await? {
                ActionResult::Updated(record) => Ok(format!(
                    "{} is now eligible to pay (tax number {})",
                    record.full_name(),
                    record.tax_number.as_deref().unwrap_or_default()
                )),
                ActionResult::Failed(message) => bail!(message),
                ActionResult::Contact(_) => bail!("unexpected contact action"),
            }
        }
        Command::Contact { id } => {
            let modal = app.open_details(&BeneficiaryId::new(id.as_str()))?;
            if modal.action() != ModalAction::Contact {
                let name = modal.record().full_name();
                app.close_modal();
                bail!("{name} is not eligible to pay yet; run make-eligible first");
            }
            let result = app.invoke_modal_action().await?;
            app.close_modal();
            match result {
                ActionResult::Contact(link) => Ok(link.to_string()),
                ActionResult::Updated(_) | ActionResult::Failed(_) => {
                    bail!("unexpected status transition")
                }
            }
        }
    }
}

fn render_page(page: &ListPage) -> String {
    let mut out = format!("{} ({} matching)\n", page.category.label(), page.total_matches);
    if page.rows.is_empty() {
        out.push_str("No beneficiaries found.");
        return out;
    }
    for row in &page.rows {
        let _ = writeln!(
            out,
            "{:>4}  {}  |  {}  |  {}",
            row.id, row.title, row.university, row.total_label
        );
    }
    if page.shows_pagination() {
        out.push_str(&page.page_label());
    }
    out.trim_end().to_string()
}

fn render_details(view: &DetailView) -> String {
    let mut out = format!("{}\n{}\n{}\n", view.heading, view.university, view.total_label);
    for field in &view.fields {
        let value = field.value.replace('\n', "\n    ");
        let _ = write!(out, "\n{}:\n    {}", field.label, value);
    }
    out
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
