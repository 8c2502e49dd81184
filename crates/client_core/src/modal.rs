use shared::domain::{format_amount, BeneficiaryId, BeneficiaryRecord, Category};
use tracing::warn;
use url::Url;

use crate::error::ClientError;

pub const CONTACT_SUBJECT: &str = "DTEF repayment";
pub const TAX_NUMBER_PLACEHOLDER: &str = "Not yet assigned";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    MakeEligible,
    Contact,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionState {
    Idle,
    Pending,
    Failed(String),
}

/// Work the caller must carry out after the action control is pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalCommand {
    SetStatus {
        id: BeneficiaryId,
        status: Category,
    },
    OpenContact(Url),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalOutcome {
    Completed(BeneficiaryRecord),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailField {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub heading: String,
    pub university: String,
    pub total_label: String,
    pub image_url: String,
    pub fields: Vec<DetailField>,
}

/// Read-only view of one beneficiary with a single primary action.
#[derive(Debug, Clone)]
pub struct DetailModal {
    record: BeneficiaryRecord,
    action: ModalAction,
    state: ActionState,
}

impl DetailModal {
    pub fn new(record: BeneficiaryRecord, action: ModalAction) -> Self {
        Self {
            record,
            action,
            state: ActionState::Idle,
        }
    }

    pub fn record(&self) -> &BeneficiaryRecord {
        &self.record
    }

    pub fn action(&self) -> ModalAction {
        self.action
    }

    pub fn state(&self) -> &ActionState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state == ActionState::Pending
    }

    pub fn action_enabled(&self) -> bool {
        !self.is_pending()
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            ActionState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn action_label(&self) -> &'static str {
        match (self.action, &self.state) {
            (ModalAction::MakeEligible, ActionState::Pending) => "Processing...",
            (ModalAction::MakeEligible, _) => "Make Eligible to Pay",
            (ModalAction::Contact, _) => "Contact Beneficiary",
        }
    }

    pub fn details(&self) -> DetailView {
        let record = &self.record;
        let address = &record.address;
        DetailView {
            heading: record.full_name(),
            university: record.university.clone(),
            total_label: format_amount(record.accumulated_total),
            image_url: record.image_url.clone(),
            fields: vec![
                DetailField {
                    label: "Identity Number",
                    value: record.identity_number.clone(),
                },
                DetailField {
                    label: "Year of Completion",
                    value: record.year_of_completion.to_string(),
                },
                DetailField {
                    label: "Tax Number",
                    value: record
                        .tax_number
                        .clone()
                        .unwrap_or_else(|| TAX_NUMBER_PLACEHOLDER.to_string()),
                },
                DetailField {
                    label: "Email",
                    value: record.email.clone(),
                },
                DetailField {
                    label: "Address",
                    value: format!(
                        "{}\n{}, {}\n{}",
                        address.street, address.city, address.postal_code, address.country
                    ),
                },
            ],
        }
    }

    /// Presses the action control. A status transition stays pending until [`Self::resolve`].
    pub fn invoke(&mut self) -> Result<ModalCommand, ClientError> {
        match self.action {
            ModalAction::MakeEligible => {
                if self.is_pending() {
                    return Err(ClientError::ActionInFlight);
                }
                self.state = ActionState::Pending;
                Ok(ModalCommand::SetStatus {
                    id: self.record.id.clone(),
                    status: Category::Eligible,
                })
            }
            ModalAction::Contact => Ok(ModalCommand::OpenContact(contact_link(&self.record)?)),
        }
    }

    pub fn resolve(&mut self, result: Result<BeneficiaryRecord, ClientError>) -> ModalOutcome {
        match result {
            Ok(record) => {
                self.state = ActionState::Idle;
                self.record = record.clone();
                ModalOutcome::Completed(record)
            }
            Err(err) => {
                warn!(id = %self.record.id, error = %err, "beneficiary action failed");
                let message = format!("Could not update beneficiary: {err}");
                self.state = ActionState::Failed(message.clone());
                ModalOutcome::Failed(message)
            }
        }
    }
}

pub fn contact_link(record: &BeneficiaryRecord) -> Result<Url, ClientError> {
    let mut link = Url::parse(&format!("mailto:{}", record.email))
        .map_err(|e| ClientError::Transport(format!("invalid contact address: {e}")))?;
    link.query_pairs_mut().append_pair("subject", CONTACT_SUBJECT);
    Ok(link)
}

#[cfg(test)]
#[path = "tests/modal_tests.rs"]
mod tests;
