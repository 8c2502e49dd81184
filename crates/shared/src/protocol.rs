use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::BeneficiaryId;

pub const LOGIN_ROUTE: &str = "/auth/login";
pub const LOGOUT_ROUTE: &str = "/auth/logout";
pub const BENEFICIARIES_ROUTE: &str = "/beneficiaries";
pub const HEALTHZ_ROUTE: &str = "/healthz";

pub fn initiate_repayment_route(id: &BeneficiaryId) -> String {
    format!("{BENEFICIARIES_ROUTE}/{}/initiate-repayment", id.as_str())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
