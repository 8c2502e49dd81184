use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(BeneficiaryId);

/// Listing tab a beneficiary falls under. Derived from the tax number, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Granted,
    Eligible,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Granted => "Granted Accounts",
            Category::Eligible => "Eligible to Pay",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Granted => f.write_str("granted"),
            Category::Eligible => f.write_str("eligible"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "granted" => Ok(Category::Granted),
            "eligible" => Ok(Category::Eligible),
            other => Err(format!("unknown category '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeneficiaryRecord {
    pub id: BeneficiaryId,
    pub name: String,
    pub surname: String,
    pub identity_number: String,
    pub university: String,
    pub accumulated_total: u64,
    pub year_of_completion: i32,
    #[serde(default)]
    pub tax_number: Option<String>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub email: String,
    pub address: Address,
}

impl BeneficiaryRecord {
    pub fn category(&self) -> Category {
        match self.tax_number {
            Some(_) => Category::Eligible,
            None => Category::Granted,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }

    /// Text the list search runs against.
    pub fn search_haystack(&self) -> String {
        format!("{} {} {}", self.name, self.surname, self.university)
    }
}

/// Formats an amount as `BWP 50,000`.
pub fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("BWP {grouped}")
}
