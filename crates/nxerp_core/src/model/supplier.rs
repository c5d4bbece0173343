//! Supplier master record.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Classifier assigned when the caller does not pick one.
pub const DEFAULT_SUPPLIER_KIND: &str = "Distributor";

/// Supplier account with an opening payable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    /// Unique natural key, e.g. `SUP-00301`.
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub contact: String,
    pub onboard_date: NaiveDate,
    /// Amount owed to the supplier at onboarding; exact decimal.
    pub opening_payable: Decimal,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

impl Supplier {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            code: code.into(),
            name: name.into(),
            kind: DEFAULT_SUPPLIER_KIND.to_string(),
            contact: String::new(),
            onboard_date: now.date_naive(),
            opening_payable: Decimal::ZERO,
            is_active: true,
            updated_at: now,
        }
    }
}
