//! Customer master record.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Classifier assigned when the caller does not pick one.
pub const DEFAULT_CUSTOMER_KIND: &str = "Retail";

/// Customer account with an opening balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique natural key, e.g. `CUS-00001`.
    pub code: String,
    pub name: String,
    /// Free-text classifier (`Retail`, `Corporate`, ...). Serialized as `type`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Phone number or other contact line.
    pub contact: String,
    pub opening_date: NaiveDate,
    /// Signed opening balance; exact decimal.
    pub opening_balance: Decimal,
    pub is_active: bool,
    /// Last write time in UTC. Overwritten by storage on every upsert.
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Creates an active customer with default classifier, empty contact,
    /// zero balance and today's UTC date.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            code: code.into(),
            name: name.into(),
            kind: DEFAULT_CUSTOMER_KIND.to_string(),
            contact: String::new(),
            opening_date: now.date_naive(),
            opening_balance: Decimal::ZERO,
            is_active: true,
            updated_at: now,
        }
    }
}
