//! Category master record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Classifier assigned when the caller does not pick one.
pub const DEFAULT_CATEGORY_KIND: &str = "Medicine";

/// Product category. `parent_category` holds the parent's code, or is empty
/// for top-level categories; it is not checked against existing rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub parent_category: String,
    pub created_date: NaiveDate,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            code: code.into(),
            name: name.into(),
            kind: DEFAULT_CATEGORY_KIND.to_string(),
            parent_category: String::new(),
            created_date: now.date_naive(),
            is_active: true,
            updated_at: now,
        }
    }
}
