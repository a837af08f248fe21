use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Birth dates are entered and shown as day/month/year.
pub const BIRTH_DATE_FORMAT: &str = "%d/%m/%Y";

/// A registered bank customer. Users are immutable once registered and are
/// identified by their national id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub birth_date: NaiveDate,
    /// Unique across all users (CPF)
    pub national_id: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        name: impl Into<String>,
        birth_date: NaiveDate,
        national_id: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            birth_date,
            national_id: national_id.into(),
            address: address.into(),
            created_at: Utc::now(),
        }
    }
}

/// Parse a `dd/mm/yyyy` birth date.
pub fn parse_birth_date(input: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(input.trim(), BIRTH_DATE_FORMAT)
}
