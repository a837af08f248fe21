use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Cents;

pub type MovementId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    Deposit,
    Withdrawal,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Deposit => "deposit",
            MovementKind::Withdrawal => "withdrawal",
        }
    }

    /// Label used when rendering a statement line.
    pub fn label(&self) -> &'static str {
        match self {
            MovementKind::Deposit => "Deposit",
            MovementKind::Withdrawal => "Withdrawal",
        }
    }
}

impl std::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single deposit or withdrawal applied to an account.
/// Movements are immutable once appended to an account's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub id: MovementId,
    pub kind: MovementKind,
    /// Amount in cents, as requested by the caller
    pub amount_cents: Cents,
    /// When the movement was applied
    pub timestamp: DateTime<Utc>,
}

impl Movement {
    pub fn new(kind: MovementKind, amount_cents: Cents, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            amount_cents,
            timestamp,
        }
    }

    pub fn deposit(amount_cents: Cents, timestamp: DateTime<Utc>) -> Self {
        Self::new(MovementKind::Deposit, amount_cents, timestamp)
    }

    pub fn withdrawal(amount_cents: Cents, timestamp: DateTime<Utc>) -> Self {
        Self::new(MovementKind::Withdrawal, amount_cents, timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_constructors() {
        let now = Utc::now();
        let deposit = Movement::deposit(5000, now);
        let withdrawal = Movement::withdrawal(3000, now);

        assert_eq!(deposit.kind, MovementKind::Deposit);
        assert_eq!(deposit.amount_cents, 5000);
        assert_eq!(withdrawal.kind, MovementKind::Withdrawal);
        assert_eq!(withdrawal.timestamp, now);
        assert_ne!(deposit.id, withdrawal.id);
    }

    #[test]
    fn test_movement_kind_serializes_lowercase() {
        let json = serde_json::to_string(&MovementKind::Withdrawal).unwrap();
        assert_eq!(json, "\"withdrawal\"");
    }
}
