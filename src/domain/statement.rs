use std::fmt;

use chrono::Local;

use super::{Cents, Movement, format_money};

pub const NO_MOVEMENTS: &str = "No movements recorded.";

/// How amounts and timestamps are rendered on a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementFormat {
    pub currency_symbol: String,
    /// chrono strftime pattern, applied in local time
    pub timestamp_format: String,
}

impl Default for StatementFormat {
    fn default() -> Self {
        Self {
            currency_symbol: "R$".to_string(),
            timestamp_format: "%d/%m/%Y %H:%M".to_string(),
        }
    }
}

/// Account statement: every deposit in insertion order, then every
/// withdrawal in insertion order, then the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement<'a> {
    NoMovements,
    Movements {
        deposits: &'a [Movement],
        withdrawals: &'a [Movement],
        balance_cents: Cents,
    },
}

impl<'a> Statement<'a> {
    pub fn new(deposits: &'a [Movement], withdrawals: &'a [Movement], balance_cents: Cents) -> Self {
        if deposits.is_empty() && withdrawals.is_empty() {
            Statement::NoMovements
        } else {
            Statement::Movements {
                deposits,
                withdrawals,
                balance_cents,
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Statement::NoMovements)
    }

    /// Movements in statement order.
    pub fn movements(&self) -> impl Iterator<Item = &'a Movement> + use<'a> {
        let (deposits, withdrawals): (&'a [Movement], &'a [Movement]) = match *self {
            Statement::NoMovements => (&[], &[]),
            Statement::Movements {
                deposits,
                withdrawals,
                ..
            } => (deposits, withdrawals),
        };
        deposits.iter().chain(withdrawals.iter())
    }

    pub fn balance(&self) -> Option<Cents> {
        match self {
            Statement::NoMovements => None,
            Statement::Movements { balance_cents, .. } => Some(*balance_cents),
        }
    }

    /// Render the statement as display lines.
    pub fn lines(&self, format: &StatementFormat) -> Vec<String> {
        let Some(balance) = self.balance() else {
            return vec![NO_MOVEMENTS.to_string()];
        };

        let mut lines = vec!["Statement:".to_string()];
        lines.extend(self.movements().map(|movement| {
            format!(
                "{}: {} at {}",
                movement.kind.label(),
                format_money(&format.currency_symbol, movement.amount_cents),
                movement
                    .timestamp
                    .with_timezone(&Local)
                    .format(&format.timestamp_format)
            )
        }));
        lines.push(format!(
            "Current balance: {}",
            format_money(&format.currency_symbol, balance)
        ));
        lines
    }
}

impl fmt::Display for Statement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines(&StatementFormat::default()) {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
