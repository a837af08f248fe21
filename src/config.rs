use serde::{Deserialize, Serialize};

use crate::domain::{AccountLimits, Cents, DEFAULT_BRANCH_CODE, StatementFormat};

/// Runtime settings for a banking session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankConfig {
    /// Branch code assigned to every new account
    pub branch_code: String,
    pub limits: AccountLimits,
    /// Symbol printed in front of amounts (e.g., "R$")
    pub currency_symbol: String,
    /// chrono strftime pattern for statement timestamps
    pub timestamp_format: String,
}

impl Default for BankConfig {
    fn default() -> Self {
        let format = StatementFormat::default();
        Self {
            branch_code: DEFAULT_BRANCH_CODE.to_string(),
            limits: AccountLimits::default(),
            currency_symbol: format.currency_symbol,
            timestamp_format: format.timestamp_format,
        }
    }
}

impl BankConfig {
    pub fn with_transaction_limit(mut self, limit: usize) -> Self {
        self.limits.transaction_limit = limit;
        self
    }

    pub fn with_max_withdrawal(mut self, max_withdrawal_cents: Cents) -> Self {
        self.limits.max_withdrawal_cents = max_withdrawal_cents;
        self
    }

    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    pub fn statement_format(&self) -> StatementFormat {
        StatementFormat {
            currency_symbol: self.currency_symbol.clone(),
            timestamp_format: self.timestamp_format.clone(),
        }
    }
}
