use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Cents, Movement, Statement};

pub type AccountNumber = u32;

/// Branch every account is opened under.
pub const DEFAULT_BRANCH_CODE: &str = "0001";

/// Maximum number of deposits plus withdrawals an account accepts.
pub const DEFAULT_TRANSACTION_LIMIT: usize = 10;

/// Largest single withdrawal, in cents (R$ 500.00).
pub const DEFAULT_MAX_WITHDRAWAL: Cents = 50_000;

/// Limits applied to every movement on an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountLimits {
    /// Counted over the account's whole lifetime, not per calendar day.
    pub transaction_limit: usize,
    pub max_withdrawal_cents: Cents,
}

impl Default for AccountLimits {
    fn default() -> Self {
        Self {
            transaction_limit: DEFAULT_TRANSACTION_LIMIT,
            max_withdrawal_cents: DEFAULT_MAX_WITHDRAWAL,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    #[error("transaction limit of {limit} reached")]
    TransactionLimitExceeded { limit: usize },

    #[error("insufficient funds: balance {balance}, required {required}")]
    InsufficientFunds { balance: Cents, required: Cents },

    #[error("withdrawal of {requested} exceeds the maximum of {max}")]
    WithdrawalCapExceeded { requested: Cents, max: Cents },

    #[error("amount {amount} would overflow the balance")]
    Overflow { amount: Cents },
}

/// A bank account and its ledger: balance plus the ordered history of
/// deposits and withdrawals.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    branch_code: String,
    number: AccountNumber,
    /// National id of the owning user
    owner: String,
    balance_cents: Cents,
    deposits: Vec<Movement>,
    withdrawals: Vec<Movement>,
    limits: AccountLimits,
    opened_at: DateTime<Utc>,
}

impl Account {
    pub fn new(
        branch_code: impl Into<String>,
        number: AccountNumber,
        owner: impl Into<String>,
        limits: AccountLimits,
    ) -> Self {
        Self {
            branch_code: branch_code.into(),
            number,
            owner: owner.into(),
            balance_cents: 0,
            deposits: Vec::new(),
            withdrawals: Vec::new(),
            limits,
            opened_at: Utc::now(),
        }
    }

    pub fn branch_code(&self) -> &str {
        &self.branch_code
    }

    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn balance(&self) -> Cents {
        self.balance_cents
    }

    pub fn deposits(&self) -> &[Movement] {
        &self.deposits
    }

    pub fn withdrawals(&self) -> &[Movement] {
        &self.withdrawals
    }

    pub fn limits(&self) -> AccountLimits {
        self.limits
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    pub fn transaction_count(&self) -> usize {
        self.deposits.len() + self.withdrawals.len()
    }

    pub fn remaining_transactions(&self) -> usize {
        self.limits
            .transaction_limit
            .saturating_sub(self.transaction_count())
    }

    fn check_transaction_limit(&self) -> Result<(), TransactionError> {
        if self.transaction_count() >= self.limits.transaction_limit {
            return Err(TransactionError::TransactionLimitExceeded {
                limit: self.limits.transaction_limit,
            });
        }
        Ok(())
    }

    /// Credit `amount_cents` to the balance and record a deposit.
    /// The amount is taken as given; only the transaction limit is enforced.
    pub fn deposit(
        &mut self,
        amount_cents: Cents,
        at: DateTime<Utc>,
    ) -> Result<&Movement, TransactionError> {
        self.check_transaction_limit()?;
        let balance = self
            .balance_cents
            .checked_add(amount_cents)
            .ok_or(TransactionError::Overflow {
                amount: amount_cents,
            })?;

        self.balance_cents = balance;
        self.deposits.push(Movement::deposit(amount_cents, at));
        Ok(&self.deposits[self.deposits.len() - 1])
    }

    /// Debit `amount_cents` from the balance and record a withdrawal.
    /// Fails without touching state when the balance is too low, the
    /// transaction limit is reached or the amount exceeds the withdrawal cap.
    pub fn withdraw(
        &mut self,
        amount_cents: Cents,
        at: DateTime<Utc>,
    ) -> Result<&Movement, TransactionError> {
        if self.balance_cents < amount_cents {
            return Err(TransactionError::InsufficientFunds {
                balance: self.balance_cents,
                required: amount_cents,
            });
        }
        self.check_transaction_limit()?;
        if amount_cents > self.limits.max_withdrawal_cents {
            return Err(TransactionError::WithdrawalCapExceeded {
                requested: amount_cents,
                max: self.limits.max_withdrawal_cents,
            });
        }
        let balance = self
            .balance_cents
            .checked_sub(amount_cents)
            .ok_or(TransactionError::Overflow {
                amount: amount_cents,
            })?;

        self.balance_cents = balance;
        self.withdrawals.push(Movement::withdrawal(amount_cents, at));
        Ok(&self.withdrawals[self.withdrawals.len() - 1])
    }

    pub fn statement(&self) -> Statement<'_> {
        Statement::new(&self.deposits, &self.withdrawals, self.balance_cents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MovementKind;

    fn account() -> Account {
        Account::new(DEFAULT_BRANCH_CODE, 1, "12345678900", AccountLimits::default())
    }

    #[test]
    fn test_new_account_is_empty() {
        let account = account();
        assert_eq!(account.branch_code(), "0001");
        assert_eq!(account.balance(), 0);
        assert_eq!(account.transaction_count(), 0);
        assert_eq!(account.remaining_transactions(), 10);
        assert_eq!(account.limits(), AccountLimits::default());
        assert!(account.opened_at() <= Utc::now());
    }

    #[test]
    fn test_deposit_increases_balance() {
        let mut account = account();
        let movement = account.deposit(10000, Utc::now()).unwrap();
        assert_eq!(movement.kind, MovementKind::Deposit);
        assert_eq!(movement.amount_cents, 10000);

        account.deposit(5000, Utc::now()).unwrap();
        assert_eq!(account.balance(), 15000);
        assert_eq!(account.deposits().len(), 2);
    }

    #[test]
    fn test_withdraw_decreases_balance() {
        let mut account = account();
        account.deposit(10000, Utc::now()).unwrap();
        account.withdraw(3000, Utc::now()).unwrap();

        assert_eq!(account.balance(), 7000);
        assert_eq!(account.withdrawals().len(), 1);
        assert_eq!(account.withdrawals()[0].kind, MovementKind::Withdrawal);
    }

    #[test]
    fn test_withdraw_insufficient_funds() {
        let mut account = account();
        let result = account.withdraw(1000, Utc::now());

        assert_eq!(
            result.unwrap_err(),
            TransactionError::InsufficientFunds {
                balance: 0,
                required: 1000
            }
        );
        assert_eq!(account.balance(), 0);
        assert!(account.withdrawals().is_empty());
    }

    #[test]
    fn test_withdraw_entire_balance() {
        let mut account = account();
        account.deposit(30000, Utc::now()).unwrap();

        assert_eq!(
            account.withdraw(30001, Utc::now()).unwrap_err(),
            TransactionError::InsufficientFunds {
                balance: 30000,
                required: 30001
            }
        );
        assert_eq!(account.balance(), 30000);

        assert!(account.withdraw(30000, Utc::now()).is_ok());
        assert_eq!(account.balance(), 0);
        assert_eq!(account.withdrawals().len(), 1);
    }

    #[test]
    fn test_withdraw_over_cap() {
        let mut account = account();
        account.deposit(100000, Utc::now()).unwrap();

        let result = account.withdraw(60000, Utc::now());
        assert!(matches!(
            result,
            Err(TransactionError::WithdrawalCapExceeded {
                requested: 60000,
                max: 50000
            })
        ));
        assert_eq!(account.balance(), 100000);

        // Exactly the cap is allowed
        assert!(account.withdraw(50000, Utc::now()).is_ok());
    }

    #[test]
    fn test_transaction_limit_is_shared() {
        let mut account = account();
        for _ in 0..5 {
            account.deposit(10000, Utc::now()).unwrap();
        }
        for _ in 0..5 {
            account.withdraw(100, Utc::now()).unwrap();
        }
        assert_eq!(account.remaining_transactions(), 0);

        let balance = account.balance();
        assert!(matches!(
            account.deposit(100, Utc::now()),
            Err(TransactionError::TransactionLimitExceeded { limit: 10 })
        ));
        assert!(matches!(
            account.withdraw(100, Utc::now()),
            Err(TransactionError::TransactionLimitExceeded { limit: 10 })
        ));
        assert_eq!(account.balance(), balance);
        assert_eq!(account.transaction_count(), 10);
    }

    #[test]
    fn test_custom_limits() {
        let limits = AccountLimits {
            transaction_limit: 1,
            max_withdrawal_cents: 100,
        };
        let mut account = Account::new("0002", 7, "1", limits);
        account.deposit(500, Utc::now()).unwrap();
        assert!(account.deposit(500, Utc::now()).is_err());
        assert_eq!(account.balance(), 500);
    }

    #[test]
    fn test_unvalidated_amounts_are_accepted() {
        let mut account = account();
        assert!(account.deposit(0, Utc::now()).is_ok());
        assert!(account.withdraw(-500, Utc::now()).is_ok());
        assert_eq!(account.balance(), 500);
    }

    #[test]
    fn test_deposit_overflow_is_rejected() {
        let mut account = account();
        account.deposit(i64::MAX, Utc::now()).unwrap();

        let result = account.deposit(1, Utc::now());
        assert_eq!(result.unwrap_err(), TransactionError::Overflow { amount: 1 });
        assert_eq!(account.balance(), i64::MAX);
        assert_eq!(account.deposits().len(), 1);
    }
}
