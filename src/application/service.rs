use chrono::{DateTime, NaiveDate, Utc};

use crate::config::BankConfig;
use crate::domain::{
    Account, AccountNumber, Cents, Directory, Movement, Statement, StatementFormat, User,
    format_cents,
};

use super::AppError;

/// Application service providing the banking operations for one session.
/// This is the primary interface for any client (menu, tests, exporters).
pub struct BankService {
    directory: Directory,
    config: BankConfig,
}

impl Default for BankService {
    fn default() -> Self {
        Self::new(BankConfig::default())
    }
}

impl BankService {
    /// Create a service with an empty directory.
    pub fn new(config: BankConfig) -> Self {
        let directory = Directory::new(config.branch_code.clone(), config.limits);
        Self { directory, config }
    }

    pub fn config(&self) -> &BankConfig {
        &self.config
    }

    pub fn statement_format(&self) -> StatementFormat {
        self.config.statement_format()
    }

    // ========================
    // User operations
    // ========================

    /// Register a new user. Fails if the national id is already registered.
    pub fn register_user(
        &mut self,
        name: impl Into<String>,
        birth_date: NaiveDate,
        national_id: impl Into<String>,
        address: impl Into<String>,
    ) -> Result<&User, AppError> {
        let national_id = national_id.into();
        match self
            .directory
            .register_user(name, birth_date, national_id.clone(), address)
        {
            Ok(user) => {
                log::info!("Registered user {}", user.national_id);
                Ok(user)
            }
            Err(e) => {
                log::warn!("Rejected registration for {}: {}", national_id, e);
                Err(e.into())
            }
        }
    }

    /// Get a user by national id.
    pub fn find_user(&self, national_id: &str) -> Result<&User, AppError> {
        log::debug!("Looking up user {}", national_id);
        self.directory
            .find_user(national_id)
            .ok_or_else(|| AppError::UserNotFound(national_id.to_string()))
    }

    pub fn list_users(&self) -> &[User] {
        self.directory.users()
    }

    // ========================
    // Account operations
    // ========================

    /// Open a new account for the user with the given national id.
    pub fn open_account(&mut self, national_id: &str) -> Result<&Account, AppError> {
        if self.directory.users().is_empty() {
            return Err(AppError::NoUsersRegistered);
        }
        let owner = self.find_user(national_id)?.clone();
        let account = self.directory.open_account(&owner);
        log::info!(
            "Opened account {}/{} for {}",
            account.branch_code(),
            account.number(),
            owner.national_id
        );
        Ok(account)
    }

    /// Make the given account the current one.
    pub fn select_account(&mut self, number: AccountNumber) -> Result<&Account, AppError> {
        match self.directory.select_account(number) {
            Ok(account) => {
                log::info!("Selected account {}", number);
                Ok(account)
            }
            Err(e) => {
                log::warn!("Selection failed: {}", e);
                Err(e.into())
            }
        }
    }

    pub fn current_account(&self) -> Result<&Account, AppError> {
        self.directory
            .current_account()
            .ok_or(AppError::NoAccountSelected)
    }

    pub fn list_accounts(&self) -> &[Account] {
        self.directory.accounts()
    }

    // ========================
    // Movement operations
    // ========================

    /// Deposit into the current account.
    pub fn deposit(&mut self, amount_cents: Cents) -> Result<&Movement, AppError> {
        self.deposit_at(amount_cents, Utc::now())
    }

    /// Deposit into the current account with an explicit timestamp.
    pub fn deposit_at(
        &mut self,
        amount_cents: Cents,
        at: DateTime<Utc>,
    ) -> Result<&Movement, AppError> {
        let account = self
            .directory
            .current_account_mut()
            .ok_or(AppError::NoAccountSelected)?;
        let number = account.number();

        match account.deposit(amount_cents, at) {
            Ok(movement) => {
                log::info!(
                    "Deposited {} into account {}",
                    format_cents(amount_cents),
                    number
                );
                Ok(movement)
            }
            Err(e) => {
                log::warn!("Deposit into account {} rejected: {}", number, e);
                Err(e.into())
            }
        }
    }

    /// Withdraw from the current account.
    pub fn withdraw(&mut self, amount_cents: Cents) -> Result<&Movement, AppError> {
        self.withdraw_at(amount_cents, Utc::now())
    }

    /// Withdraw from the current account with an explicit timestamp.
    pub fn withdraw_at(
        &mut self,
        amount_cents: Cents,
        at: DateTime<Utc>,
    ) -> Result<&Movement, AppError> {
        let account = self
            .directory
            .current_account_mut()
            .ok_or(AppError::NoAccountSelected)?;
        let number = account.number();

        match account.withdraw(amount_cents, at) {
            Ok(movement) => {
                log::info!(
                    "Withdrew {} from account {}",
                    format_cents(amount_cents),
                    number
                );
                Ok(movement)
            }
            Err(e) => {
                log::warn!("Withdrawal from account {} rejected: {}", number, e);
                Err(e.into())
            }
        }
    }

    /// Statement of the current account.
    pub fn statement(&self) -> Result<Statement<'_>, AppError> {
        Ok(self.current_account()?.statement())
    }

    /// Statement of the current account rendered with the configured format.
    pub fn statement_lines(&self) -> Result<Vec<String>, AppError> {
        Ok(self.statement()?.lines(&self.statement_format()))
    }
}
