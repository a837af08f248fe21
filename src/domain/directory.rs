use chrono::NaiveDate;
use thiserror::Error;

use super::{Account, AccountLimits, AccountNumber, DEFAULT_BRANCH_CODE, User};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("a user with national id {0} is already registered")]
    DuplicateIdentity(String),

    #[error("account {0} not found")]
    AccountNotFound(AccountNumber),
}

/// Registry of users and accounts for one session.
///
/// Account numbers are handed out sequentially starting at 1. At most one
/// account is selected at a time; once an account has been selected the
/// directory never returns to having none selected.
#[derive(Debug, Clone)]
pub struct Directory {
    branch_code: String,
    limits: AccountLimits,
    users: Vec<User>,
    accounts: Vec<Account>,
    next_account_number: AccountNumber,
    current: Option<AccountNumber>,
}

impl Default for Directory {
    fn default() -> Self {
        Self::new(DEFAULT_BRANCH_CODE, AccountLimits::default())
    }
}

impl Directory {
    pub fn new(branch_code: impl Into<String>, limits: AccountLimits) -> Self {
        Self {
            branch_code: branch_code.into(),
            limits,
            users: Vec::new(),
            accounts: Vec::new(),
            next_account_number: 1,
            current: None,
        }
    }

    // ========================
    // Users
    // ========================

    /// Register a new user, rejecting a national id that is already taken.
    pub fn register_user(
        &mut self,
        name: impl Into<String>,
        birth_date: NaiveDate,
        national_id: impl Into<String>,
        address: impl Into<String>,
    ) -> Result<&User, DirectoryError> {
        let national_id = national_id.into();
        if self.find_user(&national_id).is_some() {
            return Err(DirectoryError::DuplicateIdentity(national_id));
        }

        self.users.push(User::new(name, birth_date, national_id, address));
        Ok(&self.users[self.users.len() - 1])
    }

    pub fn find_user(&self, national_id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.national_id == national_id)
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    // ========================
    // Accounts
    // ========================

    /// Open an account owned by `user` under the next sequential number.
    pub fn open_account(&mut self, user: &User) -> &Account {
        let number = self.next_account_number;
        self.accounts.push(Account::new(
            self.branch_code.clone(),
            number,
            user.national_id.clone(),
            self.limits,
        ));
        self.next_account_number += 1;
        &self.accounts[self.accounts.len() - 1]
    }

    pub fn account(&self, number: AccountNumber) -> Option<&Account> {
        self.accounts.iter().find(|a| a.number() == number)
    }

    fn account_mut(&mut self, number: AccountNumber) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.number() == number)
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn accounts_of<'a>(&'a self, national_id: &'a str) -> impl Iterator<Item = &'a Account> {
        self.accounts.iter().filter(move |a| a.owner() == national_id)
    }

    pub fn next_account_number(&self) -> AccountNumber {
        self.next_account_number
    }

    // ========================
    // Session selection
    // ========================

    /// Make `number` the current account. An unknown number leaves the
    /// current selection untouched.
    pub fn select_account(&mut self, number: AccountNumber) -> Result<&Account, DirectoryError> {
        if self.account(number).is_none() {
            return Err(DirectoryError::AccountNotFound(number));
        }
        self.current = Some(number);
        self.account(number).ok_or(DirectoryError::AccountNotFound(number))
    }

    pub fn current_account_number(&self) -> Option<AccountNumber> {
        self.current
    }

    pub fn current_account(&self) -> Option<&Account> {
        self.current.and_then(|number| self.account(number))
    }

    pub fn current_account_mut(&mut self) -> Option<&mut Account> {
        let number = self.current?;
        self.account_mut(number)
    }
}
