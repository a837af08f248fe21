use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, Write};

use crate::application::{AppError, BankService};
use crate::domain::{
    AccountNumber, Cents, DirectoryError, TransactionError, format_money, parse_birth_date,
    parse_cents,
};
use crate::io::Exporter;

const MENU: &str = "\nMenu:
1. Deposit
2. Withdraw
3. Statement
4. New user
5. New account
6. Select account
7. List accounts
8. Export
9. Quit";

pub const WITHDRAWAL_DENIED: &str = "Withdrawal denied! Check that the balance is sufficient, \
that the transaction limit has not been reached and that the amount does not exceed \
the maximum per withdrawal.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Deposit,
    Withdraw,
    Statement,
    NewUser,
    NewAccount,
    SelectAccount,
    ListAccounts,
    Export,
    Quit,
}

impl MenuOption {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "1" => Some(MenuOption::Deposit),
            "2" => Some(MenuOption::Withdraw),
            "3" => Some(MenuOption::Statement),
            "4" => Some(MenuOption::NewUser),
            "5" => Some(MenuOption::NewAccount),
            "6" => Some(MenuOption::SelectAccount),
            "7" => Some(MenuOption::ListAccounts),
            "8" => Some(MenuOption::Export),
            "9" | "q" | "quit" => Some(MenuOption::Quit),
            _ => None,
        }
    }
}

/// Interactive text menu driving a [`BankService`].
///
/// Input and output are generic so a session can be scripted in tests.
/// Reaching the end of input ends the session like choosing Quit.
pub struct Menu<R, W> {
    service: BankService,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(service: BankService, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    pub fn into_parts(self) -> (BankService, W) {
        (self.service, self.output)
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(choice) = self.prompt("Choose an option: ")? else {
                break;
            };

            match MenuOption::parse(&choice) {
                Some(MenuOption::Quit) => break,
                Some(option) => self.dispatch(option)?,
                None => writeln!(self.output, "Invalid option!")?,
            }
        }
        log::debug!("Session finished");
        Ok(())
    }

    fn dispatch(&mut self, option: MenuOption) -> Result<()> {
        match option {
            MenuOption::Deposit => self.deposit(),
            MenuOption::Withdraw => self.withdraw(),
            MenuOption::Statement => self.statement(),
            MenuOption::NewUser => self.new_user(),
            MenuOption::NewAccount => self.new_account(),
            MenuOption::SelectAccount => self.select_account(),
            MenuOption::ListAccounts => self.list_accounts(),
            MenuOption::Export => self.export(),
            MenuOption::Quit => Ok(()),
        }
    }

    // ========================
    // Input helpers
    // ========================

    /// Print `message` and read one line. Returns `None` at end of input.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Prompt until a valid amount is entered.
    fn prompt_amount(&mut self, message: &str) -> Result<Option<Cents>> {
        while let Some(line) = self.prompt(message)? {
            match parse_cents(&line) {
                Ok(cents) => return Ok(Some(cents)),
                Err(_) => writeln!(self.output, "Please enter a valid numeric amount.")?,
            }
        }
        Ok(None)
    }

    fn require_account(&mut self) -> Result<bool> {
        if self.service.current_account().is_ok() {
            return Ok(true);
        }
        writeln!(
            self.output,
            "Error: no account selected. Select an account first."
        )?;
        Ok(false)
    }

    // ========================
    // Menu actions
    // ========================

    fn deposit(&mut self) -> Result<()> {
        if !self.require_account()? {
            return Ok(());
        }
        let Some(amount) = self.prompt_amount("Amount to deposit: ")? else {
            return Ok(());
        };

        match self.service.deposit(amount) {
            Ok(_) => writeln!(self.output, "Deposit completed.")?,
            Err(AppError::Transaction(TransactionError::TransactionLimitExceeded { .. })) => {
                writeln!(self.output, "Transaction limit reached!")?
            }
            Err(e) => writeln!(self.output, "Error: {}", e)?,
        }
        Ok(())
    }

    fn withdraw(&mut self) -> Result<()> {
        if !self.require_account()? {
            return Ok(());
        }
        let message = match self.service.current_account() {
            Ok(account) => format!(
                "Amount to withdraw (max {}): ",
                format_money(
                    &self.service.config().currency_symbol,
                    account.limits().max_withdrawal_cents
                )
            ),
            Err(_) => "Amount to withdraw: ".to_string(),
        };
        let Some(amount) = self.prompt_amount(&message)? else {
            return Ok(());
        };

        match self.service.withdraw(amount) {
            Ok(_) => writeln!(self.output, "Withdrawal completed.")?,
            Err(e) if e.is_rejected_transaction() => writeln!(self.output, "{}", WITHDRAWAL_DENIED)?,
            Err(e) => writeln!(self.output, "Error: {}", e)?,
        }
        Ok(())
    }

    fn statement(&mut self) -> Result<()> {
        if !self.require_account()? {
            return Ok(());
        }
        for line in self.service.statement_lines()? {
            writeln!(self.output, "{}", line)?;
        }
        Ok(())
    }

    fn new_user(&mut self) -> Result<()> {
        let Some(name) = self.prompt("Name: ")? else {
            return Ok(());
        };

        let birth_date = loop {
            let Some(line) = self.prompt("Birth date (dd/mm/yyyy): ")? else {
                return Ok(());
            };
            match parse_birth_date(&line) {
                Ok(date) => break date,
                Err(_) => writeln!(self.output, "Please enter a date as dd/mm/yyyy.")?,
            }
        };

        let Some(national_id) = self.prompt("National id (digits only): ")? else {
            return Ok(());
        };
        let Some(address) =
            self.prompt("Address (street, number - district - city/state): ")?
        else {
            return Ok(());
        };

        match self.service.register_user(
            name.trim(),
            birth_date,
            national_id.trim(),
            address.trim(),
        ) {
            Ok(_) => writeln!(self.output, "User created.")?,
            Err(AppError::Directory(DirectoryError::DuplicateIdentity(_))) => {
                writeln!(self.output, "Error: national id already registered.")?
            }
            Err(e) => writeln!(self.output, "Error: {}", e)?,
        }
        Ok(())
    }

    fn new_account(&mut self) -> Result<()> {
        if self.service.list_users().is_empty() {
            writeln!(
                self.output,
                "Error: no users registered. Create a user first."
            )?;
            return Ok(());
        }
        let Some(national_id) = self.prompt("National id of the account owner: ")? else {
            return Ok(());
        };

        match self.service.open_account(national_id.trim()) {
            Ok(account) => {
                let number = account.number();
                writeln!(self.output, "Account created! Account number: {}", number)?
            }
            Err(AppError::UserNotFound(_)) => writeln!(self.output, "Error: user not found.")?,
            Err(e) => writeln!(self.output, "Error: {}", e)?,
        }
        Ok(())
    }

    fn select_account(&mut self) -> Result<()> {
        let Some(line) = self.prompt("Account number: ")? else {
            return Ok(());
        };
        let Ok(number) = line.trim().parse::<i64>() else {
            writeln!(self.output, "Error: invalid account number.")?;
            return Ok(());
        };

        // Negative or oversized numbers can never match an account
        let selected = match AccountNumber::try_from(number) {
            Ok(number) => self.service.select_account(number).is_ok(),
            Err(_) => {
                log::warn!("Selection failed: account {} not found", number);
                false
            }
        };
        if selected {
            writeln!(self.output, "Account {} selected.", number)?;
        } else {
            writeln!(self.output, "Error: account not found.")?;
        }
        Ok(())
    }

    fn list_accounts(&mut self) -> Result<()> {
        let accounts = self.service.list_accounts();
        if accounts.is_empty() {
            writeln!(self.output, "No accounts found.")?;
            return Ok(());
        }

        let current = self.service.current_account().ok().map(|a| a.number());
        let symbol = &self.service.config().currency_symbol;
        writeln!(
            self.output,
            "  {:<8} {:<8} {:<16} {:>16}",
            "BRANCH", "NUMBER", "OWNER", "BALANCE"
        )?;
        writeln!(self.output, "  {}", "-".repeat(51))?;
        for account in accounts {
            let marker = if Some(account.number()) == current { "*" } else { " " };
            writeln!(
                self.output,
                "{} {:<8} {:<8} {:<16} {:>16}",
                marker,
                account.branch_code(),
                account.number(),
                account.owner(),
                format_money(symbol, account.balance())
            )?;
        }
        Ok(())
    }

    fn export(&mut self) -> Result<()> {
        let Some(export_type) = self.prompt("What to export (movements, accounts, full): ")?
        else {
            return Ok(());
        };
        let export_type = export_type.trim().to_lowercase();
        if !matches!(export_type.as_str(), "movements" | "accounts" | "full") {
            writeln!(
                self.output,
                "Error: invalid export type '{}'. Valid types: movements, accounts, full",
                export_type
            )?;
            return Ok(());
        }
        if export_type == "movements" && !self.require_account()? {
            return Ok(());
        }
        let Some(path) = self.prompt("Output file: ")? else {
            return Ok(());
        };
        let path = path.trim();

        match export_to_file(&self.service, &export_type, path) {
            Ok(summary) => {
                log::info!("Exported {} to {}", summary, path);
                writeln!(self.output, "Exported {} to {}", summary, path)?
            }
            Err(e) => {
                log::warn!("Export to {} failed: {:#}", path, e);
                writeln!(self.output, "Error: {:#}", e)?
            }
        }
        Ok(())
    }
}

fn export_to_file(service: &BankService, export_type: &str, path: &str) -> Result<String> {
    let file =
        File::create(path).with_context(|| format!("Failed to create output file: {}", path))?;
    let exporter = Exporter::new(service);

    let summary = match export_type {
        "movements" => format!("{} movements", exporter.export_movements_csv(file)?),
        "accounts" => format!("{} accounts", exporter.export_accounts_csv(file)?),
        _ => {
            let snapshot = exporter.export_full_json(file)?;
            format!(
                "{} users and {} accounts",
                snapshot.users.len(),
                snapshot.accounts.len()
            )
        }
    };
    Ok(summary)
}
