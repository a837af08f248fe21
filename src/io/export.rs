use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::application::BankService;
use crate::domain::{Account, User, format_cents};

/// Session snapshot for full JSON export
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub users: &'a [User],
    pub accounts: &'a [Account],
}

/// Exporter for writing session data to CSV or JSON
pub struct Exporter<'a> {
    service: &'a BankService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a BankService) -> Self {
        Self { service }
    }

    /// Export the current account's movements to CSV, in statement order
    pub fn export_movements_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let statement = self.service.statement()?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["id", "kind", "amount", "timestamp"])?;

        let mut count = 0;
        for movement in statement.movements() {
            csv_writer.write_record(&[
                movement.id.to_string(),
                movement.kind.as_str().to_string(),
                format_cents(movement.amount_cents),
                movement.timestamp.to_rfc3339(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export every account with its balance to CSV
    pub fn export_accounts_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let accounts = self.service.list_accounts();
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "branch",
            "number",
            "owner",
            "balance",
            "transactions",
            "opened_at",
        ])?;

        for account in accounts {
            csv_writer.write_record(&[
                account.branch_code().to_string(),
                account.number().to_string(),
                account.owner().to_string(),
                format_cents(account.balance()),
                account.transaction_count().to_string(),
                account.opened_at().to_rfc3339(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(accounts.len())
    }

    /// Export all users and accounts as a pretty-printed JSON snapshot
    pub fn export_full_json<W: Write>(&self, mut writer: W) -> Result<Snapshot<'a>> {
        let snapshot = Snapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            users: self.service.list_users(),
            accounts: self.service.list_accounts(),
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        Ok(snapshot)
    }
}
