use anyhow::{Context, Result};
use clap::Parser;

use crate::application::BankService;
use crate::config::BankConfig;
use crate::domain::{DEFAULT_TRANSACTION_LIMIT, parse_cents};

mod menu;

pub use menu::*;

/// Banca - in-memory banking ledger simulator
#[derive(Parser, Debug)]
#[command(name = "banca")]
#[command(about = "Simulate bank accounts with deposits, withdrawals and statements")]
#[command(version)]
pub struct Cli {
    /// Maximum number of deposits plus withdrawals per account
    #[arg(long, default_value_t = DEFAULT_TRANSACTION_LIMIT)]
    pub transaction_limit: usize,

    /// Largest single withdrawal (e.g., "500.00" or "500")
    #[arg(long, default_value = "500.00")]
    pub max_withdrawal: String,

    /// Currency symbol shown in front of amounts
    #[arg(short, long, default_value = "R$")]
    pub currency: String,

    /// Enable verbose (debug) logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Build the session configuration from the parsed flags.
    pub fn config(&self) -> Result<BankConfig> {
        let max_withdrawal = parse_cents(&self.max_withdrawal)
            .context("Invalid --max-withdrawal. Use '500.00' or '500'")?;

        Ok(BankConfig::default()
            .with_transaction_limit(self.transaction_limit)
            .with_max_withdrawal(max_withdrawal)
            .with_currency_symbol(self.currency.clone()))
    }

    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        }
    }

    /// Run the interactive menu on stdin/stdout until the user quits.
    pub fn run(self) -> Result<()> {
        let config = self.config()?;
        log::debug!("Starting session with {:?}", config);

        let stdin = std::io::stdin();
        let mut menu = Menu::new(BankService::new(config), stdin.lock(), std::io::stdout());
        menu.run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_flags() {
        let cli = Cli::try_parse_from(["banca"]).unwrap();
        let config = cli.config().unwrap();
        assert_eq!(config, BankConfig::default());
        assert_eq!(cli.log_level(), log::LevelFilter::Warn);
    }

    #[test]
    fn test_custom_flags() {
        let cli = Cli::try_parse_from([
            "banca",
            "--transaction-limit",
            "3",
            "--max-withdrawal",
            "250.50",
            "--currency",
            "€",
            "-v",
        ])
        .unwrap();
        let config = cli.config().unwrap();
        assert_eq!(config.limits.transaction_limit, 3);
        assert_eq!(config.limits.max_withdrawal_cents, 25050);
        assert_eq!(config.currency_symbol, "€");
        assert_eq!(cli.log_level(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_invalid_max_withdrawal() {
        let cli = Cli::try_parse_from(["banca", "--max-withdrawal", "lots"]).unwrap();
        assert!(cli.config().is_err());
    }
}
