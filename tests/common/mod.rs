// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use banca::application::BankService;
use chrono::{DateTime, NaiveDate, Utc};

/// Helper to parse a dd/mm/yyyy date string
pub fn date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%d/%m/%Y").unwrap()
}

/// Helper to parse a date string into DateTime<Utc> at midnight
pub fn timestamp(date_str: &str) -> DateTime<Utc> {
    date(date_str).and_hms_opt(0, 0, 0).unwrap().and_utc()
}

/// Test fixture: Standard users
pub struct StandardUsers;

impl StandardUsers {
    /// Register Ana (111) and Bruno (222)
    pub fn create_basic(service: &mut BankService) -> Result<()> {
        service.register_user(
            "Ana Souza",
            date("05/03/1990"),
            "111",
            "Rua das Flores, 10 - Centro - Recife/PE",
        )?;
        service.register_user(
            "Bruno Lima",
            date("20/07/1985"),
            "222",
            "Av. Brasil, 500 - Boa Vista - Recife/PE",
        )?;
        Ok(())
    }
}

/// Service with Ana registered and account 1 opened and selected
pub fn service_with_account() -> Result<BankService> {
    let mut service = BankService::default();
    StandardUsers::create_basic(&mut service)?;
    service.open_account("111")?;
    service.select_account(1)?;
    Ok(service)
}
