use std::io::Cursor;

use anyhow::Result;
use banca::BankConfig;
use banca::application::BankService;
use banca::cli::{Menu, WITHDRAWAL_DENIED};

const SETUP: &str = "4\nAna Souza\n05/03/1990\n111\nRua das Flores, 10 - Centro - Recife/PE\n\
5\n111\n6\n1\n";

fn run_session(service: BankService, script: &str) -> Result<(BankService, String)> {
    let mut menu = Menu::new(service, Cursor::new(script.to_string()), Vec::new());
    menu.run()?;
    let (service, output) = menu.into_parts();
    Ok((service, String::from_utf8(output)?))
}

#[test]
fn test_full_session() -> Result<()> {
    let script = format!("{SETUP}1\n100\n1\n50,00\n2\n30\n3\n9\n");
    let (service, output) = run_session(BankService::default(), &script)?;

    assert!(output.contains("User created."));
    assert!(output.contains("Account created! Account number: 1"));
    assert!(output.contains("Account 1 selected."));
    assert_eq!(output.matches("Deposit completed.").count(), 2);
    assert!(output.contains("Withdrawal completed."));
    assert!(output.contains("Statement:"));
    assert!(output.contains("Deposit: R$ 100.00 at "));
    assert!(output.contains("Deposit: R$ 50.00 at "));
    assert!(output.contains("Withdrawal: R$ 30.00 at "));
    assert!(output.contains("Current balance: R$ 120.00"));

    let deposit_pos = output.find("Deposit: R$ 50.00").unwrap();
    let withdrawal_pos = output.find("Withdrawal: R$ 30.00").unwrap();
    assert!(deposit_pos < withdrawal_pos);

    assert_eq!(service.current_account()?.balance(), 12000);
    Ok(())
}

#[test]
fn test_empty_statement() -> Result<()> {
    let script = format!("{SETUP}3\n");
    let (_, output) = run_session(BankService::default(), &script)?;

    assert!(output.contains("No movements recorded."));
    assert!(!output.contains("Current balance"));
    Ok(())
}

#[test]
fn test_withdrawal_failures_share_one_message() -> Result<()> {
    // Insufficient funds, then over the cap
    let script = format!("{SETUP}2\n10\n1\n1000\n2\n600\n");
    let (service, output) = run_session(BankService::default(), &script)?;

    assert_eq!(output.matches(WITHDRAWAL_DENIED).count(), 2);
    assert_eq!(service.current_account()?.balance(), 100000);
    Ok(())
}

#[test]
fn test_deposit_limit_message() -> Result<()> {
    let config = BankConfig::default().with_transaction_limit(1);
    let script = format!("{SETUP}1\n10\n1\n10\n2\n5\n");
    let (service, output) = run_session(BankService::new(config), &script)?;

    assert!(output.contains("Transaction limit reached!"));
    assert!(output.contains(WITHDRAWAL_DENIED));
    assert_eq!(service.current_account()?.balance(), 1000);
    Ok(())
}

#[test]
fn test_duplicate_user_and_unknown_owner() -> Result<()> {
    let script = format!("{SETUP}4\nOther\n01/01/2000\n111\nRua B\n5\n999\n");
    let (service, output) = run_session(BankService::default(), &script)?;

    assert!(output.contains("Error: national id already registered."));
    assert!(output.contains("Error: user not found."));
    assert_eq!(service.list_users().len(), 1);
    assert_eq!(service.list_accounts().len(), 1);
    Ok(())
}

#[test]
fn test_list_accounts_marks_current() -> Result<()> {
    let script = format!("{SETUP}5\n111\n7\n");
    let (_, output) = run_session(BankService::default(), &script)?;

    assert!(output.contains("Account created! Account number: 2"));
    let rows: Vec<&str> = output
        .lines()
        .filter(|l| l.contains("0001"))
        .collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].starts_with('*'));
    assert!(rows[1].starts_with(' '));
    assert!(rows[0].contains("R$ 0.00"));
    Ok(())
}
