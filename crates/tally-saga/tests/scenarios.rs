//! Integration tests for the bank account scenarios.

use tally_core::{Amount, Ledger};
use tally_saga::{Compensable, CompositeState, Operation, OperationState, Outcome, Transfer};

#[test]
fn deposit_into_empty_account_and_undo() -> anyhow::Result<()> {
    let mut ledger = Ledger::new();
    let account = ledger.open("savings", Amount::ZERO)?;
    let mut deposit = Operation::credit(account, Amount::new(100));

    deposit.execute(&mut ledger)?;
    assert_eq!(ledger.balance(account)?, Amount::new(100));

    deposit.undo(&mut ledger)?;
    assert_eq!(ledger.balance(account)?, Amount::ZERO);
    Ok(())
}

#[test]
fn uncovered_withdrawal_changes_nothing() -> anyhow::Result<()> {
    let mut ledger = Ledger::new();
    let account = ledger.open("savings", Amount::new(30))?;
    let mut withdraw = Operation::debit(account, Amount::new(250));

    let outcome = withdraw.execute(&mut ledger)?;
    assert_eq!(outcome, Outcome::Failed);
    assert_eq!(ledger.balance(account)?, Amount::new(30));

    withdraw.undo(&mut ledger)?;
    assert_eq!(ledger.balance(account)?, Amount::new(30));
    assert_eq!(withdraw.state(), OperationState::Failed);
    Ok(())
}

#[test]
fn covered_transfer_and_undo() -> anyhow::Result<()> {
    let mut ledger = Ledger::new();
    let source = ledger.open("source", Amount::new(300))?;
    let destination = ledger.open("destination", Amount::new(500))?;
    let mut transfer = Transfer::new(source, destination, Amount::new(200))?;

    transfer.execute(&mut ledger)?;
    assert_eq!(ledger.balance(source)?, Amount::new(100));
    assert_eq!(ledger.balance(destination)?, Amount::new(700));

    transfer.undo(&mut ledger)?;
    assert_eq!(ledger.balance(source)?, Amount::new(300));
    assert_eq!(ledger.balance(destination)?, Amount::new(500));
    Ok(())
}

#[test]
fn uncovered_transfer_and_undo() -> anyhow::Result<()> {
    let mut ledger = Ledger::new();
    let source = ledger.open("source", Amount::new(100))?;
    let destination = ledger.open("destination", Amount::new(500))?;
    let mut transfer = Transfer::new(source, destination, Amount::new(150))?;

    let outcome = transfer.execute(&mut ledger)?;
    assert_eq!(outcome, Outcome::Failed);
    assert_eq!(transfer.state(), CompositeState::Aborted { at: 0 });
    assert_eq!(ledger.balance(source)?, Amount::new(100));
    assert_eq!(ledger.balance(destination)?, Amount::new(500));

    transfer.undo(&mut ledger)?;
    assert_eq!(ledger.balance(source)?, Amount::new(100));
    assert_eq!(ledger.balance(destination)?, Amount::new(500));
    Ok(())
}

#[test]
fn deposits_failed_withdrawal_and_repeated_undo() -> anyhow::Result<()> {
    let mut ledger = Ledger::new();
    let account = ledger.open("Saving account", Amount::ZERO)?;
    let mut deposit_100 = Operation::credit(account, Amount::new(100));
    let mut deposit_30 = Operation::credit(account, Amount::new(30));
    let mut withdraw_250 = Operation::debit(account, Amount::new(250));
    let mut withdraw_40 = Operation::debit(account, Amount::new(40));

    deposit_100.execute(&mut ledger)?;
    deposit_30.execute(&mut ledger)?;
    assert_eq!(ledger.balance(account)?, Amount::new(130));

    withdraw_250.execute(&mut ledger)?;
    assert_eq!(ledger.balance(account)?, Amount::new(130));

    deposit_30.undo(&mut ledger)?;
    deposit_30.undo(&mut ledger)?;
    assert_eq!(ledger.balance(account)?, Amount::new(100));

    withdraw_40.execute(&mut ledger)?;
    assert_eq!(ledger.balance(account)?, Amount::new(60));
    Ok(())
}
