//! Integration tests for reverse-order compensation.

use tally_core::{Amount, Ledger};
use tally_saga::{
    Command, Compensable, CompositeState, GuardedSequence, Operation, Sequence, StepStatus,
    Transfer,
};

#[test]
fn compensation_happens_in_lifo_order_on_overlapping_accounts() -> anyhow::Result<()> {
    let mut ledger = Ledger::new();
    let account = ledger.open("savings", Amount::new(20))?;
    let mut sequence = Sequence::builder("overlap")
        .first(Operation::credit(account, Amount::new(100)))
        .then(Operation::debit(account, Amount::new(120)))
        .build();

    sequence.execute(&mut ledger)?;
    assert_eq!(ledger.balance(account)?, Amount::ZERO);

    // Undoing the deposit first would need 100 from an empty account.
    let (result, audit_log) = sequence.undo_with_audit(&mut ledger);
    result?;

    assert_eq!(ledger.balance(account)?, Amount::new(20));
    assert_eq!(audit_log.records()[0].status, StepStatus::Compensated);
    assert_eq!(audit_log.records()[1].status, StepStatus::Compensated);
    Ok(())
}

#[test]
fn sequence_restores_balances_for_mixed_outcomes() -> anyhow::Result<()> {
    let mut ledger = Ledger::new();
    let checking = ledger.open("checking", Amount::new(50))?;
    let savings = ledger.open("savings", Amount::new(10))?;
    let mut sequence = Sequence::new(
        "mixed",
        vec![
            Operation::debit(savings, Amount::new(500)).into(),
            Transfer::new(checking, savings, Amount::new(40))?.into(),
            Operation::debit(checking, Amount::new(20)).into(),
            Operation::credit(savings, Amount::new(5)).into(),
        ],
    )?;

    sequence.execute(&mut ledger)?;
    assert_eq!(ledger.balance(checking)?, Amount::new(10));
    assert_eq!(ledger.balance(savings)?, Amount::new(55));

    sequence.undo(&mut ledger)?;
    assert_eq!(ledger.balance(checking)?, Amount::new(50));
    assert_eq!(ledger.balance(savings)?, Amount::new(10));
    Ok(())
}

#[test]
fn nested_composites_compensate_innermost_last_step_first() -> anyhow::Result<()> {
    let mut ledger = Ledger::new();
    let account = ledger.open("savings", Amount::ZERO)?;
    let inner = Sequence::builder("inner")
        .first(Operation::credit(account, Amount::new(10)))
        .then(Operation::debit(account, Amount::new(10)))
        .build();
    let mut outer = GuardedSequence::builder("outer")
        .first(Operation::credit(account, Amount::new(5)))
        .then(inner)
        .then(Operation::debit(account, Amount::new(5)))
        .build();

    outer.execute(&mut ledger)?;
    assert!(outer.is_successful());
    assert_eq!(ledger.balance(account)?, Amount::ZERO);

    outer.undo(&mut ledger)?;
    assert_eq!(ledger.balance(account)?, Amount::ZERO);
    assert_eq!(outer.state(), CompositeState::Undone);
    match &outer.children()[1] {
        Command::Sequence(inner) => assert_eq!(inner.state(), CompositeState::Undone),
        other => panic!("expected nested sequence, got {other:?}"),
    }
    Ok(())
}

#[test]
fn failed_nested_composite_breaks_outer_chain() -> anyhow::Result<()> {
    let mut ledger = Ledger::new();
    let source = ledger.open("source", Amount::new(100))?;
    let destination = ledger.open("destination", Amount::ZERO)?;
    let mut outer = GuardedSequence::builder("payroll")
        .first(Transfer::new(source, destination, Amount::new(60))?)
        .then(Transfer::new(source, destination, Amount::new(60))?)
        .then(Operation::credit(destination, Amount::new(1_000)))
        .build();

    outer.execute(&mut ledger)?;

    assert_eq!(outer.state(), CompositeState::Aborted { at: 1 });
    assert_eq!(ledger.balance(source)?, Amount::new(40));
    assert_eq!(ledger.balance(destination)?, Amount::new(60));

    outer.undo(&mut ledger)?;
    assert_eq!(ledger.balance(source)?, Amount::new(100));
    assert_eq!(ledger.balance(destination)?, Amount::ZERO);
    Ok(())
}

#[test]
fn undo_is_idempotent_across_composites() -> anyhow::Result<()> {
    let mut ledger = Ledger::new();
    let source = ledger.open("source", Amount::new(300))?;
    let destination = ledger.open("destination", Amount::new(500))?;
    let mut transfer = Transfer::new(source, destination, Amount::new(200))?;
    transfer.execute(&mut ledger)?;

    for _ in 0..3 {
        transfer.undo(&mut ledger)?;
    }

    assert_eq!(ledger.balance(source)?, Amount::new(300));
    assert_eq!(ledger.balance(destination)?, Amount::new(500));
    Ok(())
}
