//! Integration tests for compensation failure scenarios.

use tally_core::{Amount, Ledger};
use tally_saga::{
    Command, CommandError, Compensable, CompositeState, Operation, OperationState, Sequence,
    StepStatus,
};

fn operation_state(command: &Command) -> OperationState {
    match command {
        Command::Operation(op) => op.state(),
        other => panic!("expected operation, got {other:?}"),
    }
}

#[test]
fn spent_deposit_reports_compensation_failure() -> anyhow::Result<()> {
    let mut ledger = Ledger::new();
    let first = ledger.open("first", Amount::ZERO)?;
    let second = ledger.open("second", Amount::ZERO)?;
    let third = ledger.open("third", Amount::ZERO)?;
    let mut sequence = Sequence::builder("payout")
        .first(Operation::credit(first, Amount::new(10)))
        .then(Operation::credit(second, Amount::new(20)))
        .then(Operation::credit(third, Amount::new(30)))
        .build();
    sequence.execute(&mut ledger)?;
    assert!(ledger.debit(second, Amount::new(15))?);

    let (result, audit_log) = sequence.undo_with_audit(&mut ledger);

    let err = result.expect_err("undo should fail");
    match err {
        CommandError::CompensationFailed { name, errors } => {
            assert_eq!(name, "payout");
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].step, "deposit 20 to #1");
            assert_eq!(errors[0].description, "withdraw 20 from #1");
            assert!(matches!(
                *errors[0].error,
                CommandError::CompensationRejected { .. }
            ));
        }
        other => panic!("expected CompensationFailed, got {other:?}"),
    }

    assert_eq!(ledger.balance(first)?, Amount::ZERO);
    assert_eq!(ledger.balance(second)?, Amount::new(5));
    assert_eq!(ledger.balance(third)?, Amount::ZERO);

    let statuses: Vec<_> = audit_log.records().iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        [
            StepStatus::Compensated,
            StepStatus::CompensationFailed,
            StepStatus::Compensated
        ]
    );
    Ok(())
}

#[test]
fn failed_compensation_can_be_retried() -> anyhow::Result<()> {
    let mut ledger = Ledger::new();
    let first = ledger.open("first", Amount::ZERO)?;
    let second = ledger.open("second", Amount::ZERO)?;
    let mut sequence = Sequence::builder("payout")
        .first(Operation::credit(first, Amount::new(10)))
        .then(Operation::credit(second, Amount::new(20)))
        .build();
    sequence.execute(&mut ledger)?;
    assert!(ledger.debit(second, Amount::new(20))?);
    assert!(sequence.undo(&mut ledger).is_err());
    assert_ne!(sequence.state(), CompositeState::Undone);
    assert_eq!(
        operation_state(&sequence.children()[0]),
        OperationState::Undone
    );

    ledger.credit(second, Amount::new(20))?;
    sequence.undo(&mut ledger)?;

    assert_eq!(sequence.state(), CompositeState::Undone);
    assert_eq!(ledger.balance(first)?, Amount::ZERO);
    assert_eq!(ledger.balance(second)?, Amount::ZERO);
    Ok(())
}

#[test]
fn compensation_error_display_includes_step_and_cause() -> anyhow::Result<()> {
    let mut ledger = Ledger::new();
    let account = ledger.open("savings", Amount::ZERO)?;
    let mut sequence = Sequence::builder("bonus")
        .first(Operation::credit(account, Amount::new(50)))
        .build();
    sequence.execute(&mut ledger)?;
    assert!(ledger.debit(account, Amount::new(50))?);

    let err = sequence.undo(&mut ledger).expect_err("undo should fail");

    assert_eq!(err.to_string(), "undo of 'bonus' failed for 1 step(s)");
    if let CommandError::CompensationFailed { errors, .. } = &err {
        let source = std::error::Error::source(&errors[0]).map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("cannot undo 'deposit 50 to #0': account #0 no longer holds 50")
        );
    } else {
        panic!("expected CompensationFailed, got {err:?}");
    }
    Ok(())
}
