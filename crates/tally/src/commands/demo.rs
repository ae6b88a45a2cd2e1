use tally_core::Amount;

use super::{Echo, play};
use crate::error::Result;
use crate::output::OutputFormat;
use crate::scenario::{AccountSpec, Scenario, Settings, Step};

const SAVING: &str = "Saving account";
const CURRENT: &str = "Current account";

pub(crate) fn run(format: OutputFormat) -> Result<()> {
    play(&demo_scenario(), format.formatter().as_ref(), Echo::EveryStep)
}

/// Deposits, an uncovered withdrawal, undo past it, then a covered and an
/// uncovered transfer followed by undo and redo.
///
/// Each `Undo` pops the newest history entry, so the first undo reverts the
/// refused withdrawal (no balance change) and the second reverts the
/// deposit of 30. Undoing one command twice is not expressible through the
/// history; the second undo of an already undone command is a no-op on the
/// command itself.
fn demo_scenario() -> Scenario {
    Scenario {
        settings: Settings::default(),
        accounts: vec![account(SAVING, 0), account(CURRENT, 500)],
        steps: vec![
            deposit(100),
            deposit(30),
            withdraw(250),
            Step::Undo,
            Step::Undo,
            withdraw(40),
            transfer(40),
            transfer(150),
            Step::Undo,
            Step::Undo,
            Step::Redo,
        ],
    }
}

fn account(name: &str, balance: u64) -> AccountSpec {
    AccountSpec {
        name: name.to_string(),
        balance: Amount::new(balance),
    }
}

fn deposit(amount: u64) -> Step {
    Step::Deposit {
        account: SAVING.to_string(),
        amount: Amount::new(amount),
        name: None,
    }
}

fn withdraw(amount: u64) -> Step {
    Step::Withdraw {
        account: SAVING.to_string(),
        amount: Amount::new(amount),
        name: None,
    }
}

fn transfer(amount: u64) -> Step {
    Step::Transfer {
        from: SAVING.to_string(),
        to: CURRENT.to_string(),
        amount: Amount::new(amount),
        name: None,
    }
}
