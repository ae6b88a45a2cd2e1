use std::fmt::Write as _;

use tally_saga::Outcome;

use super::StatusFormatter;
use crate::error::Result;
use crate::session::{StatusReport, StepEffect};

pub(crate) struct PlainTextFormatter;

impl PlainTextFormatter {
    fn outcome_glyph(outcome: Outcome) -> &'static str {
        match outcome {
            Outcome::Succeeded => "✓",
            Outcome::Failed => "✗",
        }
    }
}

impl StatusFormatter for PlainTextFormatter {
    fn format_step(&self, effect: &StepEffect) -> Option<String> {
        match effect {
            StepEffect::Executed { name, outcome } => {
                Some(format!("{} {name}", Self::outcome_glyph(*outcome)))
            }
            StepEffect::Undone { name } => Some(format!("↩ {name}")),
            StepEffect::Redone { name, outcome } => {
                Some(format!("{} redo {name}", Self::outcome_glyph(*outcome)))
            }
            StepEffect::NothingToUndo | StepEffect::NothingToRedo | StepEffect::Print => None,
        }
    }

    fn format_status(&self, report: &StatusReport) -> Result<String> {
        let mut output = String::new();
        for account in &report.accounts {
            let _ = writeln!(
                output,
                "Account \"{}\" - Balance: {} {}",
                account.name, account.balance, report.currency
            );
        }
        Ok(output)
    }
}
