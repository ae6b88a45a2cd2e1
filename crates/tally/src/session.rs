use serde::Serialize;
use tally_core::{Amount, Ledger};
use tally_saga::{Compensable, History, HistoryConfig, Outcome};
use tracing::{info, warn};

use crate::error::Result;
use crate::scenario::{Scenario, Step};

/// What applying one scenario step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StepEffect {
    Executed { name: String, outcome: Outcome },
    Undone { name: String },
    Redone { name: String, outcome: Outcome },
    NothingToUndo,
    NothingToRedo,
    Print,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct AccountStatus {
    pub name: String,
    pub balance: Amount,
}

/// Snapshot of every account plus the history depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct StatusReport {
    pub accounts: Vec<AccountStatus>,
    pub currency: String,
    pub undo_depth: usize,
    pub redo_depth: usize,
}

/// A ledger and its undo/redo history, driven one step at a time.
pub(crate) struct Session {
    ledger: Ledger,
    history: History,
    currency: String,
}

impl Session {
    pub(crate) fn open(scenario: &Scenario) -> Result<Self> {
        let mut ledger = Ledger::new();
        for account in &scenario.accounts {
            ledger.open(account.name.clone(), account.balance)?;
        }

        info!(
            accounts = ledger.len(),
            currency = %scenario.settings.currency,
            "session opened"
        );

        Ok(Self {
            ledger,
            history: History::new(HistoryConfig {
                limit: scenario.settings.history_limit,
            }),
            currency: scenario.settings.currency.clone(),
        })
    }

    pub(crate) fn apply(&mut self, step: &Step) -> Result<StepEffect> {
        match step {
            Step::Undo => {
                let Some(name) = self.history.next_undo().map(|c| c.name().to_string()) else {
                    warn!("nothing to undo");
                    return Ok(StepEffect::NothingToUndo);
                };
                self.history.undo(&mut self.ledger)?;
                Ok(StepEffect::Undone { name })
            }
            Step::Redo => {
                let Some(name) = self.history.next_redo().map(|c| c.name().to_string()) else {
                    warn!("nothing to redo");
                    return Ok(StepEffect::NothingToRedo);
                };
                let outcome = self.history.redo(&mut self.ledger)?;
                Ok(StepEffect::Redone { name, outcome })
            }
            Step::Print => Ok(StepEffect::Print),
            command_step => {
                let command = command_step.to_command(&self.ledger)?;
                let name = command.name().to_string();
                let outcome = self.history.execute(command, &mut self.ledger)?;
                Ok(StepEffect::Executed { name, outcome })
            }
        }
    }

    pub(crate) fn report(&self) -> StatusReport {
        StatusReport {
            accounts: self
                .ledger
                .accounts()
                .map(|account| AccountStatus {
                    name: account.name().to_string(),
                    balance: account.balance(),
                })
                .collect(),
            currency: self.currency.clone(),
            undo_depth: self.history.undo_depth(),
            redo_depth: self.history.redo_depth(),
        }
    }
}
