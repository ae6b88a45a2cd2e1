use std::fs;
use std::path::Path;

use serde::Deserialize;
use tally_core::{AccountId, Amount, Ledger};
use tally_saga::{Command, GuardedSequence, Operation, Sequence, Transfer};

use crate::error::{CliError, Result};

const DEFAULT_CURRENCY: &str = "EUR";

/// A scenario file: accounts to open and steps to play against them.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Scenario {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub accounts: Vec<AccountSpec>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub currency: String,
    pub history_limit: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            history_limit: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AccountSpec {
    pub name: String,
    #[serde(default)]
    pub balance: Amount,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum Step {
    Deposit {
        account: String,
        amount: Amount,
        #[serde(default)]
        name: Option<String>,
    },
    Withdraw {
        account: String,
        amount: Amount,
        #[serde(default)]
        name: Option<String>,
    },
    Transfer {
        from: String,
        to: String,
        amount: Amount,
        #[serde(default)]
        name: Option<String>,
    },
    Sequence {
        name: String,
        children: Vec<Step>,
    },
    Guarded {
        name: String,
        children: Vec<Step>,
    },
    Undo,
    Redo,
    Print,
}

impl Scenario {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| CliError::ScenarioRead {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| CliError::ScenarioParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Step {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::Deposit { .. } => "deposit",
            Self::Withdraw { .. } => "withdraw",
            Self::Transfer { .. } => "transfer",
            Self::Sequence { .. } => "sequence",
            Self::Guarded { .. } => "guarded",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::Print => "print",
        }
    }

    /// Resolve account names against `ledger` and build the command.
    pub(crate) fn to_command(&self, ledger: &Ledger) -> Result<Command> {
        let command: Command = match self {
            Self::Deposit {
                account,
                amount,
                name,
            } => Operation::credit(lookup(ledger, account)?, *amount)
                .with_name(
                    name.clone()
                        .unwrap_or_else(|| format!("deposit {amount} to {account}")),
                )
                .into(),
            Self::Withdraw {
                account,
                amount,
                name,
            } => Operation::debit(lookup(ledger, account)?, *amount)
                .with_name(
                    name.clone()
                        .unwrap_or_else(|| format!("withdraw {amount} from {account}")),
                )
                .into(),
            Self::Transfer {
                from,
                to,
                amount,
                name,
            } => Transfer::new(lookup(ledger, from)?, lookup(ledger, to)?, *amount)?
                .with_name(
                    name.clone()
                        .unwrap_or_else(|| format!("transfer {amount} from {from} to {to}")),
                )
                .into(),
            Self::Sequence { name, children } => {
                Sequence::new(name.clone(), children_of(children, ledger)?)?.into()
            }
            Self::Guarded { name, children } => {
                GuardedSequence::new(name.clone(), children_of(children, ledger)?)?.into()
            }
            Self::Undo | Self::Redo | Self::Print => {
                return Err(CliError::NotACommand(self.kind()));
            }
        };
        Ok(command)
    }
}

fn lookup(ledger: &Ledger, name: &str) -> Result<AccountId> {
    ledger
        .id_of(name)
        .ok_or_else(|| CliError::UnknownAccount(name.to_string()))
}

fn children_of(steps: &[Step], ledger: &Ledger) -> Result<Vec<Command>> {
    steps.iter().map(|step| step.to_command(ledger)).collect()
}
