use std::fmt;

use tally_core::{AccountId, Amount, Ledger, LedgerError};
use tracing::debug;

use crate::command::{Compensable, Outcome};
use crate::error::CommandError;

/// Mutation applied by an [`Operation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Credit,
    Debit,
}

impl Action {
    /// The mutation that reverts this one.
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Self::Credit => Self::Debit,
            Self::Debit => Self::Credit,
        }
    }

    fn apply(
        self,
        ledger: &mut Ledger,
        account: AccountId,
        amount: Amount,
    ) -> Result<bool, LedgerError> {
        match self {
            Self::Credit => ledger.credit(account, amount).map(|()| true),
            Self::Debit => ledger.debit(account, amount),
        }
    }

    fn preposition(self) -> &'static str {
        match self {
            Self::Credit => "to",
            Self::Debit => "from",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Credit => "deposit",
            Self::Debit => "withdraw",
        };
        write!(f, "{s}")
    }
}

/// Lifecycle of an [`Operation`].
///
/// ```text
/// Unexecuted --execute--> Succeeded --undo--> Undone
///            \--execute--> Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationState {
    #[default]
    Unexecuted,
    Succeeded,
    Failed,
    Undone,
}

/// Leaf command: one action of a fixed amount on one account.
#[derive(Debug, Clone)]
pub struct Operation {
    name: String,
    account: AccountId,
    action: Action,
    amount: Amount,
    state: OperationState,
}

impl Operation {
    #[must_use]
    pub fn new(account: AccountId, action: Action, amount: Amount) -> Self {
        Self {
            name: format!("{action} {amount} {} {account}", action.preposition()),
            account,
            action,
            amount,
            state: OperationState::Unexecuted,
        }
    }

    #[must_use]
    pub fn credit(account: AccountId, amount: Amount) -> Self {
        Self::new(account, Action::Credit, amount)
    }

    #[must_use]
    pub fn debit(account: AccountId, amount: Amount) -> Self {
        Self::new(account, Action::Debit, amount)
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn account(&self) -> AccountId {
        self.account
    }

    #[must_use]
    pub fn action(&self) -> Action {
        self.action
    }

    #[must_use]
    pub fn amount(&self) -> Amount {
        self.amount
    }

    #[must_use]
    pub fn state(&self) -> OperationState {
        self.state
    }

    pub(crate) fn pending_copy(&self) -> Self {
        Self {
            state: OperationState::Unexecuted,
            ..self.clone()
        }
    }
}

impl Compensable for Operation {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&mut self, ledger: &mut Ledger) -> Result<Outcome, CommandError> {
        if self.state != OperationState::Unexecuted {
            return Err(CommandError::AlreadyExecuted {
                name: self.name.clone(),
            });
        }

        let applied = self.action.apply(ledger, self.account, self.amount)?;
        self.state = if applied {
            OperationState::Succeeded
        } else {
            OperationState::Failed
        };

        debug!(
            operation = %self.name,
            account = %self.account,
            amount = %self.amount,
            applied,
            "executed operation"
        );
        Ok(Outcome::from_success(applied))
    }

    fn undo(&mut self, ledger: &mut Ledger) -> Result<(), CommandError> {
        if self.state != OperationState::Succeeded {
            return Ok(());
        }

        let reverted = self
            .action
            .inverse()
            .apply(ledger, self.account, self.amount)?;
        if !reverted {
            return Err(CommandError::CompensationRejected {
                name: self.name.clone(),
                account: self.account,
                amount: self.amount,
            });
        }
        self.state = OperationState::Undone;

        debug!(
            operation = %self.name,
            account = %self.account,
            amount = %self.amount,
            "compensated operation"
        );
        Ok(())
    }

    fn is_successful(&self) -> bool {
        self.state == OperationState::Succeeded
    }

    fn has_executed(&self) -> bool {
        self.state != OperationState::Unexecuted
    }

    fn compensation_description(&self) -> String {
        let inverse = self.action.inverse();
        format!(
            "{inverse} {} {} {}",
            self.amount,
            inverse.preposition(),
            self.account
        )
    }
}
