use tally_core::{AccountId, Amount, LedgerError};
use thiserror::Error;

/// Error from a failed compensation of one child.
#[derive(Debug, Error)]
#[error("compensation failed for step '{step}': {description}")]
pub struct CompensationError {
    /// Name of the step whose compensation failed.
    pub step: String,
    /// Description of what the compensation was trying to do.
    pub description: String,
    /// The underlying error.
    #[source]
    pub error: Box<CommandError>,
}

/// Error from executing or undoing a command.
///
/// Insufficient funds is not an error: it is reported as
/// [`Outcome::Failed`](crate::Outcome::Failed).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CommandError {
    /// `execute()` was called on a command that already ran.
    #[error("command '{name}' has already been executed")]
    AlreadyExecuted {
        /// Name of the command.
        name: String,
    },

    /// A composite was assembled without children.
    #[error("composite '{name}' has no children")]
    EmptyComposite {
        /// Name of the composite.
        name: String,
    },

    /// A transfer was wired with the same account on both legs.
    #[error("cannot transfer from account {account} to itself")]
    SelfTransfer {
        /// The account used for both legs.
        account: AccountId,
    },

    /// The inverse debit of a credit found the funds already spent.
    #[error("cannot undo '{name}': account {account} no longer holds {amount}")]
    CompensationRejected {
        /// Name of the operation being undone.
        name: String,
        /// Account that lacks the funds.
        account: AccountId,
        /// Amount that had to be taken back.
        amount: Amount,
    },

    /// Some children of a composite could not be compensated.
    #[error("undo of '{name}' failed for {} step(s)", errors.len())]
    CompensationFailed {
        /// Name of the composite.
        name: String,
        /// One entry per child whose undo failed.
        errors: Vec<CompensationError>,
    },

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Error from an undo/redo history action.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HistoryError {
    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,

    #[error(transparent)]
    Command(#[from] CommandError),
}
