use tally_core::Ledger;

use crate::composite::{GuardedSequence, Sequence};
use crate::error::CommandError;
use crate::operation::Operation;
use crate::transfer::Transfer;

/// Result of a single `execute()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every mutation the command attempted was applied.
    Succeeded,
    /// At least one mutation was refused, typically for insufficient funds.
    Failed,
}

impl Outcome {
    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, Self::Succeeded)
    }

    pub(crate) fn from_success(success: bool) -> Self {
        if success {
            Self::Succeeded
        } else {
            Self::Failed
        }
    }
}

/// A command that can be executed once and compensated afterwards.
pub trait Compensable {
    /// Human-readable name for logging and error messages.
    fn name(&self) -> &str;

    /// Execute the command against the ledger.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::AlreadyExecuted`] on a second call, or a ledger
    /// error if an account handle is not valid for `ledger`.
    fn execute(&mut self, ledger: &mut Ledger) -> Result<Outcome, CommandError>;

    /// Revert the effects of a successful execution.
    ///
    /// Undoing a command that never ran, failed, or was already undone is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if an inverse mutation cannot be applied.
    fn undo(&mut self, ledger: &mut Ledger) -> Result<(), CommandError>;

    /// Whether the command executed successfully and has not been undone.
    fn is_successful(&self) -> bool;

    /// Whether `execute()` has run (successfully or not).
    fn has_executed(&self) -> bool;

    /// Whether `undo()` would revert anything.
    fn needs_compensation(&self) -> bool {
        self.is_successful()
    }

    /// Human-readable description of what compensation will do.
    fn compensation_description(&self) -> String {
        format!("undo {}", self.name())
    }
}

/// The closed set of command kinds.
#[derive(Debug, Clone)]
pub enum Command {
    Operation(Operation),
    Sequence(Sequence),
    Guarded(GuardedSequence),
}

impl Command {
    /// A copy with identical wiring that has not been executed yet.
    #[must_use]
    pub fn pending_copy(&self) -> Self {
        match self {
            Self::Operation(op) => Self::Operation(op.pending_copy()),
            Self::Sequence(seq) => Self::Sequence(seq.pending_copy()),
            Self::Guarded(seq) => Self::Guarded(seq.pending_copy()),
        }
    }

    fn as_compensable(&self) -> &dyn Compensable {
        match self {
            Self::Operation(op) => op,
            Self::Sequence(seq) => seq,
            Self::Guarded(seq) => seq,
        }
    }

    fn as_compensable_mut(&mut self) -> &mut dyn Compensable {
        match self {
            Self::Operation(op) => op,
            Self::Sequence(seq) => seq,
            Self::Guarded(seq) => seq,
        }
    }
}

impl Compensable for Command {
    fn name(&self) -> &str {
        self.as_compensable().name()
    }

    fn execute(&mut self, ledger: &mut Ledger) -> Result<Outcome, CommandError> {
        self.as_compensable_mut().execute(ledger)
    }

    fn undo(&mut self, ledger: &mut Ledger) -> Result<(), CommandError> {
        self.as_compensable_mut().undo(ledger)
    }

    fn is_successful(&self) -> bool {
        self.as_compensable().is_successful()
    }

    fn has_executed(&self) -> bool {
        self.as_compensable().has_executed()
    }

    fn needs_compensation(&self) -> bool {
        self.as_compensable().needs_compensation()
    }

    fn compensation_description(&self) -> String {
        self.as_compensable().compensation_description()
    }
}

impl From<Operation> for Command {
    fn from(op: Operation) -> Self {
        Self::Operation(op)
    }
}

impl From<Sequence> for Command {
    fn from(seq: Sequence) -> Self {
        Self::Sequence(seq)
    }
}

impl From<GuardedSequence> for Command {
    fn from(seq: GuardedSequence) -> Self {
        Self::Guarded(seq)
    }
}

impl From<Transfer> for Command {
    fn from(transfer: Transfer) -> Self {
        Self::Guarded(transfer.into_inner())
    }
}
