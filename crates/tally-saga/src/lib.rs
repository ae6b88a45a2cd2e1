//! Reversible, compensable commands.
//!
//! Leaf [`Operation`]s mutate one account of a [`Ledger`](tally_core::Ledger).
//! They can be grouped into a [`Sequence`], which runs every child, or a
//! [`GuardedSequence`], which stops at the first failed child. Undoing a
//! composite compensates its children in reverse order (LIFO), so only the
//! steps that actually changed a balance are reverted.
//!
//! [`History`] keeps executed commands on an undo stack and undone commands
//! on a redo stack.

mod audit;
mod builder;
mod command;
mod composite;
mod error;
mod history;
mod operation;
mod transfer;

pub use audit::{AuditLog, StepRecord, StepStatus};
pub use builder::{CompositeBuilder, Empty, HasChildren};
pub use command::{Command, Compensable, Outcome};
pub use composite::{CompositeState, GuardedSequence, Sequence};
pub use error::{CommandError, CompensationError, HistoryError};
pub use history::{History, HistoryConfig};
pub use operation::{Action, Operation, OperationState};
pub use transfer::Transfer;
