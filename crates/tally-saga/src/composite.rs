use tally_core::Ledger;
use tracing::{debug, info};

use crate::audit::AuditLog;
use crate::builder::{CompositeBuilder, Empty};
use crate::command::{Command, Compensable, Outcome};
use crate::error::{CommandError, CompensationError};

/// Lifecycle of a composite command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeState {
    /// Not executed yet.
    #[default]
    Pending,
    /// Every child was attempted.
    Completed,
    /// Execution stopped at child `at`; later children never ran.
    Aborted {
        /// Index of the child that failed or returned an error.
        at: usize,
    },
    /// All executed children have been compensated.
    Undone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChainPolicy {
    Unconditional,
    BreakOnFailure,
}

/// Children and lifecycle shared by both composite kinds.
#[derive(Debug, Clone)]
struct Composite {
    name: String,
    children: Vec<Command>,
    state: CompositeState,
}

impl Composite {
    fn new(name: String, children: Vec<Command>) -> Result<Self, CommandError> {
        if children.is_empty() {
            return Err(CommandError::EmptyComposite { name });
        }
        Ok(Self::from_parts(name, children))
    }

    fn from_parts(name: String, children: Vec<Command>) -> Self {
        Self {
            name,
            children,
            state: CompositeState::Pending,
        }
    }

    /// True only while a child this composite ran still has effects.
    fn needs_compensation(&self) -> bool {
        self.state != CompositeState::Pending
            && self.children.iter().any(Compensable::needs_compensation)
    }

    fn pending_copy(&self) -> Self {
        Self::from_parts(
            self.name.clone(),
            self.children.iter().map(Command::pending_copy).collect(),
        )
    }

    fn run(
        &mut self,
        ledger: &mut Ledger,
        policy: ChainPolicy,
        audit_log: &mut AuditLog,
    ) -> Result<Outcome, CommandError> {
        if self.state != CompositeState::Pending {
            return Err(CommandError::AlreadyExecuted {
                name: self.name.clone(),
            });
        }
        // A child that already ran belongs to whoever ran it.
        if let Some(child) = self.children.iter().find(|child| child.has_executed()) {
            return Err(CommandError::AlreadyExecuted {
                name: child.name().to_string(),
            });
        }

        let mut chain_alive = true;
        let mut all_succeeded = true;
        let mut aborted_at = None;
        let mut failure = None;

        for (index, child) in self.children.iter_mut().enumerate() {
            if !chain_alive {
                audit_log.record_skipped(child.name());
                continue;
            }

            audit_log.record_start(child.name());
            match child.execute(ledger) {
                Ok(Outcome::Succeeded) => {
                    audit_log.record_success(child.compensation_description());
                }
                Ok(Outcome::Failed) => {
                    audit_log.record_failure();
                    all_succeeded = false;
                    if policy == ChainPolicy::BreakOnFailure {
                        chain_alive = false;
                        aborted_at = Some(index);
                        info!(
                            composite = %self.name,
                            step = %child.name(),
                            index,
                            "chain aborted"
                        );
                    }
                }
                Err(error) => {
                    audit_log.record_failure();
                    failure = Some((index, error));
                    break;
                }
            }
        }

        if let Some((index, error)) = failure {
            for skipped in &self.children[index + 1..] {
                audit_log.record_skipped(skipped.name());
            }
            self.state = CompositeState::Aborted { at: index };
            return Err(error);
        }

        self.state = match aborted_at {
            Some(at) => CompositeState::Aborted { at },
            None => CompositeState::Completed,
        };
        debug!(composite = %self.name, state = ?self.state, "executed composite");
        Ok(Outcome::from_success(all_succeeded))
    }

    fn compensate(
        &mut self,
        ledger: &mut Ledger,
        audit_log: &mut AuditLog,
    ) -> Result<(), CommandError> {
        if !self.needs_compensation() {
            return Ok(());
        }

        if audit_log.records().is_empty() {
            audit_log.seed(self.children.iter().map(Compensable::name));
        }
        let mut compensation_errors = Vec::new();

        for (index, child) in self.children.iter_mut().enumerate().rev() {
            if !child.needs_compensation() {
                continue;
            }
            let description = child.compensation_description();

            match child.undo(ledger) {
                Ok(()) => audit_log.record_compensated(index),
                Err(error) => {
                    audit_log.record_compensation_failed(index);
                    compensation_errors.push(CompensationError {
                        step: child.name().to_string(),
                        description,
                        error: Box::new(error),
                    });
                }
            }
        }

        if compensation_errors.is_empty() {
            self.state = CompositeState::Undone;
            debug!(composite = %self.name, "compensated composite");
            Ok(())
        } else {
            Err(CommandError::CompensationFailed {
                name: self.name.clone(),
                errors: compensation_errors,
            })
        }
    }
}

/// Runs every child in order regardless of outcome.
#[derive(Debug, Clone)]
pub struct Sequence {
    inner: Composite,
}

/// Runs children in order until one fails; the rest are never attempted.
#[derive(Debug, Clone)]
pub struct GuardedSequence {
    inner: Composite,
}

macro_rules! composite_common {
    ($ty:ident, $policy:expr) => {
        impl $ty {
            /// Start a type-state builder for a composite named `name`.
            #[must_use]
            pub fn builder(name: impl Into<String>) -> CompositeBuilder<Self, Empty> {
                CompositeBuilder::new(name)
            }

            /// Assemble a composite from children known at runtime.
            ///
            /// # Errors
            ///
            /// Returns [`CommandError::EmptyComposite`] if `children` is empty.
            pub fn new(name: impl Into<String>, children: Vec<Command>) -> Result<Self, CommandError> {
                Ok(Self {
                    inner: Composite::new(name.into(), children)?,
                })
            }

            pub(crate) fn from_parts(name: String, children: Vec<Command>) -> Self {
                Self {
                    inner: Composite::from_parts(name, children),
                }
            }

            /// Replace the display name.
            #[must_use]
            pub fn with_name(mut self, name: impl Into<String>) -> Self {
                self.inner.name = name.into();
                self
            }

            #[must_use]
            pub fn children(&self) -> &[Command] {
                &self.inner.children
            }

            #[must_use]
            pub fn state(&self) -> CompositeState {
                self.inner.state
            }

            pub(crate) fn pending_copy(&self) -> Self {
                Self {
                    inner: self.inner.pending_copy(),
                }
            }

            /// Execute and return an audit log of every child.
            pub fn execute_with_audit(
                &mut self,
                ledger: &mut Ledger,
            ) -> (Result<Outcome, CommandError>, AuditLog) {
                let mut audit_log = AuditLog::new();
                let result = self.inner.run(ledger, $policy, &mut audit_log);
                (result, audit_log)
            }

            /// Undo and return an audit log of the compensated children.
            pub fn undo_with_audit(
                &mut self,
                ledger: &mut Ledger,
            ) -> (Result<(), CommandError>, AuditLog) {
                let mut audit_log = AuditLog::new();
                let result = self.inner.compensate(ledger, &mut audit_log);
                (result, audit_log)
            }
        }
    };
}

composite_common!(Sequence, ChainPolicy::Unconditional);
composite_common!(GuardedSequence, ChainPolicy::BreakOnFailure);

impl GuardedSequence {
    /// Whether execution stopped before every child was attempted.
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        matches!(self.inner.state, CompositeState::Aborted { .. })
    }
}

impl Compensable for Sequence {
    fn name(&self) -> &str {
        &self.inner.name
    }

    fn execute(&mut self, ledger: &mut Ledger) -> Result<Outcome, CommandError> {
        self.execute_with_audit(ledger).0
    }

    fn undo(&mut self, ledger: &mut Ledger) -> Result<(), CommandError> {
        self.undo_with_audit(ledger).0
    }

    fn is_successful(&self) -> bool {
        self.inner.state == CompositeState::Completed
            && self.inner.children.iter().all(Compensable::is_successful)
    }

    fn has_executed(&self) -> bool {
        self.inner.state != CompositeState::Pending
    }

    fn needs_compensation(&self) -> bool {
        self.inner.needs_compensation()
    }
}

impl Compensable for GuardedSequence {
    fn name(&self) -> &str {
        &self.inner.name
    }

    fn execute(&mut self, ledger: &mut Ledger) -> Result<Outcome, CommandError> {
        self.execute_with_audit(ledger).0
    }

    fn undo(&mut self, ledger: &mut Ledger) -> Result<(), CommandError> {
        self.undo_with_audit(ledger).0
    }

    fn is_successful(&self) -> bool {
        self.inner.state == CompositeState::Completed
    }

    fn has_executed(&self) -> bool {
        self.inner.state != CompositeState::Pending
    }

    fn needs_compensation(&self) -> bool {
        self.inner.needs_compensation()
    }
}
