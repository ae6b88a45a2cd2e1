use std::collections::VecDeque;

use tally_core::Ledger;
use tracing::debug;

use crate::command::{Command, Compensable, Outcome};
use crate::error::HistoryError;

/// Settings for a [`History`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Maximum number of undoable commands kept; `None` keeps all of them.
    pub limit: Option<usize>,
}

/// Undo/redo session over executed commands.
///
/// Executing a new command clears the redo stack: redo is only meaningful
/// right after an undo.
#[derive(Debug, Default)]
pub struct History {
    config: HistoryConfig,
    undo_stack: VecDeque<Command>,
    redo_stack: Vec<Command>,
}

impl History {
    #[must_use]
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            config,
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Execute `command` and record it for undo.
    ///
    /// A command that returns an error is recorded only when it left effects
    /// behind (a partially executed composite), so it can be undone. A
    /// rejected command leaves both stacks untouched.
    ///
    /// # Errors
    ///
    /// Returns the command's error.
    pub fn execute(
        &mut self,
        command: impl Into<Command>,
        ledger: &mut Ledger,
    ) -> Result<Outcome, HistoryError> {
        let mut command = command.into();
        let result = command.execute(ledger);

        if result.is_ok() || command.needs_compensation() {
            if !self.redo_stack.is_empty() {
                debug!(
                    discarded = self.redo_stack.len(),
                    "new command invalidates redo history"
                );
                self.redo_stack.clear();
            }
            self.push_undoable(command);
        }

        result.map_err(HistoryError::from)
    }

    /// Undo the most recently executed command.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::NothingToUndo`] when the undo stack is empty, or
    /// the compensation error. A command whose undo failed stays on the undo
    /// stack.
    pub fn undo(&mut self, ledger: &mut Ledger) -> Result<(), HistoryError> {
        let mut command = self
            .undo_stack
            .pop_back()
            .ok_or(HistoryError::NothingToUndo)?;

        if let Err(error) = command.undo(ledger) {
            self.undo_stack.push_back(command);
            return Err(error.into());
        }

        debug!(command = %command.name(), "undone");
        self.redo_stack.push(command);
        Ok(())
    }

    /// Re-execute the most recently undone command.
    ///
    /// Commands are one-shot, so a fresh copy with the same wiring is run and
    /// recorded in its place.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::NothingToRedo`] when the redo stack is empty, or
    /// the command's error.
    pub fn redo(&mut self, ledger: &mut Ledger) -> Result<Outcome, HistoryError> {
        let undone = self.redo_stack.pop().ok_or(HistoryError::NothingToRedo)?;
        let mut fresh = undone.pending_copy();

        match fresh.execute(ledger) {
            Ok(outcome) => {
                debug!(command = %fresh.name(), ?outcome, "redone");
                self.push_undoable(fresh);
                Ok(outcome)
            }
            Err(error) => {
                if fresh.needs_compensation() {
                    self.push_undoable(fresh);
                } else {
                    self.redo_stack.push(undone);
                }
                Err(error.into())
            }
        }
    }

    fn push_undoable(&mut self, command: Command) {
        self.undo_stack.push_back(command);
        if let Some(limit) = self.config.limit {
            while self.undo_stack.len() > limit {
                if let Some(dropped) = self.undo_stack.pop_front() {
                    debug!(command = %dropped.name(), limit, "history limit reached, dropping oldest");
                }
            }
        }
    }

    /// The command the next [`undo`](Self::undo) would revert.
    #[must_use]
    pub fn next_undo(&self) -> Option<&Command> {
        self.undo_stack.back()
    }

    /// The command the next [`redo`](Self::redo) would re-execute.
    #[must_use]
    pub fn next_redo(&self) -> Option<&Command> {
        self.redo_stack.last()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Forget every recorded command without touching the ledger.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
