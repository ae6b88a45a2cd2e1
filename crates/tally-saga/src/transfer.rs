use tally_core::{AccountId, Amount, Ledger};

use crate::audit::AuditLog;
use crate::command::{Compensable, Outcome};
use crate::composite::{CompositeState, GuardedSequence};
use crate::error::CommandError;
use crate::operation::Operation;

/// Moves an amount between two accounts: withdraw, then deposit.
///
/// The deposit is never attempted when the withdrawal fails, so a transfer
/// neither creates nor destroys value.
#[derive(Debug, Clone)]
pub struct Transfer {
    inner: GuardedSequence,
    source: AccountId,
    destination: AccountId,
    amount: Amount,
}

impl Transfer {
    /// # Errors
    ///
    /// Returns [`CommandError::SelfTransfer`] if both legs name the same account.
    pub fn new(
        source: AccountId,
        destination: AccountId,
        amount: Amount,
    ) -> Result<Self, CommandError> {
        if source == destination {
            return Err(CommandError::SelfTransfer { account: source });
        }

        let inner = GuardedSequence::builder(format!(
            "transfer {amount} from {source} to {destination}"
        ))
        .first(Operation::debit(source, amount))
        .then(Operation::credit(destination, amount))
        .build();

        Ok(Self {
            inner,
            source,
            destination,
            amount,
        })
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.inner = self.inner.with_name(name);
        self
    }

    #[must_use]
    pub fn source(&self) -> AccountId {
        self.source
    }

    #[must_use]
    pub fn destination(&self) -> AccountId {
        self.destination
    }

    #[must_use]
    pub fn amount(&self) -> Amount {
        self.amount
    }

    #[must_use]
    pub fn state(&self) -> CompositeState {
        self.inner.state()
    }

    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.inner.is_aborted()
    }

    pub fn execute_with_audit(
        &mut self,
        ledger: &mut Ledger,
    ) -> (Result<Outcome, CommandError>, AuditLog) {
        self.inner.execute_with_audit(ledger)
    }

    pub fn undo_with_audit(
        &mut self,
        ledger: &mut Ledger,
    ) -> (Result<(), CommandError>, AuditLog) {
        self.inner.undo_with_audit(ledger)
    }

    pub(crate) fn into_inner(self) -> GuardedSequence {
        self.inner
    }
}

impl Compensable for Transfer {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn execute(&mut self, ledger: &mut Ledger) -> Result<Outcome, CommandError> {
        self.inner.execute(ledger)
    }

    fn undo(&mut self, ledger: &mut Ledger) -> Result<(), CommandError> {
        self.inner.undo(ledger)
    }

    fn is_successful(&self) -> bool {
        self.inner.is_successful()
    }

    fn has_executed(&self) -> bool {
        self.inner.has_executed()
    }

    fn needs_compensation(&self) -> bool {
        self.inner.needs_compensation()
    }
}
