use std::fmt;

use serde::Serialize;

use crate::Amount;
use crate::error::{LedgerError, Result};

/// Handle to an account stored in a [`Ledger`](crate::Ledger).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(usize);

impl AccountId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named balance that can be credited and debited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    name: String,
    balance: Amount,
}

impl Account {
    #[must_use]
    pub fn new(name: impl Into<String>, balance: Amount) -> Self {
        Self {
            name: name.into(),
            balance,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// Adds `amount` to the balance.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::BalanceOverflow`] if the new balance does not fit,
    /// leaving the balance unchanged.
    pub fn credit(&mut self, amount: Amount) -> Result<()> {
        self.balance =
            self.balance
                .checked_add(amount)
                .ok_or_else(|| LedgerError::BalanceOverflow {
                    account: self.name.clone(),
                    balance: self.balance,
                    amount,
                })?;
        Ok(())
    }

    /// Removes `amount` from the balance if it is covered.
    ///
    /// Returns `false` and leaves the balance untouched when funds are
    /// insufficient. There is no partial debit.
    #[must_use = "an uncovered debit is reported through the return value"]
    pub fn debit(&mut self, amount: Amount) -> bool {
        match self.balance.checked_sub(amount) {
            Some(remaining) => {
                self.balance = remaining;
                true
            }
            None => false,
        }
    }
}
