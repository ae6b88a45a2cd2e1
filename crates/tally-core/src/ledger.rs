use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::error::{LedgerError, Result};
use crate::{Account, AccountId, Amount};

/// Registry owning every account.
///
/// Accounts keep their opening order and can never be removed, so an
/// [`AccountId`] stays valid for the lifetime of the ledger that issued it.
#[derive(Debug, Default, Clone)]
pub struct Ledger {
    accounts: IndexMap<String, Account>,
}

impl Ledger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new account with an initial balance.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::DuplicateAccount`] if the name is taken.
    pub fn open(&mut self, name: impl Into<String>, balance: Amount) -> Result<AccountId> {
        let name = name.into();
        let index = self.accounts.len();
        match self.accounts.entry(name) {
            Entry::Occupied(entry) => Err(LedgerError::DuplicateAccount(entry.key().clone())),
            Entry::Vacant(entry) => {
                let account = Account::new(entry.key().clone(), balance);
                entry.insert(account);
                Ok(AccountId::from_index(index))
            }
        }
    }

    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<AccountId> {
        self.accounts.get_index_of(name).map(AccountId::from_index)
    }

    #[must_use]
    pub fn get(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get_index(id.index()).map(|(_, account)| account)
    }

    #[must_use]
    pub fn get_mut(&mut self, id: AccountId) -> Option<&mut Account> {
        self.accounts.get_index_mut(id.index()).map(|(_, account)| account)
    }

    fn account_mut(&mut self, id: AccountId) -> Result<&mut Account> {
        self.get_mut(id).ok_or(LedgerError::UnknownAccount(id))
    }

    /// # Errors
    ///
    /// Returns [`LedgerError::UnknownAccount`] if `id` was not issued by this ledger.
    pub fn balance(&self, id: AccountId) -> Result<Amount> {
        self.get(id)
            .map(Account::balance)
            .ok_or(LedgerError::UnknownAccount(id))
    }

    /// # Errors
    ///
    /// Returns [`LedgerError::UnknownAccount`] for a foreign id and
    /// [`LedgerError::BalanceOverflow`] if the balance would not fit.
    pub fn credit(&mut self, id: AccountId, amount: Amount) -> Result<()> {
        self.account_mut(id)?.credit(amount)
    }

    /// Debits the account, returning whether the funds were available.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::UnknownAccount`] for a foreign id. Insufficient
    /// funds are reported as `Ok(false)`.
    pub fn debit(&mut self, id: AccountId, amount: Amount) -> Result<bool> {
        Ok(self.account_mut(id)?.debit(amount))
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Sum of all balances, `None` if it does not fit in an [`Amount`].
    #[must_use]
    pub fn total(&self) -> Option<Amount> {
        self.accounts
            .values()
            .try_fold(Amount::ZERO, |sum, account| sum.checked_add(account.balance()))
    }
}
