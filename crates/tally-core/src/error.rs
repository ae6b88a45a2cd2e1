use thiserror::Error;

use crate::{AccountId, Amount};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("unknown account {0}")]
    UnknownAccount(AccountId),

    #[error("account '{0}' already exists")]
    DuplicateAccount(String),

    #[error("crediting {amount} to account '{account}' would overflow its balance of {balance}")]
    BalanceOverflow {
        account: String,
        balance: Amount,
        amount: Amount,
    },
}

pub type Result<T> = std::result::Result<T, LedgerError>;
