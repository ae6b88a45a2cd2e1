//! Resource model for tally: amounts, accounts and the ledger that owns them.
//!
//! Balances only change through [`Account::credit`] and [`Account::debit`],
//! reached via [`Ledger::credit`], [`Ledger::debit`] or [`Ledger::get_mut`].
//! Commands refer to accounts by [`AccountId`] and borrow the ledger for the
//! duration of each call.

mod account;
mod amount;
pub mod error;
mod ledger;

pub use account::{Account, AccountId};
pub use amount::Amount;
pub use error::*;
pub use ledger::Ledger;
