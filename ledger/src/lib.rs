//! Accounts with balances, and transfers between accounts which are shared
//! across threads through [Exclusive] cells.
//!
//! ```rust
//! use exclusive::Exclusive;
//! use ledger::Account;
//!
//! let a = Exclusive::new(Account::new("A", 1000));
//! let b = Exclusive::new(Account::new("B", 1000));
//!
//! ledger::transfer_between(&a, &b, 600)?;
//! assert!(ledger::transfer_between(&a, &b, 600).is_err());
//!
//! assert_eq!(a.borrow().balance(), 400);
//! assert_eq!(b.borrow().balance(), 1600);
//! # Ok::<_, ledger::LedgerError>(())
//! ```

#![warn(missing_docs)]

use std::fmt;

use exclusive::Exclusive;
use thiserror::Error;


/// Errors raised by ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The account doesn't hold enough funds for the withdrawal.
    #[error("insufficient balance in account {account}: {balance} available, {amount} requested")]
    InsufficientBalance {
        /// The name of the account.
        account: String,
        /// The balance at the time of the withdrawal.
        balance: u64,
        /// The requested amount.
        amount: u64,
    },
    /// The deposit would overflow the balance of the account.
    #[error("deposit of {amount} overflows the balance of account {account}")]
    Overflow {
        /// The name of the account.
        account: String,
        /// The deposited amount.
        amount: u64,
    },
    /// The accounts could not be acquired.
    #[error("failed to acquire accounts")]
    Acquire(#[from] exclusive::Error),
}

/// The re-exported result type.
pub type Result<T, E = LedgerError> = ::std::result::Result<T, E>;

/// A named account holding a balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    name: String,
    balance: u64,
}

impl Account {
    /// Construct a new account with an opening balance.
    pub fn new<N>(name: N, balance: u64) -> Self
    where
        N: Into<String>,
    {
        Self {
            name: name.into(),
            balance,
        }
    }

    /// The name of the account.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current balance of the account.
    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Deposit `amount` into the account.
    pub fn deposit(&mut self, amount: u64) -> Result<()> {
        self.balance = self.credited(amount)?;
        Ok(())
    }

    /// Withdraw `amount` from the account. The balance is left untouched if
    /// it doesn't cover the amount.
    pub fn withdraw(&mut self, amount: u64) -> Result<()> {
        self.balance = self.debited(amount)?;
        Ok(())
    }

    fn credited(&self, amount: u64) -> Result<u64> {
        match self.balance.checked_add(amount) {
            Some(balance) => Ok(balance),
            None => Err(LedgerError::Overflow {
                account: self.name.clone(),
                amount,
            }),
        }
    }

    fn debited(&self, amount: u64) -> Result<u64> {
        match self.balance.checked_sub(amount) {
            Some(balance) => Ok(balance),
            None => Err(LedgerError::InsufficientBalance {
                account: self.name.clone(),
                balance: self.balance,
                amount,
            }),
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Account: {}", self.name)
    }
}

/// Move `amount` from one account to another.
///
/// Either both balances change or neither does.
pub fn transfer(from: &mut Account, to: &mut Account, amount: u64) -> Result<()> {
    let debited = from.debited(amount)?;
    let credited = to.credited(amount)?;
    from.balance = debited;
    to.balance = credited;
    Ok(())
}

/// Move `amount` between two shared accounts.
///
/// Both accounts are exclusively borrowed as one step for the duration of
/// the transfer, so concurrent transfers over the same accounts can't
/// deadlock or interleave. The accounts are released before any error is
/// returned.
pub fn transfer_between(
    from: &Exclusive<Account>,
    to: &Exclusive<Account>,
    amount: u64,
) -> Result<()> {
    let (mut from, mut to) = exclusive::acquire_pair_mut(from, to)?;

    if let Err(error) = transfer(&mut from, &mut to, amount) {
        tracing::warn!(from = from.name(), to = to.name(), amount, %error, "transfer failed");
        return Err(error);
    }

    tracing::info!(from = from.name(), to = to.name(), amount, "transfer completed");
    Ok(())
}
