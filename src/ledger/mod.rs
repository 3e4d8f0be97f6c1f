use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    account::{Account, AccountKind, AccountNumber, BalanceOverflow, InsufficientFunds},
    statement::StatementRow,
};

pub mod in_memory_ledger;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Owner name must not be empty")]
    EmptyOwnerName,
    #[error("Amount must be greater than zero, got {amount}")]
    NonPositiveAmount { amount: Decimal },
    #[error("Cannot transfer from {0} to itself")]
    SameAccount(AccountNumber),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Date {date} is in the future (now is {now})")]
    FutureDate {
        date: DateTime<Utc>,
        now: DateTime<Utc>,
    },
    #[error("Interest date {to_date} must be after the last statement date {last_statement}")]
    NotAfterLastStatement {
        to_date: DateTime<Utc>,
        last_statement: DateTime<Utc>,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Temporal(#[from] TemporalError),
    #[error("Account {0} is not open")]
    NotFound(AccountNumber),
    #[error(transparent)]
    InsufficientFunds(#[from] InsufficientFunds),
    #[error(transparent)]
    BalanceOverflow(#[from] BalanceOverflow),
    #[error("Interest on {0} does not fit in a decimal")]
    InterestOverflow(AccountNumber),
    #[error("No account numbers left for {0:?} accounts")]
    CapacityExhausted(AccountKind),
}

/// Ledger interface, implemented in memory by [`in_memory_ledger::InMemoryLedger`].
///
/// Operations either fully apply or leave the ledger untouched.
pub trait Bank {
    fn open_savings_account(
        &mut self,
        owner: &str,
        open_date: DateTime<Utc>,
    ) -> Result<&Account, LedgerError>;

    fn open_home_loan_account(
        &mut self,
        owner: &str,
        open_date: DateTime<Utc>,
    ) -> Result<&Account, LedgerError>;

    fn deposit(
        &mut self,
        account: AccountNumber,
        amount: Decimal,
        description: &str,
        date: DateTime<Utc>,
    ) -> Result<(), LedgerError>;

    fn withdraw(
        &mut self,
        account: AccountNumber,
        amount: Decimal,
        description: &str,
        date: DateTime<Utc>,
    ) -> Result<(), LedgerError>;

    fn transfer(
        &mut self,
        from: AccountNumber,
        to: AccountNumber,
        amount: Decimal,
        description: &str,
        date: DateTime<Utc>,
    ) -> Result<(), LedgerError>;

    fn balance(&self, account: AccountNumber) -> Result<Decimal, LedgerError>;

    /// Last five rows of an open account, newest first.
    fn mini_statement(&self, account: AccountNumber) -> Vec<&StatementRow>;

    /// Simple interest accrued from the last statement up to `to_date`. Nothing is posted.
    fn interest_to_date(
        &self,
        account: AccountNumber,
        to_date: DateTime<Utc>,
    ) -> Result<Decimal, LedgerError>;

    /// Withdraws the remaining balance, deactivates the account and returns its
    /// full history, oldest first.
    fn close_account(
        &mut self,
        account: AccountNumber,
        close_date: DateTime<Utc>,
    ) -> Result<Vec<&StatementRow>, LedgerError>;
}
