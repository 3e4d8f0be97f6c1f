/// Accounts, their numbering and balance changes.
/// Balances are modified only by applying statement rows.
pub mod account;

/// Immutable records of account movements.
pub mod statement;

/// Ledger interface, plus "in memory" implementation.
/// Coordinates validation, numbering, the transaction log and interest.
pub mod ledger;

/// Where the ledger gets "now" from.
pub mod clock;

/// Interest rates and account numbering limits.
pub mod config;

/// Commands replayed by [`bin_utils`] against a [`ledger::Bank`].
pub mod command;

/// CSV batch driver. It lives in the library so integration tests can run it.
pub mod bin_utils;
