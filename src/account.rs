use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::statement::StatementRow;

/// Width of the zero-padded sequence part of an account number.
const SEQUENCE_DIGITS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountKind {
    Savings,
    HomeLoan,
}

impl AccountKind {
    pub fn prefix(self) -> &'static str {
        match self {
            AccountKind::Savings => "SV",
            AccountKind::HomeLoan => "LN",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "SV" => Some(AccountKind::Savings),
            "LN" => Some(AccountKind::HomeLoan),
            _ => None,
        }
    }
}

/// Account identifier, rendered as `SV-000001` or `LN-000001`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountNumber {
    kind: AccountKind,
    sequence: u32,
}

impl AccountNumber {
    pub fn new(kind: AccountKind, sequence: u32) -> Self {
        Self { kind, sequence }
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{:0width$}",
            self.kind.prefix(),
            self.sequence,
            width = SEQUENCE_DIGITS
        )
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("`{0}` is not a valid account number, expected `SV-######` or `LN-######`")]
pub struct InvalidAccountNumber(String);

impl FromStr for AccountNumber {
    type Err = InvalidAccountNumber;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidAccountNumber(s.to_string());
        let (prefix, digits) = s.split_once('-').ok_or_else(invalid)?;
        let kind = AccountKind::from_prefix(prefix).ok_or_else(invalid)?;
        if digits.len() != SEQUENCE_DIGITS || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let sequence = digits.parse().map_err(|_| invalid())?;
        if sequence == 0 {
            return Err(invalid());
        }
        Ok(Self { kind, sequence })
    }
}

impl Serialize for AccountNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AccountNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Insufficient funds on {account}: balance is {balance}, requested {requested}")]
pub struct InsufficientFunds {
    pub account: AccountNumber,
    pub balance: Decimal,
    pub requested: Decimal,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Crediting {amount} to {account} would overflow its balance of {balance}")]
pub struct BalanceOverflow {
    pub account: AccountNumber,
    pub balance: Decimal,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    number: AccountNumber,
    owner: String,
    balance: Decimal,
    opened_at: DateTime<Utc>,
    closed_at: Option<DateTime<Utc>>,
}

impl Account {
    pub fn new(number: AccountNumber, owner: impl Into<String>, opened_at: DateTime<Utc>) -> Self {
        Self {
            number,
            owner: owner.into(),
            balance: Decimal::ZERO,
            opened_at,
            closed_at: None,
        }
    }

    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn kind(&self) -> AccountKind {
        self.number.kind
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    pub fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.closed_at
    }

    /// Builds the row for crediting `amount`. Nothing changes until the row is applied.
    pub fn credit(
        &self,
        amount: Decimal,
        description: &str,
        date: DateTime<Utc>,
    ) -> Result<StatementRow, BalanceOverflow> {
        let balance = self.balance.checked_add(amount).ok_or(BalanceOverflow {
            account: self.number,
            balance: self.balance,
            amount,
        })?;
        Ok(StatementRow::new(
            self.number,
            amount,
            balance,
            date,
            description,
        ))
    }

    /// Builds the row for debiting `amount`, provided the balance covers it.
    pub fn debit(
        &self,
        amount: Decimal,
        description: &str,
        date: DateTime<Utc>,
    ) -> Result<StatementRow, InsufficientFunds> {
        if self.balance < amount {
            return Err(InsufficientFunds {
                account: self.number,
                balance: self.balance,
                requested: amount,
            });
        }
        Ok(StatementRow::new(
            self.number,
            -amount,
            self.balance - amount,
            date,
            description,
        ))
    }

    /// Rows are the source of truth, no more validation happens here.
    pub fn apply(&mut self, row: &StatementRow) {
        debug_assert_eq!(row.account(), self.number);
        self.balance += row.amount();
    }

    pub(crate) fn close(&mut self, closed_at: DateTime<Utc>) {
        self.closed_at = Some(closed_at);
    }
}
