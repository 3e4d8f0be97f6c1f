use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::account::AccountNumber;

/// One recorded movement on an account. Credits carry a positive amount,
/// debits a negative one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementRow {
    account: AccountNumber,
    amount: Decimal,
    balance: Decimal,
    date: DateTime<Utc>,
    description: String,
}

impl StatementRow {
    pub fn new(
        account: AccountNumber,
        amount: Decimal,
        balance: Decimal,
        date: DateTime<Utc>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            account,
            amount,
            balance,
            date,
            description: description.into(),
        }
    }

    pub fn account(&self) -> AccountNumber {
        self.account
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Balance of the account right after this movement.
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}
