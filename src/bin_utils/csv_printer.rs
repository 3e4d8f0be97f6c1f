use std::io::Write;

use anyhow::Context;
use chrono::{DateTime, Utc};
use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::account::{Account, AccountNumber};

#[derive(Debug, Serialize)]
pub struct AccountRecord {
    pub account: AccountNumber,
    pub owner: String,
    pub balance: Decimal,
    pub opened: DateTime<Utc>,
    pub closed: Option<DateTime<Utc>>,
}

impl From<&Account> for AccountRecord {
    fn from(acc: &Account) -> Self {
        Self {
            account: acc.number(),
            owner: acc.owner().to_string(),
            balance: acc.balance(),
            opened: acc.opened_at(),
            closed: acc.closed_at(),
        }
    }
}

pub fn print_accounts<W>(
    output: &mut W,
    accounts: impl Iterator<Item = AccountRecord>,
) -> anyhow::Result<()>
where
    W: Write,
{
    let mut writer = Writer::from_writer(output);
    for acc in accounts {
        writer
            .serialize(&acc)
            .with_context(|| format!("Failed to write account {} to CSV", acc.account))?;
    }
    writer.flush().context("Failed to flush CSV writer")?;
    Ok(())
}
