use std::io::Read;

use chrono::{DateTime, Utc};
use csv::{DeserializeRecordsIntoIter, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    account::AccountNumber,
    command::{OperationFields, OperationKind},
};

#[derive(Debug, Deserialize)]
pub struct Operation {
    #[serde(rename = "type")]
    pub kind: OperationKind,
    pub account: Option<AccountNumber>,
    pub to: Option<AccountNumber>,
    pub owner: Option<String>,
    pub amount: Option<Decimal>,
    pub date: DateTime<Utc>,
    pub description: Option<String>,
}

impl Operation {
    pub fn fields(self) -> OperationFields {
        OperationFields {
            account: self.account,
            to: self.to,
            owner: self.owner,
            amount: self.amount,
            description: self.description,
        }
    }
}

/// Parses a ledger operation script in CSV format.
///
/// Rows that cannot be deserialized are yielded as errors, together with their line.
pub struct CsvOperationParser<R> {
    iter: DeserializeRecordsIntoIter<R, Operation>,
}

impl<R> CsvOperationParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            iter: reader.into_deserialize(),
        }
    }
}

impl<R> Iterator for CsvOperationParser<R>
where
    R: Read,
{
    type Item = (u64, Result<Operation, csv::Error>);

    fn next(&mut self) -> Option<Self::Item> {
        let curr_line = self.iter.reader().position().line();
        self.iter.next().map(|row| (curr_line, row))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::account::AccountKind;

    use super::*;

    #[test]
    fn parse_rows() {
        let input = "\
type,account,to,owner,amount,date,description
open_savings,,,Alice,,2024-01-01T09:00:00Z,
transfer, SV-000001 ,LN-000002,,12.5,2024-01-02T09:00:00Z,rent
deposit,XX-1,,,1,2024-01-02T09:00:00Z,
";
        let rows: Vec<_> = CsvOperationParser::new(input.as_bytes()).collect();
        assert_eq!(rows.len(), 3);

        let (_, open) = &rows[0];
        let open = open.as_ref().unwrap();
        assert_eq!(open.kind, OperationKind::OpenSavings);
        assert_eq!(open.owner.as_deref(), Some("Alice"));
        assert!(open.account.is_none());
        assert!(open.amount.is_none());

        let (_, transfer) = &rows[1];
        let transfer = transfer.as_ref().unwrap();
        assert_eq!(transfer.kind, OperationKind::Transfer);
        assert_eq!(
            transfer.account,
            Some(AccountNumber::new(AccountKind::Savings, 1))
        );
        assert_eq!(transfer.to, Some(AccountNumber::new(AccountKind::HomeLoan, 2)));
        assert_eq!(transfer.amount, Some(dec!(12.5)));
        assert_eq!(transfer.description.as_deref(), Some("rent"));

        assert!(rows[2].1.is_err());
    }
}
