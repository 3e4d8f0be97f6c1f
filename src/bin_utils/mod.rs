//! Batch driver that replays a CSV operation script against an in-memory ledger
//! and prints the resulting accounts. It owns all parsing and formatting, the
//! ledger itself knows nothing about CSV.

use std::io::{Read, Write};

use anyhow::Result;
use thiserror::Error;
use tracing::warn;

use crate::{
    clock::Clock,
    command::{CommandError, LedgerCommand},
    ledger::{LedgerError, in_memory_ledger::InMemoryLedger},
};
use csv_parser::CsvOperationParser;
use csv_printer::{AccountRecord, print_accounts};
pub mod csv_parser;
pub mod csv_printer;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("Malformed row: {0}")]
    MalformedRow(#[from] csv::Error),
    #[error(transparent)]
    CommandErr(#[from] CommandError),
    #[error(transparent)]
    LedgerErr(#[from] LedgerError),
}

pub struct Service<'w, R, W: 'w, C> {
    pub input: R,
    pub output: &'w mut W,
    pub clock: C,
    pub error_printer: Box<dyn FnMut(u64, OperationError)>,
}

impl<'w, R, W, C> Service<'w, R, W, C>
where
    R: Read,
    W: Write + 'w,
    C: Clock,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvOperationParser::new(self.input);

        let mut ledger = InMemoryLedger::new(self.clock);

        for (line, row) in parser {
            if let Err(err) = process_row(&mut ledger, row) {
                warn!(line, error = %err, "Operation rejected");
                (self.error_printer)(line, err);
            }
        }

        print_accounts(
            self.output,
            ledger
                .accounts()
                .iter()
                .chain(ledger.closed_accounts())
                .map(AccountRecord::from),
        )
    }
}

fn process_row<C: Clock>(
    ledger: &mut InMemoryLedger<C>,
    row: Result<csv_parser::Operation, csv::Error>,
) -> Result<(), OperationError> {
    let operation = row?;
    let kind = operation.kind;
    let date = operation.date;
    let command = LedgerCommand::parse_command(kind, date, operation.fields())?;
    command.execute(ledger)?;
    Ok(())
}
