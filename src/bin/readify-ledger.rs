use std::fs::File;

use anyhow::{Context, Result};
use readify_ledger::{bin_utils::Service, clock::SystemClock};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let filename = std::env::args()
        .nth(1)
        .context("Expected an operation script as the first argument")?;
    let file = File::open(&filename).with_context(|| format!("Failed to open `{filename}`"))?;

    let service = Service {
        input: file,
        output: &mut std::io::stdout(),
        clock: SystemClock,
        error_printer: Box::new(|line, err| {
            match err {
                readify_ledger::bin_utils::OperationError::LedgerErr(_) => {
                    // business rejections are already logged, they don't abort the run
                }
                err => eprintln!("Error at line {line}: {err}"),
            }
        }),
    };
    service.run()
}
