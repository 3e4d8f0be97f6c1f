use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    account::AccountNumber,
    ledger::{Bank, LedgerError},
};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    OpenSavings,
    OpenHomeLoan,
    Deposit,
    Withdrawal,
    Transfer,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerCommand {
    OpenSavings {
        owner: String,
        date: DateTime<Utc>,
    },
    OpenHomeLoan {
        owner: String,
        date: DateTime<Utc>,
    },
    Deposit {
        account: AccountNumber,
        amount: Decimal,
        description: String,
        date: DateTime<Utc>,
    },
    Withdrawal {
        account: AccountNumber,
        amount: Decimal,
        description: String,
        date: DateTime<Utc>,
    },
    Transfer {
        from: AccountNumber,
        to: AccountNumber,
        amount: Decimal,
        description: String,
        date: DateTime<Utc>,
    },
    Close {
        account: AccountNumber,
        date: DateTime<Utc>,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Account is required for {kind:?}")]
    AccountRequired { kind: OperationKind },
    #[error("Destination account is required for {kind:?}")]
    DestinationRequired { kind: OperationKind },
    #[error("Owner is required for {kind:?}")]
    OwnerRequired { kind: OperationKind },
    #[error("Amount is required for {kind:?}")]
    AmountRequired { kind: OperationKind },
}

/// Raw fields of one operation, as they come from the input.
#[derive(Debug, Clone, Default)]
pub struct OperationFields {
    pub account: Option<AccountNumber>,
    pub to: Option<AccountNumber>,
    pub owner: Option<String>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
}

impl LedgerCommand {
    pub fn parse_command(
        kind: OperationKind,
        date: DateTime<Utc>,
        fields: OperationFields,
    ) -> Result<Self, CommandError> {
        let description = fields.description.unwrap_or_default();
        match kind {
            OperationKind::OpenSavings => Ok(Self::OpenSavings {
                owner: fields.owner.ok_or(CommandError::OwnerRequired { kind })?,
                date,
            }),
            OperationKind::OpenHomeLoan => Ok(Self::OpenHomeLoan {
                owner: fields.owner.ok_or(CommandError::OwnerRequired { kind })?,
                date,
            }),
            OperationKind::Deposit => Ok(Self::Deposit {
                account: fields.account.ok_or(CommandError::AccountRequired { kind })?,
                amount: fields.amount.ok_or(CommandError::AmountRequired { kind })?,
                description,
                date,
            }),
            OperationKind::Withdrawal => Ok(Self::Withdrawal {
                account: fields.account.ok_or(CommandError::AccountRequired { kind })?,
                amount: fields.amount.ok_or(CommandError::AmountRequired { kind })?,
                description,
                date,
            }),
            OperationKind::Transfer => Ok(Self::Transfer {
                from: fields.account.ok_or(CommandError::AccountRequired { kind })?,
                to: fields.to.ok_or(CommandError::DestinationRequired { kind })?,
                amount: fields.amount.ok_or(CommandError::AmountRequired { kind })?,
                description,
                date,
            }),
            OperationKind::Close => Ok(Self::Close {
                account: fields.account.ok_or(CommandError::AccountRequired { kind })?,
                date,
            }),
        }
    }

    pub fn execute<B: Bank>(self, bank: &mut B) -> Result<(), LedgerError> {
        match self {
            Self::OpenSavings { owner, date } => {
                bank.open_savings_account(&owner, date)?;
            }
            Self::OpenHomeLoan { owner, date } => {
                bank.open_home_loan_account(&owner, date)?;
            }
            Self::Deposit {
                account,
                amount,
                description,
                date,
            } => bank.deposit(account, amount, &description, date)?,
            Self::Withdrawal {
                account,
                amount,
                description,
                date,
            } => bank.withdraw(account, amount, &description, date)?,
            Self::Transfer {
                from,
                to,
                amount,
                description,
                date,
            } => bank.transfer(from, to, amount, &description, date)?,
            Self::Close { account, date } => {
                bank.close_account(account, date)?;
            }
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    use crate::{account::AccountKind, clock::FixedClock, ledger::in_memory_ledger::InMemoryLedger};

    use super::*;

    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn parse_commands() {
        let sv1 = AccountNumber::new(AccountKind::Savings, 1);
        let cmd = LedgerCommand::parse_command(
            OperationKind::Deposit,
            date(),
            OperationFields {
                account: Some(sv1),
                amount: Some(dec!(5)),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(
            cmd,
            LedgerCommand::Deposit {
                account: sv1,
                amount: dec!(5),
                description: String::new(),
                date: date(),
            }
        );

        let err = LedgerCommand::parse_command(
            OperationKind::Transfer,
            date(),
            OperationFields {
                account: Some(sv1),
                amount: Some(dec!(5)),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(
            err,
            CommandError::DestinationRequired {
                kind: OperationKind::Transfer
            }
        );

        let err = LedgerCommand::parse_command(
            OperationKind::OpenHomeLoan,
            date(),
            OperationFields::default(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Owner is required for OpenHomeLoan");
    }

    #[test]
    fn execute_commands() {
        let mut ledger = InMemoryLedger::new(FixedClock(date()));
        let sv1 = AccountNumber::new(AccountKind::Savings, 1);

        LedgerCommand::OpenSavings {
            owner: "Alice".to_string(),
            date: date(),
        }
        .execute(&mut ledger)
        .unwrap();
        LedgerCommand::Deposit {
            account: sv1,
            amount: dec!(12),
            description: "cash".to_string(),
            date: date(),
        }
        .execute(&mut ledger)
        .unwrap();
        assert_eq!(ledger.balance(sv1).unwrap(), dec!(12));

        let err = LedgerCommand::Withdrawal {
            account: sv1,
            amount: dec!(13),
            description: "cash".to_string(),
            date: date(),
        }
        .execute(&mut ledger)
        .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientFunds(_)));

        LedgerCommand::Close {
            account: sv1,
            date: date(),
        }
        .execute(&mut ledger)
        .unwrap();
        assert_eq!(ledger.closed_accounts().len(), 1);
    }
}
