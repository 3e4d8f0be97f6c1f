use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::{
    account::{Account, AccountKind, AccountNumber},
    clock::{Clock, SystemClock},
    config::LedgerConfig,
    statement::StatementRow,
};

use super::{Bank, LedgerError, TemporalError, ValidationError};

pub const CLOSING_WITHDRAWAL: &str = "closing withdrawal";

const MINI_STATEMENT_LEN: usize = 5;
const DAYS_PER_YEAR: i64 = 365;

pub struct InMemoryLedger<C = SystemClock> {
    config: LedgerConfig,
    clock: C,
    accounts: Vec<Account>,
    closed_accounts: Vec<Account>,
    transaction_log: Vec<StatementRow>,
    next_savings: u32,
    next_home_loan: u32,
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl<C: Clock> InMemoryLedger<C> {
    pub fn new(clock: C) -> Self {
        Self::with_config(LedgerConfig::default(), clock)
    }

    pub fn with_config(config: LedgerConfig, clock: C) -> Self {
        Self {
            config: config.clamped(),
            clock,
            accounts: Vec::new(),
            closed_accounts: Vec::new(),
            transaction_log: Vec::new(),
            next_savings: 1,
            next_home_loan: 1,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Open accounts, in creation order.
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Closed accounts, in closing order.
    pub fn closed_accounts(&self) -> &[Account] {
        &self.closed_accounts
    }

    /// Every recorded row, in the order it was appended.
    pub fn transaction_log(&self) -> &[StatementRow] {
        &self.transaction_log
    }

    pub fn account(&self, number: AccountNumber) -> Option<&Account> {
        self.accounts.iter().find(|acc| acc.number() == number)
    }

    fn position(&self, number: AccountNumber) -> Result<usize, LedgerError> {
        self.accounts
            .iter()
            .position(|acc| acc.number() == number)
            .ok_or(LedgerError::NotFound(number))
    }

    fn rows_of(&self, number: AccountNumber) -> impl DoubleEndedIterator<Item = &StatementRow> {
        self.transaction_log
            .iter()
            .filter(move |row| row.account() == number)
    }

    fn open_account(
        &mut self,
        kind: AccountKind,
        owner: &str,
        open_date: DateTime<Utc>,
    ) -> Result<&Account, LedgerError> {
        if owner.trim().is_empty() {
            return Err(ValidationError::EmptyOwnerName.into());
        }
        ensure_not_future(open_date, self.clock.now())?;

        let counter = match kind {
            AccountKind::Savings => &mut self.next_savings,
            AccountKind::HomeLoan => &mut self.next_home_loan,
        };
        if *counter >= self.config.sequence_limit {
            return Err(LedgerError::CapacityExhausted(kind));
        }
        let number = AccountNumber::new(kind, *counter);
        *counter += 1;

        info!(account = %number, owner, "Account opened");
        let idx = self.accounts.len();
        self.accounts.push(Account::new(number, owner, open_date));
        Ok(&self.accounts[idx])
    }

    fn record(&mut self, idx: usize, row: StatementRow) {
        let account = &mut self.accounts[idx];
        account.apply(&row);
        debug!(
            account = %row.account(),
            amount = %row.amount(),
            balance = %row.balance(),
            "Statement row recorded"
        );
        self.transaction_log.push(row);
    }
}

fn ensure_positive(amount: Decimal) -> Result<(), ValidationError> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount { amount });
    }
    Ok(())
}

fn ensure_not_future(date: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), TemporalError> {
    if date > now {
        return Err(TemporalError::FutureDate { date, now });
    }
    Ok(())
}

impl<C: Clock> Bank for InMemoryLedger<C> {
    fn open_savings_account(
        &mut self,
        owner: &str,
        open_date: DateTime<Utc>,
    ) -> Result<&Account, LedgerError> {
        self.open_account(AccountKind::Savings, owner, open_date)
    }

    fn open_home_loan_account(
        &mut self,
        owner: &str,
        open_date: DateTime<Utc>,
    ) -> Result<&Account, LedgerError> {
        self.open_account(AccountKind::HomeLoan, owner, open_date)
    }

    fn deposit(
        &mut self,
        account: AccountNumber,
        amount: Decimal,
        description: &str,
        date: DateTime<Utc>,
    ) -> Result<(), LedgerError> {
        ensure_positive(amount)?;
        ensure_not_future(date, self.clock.now())?;
        let idx = self.position(account)?;

        let row = self.accounts[idx].credit(amount, description, date)?;
        self.record(idx, row);
        Ok(())
    }

    fn withdraw(
        &mut self,
        account: AccountNumber,
        amount: Decimal,
        description: &str,
        date: DateTime<Utc>,
    ) -> Result<(), LedgerError> {
        let now = self.clock.now();
        let idx = self.position(account)?;
        ensure_positive(amount)?;
        let row = self.accounts[idx].debit(amount, description, date)?;
        ensure_not_future(date, now)?;

        self.record(idx, row);
        Ok(())
    }

    fn transfer(
        &mut self,
        from: AccountNumber,
        to: AccountNumber,
        amount: Decimal,
        description: &str,
        date: DateTime<Utc>,
    ) -> Result<(), LedgerError> {
        let now = self.clock.now();
        let from_idx = self.position(from)?;
        ensure_positive(amount)?;
        let debit = self.accounts[from_idx].debit(amount, description, date)?;
        ensure_not_future(date, now)?;
        let to_idx = self.position(to)?;
        if from == to {
            return Err(ValidationError::SameAccount(from).into());
        }
        let credit = self.accounts[to_idx].credit(amount, description, date)?;

        self.record(from_idx, debit);
        self.record(to_idx, credit);
        Ok(())
    }

    fn balance(&self, account: AccountNumber) -> Result<Decimal, LedgerError> {
        let idx = self.position(account)?;
        Ok(self.accounts[idx].balance())
    }

    fn mini_statement(&self, account: AccountNumber) -> Vec<&StatementRow> {
        if self.position(account).is_err() {
            return Vec::new();
        }
        // newest insertion first, so the stable sort breaks date ties the same way
        let mut rows: Vec<_> = self.rows_of(account).rev().collect();
        rows.sort_by(|a, b| b.date().cmp(&a.date()));
        rows.truncate(MINI_STATEMENT_LEN);
        rows
    }

    fn interest_to_date(
        &self,
        account: AccountNumber,
        to_date: DateTime<Utc>,
    ) -> Result<Decimal, LedgerError> {
        let idx = self.position(account)?;
        let acc = &self.accounts[idx];
        let last_statement = self
            .rows_of(account)
            .next_back()
            .map(StatementRow::date)
            .unwrap_or(acc.opened_at());
        if to_date <= last_statement {
            return Err(TemporalError::NotAfterLastStatement {
                to_date,
                last_statement,
            }
            .into());
        }

        let days = Decimal::from((to_date - last_statement).num_days());
        let rate = match acc.kind() {
            AccountKind::HomeLoan => self.config.rates.home_loan,
            AccountKind::Savings => self.config.rates.savings,
        };
        (days * rate)
            .checked_div(Decimal::from(DAYS_PER_YEAR))
            .and_then(|per_unit| per_unit.checked_mul(acc.balance()))
            .ok_or(LedgerError::InterestOverflow(account))
    }

    fn close_account(
        &mut self,
        account: AccountNumber,
        close_date: DateTime<Utc>,
    ) -> Result<Vec<&StatementRow>, LedgerError> {
        let idx = self.position(account)?;
        ensure_not_future(close_date, self.clock.now())?;

        let balance = self.accounts[idx].balance();
        if balance > Decimal::ZERO {
            let row = self.accounts[idx].debit(balance, CLOSING_WITHDRAWAL, close_date)?;
            self.record(idx, row);
        }
        let mut closed = self.accounts.remove(idx);
        closed.close(close_date);
        info!(account = %account, "Account closed");
        self.closed_accounts.push(closed);

        let mut rows: Vec<_> = self.rows_of(account).collect();
        rows.sort_by_key(|row| row.date());
        Ok(rows)
    }
}
