use rust_decimal::Decimal;

/// Highest sequence limit that still fits the six digits of an account number.
pub const MAX_SEQUENCE_LIMIT: u32 = 999_999;

/// Yearly interest rates used by simple interest accrual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterestRates {
    pub home_loan: Decimal,
    /// 6% monthly, i.e. 72% a year.
    pub savings: Decimal,
}

impl Default for InterestRates {
    fn default() -> Self {
        Self {
            home_loan: Decimal::new(399, 4),
            savings: Decimal::new(6, 2) * Decimal::from(12),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerConfig {
    pub rates: InterestRates,
    /// Once a sequence counter reaches this value, no more accounts of that kind can be opened.
    /// Values above [`MAX_SEQUENCE_LIMIT`] are clamped by the ledger.
    pub sequence_limit: u32,
}

impl LedgerConfig {
    pub fn clamped(self) -> Self {
        Self {
            sequence_limit: self.sequence_limit.min(MAX_SEQUENCE_LIMIT),
            ..self
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            rates: InterestRates::default(),
            sequence_limit: MAX_SEQUENCE_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn default_rates() {
        let config = LedgerConfig::default();
        assert_eq!(config.rates.home_loan, dec!(0.0399));
        assert_eq!(config.rates.savings, dec!(0.72));
        assert_eq!(config.sequence_limit, 999_999);
    }

    #[test]
    fn clamp_sequence_limit() {
        let config = LedgerConfig {
            sequence_limit: u32::MAX,
            ..Default::default()
        };
        assert_eq!(config.clamped().sequence_limit, MAX_SEQUENCE_LIMIT);

        let small = LedgerConfig {
            sequence_limit: 3,
            ..Default::default()
        };
        assert_eq!(small.clamped(), small);
    }
}
