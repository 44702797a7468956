use serde::{Deserialize, Serialize};

use super::payment::{monthly_payment, total_over_term, validate_loan};
use super::schedule::{build_schedule, AmortizationWalk, PeriodRecord};
use crate::error::MortgageError;
use crate::types::{Money, Percent};
use crate::MortgageResult;

/// A fixed-rate loan: the three inputs every engine operation takes.
///
/// Deserialization runs the same checks as [`LoanTerms::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLoanTerms")]
pub struct LoanTerms {
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub term_months: u32,
}

#[derive(Deserialize)]
struct RawLoanTerms {
    principal: Money,
    annual_rate_percent: Percent,
    term_months: u32,
}

impl TryFrom<RawLoanTerms> for LoanTerms {
    type Error = MortgageError;

    fn try_from(raw: RawLoanTerms) -> MortgageResult<Self> {
        Self::new(raw.principal, raw.annual_rate_percent, raw.term_months)
    }
}

impl LoanTerms {
    /// Validated constructor.
    pub fn new(
        principal: Money,
        annual_rate_percent: Percent,
        term_months: u32,
    ) -> MortgageResult<Self> {
        validate_loan(principal, annual_rate_percent, term_months)?;
        Ok(Self {
            principal,
            annual_rate_percent,
            term_months,
        })
    }

    pub fn from_years(
        principal: Money,
        annual_rate_percent: Percent,
        term_years: u32,
    ) -> MortgageResult<Self> {
        let term_months = term_years
            .checked_mul(12)
            .ok_or_else(|| MortgageError::InvalidTerm {
                reason: format!("term of {term_years} years is too long"),
            })?;
        Self::new(principal, annual_rate_percent, term_months)
    }

    pub fn monthly_payment(&self) -> MortgageResult<Money> {
        monthly_payment(self.principal, self.annual_rate_percent, self.term_months)
    }

    /// Payment multiplied out over the whole term.
    pub fn total_paid(&self) -> MortgageResult<Money> {
        total_over_term(self.monthly_payment()?, self.term_months)
    }

    pub fn total_interest(&self) -> MortgageResult<Money> {
        Ok(self.total_paid()? - self.principal)
    }

    pub fn walk(&self) -> MortgageResult<AmortizationWalk> {
        AmortizationWalk::new(self.principal, self.annual_rate_percent, self.term_months)
    }

    /// Sampled display schedule.
    pub fn schedule(&self) -> MortgageResult<Vec<PeriodRecord>> {
        build_schedule(self.principal, self.annual_rate_percent, self.term_months)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_totals_for_25_year_loan() {
        let loan = LoanTerms::from_years(dec!(160000), dec!(3.0), 25).unwrap();
        assert_eq!(loan.term_months, 300);
        let total_paid = loan.total_paid().unwrap();
        let total_interest = loan.total_interest().unwrap();
        assert!((total_paid - dec!(227621.43)).abs() < dec!(0.01), "{total_paid}");
        assert!((total_interest - dec!(67621.43)).abs() < dec!(0.01), "{total_interest}");
    }

    #[test]
    fn test_walk_matches_schedule_sample() {
        let loan = LoanTerms::new(dec!(50000), dec!(5.0), 30).unwrap();
        let sampled: Vec<PeriodRecord> = loan.walk().unwrap().sampled().collect();
        assert_eq!(sampled, loan.schedule().unwrap());
    }

    #[test]
    fn test_invalid_terms_rejected() {
        assert!(matches!(
            LoanTerms::new(dec!(1000), dec!(3.0), 0),
            Err(MortgageError::InvalidTerm { .. })
        ));
        assert!(matches!(
            LoanTerms::from_years(dec!(-5), dec!(3.0), 10),
            Err(MortgageError::InvalidPrincipal { .. })
        ));
    }

    #[test]
    fn test_year_count_too_large_for_months_rejected() {
        let err = LoanTerms::from_years(dec!(100000), Decimal::ZERO, u32::MAX).unwrap_err();
        assert!(matches!(err, MortgageError::InvalidTerm { .. }));
        assert!(LoanTerms::from_years(dec!(100000), dec!(3.0), u32::MAX / 12).is_ok());
    }

    #[test]
    fn test_total_paid_overflow_is_an_error() {
        let loan = LoanTerms::new(Decimal::MAX, dec!(3.0), 120).unwrap();
        assert!(matches!(
            loan.total_paid(),
            Err(MortgageError::Overflow { .. })
        ));
        assert!(matches!(
            loan.total_interest(),
            Err(MortgageError::Overflow { .. })
        ));
    }

    #[test]
    fn test_deserialize_validates() {
        let loan: LoanTerms = serde_json::from_str(
            r#"{"principal": "160000", "annual_rate_percent": 3.0, "term_months": 300}"#,
        )
        .unwrap();
        assert_eq!(loan, LoanTerms::new(dec!(160000), dec!(3.0), 300).unwrap());

        let zero_term = serde_json::from_str::<LoanTerms>(
            r#"{"principal": 1000, "annual_rate_percent": 3.0, "term_months": 0}"#,
        );
        assert!(zero_term.is_err());
        let negative = serde_json::from_str::<LoanTerms>(
            r#"{"principal": -1, "annual_rate_percent": 3.0, "term_months": 12}"#,
        );
        assert!(negative.is_err());
    }
}
