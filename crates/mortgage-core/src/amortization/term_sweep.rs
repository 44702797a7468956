use serde::{Deserialize, Serialize};
use tracing::debug;

use super::payment::{monthly_payment, total_over_term, validate_principal_and_rate};
use crate::error::MortgageError;
use crate::types::{Money, Percent};
use crate::MortgageResult;

/// Loan terms, in years, compared by default.
pub const DEFAULT_COMPARISON_TERMS: [u32; 7] = [10, 15, 20, 25, 30, 35, 40];

/// Closed-form cost of the same loan over one candidate term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermComparisonRow {
    pub term_years: u32,
    pub monthly_payment: Money,
    pub total_paid: Money,
    pub total_interest: Money,
}

/// Price the loan once per candidate term, preserving candidate order.
///
/// Every candidate is validated before any row is produced.
pub fn compare_terms(
    principal: Money,
    annual_rate_percent: Percent,
    candidate_term_years: &[u32],
) -> MortgageResult<Vec<TermComparisonRow>> {
    validate_principal_and_rate(principal, annual_rate_percent)?;

    if candidate_term_years.is_empty() {
        return Err(MortgageError::InvalidTerm {
            reason: "at least one candidate term is required".into(),
        });
    }

    let term_months: Vec<u32> = candidate_term_years
        .iter()
        .map(|&years| {
            if years == 0 {
                return Err(MortgageError::InvalidTerm {
                    reason: "candidate terms must be positive".into(),
                });
            }
            years.checked_mul(12).ok_or_else(|| MortgageError::InvalidTerm {
                reason: format!("candidate term of {years} years is too long"),
            })
        })
        .collect::<MortgageResult<_>>()?;

    let rows = candidate_term_years
        .iter()
        .zip(term_months)
        .map(|(&term_years, months)| {
            let payment = monthly_payment(principal, annual_rate_percent, months)?;
            let total_paid = total_over_term(payment, months)?;
            Ok(TermComparisonRow {
                term_years,
                monthly_payment: payment,
                total_paid,
                total_interest: total_paid - principal,
            })
        })
        .collect::<MortgageResult<Vec<_>>>()?;

    debug!(candidates = rows.len(), "compared loan terms");
    Ok(rows)
}

/// [`compare_terms`] over [`DEFAULT_COMPARISON_TERMS`].
pub fn compare_default_terms(
    principal: Money,
    annual_rate_percent: Percent,
) -> MortgageResult<Vec<TermComparisonRow>> {
    compare_terms(principal, annual_rate_percent, &DEFAULT_COMPARISON_TERMS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_ten_vs_thirty_years() {
        let rows = compare_terms(dec!(100000), dec!(3.0), &[10, 30]).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].monthly_payment > rows[1].monthly_payment);
        assert!(rows[0].total_interest < rows[1].total_interest);
        // 10y ≈ 965.61/month, 30y ≈ 421.60/month
        assert!((rows[0].monthly_payment - dec!(965.61)).abs() < dec!(0.01));
        assert!((rows[1].monthly_payment - dec!(421.60)).abs() < dec!(0.01));
    }

    #[test]
    fn test_order_follows_candidates() {
        let rows = compare_terms(dec!(100000), dec!(3.0), &[30, 5, 20, 5]).unwrap();
        let terms: Vec<u32> = rows.iter().map(|r| r.term_years).collect();
        assert_eq!(terms, vec![30, 5, 20, 5]);
        assert_eq!(rows[1], rows[3]);
    }

    #[test]
    fn test_totals_derived_from_payment() {
        let rows = compare_terms(dec!(150000), dec!(4.0), &[25]).unwrap();
        let row = &rows[0];
        assert_eq!(row.total_paid, row.monthly_payment * dec!(300));
        assert_eq!(row.total_interest, row.total_paid - dec!(150000));
    }

    #[test]
    fn test_zero_rate_has_no_interest() {
        let rows = compare_terms(dec!(120000), Decimal::ZERO, &[10, 20]).unwrap();
        for row in rows {
            assert_eq!(row.total_paid, dec!(120000));
            assert_eq!(row.total_interest, Decimal::ZERO);
        }
    }

    #[test]
    fn test_default_terms() {
        let rows = compare_default_terms(dec!(200000), dec!(3.5)).unwrap();
        let terms: Vec<u32> = rows.iter().map(|r| r.term_years).collect();
        assert_eq!(terms, DEFAULT_COMPARISON_TERMS.to_vec());
        for pair in rows.windows(2) {
            assert!(pair[0].monthly_payment > pair[1].monthly_payment);
            assert!(pair[0].total_interest < pair[1].total_interest);
        }
    }

    #[test]
    fn test_empty_candidates_rejected() {
        let err = compare_terms(dec!(100000), dec!(3.0), &[]).unwrap_err();
        assert!(matches!(err, MortgageError::InvalidTerm { .. }));
    }

    #[test]
    fn test_zero_candidate_rejected() {
        let err = compare_terms(dec!(100000), dec!(3.0), &[10, 0, 30]).unwrap_err();
        assert!(matches!(err, MortgageError::InvalidTerm { .. }));
    }

    #[test]
    fn test_overflowing_total_is_an_error() {
        let err = compare_terms(Decimal::MAX, dec!(3.0), &[10]).unwrap_err();
        assert!(matches!(err, MortgageError::Overflow { .. }));
    }

    #[test]
    fn test_negative_rate_rejected_before_terms() {
        let err = compare_terms(dec!(100000), dec!(-1), &[]).unwrap_err();
        assert!(matches!(err, MortgageError::InvalidRate { .. }));
    }
}
