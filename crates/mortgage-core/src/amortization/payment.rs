//! Fixed-rate annuity payment.
//!
//! `payment = P * r(1+r)^n / ((1+r)^n - 1)` with `r = annual% / 100 / 12`.
//! A zero rate degenerates to straight-line repayment `P / n`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::error::MortgageError;
use crate::types::{Money, Percent, Rate};
use crate::MortgageResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Convert an annual percentage (3.0 = 3%) into a monthly fractional rate.
pub fn monthly_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / dec!(100) / MONTHS_PER_YEAR
}

/// Fixed monthly payment that fully amortises `principal` over `term_months`.
///
/// Fails with `InvalidPrincipal`, `InvalidRate` or `InvalidTerm` rather than
/// returning a non-finite result. A zero principal pays zero.
pub fn monthly_payment(
    principal: Money,
    annual_rate_percent: Percent,
    term_months: u32,
) -> MortgageResult<Money> {
    validate_loan(principal, annual_rate_percent, term_months)?;

    if principal.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let rate = monthly_rate(annual_rate_percent);
    let months = Decimal::from(term_months);

    if rate.is_zero() {
        return Ok(principal / months);
    }

    let compound = compound_factor(rate, term_months)?;
    let denominator = compound - Decimal::ONE;

    // Rates below decimal resolution compound to exactly 1.
    if denominator.is_zero() {
        return Ok(principal / months);
    }

    let payment = principal
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(compound))
        .and_then(|v| v.checked_div(denominator))
        .ok_or_else(|| MortgageError::Overflow {
            context: "annuity payment".into(),
        })?;

    debug!(
        %principal,
        %annual_rate_percent,
        term_months,
        %payment,
        "computed monthly payment"
    );

    Ok(payment)
}

/// `(1 + r)^n` by repeated multiplication, which keeps full decimal precision
/// for the month counts a mortgage uses.
pub(crate) fn compound_factor(rate: Rate, periods: u32) -> MortgageResult<Decimal> {
    let base = Decimal::ONE + rate;
    let mut compound = Decimal::ONE;
    for _ in 0..periods {
        compound = compound
            .checked_mul(base)
            .ok_or_else(|| MortgageError::Overflow {
                context: format!("compounding {periods} periods at monthly rate {rate}"),
            })?;
    }
    Ok(compound)
}

/// `payment * term_months`: everything repaid over the loan.
pub(crate) fn total_over_term(payment: Money, term_months: u32) -> MortgageResult<Money> {
    payment
        .checked_mul(Decimal::from(term_months))
        .ok_or_else(|| MortgageError::Overflow {
            context: format!("total of {term_months} payments of {payment}"),
        })
}

/// Contract checks shared by every loan-level operation.
pub(crate) fn validate_loan(
    principal: Money,
    annual_rate_percent: Percent,
    term_months: u32,
) -> MortgageResult<()> {
    validate_principal_and_rate(principal, annual_rate_percent)?;
    if term_months == 0 {
        return Err(MortgageError::InvalidTerm {
            reason: "term must be at least one month".into(),
        });
    }
    Ok(())
}

pub(crate) fn validate_principal_and_rate(
    principal: Money,
    annual_rate_percent: Percent,
) -> MortgageResult<()> {
    if principal < Decimal::ZERO {
        return Err(MortgageError::InvalidPrincipal { value: principal });
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(MortgageError::InvalidRate {
            value: annual_rate_percent,
        });
    }
    Ok(())
}
