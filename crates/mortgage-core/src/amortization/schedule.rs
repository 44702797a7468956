//! Monthly amortization ledger.
//!
//! [`AmortizationWalk`] yields every period of the loan lazily. The display
//! schedule returned by [`build_schedule`] is a deliberately lossy sample of
//! that walk: the whole first year, every twelfth month after it, and always
//! the final month. Totals must come from the closed-form payment, never from
//! summing the sample.

use std::iter::FusedIterator;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::payment::{monthly_payment, monthly_rate, total_over_term};
use crate::types::{Money, Percent, Rate};
use crate::MortgageResult;

const MONTHS_PER_YEAR: u32 = 12;

/// One month of the amortization ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// Month number (1-indexed).
    pub period_index: u32,
    /// Fixed monthly payment.
    pub payment: Money,
    /// Interest charged on the opening balance.
    pub interest_portion: Money,
    /// Part of the payment that repays principal.
    pub principal_portion: Money,
    /// Balance after this payment, floored at zero.
    pub remaining_balance: Money,
    /// Interest paid from month 1 through this month.
    pub cumulative_interest: Money,
    /// Principal repaid from month 1 through this month.
    pub cumulative_principal: Money,
}

/// Full, unsampled walk over periods `1..=term_months`.
///
/// Cloning a walk before it is consumed restarts it from the same state.
#[derive(Debug, Clone)]
pub struct AmortizationWalk {
    payment: Money,
    rate: Rate,
    term_months: u32,
    next_period: u32,
    balance: Money,
    cumulative_interest: Money,
    cumulative_principal: Money,
}

impl AmortizationWalk {
    pub fn new(
        principal: Money,
        annual_rate_percent: Percent,
        term_months: u32,
    ) -> MortgageResult<Self> {
        let payment = monthly_payment(principal, annual_rate_percent, term_months)?;
        // Cumulative totals are bounded by the total repaid.
        total_over_term(payment, term_months)?;
        Ok(Self {
            payment,
            rate: monthly_rate(annual_rate_percent),
            term_months,
            next_period: 1,
            balance: principal,
            cumulative_interest: Decimal::ZERO,
            cumulative_principal: Decimal::ZERO,
        })
    }

    pub fn payment(&self) -> Money {
        self.payment
    }

    pub fn term_months(&self) -> u32 {
        self.term_months
    }

    /// Restrict the walk to the periods kept by [`is_sampled`].
    pub fn sampled(self) -> impl Iterator<Item = PeriodRecord> {
        let term = self.term_months;
        self.filter(move |record| is_sampled(record.period_index, term))
    }
}

impl Iterator for AmortizationWalk {
    type Item = PeriodRecord;

    fn next(&mut self) -> Option<PeriodRecord> {
        if self.next_period > self.term_months {
            return None;
        }
        let period_index = self.next_period;
        self.next_period += 1;

        let interest_portion = self.balance * self.rate;
        let principal_portion = self.payment - interest_portion;

        self.cumulative_interest += interest_portion;
        self.cumulative_principal += principal_portion;
        // The running balance is left unclamped so drift does not compound.
        self.balance -= principal_portion;

        Some(PeriodRecord {
            period_index,
            payment: self.payment,
            interest_portion,
            principal_portion,
            remaining_balance: self.balance.max(Decimal::ZERO),
            cumulative_interest: self.cumulative_interest,
            cumulative_principal: self.cumulative_principal,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.term_months as usize + 1).saturating_sub(self.next_period as usize);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for AmortizationWalk {}

impl FusedIterator for AmortizationWalk {}

/// Whether `period_index` is retained in the display schedule.
pub fn is_sampled(period_index: u32, term_months: u32) -> bool {
    period_index <= MONTHS_PER_YEAR
        || period_index % MONTHS_PER_YEAR == 0
        || period_index == term_months
}

/// Sampled amortization schedule, strictly ordered by period.
pub fn build_schedule(
    principal: Money,
    annual_rate_percent: Percent,
    term_months: u32,
) -> MortgageResult<Vec<PeriodRecord>> {
    let schedule: Vec<PeriodRecord> =
        AmortizationWalk::new(principal, annual_rate_percent, term_months)?
            .sampled()
            .collect();
    debug!(
        term_months,
        retained = schedule.len(),
        "built sampled amortization schedule"
    );
    Ok(schedule)
}

/// Every period of the loan, with no sampling.
pub fn build_full_schedule(
    principal: Money,
    annual_rate_percent: Percent,
    term_months: u32,
) -> MortgageResult<Vec<PeriodRecord>> {
    Ok(AmortizationWalk::new(principal, annual_rate_percent, term_months)?.collect())
}
