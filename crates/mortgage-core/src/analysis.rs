//! End-to-end mortgage analysis.
//!
//! Runs the full dashboard pipeline in one call: derive the loan from the
//! property price and down payment, price it, sample its amortization
//! schedule, compare it against alternative terms and, when the extra inputs
//! are supplied, add closing costs and the payment-to-income assessment.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

use crate::affordability::closing_costs::{
    calculate_closing_costs, ClosingCostBreakdown, ClosingCostInput,
};
use crate::affordability::ratios::{assess_effort, loan_to_value, EffortBand, FinancialEffort};
use crate::amortization::loan::LoanTerms;
use crate::amortization::payment::total_over_term;
use crate::amortization::schedule::PeriodRecord;
use crate::amortization::term_sweep::{compare_terms, TermComparisonRow, DEFAULT_COMPARISON_TERMS};
use crate::error::MortgageError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::MortgageResult;

/// LTV above which lenders typically tighten conditions.
const HIGH_LTV_THRESHOLD: Percent = dec!(80);

fn default_comparison_terms() -> Vec<u32> {
    DEFAULT_COMPARISON_TERMS.to_vec()
}

// ---------------------------------------------------------------------------
// Input / output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageInput {
    pub property_price: Money,
    /// Down payment as a percentage of the property price (20 = 20%).
    pub down_payment_percent: Percent,
    pub term_years: u32,
    pub annual_rate_percent: Percent,
    /// Itemise closing costs when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closing_costs: Option<ClosingCostInput>,
    /// Enables the payment-to-income assessment when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_monthly_income: Option<Money>,
    /// Terms (in years) for the comparison table.
    #[serde(default = "default_comparison_terms")]
    pub comparison_terms: Vec<u32>,
}

/// One comparison row, flagged when it matches the chosen term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparedTerm {
    #[serde(flatten)]
    pub row: TermComparisonRow,
    pub is_selected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageAnalysis {
    pub down_payment: Money,
    pub principal: Money,
    pub term_months: u32,
    pub monthly_payment: Money,
    pub total_paid: Money,
    pub total_interest: Money,
    /// Principal as a share of everything paid over the term.
    pub principal_share_percent: Percent,
    pub interest_share_percent: Percent,
    pub ltv_percent: Percent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_costs: Option<ClosingCostBreakdown>,
    /// Cash needed at signing: down payment plus closing costs.
    pub upfront_outlay: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financial_effort: Option<FinancialEffort>,
    pub schedule: Vec<PeriodRecord>,
    pub term_comparison: Vec<ComparedTerm>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn analyze_mortgage(
    input: &MortgageInput,
) -> MortgageResult<ComputationOutput<MortgageAnalysis>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let down_payment = input
        .property_price
        .checked_mul(input.down_payment_percent)
        .map(|v| v / dec!(100))
        .ok_or_else(|| MortgageError::Overflow {
            context: "down payment".into(),
        })?;
    let principal = input.property_price - down_payment;

    let loan = LoanTerms::from_years(principal, input.annual_rate_percent, input.term_years)?;
    let monthly_payment = loan.monthly_payment()?;
    let total_paid = total_over_term(monthly_payment, loan.term_months)?;
    let total_interest = total_paid - principal;

    let (principal_share_percent, interest_share_percent) = if total_paid.is_zero() {
        (Decimal::ZERO, Decimal::ZERO)
    } else {
        (
            principal / total_paid * dec!(100),
            total_interest / total_paid * dec!(100),
        )
    };

    let ltv_percent = loan_to_value(principal, input.property_price)?;

    let closing_costs = input
        .closing_costs
        .as_ref()
        .map(|cc| calculate_closing_costs(principal, cc))
        .transpose()?;
    let upfront_outlay = closing_costs
        .as_ref()
        .map_or(Some(down_payment), |cc| down_payment.checked_add(cc.total))
        .ok_or_else(|| MortgageError::Overflow {
            context: "upfront outlay".into(),
        })?;

    let financial_effort = input
        .net_monthly_income
        .map(|income| assess_effort(monthly_payment, income))
        .transpose()?;

    let schedule = loan.schedule()?;

    let term_comparison = compare_terms(
        principal,
        input.annual_rate_percent,
        &input.comparison_terms,
    )?
    .into_iter()
    .map(|row| ComparedTerm {
        is_selected: row.term_years == input.term_years,
        row,
    })
    .collect();

    if principal.is_zero() {
        warnings.push("Down payment covers the full property price; no loan is required".into());
    }
    if input.annual_rate_percent.is_zero() {
        warnings.push("Zero interest rate: payments repay principal on a straight line".into());
    }
    if ltv_percent > HIGH_LTV_THRESHOLD {
        warnings.push(format!(
            "LTV of {:.1}% exceeds {}%; lenders may require extra guarantees",
            ltv_percent, HIGH_LTV_THRESHOLD
        ));
    }
    if let Some(ref effort) = financial_effort {
        if effort.band != EffortBand::Acceptable {
            warnings.push(format!(
                "Financial effort of {:.1}%: {}",
                effort.effort_percent,
                effort.band.description()
            ));
        }
    }
    for w in &warnings {
        info!(warning = %w, "mortgage analysis advisory");
    }

    let output = MortgageAnalysis {
        down_payment,
        principal,
        term_months: loan.term_months,
        monthly_payment,
        total_paid,
        total_interest,
        principal_share_percent,
        interest_share_percent,
        ltv_percent,
        closing_costs,
        upfront_outlay,
        financial_effort,
        schedule,
        term_comparison,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    debug!(elapsed_us = elapsed, "mortgage analysis complete");
    Ok(with_metadata(
        "Fixed-Rate Annuity Mortgage Analysis",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn validate_input(input: &MortgageInput) -> MortgageResult<()> {
    if input.property_price <= Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "property_price".into(),
            reason: "Property price must be positive".into(),
        });
    }
    if input.down_payment_percent < Decimal::ZERO || input.down_payment_percent > dec!(100) {
        return Err(MortgageError::InvalidInput {
            field: "down_payment_percent".into(),
            reason: "Down payment must be between 0% and 100%".into(),
        });
    }
    if input.term_years == 0 {
        return Err(MortgageError::InvalidTerm {
            reason: "term must be at least one year".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal, msg: &str) {
        let diff = (actual - expected).abs();
        assert!(
            diff <= tol,
            "{msg}: expected ~{expected}, got {actual} (diff={diff}, tol={tol})"
        );
    }

    fn standard_input() -> MortgageInput {
        MortgageInput {
            property_price: dec!(200000),
            down_payment_percent: dec!(20),
            term_years: 25,
            annual_rate_percent: dec!(3.0),
            closing_costs: Some(ClosingCostInput::default()),
            net_monthly_income: Some(dec!(2500)),
            comparison_terms: default_comparison_terms(),
        }
    }

    fn run(input: &MortgageInput) -> ComputationOutput<MortgageAnalysis> {
        analyze_mortgage(input).unwrap()
    }

    #[test]
    fn test_headline_figures() {
        let out = run(&standard_input()).result;
        assert_eq!(out.down_payment, dec!(40000));
        assert_eq!(out.principal, dec!(160000));
        assert_eq!(out.term_months, 300);
        assert_close(out.monthly_payment, dec!(758.74), dec!(0.01), "payment");
        assert_close(out.total_paid, dec!(227621.43), dec!(0.01), "total paid");
        assert_close(out.total_interest, dec!(67621.43), dec!(0.01), "interest");
    }

    #[test]
    fn test_shares_sum_to_100() {
        let out = run(&standard_input()).result;
        assert_close(
            out.principal_share_percent + out.interest_share_percent,
            dec!(100),
            dec!(0.0000001),
            "shares",
        );
    }

    #[test]
    fn test_upfront_outlay_includes_closing_costs() {
        let out = run(&standard_input()).result;
        let costs = out.closing_costs.clone().unwrap();
        assert_eq!(costs.total, dec!(5800));
        assert_eq!(out.upfront_outlay, dec!(45800));
    }

    #[test]
    fn test_without_optional_inputs() {
        let input = MortgageInput {
            closing_costs: None,
            net_monthly_income: None,
            ..standard_input()
        };
        let out = run(&input).result;
        assert!(out.closing_costs.is_none());
        assert!(out.financial_effort.is_none());
        assert_eq!(out.upfront_outlay, out.down_payment);
    }

    #[test]
    fn test_selected_term_flagged_once() {
        let out = run(&standard_input()).result;
        let selected: Vec<u32> = out
            .term_comparison
            .iter()
            .filter(|t| t.is_selected)
            .map(|t| t.row.term_years)
            .collect();
        assert_eq!(selected, vec![25]);
        assert_eq!(out.term_comparison.len(), 7);
    }

    #[test]
    fn test_term_outside_comparison_set_not_flagged() {
        let input = MortgageInput {
            term_years: 22,
            ..standard_input()
        };
        let out = run(&input).result;
        assert!(out.term_comparison.iter().all(|t| !t.is_selected));
    }

    #[test]
    fn test_schedule_is_sampled() {
        let out = run(&standard_input()).result;
        assert_eq!(out.schedule.len(), 36);
        assert_eq!(out.schedule.last().unwrap().period_index, 300);
    }

    #[test]
    fn test_effort_warning_emitted() {
        let result = run(&standard_input());
        let effort = result.result.financial_effort.clone().unwrap();
        assert_eq!(effort.band, EffortBand::Elevated);
        assert!(result.warnings.iter().any(|w| w.contains("Financial effort")));
    }

    #[test]
    fn test_high_ltv_warning() {
        let input = MortgageInput {
            down_payment_percent: dec!(5),
            ..standard_input()
        };
        let result = run(&input);
        assert_eq!(result.result.ltv_percent, dec!(95));
        assert!(result.warnings.iter().any(|w| w.contains("LTV")));
    }

    #[test]
    fn test_full_down_payment_means_no_loan() {
        let input = MortgageInput {
            down_payment_percent: dec!(100),
            ..standard_input()
        };
        let result = run(&input);
        assert_eq!(result.result.principal, Decimal::ZERO);
        assert_eq!(result.result.monthly_payment, Decimal::ZERO);
        assert_eq!(result.result.principal_share_percent, Decimal::ZERO);
        assert!(result.warnings.iter().any(|w| w.contains("no loan")));
    }

    #[test]
    fn test_invalid_down_payment_rejected() {
        let input = MortgageInput {
            down_payment_percent: dec!(120),
            ..standard_input()
        };
        assert!(matches!(
            analyze_mortgage(&input),
            Err(MortgageError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_empty_comparison_set_rejected() {
        let input = MortgageInput {
            comparison_terms: vec![],
            ..standard_input()
        };
        assert!(matches!(
            analyze_mortgage(&input),
            Err(MortgageError::InvalidTerm { .. })
        ));
    }

    #[test]
    fn test_oversized_price_is_an_overflow_error() {
        let mut input = standard_input();
        input.property_price = Decimal::MAX;
        assert!(matches!(
            analyze_mortgage(&input),
            Err(MortgageError::Overflow { .. })
        ));

        input.down_payment_percent = Decimal::ZERO;
        input.closing_costs = None;
        input.net_monthly_income = None;
        assert!(matches!(
            analyze_mortgage(&input),
            Err(MortgageError::Overflow { .. })
        ));
    }

    #[test]
    fn test_term_years_beyond_month_range_rejected() {
        let mut input = standard_input();
        input.annual_rate_percent = Decimal::ZERO;
        input.term_years = u32::MAX;
        assert!(matches!(
            analyze_mortgage(&input),
            Err(MortgageError::InvalidTerm { .. })
        ));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let input: MortgageInput = serde_json::from_str(
            r#"{
                "property_price": "300000",
                "down_payment_percent": "20",
                "term_years": 30,
                "annual_rate_percent": "3.5"
            }"#,
        )
        .unwrap();
        assert_eq!(input.comparison_terms, DEFAULT_COMPARISON_TERMS.to_vec());
        assert!(input.closing_costs.is_none());
    }

    #[test]
    fn test_metadata_populated() {
        let result = run(&standard_input());
        assert_eq!(result.methodology, "Fixed-Rate Annuity Mortgage Analysis");
        assert_eq!(result.metadata.precision, "rust_decimal_128bit");
        assert!(!result.metadata.version.is_empty());
    }
}
