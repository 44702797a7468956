use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use mortgage_core::affordability::closing_costs::{self, ClosingCostInput};
use mortgage_core::amortization::loan::LoanTerms;
use mortgage_core::amortization::{schedule, term_sweep};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

#[derive(Deserialize)]
struct CompareTermsInput {
    principal: Decimal,
    annual_rate_percent: Decimal,
    #[serde(default = "default_terms")]
    candidate_term_years: Vec<u32>,
}

fn default_terms() -> Vec<u32> {
    term_sweep::DEFAULT_COMPARISON_TERMS.to_vec()
}

#[derive(Deserialize)]
struct ClosingCostRequest {
    loan_amount: Decimal,
    #[serde(default)]
    costs: ClosingCostInput,
}

// ---------------------------------------------------------------------------
// Amortization engine
// ---------------------------------------------------------------------------

/// `{ principal, annual_rate_percent, term_months }` -> monthly payment as a decimal string.
#[napi]
pub fn monthly_payment(input_json: String) -> NapiResult<String> {
    let loan: LoanTerms = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let payment = loan.monthly_payment().map_err(to_napi_error)?;
    serde_json::to_string(&payment).map_err(to_napi_error)
}

#[napi]
pub fn build_schedule(input_json: String) -> NapiResult<String> {
    let loan: LoanTerms = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let records = schedule::build_schedule(loan.principal, loan.annual_rate_percent, loan.term_months)
        .map_err(to_napi_error)?;
    serde_json::to_string(&records).map_err(to_napi_error)
}

#[napi]
pub fn compare_terms(input_json: String) -> NapiResult<String> {
    let input: CompareTermsInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let rows = term_sweep::compare_terms(
        input.principal,
        input.annual_rate_percent,
        &input.candidate_term_years,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&rows).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Affordability and full analysis
// ---------------------------------------------------------------------------

#[napi]
pub fn closing_costs(input_json: String) -> NapiResult<String> {
    let request: ClosingCostRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let breakdown = closing_costs::calculate_closing_costs(request.loan_amount, &request.costs)
        .map_err(to_napi_error)?;
    serde_json::to_string(&breakdown).map_err(to_napi_error)
}

/// Recomputes the whole dashboard for one set of inputs.
#[napi]
pub fn analyze_mortgage(input_json: String) -> NapiResult<String> {
    let input: mortgage_core::analysis::MortgageInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = mortgage_core::analysis::analyze_mortgage(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
