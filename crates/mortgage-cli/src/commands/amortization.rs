use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::time::Instant;

use mortgage_core::amortization::loan::LoanTerms;
use mortgage_core::amortization::schedule::{self, PeriodRecord};
use mortgage_core::amortization::term_sweep::{self, DEFAULT_COMPARISON_TERMS};
use mortgage_core::with_metadata;

/// Arguments shared by every loan-level command
#[derive(Args)]
pub struct LoanArgs {
    /// Loan amount (property price minus down payment)
    #[arg(long)]
    pub principal: Decimal,

    /// Annual interest rate in percent (e.g. 3.0 for 3%)
    #[arg(long)]
    pub rate: Decimal,

    /// Loan term in months
    #[arg(long)]
    pub term_months: u32,
}

impl LoanArgs {
    fn loan(&self) -> Result<LoanTerms, Box<dyn std::error::Error>> {
        Ok(LoanTerms::new(self.principal, self.rate, self.term_months)?)
    }
}

/// Arguments for the monthly payment calculation
#[derive(Args)]
pub struct PaymentArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

/// Arguments for the amortization schedule
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Emit every month instead of the yearly sample
    #[arg(long)]
    pub full: bool,
}

/// Arguments for the loan term comparison
#[derive(Args)]
pub struct CompareArgs {
    /// Loan amount
    #[arg(long)]
    pub principal: Decimal,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Decimal,

    /// Candidate terms in years (comma-separated, e.g. "10,20,30")
    #[arg(long, value_delimiter = ',')]
    pub terms: Option<Vec<u32>>,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let loan = args.loan.loan()?;
    let result = json!({
        "monthly_payment": loan.monthly_payment()?,
        "total_paid": loan.total_paid()?,
        "total_interest": loan.total_interest()?,
    });
    let elapsed = start.elapsed().as_micros() as u64;
    let output = with_metadata("Fixed-Rate Annuity Payment", &loan, Vec::new(), elapsed, result);
    Ok(serde_json::to_value(output)?)
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let loan = args.loan.loan()?;
    let (records, methodology): (Vec<PeriodRecord>, &str) = if args.full {
        (
            schedule::build_full_schedule(loan.principal, loan.annual_rate_percent, loan.term_months)?,
            "Full Monthly Amortization Schedule",
        )
    } else {
        (loan.schedule()?, "Sampled Amortization Schedule (first year, yearly, final month)")
    };
    let elapsed = start.elapsed().as_micros() as u64;
    let output = with_metadata(methodology, &loan, Vec::new(), elapsed, records);
    Ok(serde_json::to_value(output)?)
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let terms = args
        .terms
        .unwrap_or_else(|| DEFAULT_COMPARISON_TERMS.to_vec());
    let rows = term_sweep::compare_terms(args.principal, args.rate, &terms)?;
    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = json!({
        "principal": args.principal,
        "annual_rate_percent": args.rate,
        "candidate_term_years": terms,
    });
    let output = with_metadata("Loan Term Sensitivity", &assumptions, Vec::new(), elapsed, rows);
    Ok(serde_json::to_value(output)?)
}
