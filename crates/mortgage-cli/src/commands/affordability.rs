use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use std::time::Instant;

use mortgage_core::affordability::closing_costs::{self, ClosingCostInput};
use mortgage_core::with_metadata;

/// Arguments for the closing cost breakdown
#[derive(Args)]
pub struct ClosingCostArgs {
    /// Loan amount the percentage fees are charged on
    #[arg(long)]
    pub loan_amount: Decimal,

    /// Lender opening fee in percent of the loan
    #[arg(long)]
    pub opening_fee: Option<Decimal>,

    /// Flat notary fee
    #[arg(long)]
    pub notary: Option<Decimal>,

    /// Flat land registry fee
    #[arg(long)]
    pub registration: Option<Decimal>,

    /// Flat appraisal fee
    #[arg(long)]
    pub appraisal: Option<Decimal>,

    /// Documentary stamp tax in percent of the loan
    #[arg(long)]
    pub documentary_tax: Option<Decimal>,
}

impl ClosingCostArgs {
    pub fn to_input(&self) -> ClosingCostInput {
        let defaults = ClosingCostInput::default();
        ClosingCostInput {
            opening_fee_percent: self.opening_fee.unwrap_or(defaults.opening_fee_percent),
            notary_fee: self.notary.unwrap_or(defaults.notary_fee),
            registration_fee: self.registration.unwrap_or(defaults.registration_fee),
            appraisal_fee: self.appraisal.unwrap_or(defaults.appraisal_fee),
            documentary_tax_percent: self
                .documentary_tax
                .unwrap_or(defaults.documentary_tax_percent),
        }
    }
}

pub fn run_closing_costs(args: ClosingCostArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let input = args.to_input();
    let breakdown = closing_costs::calculate_closing_costs(args.loan_amount, &input)?;
    let elapsed = start.elapsed().as_micros() as u64;
    let output = with_metadata("Mortgage Closing Costs", &input, Vec::new(), elapsed, breakdown);
    Ok(serde_json::to_value(output)?)
}
