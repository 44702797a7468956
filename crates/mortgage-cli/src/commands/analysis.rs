use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_core::affordability::closing_costs::ClosingCostInput;
use mortgage_core::amortization::term_sweep::DEFAULT_COMPARISON_TERMS;
use mortgage_core::analysis::{self, MortgageInput};

use crate::input;

/// Arguments for the full mortgage analysis
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Property price
    #[arg(long)]
    pub property_price: Option<Decimal>,

    /// Down payment in percent of the property price
    #[arg(long, default_value = "20")]
    pub down_payment: Decimal,

    /// Loan term in years
    #[arg(long, default_value_t = 25)]
    pub term_years: u32,

    /// Annual interest rate in percent
    #[arg(long, default_value = "3.0")]
    pub rate: Decimal,

    /// Net monthly income for the payment-to-income assessment
    #[arg(long)]
    pub income: Option<Decimal>,

    /// Include closing costs at their default values
    #[arg(long)]
    pub closing_costs: bool,

    /// Comparison terms in years (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub terms: Option<Vec<u32>>,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mortgage_input = resolve_input(&args, input::stdin::read_stdin)?;
    let result = analysis::analyze_mortgage(&mortgage_input)?;
    Ok(serde_json::to_value(result)?)
}

/// `--input` file, then explicit flags, then piped stdin. Stdin is only read
/// when `--property-price` is absent, so an open pipe never blocks flag use.
fn resolve_input<F>(
    args: &AnalyzeArgs,
    read_stdin: F,
) -> Result<MortgageInput, Box<dyn std::error::Error>>
where
    F: FnOnce() -> Result<Option<Value>, Box<dyn std::error::Error>>,
{
    if let Some(ref path) = args.input {
        return input::file::read_json(path);
    }
    if let Some(price) = args.property_price {
        return Ok(MortgageInput {
            property_price: price,
            down_payment_percent: args.down_payment,
            term_years: args.term_years,
            annual_rate_percent: args.rate,
            closing_costs: args.closing_costs.then(ClosingCostInput::default),
            net_monthly_income: args.income,
            comparison_terms: args
                .terms
                .clone()
                .unwrap_or_else(|| DEFAULT_COMPARISON_TERMS.to_vec()),
        });
    }
    match read_stdin()? {
        Some(data) => Ok(serde_json::from_value(data)?),
        None => Err("--property-price is required (or provide --input)".into()),
    }
}
