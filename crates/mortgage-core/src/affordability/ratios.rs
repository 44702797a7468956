use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MortgageError;
use crate::types::{Money, Percent};
use crate::MortgageResult;

/// Upper bound of the acceptable payment-to-income band.
pub const ACCEPTABLE_EFFORT_LIMIT: Percent = dec!(30);

/// Upper bound of the elevated band; anything above is excessive.
pub const ELEVATED_EFFORT_LIMIT: Percent = dec!(40);

/// Payment-to-income band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffortBand {
    Acceptable,
    Elevated,
    Excessive,
}

impl EffortBand {
    /// Bands are inclusive at their upper bound: 30% is acceptable, 40% elevated.
    pub fn classify(effort_percent: Percent) -> Self {
        if effort_percent <= ACCEPTABLE_EFFORT_LIMIT {
            EffortBand::Acceptable
        } else if effort_percent <= ELEVATED_EFFORT_LIMIT {
            EffortBand::Elevated
        } else {
            EffortBand::Excessive
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            EffortBand::Acceptable => "Acceptable effort (at or below the recommended 30%)",
            EffortBand::Elevated => "Elevated effort (between 30% and 40%)",
            EffortBand::Excessive => "Excessive effort (above 40%)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialEffort {
    pub effort_percent: Percent,
    pub band: EffortBand,
}

/// Loan-to-value: `principal / property_price * 100`.
pub fn loan_to_value(principal: Money, property_price: Money) -> MortgageResult<Percent> {
    if property_price <= Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "property_price".into(),
            reason: "Property price must be positive".into(),
        });
    }
    principal
        .checked_div(property_price)
        .and_then(|share| share.checked_mul(dec!(100)))
        .ok_or_else(|| MortgageError::Overflow {
            context: "loan-to-value".into(),
        })
}

/// Share of net monthly income consumed by the mortgage payment, in percent.
pub fn financial_effort(
    monthly_payment: Money,
    net_monthly_income: Money,
) -> MortgageResult<Percent> {
    if net_monthly_income <= Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "net_monthly_income".into(),
            reason: "Net monthly income must be positive".into(),
        });
    }
    monthly_payment
        .checked_div(net_monthly_income)
        .and_then(|share| share.checked_mul(dec!(100)))
        .ok_or_else(|| MortgageError::Overflow {
            context: "financial effort".into(),
        })
}

pub fn assess_effort(
    monthly_payment: Money,
    net_monthly_income: Money,
) -> MortgageResult<FinancialEffort> {
    let effort_percent = financial_effort(monthly_payment, net_monthly_income)?;
    Ok(FinancialEffort {
        effort_percent,
        band: EffortBand::classify(effort_percent),
    })
}
