//! Upfront costs paid when the mortgage is signed.
//!
//! Percentage fees (bank opening fee, documentary stamp tax) are charged on the
//! loan amount; notary, land-registry and appraisal fees are flat amounts.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MortgageError;
use crate::types::{Money, Percent};
use crate::MortgageResult;

fn default_opening_fee_percent() -> Percent {
    dec!(1.0)
}

fn default_notary_fee() -> Money {
    dec!(1000)
}

fn default_registration_fee() -> Money {
    dec!(500)
}

fn default_appraisal_fee() -> Money {
    dec!(300)
}

fn default_documentary_tax_percent() -> Percent {
    dec!(1.5)
}

/// Closing cost parameters. Missing fields take typical market defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosingCostInput {
    /// Lender opening fee as a percentage of the loan amount.
    #[serde(default = "default_opening_fee_percent")]
    pub opening_fee_percent: Percent,
    #[serde(default = "default_notary_fee")]
    pub notary_fee: Money,
    #[serde(default = "default_registration_fee")]
    pub registration_fee: Money,
    #[serde(default = "default_appraisal_fee")]
    pub appraisal_fee: Money,
    /// Stamp duty on the mortgage deed, as a percentage of the loan amount.
    #[serde(default = "default_documentary_tax_percent")]
    pub documentary_tax_percent: Percent,
}

impl Default for ClosingCostInput {
    fn default() -> Self {
        Self {
            opening_fee_percent: default_opening_fee_percent(),
            notary_fee: default_notary_fee(),
            registration_fee: default_registration_fee(),
            appraisal_fee: default_appraisal_fee(),
            documentary_tax_percent: default_documentary_tax_percent(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosingCostBreakdown {
    pub opening_fee: Money,
    pub notary_fee: Money,
    pub registration_fee: Money,
    pub appraisal_fee: Money,
    pub documentary_tax: Money,
    pub total: Money,
}

/// Itemise the closing costs for a loan of `loan_amount`.
pub fn calculate_closing_costs(
    loan_amount: Money,
    input: &ClosingCostInput,
) -> MortgageResult<ClosingCostBreakdown> {
    validate_closing_costs(loan_amount, input)?;

    let overflow = || MortgageError::Overflow {
        context: "closing costs".into(),
    };
    let opening_fee = percent_of(loan_amount, input.opening_fee_percent).ok_or_else(overflow)?;
    let documentary_tax =
        percent_of(loan_amount, input.documentary_tax_percent).ok_or_else(overflow)?;
    let total = [
        input.notary_fee,
        input.registration_fee,
        input.appraisal_fee,
        documentary_tax,
    ]
    .into_iter()
    .try_fold(opening_fee, |acc, fee| acc.checked_add(fee))
    .ok_or_else(overflow)?;

    Ok(ClosingCostBreakdown {
        opening_fee,
        notary_fee: input.notary_fee,
        registration_fee: input.registration_fee,
        appraisal_fee: input.appraisal_fee,
        documentary_tax,
        total,
    })
}

fn percent_of(amount: Money, percent: Percent) -> Option<Money> {
    amount.checked_mul(percent).map(|v| v / dec!(100))
}

fn validate_closing_costs(loan_amount: Money, input: &ClosingCostInput) -> MortgageResult<()> {
    if loan_amount < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "loan_amount".into(),
            reason: "Loan amount cannot be negative".into(),
        });
    }
    let fields = [
        ("opening_fee_percent", input.opening_fee_percent),
        ("notary_fee", input.notary_fee),
        ("registration_fee", input.registration_fee),
        ("appraisal_fee", input.appraisal_fee),
        ("documentary_tax_percent", input.documentary_tax_percent),
    ];
    for (field, value) in fields {
        if value < Decimal::ZERO {
            return Err(MortgageError::InvalidInput {
                field: field.into(),
                reason: "Closing costs cannot be negative".into(),
            });
        }
    }
    Ok(())
}
