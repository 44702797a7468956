use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MortgageError {
    #[error("Invalid principal: {value} (principal cannot be negative)")]
    InvalidPrincipal { value: Decimal },

    #[error("Invalid rate: {value}% (annual interest rate cannot be negative)")]
    InvalidRate { value: Decimal },

    #[error("Invalid term: {reason}")]
    InvalidTerm { reason: String },

    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Decimal overflow in {context}")]
    Overflow { context: String },
}
