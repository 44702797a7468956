pub mod amortization;
pub mod error;
pub mod types;

#[cfg(feature = "affordability")]
pub mod affordability;

#[cfg(feature = "analysis")]
pub mod analysis;

pub use error::MortgageError;
pub use types::*;

/// Standard result type for all mortgage engine operations
pub type MortgageResult<T> = Result<T, MortgageError>;
