pub mod loan;
pub mod payment;
pub mod schedule;
pub mod term_sweep;
