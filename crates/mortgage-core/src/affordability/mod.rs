pub mod closing_costs;
pub mod ratios;
