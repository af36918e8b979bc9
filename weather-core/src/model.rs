use std::time::Duration;

use crate::units::Kelvin;

/// Outcome of one successful aggregation pass.
///
/// Built once when every provider has reported, never mutated afterwards.
#[derive(Debug, Clone)]
pub struct AggregateResult {
    pub city: String,
    pub average: Kelvin,
    pub elapsed: Duration,
}
