use std::fmt;

/// Temperature in the canonical unit every provider normalizes to.
///
/// Adapters convert their upstream's native unit before returning, so the
/// aggregator only ever adds and averages Kelvin values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kelvin(pub f64);

impl Kelvin {
    pub fn from_fahrenheit(fahrenheit: f64) -> Self {
        Kelvin((fahrenheit + 459.67) * 5.0 / 9.0)
    }

    pub fn to_fahrenheit(self) -> f64 {
        self.0 * 9.0 / 5.0 - 459.67
    }
}

impl fmt::Display for Kelvin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}K", self.0)
    }
}
