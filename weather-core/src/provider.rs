use std::fmt::Debug;

use async_trait::async_trait;

use crate::{error::WeatherError, units::Kelvin};

pub mod darksky;
pub mod openweather;

/// One upstream weather service able to answer "temperature in city X".
///
/// Implementations perform exactly one logical lookup per call (possibly
/// composed of sub-lookups, e.g. geocode-then-forecast) and return the
/// reading already normalized to [`Kelvin`]. They never retry internally;
/// any connection failure, non-2xx status or malformed payload surfaces as
/// a [`WeatherError`].
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Short name used in log lines, e.g. "openweathermap".
    fn name(&self) -> &'static str;

    async fn temperature(&self, city: &str) -> Result<Kelvin, WeatherError>;
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        // Upstream bodies are arbitrary text; the cut must land on a char
        // boundary or the slice panics mid-codepoint.
        let mut cut = MAX;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
