// Valuation engine: scoring models, trend, sleeper detection, VOR.

pub mod replacement;
pub mod scoring;
pub mod sleeper;
pub mod trend;

/// Round to one decimal place, the precision every valuation output uses.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
