//! Position filters for smoothing the cursor target.
//!
//! Filters work in screen pixels: the caller scales normalized landmark
//! coordinates by the screen size before applying them.

/// Distance-adaptive exponential smoothing
pub mod hysteresis;

use crate::{config::FilterConfig, Result};

/// Trait for all cursor filters
pub trait CursorFilter: Send + Sync {
    /// Apply filter to input values
    fn apply(&mut self, x: f64, y: f64) -> (f64, f64);

    /// Reset filter state
    fn reset(&mut self);

    /// Get filter name
    fn name(&self) -> &str;
}

/// No-op filter that passes through values unchanged
pub struct NoFilter;

impl CursorFilter for NoFilter {
    fn apply(&mut self, x: f64, y: f64) -> (f64, f64) {
        (x, y)
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        "NoFilter"
    }
}

/// Create a cursor filter from configuration, starting at `origin`
///
/// # Errors
///
/// Returns `FilterError` for an unknown filter kind or invalid parameters
pub fn create_filter(config: &FilterConfig, origin: (f64, f64)) -> Result<Box<dyn CursorFilter>> {
    match config.kind.to_lowercase().as_str() {
        "none" | "nofilter" => Ok(Box::new(NoFilter)),
        "hysteresis" => {
            if config.noise_factor < 1.0 || config.motion_factor < 1.0 {
                return Err(crate::Error::FilterError(format!(
                    "Filter factors must be at least 1.0, got {} and {}",
                    config.noise_factor, config.motion_factor
                )));
            }
            if !config.hysteresis_distance.is_finite() || config.hysteresis_distance < 0.0 {
                return Err(crate::Error::FilterError(format!(
                    "Hysteresis distance must be non-negative, got {}",
                    config.hysteresis_distance
                )));
            }
            Ok(Box::new(hysteresis::HysteresisFilter::new(
                origin,
                config.noise_factor,
                config.motion_factor,
                config.hysteresis_distance,
            )))
        }
        _ => Err(crate::Error::FilterError(format!("Unknown filter type: {}", config.kind))),
    }
}
