//! Detection rectangle inside the camera frame.

use crate::{config::ZoneConfig, Error, Result};

/// Axis-aligned sub-rectangle of the frame that drives the pointer.
///
/// Always non-empty and fully contained in the frame it was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveZone {
    origin_x: i32,
    origin_y: i32,
    width: i32,
    height: i32,
    frame_width: i32,
    frame_height: i32,
}

impl ActiveZone {
    /// Create a zone from explicit pixel bounds
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the rectangle is empty or leaves the frame
    pub fn new(origin_x: i32, origin_y: i32, width: i32, height: i32, frame_width: i32, frame_height: i32) -> Result<Self> {
        if frame_width <= 0 || frame_height <= 0 {
            return Err(Error::InvalidInput(format!(
                "Frame size must be positive, got {frame_width}x{frame_height}"
            )));
        }
        if width <= 0 || height <= 0 {
            return Err(Error::InvalidInput(format!(
                "Active zone must be non-empty, got {width}x{height}"
            )));
        }
        let fits = |origin: i32, extent: i32, limit: i32| {
            origin >= 0 && origin.checked_add(extent).is_some_and(|end| end <= limit)
        };
        if !fits(origin_x, width, frame_width) || !fits(origin_y, height, frame_height) {
            return Err(Error::InvalidInput(format!(
                "Active zone ({origin_x}, {origin_y}, {width}x{height}) exceeds frame {frame_width}x{frame_height}"
            )));
        }

        Ok(Self {
            origin_x,
            origin_y,
            width,
            height,
            frame_width,
            frame_height,
        })
    }

    /// Derive the zone from frame fractions.
    ///
    /// Horizontal margins are symmetric; the bottom margin is proportional
    /// to the zone width so the zone keeps roughly the screen's aspect.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if a fraction is out of range or the fractions
    /// produce an empty zone
    #[allow(clippy::cast_possible_truncation)] // Fractions are range-checked first
    pub fn from_fractions(frame_width: i32, frame_height: i32, config: &ZoneConfig) -> Result<Self> {
        check_fraction("horizontal margin", config.margin_x_fraction, 0.5)?;
        check_fraction("top margin", config.top_fraction, 1.0)?;
        if !config.bottom_width_fraction.is_finite() || config.bottom_width_fraction < 0.0 {
            return Err(Error::InvalidInput(format!(
                "Zone bottom fraction must be a non-negative number, got {}",
                config.bottom_width_fraction
            )));
        }

        let overflow = || Error::InvalidInput(format!("Active zone for {frame_width}x{frame_height} overflows"));

        let origin_x = (f64::from(frame_width) * config.margin_x_fraction) as i32;
        let origin_y = (f64::from(frame_height) * config.top_fraction) as i32;
        let width = origin_x
            .checked_mul(2)
            .and_then(|margins| frame_width.checked_sub(margins))
            .ok_or_else(overflow)?;
        let bottom_margin = (f64::from(width) * config.bottom_width_fraction) as i32;
        let height = frame_height
            .checked_sub(origin_y)
            .and_then(|h| h.checked_sub(bottom_margin))
            .ok_or_else(overflow)?;

        Self::new(origin_x, origin_y, width, height, frame_width, frame_height)
    }

    #[must_use]
    pub const fn origin_x(&self) -> i32 {
        self.origin_x
    }

    #[must_use]
    pub const fn origin_y(&self) -> i32 {
        self.origin_y
    }

    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    #[must_use]
    pub const fn frame_size(&self) -> (i32, i32) {
        (self.frame_width, self.frame_height)
    }

    /// Distance from the zone's bottom edge to the frame's bottom edge
    #[must_use]
    pub const fn bottom_margin(&self) -> i32 {
        self.frame_height - (self.origin_y + self.height)
    }

    /// Rectangle for drawing the zone outline
    #[must_use]
    pub fn to_rect(&self) -> opencv::core::Rect {
        opencv::core::Rect::new(self.origin_x, self.origin_y, self.width, self.height)
    }
}

fn check_fraction(name: &str, value: f64, upper: f64) -> Result<()> {
    if value.is_finite() && (0.0..upper).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!("Zone {name} fraction must be in [0.0, {upper}), got {value}")))
    }
}
