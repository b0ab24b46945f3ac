//! Remapping of filtered positions from the active zone onto the full screen.
//!
//! The filtered position is a normalized frame coordinate scaled to screen
//! pixels, so only the part of it that falls inside the active zone is
//! usable. The mapper stretches that part to cover the whole screen and
//! undoes the camera's mirror image on the horizontal axis.

use crate::active_zone::ActiveZone;

/// Piecewise-linear interpolation that clamps outside `[x0, x1]`
#[must_use]
pub fn interpolate(value: f64, (x0, x1): (f64, f64), (y0, y1): (f64, f64)) -> f64 {
    if value.is_nan() || x1 <= x0 || value <= x0 {
        return y0;
    }
    if value >= x1 {
        return y1;
    }
    y0 + (value - x0) * (y1 - y0) / (x1 - x0)
}

/// Maps filtered positions onto screen coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateMapper {
    zone: ActiveZone,
    screen_width: f64,
    screen_height: f64,
    offset_x: f64,
    offset_y_above: f64,
    offset_y_below: f64,
}

impl CoordinateMapper {
    #[must_use]
    pub fn new(zone: ActiveZone, screen_width: f64, screen_height: f64) -> Self {
        let mut mapper = Self {
            zone,
            screen_width,
            screen_height,
            offset_x: 0.0,
            offset_y_above: 0.0,
            offset_y_below: 0.0,
        };
        mapper.recompute_offsets();
        mapper
    }

    /// Update the screen geometry and the offsets derived from it
    pub fn set_screen_size(&mut self, screen_width: f64, screen_height: f64) {
        self.screen_width = screen_width;
        self.screen_height = screen_height;
        self.recompute_offsets();
    }

    fn recompute_offsets(&mut self) {
        let (frame_width, frame_height) = self.zone.frame_size();
        let frame_width = f64::from(frame_width);
        let frame_height = f64::from(frame_height);

        self.offset_x = self.screen_width * f64::from(self.zone.origin_x()) / frame_width;
        self.offset_y_above = self.screen_height * f64::from(self.zone.origin_y()) / frame_height;
        self.offset_y_below = self.screen_height * f64::from(self.zone.bottom_margin()) / frame_height;
    }

    /// Map a filtered position to screen coordinates in `[0, width] x [0, height]`
    #[must_use]
    pub fn map(&self, filtered_x: f64, filtered_y: f64) -> (f64, f64) {
        let mirrored_x = self.screen_width - filtered_x;
        let x = interpolate(
            mirrored_x,
            (self.offset_x, self.screen_width - self.offset_x),
            (0.0, self.screen_width),
        );
        let y = interpolate(
            filtered_y,
            (self.offset_y_above, self.screen_height - self.offset_y_below),
            (0.0, self.screen_height),
        );
        (x, y)
    }

    #[must_use]
    pub const fn offset_x(&self) -> f64 {
        self.offset_x
    }

    #[must_use]
    pub const fn offset_y_above(&self) -> f64 {
        self.offset_y_above
    }

    #[must_use]
    pub const fn offset_y_below(&self) -> f64 {
        self.offset_y_below
    }

    #[must_use]
    pub const fn screen_size(&self) -> (f64, f64) {
        (self.screen_width, self.screen_height)
    }
}
