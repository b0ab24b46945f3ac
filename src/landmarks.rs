//! Hand landmark types produced by a landmark detector.
//!
//! Points are normalized to the frame: `(0, 0)` is the top-left corner and
//! `(1, 1)` the bottom-right one. Indices follow the 21-point hand skeleton
//! used by common hand landmark models.

use crate::{constants::NUM_HAND_LANDMARKS, Error, Result};
use std::fmt;

/// Anatomical landmark indices
pub mod index {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_FINGER_MCP: usize = 5;
    pub const INDEX_FINGER_PIP: usize = 6;
    pub const INDEX_FINGER_DIP: usize = 7;
    pub const INDEX_FINGER_TIP: usize = 8;
    pub const MIDDLE_FINGER_MCP: usize = 9;
    pub const MIDDLE_FINGER_PIP: usize = 10;
    pub const MIDDLE_FINGER_DIP: usize = 11;
    pub const MIDDLE_FINGER_TIP: usize = 12;
    pub const RING_FINGER_MCP: usize = 13;
    pub const RING_FINGER_PIP: usize = 14;
    pub const RING_FINGER_DIP: usize = 15;
    pub const RING_FINGER_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;
}

/// Bones of the hand skeleton, as pairs of landmark indices
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4),
    (0, 5),
    (5, 6),
    (6, 7),
    (7, 8),
    (5, 9),
    (9, 10),
    (10, 11),
    (11, 12),
    (9, 13),
    (13, 14),
    (14, 15),
    (15, 16),
    (13, 17),
    (0, 17),
    (17, 18),
    (18, 19),
    (19, 20),
];

/// A single normalized hand landmark
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Landmark {
    /// Horizontal position, 0.0 at the left edge of the frame
    pub x: f32,
    /// Vertical position, 0.0 at the top edge of the frame
    pub y: f32,
    /// Depth relative to the wrist; smaller is closer to the camera
    pub z: f32,
}

impl Landmark {
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Which hand the detector believes it is looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Right => "Right",
        }
    }
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Landmarks of one detected hand.
///
/// Detectors should deliver exactly [`NUM_HAND_LANDMARKS`] points; shorter
/// sets are kept as-is and rejected by the classifier instead.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkSet {
    points: Vec<Landmark>,
    handedness: Handedness,
}

impl LandmarkSet {
    #[must_use]
    pub fn new(points: Vec<Landmark>, handedness: Handedness) -> Self {
        Self { points, handedness }
    }

    #[must_use]
    pub fn points(&self) -> &[Landmark] {
        &self.points
    }

    #[must_use]
    pub const fn handedness(&self) -> Handedness {
        self.handedness
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.points.len() == NUM_HAND_LANDMARKS
    }

    /// Get a landmark that gesture geometry depends on
    ///
    /// # Errors
    ///
    /// Returns `InvalidGestureGeometry` if the index is missing or the point
    /// has non-finite coordinates
    pub fn point(&self, idx: usize) -> Result<Landmark> {
        let point = self.points.get(idx).copied().ok_or_else(|| {
            Error::InvalidGestureGeometry(format!(
                "Landmark {idx} missing, set has {} points",
                self.points.len()
            ))
        })?;

        if !point.is_finite() {
            return Err(Error::InvalidGestureGeometry(format!(
                "Landmark {idx} has non-finite coordinates"
            )));
        }

        Ok(point)
    }

    /// Index fingertip, the point that drives the cursor
    ///
    /// # Errors
    ///
    /// Same as [`LandmarkSet::point`]
    pub fn index_tip(&self) -> Result<Landmark> {
        self.point(index::INDEX_FINGER_TIP)
    }
}
