//! Gesture classification from hand landmark geometry.

use crate::{
    landmarks::{index, Handedness, LandmarkSet},
    Result,
};

/// Discrete pointer action derived from a hand pose
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Action {
    /// No hand, or the index finger is lowered
    #[default]
    None,
    /// Index raised, thumb open: move the cursor
    Hover,
    /// Index raised, thumb closed: hold the button
    Press,
    /// Reserved for a double-click gesture; never produced by [`classify`]
    DoubleClick,
}

impl Action {
    /// Whether this action moves the cursor
    #[must_use]
    pub const fn is_tracking(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Classify a hand pose into an [`Action`]
///
/// # Errors
///
/// Returns `InvalidGestureGeometry` if a landmark the geometry needs is
/// missing or non-finite
pub fn classify(landmarks: &LandmarkSet) -> Result<Action> {
    if !is_index_raised(landmarks)? {
        return Ok(Action::None);
    }

    if is_thumb_closed(landmarks)? {
        Ok(Action::Press)
    } else {
        Ok(Action::Hover)
    }
}

/// The fingertip is above its knuckle (image y grows downwards)
///
/// # Errors
///
/// See [`classify`]
pub fn is_index_raised(landmarks: &LandmarkSet) -> Result<bool> {
    let tip = landmarks.point(index::INDEX_FINGER_TIP)?;
    let knuckle = landmarks.point(index::INDEX_FINGER_MCP)?;
    Ok(tip.y < knuckle.y)
}

/// The thumb tip is folded towards the palm past its first joint
///
/// # Errors
///
/// See [`classify`]
pub fn is_thumb_closed(landmarks: &LandmarkSet) -> Result<bool> {
    let tip = landmarks.point(index::THUMB_TIP)?;
    let joint = landmarks.point(index::THUMB_IP)?;
    Ok(match landmarks.handedness() {
        Handedness::Left => tip.x < joint.x,
        Handedness::Right => tip.x > joint.x,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{constants::NUM_HAND_LANDMARKS, landmarks::Landmark, Error};

    fn hand(index_tip_y: f32, thumb_tip_x: f32, handedness: Handedness) -> LandmarkSet {
        let mut points = vec![Landmark::new(0.5, 0.5, 0.0); NUM_HAND_LANDMARKS];
        points[index::INDEX_FINGER_MCP] = Landmark::new(0.5, 0.6, 0.0);
        points[index::INDEX_FINGER_TIP] = Landmark::new(0.5, index_tip_y, 0.0);
        points[index::THUMB_IP] = Landmark::new(0.4, 0.6, 0.0);
        points[index::THUMB_TIP] = Landmark::new(thumb_tip_x, 0.6, 0.0);
        LandmarkSet::new(points, handedness)
    }

    #[test]
    fn test_lowered_index_is_none() {
        assert_eq!(classify(&hand(0.7, 0.3, Handedness::Left)).unwrap(), Action::None);
        assert_eq!(classify(&hand(0.6, 0.3, Handedness::Right)).unwrap(), Action::None);
    }

    #[test]
    fn test_left_hand_thumb() {
        assert_eq!(classify(&hand(0.3, 0.3, Handedness::Left)).unwrap(), Action::Press);
        assert_eq!(classify(&hand(0.3, 0.5, Handedness::Left)).unwrap(), Action::Hover);
    }

    #[test]
    fn test_right_hand_thumb_is_mirrored() {
        assert_eq!(classify(&hand(0.3, 0.5, Handedness::Right)).unwrap(), Action::Press);
        assert_eq!(classify(&hand(0.3, 0.3, Handedness::Right)).unwrap(), Action::Hover);
    }

    #[test]
    fn test_truncated_set_is_rejected() {
        let set = LandmarkSet::new(vec![Landmark::default(); 5], Handedness::Left);
        assert!(matches!(classify(&set), Err(Error::InvalidGestureGeometry(_))));
    }

    #[test]
    fn test_tracking_actions() {
        assert!(!Action::None.is_tracking());
        assert!(Action::Hover.is_tracking());
        assert!(Action::Press.is_tracking());
        assert!(Action::DoubleClick.is_tracking());
        assert_eq!(Action::default(), Action::None);
    }
}
