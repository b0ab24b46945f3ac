//! Frame annotation for the camera preview.

use crate::{
    active_zone::ActiveZone,
    config::DisplayConfig,
    constants::{SKELETON_THICKNESS, ZONE_OUTLINE_THICKNESS},
    gesture::Action,
    landmarks::{LandmarkSet, HAND_CONNECTIONS},
    utils::safe_cast::f32_to_i32_clamp,
    Result,
};
use opencv::{
    core::{Mat, Point, Scalar},
    imgproc::{self, FILLED, LINE_8},
    prelude::*,
};

/// Marker color for an action (BGR), `None` when nothing should be drawn
#[must_use]
pub fn action_color(action: Action) -> Option<Scalar> {
    match action {
        Action::None => None,
        Action::Hover => Some(Scalar::new(0.0, 255.0, 0.0, 0.0)),
        Action::Press => Some(Scalar::new(0.0, 0.0, 255.0, 0.0)),
        Action::DoubleClick => Some(Scalar::new(255.0, 0.0, 0.0, 0.0)),
    }
}

#[allow(clippy::cast_precision_loss)] // Frame sizes are small
fn to_pixel(x: f32, y: f32, frame: &Mat) -> Point {
    let width = frame.cols();
    let height = frame.rows();
    Point::new(
        f32_to_i32_clamp(x * width as f32, 0, width - 1),
        f32_to_i32_clamp(y * height as f32, 0, height - 1),
    )
}

/// Draw the active zone, the hand skeleton and the action marker
///
/// # Errors
///
/// Returns an error if an `OpenCV` drawing call fails
pub fn annotate(
    frame: &mut Mat,
    zone: &ActiveZone,
    hand: Option<&LandmarkSet>,
    action: Action,
    options: &DisplayConfig,
) -> Result<()> {
    if frame.empty() {
        return Ok(());
    }

    if let Some(hand) = hand {
        if options.draw_skeleton {
            draw_skeleton(frame, hand)?;
        }

        if options.draw_marker {
            if let (Some(color), Ok(tip)) = (action_color(action), hand.index_tip()) {
                let center = to_pixel(tip.x, tip.y, frame);
                imgproc::circle(
                    frame,
                    center,
                    options.marker_radius,
                    color,
                    FILLED,
                    LINE_8,
                    0,
                )?;
            }
        }
    }

    if options.draw_zone {
        imgproc::rectangle(
            frame,
            zone.to_rect(),
            Scalar::new(0.0, 0.0, 0.0, 0.0),
            ZONE_OUTLINE_THICKNESS,
            LINE_8,
            0,
        )?;
    }

    Ok(())
}

fn draw_skeleton(frame: &mut Mat, hand: &LandmarkSet) -> Result<()> {
    let points: Vec<Point> = hand
        .points()
        .iter()
        .map(|p| to_pixel(p.x, p.y, frame))
        .collect();

    for (a, b) in HAND_CONNECTIONS {
        if let (Some(&start), Some(&end)) = (points.get(a), points.get(b)) {
            imgproc::line(
                frame,
                start,
                end,
                Scalar::new(255.0, 255.0, 255.0, 0.0),
                SKELETON_THICKNESS,
                LINE_8,
                0,
            )?;
        }
    }

    for &point in &points {
        imgproc::circle(frame, point, 3, Scalar::new(0.0, 0.0, 255.0, 0.0), FILLED, LINE_8, 0)?;
    }

    Ok(())
}

/// Flip a frame horizontally so the preview behaves like a mirror
///
/// # Errors
///
/// Returns an error if the `OpenCV` flip fails
pub fn mirror(frame: &Mat) -> Result<Mat> {
    let mut flipped = Mat::default();
    opencv::core::flip(frame, &mut flipped, 1)?;
    Ok(flipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::ZoneConfig,
        constants::NUM_HAND_LANDMARKS,
        landmarks::{Handedness, Landmark},
    };
    use opencv::core::{Vec3b, CV_8UC3};

    fn white_frame() -> Mat {
        Mat::new_rows_cols_with_default(480, 640, CV_8UC3, Scalar::all(255.0)).unwrap()
    }

    fn zone() -> ActiveZone {
        ActiveZone::from_fractions(640, 480, &ZoneConfig::default()).unwrap()
    }

    #[test]
    fn test_zone_outline_drawn() {
        let mut frame = white_frame();
        annotate(&mut frame, &zone(), None, Action::None, &DisplayConfig::default()).unwrap();
        let corner = *frame.at_2d::<Vec3b>(9, 96).unwrap();
        assert_eq!(corner, Vec3b::from([0, 0, 0]));
        let outside = *frame.at_2d::<Vec3b>(400, 20).unwrap();
        assert_eq!(outside, Vec3b::from([255, 255, 255]));
    }

    #[test]
    fn test_marker_color_follows_action() {
        let mut points = vec![Landmark::new(0.5, 0.5, 0.0); NUM_HAND_LANDMARKS];
        points[8] = Landmark::new(0.25, 0.5, 0.0);
        let hand = LandmarkSet::new(points, Handedness::Left);
        let options = DisplayConfig {
            draw_skeleton: false,
            draw_zone: false,
            ..DisplayConfig::default()
        };

        let mut frame = white_frame();
        annotate(&mut frame, &zone(), Some(&hand), Action::Press, &options).unwrap();
        let center = *frame.at_2d::<Vec3b>(240, 160).unwrap();
        assert_eq!(center, Vec3b::from([0, 0, 255]));
    }

    #[test]
    fn test_no_marker_without_action() {
        let hand = LandmarkSet::new(vec![Landmark::new(0.25, 0.5, 0.0); NUM_HAND_LANDMARKS], Handedness::Left);
        let options = DisplayConfig {
            draw_skeleton: false,
            draw_zone: false,
            ..DisplayConfig::default()
        };

        let mut frame = white_frame();
        annotate(&mut frame, &zone(), Some(&hand), Action::None, &options).unwrap();
        let center = *frame.at_2d::<Vec3b>(240, 160).unwrap();
        assert_eq!(center, Vec3b::from([255, 255, 255]));
    }

    #[test]
    fn test_mirror_flips_columns() {
        let mut frame = white_frame();
        *frame.at_2d_mut::<Vec3b>(10, 0).unwrap() = Vec3b::from([1, 2, 3]);
        let flipped = mirror(&frame).unwrap();
        assert_eq!(*flipped.at_2d::<Vec3b>(10, 639).unwrap(), Vec3b::from([1, 2, 3]));
    }

    #[test]
    fn test_action_colors() {
        assert!(action_color(Action::None).is_none());
        assert!(action_color(Action::Hover).is_some());
        assert_ne!(action_color(Action::Press), action_color(Action::DoubleClick));
    }
}
