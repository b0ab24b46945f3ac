//! Conversion of OpenCV frames into model input tensors.

use crate::{utils::safe_cast::usize_to_i32, Error, Result};
use ndarray::Array4;
use opencv::core::{Mat, Size, Vec3f, CV_32F, CV_8UC3};
use opencv::imgproc::{self, InterpolationFlags};
use opencv::prelude::*;

/// Convert a BGR frame into a `[1, size, size, 3]` RGB tensor scaled to `[0, 1]`
///
/// The frame is stretched to the square input without letterboxing, so
/// normalized coordinates predicted on the tensor map straight back onto
/// the frame.
///
/// # Errors
///
/// Returns an error if the frame is empty, not 8-bit 3-channel, or an
/// `OpenCV` conversion fails
#[allow(clippy::cast_sign_loss)] // Size is validated positive
pub fn bgr_mat_to_nhwc_f32(frame: &Mat, size: i32) -> Result<Array4<f32>> {
    if size <= 0 {
        return Err(Error::InvalidInput(format!("Tensor size must be positive, got {size}")));
    }
    if frame.empty() || frame.rows() <= 0 || frame.cols() <= 0 {
        return Err(Error::InvalidInput("Cannot convert an empty frame".to_string()));
    }
    if frame.typ() != CV_8UC3 {
        return Err(Error::InvalidInput(format!(
            "Expected an 8-bit 3-channel frame, got type {}",
            frame.typ()
        )));
    }

    let mut resized = Mat::default();
    imgproc::resize(
        frame,
        &mut resized,
        Size::new(size, size),
        0.0,
        0.0,
        InterpolationFlags::INTER_LINEAR as i32,
    )?;

    let mut rgb_image = Mat::default();
    imgproc::cvt_color(&resized, &mut rgb_image, imgproc::COLOR_BGR2RGB, 0)?;

    let mut float_image = Mat::default();
    rgb_image.convert_to(&mut float_image, CV_32F, 1.0 / 255.0, 0.0)?;

    let side = size as usize;
    let channels = 3;
    let mut data = vec![0.0f32; side * side * channels];

    for row in 0..side {
        for col in 0..side {
            let pixel = float_image.at_2d::<Vec3f>(usize_to_i32(row)?, usize_to_i32(col)?)?;
            let base = (row * side + col) * channels;
            data[base..base + channels].copy_from_slice(&pixel.0);
        }
    }

    Array4::from_shape_vec((1, side, side, channels), data)
        .map_err(|e| Error::InvalidInput(format!("Failed to create tensor from frame: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{Scalar, CV_8UC1};

    #[test]
    fn test_uniform_frame_conversion() {
        let frame = Mat::new_rows_cols_with_default(48, 64, CV_8UC3, Scalar::new(51.0, 102.0, 255.0, 0.0)).unwrap();
        let tensor = bgr_mat_to_nhwc_f32(&frame, 16).unwrap();

        assert_eq!(tensor.shape(), &[1, 16, 16, 3]);
        // Channels come out in RGB order
        assert!((tensor[[0, 7, 9, 0]] - 1.0).abs() < 1e-5);
        assert!((tensor[[0, 7, 9, 1]] - 0.4).abs() < 1e-5);
        assert!((tensor[[0, 7, 9, 2]] - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_rejects_empty_frame() {
        assert!(bgr_mat_to_nhwc_f32(&Mat::default(), 16).is_err());
    }

    #[test]
    fn test_rejects_grayscale_frame() {
        let frame = Mat::new_rows_cols_with_default(8, 8, CV_8UC1, Scalar::all(0.0)).unwrap();
        assert!(bgr_mat_to_nhwc_f32(&frame, 16).is_err());
    }

    #[test]
    fn test_rejects_non_positive_size() {
        let frame = Mat::new_rows_cols_with_default(8, 8, CV_8UC3, Scalar::all(0.0)).unwrap();
        assert!(bgr_mat_to_nhwc_f32(&frame, 0).is_err());
    }
}
