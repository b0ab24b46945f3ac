//! Hand landmark detection.
//!
//! The actuator depends only on [`LandmarkDetector`]. [`OnnxHandDetector`]
//! adapts a 21-point hand landmark model exported to ONNX: it takes a
//! `[1, 224, 224, 3]` RGB tensor and returns the landmarks in input pixels,
//! a hand presence score and a right-handedness score.

use crate::{
    constants::{HAND_LANDMARK_INPUT_SIZE, LANDMARK_COORDINATES, NUM_HAND_LANDMARKS},
    landmarks::{Handedness, Landmark, LandmarkSet},
    utils::image_conversion::bgr_mat_to_nhwc_f32,
    Error, Result,
};
use ndarray::{Array4, CowArray};
use opencv::core::Mat;
use ort::{Environment, Session, Value};
use std::path::Path;
use std::sync::Arc;

/// Source of hand landmarks for a frame
pub trait LandmarkDetector {
    /// Detect at most one hand in `frame`
    ///
    /// # Errors
    ///
    /// Returns an error if inference fails; the capture loop treats that
    /// like a frame without a hand
    fn detect(&mut self, frame: &Mat) -> Result<Option<LandmarkSet>>;
}

/// Hand landmark detector using `ONNX` Runtime
pub struct OnnxHandDetector {
    session: Session,
    input_size: i32,
    min_presence: f32,
}

impl OnnxHandDetector {
    /// Create a new detector from an `ONNX` model file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The ONNX model file cannot be loaded
    /// - The model has no inputs or fewer than three outputs
    /// - The ONNX runtime environment cannot be created
    pub fn new<P: AsRef<Path>>(model_path: P, min_presence: f32) -> Result<Self> {
        log::info!(
            "Initializing OnnxHandDetector with model: {}",
            model_path.as_ref().display()
        );
        let environment = Arc::new(
            Environment::builder()
                .with_name("hand_detector")
                .with_log_level(ort::LoggingLevel::Warning)
                .build()?,
        );

        let session = ort::SessionBuilder::new(&environment)?
            .with_optimization_level(ort::GraphOptimizationLevel::Level3)?
            .with_model_from_file(model_path)?;

        if session.inputs.is_empty() {
            return Err(Error::ModelError("Model has no inputs".to_string()));
        }
        if session.outputs.len() < 3 {
            return Err(Error::ModelError(format!(
                "Expected landmark, presence and handedness outputs, model has {}",
                session.outputs.len()
            )));
        }

        Ok(Self {
            session,
            input_size: HAND_LANDMARK_INPUT_SIZE,
            min_presence,
        })
    }

    /// Run forward pass and flatten every output tensor
    fn forward(&self, inputs: Array4<f32>) -> Result<Vec<Vec<f32>>> {
        let cow_array = CowArray::from(inputs.into_dyn());
        let input_tensor = Value::from_array(self.session.allocator(), &cow_array)?;

        let outputs = self.session.run(vec![input_tensor])?;

        outputs
            .iter()
            .map(|output| -> Result<Vec<f32>> {
                let tensor = output.try_extract::<f32>()?;
                let values: Vec<f32> = tensor.view().iter().copied().collect();
                Ok(values)
            })
            .collect()
    }
}

impl LandmarkDetector for OnnxHandDetector {
    fn detect(&mut self, frame: &Mat) -> Result<Option<LandmarkSet>> {
        let input = bgr_mat_to_nhwc_f32(frame, self.input_size)?;
        let outputs = self.forward(input)?;
        parse_hand_outputs(&outputs, self.input_size, self.min_presence)
    }
}

/// Turn raw model outputs into a landmark set.
///
/// `outputs[0]` holds `x, y, z` triples in input pixels, `outputs[1]` the
/// hand presence score and `outputs[2]` the probability of a right hand.
/// Returns `None` when presence is below `min_presence`.
///
/// # Errors
///
/// Returns `ModelOutputError` if an output is missing or too short
#[allow(clippy::cast_precision_loss)] // Input size is small
pub fn parse_hand_outputs(outputs: &[Vec<f32>], input_size: i32, min_presence: f32) -> Result<Option<LandmarkSet>> {
    let [coords, presence, handedness, ..] = outputs else {
        return Err(Error::ModelOutputError(format!(
            "Expected at least 3 outputs, got {}",
            outputs.len()
        )));
    };

    let presence = *presence
        .first()
        .ok_or_else(|| Error::ModelOutputError("Empty presence output".to_string()))?;
    if presence < min_presence {
        log::debug!("Hand presence {:.2} below threshold {:.2}", presence, min_presence);
        return Ok(None);
    }

    let right_score = *handedness
        .first()
        .ok_or_else(|| Error::ModelOutputError("Empty handedness output".to_string()))?;
    let handedness = if right_score > 0.5 {
        Handedness::Right
    } else {
        Handedness::Left
    };

    let needed = NUM_HAND_LANDMARKS * LANDMARK_COORDINATES;
    if coords.len() < needed {
        return Err(Error::ModelOutputError(format!(
            "Expected {needed} landmark values, got {}",
            coords.len()
        )));
    }

    let scale = input_size as f32;
    let points = coords[..needed]
        .chunks_exact(LANDMARK_COORDINATES)
        .map(|c| Landmark::new(c[0] / scale, c[1] / scale, c[2] / scale))
        .collect();

    Ok(Some(LandmarkSet::new(points, handedness)))
}
