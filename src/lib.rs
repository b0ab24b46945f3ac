//! Hand gesture pointer control from a webcam feed.
//!
//! This library turns a raised index finger into cursor motion and a
//! folded thumb into a held mouse button, using:
//! - ONNX Runtime for hand landmark inference
//! - `OpenCV` for capture, image conversion and annotation
//! - X11 and the XTest extension for pointer events
//!
//! Each cycle of the pipeline:
//! 1. Acquire a frame from the camera
//! 2. Detect the 21 hand landmarks
//! 3. Classify the hand pose into an [`gesture::Action`]
//! 4. Smooth the index fingertip with a hysteresis filter
//! 5. Stretch the active zone onto the screen and move the pointer
//! 6. Fire edge-triggered press and release events
//! 7. Annotate, mirror and publish the frame for display
//!
//! # Examples
//!
//! ## Running the actuator
//!
//! ```no_run
//! use hand_actuator::{
//!     actuator::HandActuator, capture::OpenCvCamera, config::Config,
//!     cursor_control::CursorController, hand_detection::OnnxHandDetector,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let detector = OnnxHandDetector::new(&config.detector.model, config.detector.min_presence)?;
//! let pointer = CursorController::new()?;
//!
//! let mut actuator = HandActuator::new(config, OpenCvCamera, detector, pointer);
//! actuator.start()?;
//!
//! let frames = actuator.publisher();
//! if let Some((sequence, _frame)) = frames.read_with_sequence() {
//!     println!("Latest frame #{sequence}");
//! }
//!
//! actuator.stop()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Classifying a hand pose
//!
//! ```
//! use hand_actuator::{
//!     gesture::{classify, Action},
//!     landmarks::{index, Handedness, Landmark, LandmarkSet},
//! };
//!
//! let mut points = vec![Landmark::new(0.5, 0.5, 0.0); 21];
//! points[index::INDEX_FINGER_TIP] = Landmark::new(0.5, 0.2, 0.0);
//! points[index::THUMB_IP] = Landmark::new(0.6, 0.5, 0.0);
//! points[index::THUMB_TIP] = Landmark::new(0.7, 0.5, 0.0);
//!
//! let hand = LandmarkSet::new(points, Handedness::Left);
//! assert_eq!(classify(&hand).unwrap(), Action::Hover);
//! ```

/// Rectangular region of the frame mapped onto the screen
pub mod active_zone;

/// Capture loop and per-cycle gesture tracking
pub mod actuator;

/// Camera access
pub mod capture;

/// Configuration management
pub mod config;

/// Constants used throughout the application
pub mod constants;

/// Pointer control module for X11 systems
pub mod cursor_control;

/// Error types and result handling
pub mod error;

/// Position filters for smoothing the cursor
pub mod filters;

/// Gesture classification
pub mod gesture;

/// Hand landmark detection
pub mod hand_detection;

/// Hand landmark types and indices
pub mod landmarks;

/// Active zone to screen coordinate mapping
pub mod mapping;

/// Frame annotation
pub mod overlay;

/// Latest-frame handoff to display consumers
pub mod publisher;

/// Edge-triggered button state machine
pub mod state_machine;

/// Utility functions for casts and image conversion
pub mod utils;

pub use error::{Error, Result};
