//! Camera access for the capture loop.

use crate::{config::CameraConfig, Error, Result};
use log::{debug, info, warn};
use opencv::{
    core::Mat,
    prelude::*,
    videoio::{self, VideoCapture, CAP_PROP_BUFFERSIZE, CAP_PROP_FRAME_HEIGHT, CAP_PROP_FRAME_WIDTH},
};

/// An open stream of frames. Dropping it releases the device.
pub trait FrameSource {
    /// Block until the next frame is available
    ///
    /// # Errors
    ///
    /// Returns `FrameAcquisitionFailed` when no frame could be read; the
    /// caller skips the cycle
    fn read_frame(&mut self) -> Result<Mat>;
}

/// A camera that can be opened repeatedly
pub trait Camera {
    /// Stream handed to the capture worker
    type Source: FrameSource + Send + 'static;

    /// Open the device at the configured resolution
    ///
    /// # Errors
    ///
    /// Returns `DeviceUnavailable` if the device cannot be opened
    fn open(&mut self, config: &CameraConfig) -> Result<Self::Source>;
}

/// Webcam accessed through `OpenCV` `videoio`
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenCvCamera;

impl Camera for OpenCvCamera {
    type Source = CameraStream;

    fn open(&mut self, config: &CameraConfig) -> Result<CameraStream> {
        info!("Opening camera {}", config.index);

        let mut capture = VideoCapture::new(config.index, videoio::CAP_ANY)
            .map_err(|e| Error::DeviceUnavailable(format!("camera {}: {e}", config.index)))?;
        let opened = capture
            .is_opened()
            .map_err(|e| Error::DeviceUnavailable(format!("camera {}: {e}", config.index)))?;
        if !opened {
            return Err(Error::DeviceUnavailable(format!("camera {} could not be opened", config.index)));
        }

        capture.set(CAP_PROP_FRAME_WIDTH, f64::from(config.width))?;
        capture.set(CAP_PROP_FRAME_HEIGHT, f64::from(config.height))?;

        // Reduce buffer size for lower latency
        if !capture.set(CAP_PROP_BUFFERSIZE, 1.0)? {
            debug!("Camera backend ignored buffer size request");
        }

        info!(
            "Camera {} opened at {}x{}",
            config.index,
            capture.get(CAP_PROP_FRAME_WIDTH)?,
            capture.get(CAP_PROP_FRAME_HEIGHT)?
        );

        Ok(CameraStream {
            capture,
            index: config.index,
        })
    }
}

/// Open `OpenCV` capture device
pub struct CameraStream {
    capture: VideoCapture,
    index: i32,
}

impl FrameSource for CameraStream {
    fn read_frame(&mut self) -> Result<Mat> {
        let mut frame = Mat::default();
        let grabbed = self
            .capture
            .read(&mut frame)
            .map_err(|e| Error::FrameAcquisitionFailed(e.to_string()))?;

        if !grabbed || frame.empty() {
            return Err(Error::FrameAcquisitionFailed(format!(
                "camera {} returned no frame",
                self.index
            )));
        }

        Ok(frame)
    }
}

impl Drop for CameraStream {
    fn drop(&mut self) {
        match self.capture.release() {
            Ok(()) => info!("Camera {} released", self.index),
            Err(e) => warn!("Failed to release camera {}: {}", self.index, e),
        }
    }
}
