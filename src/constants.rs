//! Constants used throughout the application

/// Default capture resolution
pub const FRAME_WIDTH: i32 = 640;
pub const FRAME_HEIGHT: i32 = 480;

/// Active zone defaults, as fractions of the frame size.
/// The bottom margin is taken relative to the zone width.
pub const DEFAULT_ZONE_MARGIN_X_FRACTION: f64 = 0.15;
pub const DEFAULT_ZONE_TOP_FRACTION: f64 = 0.02;
pub const DEFAULT_ZONE_BOTTOM_WIDTH_FRACTION: f64 = 0.45;

/// Smoothing divisor used for small (likely noise) movements
pub const DEFAULT_NOISE_FILTER_FACTOR: f64 = 6.0;

/// Smoothing divisor used for large (intentional) movements
pub const DEFAULT_MOTION_FILTER_FACTOR: f64 = 4.0;

/// Chebyshev distance in screen pixels separating noise from motion
pub const DEFAULT_HYSTERESIS_DISTANCE: f64 = 10.0;

/// Number of landmarks in a hand skeleton
pub const NUM_HAND_LANDMARKS: usize = 21;

/// Values per landmark in the model output (x, y, z)
pub const LANDMARK_COORDINATES: usize = 3;

/// Side length of the hand landmark model input
pub const HAND_LANDMARK_INPUT_SIZE: i32 = 224;

/// Minimum hand presence score to accept a detection
pub const DEFAULT_MIN_HAND_PRESENCE: f32 = 0.8;

/// Default hand landmark model location
pub const DEFAULT_HAND_MODEL_PATH: &str = "assets/hand_landmark.onnx";

/// Pause after a failed frame read before the next cycle
pub const FRAME_RETRY_DELAY_MS: u64 = 10;

/// Overlay drawing parameters
pub const ACTION_MARKER_RADIUS: i32 = 50;
pub const ZONE_OUTLINE_THICKNESS: i32 = 2;
pub const SKELETON_THICKNESS: i32 = 2;

/// Clicks issued for a double-click gesture
pub const DOUBLE_CLICK_COUNT: u32 = 2;
