//! Capture loop turning hand gestures into pointer events.
//!
//! [`GestureTracker`] holds the per-run state (filter, mapper, state
//! machine) and processes one detection at a time. [`HandActuator`] owns the
//! adapters and runs the tracker on a worker thread, publishing annotated
//! frames for display.

use crate::{
    active_zone::ActiveZone,
    capture::{Camera, FrameSource},
    config::{Config, DisplayConfig},
    constants::FRAME_RETRY_DELAY_MS,
    cursor_control::{MouseButton, PointerDevice},
    filters::{create_filter, CursorFilter},
    gesture::{classify, Action},
    hand_detection::LandmarkDetector,
    landmarks::LandmarkSet,
    mapping::CoordinateMapper,
    overlay,
    publisher::FramePublisher,
    state_machine::GestureStateMachine,
    utils::safe_cast::f64_to_i32_clamp,
    Error, Result,
};
use log::{debug, info, warn};
use opencv::core::Mat;
use parking_lot::Mutex;
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

/// What a single cycle decided
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CycleOutcome {
    /// Classified action, `None` without a hand
    pub action: Action,
    /// Screen position the pointer was moved to, if any
    pub cursor: Option<(i32, i32)>,
}

/// Per-run gesture processing state
pub struct GestureTracker {
    zone: ActiveZone,
    filter: Box<dyn CursorFilter>,
    mapper: CoordinateMapper,
    machine: GestureStateMachine,
    screen: (f64, f64),
    max_position: (i32, i32),
}

impl GestureTracker {
    /// Build a tracker for a screen of `screen_size` pixels. The filter
    /// starts at the screen center.
    ///
    /// # Errors
    ///
    /// Returns an error if the zone or filter configuration is invalid
    pub fn new(config: &Config, screen_size: (u32, u32)) -> Result<Self> {
        let zone = ActiveZone::from_fractions(config.camera.width, config.camera.height, &config.zone)?;
        let screen = (f64::from(screen_size.0), f64::from(screen_size.1));
        let filter = create_filter(&config.filter, (screen.0 / 2.0, screen.1 / 2.0))?;
        let max_position = (
            i32::try_from(screen_size.0.saturating_sub(1)).unwrap_or(i32::MAX),
            i32::try_from(screen_size.1.saturating_sub(1)).unwrap_or(i32::MAX),
        );

        debug!(
            "Tracker for {}x{} screen, zone {:?}, filter {}",
            screen_size.0,
            screen_size.1,
            zone.to_rect(),
            filter.name()
        );

        Ok(Self {
            mapper: CoordinateMapper::new(zone, screen.0, screen.1),
            zone,
            filter,
            machine: GestureStateMachine::new(MouseButton::Left),
            screen,
            max_position,
        })
    }

    #[must_use]
    pub const fn zone(&self) -> &ActiveZone {
        &self.zone
    }

    #[must_use]
    pub const fn state(&self) -> &GestureStateMachine {
        &self.machine
    }

    #[must_use]
    pub const fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    /// Classify `hand`, move the pointer and fire button transitions.
    ///
    /// Pointer failures are logged and swallowed.
    pub fn process<P: PointerDevice + ?Sized>(&mut self, hand: Option<&LandmarkSet>, pointer: &mut P) -> CycleOutcome {
        let action = hand.map_or(Action::None, |hand| {
            classify(hand).unwrap_or_else(|e| {
                debug!("Gesture classification failed: {}", e);
                Action::None
            })
        });

        let mut cursor = None;
        if action.is_tracking() {
            if let Some(tip) = hand.and_then(|hand| hand.index_tip().ok()) {
                let (fx, fy) = self
                    .filter
                    .apply(f64::from(tip.x) * self.screen.0, f64::from(tip.y) * self.screen.1);
                let (sx, sy) = self.mapper.map(fx, fy);
                let target = (
                    f64_to_i32_clamp(sx, 0, self.max_position.0),
                    f64_to_i32_clamp(sy, 0, self.max_position.1),
                );

                match pointer.move_to(target.0, target.1) {
                    Ok(()) => cursor = Some(target),
                    Err(e) => warn!("Failed to move pointer: {}", e),
                }
            }
        }

        if let Err(e) = self.machine.advance(action, pointer) {
            warn!("Failed to send button event: {}", e);
        }

        CycleOutcome { action, cursor }
    }

    /// Release any held button
    pub fn shutdown<P: PointerDevice + ?Sized>(&mut self, pointer: &mut P) {
        if let Err(e) = self.machine.release_held(pointer) {
            warn!("Failed to release button on shutdown: {}", e);
        }
    }
}

/// Runs gesture control on a background thread
pub struct HandActuator<C, D, P>
where
    C: Camera,
    D: LandmarkDetector + Send + 'static,
    P: PointerDevice + Send + 'static,
{
    config: Config,
    camera: C,
    adapters: Option<(D, P)>,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<Option<(D, P)>>>,
    publisher: FramePublisher<Mat>,
}

impl<C, D, P> HandActuator<C, D, P>
where
    C: Camera,
    D: LandmarkDetector + Send + 'static,
    P: PointerDevice + Send + 'static,
{
    #[must_use]
    pub fn new(config: Config, camera: C, detector: D, pointer: P) -> Self {
        Self {
            config,
            camera,
            adapters: Some((detector, pointer)),
            running: Arc::new(AtomicBool::new(false)),
            worker: None,
            publisher: FramePublisher::new(),
        }
    }

    /// Open the camera and start the capture loop
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an invalid configuration, `DeviceUnavailable`
    /// if the camera cannot be opened, `WorkerPanicked` if a previous worker
    /// panicked and took the adapters with it, or an error if the thread
    /// cannot spawn
    pub fn start(&mut self) -> Result<()> {
        if self.is_running() {
            info!("Hand actuator already running");
            return Ok(());
        }

        // Reap a worker that ended on its own
        self.stop()?;
        self.config.validate()?;

        let screen_size = match &self.adapters {
            Some((_, pointer)) => pointer.screen_size(),
            None => return Err(Error::WorkerPanicked),
        };
        let tracker = GestureTracker::new(&self.config, screen_size)?;
        let source = self.camera.open(&self.config.camera)?;

        self.spawn_worker(thread::Builder::new().name("hand-actuator".to_string()), source, tracker)
    }

    // The adapters travel through a shared slot so a failed spawn leaves
    // them with the actuator
    fn spawn_worker(&mut self, builder: thread::Builder, source: C::Source, tracker: GestureTracker) -> Result<()> {
        let handoff = Arc::new(Mutex::new(self.adapters.take()));
        let worker_handoff = Arc::clone(&handoff);

        self.running.store(true, Ordering::Release);
        let running = Arc::clone(&self.running);
        let publisher = self.publisher.clone();
        let display = self.config.display.clone();

        let spawned = builder.spawn(move || {
            let (detector, pointer) = worker_handoff.lock().take()?;
            Some(capture_loop(source, detector, pointer, tracker, &running, &publisher, &display))
        });

        match spawned {
            Ok(handle) => {
                self.worker = Some(handle);
                info!("Hand actuator started");
                Ok(())
            }
            Err(e) => {
                self.running.store(false, Ordering::Release);
                self.adapters = handoff.lock().take();
                warn!("Failed to spawn capture worker: {}", e);
                Err(e.into())
            }
        }
    }

    /// Stop the capture loop and wait for it to release the button and the
    /// camera. Does nothing when stopped.
    ///
    /// # Errors
    ///
    /// Returns `WorkerPanicked` if the worker thread panicked; the adapters
    /// are lost in that case
    pub fn stop(&mut self) -> Result<()> {
        self.running.store(false, Ordering::Release);

        let Some(handle) = self.worker.take() else {
            return Ok(());
        };

        let adapters = handle
            .join()
            .map_err(|_| Error::WorkerPanicked)?
            .ok_or(Error::WorkerPanicked)?;
        self.adapters = Some(adapters);
        info!("Hand actuator stopped");
        Ok(())
    }

    /// Whether the worker thread is alive
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.worker.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Handle for reading the latest annotated frame
    #[must_use]
    pub fn publisher(&self) -> FramePublisher<Mat> {
        self.publisher.clone()
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }
}

impl<C, D, P> Drop for HandActuator<C, D, P>
where
    C: Camera,
    D: LandmarkDetector + Send + 'static,
    P: PointerDevice + Send + 'static,
{
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            warn!("Error while stopping hand actuator: {}", e);
        }
    }
}

fn capture_loop<S, D, P>(
    mut source: S,
    mut detector: D,
    mut pointer: P,
    mut tracker: GestureTracker,
    running: &AtomicBool,
    publisher: &FramePublisher<Mat>,
    display: &DisplayConfig,
) -> (D, P)
where
    S: FrameSource,
    D: LandmarkDetector,
    P: PointerDevice,
{
    debug!("Capture loop running");

    while running.load(Ordering::Acquire) {
        let mut frame = match source.read_frame() {
            Ok(frame) => frame,
            Err(e) => {
                debug!("Skipping cycle: {}", e);
                thread::sleep(Duration::from_millis(FRAME_RETRY_DELAY_MS));
                continue;
            }
        };

        let hand = detector.detect(&frame).unwrap_or_else(|e| {
            warn!("Hand detection failed: {}", e);
            None
        });

        let outcome = tracker.process(hand.as_ref(), &mut pointer);

        if let Err(e) = overlay::annotate(&mut frame, tracker.zone(), hand.as_ref(), outcome.action, display) {
            warn!("Failed to annotate frame: {}", e);
        }

        let frame = if display.mirror {
            overlay::mirror(&frame).unwrap_or_else(|e| {
                warn!("Failed to mirror frame: {}", e);
                frame
            })
        } else {
            frame
        };

        publisher.publish(frame);
    }

    tracker.shutdown(&mut pointer);
    drop(source);
    debug!("Capture loop finished");

    (detector, pointer)
}
