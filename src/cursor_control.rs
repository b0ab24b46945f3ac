//! Cursor control module for X11-based systems.
//!
//! [`PointerDevice`] is the seam between the gesture state machine and the
//! host pointer. [`CursorController`] implements it on X11: motion goes
//! through `WarpPointer`, button events through the XTest extension.

use crate::{
    error::{Error, Result},
    utils::safe_cast::i32_to_i16_clamp,
};
use log::{debug, info};
use x11rb::{
    connection::{Connection, RequestConnection},
    protocol::{
        xproto::{ConnectionExt as _, Screen, BUTTON_PRESS_EVENT, BUTTON_RELEASE_EVENT},
        xtest::{self, ConnectionExt as _},
    },
    rust_connection::RustConnection,
};

/// Pointer buttons the actuator can drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Middle,
    Right,
}

impl MouseButton {
    /// X11 core button number
    #[must_use]
    pub const fn x11_detail(self) -> u8 {
        match self {
            Self::Left => 1,
            Self::Middle => 2,
            Self::Right => 3,
        }
    }
}

/// Host pointer device operating in absolute screen coordinates
pub trait PointerDevice {
    /// Move the cursor to `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns an error if the device rejects the request
    fn move_to(&mut self, x: i32, y: i32) -> Result<()>;

    /// Press and hold `button`
    ///
    /// # Errors
    ///
    /// Returns an error if the device rejects the request
    fn press(&mut self, button: MouseButton) -> Result<()>;

    /// Release `button`
    ///
    /// # Errors
    ///
    /// Returns an error if the device rejects the request
    fn release(&mut self, button: MouseButton) -> Result<()>;

    /// Click `button` `count` times
    ///
    /// # Errors
    ///
    /// Returns an error if the device rejects the request
    fn click(&mut self, button: MouseButton, count: u32) -> Result<()> {
        for _ in 0..count {
            self.press(button)?;
            self.release(button)?;
        }
        Ok(())
    }

    /// Screen dimensions in pixels
    fn screen_size(&self) -> (u32, u32);
}

/// Cursor control implementation for X11
pub struct CursorController {
    connection: RustConnection,
    screen: Screen,
    screen_width: u16,
    screen_height: u16,
}

impl CursorController {
    /// Create a new cursor controller
    ///
    /// # Errors
    ///
    /// Returns `CursorControl` if the X server is unreachable or lacks XTest
    pub fn new() -> Result<Self> {
        info!("Initializing X11 cursor controller");

        let (connection, screen_num) = RustConnection::connect(None)
            .map_err(|e| Error::CursorControl(format!("Failed to connect to X11: {e}")))?;

        let xtest_info = connection
            .extension_information(xtest::X11_EXTENSION_NAME)
            .map_err(|e| Error::CursorControl(format!("Failed to query XTest extension: {e}")))?;
        if xtest_info.is_none() {
            return Err(Error::CursorControl(
                "XTest extension not available on this display".to_string(),
            ));
        }

        let screen = connection
            .setup()
            .roots
            .get(screen_num)
            .ok_or_else(|| Error::CursorControl("Failed to get screen".to_string()))?
            .clone();

        let screen_width = screen.width_in_pixels;
        let screen_height = screen.height_in_pixels;

        info!("Connected to X11 display, screen: {}x{}", screen_width, screen_height);

        Ok(Self {
            connection,
            screen,
            screen_width,
            screen_height,
        })
    }

    /// Set cursor position (absolute), clamped to the screen
    ///
    /// # Errors
    ///
    /// Returns `CursorControl` if the warp request cannot be sent
    pub fn set_position(&self, x: i16, y: i16) -> Result<()> {
        let max_x = i16::try_from(self.screen_width.saturating_sub(1)).unwrap_or(i16::MAX);
        let max_y = i16::try_from(self.screen_height.saturating_sub(1)).unwrap_or(i16::MAX);
        let x = x.clamp(0, max_x);
        let y = y.clamp(0, max_y);

        debug!("Setting cursor position to ({}, {})", x, y);

        self.connection
            .warp_pointer(x11rb::NONE, self.screen.root, 0, 0, 0, 0, x, y)
            .map_err(|e| Error::CursorControl(format!("Failed to warp pointer: {e}")))?;

        self.flush()
    }

    fn fake_button(&self, event_type: u8, button: MouseButton) -> Result<()> {
        self.connection
            .xtest_fake_input(
                event_type,
                button.x11_detail(),
                x11rb::CURRENT_TIME,
                self.screen.root,
                0,
                0,
                0,
            )
            .map_err(|e| Error::CursorControl(format!("Failed to send fake button event: {e}")))?;

        self.flush()
    }

    fn flush(&self) -> Result<()> {
        self.connection
            .flush()
            .map_err(|e| Error::CursorControl(format!("Failed to flush connection: {e}")))
    }
}

impl PointerDevice for CursorController {
    fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
        self.set_position(i32_to_i16_clamp(x), i32_to_i16_clamp(y))
    }

    fn press(&mut self, button: MouseButton) -> Result<()> {
        debug!("Pressing {:?} button", button);
        self.fake_button(BUTTON_PRESS_EVENT, button)
    }

    fn release(&mut self, button: MouseButton) -> Result<()> {
        debug!("Releasing {:?} button", button);
        self.fake_button(BUTTON_RELEASE_EVENT, button)
    }

    fn screen_size(&self) -> (u32, u32) {
        (u32::from(self.screen_width), u32::from(self.screen_height))
    }
}
