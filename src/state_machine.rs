//! Edge-triggered translation of gesture actions into pointer button events.

use crate::{
    constants::DOUBLE_CLICK_COUNT,
    cursor_control::{MouseButton, PointerDevice},
    gesture::Action,
    Result,
};
use log::debug;

/// Tracks the previous and current action and fires button events only
/// when the action changes.
///
/// Releases are only sent while the button is held, so entering `Hover` or
/// `None` repeatedly never produces duplicate releases.
#[derive(Debug, Clone)]
pub struct GestureStateMachine {
    previous: Action,
    current: Action,
    button: MouseButton,
    button_held: bool,
}

impl Default for GestureStateMachine {
    fn default() -> Self {
        Self::new(MouseButton::Left)
    }
}

impl GestureStateMachine {
    #[must_use]
    pub const fn new(button: MouseButton) -> Self {
        Self {
            previous: Action::None,
            current: Action::None,
            button,
            button_held: false,
        }
    }

    #[must_use]
    pub const fn previous(&self) -> Action {
        self.previous
    }

    #[must_use]
    pub const fn current(&self) -> Action {
        self.current
    }

    #[must_use]
    pub const fn is_button_held(&self) -> bool {
        self.button_held
    }

    /// Feed this cycle's action and fire the events for the transition.
    ///
    /// The new action is recorded even when the device fails, so a failed
    /// event is not retried on the next frame. Returns whether the action
    /// changed.
    ///
    /// # Errors
    ///
    /// Returns the pointer device's error
    pub fn advance<P: PointerDevice + ?Sized>(&mut self, action: Action, pointer: &mut P) -> Result<bool> {
        self.previous = self.current;
        self.current = action;

        if self.previous == self.current {
            return Ok(false);
        }

        debug!("Gesture transition {:?} -> {:?}", self.previous, self.current);

        match self.current {
            Action::None | Action::Hover => self.release_held(pointer)?,
            Action::Press => {
                if !self.button_held {
                    pointer.press(self.button)?;
                    self.button_held = true;
                }
            }
            Action::DoubleClick => {
                self.release_held(pointer)?;
                pointer.click(self.button, DOUBLE_CLICK_COUNT)?;
            }
        }

        Ok(true)
    }

    /// Release the button if it is held
    ///
    /// # Errors
    ///
    /// Returns the pointer device's error; the button stays held so a later
    /// call (shutdown included) sends the release again
    pub fn release_held<P: PointerDevice + ?Sized>(&mut self, pointer: &mut P) -> Result<()> {
        if self.button_held {
            pointer.release(self.button)?;
            self.button_held = false;
        }
        Ok(())
    }
}
