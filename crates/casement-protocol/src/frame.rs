//! Window geometry.

use serde::{Deserialize, Serialize};

use crate::error::{ControlError, Result};

/// Outer geometry of a window in logical pixels.
///
/// The serde field names are part of the wire contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// X coordinate of the top-left corner.
    pub left: f64,
    /// Y coordinate of the top-left corner.
    pub top: f64,
    /// Width of the window.
    pub width: f64,
    /// Height of the window.
    pub height: f64,
}

impl Frame {
    /// Create a frame from its four components.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Check that the frame describes a valid rectangle.
    ///
    /// Width and height must be strictly positive; zero, negative, and
    /// non-finite sizes are rejected. Position may be negative (windows can
    /// legitimately sit on monitors left of or above the primary).
    pub fn validate(&self) -> Result<()> {
        if !(self.width > 0.0) || !(self.height > 0.0) {
            return Err(ControlError::InvalidArgument(format!(
                "frame size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}
