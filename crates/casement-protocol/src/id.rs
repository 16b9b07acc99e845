//! Window identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable numeric identifier for a top-level window.
///
/// Id 0 is reserved for the main window; spawned windows receive ids
/// starting at 1, allocated monotonically and never reused while the
/// process lives. This keeps an in-flight command from ever aliasing a
/// window other than the one it was addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(u64);

impl WindowId {
    /// The main window's identifier.
    pub const MAIN: WindowId = WindowId(0);

    /// Create an id from its raw integer value.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw integer value, as it appears on the wire.
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Whether this id addresses the main window.
    pub fn is_main(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
