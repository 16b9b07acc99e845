//! The native window seam.
//!
//! [`WindowHandle`] is the only place this crate touches the OS: every
//! registry operation ends in a handle call, and destruction of the owning
//! record is the only release path for the native resource. [`WindowBackend`]
//! is the matching creation seam — the object that can mint new handles.
//!
//! Production uses [`WinitHandle`]/[`WinitBackend`] over winit; tests drive
//! the registry through recording fakes, so no live event loop is needed.

use std::sync::Arc;

use winit::dpi::{LogicalPosition, LogicalSize};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Fullscreen, ResizeDirection, Window};

use casement_protocol::{ControlError, Frame, ResizeEdge, Result};

use super::config::WindowConfig;

/// Usable area of the monitor a window sits on, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkArea {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Exclusive interface to one native top-level window.
///
/// Implementations perform the OS call and nothing else; logical state
/// (visual state, cached geometry, flags) lives on the owning record.
/// Dropping the handle releases the native resource.
pub trait WindowHandle {
    /// Show or hide the window.
    fn set_visible(&self, visible: bool);
    /// Set the native title.
    fn set_title(&self, title: &str);
    /// Minimize or un-minimize.
    fn set_minimized(&self, minimized: bool);
    /// Maximize or un-maximize.
    fn set_maximized(&self, maximized: bool);
    /// Enter or leave borderless fullscreen.
    fn set_fullscreen(&self, fullscreen: bool);
    /// Toggle native decoration visibility.
    fn set_decorations(&self, decorations: bool);
    /// Move and resize in one step, logical pixels.
    fn set_frame(&self, frame: Frame);
    /// Current outer geometry, if the platform can report it.
    fn outer_frame(&self) -> Option<Frame>;
    /// Bring to the foreground and take input focus.
    fn focus(&self);
    /// Hand an interactive move to the OS. Fire-and-forget: failures are the
    /// implementation's to log, completion is not observable.
    fn begin_drag(&self);
    /// Hand an interactive resize from the given edge to the OS.
    /// Same fire-and-forget contract as [`WindowHandle::begin_drag`].
    fn begin_resize(&self, edge: ResizeEdge);
    /// Work area of the current monitor, if one can be determined.
    fn work_area(&self) -> Option<WorkArea>;
}

/// Mints native window handles.
///
/// Separated from the registry so window creation can happen wherever the
/// toolkit requires (winit only creates windows on the active event loop)
/// and so tests can substitute a fake.
pub trait WindowBackend {
    /// Create a native window shaped by `config`.
    ///
    /// Failures surface as [`ControlError::ResourceExhausted`].
    fn create_window(&mut self, config: &WindowConfig) -> Result<Box<dyn WindowHandle>>;
}

// =============================================================================
// winit implementation
// =============================================================================

/// A native window driven through winit.
pub struct WinitHandle {
    window: Arc<Window>,
}

impl WinitHandle {
    /// Wrap an existing winit window.
    ///
    /// Used directly when attaching the host's pre-existing main window.
    pub fn new(window: Arc<Window>) -> Self {
        Self { window }
    }

    /// Access the underlying winit window, e.g. for surface creation.
    pub fn winit_window(&self) -> &Arc<Window> {
        &self.window
    }
}

impl WindowHandle for WinitHandle {
    fn set_visible(&self, visible: bool) {
        self.window.set_visible(visible);
    }

    fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }

    fn set_minimized(&self, minimized: bool) {
        self.window.set_minimized(minimized);
    }

    fn set_maximized(&self, maximized: bool) {
        self.window.set_maximized(maximized);
    }

    fn set_fullscreen(&self, fullscreen: bool) {
        let mode = fullscreen.then(|| Fullscreen::Borderless(None));
        self.window.set_fullscreen(mode);
    }

    fn set_decorations(&self, decorations: bool) {
        self.window.set_decorations(decorations);
    }

    fn set_frame(&self, frame: Frame) {
        self.window
            .set_outer_position(LogicalPosition::new(frame.left, frame.top));
        let _ = self
            .window
            .request_inner_size(LogicalSize::new(frame.width, frame.height));
    }

    fn outer_frame(&self) -> Option<Frame> {
        let scale = self.window.scale_factor();
        let position = self.window.outer_position().ok()?.to_logical::<f64>(scale);
        let size = self.window.outer_size().to_logical::<f64>(scale);
        Some(Frame::new(position.x, position.y, size.width, size.height))
    }

    fn focus(&self) {
        self.window.focus_window();
    }

    fn begin_drag(&self) {
        if let Err(err) = self.window.drag_window() {
            tracing::warn!(target: "casement::handle", %err, "interactive move rejected");
        }
    }

    fn begin_resize(&self, edge: ResizeEdge) {
        if let Err(err) = self.window.drag_resize_window(resize_direction(edge)) {
            tracing::warn!(target: "casement::handle", %err, "interactive resize rejected");
        }
    }

    fn work_area(&self) -> Option<WorkArea> {
        let monitor = self.window.current_monitor()?;
        let scale = self.window.scale_factor();
        let position = monitor.position().to_logical::<f64>(scale);
        let size = monitor.size().to_logical::<f64>(scale);
        Some(WorkArea {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        })
    }
}

fn resize_direction(edge: ResizeEdge) -> ResizeDirection {
    match edge {
        ResizeEdge::Top => ResizeDirection::North,
        ResizeEdge::Bottom => ResizeDirection::South,
        ResizeEdge::Left => ResizeDirection::West,
        ResizeEdge::Right => ResizeDirection::East,
        ResizeEdge::TopLeft => ResizeDirection::NorthWest,
        ResizeEdge::TopRight => ResizeDirection::NorthEast,
        ResizeEdge::BottomLeft => ResizeDirection::SouthWest,
        ResizeEdge::BottomRight => ResizeDirection::SouthEast,
    }
}

/// Backend that creates windows on the active winit event loop.
///
/// Borrowed per dispatch batch, since winit only exposes the
/// `ActiveEventLoop` inside event-loop callbacks.
pub struct WinitBackend<'a> {
    event_loop: &'a ActiveEventLoop,
}

impl<'a> WinitBackend<'a> {
    /// Create a backend for the given event loop.
    pub fn new(event_loop: &'a ActiveEventLoop) -> Self {
        Self { event_loop }
    }
}

impl WindowBackend for WinitBackend<'_> {
    fn create_window(&mut self, config: &WindowConfig) -> Result<Box<dyn WindowHandle>> {
        let window = self
            .event_loop
            .create_window(config.to_window_attributes())
            .map_err(|err| ControlError::ResourceExhausted(err.to_string()))?;
        Ok(Box::new(WinitHandle::new(Arc::new(window))))
    }
}

// =============================================================================
// Test doubles
// =============================================================================
