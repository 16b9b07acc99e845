//! Per-window state bundle.

use std::fmt;

use casement_protocol::{Frame, ResizeEdge, WindowId};
use tracing::warn;

use super::endpoint::{Endpoint, NoticeReceiver};
use super::handle::WindowHandle;
use super::visual_state::VisualState;

/// The registry's per-window state: the owned native handle, the notice
/// endpoint, cached geometry and title, the prevent-close guard, and the
/// visual-state machine with its snapshots.
///
/// The record is the single owner of its handle; dropping the record (which
/// only the registry does, on a successful close) is the only release path
/// for the native window.
pub struct WindowRecord {
    id: WindowId,
    handle: Box<dyn WindowHandle>,
    endpoint: Endpoint,
    notices: NoticeReceiver,
    frame: Frame,
    title: String,
    arguments: String,
    prevent_close: bool,
    state: VisualState,
    /// State being left when fullscreen was entered; restored on exit.
    pre_fullscreen: Option<VisualState>,
    /// State being left when minimized; restored by `restore`.
    pre_minimize: Option<VisualState>,
    /// State being left when hidden; restored by `show`.
    pre_hide: Option<VisualState>,
}

impl WindowRecord {
    pub(crate) fn new(
        id: WindowId,
        handle: Box<dyn WindowHandle>,
        title: String,
        frame: Frame,
        arguments: String,
        state: VisualState,
    ) -> Self {
        let (endpoint, notices) = Endpoint::pair();
        Self {
            id,
            handle,
            endpoint,
            notices,
            frame,
            title,
            arguments,
            prevent_close: false,
            state,
            pre_fullscreen: None,
            pre_minimize: None,
            pre_hide: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The window's stable identifier.
    pub fn id(&self) -> WindowId {
        self.id
    }

    /// Current visual state.
    pub fn state(&self) -> VisualState {
        self.state
    }

    /// Cached outer geometry.
    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// Current title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The opaque creation payload, for the window's own startup logic.
    pub fn arguments(&self) -> &str {
        &self.arguments
    }

    /// Whether close requests are intercepted instead of destroying.
    pub fn prevent_close(&self) -> bool {
        self.prevent_close
    }

    pub(crate) fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub(crate) fn notices(&self) -> NoticeReceiver {
        self.notices.clone()
    }

    // =========================================================================
    // Plain mutations
    // =========================================================================

    pub(crate) fn set_frame(&mut self, frame: Frame) {
        self.handle.set_frame(frame);
        self.frame = frame;
    }

    pub(crate) fn set_title(&mut self, title: &str) {
        self.handle.set_title(title);
        self.title = title.to_owned();
    }

    pub(crate) fn set_prevent_close(&mut self, prevent: bool) {
        self.prevent_close = prevent;
    }

    pub(crate) fn show_titlebar(&mut self, show: bool) {
        self.handle.set_decorations(show);
    }

    pub(crate) fn focus(&self) {
        self.handle.focus();
    }

    pub(crate) fn start_dragging(&self) {
        self.handle.begin_drag();
    }

    pub(crate) fn start_resizing(&self, edge: ResizeEdge) {
        self.handle.begin_resize(edge);
    }

    /// Center on the current monitor's work area without changing size.
    pub(crate) fn center(&mut self) {
        let Some(area) = self.handle.work_area() else {
            warn!(target: "casement::record", id = %self.id, "no work area, center skipped");
            return;
        };
        let frame = Frame::new(
            area.x + (area.width - self.frame.width) / 2.0,
            area.y + (area.height - self.frame.height) / 2.0,
            self.frame.width,
            self.frame.height,
        );
        self.handle.set_frame(frame);
        self.frame = frame;
    }

    // =========================================================================
    // Visual-state transitions
    //
    // Hidden is orthogonal to the logical state stack: hide snapshots the
    // active state and show restores it, fullscreen included. Every
    // transition drives the handle so tracked and native state stay aligned.
    // =========================================================================

    /// Make the window visible, restoring the pre-hide look. No-op when
    /// already visible.
    pub(crate) fn show(&mut self) {
        if !self.state.is_hidden() {
            return;
        }
        let restored = self.pre_hide.take().unwrap_or(VisualState::Shown);
        self.handle.set_visible(true);
        self.state = restored;
    }

    /// Suppress visibility, retaining the logical state. No-op when hidden.
    pub(crate) fn hide(&mut self) {
        if self.state.is_hidden() {
            return;
        }
        self.pre_hide = Some(self.state);
        self.handle.set_visible(false);
        self.state = VisualState::Hidden;
    }

    /// Minimize from `Shown` or `Maximized`; otherwise a no-op.
    pub(crate) fn minimize(&mut self) {
        if !matches!(self.state, VisualState::Shown | VisualState::Maximized) {
            return;
        }
        self.pre_minimize = Some(self.state);
        self.handle.set_minimized(true);
        self.state = VisualState::Minimized;
    }

    /// Return from minimized to the pre-minimize state; otherwise a no-op.
    pub(crate) fn restore(&mut self) {
        if !self.state.is_minimized() {
            return;
        }
        let restored = self.pre_minimize.take().unwrap_or(VisualState::Shown);
        self.handle.set_minimized(false);
        if restored.is_maximized() {
            self.handle.set_maximized(true);
        }
        self.state = restored;
    }

    /// Maximize. Fullscreen is exited first (the two are mutually
    /// exclusive); a minimized window comes back up maximized. No-op when
    /// hidden or already maximized.
    pub(crate) fn maximize(&mut self) {
        match self.state {
            VisualState::Maximized | VisualState::Hidden => return,
            VisualState::Fullscreen => {
                self.pre_fullscreen = None;
                self.handle.set_fullscreen(false);
            }
            VisualState::Minimized => {
                self.pre_minimize = None;
                self.handle.set_minimized(false);
            }
            VisualState::Shown => {}
        }
        self.handle.set_maximized(true);
        self.state = VisualState::Maximized;
    }

    /// Leave maximized for the normal shown state; otherwise a no-op.
    pub(crate) fn unmaximize(&mut self) {
        if !self.state.is_maximized() {
            return;
        }
        self.handle.set_maximized(false);
        self.state = VisualState::Shown;
    }

    /// Enter or leave fullscreen, snapshotting and restoring the
    /// surrounding state.
    pub(crate) fn set_fullscreen(&mut self, fullscreen: bool) {
        if fullscreen {
            if self.state.is_fullscreen() {
                return;
            }
            self.pre_fullscreen = Some(self.state);
            if self.state.is_maximized() {
                self.handle.set_maximized(false);
            }
            if self.state.is_minimized() {
                self.handle.set_minimized(false);
            }
            self.handle.set_fullscreen(true);
            self.state = VisualState::Fullscreen;
        } else {
            if !self.state.is_fullscreen() {
                return;
            }
            let restored = self.pre_fullscreen.take().unwrap_or(VisualState::Shown);
            self.handle.set_fullscreen(false);
            if restored.is_maximized() {
                self.handle.set_maximized(true);
            }
            if restored.is_minimized() {
                self.handle.set_minimized(true);
            }
            self.state = restored;
        }
    }
}

impl fmt::Debug for WindowRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowRecord")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("state", &self.state)
            .field("frame", &self.frame)
            .field("prevent_close", &self.prevent_close)
            .finish()
    }
}
