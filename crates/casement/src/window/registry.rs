//! Window registry: the process-wide table of window records.
//!
//! The registry is the only place window ids are minted or retired and the
//! sole mutator of window state. It must only be entered from the UI thread
//! (native handles are not safe to mutate concurrently), which is why it
//! carries no interior locking; cross-thread callers marshal through
//! [`crate::channel::CommandQueue`].

use std::collections::BTreeMap;

use tracing::debug;

use casement_protocol::{ControlError, Frame, ResizeEdge, Result, WindowId};

use super::config::WindowConfig;
use super::endpoint::{NoticeReceiver, WindowNotice};
use super::handle::{WindowBackend, WindowHandle};
use super::record::WindowRecord;
use super::visual_state::VisualState;

/// Registry of all live windows, keyed by id.
///
/// Construct one instance per embedding at attach time and keep it on the UI
/// thread. The map is ordered by id, and ids are allocated monotonically, so
/// iteration order is creation order.
///
/// # Example
///
/// ```ignore
/// let mut registry = WindowRegistry::new();
/// registry.attach_main_window(Box::new(WinitHandle::new(host_window)))?;
///
/// let id = registry.create(&mut backend, "route=/settings")?;
/// registry.set_title(id, "Settings")?;
/// registry.show(id)?;
/// ```
pub struct WindowRegistry {
    windows: BTreeMap<WindowId, WindowRecord>,
    /// Next id to hand out. Monotonic for the process lifetime; ids are
    /// never reused, so an in-flight command cannot alias a newer window.
    next_id: u64,
}

impl WindowRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            windows: BTreeMap::new(),
            next_id: 1,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Wrap the host's pre-existing primary window as the record with id 0.
    ///
    /// Happens exactly once, at embedding attach time; a second attach is
    /// rejected and leaves the existing record untouched. The main window is
    /// addressable through every operation afterward, but its native
    /// lifetime stays with the host (see [`WindowRegistry::close`]).
    pub fn attach_main_window(&mut self, handle: Box<dyn WindowHandle>) -> Result<()> {
        if self.windows.contains_key(&WindowId::MAIN) {
            return Err(ControlError::InvalidArgument(
                "main window already attached".into(),
            ));
        }
        let frame = handle
            .outer_frame()
            .unwrap_or_else(|| WindowConfig::default().initial_frame());
        let record = WindowRecord::new(
            WindowId::MAIN,
            handle,
            String::new(),
            frame,
            String::new(),
            // The host's window is already on screen when we adopt it.
            VisualState::Shown,
        );
        self.windows.insert(WindowId::MAIN, record);
        debug!(target: "casement::registry", "main window attached");
        Ok(())
    }

    /// Allocate a new native window with default configuration, storing the
    /// opaque `arguments` string for the window's own startup logic.
    ///
    /// Returns the newly assigned id. If native creation fails the error is
    /// [`ControlError::ResourceExhausted`] and no id is consumed.
    pub fn create(&mut self, backend: &mut dyn WindowBackend, arguments: &str) -> Result<WindowId> {
        self.create_with_config(backend, WindowConfig::default(), arguments)
    }

    /// Like [`WindowRegistry::create`], with an explicit window
    /// configuration.
    pub fn create_with_config(
        &mut self,
        backend: &mut dyn WindowBackend,
        config: WindowConfig,
        arguments: &str,
    ) -> Result<WindowId> {
        let handle = backend.create_window(&config)?;
        let id = WindowId::from_raw(self.next_id);
        self.next_id += 1;

        let frame = handle
            .outer_frame()
            .unwrap_or_else(|| config.initial_frame());
        let record = WindowRecord::new(
            id,
            handle,
            config.title().to_owned(),
            frame,
            arguments.to_owned(),
            VisualState::Hidden,
        );
        self.windows.insert(id, record);
        debug!(target: "casement::registry", %id, "window created");
        Ok(id)
    }

    /// Close a window.
    ///
    /// With the prevent-close guard set, the window is kept and a
    /// [`WindowNotice::CloseIntercepted`] notice is emitted on its endpoint
    /// instead. The main window is never destroyed through this component:
    /// an unguarded close emits [`WindowNotice::CloseRequested`] for the
    /// host to act on. Any other record is removed — destroying the native
    /// handle synchronously — and every remaining window is notified that
    /// the id is gone.
    pub fn close(&mut self, id: WindowId) -> Result<()> {
        let record = self.lookup(id)?;
        if record.prevent_close() {
            record.endpoint().notify(WindowNotice::CloseIntercepted);
            debug!(target: "casement::registry", %id, "close intercepted");
            return Ok(());
        }
        if id.is_main() {
            record.endpoint().notify(WindowNotice::CloseRequested);
            debug!(target: "casement::registry", "main close forwarded to host");
            return Ok(());
        }

        // Removing the record drops the handle, which releases the native
        // window before any further command can address this id.
        self.windows.remove(&id);
        for remaining in self.windows.values() {
            remaining
                .endpoint()
                .notify(WindowNotice::WindowDestroyed(id));
        }
        debug!(target: "casement::registry", %id, "window destroyed");
        Ok(())
    }

    // =========================================================================
    // Visibility and visual state
    // =========================================================================

    /// Show the window; a no-op success when already visible.
    pub fn show(&mut self, id: WindowId) -> Result<()> {
        self.lookup_mut(id)?.show();
        Ok(())
    }

    /// Hide the window; a no-op success when already hidden.
    pub fn hide(&mut self, id: WindowId) -> Result<()> {
        self.lookup_mut(id)?.hide();
        Ok(())
    }

    /// Minimize the window.
    pub fn minimize(&mut self, id: WindowId) -> Result<()> {
        self.lookup_mut(id)?.minimize();
        Ok(())
    }

    /// Restore a minimized window to its pre-minimize state.
    pub fn restore(&mut self, id: WindowId) -> Result<()> {
        self.lookup_mut(id)?.restore();
        Ok(())
    }

    /// Maximize the window.
    pub fn maximize(&mut self, id: WindowId) -> Result<()> {
        self.lookup_mut(id)?.maximize();
        Ok(())
    }

    /// Return a maximized window to its normal size.
    pub fn unmaximize(&mut self, id: WindowId) -> Result<()> {
        self.lookup_mut(id)?.unmaximize();
        Ok(())
    }

    /// Enter or leave fullscreen.
    pub fn set_fullscreen(&mut self, id: WindowId, fullscreen: bool) -> Result<()> {
        self.lookup_mut(id)?.set_fullscreen(fullscreen);
        Ok(())
    }

    /// Whether the window is fullscreen.
    pub fn is_fullscreen(&self, id: WindowId) -> Result<bool> {
        Ok(self.lookup(id)?.state().is_fullscreen())
    }

    /// Whether the window is maximized.
    pub fn is_maximized(&self, id: WindowId) -> Result<bool> {
        Ok(self.lookup(id)?.state().is_maximized())
    }

    /// Whether the window is minimized.
    pub fn is_minimized(&self, id: WindowId) -> Result<bool> {
        Ok(self.lookup(id)?.state().is_minimized())
    }

    // =========================================================================
    // Geometry and chrome
    // =========================================================================

    /// Set the window's outer frame. Width and height must be positive.
    pub fn set_frame(&mut self, id: WindowId, frame: Frame) -> Result<()> {
        frame.validate()?;
        self.lookup_mut(id)?.set_frame(frame);
        Ok(())
    }

    /// The window's outer frame.
    pub fn frame(&self, id: WindowId) -> Result<Frame> {
        Ok(self.lookup(id)?.frame())
    }

    /// Center the window on its current monitor's work area, keeping size.
    pub fn center(&mut self, id: WindowId) -> Result<()> {
        self.lookup_mut(id)?.center();
        Ok(())
    }

    /// Set the window title.
    pub fn set_title(&mut self, id: WindowId, title: &str) -> Result<()> {
        self.lookup_mut(id)?.set_title(title);
        Ok(())
    }

    /// Toggle native decoration visibility. Cosmetic only; the visual state
    /// is unaffected.
    pub fn show_titlebar(&mut self, id: WindowId, show: bool) -> Result<()> {
        self.lookup_mut(id)?.show_titlebar(show);
        Ok(())
    }

    /// Bring the window to the foreground with input focus.
    pub fn focus(&self, id: WindowId) -> Result<()> {
        self.lookup(id)?.focus();
        Ok(())
    }

    /// Begin an OS-driven interactive move. Fire-and-forget; returns
    /// immediately.
    pub fn start_dragging(&self, id: WindowId) -> Result<()> {
        self.lookup(id)?.start_dragging();
        Ok(())
    }

    /// Begin an OS-driven interactive resize from the given edge or corner.
    /// Fire-and-forget; returns immediately.
    pub fn start_resizing(&self, id: WindowId, edge: ResizeEdge) -> Result<()> {
        self.lookup(id)?.start_resizing(edge);
        Ok(())
    }

    // =========================================================================
    // Flags and introspection
    // =========================================================================

    /// Arm or disarm the prevent-close guard.
    pub fn set_prevent_close(&mut self, id: WindowId, prevent: bool) -> Result<()> {
        self.lookup_mut(id)?.set_prevent_close(prevent);
        Ok(())
    }

    /// Whether the prevent-close guard is armed.
    pub fn is_prevent_close(&self, id: WindowId) -> Result<bool> {
        Ok(self.lookup(id)?.prevent_close())
    }

    /// The opaque creation payload passed to `create`.
    pub fn arguments(&self, id: WindowId) -> Result<&str> {
        Ok(self.lookup(id)?.arguments())
    }

    /// A receiver for the window's notices. Clones share the same stream.
    pub fn notices(&self, id: WindowId) -> Result<NoticeReceiver> {
        Ok(self.lookup(id)?.notices())
    }

    /// All live ids excluding the main window, in creation order.
    pub fn sub_window_ids(&self) -> Vec<WindowId> {
        self.windows
            .keys()
            .copied()
            .filter(|id| !id.is_main())
            .collect()
    }

    /// Look up a window record, e.g. to read its state or title.
    pub fn get(&self, id: WindowId) -> Option<&WindowRecord> {
        self.windows.get(&id)
    }

    /// Whether the id resolves to a live window.
    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.contains_key(&id)
    }

    /// Number of live windows, main included.
    pub fn count(&self) -> usize {
        self.windows.len()
    }

    fn lookup(&self, id: WindowId) -> Result<&WindowRecord> {
        self.windows.get(&id).ok_or(ControlError::NotFound(id))
    }

    fn lookup_mut(&mut self, id: WindowId) -> Result<&mut WindowRecord> {
        self.windows.get_mut(&id).ok_or(ControlError::NotFound(id))
    }
}

impl Default for WindowRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::fake::FakeBackend;
    use casement_protocol::ErrorKind;

    fn registry_with_backend() -> (WindowRegistry, FakeBackend) {
        (WindowRegistry::new(), FakeBackend::new())
    }

    #[test]
    fn test_ids_are_monotonic_and_ordered() {
        let (mut registry, mut backend) = registry_with_backend();

        let first = registry.create(&mut backend, "payload-A").unwrap();
        let second = registry.create(&mut backend, "payload-B").unwrap();
        assert_eq!(first, WindowId::from_raw(1));
        assert_eq!(second, WindowId::from_raw(2));
        assert_eq!(registry.sub_window_ids(), vec![first, second]);

        registry.close(first).unwrap();
        assert_eq!(registry.sub_window_ids(), vec![second]);

        // Freed ids are not reused.
        let third = registry.create(&mut backend, "").unwrap();
        assert_eq!(third, WindowId::from_raw(3));
    }

    #[test]
    fn test_operations_on_closed_id_fail_not_found() {
        let (mut registry, mut backend) = registry_with_backend();
        let id = registry.create(&mut backend, "").unwrap();
        registry.close(id).unwrap();

        assert_eq!(registry.show(id), Err(ControlError::NotFound(id)));
        assert_eq!(registry.frame(id), Err(ControlError::NotFound(id)));
        assert_eq!(registry.close(id), Err(ControlError::NotFound(id)));
        assert!(!registry.contains(id));
    }

    #[test]
    fn test_close_destroys_native_handle_synchronously() {
        let (mut registry, mut backend) = registry_with_backend();
        let id = registry.create(&mut backend, "").unwrap();
        let state = backend.handle_state(0);

        assert!(!state.borrow().destroyed);
        registry.close(id).unwrap();
        assert!(state.borrow().destroyed);
    }

    #[test]
    fn test_prevent_close_intercepts_exactly_once() {
        let (mut registry, mut backend) = registry_with_backend();
        let id = registry.create(&mut backend, "").unwrap();
        let notices = registry.notices(id).unwrap();

        registry.set_prevent_close(id, true).unwrap();
        assert!(registry.is_prevent_close(id).unwrap());

        registry.close(id).unwrap();
        assert!(registry.contains(id));
        assert_eq!(registry.sub_window_ids(), vec![id]);
        assert_eq!(notices.try_recv(), Ok(WindowNotice::CloseIntercepted));
        assert!(notices.try_recv().is_err());

        // Disarmed, the same close destroys the window.
        registry.set_prevent_close(id, false).unwrap();
        registry.close(id).unwrap();
        assert!(!registry.contains(id));
    }

    #[test]
    fn test_close_broadcasts_destruction_to_remaining_windows() {
        let (mut registry, mut backend) = registry_with_backend();
        let first = registry.create(&mut backend, "").unwrap();
        let second = registry.create(&mut backend, "").unwrap();
        let second_notices = registry.notices(second).unwrap();

        registry.close(first).unwrap();
        assert_eq!(
            second_notices.try_recv(),
            Ok(WindowNotice::WindowDestroyed(first))
        );
        assert!(second_notices.try_recv().is_err());
    }

    #[test]
    fn test_failed_creation_consumes_no_id() {
        let (mut registry, mut backend) = registry_with_backend();
        backend.fail_next = true;

        let err = registry.create(&mut backend, "").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResourceExhausted);
        assert_eq!(registry.count(), 0);

        let id = registry.create(&mut backend, "").unwrap();
        assert_eq!(id, WindowId::from_raw(1));
    }

    #[test]
    fn test_set_frame_round_trips_exactly() {
        let (mut registry, mut backend) = registry_with_backend();
        let id = registry.create(&mut backend, "").unwrap();

        let frame = Frame::new(-120.0, 40.0, 1024.0, 768.0);
        registry.set_frame(id, frame).unwrap();
        assert_eq!(registry.frame(id).unwrap(), frame);
    }

    #[test]
    fn test_set_frame_rejects_degenerate_geometry() {
        let (mut registry, mut backend) = registry_with_backend();
        let id = registry.create(&mut backend, "").unwrap();
        let before = registry.frame(id).unwrap();

        let err = registry
            .set_frame(id, Frame::new(0.0, 0.0, 0.0, 600.0))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(registry.frame(id).unwrap(), before);
    }

    #[test]
    fn test_arguments_are_stored_per_window() {
        let (mut registry, mut backend) = registry_with_backend();
        let first = registry.create(&mut backend, "payload-A").unwrap();
        let second = registry.create(&mut backend, "payload-B").unwrap();

        assert_eq!(registry.arguments(first).unwrap(), "payload-A");
        assert_eq!(registry.arguments(second).unwrap(), "payload-B");
    }

    #[test]
    fn test_main_window_attach_is_uniform_and_once() {
        let (mut registry, mut backend) = registry_with_backend();
        let (handle, state) = FakeBackend::detached_handle();
        registry.attach_main_window(handle).unwrap();

        // Uniformly addressable...
        assert!(registry.contains(WindowId::MAIN));
        registry.set_title(WindowId::MAIN, "Host").unwrap();
        assert_eq!(state.borrow().title.as_deref(), Some("Host"));
        registry.focus(WindowId::MAIN).unwrap();
        assert_eq!(state.borrow().focus_calls, 1);

        // ...but excluded from the sub-window enumeration.
        let id = registry.create(&mut backend, "").unwrap();
        assert_eq!(registry.sub_window_ids(), vec![id]);

        // A second attach is rejected, record untouched.
        let (other, _) = FakeBackend::detached_handle();
        let err = registry.attach_main_window(other).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(registry.get(WindowId::MAIN).unwrap().title(), "Host");
    }

    #[test]
    fn test_close_main_forwards_to_host_without_teardown() {
        let (mut registry, _backend) = registry_with_backend();
        let (handle, state) = FakeBackend::detached_handle();
        registry.attach_main_window(handle).unwrap();
        let notices = registry.notices(WindowId::MAIN).unwrap();

        registry.close(WindowId::MAIN).unwrap();
        assert!(registry.contains(WindowId::MAIN));
        assert!(!state.borrow().destroyed);
        assert_eq!(notices.try_recv(), Ok(WindowNotice::CloseRequested));
        assert!(notices.try_recv().is_err());

        // The guard still takes precedence on the main window.
        registry.set_prevent_close(WindowId::MAIN, true).unwrap();
        registry.close(WindowId::MAIN).unwrap();
        assert_eq!(notices.try_recv(), Ok(WindowNotice::CloseIntercepted));
    }

    #[test]
    fn test_state_queries_follow_transitions() {
        let (mut registry, mut backend) = registry_with_backend();
        let id = registry.create(&mut backend, "").unwrap();
        registry.show(id).unwrap();

        registry.maximize(id).unwrap();
        assert!(registry.is_maximized(id).unwrap());
        assert!(!registry.is_fullscreen(id).unwrap());

        registry.set_fullscreen(id, true).unwrap();
        assert!(registry.is_fullscreen(id).unwrap());
        assert!(!registry.is_maximized(id).unwrap());

        registry.set_fullscreen(id, false).unwrap();
        assert!(registry.is_maximized(id).unwrap());

        registry.minimize(id).unwrap();
        assert!(registry.is_minimized(id).unwrap());
        registry.restore(id).unwrap();
        assert!(registry.is_maximized(id).unwrap());
    }

    #[test]
    fn test_interactive_operations_reach_the_handle() {
        let (mut registry, mut backend) = registry_with_backend();
        let id = registry.create(&mut backend, "").unwrap();
        let state = backend.handle_state(0);

        registry.start_dragging(id).unwrap();
        assert_eq!(state.borrow().drag_calls, 1);

        registry.start_resizing(id, ResizeEdge::BottomRight).unwrap();
        assert_eq!(state.borrow().resize_edges, vec![ResizeEdge::BottomRight]);

        registry.show_titlebar(id, false).unwrap();
        assert_eq!(state.borrow().decorations, Some(false));
    }
}
