//! Native window management module.
//!
//! This module owns every window-facing concern: the OS seam
//! ([`WindowHandle`]/[`WindowBackend`]), per-window records, the registry
//! that mints and retires ids, and the notice channel a window's embedding
//! listens on.
//!
//! # Registry
//!
//! The [`WindowRegistry`] is the only place ids are allocated and the only
//! mutator of window state. It is an explicitly constructed value, not a
//! process global — pass it by reference to whatever drives it, and tests
//! can build an isolated instance around a fake backend:
//!
//! ```ignore
//! use casement::window::{WindowRegistry, WinitBackend};
//!
//! let mut registry = WindowRegistry::new();
//! let id = registry.create(&mut backend, "route=/settings")?;
//! registry.show(id)?;
//! for id in registry.sub_window_ids() {
//!     println!("live window: {id}");
//! }
//! ```
//!
//! All registry operations must run on the UI thread; native window handles
//! are not safe to mutate concurrently. Cross-thread callers go through
//! [`crate::channel::CommandQueue`].

mod config;
mod endpoint;
mod handle;
mod record;
mod registry;
mod visual_state;

pub use config::WindowConfig;
pub use endpoint::{Endpoint, NoticeReceiver, WindowNotice};
pub use handle::{WindowBackend, WindowHandle, WinitBackend, WinitHandle, WorkArea};
pub use record::WindowRecord;
pub use registry::WindowRegistry;
pub use visual_state::VisualState;

#[cfg(test)]
pub(crate) use handle::fake;
