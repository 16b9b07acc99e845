//! Casement — spawn, address, and control multiple top-level native windows
//! from a single logical process.
//!
//! The crate keeps a registry of windows keyed by stable numeric ids (0 is
//! the pre-existing main window, spawned windows count up from 1) and routes
//! named commands to the right window instance. The transport that carries
//! commands between processes or threads is an external collaborator; this
//! crate accepts raw [`protocol::MethodCall`] values wherever they came from.
//!
//! # Example
//!
//! ```ignore
//! use casement::channel::command_channel;
//! use casement::dispatch::dispatch;
//! use casement::window::{WindowRegistry, WinitBackend, WinitHandle};
//! use casement_protocol::MethodCall;
//! use serde_json::json;
//!
//! // At embedding start, on the UI thread:
//! let mut registry = WindowRegistry::new();
//! registry.attach_main_window(Box::new(WinitHandle::new(main_window)))?;
//! let (sender, queue) = command_channel();
//!
//! // Any thread may submit commands...
//! let pending = sender.submit(MethodCall::new("createWindow", json!("route=/settings")));
//!
//! // ...and the UI thread drains them inside the event loop, where the
//! // active event loop can mint native windows.
//! let mut backend = WinitBackend::new(event_loop);
//! queue.drain(&mut registry, &mut backend);
//! ```
//!
//! Logging goes through `tracing` under the `casement::*` targets; install a
//! subscriber (e.g. `tracing_subscriber::fmt`) to see it.

pub mod channel;
pub mod dispatch;
pub mod window;

pub use casement_protocol as protocol;

pub use channel::{CommandQueue, CommandSender, PendingReply, command_channel};
pub use dispatch::{dispatch, execute};
pub use window::{
    Endpoint, NoticeReceiver, VisualState, WindowBackend, WindowConfig, WindowHandle,
    WindowNotice, WindowRecord, WindowRegistry, WinitBackend, WinitHandle, WorkArea,
};
