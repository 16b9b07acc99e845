//! Wire-level contract for the casement multi-window control protocol.
//!
//! This crate defines everything a caller and the window registry must agree
//! on to talk to each other: window identifiers, geometry frames, the command
//! vocabulary, reply values, and the error taxonomy. It deliberately has no
//! windowing-toolkit dependency, so transport-side consumers can speak the
//! protocol without linking a display stack.
//!
//! # Example
//!
//! ```
//! use casement_protocol::{Command, MethodCall, WindowId};
//! use serde_json::json;
//!
//! // A raw call as it arrives from the transport...
//! let call = MethodCall::new("setTitle", json!({"windowId": 2, "title": "Inspector"}));
//!
//! // ...decodes into a typed command, validated once at the boundary.
//! let command = Command::decode(&call).unwrap();
//! assert_eq!(
//!     command,
//!     Command::SetTitle { id: WindowId::from_raw(2), title: "Inspector".into() }
//! );
//! ```

mod command;
mod error;
mod frame;
mod id;
mod reply;

pub use command::{Command, MethodCall, ResizeEdge};
pub use error::{ControlError, ErrorKind, Result};
pub use frame::Frame;
pub use id::WindowId;
pub use reply::Reply;
