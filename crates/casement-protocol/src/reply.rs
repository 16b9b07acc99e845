//! Command reply values.

use serde_json::{Value, json};

use crate::frame::Frame;
use crate::id::WindowId;

/// The single result value of a successful command.
///
/// Every successful call produces exactly one of these; every failure
/// produces exactly one [`crate::ControlError`]. There is no third outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Empty acknowledgment for commands with no return value.
    Ack,
    /// Boolean answer for the `is*` queries.
    Bool(bool),
    /// Newly allocated window id, from `createWindow`.
    Id(WindowId),
    /// Window geometry, from `getFrame`.
    Frame(Frame),
    /// Ordered id list, from `getAllSubWindowIds`.
    Ids(Vec<WindowId>),
}

impl Reply {
    /// Encode the reply for the transport.
    pub fn into_value(self) -> Value {
        match self {
            Self::Ack => Value::Null,
            Self::Bool(value) => json!(value),
            Self::Id(id) => json!(id.as_u64()),
            Self::Frame(frame) => serde_json::to_value(frame).unwrap_or(Value::Null),
            Self::Ids(ids) => json!(ids),
        }
    }
}
