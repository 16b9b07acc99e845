//! The command vocabulary.
//!
//! Commands arrive from the transport as a method name plus an untyped
//! argument payload. [`Command::decode`] turns that pair into a closed,
//! strongly-typed variant, performing all argument validation in one place so
//! nothing malformed ever reaches the registry.
//!
//! The vocabulary strings and argument field names are a compatibility
//! contract with existing callers and are matched case-sensitively.

use serde_json::Value;

use crate::error::{ControlError, Result};
use crate::frame::Frame;
use crate::id::WindowId;

/// A named command with its raw argument payload, as carried by the
/// transport.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    /// The command name, e.g. `"createWindow"`.
    pub method: String,
    /// The raw arguments: a bare integer, a map, a string, or null,
    /// depending on the command.
    pub args: Value,
}

impl MethodCall {
    /// Create a method call.
    pub fn new(method: impl Into<String>, args: Value) -> Self {
        Self {
            method: method.into(),
            args,
        }
    }
}

/// Edge or corner from which an interactive resize starts.
///
/// Decoded from the wire descriptor's `top`/`bottom`/`left`/`right` boolean
/// flags; exactly one edge, or one vertical-horizontal pair, must be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeEdge {
    fn from_flags(top: bool, bottom: bool, left: bool, right: bool) -> Option<Self> {
        match (top, bottom, left, right) {
            (true, false, false, false) => Some(Self::Top),
            (false, true, false, false) => Some(Self::Bottom),
            (false, false, true, false) => Some(Self::Left),
            (false, false, false, true) => Some(Self::Right),
            (true, false, true, false) => Some(Self::TopLeft),
            (true, false, false, true) => Some(Self::TopRight),
            (false, true, true, false) => Some(Self::BottomLeft),
            (false, true, false, true) => Some(Self::BottomRight),
            _ => None,
        }
    }
}

/// The closed set of control commands.
///
/// Each variant carries a fully validated payload; constructing one through
/// [`Command::decode`] is the only path from transport data.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Spawn a new window; the opaque string is stored for the new window's
    /// startup logic.
    CreateWindow { arguments: String },
    Show { id: WindowId },
    Hide { id: WindowId },
    Close { id: WindowId },
    Center { id: WindowId },
    Focus { id: WindowId },
    StartDragging { id: WindowId },
    Maximize { id: WindowId },
    Minimize { id: WindowId },
    Unmaximize { id: WindowId },
    Restore { id: WindowId },
    IsMaximized { id: WindowId },
    IsMinimized { id: WindowId },
    SetFrame { id: WindowId, frame: Frame },
    GetFrame { id: WindowId },
    SetTitle { id: WindowId, title: String },
    GetAllSubWindowIds,
    SetFullscreen { id: WindowId, fullscreen: bool },
    IsFullscreen { id: WindowId },
    ShowTitlebar { id: WindowId, show: bool },
    StartResizing { id: WindowId, edge: ResizeEdge },
    SetPreventClose { id: WindowId, prevent: bool },
    IsPreventClose { id: WindowId },
}

impl Command {
    /// Decode and validate a raw method call.
    ///
    /// Window-id arguments are accepted either as the sole bare integer or
    /// as the `windowId` field of an argument map; both normalize to
    /// [`WindowId`]. Unknown method names fail with
    /// [`ControlError::NotImplemented`].
    pub fn decode(call: &MethodCall) -> Result<Self> {
        let args = &call.args;
        match call.method.as_str() {
            "createWindow" => {
                let arguments = args.as_str().ok_or_else(|| {
                    invalid("createWindow expects an opaque string argument")
                })?;
                Ok(Self::CreateWindow {
                    arguments: arguments.to_owned(),
                })
            }
            "show" => Ok(Self::Show { id: window_id(args)? }),
            "hide" => Ok(Self::Hide { id: window_id(args)? }),
            "close" => Ok(Self::Close { id: window_id(args)? }),
            "center" => Ok(Self::Center { id: window_id(args)? }),
            "focus" => Ok(Self::Focus { id: window_id(args)? }),
            "startDragging" => Ok(Self::StartDragging { id: window_id(args)? }),
            "maximize" => Ok(Self::Maximize { id: window_id(args)? }),
            "minimize" => Ok(Self::Minimize { id: window_id(args)? }),
            "unmaximize" => Ok(Self::Unmaximize { id: window_id(args)? }),
            "restore" => Ok(Self::Restore { id: window_id(args)? }),
            "isMaximized" => Ok(Self::IsMaximized { id: window_id(args)? }),
            "isMinimized" => Ok(Self::IsMinimized { id: window_id(args)? }),
            "isPreventClose" => Ok(Self::IsPreventClose { id: window_id(args)? }),
            "setFrame" => {
                let id = window_id(args)?;
                let frame = Frame::new(
                    number_field(args, "left")?,
                    number_field(args, "top")?,
                    number_field(args, "width")?,
                    number_field(args, "height")?,
                );
                frame.validate()?;
                Ok(Self::SetFrame { id, frame })
            }
            "getFrame" => Ok(Self::GetFrame { id: window_id(args)? }),
            "setTitle" => Ok(Self::SetTitle {
                id: window_id(args)?,
                title: string_field(args, "title")?,
            }),
            "getAllSubWindowIds" => Ok(Self::GetAllSubWindowIds),
            "setFullscreen" => Ok(Self::SetFullscreen {
                id: window_id(args)?,
                fullscreen: bool_field(args, "fullscreen")?,
            }),
            "isFullScreenSub" => Ok(Self::IsFullscreen { id: window_id(args)? }),
            "showTitleBar" => Ok(Self::ShowTitlebar {
                id: window_id(args)?,
                show: bool_field(args, "show")?,
            }),
            "startResizing" => {
                let id = window_id(args)?;
                let edge = ResizeEdge::from_flags(
                    edge_flag(args, "top"),
                    edge_flag(args, "bottom"),
                    edge_flag(args, "left"),
                    edge_flag(args, "right"),
                )
                .ok_or_else(|| invalid("resize descriptor selects no usable edge or corner"))?;
                Ok(Self::StartResizing { id, edge })
            }
            "setPreventClose" => Ok(Self::SetPreventClose {
                id: window_id(args)?,
                prevent: bool_field(args, "setPreventClose")?,
            }),
            other => Err(ControlError::NotImplemented(other.to_owned())),
        }
    }
}

fn invalid(message: impl Into<String>) -> ControlError {
    ControlError::InvalidArgument(message.into())
}

/// Extract the target window id from either argument encoding.
fn window_id(args: &Value) -> Result<WindowId> {
    let raw = match args {
        Value::Number(n) => n.as_i64(),
        Value::Object(map) => map.get("windowId").and_then(Value::as_i64),
        _ => None,
    }
    .ok_or_else(|| invalid("windowId must be an integer"))?;

    u64::try_from(raw)
        .map(WindowId::from_raw)
        .map_err(|_| invalid(format!("windowId must be non-negative, got {raw}")))
}

fn number_field(args: &Value, name: &str) -> Result<f64> {
    args.get(name)
        .and_then(Value::as_f64)
        .ok_or_else(|| invalid(format!("missing or non-numeric field '{name}'")))
}

fn string_field(args: &Value, name: &str) -> Result<String> {
    args.get(name)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| invalid(format!("missing or non-string field '{name}'")))
}

fn bool_field(args: &Value, name: &str) -> Result<bool> {
    args.get(name)
        .and_then(Value::as_bool)
        .ok_or_else(|| invalid(format!("missing or non-boolean field '{name}'")))
}

/// Resize-edge flags are optional on the wire; absent means unset.
fn edge_flag(args: &Value, name: &str) -> bool {
    args.get(name).and_then(Value::as_bool).unwrap_or(false)
}
