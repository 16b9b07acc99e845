//! Command dispatcher.
//!
//! Binds the fixed command vocabulary to registry operations. Decoding and
//! validation happen once, at the boundary, before any registry call; a
//! malformed call never mutates state. Every invocation produces exactly one
//! [`Reply`] or one [`casement_protocol::ControlError`].

use tracing::debug;

use casement_protocol::{Command, MethodCall, Reply, Result};

use crate::window::{WindowBackend, WindowRegistry};

/// Decode and execute a raw method call against the registry.
///
/// The backend is only consulted for `createWindow`; it is passed per call
/// because window creation is tied to the toolkit's event-loop context.
pub fn dispatch(
    registry: &mut WindowRegistry,
    backend: &mut dyn WindowBackend,
    call: &MethodCall,
) -> Result<Reply> {
    let command = Command::decode(call)?;
    debug!(target: "casement::dispatch", method = %call.method, "dispatching");
    execute(registry, backend, command)
}

/// Execute an already-decoded command.
pub fn execute(
    registry: &mut WindowRegistry,
    backend: &mut dyn WindowBackend,
    command: Command,
) -> Result<Reply> {
    match command {
        Command::CreateWindow { arguments } => {
            registry.create(backend, &arguments).map(Reply::Id)
        }
        Command::Show { id } => registry.show(id).map(|_| Reply::Ack),
        Command::Hide { id } => registry.hide(id).map(|_| Reply::Ack),
        Command::Close { id } => registry.close(id).map(|_| Reply::Ack),
        Command::Center { id } => registry.center(id).map(|_| Reply::Ack),
        Command::Focus { id } => registry.focus(id).map(|_| Reply::Ack),
        Command::StartDragging { id } => registry.start_dragging(id).map(|_| Reply::Ack),
        Command::Maximize { id } => registry.maximize(id).map(|_| Reply::Ack),
        Command::Minimize { id } => registry.minimize(id).map(|_| Reply::Ack),
        Command::Unmaximize { id } => registry.unmaximize(id).map(|_| Reply::Ack),
        Command::Restore { id } => registry.restore(id).map(|_| Reply::Ack),
        Command::IsMaximized { id } => registry.is_maximized(id).map(Reply::Bool),
        Command::IsMinimized { id } => registry.is_minimized(id).map(Reply::Bool),
        Command::SetFrame { id, frame } => registry.set_frame(id, frame).map(|_| Reply::Ack),
        Command::GetFrame { id } => registry.frame(id).map(Reply::Frame),
        Command::SetTitle { id, title } => registry.set_title(id, &title).map(|_| Reply::Ack),
        Command::GetAllSubWindowIds => Ok(Reply::Ids(registry.sub_window_ids())),
        Command::SetFullscreen { id, fullscreen } => {
            registry.set_fullscreen(id, fullscreen).map(|_| Reply::Ack)
        }
        Command::IsFullscreen { id } => registry.is_fullscreen(id).map(Reply::Bool),
        Command::ShowTitlebar { id, show } => {
            registry.show_titlebar(id, show).map(|_| Reply::Ack)
        }
        Command::StartResizing { id, edge } => {
            registry.start_resizing(id, edge).map(|_| Reply::Ack)
        }
        Command::SetPreventClose { id, prevent } => {
            registry.set_prevent_close(id, prevent).map(|_| Reply::Ack)
        }
        Command::IsPreventClose { id } => registry.is_prevent_close(id).map(Reply::Bool),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::fake::FakeBackend;
    use casement_protocol::{ControlError, ErrorKind, Frame, WindowId};
    use serde_json::json;

    fn call(method: &str, args: serde_json::Value) -> MethodCall {
        MethodCall::new(method, args)
    }

    fn fixture() -> (WindowRegistry, FakeBackend) {
        (WindowRegistry::new(), FakeBackend::new())
    }

    #[test]
    fn test_create_show_close_flow() {
        let (mut registry, mut backend) = fixture();

        let reply = dispatch(
            &mut registry,
            &mut backend,
            &call("createWindow", json!("route=/about")),
        )
        .unwrap();
        assert_eq!(reply, Reply::Id(WindowId::from_raw(1)));
        assert_eq!(registry.arguments(WindowId::from_raw(1)).unwrap(), "route=/about");

        let reply = dispatch(&mut registry, &mut backend, &call("show", json!(1))).unwrap();
        assert_eq!(reply, Reply::Ack);

        let reply = dispatch(&mut registry, &mut backend, &call("close", json!(1))).unwrap();
        assert_eq!(reply, Reply::Ack);
        assert!(!registry.contains(WindowId::from_raw(1)));
    }

    #[test]
    fn test_frame_round_trip_through_the_wire_shapes() {
        let (mut registry, mut backend) = fixture();
        dispatch(&mut registry, &mut backend, &call("createWindow", json!(""))).unwrap();

        let args = json!({"windowId": 1, "left": 30.0, "top": 40.0, "width": 640.0, "height": 480.0});
        dispatch(&mut registry, &mut backend, &call("setFrame", args)).unwrap();

        let reply = dispatch(
            &mut registry,
            &mut backend,
            &call("getFrame", json!({"windowId": 1})),
        )
        .unwrap();
        assert_eq!(reply, Reply::Frame(Frame::new(30.0, 40.0, 640.0, 480.0)));
    }

    #[test]
    fn test_invalid_arguments_never_reach_the_registry() {
        let (mut registry, mut backend) = fixture();
        dispatch(&mut registry, &mut backend, &call("createWindow", json!(""))).unwrap();
        let before = registry.frame(WindowId::from_raw(1)).unwrap();

        let args = json!({"windowId": 1, "left": 0.0, "top": 0.0, "width": -640.0, "height": 480.0});
        let err = dispatch(&mut registry, &mut backend, &call("setFrame", args)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(registry.frame(WindowId::from_raw(1)).unwrap(), before);

        let err = dispatch(
            &mut registry,
            &mut backend,
            &call("setTitle", json!({"windowId": 1})),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_unknown_command_is_not_implemented_and_inert() {
        let (mut registry, mut backend) = fixture();
        dispatch(&mut registry, &mut backend, &call("createWindow", json!(""))).unwrap();
        let count = registry.count();

        let err = dispatch(
            &mut registry,
            &mut backend,
            &call("doSomethingUnknown", json!(1)),
        )
        .unwrap_err();
        assert_eq!(err, ControlError::NotImplemented("doSomethingUnknown".into()));
        assert_eq!(registry.count(), count);
    }

    #[test]
    fn test_queries_answer_booleans() {
        let (mut registry, mut backend) = fixture();
        dispatch(&mut registry, &mut backend, &call("createWindow", json!(""))).unwrap();
        dispatch(&mut registry, &mut backend, &call("show", json!(1))).unwrap();
        dispatch(&mut registry, &mut backend, &call("maximize", json!(1))).unwrap();

        let reply =
            dispatch(&mut registry, &mut backend, &call("isMaximized", json!(1))).unwrap();
        assert_eq!(reply, Reply::Bool(true));

        dispatch(
            &mut registry,
            &mut backend,
            &call("setFullscreen", json!({"windowId": 1, "fullscreen": true})),
        )
        .unwrap();
        let reply = dispatch(
            &mut registry,
            &mut backend,
            &call("isFullScreenSub", json!({"windowId": 1})),
        )
        .unwrap();
        assert_eq!(reply, Reply::Bool(true));

        let reply = dispatch(
            &mut registry,
            &mut backend,
            &call("isMinimized", json!({"windowId": 1})),
        )
        .unwrap();
        assert_eq!(reply, Reply::Bool(false));
    }

    #[test]
    fn test_prevent_close_flow_through_dispatcher() {
        let (mut registry, mut backend) = fixture();
        dispatch(&mut registry, &mut backend, &call("createWindow", json!(""))).unwrap();
        let id = WindowId::from_raw(1);
        let notices = registry.notices(id).unwrap();

        dispatch(
            &mut registry,
            &mut backend,
            &call("setPreventClose", json!({"windowId": 1, "setPreventClose": true})),
        )
        .unwrap();
        let reply =
            dispatch(&mut registry, &mut backend, &call("isPreventClose", json!(1))).unwrap();
        assert_eq!(reply, Reply::Bool(true));

        dispatch(&mut registry, &mut backend, &call("close", json!(1))).unwrap();
        assert!(registry.contains(id));
        assert_eq!(
            notices.try_recv(),
            Ok(crate::window::WindowNotice::CloseIntercepted)
        );
    }

    #[test]
    fn test_sub_window_enumeration_in_creation_order() {
        let (mut registry, mut backend) = fixture();
        dispatch(&mut registry, &mut backend, &call("createWindow", json!("a"))).unwrap();
        dispatch(&mut registry, &mut backend, &call("createWindow", json!("b"))).unwrap();

        let reply = dispatch(
            &mut registry,
            &mut backend,
            &call("getAllSubWindowIds", serde_json::Value::Null),
        )
        .unwrap();
        assert_eq!(
            reply,
            Reply::Ids(vec![WindowId::from_raw(1), WindowId::from_raw(2)])
        );
    }

    #[test]
    fn test_not_found_for_concurrently_closed_target() {
        let (mut registry, mut backend) = fixture();
        let err =
            dispatch(&mut registry, &mut backend, &call("focus", json!(7))).unwrap_err();
        assert_eq!(err, ControlError::NotFound(WindowId::from_raw(7)));
    }
}
