//! Window configuration and builder.

use winit::dpi::{LogicalPosition, LogicalSize, Position, Size};
use winit::window::{Window, WindowAttributes};

use casement_protocol::Frame;

/// Configuration for creating a native window.
///
/// Converted to winit `WindowAttributes` by the backend at creation time.
/// Spawned windows default to hidden so their embedding can finish startup
/// before the first show.
///
/// # Example
///
/// ```
/// use casement::window::WindowConfig;
///
/// let config = WindowConfig::new("Inspector")
///     .with_size(960.0, 640.0)
///     .with_position(200.0, 120.0)
///     .with_resizable(true);
/// assert_eq!(config.title(), "Inspector");
/// ```
#[derive(Debug, Clone)]
pub struct WindowConfig {
    title: String,
    size: Option<(f64, f64)>,
    position: Option<(f64, f64)>,
    resizable: bool,
    decorations: bool,
    visible: bool,
}

/// Default inner size for windows whose config does not name one.
const DEFAULT_SIZE: (f64, f64) = (1280.0, 720.0);

impl WindowConfig {
    /// Create a configuration with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            size: None,
            position: None,
            resizable: true,
            decorations: true,
            visible: false,
        }
    }

    /// Set the initial inner size in logical pixels.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.size = Some((width, height));
        self
    }

    /// Set the initial outer position in logical pixels.
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Some((x, y));
        self
    }

    /// Set whether the window is resizable.
    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    /// Set whether the window has native decorations.
    pub fn with_decorations(mut self, decorations: bool) -> Self {
        self.decorations = decorations;
        self
    }

    /// Set whether the window is visible on creation.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// The window title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The frame this configuration describes, with defaults filled in.
    ///
    /// Used to seed the registry's geometry cache when the backend cannot
    /// report an outer frame yet.
    pub fn initial_frame(&self) -> Frame {
        let (width, height) = self.size.unwrap_or(DEFAULT_SIZE);
        let (left, top) = self.position.unwrap_or((0.0, 0.0));
        Frame::new(left, top, width, height)
    }

    /// Convert to winit `WindowAttributes`.
    pub fn to_window_attributes(&self) -> WindowAttributes {
        let (width, height) = self.size.unwrap_or(DEFAULT_SIZE);
        let mut attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(Size::Logical(LogicalSize::new(width, height)))
            .with_resizable(self.resizable)
            .with_decorations(self.decorations)
            .with_visible(self.visible);

        if let Some((x, y)) = self.position {
            attrs = attrs.with_position(Position::Logical(LogicalPosition::new(x, y)));
        }

        attrs
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new("")
    }
}
