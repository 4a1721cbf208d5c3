//! Backend-agnostic window management trait
//!
//! Every native surface (GLFW, an offscreen test surface, ...) implements
//! [`WindowBackend`]. [`Window`](super::Window) drives it and never touches
//! backend-specific types.

use super::{IconImage, WindowConfig, WindowError};
use crate::events::WindowEvent;
use crate::foundation::math::Vec2;

/// Trait for window backend implementations
///
/// # Thread Safety
/// No `Send` bound: native windowing APIs expect to be driven from the main
/// thread, and the whole UI layer runs on that one thread anyway.
pub trait WindowBackend {
    /// Create the native window and its drawable surface
    ///
    /// Called exactly once by [`Window::build`](super::Window::build). Returns
    /// the initial drawable size. The window stays hidden until
    /// [`set_visible`](Self::set_visible) is called.
    fn realize(&mut self, config: &WindowConfig) -> Result<Vec2, WindowError>;

    /// Show or hide the window
    fn set_visible(&mut self, visible: bool);

    /// Whether the window is currently shown
    fn is_visible(&self) -> bool;

    /// Whether the user or the application asked the window to close
    fn should_close(&self) -> bool;

    /// Request (or cancel a request) to close the window
    fn set_should_close(&mut self, should_close: bool);

    /// Drain native events captured since the last call
    ///
    /// Surface size changes are reported as [`WindowEvent::Resized`].
    fn poll_events(&mut self) -> Vec<WindowEvent>;

    /// Current drawable size in pixels
    fn size(&self) -> Vec2;

    /// Update the title bar text
    fn set_title(&mut self, title: &str);

    /// Maximize the window
    fn maximize(&mut self);

    /// Switch between fullscreen and windowed mode
    fn set_fullscreen(&mut self, fullscreen: bool);

    /// Whether the window covers the whole screen
    fn is_fullscreen(&self) -> bool;

    /// Replace the window icon
    fn set_icon(&mut self, icon: &IconImage) -> Result<(), WindowError>;

    /// Hand the finished frame to the screen
    fn present(&mut self) {}

    /// Access to the concrete type for downcasting
    fn as_any(&self) -> &dyn std::any::Any;

    /// Mutable access to the concrete type for downcasting
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}
