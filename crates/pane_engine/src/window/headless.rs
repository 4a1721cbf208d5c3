//! Offscreen window backend
//!
//! Keeps the window state in memory and replays events queued by the caller.
//! Used by tests and by applications that render without a display.

use std::collections::VecDeque;

use super::{IconImage, WindowBackend, WindowConfig, WindowError};
use crate::events::{MouseButton, MouseEvent, WindowEvent};
use crate::foundation::math::Vec2;

/// Screen size assumed by [`HeadlessBackend::new`]
const DEFAULT_SCREEN: (f32, f32) = (1920.0, 1080.0);

/// In-memory window backend
#[derive(Debug)]
pub struct HeadlessBackend {
    realized: bool,
    visible: bool,
    should_close: bool,
    fullscreen: bool,
    maximized: bool,
    title: String,
    size: Vec2,
    screen_size: Vec2,
    icon_size: Option<(u32, u32)>,
    pending: VecDeque<WindowEvent>,
    presented_frames: u64,
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessBackend {
    /// Create a backend for a 1920x1080 screen
    pub fn new() -> Self {
        Self::with_screen_size(Vec2::new(DEFAULT_SCREEN.0, DEFAULT_SCREEN.1))
    }

    /// Create a backend for a screen of the given size
    pub fn with_screen_size(screen_size: Vec2) -> Self {
        Self {
            realized: false,
            visible: false,
            should_close: false,
            fullscreen: false,
            maximized: false,
            title: String::new(),
            size: Vec2::zeros(),
            screen_size,
            icon_size: None,
            pending: VecDeque::new(),
            presented_frames: 0,
        }
    }

    /// Queue an event for the next `poll_events`
    pub fn push_event(&mut self, event: WindowEvent) {
        self.pending.push_back(event);
    }

    /// Resize the surface and queue the matching event
    pub fn resize(&mut self, size: Vec2) {
        self.size = size;
        self.push_event(WindowEvent::Resized(size));
    }

    /// Queue a left click (move, press, release) at `position`
    pub fn click(&mut self, position: Vec2) {
        self.push_event(WindowEvent::Mouse(MouseEvent::moved(position)));
        self.push_event(WindowEvent::Mouse(MouseEvent::pressed(MouseButton::Left, position)));
        self.push_event(WindowEvent::Mouse(MouseEvent::released(MouseButton::Left, position)));
    }

    /// Whether `realize` has run
    pub fn is_realized(&self) -> bool {
        self.realized
    }

    /// Current title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whether `maximize` was called
    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    /// Dimensions of the last icon set
    pub fn icon_size(&self) -> Option<(u32, u32)> {
        self.icon_size
    }

    /// Number of frames handed to `present`
    pub fn presented_frames(&self) -> u64 {
        self.presented_frames
    }
}

impl WindowBackend for HeadlessBackend {
    fn realize(&mut self, config: &WindowConfig) -> Result<Vec2, WindowError> {
        if self.realized {
            return Err(WindowError::Backend("Surface already realized".to_string()));
        }
        self.realized = true;
        self.title.clone_from(&config.title);
        self.size = config.size();
        Ok(self.size)
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn should_close(&self) -> bool {
        self.should_close
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.should_close = should_close;
    }

    fn poll_events(&mut self) -> Vec<WindowEvent> {
        self.pending.drain(..).collect()
    }

    fn size(&self) -> Vec2 {
        self.size
    }

    fn set_title(&mut self, title: &str) {
        title.clone_into(&mut self.title);
    }

    fn maximize(&mut self) {
        self.maximized = true;
        self.resize(self.screen_size);
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        if self.fullscreen == fullscreen {
            return;
        }
        self.fullscreen = fullscreen;
        if fullscreen {
            self.resize(self.screen_size);
        }
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn set_icon(&mut self, icon: &IconImage) -> Result<(), WindowError> {
        self.icon_size = Some((icon.width, icon.height));
        Ok(())
    }

    fn present(&mut self) {
        self.presented_frames += 1;
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
