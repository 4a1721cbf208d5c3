//! Framework input events
//!
//! Backends translate their native callbacks into these types; the UI layer
//! only ever sees already-captured events.

use crate::foundation::math::Vec2;
use bitflags::bitflags;

/// Mouse button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

/// Kind of mouse event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    /// Cursor moved
    Moved,
    /// Button went down
    Pressed(MouseButton),
    /// Button went up
    Released(MouseButton),
}

/// Mouse event in window coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    /// What happened
    pub action: MouseAction,
    /// Cursor position in pixels, top-left origin
    pub position: Vec2,
}

impl MouseEvent {
    /// Cursor moved to `position`
    pub fn moved(position: Vec2) -> Self {
        Self { action: MouseAction::Moved, position }
    }

    /// `button` pressed at `position`
    pub fn pressed(button: MouseButton, position: Vec2) -> Self {
        Self { action: MouseAction::Pressed(button), position }
    }

    /// `button` released at `position`
    pub fn released(button: MouseButton, position: Vec2) -> Self {
        Self { action: MouseAction::Released(button), position }
    }
}

bitflags! {
    /// Keyboard modifier state
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Either shift key
        const SHIFT = 1 << 0;
        /// Either control key
        const CONTROL = 1 << 1;
        /// Either alt key
        const ALT = 1 << 2;
        /// Super / command / windows key
        const SUPER = 1 << 3;
    }
}

/// Keys the UI layer understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Enter / return
    Enter,
    /// Escape
    Escape,
    /// Space bar
    Space,
    /// Tab
    Tab,
    /// Backspace
    Backspace,
    /// Arrow up
    Up,
    /// Arrow down
    Down,
    /// Arrow left
    Left,
    /// Arrow right
    Right,
    /// Printable character key, lower-case
    Char(char),
    /// Function key F1..F12
    F(u8),
    /// Anything else, carrying the backend scancode
    Other(i32),
}

/// Key state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Key went down
    Pressed,
    /// Key went up
    Released,
    /// Key held and repeating
    Repeat,
}

/// Keyboard event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Which key
    pub key: Key,
    /// What happened to it
    pub action: KeyAction,
    /// Modifiers held at the time
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Plain key press without modifiers
    pub fn pressed(key: Key) -> Self {
        Self { key, action: KeyAction::Pressed, modifiers: Modifiers::empty() }
    }

    /// Plain key release without modifiers
    pub fn released(key: Key) -> Self {
        Self { key, action: KeyAction::Released, modifiers: Modifiers::empty() }
    }
}

/// Event produced by a window backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEvent {
    /// Drawable surface changed size
    Resized(Vec2),
    /// User asked to close the window
    CloseRequested,
    /// Mouse input
    Mouse(MouseEvent),
    /// Keyboard input
    Key(KeyEvent),
}
