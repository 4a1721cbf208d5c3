//! UI components
//!
//! A [`Component`] is one node of an interface's tree. Instead of a
//! `Component -> Text -> Button` inheritance chain, every node carries
//! optional behaviour slots: a text payload, a background graphic, an action
//! and a keyboard shortcut. A button is simply a component with text, an
//! action and a hover graphic.
//!
//! Components do not point back at their container. The parent's absolute
//! origin is passed down during rendering and hit-testing instead.

use std::fmt;

use super::context::UiContext;
use super::graphic::{ButtonTheme, Graphic};
use super::layout::Anchor;
use crate::events::{Key, KeyAction, KeyEvent, MouseButton};
use crate::foundation::collections::StorageKey;
use crate::foundation::math::{Color, Rect, Vec2};
use crate::render::{Renderer, TextStyle};
use crate::storage::{PropagationPolicy, Storable};

/// Callback fired when an interactive component is activated
pub type Action = Box<dyn FnMut(&mut UiContext)>;

/// Width of one character relative to the font size, used to size text
/// components that were not given an explicit size
const CHAR_WIDTH_FACTOR: f32 = 0.5;

/// Rough classification of a component, derived from its slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// No text and no action
    Container,
    /// Text without action
    Text,
    /// Has an action
    Button,
}

/// Text payload of a component
#[derive(Debug, Clone, PartialEq)]
pub struct TextContent {
    /// The string drawn
    pub text: String,
    /// Colour and size
    pub style: TextStyle,
}

/// A node of the UI tree
pub struct Component {
    offset: Vec2,
    anchor: Anchor,
    size: Vec2,
    padding: Vec2,
    background: Option<Graphic>,
    text: Option<TextContent>,
    action: Option<Action>,
    shortcut: Option<Key>,
    children: Vec<Component>,
    visible: bool,
    hovered: bool,
    pressed_inside: bool,
    /// Top-left corner relative to the parent, resolved by the last layout
    resolved: Vec2,
}

impl Default for Component {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("kind", &self.kind())
            .field("offset", &self.offset)
            .field("anchor", &self.anchor)
            .field("size", &self.size)
            .field("text", &self.text.as_ref().map(|t| t.text.as_str()))
            .field("hovered", &self.hovered)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

impl Component {
    /// Empty, visible container at the top-left corner
    pub fn new() -> Self {
        Self {
            offset: Vec2::zeros(),
            anchor: Anchor::TopLeft,
            size: Vec2::zeros(),
            padding: Vec2::zeros(),
            background: None,
            text: None,
            action: None,
            shortcut: None,
            children: Vec::new(),
            visible: true,
            hovered: false,
            pressed_inside: false,
            resolved: Vec2::zeros(),
        }
    }

    /// Text label sized from its content
    pub fn text(text: impl Into<String>) -> Self {
        Self::new().with_text(text, TextStyle::default())
    }

    /// Solid panel of the given size
    pub fn panel(size: Vec2, color: Color) -> Self {
        Self::new().with_size(size).with_background(Graphic::Solid(color))
    }

    /// Button with the default theme: green while idle, red while hovered
    pub fn button(text: impl Into<String>, action: impl FnMut(&mut UiContext) + 'static) -> Self {
        Self::themed_button(text, &ButtonTheme::default(), action)
    }

    /// Button styled by `theme`
    pub fn themed_button(
        text: impl Into<String>,
        theme: &ButtonTheme,
        action: impl FnMut(&mut UiContext) + 'static,
    ) -> Self {
        Self::new()
            .with_text(text, theme.text)
            .with_padding(theme.padding)
            .with_background(theme.graphic())
            .with_action(action)
    }

    /// Set the text payload; the size follows the text unless set explicitly later
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>, style: TextStyle) -> Self {
        let text = text.into();
        self.size = estimate_text_size(&text, style.font_size);
        self.text = Some(TextContent { text, style });
        self
    }

    /// Offset from the anchor point
    #[must_use]
    pub fn with_position(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Anchor on the parent's area
    #[must_use]
    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Content size, excluding padding
    #[must_use]
    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    /// Space around the content on each side
    #[must_use]
    pub fn with_padding(mut self, padding: Vec2) -> Self {
        self.padding = padding;
        self
    }

    /// Background graphic
    #[must_use]
    pub fn with_background(mut self, background: Graphic) -> Self {
        self.background = Some(background);
        self
    }

    /// Action fired on activation
    #[must_use]
    pub fn with_action(mut self, action: impl FnMut(&mut UiContext) + 'static) -> Self {
        self.action = Some(Box::new(action));
        self
    }

    /// Key that activates the component while its interface is active
    #[must_use]
    pub fn with_shortcut(mut self, key: Key) -> Self {
        self.shortcut = Some(key);
        self
    }

    /// Append a child laid out inside this component
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Initial visibility
    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Classification derived from the slots in use
    pub fn kind(&self) -> ComponentKind {
        if self.action.is_some() {
            ComponentKind::Button
        } else if self.text.is_some() {
            ComponentKind::Text
        } else {
            ComponentKind::Container
        }
    }

    /// Offset from the anchor point
    pub fn position(&self) -> Vec2 {
        self.offset
    }

    /// Move the component
    pub fn set_position(&mut self, offset: Vec2) {
        self.offset = offset;
    }

    /// Anchor on the parent's area
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Content size, excluding padding
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Padding on each side
    pub fn padding(&self) -> Vec2 {
        self.padding
    }

    /// Size including padding on both sides
    pub fn outer_size(&self) -> Vec2 {
        self.size + self.padding * 2.0
    }

    /// Top-left corner relative to the parent, as of the last layout
    pub fn resolved_position(&self) -> Vec2 {
        self.resolved
    }

    /// Screen rectangle when the parent's top-left corner is at `origin`
    pub fn bounds(&self, origin: Vec2) -> Rect {
        Rect::new(origin + self.resolved, self.outer_size())
    }

    /// Current text, if any
    pub fn text_content(&self) -> Option<&str> {
        self.text.as_ref().map(|t| t.text.as_str())
    }

    /// Replace the text, keeping style and size
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        match self.text.as_mut() {
            Some(content) => content.text = text,
            None => self.text = Some(TextContent { text, style: TextStyle::default() }),
        }
    }

    /// Background graphic, if any
    pub fn background(&self) -> Option<&Graphic> {
        self.background.as_ref()
    }

    /// Whether the pointer is over the component
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Whether the component is drawn and receives input
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the component and its children
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if !visible {
            self.clear_pointer_state();
        }
    }

    /// Forget hover and press state here and in every child
    pub fn clear_pointer_state(&mut self) {
        self.hovered = false;
        self.pressed_inside = false;
        for child in &mut self.children {
            child.clear_pointer_state();
        }
    }

    /// Whether an action is attached
    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    /// Child components
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Mutable child components
    pub fn children_mut(&mut self) -> &mut [Self] {
        &mut self.children
    }

    /// Resolve the anchor against the parent's `area`, then lay out children
    pub fn layout(&mut self, area: Vec2) {
        let outer = self.outer_size();
        self.resolved = self.anchor.resolve(self.offset, outer, area);
        for child in &mut self.children {
            child.layout(outer);
        }
    }

    /// Draw the component, then its children, with the parent at `origin`
    pub fn render_at(&self, renderer: &mut dyn Renderer, origin: Vec2) {
        if !self.visible {
            return;
        }
        let position = origin + self.resolved;

        if let Some(background) = &self.background {
            background.draw(renderer, position, self.outer_size(), self.hovered);
        }
        if let Some(content) = &self.text {
            renderer.draw_text(&content.text, position + self.padding, &content.style);
        }
        for child in &self.children {
            child.render_at(renderer, position);
        }
    }

    /// Pointer moved to `point`
    pub fn mouse_moved(&mut self, point: Vec2, origin: Vec2) {
        if !self.visible {
            return;
        }
        self.update_hover(point, origin);
        let position = origin + self.resolved;
        for child in &mut self.children {
            child.mouse_moved(point, position);
        }
    }

    /// `button` went down at `point`
    pub fn mouse_pressed(&mut self, button: MouseButton, point: Vec2, origin: Vec2) {
        if !self.visible {
            return;
        }
        self.update_hover(point, origin);
        if button == MouseButton::Left {
            self.pressed_inside = self.hovered;
        }
        let position = origin + self.resolved;
        for child in &mut self.children {
            child.mouse_pressed(button, point, position);
        }
    }

    /// `button` went up at `point`
    ///
    /// The action fires once if the press began inside the component and the
    /// pointer is still inside now.
    pub fn mouse_released(&mut self, button: MouseButton, point: Vec2, origin: Vec2, ctx: &mut UiContext) {
        if !self.visible {
            return;
        }
        self.update_hover(point, origin);
        if button == MouseButton::Left {
            let activated = self.pressed_inside && self.hovered;
            self.pressed_inside = false;
            if activated {
                self.activate(ctx);
            }
        }
        let position = origin + self.resolved;
        for child in &mut self.children {
            child.mouse_released(button, point, position, ctx);
        }
    }

    /// Keyboard input; a press of the shortcut key fires the action
    pub fn key_event(&mut self, event: &KeyEvent, ctx: &mut UiContext) {
        if !self.visible {
            return;
        }
        if event.action == KeyAction::Pressed && self.shortcut == Some(event.key) {
            self.activate(ctx);
        }
        for child in &mut self.children {
            child.key_event(event, ctx);
        }
    }

    /// Run the action, if any
    pub fn activate(&mut self, ctx: &mut UiContext) {
        if let Some(action) = self.action.as_mut() {
            action(ctx);
        }
    }

    fn update_hover(&mut self, point: Vec2, origin: Vec2) {
        self.hovered = self.visible && self.bounds(origin).contains(point);
    }
}

impl Storable for Component {
    fn render(&mut self, renderer: &mut dyn Renderer) {
        self.render_at(renderer, Vec2::zeros());
    }
}

/// Propagation policy admitting only visible components
#[derive(Debug, Clone, Copy, Default)]
pub struct VisibleOnly;

impl PropagationPolicy<Component> for VisibleOnly {
    fn should_propagate(&self, _key: StorageKey, component: &Component) -> bool {
        component.is_visible()
    }
}

#[allow(clippy::cast_precision_loss)]
fn estimate_text_size(text: &str, font_size: f32) -> Vec2 {
    let chars = text.chars().count() as f32;
    Vec2::new(chars * font_size * CHAR_WIDTH_FACTOR, font_size)
}
