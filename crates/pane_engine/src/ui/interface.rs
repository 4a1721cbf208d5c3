//! User interfaces (screens)
//!
//! A [`UserInterface`] is one screen: a tree of components it can throw away
//! and rebuild at any time. Concrete screens supply the recipe in
//! [`UserInterface::build`]; everything else (reload, visibility, render and
//! input propagation) comes from [`InterfaceOps`].

use std::any::Any;

use super::component::{Component, VisibleOnly};
use super::context::UiContext;
use crate::events::{KeyEvent, MouseAction, MouseEvent};
use crate::foundation::collections::StorageKey;
use crate::foundation::math::Vec2;
use crate::render::Renderer;
use crate::storage::{ObjectStorage, Storable};

/// Key of a component inside its interface
pub type ComponentKey = StorageKey;

/// Component storage of an interface
pub type ComponentStorage = ObjectStorage<Component, VisibleOnly>;

/// Type-erased access to the concrete type behind a trait object
pub trait AsAny: Any {
    /// Shared access as `dyn Any`
    fn as_any(&self) -> &dyn Any;
    /// Mutable access as `dyn Any`
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// State every interface carries
pub struct InterfaceCore {
    components: ComponentStorage,
    visible: bool,
    size: Vec2,
    builds: u32,
}

impl Default for InterfaceCore {
    fn default() -> Self {
        Self::new()
    }
}

impl InterfaceCore {
    /// Hidden interface with no components
    pub fn new() -> Self {
        Self {
            components: ComponentStorage::new(),
            visible: false,
            size: Vec2::zeros(),
            builds: 0,
        }
    }

    /// Component storage
    pub fn components(&self) -> &ComponentStorage {
        &self.components
    }

    /// Mutable component storage
    pub fn components_mut(&mut self) -> &mut ComponentStorage {
        &mut self.components
    }

    /// Component by key
    pub fn component(&self, key: ComponentKey) -> Option<&Component> {
        self.components.get(key)
    }

    /// Mutable component by key
    pub fn component_mut(&mut self, key: ComponentKey) -> Option<&mut Component> {
        self.components.get_mut(key)
    }

    /// Last surface size this interface was laid out for
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Whether the interface is shown
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// How many times the component tree was built
    pub fn builds(&self) -> u32 {
        self.builds
    }

    /// Remember `size` and lay every component out against it
    pub fn layout(&mut self, size: Vec2) {
        self.size = size;
        self.components.for_each_mut(|_, component| component.layout(size));
    }
}

/// Collects the components of a (re)build
pub struct InterfaceBuilder {
    size: Vec2,
    components: ComponentStorage,
}

impl InterfaceBuilder {
    fn new(size: Vec2) -> Self {
        Self {
            size,
            components: ComponentStorage::new(),
        }
    }

    /// Surface size the tree is built for
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Add a component; the key stays valid after the build completes
    pub fn add(&mut self, mut component: Component) -> ComponentKey {
        component.layout(self.size);
        self.components.add(component)
    }
}

/// One screen of UI
pub trait UserInterface: AsAny {
    /// Shared interface state
    fn core(&self) -> &InterfaceCore;

    /// Mutable interface state
    fn core_mut(&mut self) -> &mut InterfaceCore;

    /// Create the component tree from scratch
    ///
    /// Called on mount and on every reload; the previous tree is gone by the
    /// time the new one is installed.
    fn build(&mut self, ui: &mut InterfaceBuilder);

    /// Human-readable name for logs
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// The surface changed size; re-lays out the components by default
    fn on_resize(&mut self, size: Vec2) {
        self.core_mut().layout(size);
    }

    /// The interface was shown or hidden
    ///
    /// Use this to pause timers or animations while hidden.
    fn on_visibility_changed(&mut self, _visible: bool) {}

    /// Per-frame update while active
    fn update(&mut self, _delta_time: f32) {}

    /// Keyboard input seen before the components get it
    fn on_key(&mut self, _event: &KeyEvent, _ctx: &mut UiContext) {}
}

/// Operations every [`UserInterface`] gets for free
pub trait InterfaceOps {
    /// Tear down the component tree and build it again
    fn reload(&mut self);

    /// Show or hide without touching the component tree
    fn set_visible(&mut self, visible: bool);

    /// Whether the interface is shown
    fn is_visible(&self) -> bool;

    /// Draw every visible component in insertion order
    fn render_components(&mut self, renderer: &mut dyn Renderer);

    /// Route a mouse event into the component tree
    fn dispatch_mouse(&mut self, event: &MouseEvent, ctx: &mut UiContext);

    /// Route a key event to the interface, then the component tree
    fn dispatch_key(&mut self, event: &KeyEvent, ctx: &mut UiContext);
}

impl<T: UserInterface + ?Sized> InterfaceOps for T {
    fn reload(&mut self) {
        let mut builder = InterfaceBuilder::new(self.core().size());
        self.build(&mut builder);

        let core = self.core_mut();
        core.components = builder.components;
        core.builds += 1;
        log::debug!("Built {} components for {}", self.core().components.len(), self.name());
    }

    fn set_visible(&mut self, visible: bool) {
        if self.core().visible == visible {
            return;
        }
        self.core_mut().visible = visible;
        if !visible {
            self.core_mut()
                .components
                .for_each_mut(|_, component| component.clear_pointer_state());
        }
        self.on_visibility_changed(visible);
    }

    fn is_visible(&self) -> bool {
        self.core().visible
    }

    fn render_components(&mut self, renderer: &mut dyn Renderer) {
        self.core_mut().components.render(renderer);
    }

    fn dispatch_mouse(&mut self, event: &MouseEvent, ctx: &mut UiContext) {
        let point = event.position;
        self.core_mut()
            .components
            .for_each_propagating_mut(|_, component| match event.action {
                MouseAction::Moved => component.mouse_moved(point, Vec2::zeros()),
                MouseAction::Pressed(button) => component.mouse_pressed(button, point, Vec2::zeros()),
                MouseAction::Released(button) => {
                    component.mouse_released(button, point, Vec2::zeros(), ctx);
                }
            });
    }

    fn dispatch_key(&mut self, event: &KeyEvent, ctx: &mut UiContext) {
        self.on_key(event, ctx);
        self.core_mut()
            .components
            .for_each_propagating_mut(|_, component| component.key_event(event, ctx));
    }
}

impl Storable for Box<dyn UserInterface> {
    fn on_mount(&mut self) {
        self.as_mut().reload();
    }

    fn render(&mut self, renderer: &mut dyn Renderer) {
        self.as_mut().render_components(renderer);
    }

    fn update(&mut self, delta_time: f32) {
        UserInterface::update(self.as_mut(), delta_time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{MouseButton, MouseEvent};
    use crate::render::CommandRenderer;
    use crate::ui::layout::Anchor;

    #[derive(Default)]
    struct Counter {
        core: InterfaceCore,
        visibility_changes: Vec<bool>,
    }

    impl UserInterface for Counter {
        fn core(&self) -> &InterfaceCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut InterfaceCore {
            &mut self.core
        }

        fn build(&mut self, ui: &mut InterfaceBuilder) {
            ui.add(Component::text("Score").with_position(Vec2::new(10.0, 10.0)));
            ui.add(
                Component::button("Reset", |ctx| ctx.reload())
                    .with_anchor(Anchor::Center)
                    .with_size(Vec2::new(100.0, 40.0)),
            );
        }

        fn on_visibility_changed(&mut self, visible: bool) {
            self.visibility_changes.push(visible);
        }
    }

    fn shape(ui: &Counter) -> Vec<(crate::ui::ComponentKind, Vec2)> {
        ui.core()
            .components()
            .iter()
            .map(|(_, c)| (c.kind(), c.resolved_position()))
            .collect()
    }

    #[test]
    fn test_reload_twice_yields_same_tree() {
        let mut ui = Counter::default();
        ui.on_resize(Vec2::new(800.0, 600.0));
        ui.reload();
        let first = shape(&ui);
        ui.reload();

        assert_eq!(first, shape(&ui));
        assert_eq!(first.len(), 2);
        assert_eq!(ui.core().builds(), 2);
    }

    #[test]
    fn test_resize_relayouts_anchored_components() {
        let mut ui = Counter::default();
        ui.on_resize(Vec2::new(800.0, 600.0));
        ui.reload();

        ui.on_resize(Vec2::new(1000.0, 600.0));

        let (_, button) = ui.core().components().iter().nth(1).unwrap();
        let expected = Vec2::new(1000.0 / 2.0 - button.outer_size().x / 2.0, 300.0 - button.outer_size().y / 2.0);
        approx::assert_relative_eq!(button.resolved_position(), expected);
    }

    #[test]
    fn test_visibility_toggle_keeps_components() {
        let mut ui = Counter::default();
        ui.reload();
        ui.set_visible(true);
        ui.set_visible(true);
        ui.set_visible(false);

        assert_eq!(ui.visibility_changes, vec![true, false]);
        assert_eq!(ui.core().components().len(), 2);
    }

    #[test]
    fn test_dispatch_mouse_reaches_buttons() {
        let mut ui = Counter::default();
        ui.on_resize(Vec2::new(800.0, 600.0));
        ui.reload();

        let center = Vec2::new(400.0, 300.0);
        let mut ctx = UiContext::new();
        ui.dispatch_mouse(&MouseEvent::moved(center), &mut ctx);
        ui.dispatch_mouse(&MouseEvent::pressed(MouseButton::Left, center), &mut ctx);
        ui.dispatch_mouse(&MouseEvent::released(MouseButton::Left, center), &mut ctx);

        assert_eq!(ctx.drain(), vec![crate::ui::UiRequest::Reload]);
    }

    #[test]
    fn test_render_components_draws_in_order() {
        let mut ui = Counter::default();
        ui.reload();
        let mut renderer = CommandRenderer::new();
        ui.render_components(&mut renderer);
        assert_eq!(renderer.texts(), vec!["Score", "Reset"]);
    }
}
