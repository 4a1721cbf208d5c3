//! UI Manager
//!
//! Owns every registered interface and keeps exactly one of them active.
//! Rendering, updates and input reach only the active interface; resize
//! notifications reach all of them so hidden screens are laid out correctly
//! when they come back.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use thiserror::Error;

use super::context::{UiContext, UiRequest};
use super::interface::{AsAny, InterfaceOps, UserInterface};
use crate::events::WindowEvent;
use crate::foundation::collections::{ListenerId, StorageKey};
use crate::foundation::math::Vec2;
use crate::render::Renderer;
use crate::storage::{ObjectStorage, PropagationPolicy};
use crate::window::{ListenerError, Window};

/// Key of an interface inside the manager
pub type InterfaceKey = StorageKey;

/// UI manager errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// No interface with that key or type is registered
    #[error("Interface not registered: {0}")]
    NotRegistered(String),

    /// The operation needs an active interface
    #[error("No interface is active")]
    NoActiveInterface,
}

/// Propagation policy admitting only the active interface
#[derive(Debug, Clone, Copy, Default)]
pub struct ActiveOnly {
    active: Option<InterfaceKey>,
}

impl ActiveOnly {
    /// Currently admitted interface
    pub fn active(&self) -> Option<InterfaceKey> {
        self.active
    }
}

impl PropagationPolicy<Box<dyn UserInterface>> for ActiveOnly {
    fn should_propagate(&self, key: StorageKey, _interface: &Box<dyn UserInterface>) -> bool {
        self.active == Some(key)
    }
}

/// Central UI management system
pub struct UIManager {
    interfaces: ObjectStorage<Box<dyn UserInterface>, ActiveOnly>,
    /// Surface size handed to interfaces as they are added
    surface_size: Vec2,
}

impl Default for UIManager {
    fn default() -> Self {
        Self::new()
    }
}

impl UIManager {
    /// Create a manager with no interfaces
    pub fn new() -> Self {
        Self {
            interfaces: ObjectStorage::new(),
            surface_size: Vec2::zeros(),
        }
    }

    /// Register an interface and build its component tree
    ///
    /// The first interface added to an empty manager becomes active.
    pub fn add<T: UserInterface>(&mut self, interface: T) -> InterfaceKey {
        self.add_boxed(Box::new(interface))
    }

    /// Register an already boxed interface
    pub fn add_boxed(&mut self, mut interface: Box<dyn UserInterface>) -> InterfaceKey {
        let was_empty = self.interfaces.is_empty();
        interface.on_resize(self.surface_size);
        let key = self.interfaces.add(interface);

        if let Some(interface) = self.interfaces.get(key) {
            log::debug!("Registered interface {}", interface.name());
        }
        if was_empty {
            self.activate(key);
        }
        key
    }

    /// Make the interface under `key` the only active one
    ///
    /// The previously active interface is hidden, the target is shown.
    /// Showing the interface that is already active changes nothing.
    pub fn show(&mut self, key: InterfaceKey) -> Result<(), UiError> {
        if !self.interfaces.contains(key) {
            return Err(UiError::NotRegistered(format!("{key:?}")));
        }
        self.activate(key);
        Ok(())
    }

    /// Make the first interface of type `T` the only active one
    ///
    /// Matches the exact concrete type; see [`key_of_type`](Self::key_of_type).
    pub fn show_type<T: UserInterface>(&mut self) -> Result<(), UiError> {
        let key = self
            .key_of_type::<T>()
            .ok_or_else(|| UiError::NotRegistered(std::any::type_name::<T>().to_owned()))?;
        self.activate(key);
        Ok(())
    }

    /// Key of the first interface of type `T`, in registration order
    ///
    /// Types are compared by [`TypeId`], so only interfaces whose concrete type
    /// is exactly `T` match. A screen that wraps or embeds a `T` does not.
    pub fn key_of_type<T: UserInterface>(&self) -> Option<InterfaceKey> {
        self.key_of_type_id(TypeId::of::<T>())
    }

    /// First interface whose concrete type is exactly `T`
    pub fn get_by_type<T: UserInterface>(&self) -> Option<&T> {
        self.interfaces
            .iter()
            .find_map(|(_, interface)| AsAny::as_any(&**interface).downcast_ref::<T>())
    }

    /// First interface whose concrete type is exactly `T`, mutably
    pub fn get_by_type_mut<T: UserInterface>(&mut self) -> Option<&mut T> {
        let key = self.key_of_type::<T>()?;
        self.interfaces
            .get_mut(key)
            .and_then(|interface| AsAny::as_any_mut(&mut **interface).downcast_mut::<T>())
    }

    /// Interface by key
    pub fn get(&self, key: InterfaceKey) -> Option<&dyn UserInterface> {
        self.interfaces.get(key).map(|interface| &**interface)
    }

    /// Interface by key, mutably
    pub fn get_mut(&mut self, key: InterfaceKey) -> Option<&mut (dyn UserInterface + 'static)> {
        self.interfaces.get_mut(key).map(|interface| &mut **interface)
    }

    /// Key of the active interface
    pub fn active_key(&self) -> Option<InterfaceKey> {
        self.interfaces.policy().active()
    }

    /// The active interface
    pub fn active(&self) -> Option<&dyn UserInterface> {
        self.active_key().and_then(|key| self.get(key))
    }

    /// Whether `key` is the active interface
    pub fn is_active(&self, key: InterfaceKey) -> bool {
        self.active_key() == Some(key)
    }

    /// Whether the interface under `key` would receive render, update and input
    pub fn should_propagate(&self, key: InterfaceKey) -> bool {
        self.interfaces.should_propagate(key)
    }

    /// Unregister an interface
    ///
    /// Removing the active interface leaves the manager with none active
    /// until the next [`show`](Self::show).
    pub fn remove(&mut self, key: InterfaceKey) -> Option<Box<dyn UserInterface>> {
        let mut interface = self.interfaces.remove(key)?;
        if self.is_active(key) {
            self.interfaces.policy_mut().active = None;
            interface.set_visible(false);
            log::debug!("Removed the active interface {}", interface.name());
        }
        Some(interface)
    }

    /// Number of registered interfaces
    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    /// Whether no interface is registered
    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }

    /// Interface keys in registration order
    pub fn keys(&self) -> Vec<InterfaceKey> {
        self.interfaces.keys()
    }

    /// Rebuild every interface's component tree
    pub fn reload(&mut self) {
        self.interfaces.for_each_mut(|_, interface| interface.reload());
    }

    /// Rebuild only the active interface
    pub fn reload_active(&mut self) -> Result<(), UiError> {
        let key = self.active_key().ok_or(UiError::NoActiveInterface)?;
        if let Some(interface) = self.interfaces.get_mut(key) {
            interface.reload();
        }
        Ok(())
    }

    /// Forward a new surface size to every interface, active or not
    pub fn on_resize(&mut self, size: Vec2) {
        self.surface_size = size;
        self.interfaces.for_each_mut(|_, interface| interface.on_resize(size));
    }

    /// Last surface size seen
    pub fn surface_size(&self) -> Vec2 {
        self.surface_size
    }

    /// Subscribe a shared manager to the window's resize notifications
    ///
    /// The listener holds only a weak reference. It reports
    /// [`ListenerError::TargetUnavailable`] once the manager is dropped or
    /// while it is borrowed elsewhere. The manager is laid out for the
    /// window's current size right away.
    pub fn attach<R: Renderer>(manager: &Rc<RefCell<Self>>, window: &mut Window<R>) -> ListenerId {
        if let Ok(mut ui) = manager.try_borrow_mut() {
            ui.on_resize(window.size());
        }

        let weak: Weak<RefCell<Self>> = Rc::downgrade(manager);
        window.add_resize_listener(move |size| {
            let manager = weak
                .upgrade()
                .ok_or_else(|| ListenerError::TargetUnavailable("UI manager was dropped".to_owned()))?;
            let mut ui = manager
                .try_borrow_mut()
                .map_err(|_| ListenerError::TargetUnavailable("UI manager is busy".to_owned()))?;
            ui.on_resize(size);
            Ok(())
        })
    }

    /// Render the active interface only
    pub fn render(&mut self, renderer: &mut dyn Renderer) {
        self.interfaces.render(renderer);
    }

    /// Update the active interface only
    pub fn update(&mut self, delta_time: f32) {
        self.interfaces.update(delta_time);
    }

    /// Route a window event to the active interface
    ///
    /// Requests raised by component actions are applied once dispatch is
    /// over. Requests the manager does not handle itself (closing the
    /// window, custom requests) are returned.
    pub fn handle_event(&mut self, event: &WindowEvent) -> Vec<UiRequest> {
        let mut ctx = UiContext::new();
        match event {
            WindowEvent::Mouse(mouse) => self
                .interfaces
                .for_each_propagating_mut(|_, interface| interface.dispatch_mouse(mouse, &mut ctx)),
            WindowEvent::Key(key) => self
                .interfaces
                .for_each_propagating_mut(|_, interface| interface.dispatch_key(key, &mut ctx)),
            WindowEvent::Resized(_) | WindowEvent::CloseRequested => {}
        }
        self.apply_requests(ctx.drain())
    }

    /// Apply screen switches and reloads; return everything else
    pub fn apply_requests(&mut self, requests: Vec<UiRequest>) -> Vec<UiRequest> {
        let mut unhandled = Vec::new();
        for request in requests {
            match request {
                UiRequest::Show(key) => {
                    if let Err(err) = self.show(key) {
                        log::warn!("Ignoring show request: {}", err);
                    }
                }
                UiRequest::ShowType(type_id) => match self.key_of_type_id(type_id) {
                    Some(key) => self.activate(key),
                    None => log::warn!("Ignoring show request: no interface of type {:?}", type_id),
                },
                UiRequest::Reload => self.reload(),
                other => unhandled.push(other),
            }
        }
        unhandled
    }

    fn key_of_type_id(&self, type_id: TypeId) -> Option<InterfaceKey> {
        self.interfaces
            .iter()
            .find(|(_, interface)| Any::type_id(AsAny::as_any(&**interface)) == type_id)
            .map(|(key, _)| key)
    }

    fn activate(&mut self, key: InterfaceKey) {
        let previous = self.active_key();
        if previous == Some(key) {
            return;
        }

        if let Some(old) = previous.and_then(|old| self.interfaces.get_mut(old)) {
            old.set_visible(false);
        }
        self.interfaces.policy_mut().active = Some(key);
        if let Some(interface) = self.interfaces.get_mut(key) {
            interface.set_visible(true);
            log::info!("Showing interface {}", interface.name());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{MouseButton, MouseEvent};
    use crate::render::CommandRenderer;
    use crate::ui::{Anchor, Component, InterfaceBuilder, InterfaceCore};
    use crate::window::WindowConfig;

    /// Interface with a single label; records the sizes it was laid out for
    #[derive(Default)]
    struct Screen {
        core: InterfaceCore,
        label: &'static str,
        resizes: Vec<Vec2>,
        updates: u32,
    }

    impl Screen {
        fn new(label: &'static str) -> Self {
            Self { label, ..Self::default() }
        }
    }

    impl UserInterface for Screen {
        fn core(&self) -> &InterfaceCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut InterfaceCore {
            &mut self.core
        }

        fn build(&mut self, ui: &mut InterfaceBuilder) {
            ui.add(Component::text(self.label));
        }

        fn on_resize(&mut self, size: Vec2) {
            self.resizes.push(size);
            self.core_mut().layout(size);
        }

        fn update(&mut self, _delta_time: f32) {
            self.updates += 1;
        }
    }

    /// Second interface type for type-based lookup
    #[derive(Default)]
    struct Options {
        core: InterfaceCore,
    }

    impl UserInterface for Options {
        fn core(&self) -> &InterfaceCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut InterfaceCore {
            &mut self.core
        }

        fn build(&mut self, ui: &mut InterfaceBuilder) {
            ui.add(
                Component::button("Back", |ctx| ctx.show_type::<Screen>())
                    .with_anchor(Anchor::Center)
                    .with_size(Vec2::new(100.0, 40.0)),
            );
        }
    }

    fn resizes_of(manager: &UIManager, key: InterfaceKey) -> Vec<Vec2> {
        manager
            .get(key)
            .and_then(|interface| AsAny::as_any(interface).downcast_ref::<Screen>())
            .map(|screen| screen.resizes.clone())
            .unwrap_or_default()
    }

    fn visible(manager: &UIManager, key: InterfaceKey) -> bool {
        manager.get(key).map_or(false, |interface| interface.is_visible())
    }

    #[test]
    fn test_first_interface_becomes_active() {
        let mut manager = UIManager::new();
        assert!(manager.active_key().is_none());

        let a = manager.add(Screen::new("A"));
        let b = manager.add(Screen::new("B"));

        assert!(manager.is_active(a));
        assert!(!manager.is_active(b));
        assert!(visible(&manager, a));
        assert!(!visible(&manager, b));
    }

    #[test]
    fn test_show_keeps_exactly_one_active() {
        let mut manager = UIManager::new();
        let a = manager.add(Screen::new("A"));
        let b = manager.add(Screen::new("B"));

        manager.show(b).unwrap();
        assert!(!visible(&manager, a));
        assert!(visible(&manager, b));
        assert_eq!(manager.active_key(), Some(b));

        manager.show(b).unwrap();
        assert_eq!(manager.keys().iter().filter(|k| visible(&manager, **k)).count(), 1);
    }

    #[test]
    fn test_show_unregistered_is_an_error() {
        let mut manager = UIManager::new();
        let a = manager.add(Screen::new("A"));
        let stale = manager.add(Screen::new("B"));
        manager.remove(stale);

        assert!(matches!(manager.show(stale), Err(UiError::NotRegistered(_))));
        assert!(matches!(manager.show_type::<Options>(), Err(UiError::NotRegistered(_))));
        assert!(manager.is_active(a));
    }

    #[test]
    fn test_lookup_by_type() {
        let mut manager = UIManager::new();
        manager.add(Screen::new("A"));
        let options = manager.add(Options::default());

        assert_eq!(manager.key_of_type::<Options>(), Some(options));
        assert_eq!(manager.get_by_type::<Screen>().map(|s| s.label), Some("A"));
        manager.get_by_type_mut::<Screen>().unwrap().label = "changed";
        assert_eq!(manager.get_by_type::<Screen>().unwrap().label, "changed");

        manager.show_type::<Options>().unwrap();
        assert!(manager.is_active(options));
    }

    #[test]
    fn test_render_and_update_reach_active_only() {
        let mut manager = UIManager::new();
        manager.add(Screen::new("A"));
        let b = manager.add(Screen::new("B"));

        let mut renderer = CommandRenderer::new();
        manager.render(&mut renderer);
        manager.update(0.016);
        assert_eq!(renderer.texts(), vec!["A"]);
        assert_eq!(manager.get_by_type::<Screen>().unwrap().updates, 1);

        manager.show(b).unwrap();
        let mut renderer = CommandRenderer::new();
        manager.render(&mut renderer);
        assert_eq!(renderer.texts(), vec!["B"]);
        assert!(manager.should_propagate(b));
    }

    #[test]
    fn test_resize_reaches_every_interface() {
        let mut manager = UIManager::new();
        let a = manager.add(Screen::new("A"));
        let b = manager.add(Screen::new("B"));

        manager.on_resize(Vec2::new(1024.0, 768.0));

        for key in [a, b] {
            let size = manager.get(key).unwrap().core().size();
            assert_eq!(size, Vec2::new(1024.0, 768.0));
        }
    }

    #[test]
    fn test_removing_active_clears_active() {
        let mut manager = UIManager::new();
        let a = manager.add(Screen::new("A"));
        let b = manager.add(Screen::new("B"));

        let removed = manager.remove(a).unwrap();
        assert!(!removed.is_visible());
        assert!(manager.active_key().is_none());
        assert_eq!(manager.reload_active(), Err(UiError::NoActiveInterface));

        let mut renderer = CommandRenderer::new();
        manager.render(&mut renderer);
        assert!(renderer.texts().is_empty());

        manager.show(b).unwrap();
        assert!(manager.is_active(b));
    }

    #[test]
    fn test_click_applies_show_request() {
        let mut manager = UIManager::new();
        manager.on_resize(Vec2::new(800.0, 600.0));
        let screen = manager.add(Screen::new("A"));
        manager.add(Options::default());
        manager.show_type::<Options>().unwrap();

        let center = Vec2::new(400.0, 300.0);
        for event in [
            MouseEvent::moved(center),
            MouseEvent::pressed(MouseButton::Left, center),
            MouseEvent::released(MouseButton::Left, center),
        ] {
            let leftover = manager.handle_event(&WindowEvent::Mouse(event));
            assert!(leftover.is_empty());
        }

        assert!(manager.is_active(screen));
    }

    #[test]
    fn test_unhandled_requests_are_returned() {
        let mut manager = UIManager::new();
        let a = manager.add(Screen::new("A"));
        let leftover = manager.apply_requests(vec![
            UiRequest::CloseWindow,
            UiRequest::Reload,
            UiRequest::Custom("save".to_owned()),
        ]);

        assert_eq!(leftover, vec![UiRequest::CloseWindow, UiRequest::Custom("save".to_owned())]);
        assert_eq!(manager.get(a).unwrap().core().builds(), 2);
    }

    #[test]
    fn test_two_interfaces_follow_window_resize() {
        let mut window = Window::headless(WindowConfig::new("Test", 640, 480), CommandRenderer::new());
        window.build().unwrap();

        let manager = Rc::new(RefCell::new(UIManager::new()));
        let (a, b, c) = {
            let mut ui = manager.borrow_mut();
            (ui.add(Screen::new("A")), ui.add(Screen::new("B")), ui.add(Screen::new("C")))
        };
        UIManager::attach(&manager, &mut window);
        manager.borrow_mut().show(b).unwrap();

        let before: Vec<usize> = {
            let ui = manager.borrow();
            [a, b, c].iter().map(|key| resizes_of(&ui, *key).len()).collect()
        };
        window.on_resize(Vec2::new(800.0, 600.0));

        let ui = manager.borrow();
        assert!(!visible(&ui, a));
        assert!(visible(&ui, b));
        assert!(!visible(&ui, c));
        for (key, count) in [a, b, c].into_iter().zip(before) {
            let resizes = resizes_of(&ui, key);
            assert_eq!(resizes.len(), count + 1);
            assert_eq!(resizes.last(), Some(&Vec2::new(800.0, 600.0)));
        }
    }

    #[test]
    fn test_relay_reports_dropped_or_busy_manager() {
        let mut window = Window::headless(WindowConfig::new("Test", 640, 480), CommandRenderer::new());
        window.build().unwrap();

        let manager = Rc::new(RefCell::new(UIManager::new()));
        UIManager::attach(&manager, &mut window);

        {
            let _busy = manager.borrow_mut();
            window.on_resize(Vec2::new(100.0, 100.0));
        }
        assert_eq!(manager.borrow().surface_size(), Vec2::new(640.0, 480.0));

        drop(manager);
        window.on_resize(Vec2::new(200.0, 200.0));
        assert_eq!(window.size(), Vec2::new(200.0, 200.0));
    }

}
