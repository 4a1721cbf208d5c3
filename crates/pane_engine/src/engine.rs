//! Core engine implementation
//!
//! The engine owns the window and a shared [`UIManager`], wires the manager
//! to the window's resize notifications and drives the frame loop.

use std::cell::{RefCell, RefMut};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::{AppError, Application};
use crate::config::{Config, ConfigError};
use crate::foundation::collections::ListenerId;
use crate::foundation::time::Timer;
use crate::render::Renderer;
use crate::ui::UIManager;
use crate::window::{HeadlessBackend, Window, WindowBackend, WindowConfig, WindowError};

/// Main engine struct
///
/// The engine coordinates the window, the UI and the application, and
/// manages the main loop.
pub struct Engine<R: Renderer> {
    window: Window<R>,
    ui: Rc<RefCell<UIManager>>,
    config: EngineConfig,
    timer: Timer,
    frames: u64,
    resize_listener: Option<ListenerId>,
}

impl<R: Renderer> Engine<R> {
    /// Create an engine around an unbuilt window
    pub fn new(config: EngineConfig, backend: Box<dyn WindowBackend>, renderer: R) -> Self {
        let window = Window::new(config.window.clone(), backend, renderer);
        Self {
            window,
            ui: Rc::new(RefCell::new(UIManager::new())),
            config,
            timer: Timer::new(),
            frames: 0,
            resize_listener: None,
        }
    }

    /// Create an engine drawing to an offscreen surface
    pub fn headless(config: EngineConfig, renderer: R) -> Self {
        Self::new(config, Box::new(HeadlessBackend::new()), renderer)
    }

    /// Build the window, let the application register its interfaces and
    /// show the window
    pub fn build<A: Application>(&mut self, app: &mut A) -> Result<(), EngineError> {
        log::info!("Initializing engine...");
        self.window.build()?;

        {
            let mut ui = self.borrow_ui()?;
            ui.on_resize(self.window.size());
            app.build(&mut ui)?;
            if ui.is_empty() {
                log::warn!("Application registered no interfaces");
            }
        }

        self.resize_listener = Some(UIManager::attach(&self.ui, &mut self.window));
        self.window.run()?;
        Ok(())
    }

    /// Run one frame: pump events, route input, update and render
    ///
    /// Returns `false` once the window should close.
    pub fn step<A: Application>(&mut self, app: &mut A, delta_time: f32) -> Result<bool, EngineError> {
        let events = self.window.poll_events()?;

        let requests = {
            let mut ui = self.borrow_ui()?;
            let mut requests = Vec::new();
            for event in &events {
                requests.extend(ui.handle_event(event));
            }
            app.update(&mut ui, delta_time)?;
            ui.update(delta_time);
            requests
        };

        for request in requests {
            if !app.handle_request(&request) {
                log::info!("Close requested by {:?}", request);
                self.window.request_close();
            }
        }

        let ui = &self.ui;
        self.window.render(|renderer| match ui.try_borrow_mut() {
            Ok(mut ui) => ui.render(renderer),
            Err(_) => log::warn!("UI manager busy, skipping UI pass"),
        })?;
        self.frames += 1;

        Ok(!self.window.should_close())
    }

    /// Run the main loop until the window closes or the frame limit is hit
    ///
    /// Builds the engine first if [`build`](Self::build) was not called.
    pub fn run<A: Application>(&mut self, app: &mut A) -> Result<(), EngineError> {
        if !self.window.is_built() {
            self.build(app)?;
        }

        log::info!("Starting main loop...");
        self.timer = Timer::new();
        loop {
            self.timer.update();
            let keep_running = self.step(app, self.timer.delta_time())?;
            if !keep_running {
                break;
            }
            if self.config.max_frames.is_some_and(|max| self.frames >= max) {
                log::info!("Reached frame limit of {}", self.frames);
                break;
            }
            if let Some(wait) = self.timer.remaining_frame_budget(self.config.target_fps) {
                std::thread::sleep(wait);
            }
        }

        app.cleanup();
        if let Some(id) = self.resize_listener.take() {
            self.window.remove_resize_listener(id);
        }
        log::info!("Engine shutdown complete");
        Ok(())
    }

    /// The window
    pub fn window(&self) -> &Window<R> {
        &self.window
    }

    /// The window, mutably
    pub fn window_mut(&mut self) -> &mut Window<R> {
        &mut self.window
    }

    /// Shared handle to the UI manager
    pub fn ui(&self) -> &Rc<RefCell<UIManager>> {
        &self.ui
    }

    /// Frames rendered by [`step`](Self::step)
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn borrow_ui(&self) -> Result<RefMut<'_, UIManager>, EngineError> {
        self.ui.try_borrow_mut().map_err(|_| EngineError::UiBusy)
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window configuration
    pub window: WindowConfig,

    /// Stop after this many frames; run until closed if unset
    pub max_frames: Option<u64>,

    /// Frame rate cap; 0 disables it
    pub target_fps: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            max_frames: None,
            target_fps: 60,
        }
    }
}

impl Config for EngineConfig {}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Window error
    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    /// Application error
    #[error("Application error: {0}")]
    Application(#[from] AppError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The UI manager was borrowed outside the engine during a frame
    #[error("UI manager is borrowed elsewhere")]
    UiBusy,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;
    use crate::render::CommandRenderer;
    use crate::ui::{
        Anchor, Component, InterfaceBuilder, InterfaceCore, InterfaceOps, UiRequest, UserInterface,
    };

    fn center() -> Vec2 {
        Vec2::new(400.0, 300.0)
    }

    /// Screen with one centred button that runs `on_click`
    struct Screen {
        core: InterfaceCore,
        title: &'static str,
        on_click: fn(&mut crate::ui::UiContext),
    }

    impl Screen {
        fn new(title: &'static str, on_click: fn(&mut crate::ui::UiContext)) -> Self {
            Self { core: InterfaceCore::new(), title, on_click }
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
            ui.add(Component::text(self.title));
            ui.add(
                Component::button("Go", self.on_click)
                    .with_anchor(Anchor::Center)
                    .with_size(Vec2::new(100.0, 40.0)),
            );
        }
    }

    #[derive(Default)]
    struct TestApp {
        built: bool,
        updates: u32,
        cleaned_up: bool,
        custom: Vec<String>,
    }

    impl Application for TestApp {
        fn build(&mut self, ui: &mut UIManager) -> Result<(), AppError> {
            self.built = true;
            ui.add(Screen::new("First", |ctx| ctx.custom("to-second")));
            ui.add(SecondScreen(Screen::new("Second", |ctx| ctx.close_window())));
            Ok(())
        }

        fn update(&mut self, ui: &mut UIManager, _delta_time: f32) -> Result<(), AppError> {
            self.updates += 1;
            if self.custom.last().map(String::as_str) == Some("to-second") {
                ui.show_type::<SecondScreen>()?;
                self.custom.clear();
            }
            Ok(())
        }

        fn handle_request(&mut self, request: &UiRequest) -> bool {
            match request {
                UiRequest::Custom(name) => {
                    self.custom.push(name.clone());
                    true
                }
                UiRequest::CloseWindow => false,
                _ => true,
            }
        }

        fn cleanup(&mut self) {
            self.cleaned_up = true;
        }
    }

    /// Distinct type for the second screen so it can be found by type
    struct SecondScreen(Screen);

    impl UserInterface for SecondScreen {
        fn core(&self) -> &InterfaceCore {
            self.0.core()
        }

        fn core_mut(&mut self) -> &mut InterfaceCore {
            self.0.core_mut()
        }

        fn build(&mut self, ui: &mut InterfaceBuilder) {
            self.0.build(ui);
        }
    }

    fn engine(max_frames: Option<u64>) -> Engine<CommandRenderer> {
        let config = EngineConfig {
            window: WindowConfig::new("Test", 800, 600),
            max_frames,
            target_fps: 0,
        };
        Engine::headless(config, CommandRenderer::new())
    }

    fn click(engine: &mut Engine<CommandRenderer>, position: Vec2) {
        engine
            .window_mut()
            .backend_mut::<HeadlessBackend>()
            .unwrap()
            .click(position);
    }

    #[test]
    fn test_build_registers_and_shows() {
        let mut engine = engine(None);
        let mut app = TestApp::default();
        engine.build(&mut app).unwrap();

        assert!(app.built);
        assert!(engine.window().is_built());
        assert_eq!(engine.window().resize_listener_count(), 1);
        let ui = engine.ui().borrow();
        assert_eq!(ui.len(), 2);
        assert_eq!(ui.active().map(|i| i.core().size()), Some(Vec2::new(800.0, 600.0)));
        assert!(ui.active().unwrap().is_visible());
    }

    #[test]
    fn test_step_renders_active_interface() {
        let mut engine = engine(None);
        let mut app = TestApp::default();
        engine.build(&mut app).unwrap();

        assert!(engine.step(&mut app, 0.016).unwrap());

        assert_eq!(engine.window().renderer().texts(), vec!["First", "Go"]);
        assert_eq!(engine.frames(), 1);
        assert_eq!(app.updates, 1);
    }

    #[test]
    fn test_custom_request_reaches_application() {
        let mut engine = engine(None);
        let mut app = TestApp::default();
        engine.build(&mut app).unwrap();

        click(&mut engine, center());
        engine.step(&mut app, 0.016).unwrap();
        assert_eq!(app.custom, vec!["to-second".to_owned()]);

        engine.step(&mut app, 0.016).unwrap();
        let ui = engine.ui().borrow();
        assert_eq!(ui.active_key(), ui.key_of_type::<SecondScreen>());
    }

    #[test]
    fn test_close_button_stops_run() {
        let mut engine = engine(Some(100));
        let mut app = TestApp::default();
        engine.build(&mut app).unwrap();
        engine.ui().borrow_mut().show_type::<SecondScreen>().unwrap();

        click(&mut engine, center());
        engine.run(&mut app).unwrap();

        assert_eq!(engine.frames(), 1);
        assert!(app.cleaned_up);
        assert_eq!(engine.window().resize_listener_count(), 0);
    }

    #[test]
    fn test_run_stops_at_frame_limit() {
        let mut engine = engine(Some(3));
        let mut app = TestApp::default();
        engine.run(&mut app).unwrap();

        assert!(app.built);
        assert_eq!(engine.frames(), 3);
        assert_eq!(engine.window().renderer().frames_completed(), 3);
    }

    #[test]
    fn test_window_resize_reaches_hidden_interfaces() {
        let mut engine = engine(None);
        let mut app = TestApp::default();
        engine.build(&mut app).unwrap();

        engine
            .window_mut()
            .backend_mut::<HeadlessBackend>()
            .unwrap()
            .resize(Vec2::new(1024.0, 768.0));
        engine.step(&mut app, 0.016).unwrap();

        let ui = engine.ui().borrow();
        for key in ui.keys() {
            assert_eq!(ui.get(key).unwrap().core().size(), Vec2::new(1024.0, 768.0));
        }
    }

    #[test]
    fn test_busy_manager_is_reported() {
        let mut engine = engine(None);
        let mut app = TestApp::default();
        engine.build(&mut app).unwrap();

        let shared = Rc::clone(engine.ui());
        let _held = shared.borrow_mut();
        assert!(matches!(engine.step(&mut app, 0.016), Err(EngineError::UiBusy)));
    }

    #[test]
    fn test_config_roundtrips_through_ron() {
        let config = EngineConfig {
            max_frames: Some(10),
            ..EngineConfig::default()
        };
        let text = ron::to_string(&config).unwrap();
        let parsed: EngineConfig = ron::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
