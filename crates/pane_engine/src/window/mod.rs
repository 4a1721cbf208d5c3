//! Window management subsystem
//!
//! [`Window`] decouples *when* a frame is painted from *what* renderer paints
//! it. It owns one native surface (through a [`WindowBackend`]) and exactly one
//! renderer instance, turns native resize callbacks into framework resize
//! notifications, and hands the renderer to a consumer once per frame.
//!
//! ```text
//!        Application / Engine
//!               │
//!        ┌──────▼──────┐  resize listeners (UIManager relay, ...)
//!        │  Window<R>  │──────────────────────────────▶
//!        └──┬───────┬──┘
//!   backend │       │ renderer (reused every frame)
//!   ┌───────▼──┐ ┌──▼────────┐
//!   │ Headless │ │ R: Renderer│
//!   │ Glfw     │ └───────────┘
//!   └──────────┘
//! ```

pub mod backend;
pub mod headless;
pub mod listeners;
#[cfg(feature = "glfw")]
pub mod glfw_backend;

pub use backend::WindowBackend;
pub use headless::HeadlessBackend;
pub use listeners::{ListenerError, ResizeListener, ResizeListenerRegistry};
#[cfg(feature = "glfw")]
pub use glfw_backend::GlfwBackend;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::events::WindowEvent;
use crate::foundation::collections::ListenerId;
use crate::foundation::math::Vec2;
use crate::render::{FrameContext, Renderer};

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// An operation that needs a realized surface ran before `build`
    #[error("Window has not been built")]
    NotBuilt,

    /// `build` was called a second time
    #[error("Window has already been built")]
    AlreadyBuilt,

    /// Native windowing failure
    #[error("Window backend error: {0}")]
    Backend(String),

    /// Icon could not be loaded
    #[error("Icon error: {0}")]
    Icon(#[from] image::ImageError),
}

/// Initial window settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Title bar text
    pub title: String,
    /// Initial width in pixels
    pub width: u32,
    /// Initial height in pixels
    pub height: u32,
    /// Whether the user may resize the window
    pub resizable: bool,
    /// Maximize right after building
    pub maximized: bool,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// PNG file used as the window icon
    pub icon: Option<PathBuf>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Pane Engine".to_string(),
            width: 800,
            height: 600,
            resizable: true,
            maximized: false,
            fullscreen: false,
            icon: None,
        }
    }
}

impl Config for WindowConfig {}

impl WindowConfig {
    /// Configuration with a title and size
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            ..Self::default()
        }
    }

    /// Initial size as a vector
    #[allow(clippy::cast_precision_loss)]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// Decoded RGBA icon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconImage {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Row-major RGBA bytes, 4 per pixel
    pub rgba: Vec<u8>,
}

impl IconImage {
    /// Load and decode an image file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WindowError> {
        let image = image::open(path)?.to_rgba8();
        let (width, height) = image.dimensions();
        Ok(Self {
            width,
            height,
            rgba: image.into_raw(),
        })
    }
}

/// Application window parameterized over its renderer
pub struct Window<R: Renderer> {
    config: WindowConfig,
    backend: Box<dyn WindowBackend>,
    renderer: R,
    size: Vec2,
    built: bool,
    resize_listeners: ResizeListenerRegistry,
    frames_rendered: u64,
}

impl<R: Renderer> Window<R> {
    /// Create an unbuilt window
    ///
    /// No native resources exist until [`build`](Self::build) runs.
    pub fn new(config: WindowConfig, backend: Box<dyn WindowBackend>, renderer: R) -> Self {
        let size = config.size();
        Self {
            config,
            backend,
            renderer,
            size,
            built: false,
            resize_listeners: ResizeListenerRegistry::new(),
            frames_rendered: 0,
        }
    }

    /// Create an unbuilt window on an offscreen backend
    pub fn headless(config: WindowConfig, renderer: R) -> Self {
        Self::new(config, Box::new(HeadlessBackend::new()), renderer)
    }

    /// Realize the native surface
    ///
    /// Must run exactly once, before [`run`](Self::run) and
    /// [`render`](Self::render). From here on native resize events reach
    /// [`on_resize`](Self::on_resize) through [`poll_events`](Self::poll_events).
    /// Resize listeners are not notified by this call.
    pub fn build(&mut self) -> Result<(), WindowError> {
        if self.built {
            return Err(WindowError::AlreadyBuilt);
        }

        self.size = self.backend.realize(&self.config)?;
        self.built = true;
        log::info!(
            "Built window '{}' ({}x{})",
            self.config.title,
            self.size.x,
            self.size.y
        );

        if let Some(icon) = self.config.icon.clone() {
            if let Err(err) = self.set_icon(&icon) {
                log::warn!("Could not set window icon {}: {}", icon.display(), err);
            }
        }
        if self.config.fullscreen {
            self.backend.set_fullscreen(true);
        } else if self.config.maximized {
            self.backend.maximize();
        }
        Ok(())
    }

    /// Whether [`build`](Self::build) has completed
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Make the window visible; does nothing if it already is
    pub fn run(&mut self) -> Result<(), WindowError> {
        self.ensure_built()?;
        if self.backend.is_visible() {
            log::debug!("Window already visible");
            return Ok(());
        }
        self.backend.set_visible(true);
        Ok(())
    }

    /// Execute one paint pass
    ///
    /// The renderer is rebound to the current frame context and handed to
    /// `consumer`, which issues every draw call of the frame. Taking `&mut self`
    /// rules out a second pass starting before the consumer returns.
    pub fn render<F>(&mut self, consumer: F) -> Result<(), WindowError>
    where
        F: FnOnce(&mut R),
    {
        self.ensure_built()?;

        let frame = FrameContext {
            index: self.frames_rendered,
            surface_size: self.size,
        };
        self.renderer.begin_frame(frame);
        consumer(&mut self.renderer);
        self.renderer.end_frame();
        self.backend.present();

        self.frames_rendered += 1;
        Ok(())
    }

    /// Drain backend events
    ///
    /// Resize events update the window size and notify the resize listeners
    /// before this returns. Every event, resizes included, is returned in the
    /// order it arrived.
    pub fn poll_events(&mut self) -> Result<Vec<WindowEvent>, WindowError> {
        self.ensure_built()?;

        let events = self.backend.poll_events();
        for event in &events {
            match event {
                WindowEvent::Resized(size) => self.on_resize(*size),
                WindowEvent::CloseRequested => self.backend.set_should_close(true),
                WindowEvent::Mouse(_) | WindowEvent::Key(_) => {}
            }
        }
        Ok(events)
    }

    /// Record a new surface size and notify every resize listener
    ///
    /// Listeners run synchronously in registration order; a failing listener
    /// is logged and the rest still run. Ignored until the window is built.
    pub fn on_resize(&mut self, size: Vec2) {
        if !self.built {
            log::warn!("Ignoring resize to {}x{} before the window is built", size.x, size.y);
            return;
        }
        log::debug!("Window resized to {}x{}", size.x, size.y);
        self.size = size;
        let failures = self.resize_listeners.notify(size);
        if failures > 0 {
            log::warn!("{} resize listener(s) failed", failures);
        }
    }

    /// Register a resize listener
    pub fn add_resize_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(Vec2) -> Result<(), ListenerError> + 'static,
    {
        self.resize_listeners.add(Box::new(listener))
    }

    /// Unregister a resize listener; `false` if it was not registered
    pub fn remove_resize_listener(&mut self, id: ListenerId) -> bool {
        self.resize_listeners.remove(id)
    }

    /// Number of registered resize listeners
    pub fn resize_listener_count(&self) -> usize {
        self.resize_listeners.len()
    }

    /// Maximize the window
    pub fn maximize(&mut self) -> Result<(), WindowError> {
        self.ensure_built()?;
        self.backend.maximize();
        Ok(())
    }

    /// Switch to fullscreen mode
    pub fn fullscreen(&mut self) -> Result<(), WindowError> {
        self.ensure_built()?;
        self.backend.set_fullscreen(true);
        Ok(())
    }

    /// Leave fullscreen mode
    pub fn windowed(&mut self) -> Result<(), WindowError> {
        self.ensure_built()?;
        self.backend.set_fullscreen(false);
        Ok(())
    }

    /// Change the title; applied now if built, otherwise at build time
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.config.title = title.into();
        if self.built {
            self.backend.set_title(&self.config.title);
        }
    }

    /// Current title
    pub fn title(&self) -> &str {
        &self.config.title
    }

    /// Load a PNG and use it as the window icon
    pub fn set_icon(&mut self, path: impl AsRef<Path>) -> Result<(), WindowError> {
        let icon = IconImage::load(path)?;
        self.set_icon_image(&icon)
    }

    /// Use an already decoded image as the window icon
    pub fn set_icon_image(&mut self, icon: &IconImage) -> Result<(), WindowError> {
        self.ensure_built()?;
        self.backend.set_icon(icon)
    }

    /// Current drawable size
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Whether a close was requested
    pub fn should_close(&self) -> bool {
        self.backend.should_close()
    }

    /// Ask the window to close at the end of the current frame
    pub fn request_close(&mut self) {
        self.backend.set_should_close(true);
    }

    /// Number of completed paint passes
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// The window's renderer
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Concrete backend, if it is of type `B`
    pub fn backend<B: WindowBackend + 'static>(&self) -> Option<&B> {
        self.backend.as_any().downcast_ref::<B>()
    }

    /// Concrete backend for mutation, if it is of type `B`
    pub fn backend_mut<B: WindowBackend + 'static>(&mut self) -> Option<&mut B> {
        self.backend.as_any_mut().downcast_mut::<B>()
    }

    fn ensure_built(&self) -> Result<(), WindowError> {
        if self.built {
            Ok(())
        } else {
            Err(WindowError::NotBuilt)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::colors;
    use crate::render::{CommandRenderer, Shape, ShapeStyle};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn window() -> Window<CommandRenderer> {
        Window::headless(WindowConfig::new("Test", 800, 600), CommandRenderer::new())
    }

    fn size_log(window: &mut Window<CommandRenderer>) -> (ListenerId, Rc<RefCell<Vec<Vec2>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let id = window.add_resize_listener(move |size| {
            sink.borrow_mut().push(size);
            Ok(())
        });
        (id, log)
    }

    #[test]
    fn test_render_before_build_fails() {
        let mut window = window();
        let result = window.render(|_| {});
        assert!(matches!(result, Err(WindowError::NotBuilt)));
        assert!(matches!(window.run(), Err(WindowError::NotBuilt)));
    }

    #[test]
    fn test_build_twice_fails() {
        let mut window = window();
        window.build().unwrap();
        assert!(matches!(window.build(), Err(WindowError::AlreadyBuilt)));
    }

    #[test]
    fn test_build_does_not_notify_listeners() {
        let mut window = window();
        let (_, log) = size_log(&mut window);
        window.build().unwrap();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_native_resize_reaches_listeners() {
        let mut window = window();
        let (_, log) = size_log(&mut window);
        window.build().unwrap();

        let size = Vec2::new(1024.0, 768.0);
        window.backend_mut::<HeadlessBackend>().unwrap().resize(size);
        let events = window.poll_events().unwrap();

        assert_eq!(events, vec![WindowEvent::Resized(size)]);
        assert_eq!(*log.borrow(), vec![size]);
        assert_eq!(window.size(), size);
    }

    #[test]
    fn test_resize_before_build_is_ignored() {
        let mut window = window();
        let (_, log) = size_log(&mut window);

        window.on_resize(Vec2::new(320.0, 200.0));

        assert!(log.borrow().is_empty());
        assert_eq!(window.size(), Vec2::new(800.0, 600.0));
    }

    #[test]
    fn test_add_then_remove_listener_gets_nothing() {
        let mut window = window();
        let (id, log) = size_log(&mut window);
        assert!(window.remove_resize_listener(id));
        window.build().unwrap();

        window.on_resize(Vec2::new(320.0, 200.0));

        assert!(log.borrow().is_empty());
        assert!(!window.remove_resize_listener(id));
    }

    #[test]
    fn test_renderer_is_reused_and_rebound() {
        let mut window = window();
        window.build().unwrap();

        window
            .render(|renderer| {
                renderer.draw_shape(
                    &Shape::Rect { size: Vec2::new(5.0, 5.0) },
                    Vec2::zeros(),
                    &ShapeStyle::filled(colors::white()),
                );
            })
            .unwrap();
        window.render(|_| {}).unwrap();

        let renderer = window.renderer();
        assert_eq!(renderer.frames_completed(), 2);
        assert_eq!(renderer.frame().map(|f| f.index), Some(1));
        assert!(renderer.commands().is_empty());
        assert_eq!(window.backend::<HeadlessBackend>().unwrap().presented_frames(), 2);
    }

    #[test]
    fn test_run_is_idempotent() {
        let mut window = window();
        window.build().unwrap();
        window.run().unwrap();
        window.run().unwrap();
        assert!(window.backend::<HeadlessBackend>().unwrap().is_visible());
    }

    #[test]
    fn test_chrome_operations_forward_to_backend() {
        let mut window = window();
        assert!(window.maximize().is_err());
        window.set_title("Before");
        window.build().unwrap();

        window.set_title("After");
        window.maximize().unwrap();
        window
            .set_icon_image(&IconImage { width: 2, height: 2, rgba: vec![0; 16] })
            .unwrap();

        let backend = window.backend::<HeadlessBackend>().unwrap();
        assert_eq!(backend.title(), "After");
        assert!(backend.is_maximized());
        assert_eq!(backend.icon_size(), Some((2, 2)));
    }

    #[test]
    fn test_close_request_sets_should_close() {
        let mut window = window();
        window.build().unwrap();
        window
            .backend_mut::<HeadlessBackend>()
            .unwrap()
            .push_event(WindowEvent::CloseRequested);

        window.poll_events().unwrap();

        assert!(window.should_close());
    }
}
