//! # Pane Engine
//!
//! A small windowed UI engine: a renderer-agnostic window, screens of
//! composable components, and a manager that keeps one screen active.
//!
//! ## Features
//!
//! - **Renderer-agnostic window**: `Window<R>` owns one renderer and hands it
//!   to a consumer once per frame
//! - **Resize notifications**: ordered listeners that survive each other's failures
//! - **Screens**: interfaces rebuild their component tree on demand
//! - **Single active screen**: render, update and input reach the active one only
//! - **Headless mode**: every layer runs without a display for tests and tools
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pane_engine::prelude::*;
//!
//! struct Menu {
//!     core: InterfaceCore,
//! }
//!
//! impl UserInterface for Menu {
//!     fn core(&self) -> &InterfaceCore {
//!         &self.core
//!     }
//!
//!     fn core_mut(&mut self) -> &mut InterfaceCore {
//!         &mut self.core
//!     }
//!
//!     fn build(&mut self, ui: &mut InterfaceBuilder) {
//!         ui.add(Component::button("Quit", |ctx| ctx.close_window()).with_anchor(Anchor::Center));
//!     }
//! }
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn build(&mut self, ui: &mut UIManager) -> Result<(), AppError> {
//!         ui.add(Menu { core: InterfaceCore::new() });
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut engine = Engine::headless(EngineConfig::default(), CommandRenderer::new());
//!     engine.run(&mut MyApp)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod events;
pub mod foundation;
pub mod render;
pub mod storage;
pub mod ui;
pub mod window;

mod application;
mod engine;

pub use application::{AppError, Application};
pub use engine::{Engine, EngineConfig, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        events::{Key, KeyAction, KeyEvent, MouseAction, MouseButton, MouseEvent, WindowEvent},
        foundation::{
            math::{colors, Color, Rect, Vec2},
            time::Timer,
        },
        render::{CommandRenderer, FrameContext, RenderCommand, Renderer, Shape, ShapeStyle, TextStyle},
        storage::{ObjectStorage, PropagateAll, PropagationPolicy, Storable},
        ui::{
            Anchor, ButtonTheme, Component, Graphic, InterfaceBuilder, InterfaceCore, InterfaceKey, InterfaceOps,
            UIManager, UiContext, UiError, UiRequest, UserInterface,
        },
        window::{HeadlessBackend, ListenerError, Window, WindowBackend, WindowConfig, WindowError},
        AppError, Application, Engine, EngineConfig, EngineError,
    };
}
