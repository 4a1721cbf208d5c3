//! Menu demo
//!
//! Two screens, a main menu and an options page, switched through the UI
//! manager. Without the `glfw` feature the menu runs offscreen and clicks
//! through the button labels listed in the config's `script`.
//!
//! Usage: `menu_app [config.toml|config.ron]`

mod app;
mod screens;

use pane_engine::config::Config;
use pane_engine::foundation::logging;

use app::{MenuApp, MenuConfig, MenuError};

const DEFAULT_CONFIG_PATH: &str = "menu_app.toml";

fn main() -> Result<(), MenuError> {
    logging::init();

    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_owned());
    let config = MenuConfig::load_or_default(&path)?;
    log::info!("Starting menu ({})", path);

    let mut menu = MenuApp::new(config.theme.clone());
    run(config, &mut menu)?;

    log::info!("Menu exited, play pressed {} time(s)", menu.plays());
    Ok(())
}

#[cfg(feature = "glfw")]
fn run(config: MenuConfig, menu: &mut MenuApp) -> Result<(), MenuError> {
    use pane_engine::render::CommandRenderer;
    use pane_engine::window::GlfwBackend;
    use pane_engine::Engine;

    let mut engine = Engine::new(config.engine, Box::new(GlfwBackend::new()), CommandRenderer::new());
    engine.run(menu)?;
    Ok(())
}

#[cfg(not(feature = "glfw"))]
fn run(config: MenuConfig, menu: &mut MenuApp) -> Result<(), MenuError> {
    let frames = app::run_scripted(config.engine, menu, &config.script)?;
    log::info!("Scripted run rendered {} frame(s)", frames);
    Ok(())
}
