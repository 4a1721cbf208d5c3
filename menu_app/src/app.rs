//! Menu application state and the scripted headless driver

use pane_engine::config::{Config, ConfigError};
use pane_engine::foundation::math::Vec2;
use pane_engine::render::{CommandRenderer, Renderer};
use pane_engine::ui::{ButtonTheme, InterfaceOps, UIManager, UiRequest};
use pane_engine::window::HeadlessBackend;
use pane_engine::{AppError, Application, Engine, EngineConfig, EngineError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::screens::{MainMenu, OptionsMenu};

/// Frame time used when stepping the scripted run
const SCRIPT_FRAME_TIME: f32 = 1.0 / 60.0;

/// Errors surfaced by the menu binary
#[derive(Error, Debug)]
pub enum MenuError {
    /// Engine failure
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Configuration file could not be read
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Settings file of the menu app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Window and loop settings
    pub engine: EngineConfig,
    /// Button colours and label style
    pub theme: ButtonTheme,
    /// Button labels clicked in order by the headless run
    pub script: Vec<String>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        let mut engine = EngineConfig::default();
        engine.window.title = "Menu".to_owned();
        Self {
            engine,
            theme: ButtonTheme::default(),
            script: ["Options", "Sound: on", "Back", "Play", "Quit"].map(String::from).to_vec(),
        }
    }
}

impl Config for MenuConfig {}

/// Two-screen menu
pub struct MenuApp {
    theme: ButtonTheme,
    plays: u32,
    sound_toggle_pending: bool,
}

impl MenuApp {
    /// Menu drawing its buttons with `theme`
    pub fn new(theme: ButtonTheme) -> Self {
        Self { theme, plays: 0, sound_toggle_pending: false }
    }

    /// How many times "Play" was pressed
    pub fn plays(&self) -> u32 {
        self.plays
    }
}

impl Application for MenuApp {
    fn build(&mut self, ui: &mut UIManager) -> Result<(), AppError> {
        ui.add(MainMenu::new(self.theme.clone()));
        ui.add(OptionsMenu::new(self.theme.clone()));
        Ok(())
    }

    fn update(&mut self, ui: &mut UIManager, _delta_time: f32) -> Result<(), AppError> {
        if std::mem::take(&mut self.sound_toggle_pending) {
            if let Some(options) = ui.get_by_type_mut::<OptionsMenu>() {
                options.toggle_sound();
                options.reload();
                log::info!("{}", options.sound_label());
            }
        }
        Ok(())
    }

    fn handle_request(&mut self, request: &UiRequest) -> bool {
        match request {
            UiRequest::Custom(name) if name == "play" => {
                self.plays += 1;
                log::info!("Play pressed ({} so far)", self.plays);
                true
            }
            UiRequest::Custom(name) if name == "toggle-sound" => {
                self.sound_toggle_pending = true;
                true
            }
            UiRequest::CloseWindow => false,
            other => {
                log::warn!("Unexpected request {:?}", other);
                true
            }
        }
    }

    fn cleanup(&mut self) {
        log::info!("Menu closed after {} play(s)", self.plays);
    }
}

/// Queue a click on the centre of the active screen's component labelled
/// `label`; `false` if no such component is on screen
pub fn click_label<R: Renderer>(engine: &mut Engine<R>, label: &str) -> bool {
    let target = match engine.ui().try_borrow() {
        Ok(ui) => ui.active().and_then(|screen| {
            screen
                .core()
                .components()
                .iter()
                .find(|(_, component)| component.text_content() == Some(label))
                .map(|(_, component)| component.bounds(Vec2::zeros()))
        }),
        Err(_) => None,
    };

    match (target, engine.window_mut().backend_mut::<HeadlessBackend>()) {
        (Some(bounds), Some(backend)) => {
            backend.click(bounds.origin + bounds.size / 2.0);
            true
        }
        _ => false,
    }
}

/// Drive the menu offscreen by clicking through `script`
///
/// Stops early once a click closes the window.
#[cfg_attr(feature = "glfw", allow(dead_code))]
pub fn run_scripted(config: EngineConfig, app: &mut MenuApp, script: &[String]) -> Result<u64, MenuError> {
    let mut engine = Engine::headless(config, CommandRenderer::new());
    engine.build(app)?;
    engine.step(app, SCRIPT_FRAME_TIME)?;

    for label in script {
        if !click_label(&mut engine, label) {
            log::warn!("No '{}' button on the current screen", label);
            continue;
        }
        log::debug!("Clicked '{}'", label);
        if !engine.step(app, SCRIPT_FRAME_TIME)? {
            break;
        }
        // Deferred app work (setting toggles) lands on the following frame
        engine.step(app, SCRIPT_FRAME_TIME)?;
    }

    app.cleanup();
    Ok(engine.frames())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pane_engine::window::WindowConfig;
    use pane_engine::ui::UserInterface;

    fn config() -> EngineConfig {
        EngineConfig {
            window: WindowConfig::new("Menu", 800, 600),
            max_frames: None,
            target_fps: 0,
        }
    }

    fn script(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|label| (*label).to_owned()).collect()
    }

    #[test]
    fn test_options_and_back_switch_screens() {
        let mut app = MenuApp::new(ButtonTheme::default());
        let mut engine = Engine::headless(config(), CommandRenderer::new());
        engine.build(&mut app).unwrap();

        assert!(click_label(&mut engine, "Options"));
        engine.step(&mut app, SCRIPT_FRAME_TIME).unwrap();
        {
            let ui = engine.ui().borrow();
            assert_eq!(ui.active_key(), ui.key_of_type::<OptionsMenu>());
        }

        assert!(!click_label(&mut engine, "Play"));
        assert!(click_label(&mut engine, "Back"));
        engine.step(&mut app, SCRIPT_FRAME_TIME).unwrap();
        let ui = engine.ui().borrow();
        assert_eq!(ui.active_key(), ui.key_of_type::<MainMenu>());
    }

    #[test]
    fn test_sound_toggle_rebuilds_label() {
        let mut app = MenuApp::new(ButtonTheme::default());
        let mut engine = Engine::headless(config(), CommandRenderer::new());
        engine.build(&mut app).unwrap();
        engine.ui().borrow_mut().show_type::<OptionsMenu>().unwrap();

        assert!(click_label(&mut engine, "Sound: on"));
        engine.step(&mut app, SCRIPT_FRAME_TIME).unwrap();
        engine.step(&mut app, SCRIPT_FRAME_TIME).unwrap();

        let ui = engine.ui().borrow();
        let options = ui.get_by_type::<OptionsMenu>().unwrap();
        assert!(!options.sound());
        assert_eq!(options.core().builds(), 2);
        drop(ui);
        assert!(click_label(&mut engine, "Sound: off"));
    }

    #[test]
    fn test_script_plays_then_quits() {
        let mut app = MenuApp::new(ButtonTheme::default());
        let frames = run_scripted(config(), &mut app, &script(&["Play", "Play", "Quit", "Play"])).unwrap();

        assert_eq!(app.plays(), 2);
        // Initial frame, two plays with a follow-up frame each, then the quit frame
        assert_eq!(frames, 6);
    }

    #[test]
    fn test_unknown_label_is_skipped() {
        let mut app = MenuApp::new(ButtonTheme::default());
        let frames = run_scripted(config(), &mut app, &script(&["Nope"])).unwrap();
        assert_eq!(frames, 1);
        assert_eq!(app.plays(), 0);
    }

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let parsed: MenuConfig = ron::from_str("(script: [\"Quit\"])").unwrap();
        assert_eq!(parsed.script, vec!["Quit".to_owned()]);
        assert_eq!(parsed.theme, ButtonTheme::default());
    }
}
