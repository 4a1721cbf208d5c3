//! The two screens of the menu

use pane_engine::events::Key;
use pane_engine::foundation::math::Vec2;
use pane_engine::render::TextStyle;
use pane_engine::ui::{Anchor, ButtonTheme, Component, InterfaceBuilder, InterfaceCore, UiContext, UserInterface};

/// Vertical distance between stacked buttons
const BUTTON_SPACING: f32 = 60.0;

fn button_size() -> Vec2 {
    Vec2::new(160.0, 28.0)
}

/// Title line anchored to the top of the screen
fn title(text: &str) -> Component {
    Component::new()
        .with_text(text, TextStyle { font_size: 32.0, ..TextStyle::default() })
        .with_anchor(Anchor::TopCenter)
        .with_position(Vec2::new(0.0, 40.0))
}

/// Centred button, `row` rows below the first
#[allow(clippy::cast_precision_loss)]
fn menu_button(
    label: &str,
    row: usize,
    theme: &ButtonTheme,
    action: impl FnMut(&mut UiContext) + 'static,
) -> Component {
    Component::themed_button(label, theme, action)
        .with_size(button_size())
        .with_anchor(Anchor::Center)
        .with_position(Vec2::new(0.0, row as f32 * BUTTON_SPACING - BUTTON_SPACING))
}

/// Landing screen
pub struct MainMenu {
    core: InterfaceCore,
    theme: ButtonTheme,
}

impl MainMenu {
    /// Main menu drawn with `theme`
    pub fn new(theme: ButtonTheme) -> Self {
        Self { core: InterfaceCore::new(), theme }
    }
}

impl UserInterface for MainMenu {
    fn core(&self) -> &InterfaceCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut InterfaceCore {
        &mut self.core
    }

    fn build(&mut self, ui: &mut InterfaceBuilder) {
        ui.add(title("Main Menu"));
        ui.add(menu_button("Play", 0, &self.theme, |ctx| ctx.custom("play")).with_shortcut(Key::Enter));
        ui.add(menu_button("Options", 1, &self.theme, |ctx| ctx.show_type::<OptionsMenu>()));
        ui.add(menu_button("Quit", 2, &self.theme, UiContext::close_window).with_shortcut(Key::Escape));
    }

    fn name(&self) -> &str {
        "main menu"
    }
}

/// Settings screen
pub struct OptionsMenu {
    core: InterfaceCore,
    theme: ButtonTheme,
    sound: bool,
}

impl OptionsMenu {
    /// Options screen drawn with `theme`, sound on
    pub fn new(theme: ButtonTheme) -> Self {
        Self { core: InterfaceCore::new(), theme, sound: true }
    }

    /// Whether sound is enabled
    pub fn sound(&self) -> bool {
        self.sound
    }

    /// Flip the sound setting; the label changes on the next reload
    pub fn toggle_sound(&mut self) {
        self.sound = !self.sound;
    }

    /// Text of the sound toggle button
    pub fn sound_label(&self) -> String {
        format!("Sound: {}", if self.sound { "on" } else { "off" })
    }
}

impl UserInterface for OptionsMenu {
    fn core(&self) -> &InterfaceCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut InterfaceCore {
        &mut self.core
    }

    fn build(&mut self, ui: &mut InterfaceBuilder) {
        ui.add(title("Options"));
        ui.add(menu_button(&self.sound_label(), 0, &self.theme, |ctx| ctx.custom("toggle-sound")));
        ui.add(menu_button("Back", 1, &self.theme, |ctx| ctx.show_type::<MainMenu>()).with_shortcut(Key::Escape));
    }

    fn name(&self) -> &str {
        "options"
    }
}
