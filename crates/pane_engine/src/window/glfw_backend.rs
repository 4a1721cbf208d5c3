//! Window backend using GLFW
//!
//! Creates a GLFW window without a client API; the renderer presenting into it
//! owns its own graphics context. Native callbacks are translated into
//! framework [`WindowEvent`]s.

use glfw::{Action, ClientApiHint, WindowHint, WindowMode};

use super::{IconImage, WindowBackend, WindowConfig, WindowError};
use crate::events::{Key, KeyAction, KeyEvent, Modifiers, MouseButton, MouseEvent, WindowEvent};
use crate::foundation::math::Vec2;

/// Live GLFW objects, present once the backend is realized
struct GlfwSurface {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

/// GLFW window wrapper
#[derive(Default)]
pub struct GlfwBackend {
    surface: Option<GlfwSurface>,
    cursor: Vec2,
    visible: bool,
    fullscreen: bool,
    /// Position and size to restore when leaving fullscreen
    windowed_geometry: Option<(i32, i32, u32, u32)>,
}

impl GlfwBackend {
    /// Create an unrealized backend
    pub fn new() -> Self {
        Self::default()
    }

    fn translate(&mut self, event: glfw::WindowEvent) -> Option<WindowEvent> {
        match event {
            glfw::WindowEvent::FramebufferSize(width, height) => {
                Some(WindowEvent::Resized(Vec2::new(width as f32, height as f32)))
            }
            glfw::WindowEvent::Close => Some(WindowEvent::CloseRequested),
            glfw::WindowEvent::CursorPos(x, y) => {
                self.cursor = Vec2::new(x as f32, y as f32);
                Some(WindowEvent::Mouse(MouseEvent::moved(self.cursor)))
            }
            glfw::WindowEvent::MouseButton(button, action, _) => {
                let button = map_mouse_button(button)?;
                match action {
                    Action::Press => Some(WindowEvent::Mouse(MouseEvent::pressed(button, self.cursor))),
                    Action::Release => Some(WindowEvent::Mouse(MouseEvent::released(button, self.cursor))),
                    Action::Repeat => None,
                }
            }
            glfw::WindowEvent::Key(key, scancode, action, mods) => Some(WindowEvent::Key(KeyEvent {
                key: map_key(key, scancode),
                action: map_key_action(action),
                modifiers: map_modifiers(mods),
            })),
            _ => None,
        }
    }
}

impl WindowBackend for GlfwBackend {
    fn realize(&mut self, config: &WindowConfig) -> Result<Vec2, WindowError> {
        if self.surface.is_some() {
            return Err(WindowError::Backend("GLFW window already created".to_string()));
        }

        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|e| WindowError::Backend(format!("GLFW initialization failed: {e:?}")))?;

        glfw.window_hint(WindowHint::ClientApi(ClientApiHint::NoApi));
        glfw.window_hint(WindowHint::Resizable(config.resizable));
        glfw.window_hint(WindowHint::Visible(false));

        let (mut window, events) = glfw
            .create_window(config.width, config.height, &config.title, WindowMode::Windowed)
            .ok_or_else(|| WindowError::Backend("Window creation failed".to_string()))?;

        window.set_key_polling(true);
        window.set_close_polling(true);
        window.set_framebuffer_size_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_mouse_button_polling(true);

        let (width, height) = window.get_framebuffer_size();
        self.surface = Some(GlfwSurface { glfw, window, events });
        Ok(Vec2::new(width as f32, height as f32))
    }

    fn set_visible(&mut self, visible: bool) {
        if let Some(surface) = self.surface.as_mut() {
            if visible {
                surface.window.show();
            } else {
                surface.window.hide();
            }
            self.visible = visible;
        }
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn should_close(&self) -> bool {
        self.surface.as_ref().is_some_and(|s| s.window.should_close())
    }

    fn set_should_close(&mut self, should_close: bool) {
        if let Some(surface) = self.surface.as_mut() {
            surface.window.set_should_close(should_close);
        }
    }

    fn poll_events(&mut self) -> Vec<WindowEvent> {
        let Some(surface) = self.surface.as_mut() else {
            return Vec::new();
        };
        surface.glfw.poll_events();
        let native: Vec<glfw::WindowEvent> = glfw::flush_messages(&surface.events)
            .map(|(_, event)| event)
            .collect();

        native.into_iter().filter_map(|event| self.translate(event)).collect()
    }

    fn size(&self) -> Vec2 {
        self.surface.as_ref().map_or_else(Vec2::zeros, |s| {
            let (width, height) = s.window.get_framebuffer_size();
            Vec2::new(width as f32, height as f32)
        })
    }

    fn set_title(&mut self, title: &str) {
        if let Some(surface) = self.surface.as_mut() {
            surface.window.set_title(title);
        }
    }

    fn maximize(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.window.maximize();
        }
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        if self.fullscreen == fullscreen {
            return;
        }
        let Some(GlfwSurface { glfw, window, .. }) = self.surface.as_mut() else {
            return;
        };

        if fullscreen {
            let (x, y) = window.get_pos();
            let (width, height) = window.get_size();
            self.windowed_geometry = Some((x, y, width.max(1) as u32, height.max(1) as u32));

            let switched = glfw.with_primary_monitor(|_, monitor| {
                let Some(monitor) = monitor else {
                    return false;
                };
                let Some(mode) = monitor.get_video_mode() else {
                    return false;
                };
                window.set_monitor(
                    WindowMode::FullScreen(monitor),
                    0,
                    0,
                    mode.width,
                    mode.height,
                    Some(mode.refresh_rate),
                );
                true
            });
            if !switched {
                log::warn!("No primary monitor available for fullscreen");
                return;
            }
        } else {
            let (x, y, width, height) = self.windowed_geometry.take().unwrap_or((100, 100, 800, 600));
            window.set_monitor(WindowMode::Windowed, x, y, width, height, None);
        }
        self.fullscreen = fullscreen;
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn set_icon(&mut self, icon: &IconImage) -> Result<(), WindowError> {
        let surface = self.surface.as_mut().ok_or(WindowError::NotBuilt)?;
        let pixels = icon
            .rgba
            .chunks_exact(4)
            .map(|p| u32::from_le_bytes([p[0], p[1], p[2], p[3]]))
            .collect();
        surface.window.set_icon_from_pixels(vec![glfw::PixelImage {
            width: icon.width,
            height: icon.height,
            pixels,
        }]);
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

fn map_mouse_button(button: glfw::MouseButton) -> Option<MouseButton> {
    match button {
        glfw::MouseButton::Button1 => Some(MouseButton::Left),
        glfw::MouseButton::Button2 => Some(MouseButton::Right),
        glfw::MouseButton::Button3 => Some(MouseButton::Middle),
        _ => None,
    }
}

fn map_key_action(action: Action) -> KeyAction {
    match action {
        Action::Press => KeyAction::Pressed,
        Action::Release => KeyAction::Released,
        Action::Repeat => KeyAction::Repeat,
    }
}

fn map_modifiers(mods: glfw::Modifiers) -> Modifiers {
    let mut modifiers = Modifiers::empty();
    modifiers.set(Modifiers::SHIFT, mods.contains(glfw::Modifiers::Shift));
    modifiers.set(Modifiers::CONTROL, mods.contains(glfw::Modifiers::Control));
    modifiers.set(Modifiers::ALT, mods.contains(glfw::Modifiers::Alt));
    modifiers.set(Modifiers::SUPER, mods.contains(glfw::Modifiers::Super));
    modifiers
}

fn map_key(key: glfw::Key, scancode: glfw::Scancode) -> Key {
    use glfw::Key as G;
    match key {
        G::Enter | G::KpEnter => Key::Enter,
        G::Escape => Key::Escape,
        G::Space => Key::Space,
        G::Tab => Key::Tab,
        G::Backspace => Key::Backspace,
        G::Up => Key::Up,
        G::Down => Key::Down,
        G::Left => Key::Left,
        G::Right => Key::Right,
        G::F1 => Key::F(1),
        G::F2 => Key::F(2),
        G::F3 => Key::F(3),
        G::F4 => Key::F(4),
        G::F5 => Key::F(5),
        G::F6 => Key::F(6),
        G::F7 => Key::F(7),
        G::F8 => Key::F(8),
        G::F9 => Key::F(9),
        G::F10 => Key::F(10),
        G::F11 => Key::F(11),
        G::F12 => Key::F(12),
        other => other
            .get_name()
            .and_then(|name| name.chars().next())
            .map_or(Key::Other(scancode), |c| Key::Char(c.to_ascii_lowercase())),
    }
}
