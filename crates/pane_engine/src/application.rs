//! Application trait and lifecycle management

use crate::config::ConfigError;
use crate::ui::{UIManager, UiError, UiRequest};
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to drive a windowed UI through the [`Engine`](crate::Engine).
pub trait Application {
    /// Register the application's interfaces
    ///
    /// Called once while the engine builds, after the window exists and
    /// before it is shown. The first interface added becomes active.
    fn build(&mut self, ui: &mut UIManager) -> Result<(), AppError>;

    /// Update the application
    ///
    /// Called every frame before the active interface is updated.
    ///
    /// # Arguments
    /// * `ui` - The interface manager
    /// * `delta_time` - Time since last frame in seconds
    fn update(&mut self, _ui: &mut UIManager, _delta_time: f32) -> Result<(), AppError> {
        Ok(())
    }

    /// Handle a request the UI manager did not handle itself
    ///
    /// Return `false` to stop the engine. By default a close request stops
    /// it and everything else is ignored.
    fn handle_request(&mut self, request: &UiRequest) -> bool {
        if let UiRequest::Custom(name) = request {
            log::debug!("Unhandled UI request '{}'", name);
        }
        !matches!(request, UiRequest::CloseWindow)
    }

    /// Cleanup the application
    ///
    /// Called once when the engine loop ends.
    fn cleanup(&mut self) {}
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Interface registration or switching failed
    #[error("UI error: {0}")]
    Ui(#[from] UiError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),
}
