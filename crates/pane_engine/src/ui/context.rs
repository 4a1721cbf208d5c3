//! Requests raised while dispatching UI input
//!
//! Component actions run while the manager is borrowed for dispatch, so they
//! cannot switch screens directly. They queue a [`UiRequest`] on the
//! [`UiContext`] instead; the manager applies the requests it understands once
//! dispatch is over and hands the rest to the application.

use std::any::TypeId;

use super::interface::UserInterface;
use super::manager::InterfaceKey;

/// Something a component action wants done after dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiRequest {
    /// Activate the interface stored under this key
    Show(InterfaceKey),
    /// Activate the first interface of this concrete type
    ShowType(TypeId),
    /// Rebuild every interface
    Reload,
    /// Close the window
    CloseWindow,
    /// Application-defined request
    Custom(String),
}

/// Request queue handed to component actions
#[derive(Debug, Default)]
pub struct UiContext {
    requests: Vec<UiRequest>,
}

impl UiContext {
    /// Empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a request
    pub fn request(&mut self, request: UiRequest) {
        self.requests.push(request);
    }

    /// Ask for the interface under `key` to become active
    pub fn show(&mut self, key: InterfaceKey) {
        self.request(UiRequest::Show(key));
    }

    /// Ask for the first interface of type `T` to become active
    pub fn show_type<T: UserInterface>(&mut self) {
        self.request(UiRequest::ShowType(TypeId::of::<T>()));
    }

    /// Ask for every interface to be rebuilt
    pub fn reload(&mut self) {
        self.request(UiRequest::Reload);
    }

    /// Ask for the window to close
    pub fn close_window(&mut self) {
        self.request(UiRequest::CloseWindow);
    }

    /// Queue an application-defined request
    pub fn custom(&mut self, name: impl Into<String>) {
        self.request(UiRequest::Custom(name.into()));
    }

    /// Queued requests
    pub fn requests(&self) -> &[UiRequest] {
        &self.requests
    }

    /// Whether nothing was queued
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Take every queued request, leaving the queue empty
    pub fn drain(&mut self) -> Vec<UiRequest> {
        std::mem::take(&mut self.requests)
    }
}
