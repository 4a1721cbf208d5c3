//! User interface layer
//!
//! ```text
//! UIManager ── one active ──▶ UserInterface ──▶ ObjectStorage<Component>
//!     ▲                            │                   │
//!     │ resize (all interfaces)    │ rebuild on reload  └─ children, drawn
//!  Window                          ▼                      relative to parent
//! ```
//!
//! Input reaches components of the active interface only. Actions queue
//! [`UiRequest`]s that the manager applies after dispatch.

pub mod component;
pub mod context;
pub mod graphic;
pub mod interface;
pub mod layout;
pub mod manager;

pub use component::{Action, Component, ComponentKind, TextContent, VisibleOnly};
pub use context::{UiContext, UiRequest};
pub use graphic::{ButtonTheme, Graphic};
pub use interface::{AsAny, ComponentKey, ComponentStorage, InterfaceBuilder, InterfaceCore, InterfaceOps, UserInterface};
pub use layout::Anchor;
pub use manager::{ActiveOnly, InterfaceKey, UIManager, UiError};
