// src/content/mod.rs - widget-based post content: model, layout, editing and rendering

pub mod editor;
pub mod layout;
pub mod renderer;
pub mod rich_text;
pub mod widget;

use thiserror::Error;

pub use layout::{GridPlacement, Layout};
pub use widget::{Widget, WidgetContent, WidgetKind, validate_widgets};

/// Version of the stored widget array format.
pub const CONTENT_VERSION: i32 = 1;

#[derive(Debug, Error, PartialEq)]
pub enum ContentError {
    #[error("widget '{id}': {reason}")]
    Widget { id: String, reason: String },
    #[error("duplicate widget id '{0}'")]
    DuplicateId(String),
    #[error("invalid text document: {0}")]
    Document(String),
    #[error("widget '{0}' not found")]
    UnknownWidget(String),
    #[error("widget '{id}' holds {expected} content, got {found}")]
    KindMismatch {
        id: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("content version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: i32, supported: i32 },
}
