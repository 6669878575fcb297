//! # Form widgets
//!
//! HTML rendering for the editable file-upload widget and the pieces it is built
//! from.
//!
//! ## Sub-modules:
//! - `tag`: tag and content-tag rendering, attribute escaping, element-id generation.
//! - `input_file`: the plain `<input type="file">` control and the `InputWidget`
//!   capability trait the editable widget composes over.
//! - `context`: the collaborators a widget renders with (translator, URL builder,
//!   configuration store) and their default implementations.
//! - `editable`: the editable widget itself (delete checkbox, image preview,
//!   template substitution).
//! - `error`: option validation errors.

pub mod context;
pub mod editable;
pub mod error;
pub mod input_file;
pub mod tag;

pub use context::{ConfigStore, Translator, UrlBuilder, WidgetContext};
pub use editable::EditableFileWidget;
pub use error::WidgetError;
pub use input_file::{FileInput, InputWidget};
pub use tag::TagBuilder;
