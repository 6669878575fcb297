//! # Widget Service Module
//!
//! HTTP access to the form widgets, for pages assembled by processes that cannot
//! link the widget library. Every route lives under `/api/widgets` and reads the
//! shared `WidgetContext` from the application data.
//!
//! ## Sub-modules:
//! - `render`: renders an editable file-upload widget from a JSON description.

mod render;

pub use render::render_editable_file;

use actix_web::web::{post, scope};
use actix_web::Scope;

/// The base path for all widget-related API endpoints.
const API_PATH: &str = "/api/widgets";

/// Configures and returns the Actix `Scope` for all widget routes.
///
/// # Registered Routes:
///
/// *   **`POST /file_editable/render`**:
///     - **Handler**: `render::process`
///     - **Description**: Expects a JSON `RenderWidgetRequest` (field name, optional
///       value, per-render attributes, errors, widget options and widget default
///       attributes). Returns the rendered HTML fragment as `text/html`, or
///       `400 Bad Request` with the error message when the options are rejected.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/file_editable/render", post().to(render::process))
}
