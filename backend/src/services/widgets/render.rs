//! # Widget Render Service
//!
//! Backend logic for the `POST /api/widgets/file_editable/render` endpoint: it
//! turns a JSON description of an editable file-upload field into the HTML
//! fragment a form page embeds.
//!
//! ## Workflow
//!
//! 1.  **HTTP Request**: `process` is the Actix web handler. The JSON body is
//!     extracted into a `common::requests::RenderWidgetRequest`; a body that does
//!     not match it is rejected by the extractor before the handler runs.
//!
//! 2.  **Configuration**: `render_editable_file` builds an `EditableFileWidget` from
//!     the raw `options` map and the `widget_attributes`, using the `WidgetContext`
//!     shared through the application data (translator, URL builder, upload
//!     directory).
//!
//! 3.  **Rendering**: the widget renders the field `name` with the request's value,
//!     per-render attributes and errors.
//!
//! 4.  **HTTP Response**: the fragment is returned as `text/html`. Rejected options
//!     (missing `file_src`, unknown keys, wrongly typed values) produce a
//!     `400 Bad Request` carrying the error message.

use crate::widget::{EditableFileWidget, WidgetContext, WidgetError};
use actix_web::{web, HttpResponse, Responder};
use common::requests::RenderWidgetRequest;
use log::{debug, warn};

/// Actix web handler for the `POST /api/widgets/file_editable/render` endpoint.
///
/// # Arguments
/// * `context` - The widget collaborators registered as application data.
/// * `payload` - The field and widget description, extracted from the JSON body.
///
/// # Returns
/// - `200 OK` with the rendered HTML fragment as `text/html`.
/// - `400 Bad Request` with an error message if the widget options are rejected.
pub async fn process(
    context: web::Data<WidgetContext>,
    payload: web::Json<RenderWidgetRequest>,
) -> impl Responder {
    match render_editable_file(context.get_ref(), payload.into_inner()) {
        Ok(html) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(html),
        Err(e) => {
            warn!("Rejected widget render request: {}", e);
            HttpResponse::BadRequest().body(format!("Error: {}", e))
        }
    }
}

/// Configures an editable file widget from the request and renders it.
///
/// # Arguments
/// * `context` - Collaborators handed to the widget.
/// * `request` - Field name, value, attributes, errors and widget options.
///
/// # Returns
/// - `Ok(String)` containing the HTML fragment.
/// - `Err(WidgetError)` if the options are missing `file_src`, carry unknown keys
///   or hold values of the wrong type.
pub fn render_editable_file(
    context: &WidgetContext,
    request: RenderWidgetRequest,
) -> Result<String, WidgetError> {
    debug!("Rendering editable file widget for field '{}'", request.name);

    let widget = EditableFileWidget::configure(
        request.options,
        request.widget_attributes,
        context.clone(),
    )?;

    Ok(widget.render(
        &request.name,
        request.value.as_deref(),
        &request.attributes,
        &request.errors,
    ))
}
