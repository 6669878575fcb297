//! # Editable file-upload widget
//!
//! Renders an upload input together with the controls needed to manage an already
//! uploaded file: a delete checkbox with its label, the current file (as an image
//! or as its raw source) and, for images of saved objects, a preview block with an
//! AJAX delete button.
//!
//! ## Rendering
//!
//! 1. The wrapped `InputWidget` renders the upload control.
//! 2. Outside edit mode that control is the whole output.
//! 3. Otherwise the delete checkbox is named after the field with a `_delete`
//!    suffix (`photo_delete`, or `photo[_delete]` for array-style names). Forms
//!    using this widget need a validator for that extra field.
//! 4. The effective template is the configured `template`, or the preview template
//!    when a complete preview record points at a stored file.
//! 5. `%input%`, `%delete%`, `%delete_label%` and `%file%` are substituted in a
//!    single pass: markup inserted for one placeholder is never scanned again.
//!
//! The widget is immutable once built, so the same instance can render any number
//! of fields concurrently and renders are repeatable.

use crate::widget::context::{WidgetContext, UPLOAD_DIR_NAME};
use crate::widget::error::WidgetError;
use crate::widget::input_file::{FileInput, InputWidget};
use crate::widget::tag::{content_tag, escape_html, sanitize_id, tag, TagBuilder};
use common::model::attributes::{attrs, merge, Attributes};
use common::model::options::{EditableFileOptions, REQUIRED_OPTIONS, SUPPORTED_OPTIONS};
use common::model::preview::CompletePreview;
use log::debug;
use regex::{Captures, Regex};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::sync::OnceLock;

/// Message key of the confirmation asked before deleting a previewed image.
pub const CONFIRM_DELETE_KEY: &str = "Etes-vous sûr ?";
/// Message key of the preview delete button.
pub const DELETE_IMAGE_KEY: &str = "Supprimer l'image";
/// Icon shown in the preview delete button.
pub const DELETE_ICON_SRC: &str = "/images/admingen/delete.png";

pub struct EditableFileWidget<I: InputWidget = FileInput> {
    input: I,
    options: EditableFileOptions,
    context: WidgetContext,
}

impl EditableFileWidget<FileInput> {
    /// Builds the widget from a raw option map.
    ///
    /// # Errors
    /// - `MissingRequiredOption` when `file_src` is absent.
    /// - `UnsupportedOptions` listing every key the widget does not know.
    /// - `InvalidOptions` when a known option holds a value of the wrong type.
    pub fn configure(
        options: Map<String, Value>,
        attributes: Attributes,
        context: WidgetContext,
    ) -> Result<Self, WidgetError> {
        check_option_keys(&options)?;
        let options: EditableFileOptions = serde_json::from_value(Value::Object(options))?;
        Ok(Self::new(options, attributes, context))
    }

    pub fn new(
        options: EditableFileOptions,
        attributes: Attributes,
        context: WidgetContext,
    ) -> Self {
        let tags = TagBuilder::new(options.id_format.clone(), attributes);
        Self::with_input(FileInput::new(tags), options, context)
    }
}

impl<I: InputWidget> EditableFileWidget<I> {
    pub fn with_input(input: I, options: EditableFileOptions, context: WidgetContext) -> Self {
        Self {
            input,
            options,
            context,
        }
    }

    pub fn options(&self) -> &EditableFileOptions {
        &self.options
    }

    pub fn needs_multipart(&self) -> bool {
        true
    }

    /// Renders the widget for the field `name`.
    pub fn render(
        &self,
        name: &str,
        value: Option<&str>,
        attributes: &Attributes,
        errors: &[String],
    ) -> String {
        let input = self.input.render(name, value, attributes, errors);

        if !self.options.edit_mode {
            return input;
        }

        let (delete, delete_label) = if self.options.with_delete {
            self.render_delete_controls(name, attributes)
        } else {
            (String::new(), String::new())
        };

        let template = self.effective_template(name, value, attributes);
        let file = self.file_as_tag(attributes);

        substitute_placeholders(&template, &input, &delete, &delete_label, &file)
    }

    /// Returns the template a render of `name` uses: the preview template when
    /// the preview applies, the configured `template` otherwise.
    pub fn effective_template(
        &self,
        name: &str,
        value: Option<&str>,
        attributes: &Attributes,
    ) -> Cow<'_, str> {
        match self.previewed_file() {
            Some(preview) => {
                let input_id = match attributes.get("id") {
                    Some(id) => id.clone(),
                    None => self.input.tags().generate_id(name, value),
                };
                Cow::Owned(self.preview_template(&preview, &input_id))
            }
            None => Cow::Borrowed(self.options.template.as_str()),
        }
    }

    fn render_delete_controls(&self, name: &str, attributes: &Attributes) -> (String, String) {
        let tags = self.input.tags();
        let delete_name = delete_field_name(name);

        let checkbox = tags.render_tag(
            "input",
            &merge(
                &attrs([("type", "checkbox"), ("name", delete_name.as_str())]),
                attributes,
            ),
        );
        let label_text = self.context.translator.translate(&self.options.delete_label);
        let label = tags.render_content_tag(
            "label",
            &label_text,
            &attrs([("for", tags.generate_id(&delete_name, None).as_str())]),
        );

        (checkbox, label)
    }

    fn file_as_tag(&self, attributes: &Attributes) -> String {
        let src = self.options.file_src.as_path();
        if !self.options.is_image {
            return src.unwrap_or_default().to_string();
        }
        match src {
            Some(src) => self
                .input
                .tags()
                .render_tag("img", &merge(&attrs([("src", src)]), attributes)),
            None => String::new(),
        }
    }

    fn previewed_file(&self) -> Option<CompletePreview<'_>> {
        if !self.options.with_preview || self.options.preview.is_empty() {
            return None;
        }
        let Some(preview) = self.options.preview.complete() else {
            debug!("Preview record is incomplete, rendering without preview");
            return None;
        };
        preview.shows_existing_file().then_some(preview)
    }

    fn preview_template(&self, preview: &CompletePreview<'_>, input_id: &str) -> String {
        let upload_dir = self.context.config.get(UPLOAD_DIR_NAME).unwrap_or_else(|| {
            debug!("No '{}' configured for image previews", UPLOAD_DIR_NAME);
            String::new()
        });
        let img_path = format!("/images/{}/{}/{}", upload_dir, preview.img_dir, preview.value);
        let container_id = sanitize_id(&format!("{}_{}_preview", input_id, preview.object_id));

        let thumbnail = tag(
            "img",
            &attrs([("align", "absbottom"), ("src", img_path.as_str()), ("width", "100")]),
        );
        let link = content_tag(
            "a",
            &thumbnail,
            &attrs([("href", img_path.as_str()), ("class", "lightbox")]),
        );

        let delete_button = if self.options.with_delete {
            self.preview_delete_button(preview, &container_id, input_id)
        } else {
            String::new()
        };

        format!(
            "{} %input% <br />%delete% %delete_label%",
            content_tag(
                "div",
                &format!("{}{}", link, delete_button),
                &attrs([("id", container_id.as_str())])
            )
        )
    }

    fn preview_delete_button(
        &self,
        preview: &CompletePreview<'_>,
        container_id: &str,
        input_id: &str,
    ) -> String {
        let translator = &self.context.translator;
        let url = self.context.urls.build(
            &format!("{}/removeImage", preview.module_name),
            &[("id", preview.object_id.to_string())],
        );

        let onclick = format!(
            "if (confirm('{}')) {{ $.ajax({{ url: '{}', success: function() {{ \
             document.getElementById('{}').remove(); \
             document.getElementById('{}').value = ''; }} }}); }} return false;",
            js_string(&translator.translate(CONFIRM_DELETE_KEY)),
            js_string(&url),
            container_id,
            js_string(input_id),
        );
        let icon = tag("img", &attrs([("src", DELETE_ICON_SRC), ("border", "0")]));
        let button = content_tag(
            "a",
            &format!(
                "{}&nbsp;{}",
                icon,
                escape_html(&translator.translate(DELETE_IMAGE_KEY))
            ),
            &attrs([("href", "#"), ("onclick", onclick.as_str())]),
        );

        format!("<br />{}<br />", button)
    }
}

/// Name of the delete checkbox rendered next to the field `name`.
///
/// `photo` gives `photo_delete`; `photo[]` gives `photo[_delete]`.
pub fn delete_field_name(name: &str) -> String {
    match name.strip_suffix(']') {
        Some(head) => format!("{}_delete]", head),
        None => format!("{}_delete", name),
    }
}

/// Replaces each placeholder of `template` once, left to right.
pub fn substitute_placeholders(
    template: &str,
    input: &str,
    delete: &str,
    delete_label: &str,
    file: &str,
) -> String {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    let placeholder =
        PLACEHOLDER.get_or_init(|| Regex::new(r"%(input|delete_label|delete|file)%").unwrap());

    placeholder
        .replace_all(template, |caps: &Captures| match &caps[1] {
            "input" => input.to_string(),
            "delete" => delete.to_string(),
            "delete_label" => delete_label.to_string(),
            _ => file.to_string(),
        })
        .into_owned()
}

fn check_option_keys(options: &Map<String, Value>) -> Result<(), WidgetError> {
    if let Some(missing) = REQUIRED_OPTIONS.iter().find(|k| !options.contains_key(**k)) {
        return Err(WidgetError::MissingRequiredOption(missing.to_string()));
    }

    let unsupported: Vec<String> = options
        .keys()
        .filter(|k| !SUPPORTED_OPTIONS.contains(&k.as_str()))
        .cloned()
        .collect();
    if !unsupported.is_empty() {
        debug!("Rejecting unsupported widget options: {:?}", unsupported);
        return Err(WidgetError::UnsupportedOptions(unsupported));
    }
    Ok(())
}

/// Escapes a value for a single-quoted JavaScript string.
fn js_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
