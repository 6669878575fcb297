use crate::widget::tag::TagBuilder;
use common::model::attributes::{attrs, merge, Attributes};

/// The capabilities a composed widget needs from the control it wraps.
pub trait InputWidget: Send + Sync {
    /// Renders the raw control for the field `name`.
    fn render(
        &self,
        name: &str,
        value: Option<&str>,
        attributes: &Attributes,
        errors: &[String],
    ) -> String;

    /// Tag renderer carrying the widget's default attributes and id format.
    fn tags(&self) -> &TagBuilder;
}

/// A plain `<input type="file">` upload control.
#[derive(Debug, Clone, Default)]
pub struct FileInput {
    tags: TagBuilder,
}

impl FileInput {
    pub const INPUT_TYPE: &'static str = "file";

    pub fn new(tags: TagBuilder) -> Self {
        Self { tags }
    }

    /// Forms holding a file input must be submitted as `multipart/form-data`.
    pub fn needs_multipart(&self) -> bool {
        true
    }
}

impl InputWidget for FileInput {
    fn render(
        &self,
        name: &str,
        value: Option<&str>,
        attributes: &Attributes,
        _errors: &[String],
    ) -> String {
        let mut base = attrs([("type", Self::INPUT_TYPE), ("name", name)]);
        if let Some(value) = value {
            base.insert("value".to_string(), value.to_string());
        }
        self.tags.render_tag("input", &merge(&base, attributes))
    }

    fn tags(&self) -> &TagBuilder {
        &self.tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_file_input_with_generated_id() {
        let input = FileInput::default();
        let html = input.render("photo", None, &Attributes::new(), &[]);
        assert_eq!(html, "<input id=\"photo\" name=\"photo\" type=\"file\" />");
        assert!(input.needs_multipart());
    }

    #[test]
    fn call_attributes_are_merged() {
        let input = FileInput::new(TagBuilder::new("%s", attrs([("class", "upload")])));
        let html = input.render(
            "article[photo]",
            Some(""),
            &attrs([("accept", "image/*")]),
            &["too big".to_string()],
        );
        assert_eq!(
            html,
            "<input accept=\"image/*\" class=\"upload\" id=\"article_photo\" name=\"article[photo]\" type=\"file\" value=\"\" />"
        );
    }
}
