use thiserror::Error;

/// Errors raised while configuring a widget from an option map.
#[derive(Error, Debug)]
pub enum WidgetError {
    #[error("The widget requires the following option: '{0}'")]
    MissingRequiredOption(String),

    #[error("The widget does not support the following options: '{}'", .0.join("', '"))]
    UnsupportedOptions(Vec<String>),

    #[error("Invalid widget options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}
