//! Collaborators a widget renders with.
//!
//! Widgets never reach for process-wide state: translation, URL generation and
//! configuration lookups all go through the traits below, bundled in a
//! [`WidgetContext`] handed to the widget at construction. The server builds one
//! context from its `AppConfig` and shares it with every request.

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Configuration key holding the name of the upload directory under `/images`.
pub const UPLOAD_DIR_NAME: &str = "upload_dir_name";

/// Maps message keys to localized strings.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str) -> String;
}

/// Builds the URL of a `module/action` route.
pub trait UrlBuilder: Send + Sync {
    fn build(&self, route: &str, params: &[(&str, String)]) -> String;
}

/// Read access to global settings.
pub trait ConfigStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// A flat message catalogue. Keys without an entry translate to themselves.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Catalogue {
    messages: HashMap<String, String>,
}

impl Catalogue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(mut self, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.messages.insert(key.into(), message.into());
        self
    }

    /// Parses a catalogue from a JSON object of `key: message` pairs.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Translator for Catalogue {
    fn translate(&self, key: &str) -> String {
        self.messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

/// Builds `<prefix>/<module>/<action>?<query>` URLs.
#[derive(Debug, Clone, Default)]
pub struct RouteUrlBuilder {
    /// Script name or mount point prepended to every route, e.g. `/backend.php`.
    prefix: String,
}

impl RouteUrlBuilder {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl UrlBuilder for RouteUrlBuilder {
    fn build(&self, route: &str, params: &[(&str, String)]) -> String {
        let mut url = format!(
            "{}/{}",
            self.prefix.trim_end_matches('/'),
            route.trim_start_matches('/')
        );
        if params.is_empty() {
            return url;
        }

        let query = params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        url.push(if url.contains('?') { '&' } else { '?' });
        url.push_str(&query);
        url
    }
}

/// In-memory configuration store.
#[derive(Debug, Clone, Default)]
pub struct StaticConfig {
    values: HashMap<String, String>,
}

impl StaticConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl ConfigStore for StaticConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// The collaborators of a widget.
#[derive(Clone)]
pub struct WidgetContext {
    pub translator: Arc<dyn Translator>,
    pub urls: Arc<dyn UrlBuilder>,
    pub config: Arc<dyn ConfigStore>,
}

impl WidgetContext {
    pub fn new(
        translator: impl Translator + 'static,
        urls: impl UrlBuilder + 'static,
        config: impl ConfigStore + 'static,
    ) -> Self {
        Self {
            translator: Arc::new(translator),
            urls: Arc::new(urls),
            config: Arc::new(config),
        }
    }
}

impl Default for WidgetContext {
    fn default() -> Self {
        Self::new(Catalogue::new(), RouteUrlBuilder::default(), StaticConfig::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_falls_back_to_key() {
        let catalogue = Catalogue::new().with_message("remove the current file", "supprimer");
        assert_eq!(catalogue.translate("remove the current file"), "supprimer");
        assert_eq!(catalogue.translate("Supprimer l'image"), "Supprimer l'image");
    }

    #[test]
    fn catalogue_parses_json_object() {
        let catalogue =
            Catalogue::from_json_str(r#"{ "Etes-vous sûr ?": "Are you sure?" }"#).unwrap();
        assert_eq!(catalogue.len(), 1);
        assert_eq!(catalogue.translate("Etes-vous sûr ?"), "Are you sure?");
        assert!(Catalogue::from_json_str("[1, 2]").is_err());
    }

    #[test]
    fn route_urls_carry_encoded_query() {
        let urls = RouteUrlBuilder::default();
        assert_eq!(
            urls.build("gallery/removeImage", &[("id", "42".to_string())]),
            "/gallery/removeImage?id=42"
        );
        assert_eq!(
            urls.build("gallery/removeImage", &[("id", "a b&c".to_string())]),
            "/gallery/removeImage?id=a%20b%26c"
        );
        assert_eq!(urls.build("gallery/index", &[]), "/gallery/index");
    }

    #[test]
    fn route_urls_use_prefix_and_existing_query() {
        let urls = RouteUrlBuilder::new("/backend.php/");
        assert_eq!(
            urls.build("/gallery/list?page=2", &[("sort", "name".to_string())]),
            "/backend.php/gallery/list?page=2&sort=name"
        );
    }

    #[test]
    fn static_config_lookup() {
        let config = StaticConfig::new().with(UPLOAD_DIR_NAME, "uploads");
        assert_eq!(config.get(UPLOAD_DIR_NAME).as_deref(), Some("uploads"));
        assert_eq!(config.get("missing"), None);
    }
}
