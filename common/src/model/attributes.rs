use std::collections::BTreeMap;

/// HTML attributes of a single tag, keyed by attribute name.
///
/// Keys are kept sorted so that the rendered markup is stable from one render to
/// the next, whatever order the caller inserted them in.
pub type Attributes = BTreeMap<String, String>;

/// Builds an `Attributes` map from string pairs.
pub fn attrs<const N: usize>(pairs: [(&str, &str); N]) -> Attributes {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Overlays `overrides` on top of `base`. Keys present in both take the value
/// from `overrides`.
pub fn merge(base: &Attributes, overrides: &Attributes) -> Attributes {
    let mut merged = base.clone();
    merged.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_win_and_new_keys_are_added() {
        let base = attrs([("type", "checkbox"), ("name", "photo_delete")]);
        let merged = merge(&base, &attrs([("name", "other"), ("class", "big")]));

        assert_eq!(merged.get("type").map(String::as_str), Some("checkbox"));
        assert_eq!(merged.get("name").map(String::as_str), Some("other"));
        assert_eq!(merged.get("class").map(String::as_str), Some("big"));
    }
}
