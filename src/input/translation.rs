//! Translation map definitions

use std::collections::HashMap;

use serde::{
    Deserialize,
    Serialize,
};

/// Key → translated string mapping for a single language.
///
/// Each successful load replaces the whole map; maps of different
/// languages are never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationMap {
    /// key → value
    entries: HashMap<String, String>,
}

impl TranslationMap {
    /// Empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a response body.
    ///
    /// The body must be a flat JSON object whose values are all strings.
    ///
    /// # Examples
    /// ```
    /// use edureach_i18n::input::translation::TranslationMap;
    ///
    /// let map = TranslationMap::from_json_slice(br#"{"home": "Inicio"}"#).unwrap();
    /// assert_eq!(map.get("home"), Some("Inicio"));
    ///
    /// assert!(TranslationMap::from_json_slice(br#"{"home": 1}"#).is_err());
    /// ```
    ///
    /// # Errors
    /// Returns error if the body is not valid JSON or not an object of strings.
    pub fn from_json_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// Raw value, including empty strings.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns the value only when it is present and non-empty.
    ///
    /// Empty strings are treated as "no translation" when applying to a page.
    #[must_use]
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when the map has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for TranslationMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}
