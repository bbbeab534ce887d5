//! Serializable page model.
//!
//! Stands in for the DOM: only the parts the translation pipeline reads or
//! writes are modelled.

use serde::{
    Deserialize,
    Serialize,
};

/// A page element.
///
/// Elements with a `translate_key` (the `data-translate` attribute) are
/// translatable; several elements may share one key.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// `id` attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// `data-translate` attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translate_key: Option<String>,
    /// Text content.
    #[serde(default)]
    pub text: String,
}

impl Element {
    /// Element without a translation key.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { id: None, translate_key: None, text: text.into() }
    }

    /// Element translated through `key`.
    #[must_use]
    pub fn translatable(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: None, translate_key: Some(key.into()), text: text.into() }
    }

    /// Sets the `id` attribute.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// A page: title, meta description and elements.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    /// Title as currently displayed.
    pub title: String,
    /// Title before any translation was applied. Captured on the first
    /// title substitution so later languages substitute into the same text.
    #[serde(skip_serializing_if = "Option::is_none")]
    title_template: Option<String>,
    /// `<meta name="description">` content; `None` when the page has no such tag.
    pub meta_description: Option<String>,
    /// Page elements in document order.
    pub elements: Vec<Element>,
}

impl Document {
    /// Page with only a title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), ..Self::default() }
    }

    /// Adds a `<meta name="description">` tag.
    #[must_use]
    pub fn with_meta_description(mut self, description: impl Into<String>) -> Self {
        self.meta_description = Some(description.into());
        self
    }

    /// Appends an element.
    #[must_use]
    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    /// Appends an element, e.g. content rendered after the initial load.
    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// The untranslated title.
    #[must_use]
    pub fn original_title(&self) -> &str {
        self.title_template.as_deref().unwrap_or(&self.title)
    }

    /// Remembers the current title as the untranslated one, once.
    pub(super) fn capture_title_template(&mut self) -> &str {
        let title = &self.title;
        self.title_template.get_or_insert_with(|| title.clone())
    }

    /// Translatable elements together with their key.
    pub fn translatable_elements_mut(&mut self) -> impl Iterator<Item = (String, &mut Element)> {
        self.elements
            .iter_mut()
            .filter_map(|element| element.translate_key.clone().map(|key| (key, element)))
    }

    /// First element with the given `id`.
    #[must_use]
    pub fn element_by_id(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|element| element.id.as_deref() == Some(id))
    }

    /// Texts of every element carrying `key`, in document order.
    #[must_use]
    pub fn texts_for_key(&self, key: &str) -> Vec<&str> {
        self.elements
            .iter()
            .filter(|element| element.translate_key.as_deref() == Some(key))
            .map(|element| element.text.as_str())
            .collect()
    }
}
