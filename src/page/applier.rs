//! Rewrites page text from the active translation map.

use serde::Serialize;

use super::Document;
use crate::input::TranslationMap;

/// Key whose value replaces the brand name in the document title.
pub const TITLE_KEY: &str = "title";
/// Key whose value becomes the meta description.
pub const TAGLINE_KEY: &str = "tagline";

/// What a single application changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyReport {
    /// Number of elements whose key was found in the map.
    pub elements_updated: usize,
    /// Whether the brand in the title was replaced.
    pub title_updated: bool,
    /// Whether the meta description was overwritten.
    pub description_updated: bool,
}

/// Applies `translations` to `document`.
///
/// - Elements whose key maps to a non-empty value get that value as text;
///   all other elements are left untouched.
/// - The first occurrence of `brand_name` in the original (untranslated)
///   title is replaced by the `title` entry, keeping the surrounding text.
/// - The `tagline` entry overwrites the meta description if the page has one.
///
/// Applying the same map again leaves the document unchanged.
pub fn apply_translations(
    document: &mut Document,
    translations: &TranslationMap,
    brand_name: &str,
) -> ApplyReport {
    let mut report = ApplyReport::default();

    for (key, element) in document.translatable_elements_mut() {
        if let Some(value) = translations.non_empty(&key) {
            value.clone_into(&mut element.text);
            report.elements_updated += 1;
        }
    }

    if let Some(title) = translations.non_empty(TITLE_KEY)
        && let Some(translated) =
            substitute_brand(document.capture_title_template(), brand_name, title)
    {
        document.title = translated;
        report.title_updated = true;
    }

    if let (Some(description), Some(tagline)) =
        (document.meta_description.as_mut(), translations.non_empty(TAGLINE_KEY))
    {
        tagline.clone_into(description);
        report.description_updated = true;
    }

    tracing::debug!(
        "Applied translations: {} elements, title: {}, description: {}",
        report.elements_updated,
        report.title_updated,
        report.description_updated
    );

    report
}

/// `template` with its first `brand_name` replaced, or `None` without a brand.
fn substitute_brand(template: &str, brand_name: &str, replacement: &str) -> Option<String> {
    (!brand_name.is_empty() && template.contains(brand_name))
        .then(|| template.replacen(brand_name, replacement, 1))
}
