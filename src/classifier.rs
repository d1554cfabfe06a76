//! Intent classification.
//!
//! Maps free text onto a [`CatalogKey`]. The keyword matcher is a stand-in for
//! a real intent model, so callers only see the [`IntentClassifier`] trait.

use crate::catalog::CatalogKey;

/// Keywords selecting the e-commerce template. Checked first.
pub const ECOMMERCE_KEYWORDS: &[&str] = &["ecommerce", "shop", "product", "order"];

/// Keywords selecting the blog template.
pub const BLOG_KEYWORDS: &[&str] = &["blog", "post", "article", "comment"];

/// Template chosen when nothing matches.
pub const DEFAULT_KEY: CatalogKey = CatalogKey::Ecommerce;

/// Turns a user description into a catalog key. Must be total.
pub trait IntentClassifier: Send + Sync {
    fn classify(&self, text: &str) -> CatalogKey;
}

/// Case-insensitive substring matching against fixed keyword sets.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl IntentClassifier for KeywordClassifier {
    fn classify(&self, text: &str) -> CatalogKey {
        classify(text)
    }
}

/// Classifies `text` with the built-in keyword sets.
pub fn classify(text: &str) -> CatalogKey {
    let lowered = text.to_lowercase();
    let matches = |keywords: &[&str]| keywords.iter().any(|k| lowered.contains(k));

    if matches(ECOMMERCE_KEYWORDS) {
        CatalogKey::Ecommerce
    } else if matches(BLOG_KEYWORDS) {
        CatalogKey::Blog
    } else {
        DEFAULT_KEY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ecommerce_keywords() {
        for text in [
            "an online SHOP for socks",
            "track Product inventory",
            "handle customer orders",
            "Ecommerce platform",
        ] {
            assert_eq!(classify(text), CatalogKey::Ecommerce, "{text}");
        }
    }

    #[test]
    fn test_blog_keywords() {
        for text in [
            "I need a blog with comments",
            "a place to POST stories",
            "article archive",
            "moderate Comment threads",
        ] {
            assert_eq!(classify(text), CatalogKey::Blog, "{text}");
        }
    }

    #[test]
    fn test_ecommerce_wins_ties() {
        assert_eq!(
            classify("a blog where readers can order prints"),
            CatalogKey::Ecommerce
        );
    }

    #[test]
    fn test_default_for_unmatched_and_empty() {
        assert_eq!(classify("a fitness tracker"), CatalogKey::Ecommerce);
        assert_eq!(classify(""), CatalogKey::Ecommerce);
        assert_eq!(classify("   "), CatalogKey::Ecommerce);
    }

    #[test]
    fn test_substring_matching() {
        // "reorder" contains "order"
        assert_eq!(classify("reorder the blog"), CatalogKey::Ecommerce);
        // "posting" contains "post"
        assert_eq!(classify("job posting board"), CatalogKey::Blog);
    }

    #[test]
    fn test_trait_object_dispatch() {
        let classifier: Box<dyn IntentClassifier> = Box::new(KeywordClassifier::new());
        assert_eq!(classifier.classify("my article site"), CatalogKey::Blog);
    }
}
