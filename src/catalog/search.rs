//! Search filters and the matching rule.

use crate::model::Content;

/// Normalized search filter over title and genre tags.
///
/// Components are trimmed and lowercased at construction, so two filters
/// that differ only in case or surrounding whitespace are the same filter
/// and share one cache key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    title: Option<String>,
    genre: Option<String>,
}

impl SearchFilter {
    pub fn new(title: Option<&str>, genre: Option<&str>) -> Self {
        Self {
            title: normalize(title),
            genre: normalize(genre),
        }
    }

    /// Filter by title substring only.
    pub fn by_title(title: &str) -> Self {
        Self::new(Some(title), None)
    }

    /// Filter by genre substring only.
    pub fn by_genre(genre: &str) -> Self {
        Self::new(None, Some(genre))
    }

    pub(crate) fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub(crate) fn genre(&self) -> Option<&str> {
        self.genre.as_deref()
    }

    /// Substring containment on title, case-insensitive; genre matches
    /// when any tag contains the filter value, case-insensitive.
    pub fn matches(&self, content: &Content) -> bool {
        if let Some(title) = &self.title
            && !content.title.to_lowercase().contains(title)
        {
            return false;
        }
        if let Some(genre) = &self.genre
            && !content.tags.iter().any(|tag| tag.to_lowercase().contains(genre))
        {
            return false;
        }
        true
    }
}

fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::model::ContentDraft;

    fn content(title: &str, tags: &[&str]) -> Content {
        Content::from_draft(
            Uuid::new_v4(),
            ContentDraft {
                title: title.to_string(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn normalization_collapses_case_and_whitespace() {
        assert_eq!(
            SearchFilter::new(Some("  Nerd "), Some("ACTION")),
            SearchFilter::new(Some("nerd"), Some("action")),
        );
        // Blank components disappear entirely
        assert_eq!(SearchFilter::new(Some("   "), None), SearchFilter::default());
    }

    #[test]
    fn title_matches_by_substring() {
        let c = content("Nerd Quest", &[]);
        assert!(SearchFilter::by_title("nerd").matches(&c));
        assert!(SearchFilter::by_title("QUEST").matches(&c));
        assert!(!SearchFilter::by_title("saga").matches(&c));
    }

    #[test]
    fn genre_matches_any_tag_by_substring() {
        let c = content("Nerd Quest", &["Action", "Sci-Fi"]);
        assert!(SearchFilter::by_genre("action").matches(&c));
        assert!(SearchFilter::by_genre("sci").matches(&c));
        assert!(!SearchFilter::by_genre("drama").matches(&c));
    }

    #[test]
    fn both_components_must_match() {
        let c = content("Nerd Quest", &["Action"]);
        assert!(SearchFilter::new(Some("nerd"), Some("act")).matches(&c));
        assert!(!SearchFilter::new(Some("nerd"), Some("drama")).matches(&c));
        assert!(!SearchFilter::new(Some("saga"), Some("act")).matches(&c));
    }

    #[test]
    fn empty_filter_matches_everything() {
        let c = content("Nerd Quest", &[]);
        assert!(SearchFilter::default().matches(&c));
    }
}
