//! Content record and its input shapes.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog entry: one piece of scheduled media content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    /// Assigned once at creation, never changes.
    #[serde(rename = "_id")]
    pub id: Uuid,

    pub title: String,

    #[serde(default)]
    pub subtitle: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub image_url: String,

    #[serde(default)]
    pub duration_minutes: u32,

    pub start_time: DateTime<Utc>,

    pub end_time: DateTime<Utc>,

    /// Genre tags. Uniqueness is case-insensitive and enforced by the tag
    /// operations, not by the container.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Content {
    /// Materialize a draft into a full record with the given id.
    ///
    /// Omitted duration and times fall back to 0 / now / now.
    pub fn from_draft(id: Uuid, draft: ContentDraft) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: draft.title,
            subtitle: draft.subtitle,
            description: draft.description,
            image_url: draft.image_url,
            duration_minutes: draft.duration_minutes.unwrap_or(0),
            start_time: draft.start_time.unwrap_or(now),
            end_time: draft.end_time.unwrap_or(now),
            tags: draft.tags,
        }
    }

    /// Tag union with case-insensitive de-duplication, applied to the
    /// incoming set as well.
    ///
    /// Returns `None` when nothing new would be added.
    pub fn merge_tags(&self, incoming: &[String]) -> Option<Vec<String>> {
        let mut seen: HashSet<String> = self.tags.iter().map(|t| t.to_lowercase()).collect();
        let mut merged = self.tags.clone();
        for tag in incoming {
            if seen.insert(tag.to_lowercase()) {
                merged.push(tag.clone());
            }
        }
        (merged.len() > self.tags.len()).then_some(merged)
    }

    /// Case-insensitive tag difference.
    ///
    /// Returns `None` when no incoming tag matches an existing one.
    pub fn without_tags(&self, incoming: &[String]) -> Option<Vec<String>> {
        let doomed: HashSet<String> = incoming.iter().map(|t| t.to_lowercase()).collect();
        let remaining: Vec<String> = self
            .tags
            .iter()
            .filter(|t| !doomed.contains(&t.to_lowercase()))
            .cloned()
            .collect();
        (remaining.len() < self.tags.len()).then_some(remaining)
    }
}

/// Input for creating a record.
///
/// Duration and times are optional; the store fills defaults at creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentDraft {
    pub title: String,

    #[serde(default)]
    pub subtitle: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub image_url: String,

    #[serde(default)]
    pub duration_minutes: Option<u32>,

    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial update. Unset fields leave the stored value unchanged, never
/// "set to empty".
///
/// Serialization skips unset fields, so the serialized patch doubles as a
/// `$set` payload whose field encoding matches the stored document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl ContentPatch {
    /// Patch that only replaces the tag set.
    pub fn tags(tags: Vec<String>) -> Self {
        Self {
            tags: Some(tags),
            ..Default::default()
        }
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.subtitle.is_none()
            && self.description.is_none()
            && self.image_url.is_none()
            && self.duration_minutes.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.tags.is_none()
    }

    /// Apply the patch to a record in place.
    pub fn apply_to(&self, content: &mut Content) {
        if let Some(v) = &self.title {
            content.title = v.clone();
        }
        if let Some(v) = &self.subtitle {
            content.subtitle = v.clone();
        }
        if let Some(v) = &self.description {
            content.description = v.clone();
        }
        if let Some(v) = &self.image_url {
            content.image_url = v.clone();
        }
        if let Some(v) = self.duration_minutes {
            content.duration_minutes = v;
        }
        if let Some(v) = self.start_time {
            content.start_time = v;
        }
        if let Some(v) = self.end_time {
            content.end_time = v;
        }
        if let Some(v) = &self.tags {
            content.tags = v.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(tags: &[&str]) -> Content {
        Content::from_draft(
            Uuid::new_v4(),
            ContentDraft {
                title: "Nerd Quest".to_string(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn draft_defaults_fill_duration_and_times() {
        let before = Utc::now();
        let c = content(&[]);
        assert_eq!(c.duration_minutes, 0);
        assert!(c.start_time >= before);
        assert_eq!(c.start_time, c.end_time);
    }

    #[test]
    fn merge_tags_dedups_case_insensitively() {
        let c = content(&["Drama"]);
        assert!(c.merge_tags(&["drama".to_string()]).is_none());
        assert!(c.merge_tags(&["Drama".to_string(), "DRAMA".to_string()]).is_none());

        let merged = c.merge_tags(&["Action".to_string(), "action".to_string()]).unwrap();
        assert_eq!(merged, vec!["Drama".to_string(), "Action".to_string()]);
    }

    #[test]
    fn without_tags_matches_case_insensitively() {
        let c = content(&["Action", "Drama"]);
        assert!(c.without_tags(&["Comedy".to_string()]).is_none());

        let remaining = c.without_tags(&["ACTION".to_string()]).unwrap();
        assert_eq!(remaining, vec!["Drama".to_string()]);
    }

    #[test]
    fn patch_leaves_unset_fields_unchanged() {
        let mut c = content(&["Action"]);
        let original = c.clone();

        let patch = ContentPatch {
            title: Some("Renamed".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
        patch.apply_to(&mut c);

        assert_eq!(c.title, "Renamed");
        assert_eq!(c.subtitle, original.subtitle);
        assert_eq!(c.tags, original.tags);
        assert_eq!(c.start_time, original.start_time);
    }

    #[test]
    fn empty_patch_is_empty() {
        assert!(ContentPatch::default().is_empty());
        assert!(!ContentPatch::tags(vec![]).is_empty());
    }

    #[test]
    fn record_round_trips_through_json() {
        let c = content(&["Action", "Drama"]);
        let bytes = serde_json::to_vec(&c).unwrap();
        let back: Content = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back, c);
    }
}
