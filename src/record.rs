//! Record types produced by the extraction pipeline.
//!
//! A [`SearchRecord`] is one discovered entity from a search results page.
//! A [`ProfileRecord`] is the extended attribute set resolved from a
//! dedicated profile page. Both are plain serializable data: the routing
//! layer that sits in front of this crate returns them verbatim.
//!
//! # Invariant
//!
//! `handle` is always derived from a structural identifier (the `/@handle`
//! URL path segment), never from free text, so two records with the same
//! handle refer to the same entity. Within a single search response handles
//! are unique (first occurrence wins).

use serde::{Deserialize, Serialize};

/// One entity discovered on a search results page.
///
/// Field contents degrade gracefully: `display_name` falls back to the
/// handle when no name facet resolved, `avatar_url` may be empty when every
/// avatar strategy came up dry. Only `handle` is guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    /// Unique handle, without the leading `@`.
    pub handle: String,

    /// Human-readable display name. Defaults to `handle` when unresolved.
    pub display_name: String,

    /// Avatar image URL. Empty string when no strategy resolved it.
    pub avatar_url: String,

    /// Whether a verification badge was detected next to the entity.
    pub verified: bool,
}

/// Reference to one recent media item on a profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    /// Link to the media item.
    pub url: String,

    /// Thumbnail image URL. Empty string when unresolved.
    pub thumbnail_url: String,
}

/// Extended attribute set resolved from a dedicated profile page.
///
/// Every facet is resolved independently through its own fallback chain;
/// exhausting a chain leaves that facet empty instead of failing the whole
/// record. Count fields hold the display text the page renders (`"1.2M"`,
/// `"304"`), not parsed integers; the source formats them lossily and the
/// consumer wants them verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Unique handle, without the leading `@`.
    pub handle: String,

    /// Human-readable display name. Defaults to `handle` when unresolved.
    pub display_name: String,

    /// Avatar image URL. Empty string when unresolved.
    pub avatar_url: String,

    /// Biography text. Empty string when unresolved.
    pub biography: String,

    /// Follower count as displayed (e.g. `"1.2M"`).
    pub follower_count: String,

    /// Following count as displayed.
    pub following_count: String,

    /// Like count as displayed.
    pub like_count: String,

    /// Whether a verification badge was detected.
    pub verified: bool,

    /// Up to 5 most recent media items, in page order.
    pub recent_media: Vec<MediaRef>,
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Records are the wire payload of the routing layer; make sure they
    /// round-trip through serde without surprises in field naming.
    #[test]
    fn test_search_record_serde_roundtrip() {
        let record = SearchRecord {
            handle: "dance_queen".to_string(),
            display_name: "Dance Queen".to_string(),
            avatar_url: "https://cdn.example.com/a.jpg".to_string(),
            verified: true,
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"handle\":\"dance_queen\""));
        assert!(json.contains("\"verified\":true"));

        let back: SearchRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_profile_record_serde_roundtrip() {
        let record = ProfileRecord {
            handle: "dance_queen".to_string(),
            display_name: "Dance Queen".to_string(),
            avatar_url: String::new(),
            biography: "dancing daily".to_string(),
            follower_count: "1.2M".to_string(),
            following_count: "300".to_string(),
            like_count: "15.7M".to_string(),
            verified: false,
            recent_media: vec![MediaRef {
                url: "https://example.com/@dance_queen/video/1".to_string(),
                thumbnail_url: String::new(),
            }],
        };

        let json = serde_json::to_string(&record).unwrap();
        let back: ProfileRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
