//! Extraction pipeline.
//!
//! Pure, deterministic functions over a parsed HTML document. Nothing in
//! this module touches the browser: the orchestration layer hands in the
//! rendered document as a string, which makes every fallback chain unit
//! testable against synthetic documents.
//!
//! # Strategy layering
//!
//! The target site's markup is obfuscated and churns constantly, so no
//! single selector is trusted:
//!
//! - **Candidate discovery** walks an ordered list of anchor selectors.
//!   The structural path pattern (`/@handle` in the href) comes first;
//!   path structure survives redesigns that rename every CSS class.
//!   Presentation-class selectors sit at the bottom as a last resort.
//! - **Facets** (avatar, display name, verified flag) each have their own
//!   ordered strategy list: semantic attribute marker → generic tag →
//!   nearest-ancestor-scoped search. The first non-empty result wins, and
//!   facets never block each other: a missing avatar does not cost us the
//!   display name.
//!
//! The fallback policy is data (slices of strategy functions), not control
//! flow, so adding a layer is a one-line change.
//!
//! # Identity
//!
//! `handle` is derived from the href path segment, never from anchor text.
//! Text is styled, truncated and localized; the path segment is the
//! structural identifier the site itself routes by.

use std::collections::HashSet;

use scraper::{ElementRef, Html, Selector};

use crate::record::{MediaRef, ProfileRecord, SearchRecord};

/// Hard cap the pipeline enforces on `limit`, independent of whatever the
/// routing layer validated. The pipeline owns its own precondition.
pub(crate) const EXTRACT_HARD_CAP: usize = 50;

/// Maximum number of recent media items resolved per profile.
pub const MAX_RECENT_MEDIA: usize = 5;

/// One facet-resolution strategy: a pure function from a candidate anchor
/// to an optional value.
type FacetStrategy = fn(&ElementRef) -> Option<String>;

// ============================================================================
// Selector tables
// ============================================================================

/// Candidate discovery, most stable layer first. Within a layer the
/// document order of matches is preserved, since document order is the ranking
/// signal from the source.
const ANCHOR_SELECTORS: &[&str] = &[
    // Structural: profile links carry the /@handle path segment
    "a[href^='/@']",
    // Same pattern on absolute hrefs
    "a[href*='/@']",
    // Presentation classes, unstable, last resort only
    ".user-card a[href], .search-user-item a[href]",
];

/// Avatar facet, anchor-scoped layers.
const AVATAR_STRATEGIES: &[FacetStrategy] =
    &[avatar_semantic, avatar_any_img, avatar_container_img];

/// Display-name facet, anchor-scoped layers.
const NAME_STRATEGIES: &[FacetStrategy] = &[name_semantic, name_generic, name_container];

/// Verified-badge markers, checked in the anchor then its container.
const VERIFIED_SELECTORS: &[&str] = &["[data-e2e*='verified']", "svg[class*='verify']"];

/// Profile-page facet selectors, most semantic first.
const PROFILE_NAME_SELECTORS: &[&str] = &["[data-e2e='user-title']", "h1", "h2[title]"];
const PROFILE_BIO_SELECTORS: &[&str] = &["[data-e2e='user-bio']", "[data-e2e='user-desc']"];
const PROFILE_FOLLOWER_SELECTORS: &[&str] =
    &["[data-e2e='followers-count']", "strong[title='Followers']"];
const PROFILE_FOLLOWING_SELECTORS: &[&str] =
    &["[data-e2e='following-count']", "strong[title='Following']"];
const PROFILE_LIKES_SELECTORS: &[&str] = &["[data-e2e='likes-count']", "strong[title='Likes']"];
const PROFILE_AVATAR_SELECTORS: &[&str] = &[
    "[data-e2e='user-avatar'] img",
    "img[class*='avatar']",
    "header img",
];
const PROFILE_MEDIA_SELECTORS: &[&str] =
    &["[data-e2e='user-post-item'] a[href]", "a[href*='/video/']"];

// ============================================================================
// Public pipeline
// ============================================================================

/// Extract search records from a rendered search results page.
///
/// Deterministic and idempotent: the same document and limit yield the
/// same ordered records. Records are deduplicated by handle (first
/// occurrence wins, document order preserved) and truncated to `limit`,
/// which is defensively clamped to `[1, 50]` whether or not the caller
/// validated it. An empty result is a valid outcome, distinct from any
/// error.
pub fn extract_search_records(html: &str, limit: usize) -> Vec<SearchRecord> {
    let limit = limit.clamp(1, EXTRACT_HARD_CAP);
    let document = Html::parse_document(html);

    let anchors = discover_anchors(&document);

    let mut seen: HashSet<String> = HashSet::new();
    let mut records = Vec::new();

    for anchor in anchors {
        let Some(handle) = anchor.value().attr("href").and_then(handle_from_href) else {
            continue;
        };

        // First occurrence wins; later duplicates keep their position empty
        if !seen.insert(handle.clone()) {
            continue;
        }

        let display_name =
            resolve_facet(&anchor, NAME_STRATEGIES).unwrap_or_else(|| handle.clone());
        let avatar_url = resolve_facet(&anchor, AVATAR_STRATEGIES).unwrap_or_default();
        let verified = detect_verified(&anchor);

        records.push(SearchRecord {
            handle,
            display_name,
            avatar_url,
            verified,
        });

        if records.len() == limit {
            break;
        }
    }

    log::debug!(
        "Extracted {} search record(s) (limit {})",
        records.len(),
        limit
    );

    records
}

/// Extract the extended record from a rendered profile page.
///
/// Every facet resolves independently through its own fallback chain and
/// defaults to empty on total exhaustion, so a half-broken page still yields
/// a usable record. `display_name` falls back to the handle.
pub fn extract_profile(html: &str, handle: &str) -> ProfileRecord {
    let document = Html::parse_document(html);

    let display_name = doc_text_facet(&document, PROFILE_NAME_SELECTORS)
        .unwrap_or_else(|| handle.to_string());

    let biography = doc_text_facet(&document, PROFILE_BIO_SELECTORS)
        // Meta description carries the bio when the visible node is missing
        .or_else(|| doc_attr_facet(&document, &[("meta[name='description']", "content")]))
        .unwrap_or_default();

    let follower_count =
        doc_text_facet(&document, PROFILE_FOLLOWER_SELECTORS).unwrap_or_default();
    let following_count =
        doc_text_facet(&document, PROFILE_FOLLOWING_SELECTORS).unwrap_or_default();
    let like_count = doc_text_facet(&document, PROFILE_LIKES_SELECTORS).unwrap_or_default();

    let avatar_url = doc_attr_facet(
        &document,
        &[
            (PROFILE_AVATAR_SELECTORS[0], "src"),
            (PROFILE_AVATAR_SELECTORS[1], "src"),
            (PROFILE_AVATAR_SELECTORS[2], "src"),
        ],
    )
    .unwrap_or_default();

    let verified = VERIFIED_SELECTORS.iter().any(|selector_str| {
        parse_selector(selector_str)
            .map(|selector| document.select(&selector).next().is_some())
            .unwrap_or(false)
    });

    let recent_media = extract_recent_media(&document);

    ProfileRecord {
        handle: handle.to_string(),
        display_name,
        avatar_url,
        biography,
        follower_count,
        following_count,
        like_count,
        verified,
        recent_media,
    }
}

/// Derive a handle from an href, structurally.
///
/// Accepts relative (`/@handle`, `/@handle/video/123`) and absolute
/// (`https://site/@handle?lang=en`) forms. Returns `None` when no `@`
/// path segment exists, i.e. the anchor is not an entity link.
pub(crate) fn handle_from_href(href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    // Absolute URLs go through the parser (strips query/fragment properly);
    // everything else is treated as a path.
    let path = if href.starts_with("http://") || href.starts_with("https://") {
        url::Url::parse(href).ok()?.path().to_string()
    } else {
        href.split(['?', '#']).next().unwrap_or_default().to_string()
    };

    path.split('/')
        .find(|segment| segment.len() > 1 && segment.starts_with('@'))
        .map(|segment| segment[1..].to_string())
}

// ============================================================================
// Candidate discovery
// ============================================================================

/// Select candidate anchors using the first selector layer that matches
/// anything. Layers below the first hit are not consulted.
fn discover_anchors(document: &Html) -> Vec<ElementRef<'_>> {
    for (layer, selector_str) in ANCHOR_SELECTORS.iter().enumerate() {
        let Some(selector) = parse_selector(selector_str) else {
            continue;
        };

        let found: Vec<ElementRef<'_>> = document.select(&selector).collect();
        if !found.is_empty() {
            if layer > 0 {
                log::debug!(
                    "Candidate discovery fell back to layer {} ('{}')",
                    layer,
                    selector_str
                );
            }
            return found;
        }
    }

    Vec::new()
}

// ============================================================================
// Facet resolution
// ============================================================================

/// Evaluate strategies in order; first non-empty result wins.
fn resolve_facet(anchor: &ElementRef, strategies: &[FacetStrategy]) -> Option<String> {
    strategies.iter().find_map(|strategy| {
        strategy(anchor).filter(|value| !value.trim().is_empty())
    })
}

/// Avatar layer 1: image tagged with a semantic avatar marker.
fn avatar_semantic(anchor: &ElementRef) -> Option<String> {
    scoped_attr(anchor, "img[data-e2e*='avatar'], [data-e2e*='avatar'] img", "src")
}

/// Avatar layer 2: any image inside the anchor.
fn avatar_any_img(anchor: &ElementRef) -> Option<String> {
    scoped_attr(anchor, "img", "src")
}

/// Avatar layer 3: any image in the nearest ancestor container.
fn avatar_container_img(anchor: &ElementRef) -> Option<String> {
    let container = nearest_container(anchor, 3)?;
    scoped_attr(&container, "img", "src")
}

/// Name layer 1: node tagged with a semantic title/name marker.
fn name_semantic(anchor: &ElementRef) -> Option<String> {
    scoped_text(
        anchor,
        "[data-e2e*='user-title'], [data-e2e*='user-name'], [data-e2e*='nickname']",
    )
}

/// Name layer 2: the anchor's own title attribute, then its visible text.
fn name_generic(anchor: &ElementRef) -> Option<String> {
    if let Some(title) = anchor.value().attr("title") {
        let title = title.trim();
        if !title.is_empty() {
            return Some(title.to_string());
        }
    }
    let text = element_text(anchor);
    (!text.is_empty()).then_some(text)
}

/// Name layer 3: semantic markers in the nearest ancestor container.
fn name_container(anchor: &ElementRef) -> Option<String> {
    let container = nearest_container(anchor, 3)?;
    scoped_text(
        &container,
        "[data-e2e*='user-title'], [data-e2e*='user-name'], h3, h4",
    )
}

/// Verified badge: marker inside the anchor, then inside its container.
fn detect_verified(anchor: &ElementRef) -> bool {
    for selector_str in VERIFIED_SELECTORS {
        let Some(selector) = parse_selector(selector_str) else {
            continue;
        };

        if anchor.select(&selector).next().is_some() {
            return true;
        }

        if let Some(container) = nearest_container(anchor, 2) {
            if container.select(&selector).next().is_some() {
                return true;
            }
        }
    }
    false
}

/// Up to [`MAX_RECENT_MEDIA`] media links from a profile page, first
/// matching selector layer wins.
fn extract_recent_media(document: &Html) -> Vec<MediaRef> {
    for selector_str in PROFILE_MEDIA_SELECTORS {
        let Some(selector) = parse_selector(selector_str) else {
            continue;
        };

        let items: Vec<MediaRef> = document
            .select(&selector)
            .filter_map(|item| {
                let url = item.value().attr("href")?.trim().to_string();
                if url.is_empty() {
                    return None;
                }

                let thumbnail_url = scoped_attr(&item, "img", "src")
                    .or_else(|| {
                        nearest_container(&item, 2)
                            .and_then(|container| scoped_attr(&container, "img", "src"))
                    })
                    .unwrap_or_default();

                Some(MediaRef { url, thumbnail_url })
            })
            .take(MAX_RECENT_MEDIA)
            .collect();

        if !items.is_empty() {
            return items;
        }
    }

    Vec::new()
}

// ============================================================================
// Document helpers
// ============================================================================

/// Parse a selector, treating a malformed constant as "no match" rather
/// than a crash. Selector faults are facet-local by policy.
fn parse_selector(selector_str: &str) -> Option<Selector> {
    Selector::parse(selector_str).ok()
}

/// First non-empty `attr` among descendants of `scope` matching `selector_str`.
fn scoped_attr(scope: &ElementRef, selector_str: &str, attr: &str) -> Option<String> {
    let selector = parse_selector(selector_str)?;
    scope
        .select(&selector)
        .filter_map(|el| el.value().attr(attr))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

/// First non-empty text among descendants of `scope` matching `selector_str`.
fn scoped_text(scope: &ElementRef, selector_str: &str) -> Option<String> {
    let selector = parse_selector(selector_str)?;
    scope
        .select(&selector)
        .map(|el| element_text(&el))
        .find(|text| !text.is_empty())
}

/// Visible text of an element: whitespace-joined, collapsed, trimmed.
fn element_text(el: &ElementRef) -> String {
    el.text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Walk up at most `max_hops` element ancestors, stopping before any
/// ancestor that contains more than one entity anchor.
///
/// Cards on the search page wrap the entity link in a couple of layout
/// divs; the facets that live outside the anchor (badge, avatar in a
/// sibling column) are found by searching that container. The stop
/// condition keeps the search inside this candidate's own card; a shared
/// container would leak facets from neighboring candidates.
fn nearest_container<'a>(el: &ElementRef<'a>, max_hops: usize) -> Option<ElementRef<'a>> {
    let anchor_selector = parse_selector("a[href*='/@']")?;

    let mut current = el.parent();
    let mut container = None;

    for _ in 0..max_hops {
        let Some(node) = current else { break };
        if let Some(element) = ElementRef::wrap(node) {
            if element.select(&anchor_selector).count() > 1 {
                break;
            }
            container = Some(element);
        }
        current = node.parent();
    }

    container
}

/// First non-empty text for an ordered selector list over the whole
/// document.
fn doc_text_facet(document: &Html, selectors: &[&str]) -> Option<String> {
    selectors.iter().find_map(|selector_str| {
        let selector = parse_selector(selector_str)?;
        document
            .select(&selector)
            .map(|el| element_text(&el))
            .find(|text| !text.is_empty())
    })
}

/// First non-empty attribute for an ordered (selector, attribute) list
/// over the whole document.
fn doc_attr_facet(document: &Html, pairs: &[(&str, &str)]) -> Option<String> {
    pairs.iter().find_map(|(selector_str, attr)| {
        let selector = parse_selector(selector_str)?;
        document
            .select(&selector)
            .filter_map(|el| el.value().attr(attr))
            .map(str::trim)
            .find(|value| !value.is_empty())
            .map(str::to_string)
    })
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn search_doc(anchors: &[(&str, &str)]) -> String {
        let mut html = String::from("<html><body><div id='results'>");
        for (href, label) in anchors {
            html.push_str(&format!(r#"<div class="card"><a href="{href}">{label}</a></div>"#));
        }
        html.push_str("</div></body></html>");
        html
    }

    // -------------------------------------------------------------------------
    // Handle derivation
    // -------------------------------------------------------------------------

    #[test]
    fn test_handle_from_relative_href() {
        assert_eq!(handle_from_href("/@dancer"), Some("dancer".to_string()));
        assert_eq!(
            handle_from_href("/@dancer?lang=en"),
            Some("dancer".to_string())
        );
        assert_eq!(
            handle_from_href("/@dancer/video/123"),
            Some("dancer".to_string())
        );
    }

    #[test]
    fn test_handle_from_absolute_href() {
        assert_eq!(
            handle_from_href("https://www.tiktok.com/@dancer?lang=en#top"),
            Some("dancer".to_string())
        );
    }

    #[test]
    fn test_handle_rejects_non_entity_links() {
        assert_eq!(handle_from_href("/about"), None);
        assert_eq!(handle_from_href("/@"), None);
        assert_eq!(handle_from_href(""), None);
        assert_eq!(handle_from_href("https://example.com/search?q=@x"), None);
    }

    // -------------------------------------------------------------------------
    // Search extraction
    // -------------------------------------------------------------------------

    /// Query "dance", limit 3, five anchors [a, b, a, c, d]: dedup keeps
    /// the first `a`, order is preserved, truncation yields [a, b, c].
    #[test]
    fn test_dedup_and_truncation_scenario() {
        let html = search_doc(&[
            ("/@a", "A"),
            ("/@b", "B"),
            ("/@a", "A again"),
            ("/@c", "C"),
            ("/@d", "D"),
        ]);

        let records = extract_search_records(&html, 3);

        let handles: Vec<&str> = records.iter().map(|r| r.handle.as_str()).collect();
        assert_eq!(handles, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_duplicate_keeps_first_occurrence_position() {
        let html = search_doc(&[("/@x", "First X"), ("/@y", "Y"), ("/@x", "Second X")]);

        let records = extract_search_records(&html, 10);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].handle, "x");
        assert_eq!(records[0].display_name, "First X");
        assert_eq!(records[1].handle, "y");
    }

    #[test]
    fn test_limit_above_candidate_count_returns_all_without_padding() {
        let html = search_doc(&[("/@one", "One"), ("/@two", "Two")]);

        let records = extract_search_records(&html, 20);

        assert_eq!(records.len(), 2, "no placeholder records are synthesized");
    }

    /// The pipeline owns its own precondition: limit 0 is clamped, not a
    /// crash, even though the facade rejects it earlier.
    #[test]
    fn test_limit_zero_is_defensively_clamped() {
        let html = search_doc(&[("/@one", "One"), ("/@two", "Two")]);

        let records = extract_search_records(&html, 0);
        assert_eq!(records.len(), 1);

        let records = extract_search_records(&html, usize::MAX);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let html = search_doc(&[("/@a", "A"), ("/@b", "B"), ("/@c", "C")]);

        let first = extract_search_records(&html, 10);
        let second = extract_search_records(&html, 10);

        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_document_yields_empty_result() {
        assert!(extract_search_records("", 5).is_empty());
        assert!(extract_search_records("<html><body></body></html>", 5).is_empty());
    }

    /// Handles come from the href path segment, never from anchor text.
    #[test]
    fn test_handle_derived_from_href_not_text() {
        let html = search_doc(&[("/@real_handle", "@fake_handle_in_text")]);

        let records = extract_search_records(&html, 5);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].handle, "real_handle");
    }

    #[test]
    fn test_non_entity_anchors_are_skipped() {
        let html = r#"
            <html><body>
                <a href="/discover">Discover</a>
                <a href="/@only_real_one">Real</a>
                <a href="https://example.com/terms">Terms</a>
            </body></html>
        "#;

        let records = extract_search_records(html, 10);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].handle, "only_real_one");
    }

    // -------------------------------------------------------------------------
    // Facet fallback layers
    // -------------------------------------------------------------------------

    #[test]
    fn test_display_name_prefers_semantic_marker() {
        let html = r#"
            <html><body>
                <a href="/@user1">
                    <span data-e2e="search-user-title">Proper Name</span>
                    <span>other text</span>
                </a>
            </body></html>
        "#;

        let records = extract_search_records(html, 5);
        assert_eq!(records[0].display_name, "Proper Name");
    }

    #[test]
    fn test_display_name_falls_back_to_anchor_text() {
        let html = search_doc(&[("/@user1", "Fallback Name")]);

        let records = extract_search_records(&html, 5);
        assert_eq!(records[0].display_name, "Fallback Name");
    }

    #[test]
    fn test_display_name_defaults_to_handle_when_unresolved() {
        let html = r#"<html><body><a href="/@bare_link"></a></body></html>"#;

        let records = extract_search_records(html, 5);
        assert_eq!(records[0].display_name, "bare_link");
    }

    #[test]
    fn test_avatar_semantic_beats_plain_img() {
        let html = r#"
            <html><body>
                <a href="/@user1">
                    <img src="https://cdn.example.com/banner.jpg"/>
                    <img data-e2e="search-user-avatar" src="https://cdn.example.com/avatar.jpg"/>
                </a>
            </body></html>
        "#;

        let records = extract_search_records(html, 5);
        assert_eq!(records[0].avatar_url, "https://cdn.example.com/avatar.jpg");
    }

    #[test]
    fn test_avatar_from_ancestor_container() {
        // Avatar lives in a sibling column of the card, not in the anchor
        let html = r#"
            <html><body>
                <div class="card">
                    <div class="left"><img src="https://cdn.example.com/side.jpg"/></div>
                    <div class="right"><a href="/@user1">User One</a></div>
                </div>
            </body></html>
        "#;

        let records = extract_search_records(html, 5);
        assert_eq!(records[0].avatar_url, "https://cdn.example.com/side.jpg");
    }

    #[test]
    fn test_avatar_defaults_to_empty() {
        let html = search_doc(&[("/@user1", "No Avatar Here")]);

        let records = extract_search_records(&html, 5);
        assert_eq!(records[0].avatar_url, "");
    }

    #[test]
    fn test_verified_badge_detection() {
        let html = r#"
            <html><body>
                <a href="/@verified_user">V <svg data-e2e="search-user-verified"></svg></a>
                <a href="/@plain_user">P</a>
            </body></html>
        "#;

        let records = extract_search_records(html, 5);

        assert!(records[0].verified);
        assert!(!records[1].verified);
    }

    /// Facets resolve independently: a broken avatar chain does not cost
    /// the display name, and vice versa.
    #[test]
    fn test_facets_do_not_block_each_other() {
        let html = r#"
            <html><body>
                <a href="/@user1"><span data-e2e="user-title">Named, no avatar</span></a>
                <a href="/@user2"><img src="https://cdn.example.com/a2.jpg"/></a>
            </body></html>
        "#;

        let records = extract_search_records(html, 5);

        assert_eq!(records[0].display_name, "Named, no avatar");
        assert_eq!(records[0].avatar_url, "");
        assert_eq!(records[1].display_name, "user2");
        assert_eq!(records[1].avatar_url, "https://cdn.example.com/a2.jpg");
    }

    // -------------------------------------------------------------------------
    // Profile extraction
    // -------------------------------------------------------------------------

    #[test]
    fn test_profile_full_extraction() {
        let html = r#"
            <html><body>
                <h1 data-e2e="user-title">Dance Queen</h1>
                <div data-e2e="user-avatar"><img src="https://cdn.example.com/dq.jpg"/></div>
                <svg data-e2e="user-verified"></svg>
                <h2 data-e2e="user-bio">dancing daily</h2>
                <strong data-e2e="followers-count">1.2M</strong>
                <strong data-e2e="following-count">304</strong>
                <strong data-e2e="likes-count">15.7M</strong>
                <div data-e2e="user-post-item"><a href="/@dance_queen/video/1"><img src="https://cdn.example.com/t1.jpg"/></a></div>
                <div data-e2e="user-post-item"><a href="/@dance_queen/video/2"><img src="https://cdn.example.com/t2.jpg"/></a></div>
            </body></html>
        "#;

        let profile = extract_profile(html, "dance_queen");

        assert_eq!(profile.handle, "dance_queen");
        assert_eq!(profile.display_name, "Dance Queen");
        assert_eq!(profile.avatar_url, "https://cdn.example.com/dq.jpg");
        assert_eq!(profile.biography, "dancing daily");
        assert_eq!(profile.follower_count, "1.2M");
        assert_eq!(profile.following_count, "304");
        assert_eq!(profile.like_count, "15.7M");
        assert!(profile.verified);
        assert_eq!(profile.recent_media.len(), 2);
        assert_eq!(profile.recent_media[0].url, "/@dance_queen/video/1");
        assert_eq!(
            profile.recent_media[0].thumbnail_url,
            "https://cdn.example.com/t1.jpg"
        );
    }

    /// Every facet defaults to empty on total fallback exhaustion instead
    /// of aborting the record.
    #[test]
    fn test_profile_degrades_facet_by_facet() {
        let profile = extract_profile("<html><body></body></html>", "ghost");

        assert_eq!(profile.handle, "ghost");
        assert_eq!(profile.display_name, "ghost");
        assert_eq!(profile.avatar_url, "");
        assert_eq!(profile.biography, "");
        assert_eq!(profile.follower_count, "");
        assert!(!profile.verified);
        assert!(profile.recent_media.is_empty());
    }

    #[test]
    fn test_profile_bio_falls_back_to_meta_description() {
        let html = r#"
            <html>
            <head><meta name="description" content="bio from metadata"/></head>
            <body><h1>Someone</h1></body>
            </html>
        "#;

        let profile = extract_profile(html, "someone");
        assert_eq!(profile.biography, "bio from metadata");
    }

    #[test]
    fn test_profile_counts_fall_back_to_titled_strong() {
        let html = r#"
            <html><body>
                <strong title="Followers">88.5K</strong>
                <strong title="Following">12</strong>
                <strong title="Likes">901.1K</strong>
            </body></html>
        "#;

        let profile = extract_profile(html, "someone");

        assert_eq!(profile.follower_count, "88.5K");
        assert_eq!(profile.following_count, "12");
        assert_eq!(profile.like_count, "901.1K");
    }

    #[test]
    fn test_profile_media_capped_at_five() {
        let mut html = String::from("<html><body>");
        for i in 0..8 {
            html.push_str(&format!(
                r#"<div data-e2e="user-post-item"><a href="/@u/video/{i}"></a></div>"#
            ));
        }
        html.push_str("</body></html>");

        let profile = extract_profile(&html, "u");

        assert_eq!(profile.recent_media.len(), MAX_RECENT_MEDIA);
        assert_eq!(profile.recent_media[0].url, "/@u/video/0");
        assert_eq!(profile.recent_media[4].url, "/@u/video/4");
    }

    #[test]
    fn test_profile_media_generic_video_link_fallback() {
        let html = r#"
            <html><body>
                <a href="/@u/video/42"><img src="https://cdn.example.com/42.jpg"/></a>
            </body></html>
        "#;

        let profile = extract_profile(html, "u");

        assert_eq!(profile.recent_media.len(), 1);
        assert_eq!(profile.recent_media[0].url, "/@u/video/42");
    }

    #[test]
    fn test_profile_extraction_is_deterministic() {
        let html = r#"
            <html><body>
                <h1 data-e2e="user-title">Someone</h1>
                <strong data-e2e="followers-count">5</strong>
            </body></html>
        "#;

        assert_eq!(extract_profile(html, "s"), extract_profile(html, "s"));
    }
}
