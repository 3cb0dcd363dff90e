//! URL layout of the source site
//!
//! This module knows where every page lives (listings, detail pages,
//! timelines, profiles) and how to read stable identifiers back out of the
//! relative links found in markup.

mod paths;

pub use paths::{last_segment, numeric_segment_after};

use url::Url;

/// Listing path for every collective
const COLLECTIVES_PATH: &str = "/collectives-all";

/// Root URL of the source site plus page URL builders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    base: Url,
}

impl Site {
    /// Creates a site rooted at the scheme and host of `base_url`
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        let mut base = Url::parse(base_url)?;
        base.set_path("/");
        base.set_query(None);
        base.set_fragment(None);
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Resolves an href found in markup to an absolute http(s) URL
    ///
    /// Returns None for empty, fragment-only, `javascript:`, `mailto:`, `tel:`
    /// and `data:` links, and for anything that does not resolve.
    pub fn resolve(&self, href: &str) -> Option<String> {
        let href = href.trim();

        if href.is_empty() || href.starts_with('#') {
            return None;
        }

        if href.starts_with("javascript:")
            || href.starts_with("mailto:")
            || href.starts_with("tel:")
            || href.starts_with("data:")
        {
            return None;
        }

        match self.base.join(href) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Some(url.to_string()),
            _ => None,
        }
    }

    /// The page listing every collective
    pub fn collectives_url(&self) -> String {
        self.path_url(COLLECTIVES_PATH)
    }

    /// One page of a collective's tag tab
    pub fn collective_tags_url(&self, collective_url: &str, page: u32, page_size: u32) -> String {
        match Url::parse(collective_url) {
            Ok(mut url) => {
                url.set_query(None);
                url.query_pairs_mut()
                    .append_pair("tab", "tags")
                    .append_pair("page", &page.to_string())
                    .append_pair("pagesize", &page_size.to_string());
                url.to_string()
            }
            Err(_) => format!(
                "{}?tab=tags&page={}&pagesize={}",
                collective_url, page, page_size
            ),
        }
    }

    /// One page of the question listing
    ///
    /// With tags the tagged listing sorted by recent activity is used,
    /// otherwise the active tab.
    pub fn questions_url(&self, page: u32, page_size: u32, tags: &[String]) -> String {
        let mut url = self.base.clone();

        if tags.is_empty() {
            url.set_path("/questions");
            url.query_pairs_mut()
                .append_pair("tab", "Active")
                .append_pair("page", &page.to_string())
                .append_pair("pagesize", &page_size.to_string());
        } else {
            if let Ok(mut segments) = url.path_segments_mut() {
                segments
                    .clear()
                    .push("questions")
                    .push("tagged")
                    .push(&tags.join("+"));
            }
            url.query_pairs_mut()
                .append_pair("sort", "RecentActivity")
                .append_pair("edited", "true")
                .append_pair("page", &page.to_string())
                .append_pair("pagesize", &page_size.to_string());
        }

        url.to_string()
    }

    /// Detail page of one question
    pub fn question_url(&self, question_id: u64) -> String {
        self.path_url(&format!("/questions/{}", question_id))
    }

    /// Lifecycle event timeline of one post
    pub fn timeline_url(&self, post_id: u64) -> String {
        self.path_url(&format!("/posts/{}/timeline", post_id))
    }

    /// Short permalink of one answer (redirects to its question page)
    pub fn answer_url(&self, answer_id: u64) -> String {
        self.path_url(&format!("/a/{}", answer_id))
    }

    fn path_url(&self, path: &str) -> String {
        let mut url = self.base.clone();
        url.set_path(path);
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> Site {
        Site::new("https://stackoverflow.com").unwrap()
    }

    #[test]
    fn test_base_is_reduced_to_origin() {
        let site = Site::new("https://stackoverflow.com/questions?x=1#top").unwrap();
        assert_eq!(site.base().as_str(), "https://stackoverflow.com/");
    }

    #[test]
    fn test_resolve_relative_link() {
        assert_eq!(
            site().resolve("/users/22656/jon-skeet"),
            Some("https://stackoverflow.com/users/22656/jon-skeet".to_string())
        );
    }

    #[test]
    fn test_resolve_keeps_absolute_link() {
        assert_eq!(
            site().resolve("https://github.com/aws"),
            Some("https://github.com/aws".to_string())
        );
    }

    #[test]
    fn test_resolve_skips_special_schemes() {
        assert_eq!(site().resolve("javascript:void(0)"), None);
        assert_eq!(site().resolve("mailto:x@example.com"), None);
        assert_eq!(site().resolve("#answers"), None);
        assert_eq!(site().resolve("   "), None);
    }

    #[test]
    fn test_questions_url_without_tags() {
        assert_eq!(
            site().questions_url(2, 15, &[]),
            "https://stackoverflow.com/questions?tab=Active&page=2&pagesize=15"
        );
    }

    #[test]
    fn test_questions_url_with_tags() {
        let tags = vec!["python".to_string(), "flask".to_string()];
        assert_eq!(
            site().questions_url(1, 30, &tags),
            "https://stackoverflow.com/questions/tagged/python+flask?sort=RecentActivity&edited=true&page=1&pagesize=30"
        );
    }

    #[test]
    fn test_questions_url_encodes_tag_characters() {
        let tags = vec!["c#".to_string()];
        let url = site().questions_url(1, 30, &tags);
        assert!(url.starts_with("https://stackoverflow.com/questions/tagged/c%23?"));
    }

    #[test]
    fn test_detail_urls() {
        let site = site();
        assert_eq!(
            site.question_url(11227809),
            "https://stackoverflow.com/questions/11227809"
        );
        assert_eq!(
            site.timeline_url(11227809),
            "https://stackoverflow.com/posts/11227809/timeline"
        );
        assert_eq!(site.answer_url(42), "https://stackoverflow.com/a/42");
        assert_eq!(
            site.collectives_url(),
            "https://stackoverflow.com/collectives-all"
        );
    }

    #[test]
    fn test_collective_tags_url() {
        assert_eq!(
            site().collective_tags_url("https://stackoverflow.com/collectives/go", 3, 30),
            "https://stackoverflow.com/collectives/go?tab=tags&page=3&pagesize=30"
        );
    }
}
