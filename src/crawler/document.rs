//! Queryable, read-only view of a fetched page
//!
//! Every extractor programs against the [`Query`] capability set (find by tag
//! and class, CSS selector lookup) plus the attribute and text accessors on
//! [`Element`]. Nothing outside this module touches `scraper` directly.

use scraper::{ElementRef, Html, Selector};

/// A parsed HTML page
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses a full HTML document; malformed markup is repaired, never rejected
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// The `<html>` element
    pub fn root(&self) -> Element<'_> {
        Element {
            inner: self.html.root_element(),
        }
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document").finish_non_exhaustive()
    }
}

/// One element of a [`Document`]
#[derive(Clone, Copy)]
pub struct Element<'a> {
    inner: ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Tag name, lower-cased
    pub fn name(&self) -> &'a str {
        self.inner.value().name()
    }

    /// Attribute value, if present
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.inner.value().attr(name)
    }

    /// Attribute value, if present and not blank
    pub fn attr_nonempty(&self, name: &str) -> Option<&'a str> {
        self.attr(name).map(str::trim).filter(|v| !v.is_empty())
    }

    /// Descendant text with whitespace runs collapsed and ends trimmed
    pub fn text(&self) -> String {
        self.inner
            .text()
            .flat_map(str::split_whitespace)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Whether the element carries the given class token
    pub fn has_class(&self, class: &str) -> bool {
        self.inner.value().classes().any(|c| c == class)
    }

    /// Serialized markup of the element including itself
    pub fn html(&self) -> String {
        self.inner.html()
    }

    /// The next sibling that is an element
    pub fn next_element(&self) -> Option<Element<'a>> {
        self.inner
            .next_siblings()
            .find_map(ElementRef::wrap)
            .map(|inner| Element { inner })
    }
}

impl std::fmt::Debug for Element<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}

/// Lookup capability shared by whole documents and scoped elements
///
/// Element lookups only search descendants, never the element itself.
pub trait Query<'a>: Copy {
    /// All matches of a CSS selector, in document order
    fn select_all(self, css: &str) -> Vec<Element<'a>>;

    /// First match of a CSS selector
    fn select_one(self, css: &str) -> Option<Element<'a>> {
        self.select_all(css).into_iter().next()
    }

    /// First element with the given tag carrying every listed class
    fn find_first(self, tag: &str, classes: &[&str]) -> Option<Element<'a>> {
        self.select_one(&class_selector(tag, classes))
    }

    /// Every element with the given tag carrying every listed class
    fn find_all(self, tag: &str, classes: &[&str]) -> Vec<Element<'a>> {
        self.select_all(&class_selector(tag, classes))
    }
}

impl<'a> Query<'a> for &'a Document {
    fn select_all(self, css: &str) -> Vec<Element<'a>> {
        match compile(css) {
            Some(selector) => self
                .html
                .select(&selector)
                .map(|inner| Element { inner })
                .collect(),
            None => Vec::new(),
        }
    }
}

impl<'a> Query<'a> for Element<'a> {
    fn select_all(self, css: &str) -> Vec<Element<'a>> {
        match compile(css) {
            Some(selector) => self
                .inner
                .select(&selector)
                .map(|inner| Element { inner })
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Builds `tag.class1.class2` from a tag and class list
fn class_selector(tag: &str, classes: &[&str]) -> String {
    let mut css = tag.to_string();
    for class in classes {
        css.push('.');
        css.push_str(class);
    }
    css
}

fn compile(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::debug!("Invalid selector {:?}: {:?}", css, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
            <div class="card main" data-id="7">
                <a class="js-gps-track" href="/collectives/go">  Go
                    Language </a>
                <span title="reputation score 1,234">1.2k</span>
            </div>
            <div class="card">
                <h2 class="mb0">Answers</h2>
                <div>3</div>
            </div>
        </body></html>
    "#;

    #[test]
    fn test_find_first_by_tag_and_classes() {
        let doc = Document::parse(PAGE);
        let card = doc.find_first("div", &["card", "main"]).unwrap();
        assert_eq!(card.attr("data-id"), Some("7"));
        assert!(card.has_class("main"));
    }

    #[test]
    fn test_find_all_matches_class_subset() {
        let doc = Document::parse(PAGE);
        assert_eq!(doc.find_all("div", &["card"]).len(), 2);
    }

    #[test]
    fn test_text_collapses_whitespace() {
        let doc = Document::parse(PAGE);
        let link = doc.select_one("a.js-gps-track").unwrap();
        assert_eq!(link.text(), "Go Language");
    }

    #[test]
    fn test_scoped_lookup_searches_descendants_only() {
        let doc = Document::parse(PAGE);
        let card = doc.find_first("div", &["main"]).unwrap();
        assert!(card.select_one("h2").is_none());
        assert!(card.select_one("span[title^='reputation score']").is_some());
    }

    #[test]
    fn test_next_element_skips_text_nodes() {
        let doc = Document::parse(PAGE);
        let heading = doc.find_first("h2", &["mb0"]).unwrap();
        let count = heading.next_element().unwrap();
        assert_eq!(count.name(), "div");
        assert_eq!(count.text(), "3");
    }

    #[test]
    fn test_invalid_selector_matches_nothing() {
        let doc = Document::parse(PAGE);
        assert!(doc.select_all("div[[").is_empty());
        assert!(doc.select_one("div[[").is_none());
    }

    #[test]
    fn test_attr_nonempty_filters_blank_values() {
        let doc = Document::parse(r#"<a id="x" href="  " data-url="https://go.dev">x</a>"#);
        let link = doc.select_one("a#x").unwrap();
        assert_eq!(link.attr_nonempty("href"), None);
        assert_eq!(link.attr_nonempty("data-url"), Some("https://go.dev"));
    }
}
