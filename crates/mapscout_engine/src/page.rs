//! Capability contracts the pipeline drives: a navigable page controller and
//! a selector-queryable document.
//!
//! Discovery and extraction depend only on these traits, so a browser driver
//! and a plain HTTP fetch + parse pair are interchangeable.

use std::time::Duration;

use scraper::{ElementRef, Html, Selector};

use crate::ControllerError;

/// Opaque handle to an element located by a [`PageController`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle {
    selector: String,
}

impl ElementHandle {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
        }
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }
}

/// Rendered source of the page a controller currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSnapshot {
    pub url: String,
    pub html: String,
}

impl PageSnapshot {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }

    /// Parses the snapshot. The parsed tree is not `Send`; keep it out of
    /// `.await` points.
    pub fn document(&self) -> HtmlDocument {
        HtmlDocument::parse(&self.html)
    }
}

#[async_trait::async_trait]
pub trait PageController: Send {
    async fn navigate(&mut self, url: &str) -> Result<(), ControllerError>;

    async fn current_document(&mut self) -> Result<PageSnapshot, ControllerError>;

    /// Waits up to `timeout` for `selector` to appear. `Ok(None)` means it
    /// never did.
    async fn locate(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Option<ElementHandle>, ControllerError>;

    /// Drags `element` vertically by `offset` pixels.
    async fn scroll_gesture(
        &mut self,
        element: &ElementHandle,
        offset: i32,
    ) -> Result<(), ControllerError>;

    async fn release(&mut self) -> Result<(), ControllerError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("invalid selector `{selector}`: {message}")]
    InvalidSelector { selector: String, message: String },
}

/// Detached copy of a matched element: its text and attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    text: String,
    attributes: Vec<(String, String)>,
}

impl Node {
    pub fn new(text: impl Into<String>, attributes: Vec<(String, String)>) -> Self {
        Self {
            text: text.into(),
            attributes,
        }
    }

    /// Text content with each text fragment trimmed, joined by single spaces.
    ///
    /// `<a>ул. <b>Баумана</b>, 12</a>` reads `ул. Баумана , 12`: fragments split
    /// by markup are never glued together without a separator.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    fn from_element(element: ElementRef<'_>) -> Self {
        let text = element
            .text()
            .map(str::trim)
            .filter(|fragment| !fragment.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let attributes = element
            .value()
            .attrs()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Self { text, attributes }
    }
}

pub trait Document {
    fn select_first(&self, selector: &str) -> Result<Option<Node>, DocumentError>;

    fn select_all(&self, selector: &str) -> Result<Vec<Node>, DocumentError>;
}

/// [`Document`] backed by the `scraper` HTML parser.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }
}

impl Document for HtmlDocument {
    fn select_first(&self, selector: &str) -> Result<Option<Node>, DocumentError> {
        let parsed = parse_selector(selector)?;
        Ok(self.html.select(&parsed).next().map(Node::from_element))
    }

    fn select_all(&self, selector: &str) -> Result<Vec<Node>, DocumentError> {
        let parsed = parse_selector(selector)?;
        Ok(self.html.select(&parsed).map(Node::from_element).collect())
    }
}

fn parse_selector(selector: &str) -> Result<Selector, DocumentError> {
    Selector::parse(selector).map_err(|err| DocumentError::InvalidSelector {
        selector: selector.to_string(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{Document, HtmlDocument};

    #[test]
    fn text_fragments_are_trimmed_and_joined() {
        let doc = HtmlDocument::parse(
            "<div class=\"addr\"><a href=\"/x\">\n  ул. Баумана,\n <span> 12 </span></a></div>",
        );
        let node = doc.select_first("div.addr a").unwrap().unwrap();
        assert_eq!(node.text(), "ул. Баумана, 12");
        assert_eq!(node.attribute("href"), Some("/x"));
        assert_eq!(node.attribute("HREF"), Some("/x"));
        assert_eq!(node.attribute("title"), None);
    }

    #[test]
    fn fragments_split_by_markup_keep_a_separator() {
        let doc =
            HtmlDocument::parse("<a>ул. <b>Баумана</b>, 12</a><p>+7 <span>843</span>200</p>");
        let address = doc.select_first("a").unwrap().unwrap();
        let phone = doc.select_first("p").unwrap().unwrap();
        assert_eq!(address.text(), "ул. Баумана , 12");
        assert_eq!(phone.text(), "+7 843 200");
    }

    #[test]
    fn select_all_keeps_document_order() {
        let doc = HtmlDocument::parse("<p>a</p><p>b</p><p>c</p>");
        let texts: Vec<_> = doc
            .select_all("p")
            .unwrap()
            .iter()
            .map(|n| n.text().to_string())
            .collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn invalid_selector_is_an_error() {
        let doc = HtmlDocument::parse("<p>a</p>");
        assert!(doc.select_first("p[").is_err());
        assert!(doc.select_all(":::").is_err());
    }

    #[test]
    fn missing_element_is_none() {
        let doc = HtmlDocument::parse("<p>a</p>");
        assert_eq!(doc.select_first("h1").unwrap(), None);
    }
}
