//! DOM extraction
//!
//! Each extractor is a self-contained query against one parsed page. They
//! return owned data with raw (not yet downloaded) image URLs so the parsed
//! document never outlives the call.

mod models;
mod overview;
mod specs;

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::core::{Result, ScrapeError};

pub use models::{models, models_link};
pub use overview::{features, gallery_links, name, overview_articles, overview_top};
pub use specs::{specifications, specs_link};

/// Container for the series header on product pages
pub(crate) const SERIES_TOP: &str = "#ctl00_PlaceHolderMain_SeriesTopInformation";

/// A parsed page together with the URL it was loaded from
pub struct Document {
    html: Html,
    base: Url,
}

impl Document {
    /// Parse `html` that was served from `url`
    pub fn parse(url: &str, html: &str) -> Result<Self> {
        Ok(Self {
            html: Html::parse_document(html),
            base: Url::parse(url)?,
        })
    }

    /// All elements matching `css`, in document order
    pub fn select_all(&self, css: &str) -> Result<Vec<ElementRef<'_>>> {
        let sel = selector(css)?;
        Ok(self.html.select(&sel).collect())
    }

    /// First element matching `css`
    pub fn select_first(&self, css: &str) -> Result<Option<ElementRef<'_>>> {
        let sel = selector(css)?;
        Ok(self.html.select(&sel).next())
    }

    /// Resolve an attribute value the way the DOM's `href`/`src` properties do
    pub fn resolve(&self, raw: &str) -> Option<String> {
        self.base.join(raw.trim()).ok().map(String::from)
    }

    /// Resolved value of `attr` on `el`
    pub fn resolved_attr(&self, el: ElementRef<'_>, attr: &str) -> Option<String> {
        el.value().attr(attr).and_then(|raw| self.resolve(raw))
    }
}

/// Compile a CSS selector
pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector {
        selector: css.to_string(),
        message: format!("{:?}", e),
    })
}

/// Concatenated descendant text, like the DOM's `textContent`
pub fn text_content(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// `textContent` of the first descendant of `el` matching `sel`
pub fn child_text(el: ElementRef<'_>, sel: &Selector) -> Option<String> {
    el.select(sel).next().map(text_content)
}

/// Resolved target of the first secondary-nav link whose href ends with `suffix`
pub(crate) fn secondary_nav_link(doc: &Document, suffix: &str) -> Result<Option<String>> {
    let css = format!("nav.secondNav a[href$=\"{}\"]", suffix);
    Ok(doc
        .select_first(&css)?
        .and_then(|el| doc.resolved_attr(el, "href")))
}

/// Strip a single trailing newline
pub(crate) fn strip_trailing_newline(s: &str) -> String {
    s.strip_suffix('\n').unwrap_or(s).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_protocol_relative() {
        let doc = Document::parse("https://agriculture.newholland.com/lar/pt-br/x", "").unwrap();
        assert_eq!(
            doc.resolve("//assets.cnhindustrial.com/a/b.jpg").as_deref(),
            Some("https://assets.cnhindustrial.com/a/b.jpg")
        );
        assert_eq!(
            doc.resolve("modelos").as_deref(),
            Some("https://agriculture.newholland.com/lar/pt-br/modelos")
        );
    }

    #[test]
    fn test_text_content_concatenates() {
        let doc = Document::parse(
            "https://example.com/",
            "<p id='x'>Motor <b>FPT</b> 4 cilindros</p>",
        )
        .unwrap();
        let el = doc.select_first("#x").unwrap().unwrap();
        assert_eq!(text_content(el), "Motor FPT 4 cilindros");
    }

    #[test]
    fn test_invalid_selector() {
        let doc = Document::parse("https://example.com/", "").unwrap();
        let err = doc.select_all("div[").unwrap_err();
        assert!(matches!(err, ScrapeError::Selector { .. }));
    }

    #[test]
    fn test_strip_trailing_newline() {
        assert_eq!(strip_trailing_newline("Motor\n"), "Motor");
        assert_eq!(strip_trailing_newline("Motor\n\n"), "Motor\n");
        assert_eq!(strip_trailing_newline("Motor"), "Motor");
    }
}
