//! Product page header and overview

use crate::core::{Feature, OverviewArticle, Result};
use crate::extract::{
    child_text, selector, strip_trailing_newline, text_content, Document, SERIES_TOP,
};

const OVERVIEW_TOP: &str =
    "#ctl00_PlaceHolderMain_EditModePropertiesTop_TopContent__ControlWrapper_RichHtmlField";

/// Series name from the page header
pub fn name(doc: &Document) -> Result<Option<String>> {
    Ok(doc
        .select_first(&format!("{} .title", SERIES_TOP))?
        .map(text_content))
}

/// Feature blurbs below the series header
pub fn features(doc: &Document) -> Result<Vec<Feature>> {
    let h3 = selector("h3")?;
    let p = selector("p")?;

    Ok(doc
        .select_all(&format!("{} div.arrow.block.d12", SERIES_TOP))?
        .into_iter()
        .map(|el| Feature {
            title: child_text(el, &h3),
            description: child_text(el, &p),
        })
        .collect())
}

/// Resolved URLs of the slideshow images hosted on the asset server
pub fn gallery_links(doc: &Document, asset_prefix: &str) -> Result<Vec<String>> {
    let css = format!(
        "{} div.slideshow-content a[href^=\"{}\"]",
        SERIES_TOP, asset_prefix
    );
    Ok(doc
        .select_all(&css)?
        .into_iter()
        .filter_map(|el| doc.resolved_attr(el, "href"))
        .collect())
}

/// Introductory rich text, normalized
pub fn overview_top(doc: &Document) -> Result<Option<String>> {
    Ok(doc
        .select_first(OVERVIEW_TOP)?
        .map(|el| normalize_overview(&text_content(el))))
}

/// Trim, drop non-breaking and zero-width spaces, then one trailing newline
pub(crate) fn normalize_overview(text: &str) -> String {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| *c != '\u{00a0}' && *c != '\u{200b}')
        .collect();
    strip_trailing_newline(&cleaned)
}

/// Overview articles; `image` holds the resolved remote URL
pub fn overview_articles(doc: &Document, asset_prefix: &str) -> Result<Vec<OverviewArticle>> {
    let title = selector("div.text h3.title")?;
    let text = selector("div.text p")?;
    let image = selector(&format!("img[src^=\"{}\"]", asset_prefix))?;

    Ok(doc
        .select_all("article.block.d24.line")?
        .into_iter()
        .map(|el| OverviewArticle {
            title: child_text(el, &title),
            text: child_text(el, &text),
            image: el
                .select(&image)
                .next()
                .and_then(|img| doc.resolved_attr(img, "src")),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "//assets.cnhindustrial.com";

    fn page(body: &str) -> Document {
        Document::parse(
            "https://agriculture.newholland.com/lar/pt-br/equipamento/produtos/tl/t7-lwb",
            &format!("<html><body>{}</body></html>", body),
        )
        .unwrap()
    }

    #[test]
    fn test_name() {
        let doc = page(
            r#"<div id="ctl00_PlaceHolderMain_SeriesTopInformation">
                 <h1 class="title">T7 LWB</h1>
               </div>
               <h1 class="title">Other</h1>"#,
        );
        assert_eq!(name(&doc).unwrap().as_deref(), Some("T7 LWB"));
    }

    #[test]
    fn test_name_missing() {
        let doc = page("<h1 class='title'>Outside</h1>");
        assert_eq!(name(&doc).unwrap(), None);
    }

    #[test]
    fn test_features_partial() {
        let doc = page(
            r#"<div id="ctl00_PlaceHolderMain_SeriesTopInformation">
                 <div class="arrow block d12"><h3>Cabine</h3><p>Horizon</p></div>
                 <div class="arrow block d12"><h3>Motor</h3></div>
               </div>"#,
        );
        let features = features(&doc).unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].title.as_deref(), Some("Cabine"));
        assert_eq!(features[0].description.as_deref(), Some("Horizon"));
        assert_eq!(features[1].description, None);
    }

    #[test]
    fn test_gallery_filters_by_prefix() {
        let doc = page(
            r#"<div id="ctl00_PlaceHolderMain_SeriesTopInformation">
                 <div class="slideshow-content">
                   <a href="//assets.cnhindustrial.com/nh/1.jpg">1</a>
                   <a href="https://cdn.other.com/2.jpg">2</a>
                   <a href="//assets.cnhindustrial.com/nh/3.jpg">3</a>
                 </div>
               </div>"#,
        );
        assert_eq!(
            gallery_links(&doc, PREFIX).unwrap(),
            vec![
                "https://assets.cnhindustrial.com/nh/1.jpg",
                "https://assets.cnhindustrial.com/nh/3.jpg"
            ]
        );
    }

    #[test]
    fn test_normalize_overview() {
        assert_eq!(
            normalize_overview("\n  Potência\u{00a0}e\u{200b} conforto\n  "),
            "Potênciae conforto"
        );
        assert_eq!(normalize_overview("a\u{200b}\n"), "a");
    }

    #[test]
    fn test_overview_articles() {
        let doc = page(
            r#"<article class="block d24 line">
                 <img src="//assets.cnhindustrial.com/nh/cab.jpg">
                 <div class="text"><h3 class="title">Cabine</h3><p>Ampla</p></div>
               </article>
               <article class="block d24 line">
                 <img src="/local.jpg">
                 <div class="text"><p>Sem título</p></div>
               </article>"#,
        );
        let articles = overview_articles(&doc, PREFIX).unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(
            articles[0].image.as_deref(),
            Some("https://assets.cnhindustrial.com/nh/cab.jpg")
        );
        assert_eq!(articles[1].title, None);
        assert_eq!(articles[1].text.as_deref(), Some("Sem título"));
        assert_eq!(articles[1].image, None);
    }
}
