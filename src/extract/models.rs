//! Models sub-page

use crate::core::{Model, ModelAttributes, Result};
use crate::extract::{child_text, secondary_nav_link, selector, text_content, Document};

/// Link to the models sub-page, if the product has one
pub fn models_link(doc: &Document, suffix: &str) -> Result<Option<String>> {
    secondary_nav_link(doc, suffix)
}

/// Model cards; `image` holds the resolved remote URL
pub fn models(doc: &Document, asset_prefix: &str) -> Result<Vec<Model>> {
    let name = selector("h3.text-title")?;
    let image = selector(&format!("img[src^=\"{}\"]", asset_prefix))?;
    let rows = selector("table.model-table > tbody > tr")?;
    let key_cell = selector("td:nth-child(1)")?;
    let value_cell = selector("td:nth-child(2)")?;

    Ok(doc
        .select_all("div.card.scheda-mod")?
        .into_iter()
        .map(|card| {
            let mut attributes = ModelAttributes::new();
            for row in card.select(&rows) {
                let key = row.select(&key_cell).next().map(text_content);
                let value = row.select(&value_cell).next().map(text_content);
                if let (Some(key), Some(value)) = (key, value) {
                    attributes.insert(key, value);
                }
            }

            Model {
                name: child_text(card, &name),
                image: card
                    .select(&image)
                    .next()
                    .and_then(|img| doc.resolved_attr(img, "src")),
                attributes,
            }
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
    fn test_models_link() {
        let doc = page(
            r#"<nav class="secondNav">
                 <a href="t7-lwb/visao-geral">Visão geral</a>
                 <a href="t7-lwb/modelos">Modelos</a>
                 <a href="t7-lwb/especificacoes-tecnicas">Especificações</a>
               </nav>"#,
        );
        assert_eq!(
            models_link(&doc, "modelos").unwrap().as_deref(),
            Some("https://agriculture.newholland.com/lar/pt-br/equipamento/produtos/tl/t7-lwb/modelos")
        );
        assert_eq!(models_link(&doc, "acessorios").unwrap(), None);
    }

    #[test]
    fn test_link_outside_secondary_nav_is_ignored() {
        let doc = page(r#"<nav class="main"><a href="x/modelos">Modelos</a></nav>"#);
        assert_eq!(models_link(&doc, "modelos").unwrap(), None);
    }

    #[test]
    fn test_model_cards() {
        let doc = page(
            r#"<div class="card scheda-mod">
                 <h3 class="text-title">T7.245</h3>
                 <img src="//assets.cnhindustrial.com/nh/t7-245.png">
                 <table class="model-table">
                   <tr><td>Potência máxima</td><td>245 cv</td></tr>
                   <tr><td>Cilindros</td><td>6</td></tr>
                   <tr><td>Incompleto</td></tr>
                 </table>
               </div>
               <div class="card scheda-mod">
                 <h3 class="text-title">T7.260</h3>
               </div>"#,
        );
        let models = models(&doc, PREFIX).unwrap();
        assert_eq!(models.len(), 2);

        let first = &models[0];
        assert_eq!(first.name.as_deref(), Some("T7.245"));
        assert_eq!(
            first.image.as_deref(),
            Some("https://assets.cnhindustrial.com/nh/t7-245.png")
        );
        assert_eq!(first.attributes.len(), 2);
        assert_eq!(first.attributes.get("Cilindros"), Some("6"));

        assert!(models[1].attributes.is_empty());
        assert_eq!(models[1].image, None);
    }

    #[test]
    fn test_incomplete_rows_keep_earlier_values() {
        let doc = page(
            r#"<div class="card scheda-mod">
                 <table class="model-table">
                   <tr><td>Cilindros</td><td>6</td></tr>
                   <tr><td>Cilindros</td></tr>
                   <tr><th>Sem chave</th><td>245 cv</td></tr>
                 </table>
               </div>"#,
        );
        let models = models(&doc, PREFIX).unwrap();
        let attributes = &models[0].attributes;

        assert_eq!(attributes.len(), 1);
        assert_eq!(attributes.get("Cilindros"), Some("6"));
        assert_eq!(attributes.get("undefined"), None);
    }
}
