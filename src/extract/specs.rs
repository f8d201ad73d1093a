//! Technical specifications sub-page
//!
//! Each section is a `div.multi-trigger.text` header followed by a sibling
//! holding two tables: `div.headcol` with the row names and `div.tableCont`
//! with one column per model.

use scraper::ElementRef;

use crate::core::{ModelValue, Result, SpecificationAttribute, SpecificationGroup};
use crate::extract::{secondary_nav_link, selector, strip_trailing_newline, text_content, Document};

/// Link to the technical specifications sub-page, if the product has one
pub fn specs_link(doc: &Document, suffix: &str) -> Result<Option<String>> {
    secondary_nav_link(doc, suffix)
}

/// Specification sections in page order
pub fn specifications(doc: &Document) -> Result<Vec<SpecificationGroup>> {
    let columns = selector("div.tableCont table thead th")?;
    let rows = selector("div.tableCont table tbody tr")?;
    let cells = selector("td.cell")?;
    let row_names = selector("div.headcol table > tbody > tr > td:nth-child(1)")?;

    Ok(doc
        .select_all("div.multi-trigger.text")?
        .into_iter()
        .map(|trigger| {
            let item = strip_trailing_newline(&text_content(trigger));

            let Some(body) = next_element_sibling(trigger) else {
                return SpecificationGroup {
                    item,
                    attributes: Vec::new(),
                };
            };

            let cols: Vec<String> = body.select(&columns).map(text_content).collect();
            let grid: Vec<Vec<String>> = body
                .select(&rows)
                .map(|tr| tr.select(&cells).map(text_content).collect())
                .collect();

            let attributes = body
                .select(&row_names)
                .map(text_content)
                .enumerate()
                .map(|(i, name)| SpecificationAttribute {
                    name,
                    models: cols
                        .iter()
                        .enumerate()
                        .map(|(j, col)| ModelValue {
                            name: col.clone(),
                            value: grid.get(i).and_then(|row| row.get(j)).cloned(),
                        })
                        .collect(),
                })
                .collect();

            SpecificationGroup { item, attributes }
        })
        .collect())
}

fn next_element_sibling(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.next_siblings().find_map(ElementRef::wrap)
}
