//! Product records produced by a scrape
//!
//! Optional fields are omitted from the JSON when the page had no matching
//! markup.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::{Deserialize, Deserializer};

/// Everything scraped for one product page
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub features: Vec<Feature>,
    /// Local paths of the downloaded gallery images
    #[serde(default)]
    pub gallery: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview_top: Option<String>,
    #[serde(default)]
    pub overview_articles: Vec<OverviewArticle>,
    /// Present only when the page links to a models page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<Model>>,
    /// Present only when the page links to a technical specifications page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specifications: Option<Vec<SpecificationGroup>>,
}

/// A feature blurb from the series header
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, Deserialize)]
pub struct Feature {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An overview article; `image` is a URL until downloaded, a local path after
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, Deserialize)]
pub struct OverviewArticle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A model card from the models page
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub attributes: ModelAttributes,
}

/// One collapsible section of the technical specifications page
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, Deserialize)]
pub struct SpecificationGroup {
    pub item: String,
    pub attributes: Vec<SpecificationAttribute>,
}

/// A specification row with its value for every model column
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, Deserialize)]
pub struct SpecificationAttribute {
    pub name: String,
    pub models: Vec<ModelValue>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, Deserialize)]
pub struct ModelValue {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Key/value table of a model card, kept in page order.
///
/// Serializes as a JSON object. Inserting an existing key replaces its value
/// but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelAttributes {
    entries: Vec<(String, String)>,
}

impl ModelAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ModelAttributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ModelAttributes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let map = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
        let mut attributes = ModelAttributes::new();
        for (k, v) in map {
            let value = match v {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            attributes.insert(k, value);
        }
        Ok(attributes)
    }
}

impl Product {
    /// Number of local image paths referenced by this product
    pub fn image_count(&self) -> usize {
        let articles = self
            .overview_articles
            .iter()
            .filter(|a| a.image.is_some())
            .count();
        let models = self
            .models
            .as_ref()
            .map(|m| m.iter().filter(|m| m.image.is_some()).count())
            .unwrap_or(0);
        self.gallery.len() + articles + models
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_fields_are_omitted() {
        let product = Product {
            name: Some("T7".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&product).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj["name"], "T7");
        assert!(obj.contains_key("features"));
        assert!(obj.contains_key("overviewArticles"));
        assert!(!obj.contains_key("overviewTop"));
        assert!(!obj.contains_key("models"));
        assert!(!obj.contains_key("specifications"));
    }

    #[test]
    fn test_attributes_keep_order_and_overwrite() {
        let mut attrs = ModelAttributes::new();
        attrs.insert("Potência", "75 cv");
        attrs.insert("Cilindros", "4");
        attrs.insert("Potência", "78 cv");

        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("Potência"), Some("78 cv"));
        let json = serde_json::to_string(&attrs).unwrap();
        assert_eq!(json, r#"{"Potência":"78 cv","Cilindros":"4"}"#);
    }

    #[test]
    fn test_image_count() {
        let product = Product {
            gallery: vec!["a".into(), "b".into()],
            overview_articles: vec![
                OverviewArticle {
                    image: Some("c".into()),
                    ..Default::default()
                },
                OverviewArticle::default(),
            ],
            models: Some(vec![Model {
                image: Some("d".into()),
                ..Default::default()
            }]),
            ..Default::default()
        };
        assert_eq!(product.image_count(), 4);
    }

    #[test]
    fn test_model_value_without_value() {
        let value = ModelValue {
            name: "T7.245".to_string(),
            value: None,
        };
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"name":"T7.245"}"#);
    }
}
