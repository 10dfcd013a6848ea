//! Wrapping features into the named FeatureCollection that gets written out.

use std::fs;
use std::path::Path;

use geojson::FeatureCollection;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ZoneError;
use crate::features::Feature;

/// Localized names attached to the top level of the collection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CollectionMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub name_en: String,
    #[serde(default)]
    pub name_ko: String,
    #[serde(default)]
    pub name_zh_hans: String,
    #[serde(default)]
    pub name_zh_hant: String,
    #[serde(default)]
    pub name_ja: String,
    #[serde(default)]
    pub name_id: String,
    #[serde(default)]
    pub name_vi: String,
    #[serde(default)]
    pub name_km: String,
}

impl Default for CollectionMetadata {
    fn default() -> Self {
        Self {
            name: "VietNam".to_owned(),
            name_en: "VietNam".to_owned(),
            name_ko: String::new(),
            name_zh_hans: String::new(),
            name_zh_hant: String::new(),
            name_ja: String::new(),
            name_id: String::new(),
            name_vi: "Việt Nam".to_owned(),
            name_km: String::new(),
        }
    }
}

impl CollectionMetadata {
    /// Loads metadata from a TOML file. Fields left out are empty.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneError::Io`] if the file cannot be read and
    /// [`ZoneError::Metadata`] if it is not valid TOML.
    pub fn from_toml_path(path: &Path) -> Result<Self, ZoneError> {
        let text = fs::read_to_string(path).map_err(|e| ZoneError::io(path, e))?;
        toml::from_str(&text).map_err(|source| ZoneError::Metadata {
            path: path.to_path_buf(),
            source,
        })
    }

    fn fields(&self) -> [(&'static str, &str); 9] {
        [
            ("name", self.name.as_str()),
            ("name_en", self.name_en.as_str()),
            ("name_ko", self.name_ko.as_str()),
            ("name_zh_hans", self.name_zh_hans.as_str()),
            ("name_zh_hant", self.name_zh_hant.as_str()),
            ("name_ja", self.name_ja.as_str()),
            ("name_id", self.name_id.as_str()),
            ("name_vi", self.name_vi.as_str()),
            ("name_km", self.name_km.as_str()),
        ]
    }
}

/// A named, ordered set of features.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub metadata: CollectionMetadata,
    pub features: Vec<Feature>,
}

/// Wraps `features` into a collection. Nothing is filtered or checked.
pub fn assemble(features: Vec<Feature>, metadata: CollectionMetadata) -> Collection {
    Collection { metadata, features }
}

impl Collection {
    pub fn to_geojson(&self) -> FeatureCollection {
        let names: Map<String, Value> = self
            .metadata
            .fields()
            .into_iter()
            .map(|(key, value)| (key.to_owned(), Value::String(value.to_owned())))
            .collect();

        FeatureCollection {
            bbox: None,
            features: self.features.iter().map(Feature::to_geojson).collect(),
            foreign_members: Some(names),
        }
    }
}
