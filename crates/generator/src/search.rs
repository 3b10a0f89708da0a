//! Local full-text search indices, one JSON document per locale.

use serde::Serialize;
use std::collections::BTreeMap;

/// Longest body excerpt stored per page, in characters
const MAX_TEXT_CHARS: usize = 4000;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SearchDocument {
    pub route: String,
    pub title: String,
    pub headings: Vec<String>,
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchIndex {
    pub locale: String,
    pub lang: String,
    pub documents: Vec<SearchDocument>,
}

/// Indices keyed by locale key
#[derive(Debug, Default)]
pub struct SearchIndices {
    indices: BTreeMap<String, SearchIndex>,
}

impl SearchIndices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, locale: &str, lang: &str, mut doc: SearchDocument) {
        if doc.text.chars().count() > MAX_TEXT_CHARS {
            doc.text = doc.text.chars().take(MAX_TEXT_CHARS).collect();
        }
        self.indices
            .entry(locale.to_string())
            .or_insert_with(|| SearchIndex {
                locale: locale.to_string(),
                lang: lang.to_string(),
                documents: Vec::new(),
            })
            .documents
            .push(doc);
    }

    pub fn get(&self, locale: &str) -> Option<&SearchIndex> {
        self.indices.get(locale)
    }

    /// `(path, json)` for every locale, under `search/`
    pub fn to_assets(&self) -> serde_json::Result<Vec<(String, Vec<u8>)>> {
        self.indices
            .iter()
            .map(|(key, index)| Ok((index_path(key), serde_json::to_vec(index)?)))
            .collect()
    }
}

/// Output path of a locale's index
pub fn index_path(locale: &str) -> String {
    format!("search/{}.json", locale)
}
