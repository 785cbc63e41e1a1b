/*!
 * Shared terminology store.
 *
 * `glossary/technical_terms.json` is a flat JSON object mapping a term to
 * its preferred translation. It is read-only while batches are translated;
 * edits happen out of band.
 */

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::file_utils::FileManager;

/// Term → preferred translation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Glossary {
    terms: BTreeMap<String, String>,
}

impl Glossary {
    /// Create a new empty glossary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a glossary file; a missing file is an empty glossary
    pub fn load(path: &Path) -> Result<Self> {
        if !FileManager::file_exists(path) {
            return Ok(Self::new());
        }
        FileManager::read_json(path)
    }

    /// Write the glossary as pretty JSON with sorted keys
    pub fn save(&self, path: &Path) -> Result<()> {
        FileManager::write_json(path, self)
    }

    /// Get the translation for a term
    ///
    /// Exact matches win; otherwise a case-insensitive match is accepted.
    /// A term that is not in the glossary yields `None`.
    pub fn lookup(&self, term: &str) -> Option<&str> {
        if let Some(translation) = self.terms.get(term) {
            return Some(translation.as_str());
        }
        let lowered = term.to_lowercase();
        self.terms
            .iter()
            .find(|(key, _)| key.to_lowercase() == lowered)
            .map(|(_, value)| value.as_str())
    }

    /// Add or replace a term, returning the previous translation
    pub fn insert(&mut self, term: impl Into<String>, translation: impl Into<String>) -> Option<String> {
        self.terms.insert(term.into(), translation.into())
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// All entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.terms.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Entries whose term occurs in any of the given texts (case-insensitive)
    pub fn relevant_terms<'a, I>(&self, texts: I) -> Vec<(&str, &str)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let haystack: Vec<String> = texts.into_iter().map(|t| t.to_lowercase()).collect();
        self.iter()
            .filter(|(term, _)| {
                let needle = term.to_lowercase();
                !needle.is_empty() && haystack.iter().any(|text| text.contains(&needle))
            })
            .collect()
    }
}

impl FromIterator<(String, String)> for Glossary {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}
