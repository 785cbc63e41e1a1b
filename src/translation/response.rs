/*!
 * Parsing of `[ID: <id>]` formatted model answers.
 */

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::batching::TranslationItem;
use crate::document::Segment;

static ID_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[ID:\s*([^\]]+)\]").unwrap_or_else(|e| panic!("invalid id marker pattern: {}", e))
});

/// Split a text into `(id, text)` pairs at every `[ID: ..]` marker
///
/// Text before the first marker is dropped; each block's text is trimmed.
pub fn parse_id_blocks(text: &str) -> Vec<(String, String)> {
    let markers: Vec<_> = ID_MARKER.captures_iter(text).collect();
    let mut blocks = Vec::with_capacity(markers.len());

    for (index, captures) in markers.iter().enumerate() {
        let (Some(whole), Some(id)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        let end = markers
            .get(index + 1)
            .and_then(|next| next.get(0))
            .map(|m| m.start())
            .unwrap_or(text.len());
        blocks.push((id.as_str().trim().to_string(), text[whole.end()..end].trim().to_string()));
    }

    blocks
}

/// Translations mapped onto a batch's segments
#[derive(Debug, Clone, PartialEq)]
pub struct MappedTranslations {
    /// One item per segment, in batch order
    pub items: Vec<TranslationItem>,
    /// Ids the answer did not cover; their target is empty
    pub missing: Vec<String>,
}

/// Pair each segment with its translation from a model answer
///
/// When an id occurs more than once the first non-empty text wins.
pub fn map_translations(segments: &[Segment], answer: &str) -> MappedTranslations {
    let mut by_id: HashMap<String, String> = HashMap::new();
    for (id, text) in parse_id_blocks(answer) {
        let entry = by_id.entry(id).or_default();
        if entry.is_empty() {
            *entry = text;
        }
    }

    let mut missing = Vec::new();
    let items = segments
        .iter()
        .map(|segment| {
            let target = by_id.remove(&segment.id).unwrap_or_default();
            if target.is_empty() {
                missing.push(segment.id.clone());
            }
            TranslationItem {
                id: segment.id.clone(),
                source: segment.source.clone(),
                target,
            }
        })
        .collect();

    MappedTranslations { items, missing }
}
