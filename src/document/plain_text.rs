//! Plain text documents: every non-blank line is one segment, identified by
//! its 1-based line number.

use std::collections::{HashMap, HashSet};

use log::warn;

use super::{AppliedDocument, Segment, SegmentCodec};
use crate::errors::DocumentError;

#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextCodec;

/// A line split into indentation, text and trailing whitespace/line ending
struct LineParts<'a> {
    indent: &'a str,
    text: &'a str,
    tail: &'a str,
}

fn split_line(line: &str) -> LineParts<'_> {
    let text_start = line.len() - line.trim_start().len();
    let text_end = line.trim_end().len().max(text_start);
    LineParts {
        indent: &line[..text_start],
        text: &line[text_start..text_end],
        tail: &line[text_end..],
    }
}

impl SegmentCodec for PlainTextCodec {
    fn extract(&self, content: &str, _extract_all: bool) -> Result<Vec<Segment>, DocumentError> {
        Ok(content
            .split_inclusive('\n')
            .enumerate()
            .filter_map(|(index, line)| {
                let parts = split_line(line);
                (!parts.text.is_empty()).then(|| Segment::new((index + 1).to_string(), parts.text))
            })
            .collect())
    }

    fn apply(
        &self,
        content: &str,
        translations: &HashMap<String, String>,
    ) -> Result<AppliedDocument, DocumentError> {
        let mut output = String::with_capacity(content.len());
        let mut replaced = 0;
        let mut placed = HashSet::new();

        for (index, line) in content.split_inclusive('\n').enumerate() {
            let parts = split_line(line);
            let id = (index + 1).to_string();
            let translation = translations
                .get(&id)
                .map(|t| t.trim())
                .filter(|t| !t.is_empty() && !parts.text.is_empty());

            match translation {
                Some(text) => {
                    if text.contains('\n') {
                        warn!("Translation for line {} spans several lines; joining them", index + 1);
                    }
                    let single_line = text.lines().map(str::trim).collect::<Vec<_>>().join(" ");
                    output.push_str(parts.indent);
                    output.push_str(&single_line);
                    output.push_str(parts.tail);
                    replaced += 1;
                    placed.insert(id);
                }
                None => output.push_str(line),
            }
        }

        let mut unplaced: Vec<String> = translations
            .iter()
            .filter(|(id, text)| !text.trim().is_empty() && !placed.contains(id.as_str()))
            .map(|(id, _)| id.clone())
            .collect();
        unplaced.sort();
        if !unplaced.is_empty() {
            warn!("No non-blank line for translation id(s): {}", unplaced.join(", "));
        }

        Ok(AppliedDocument {
            content: output,
            replaced,
            unplaced,
        })
    }
}
