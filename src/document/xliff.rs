/*!
 * XLIFF 1.2 / SDLXLIFF support.
 *
 * Segments are `trans-unit` elements addressed by their `id` attribute,
 * qualified with the position of their `<file>` when a document holds more
 * than one. Inline markup inside `<source>` (e.g. `<g>`, `<mrk>`) is
 * flattened to its text; SDLXLIFF segment markers in targets are kept. Translations are spliced into the original text by byte range, so
 * nothing outside the touched `<target>` elements is re-serialized.
 */

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use log::{debug, warn};
use roxmltree::{Document, Node, ParsingOptions};

use super::{escape_xml_text, AppliedDocument, Segment, SegmentCodec};
use crate::errors::DocumentError;

/// Codec for XLIFF-family documents
#[derive(Debug, Default, Clone, Copy)]
pub struct XliffCodec;

fn parse(content: &str) -> Result<Document<'_>, DocumentError> {
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;
    Document::parse_with_options(content, options)
        .map_err(|e| DocumentError::Malformed(format!("XML parse error: {}", e)))
}

fn is_element(node: &Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

fn child_element<'a, 'input>(node: &Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| is_element(n, name))
}

/// Concatenated text of every descendant text node
fn inner_text(node: &Node) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

fn translation_units<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.descendants().filter(|n| is_element(n, "trans-unit"))
}

/// Translation units paired with the 1-based index of the `<file>` scoping their ids
///
/// The scope is `None` for single-file documents, whose ids are used as-is.
fn scoped_units<'a, 'input>(doc: &'a Document<'input>) -> Vec<(Option<usize>, Node<'a, 'input>)> {
    let files: Vec<Node<'a, 'input>> = doc.descendants().filter(|n| is_element(n, "file")).collect();
    if files.len() <= 1 {
        return translation_units(doc.root()).map(|unit| (None, unit)).collect();
    }
    files
        .into_iter()
        .enumerate()
        .flat_map(|(index, file)| translation_units(file).map(move |unit| (Some(index + 1), unit)))
        .collect()
}

/// Segment id for a unit; ids in multi-file documents are qualified as `f<file>:<id>`
fn segment_key(scope: Option<usize>, id: &str) -> String {
    match scope {
        Some(file) => format!("f{}:{}", file, id),
        None => id.to_string(),
    }
}

fn is_untranslatable(unit: &Node) -> bool {
    unit.attribute("translate") == Some("no")
}

/// Qualified element name as written in the source text, e.g. `target` or `x:target`
fn raw_qname(raw: &str) -> &str {
    let name = raw.trim_start_matches('<');
    let end = name
        .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .unwrap_or(name.len());
    &name[..end]
}

/// Byte offset of the `>` closing the start tag, skipping quoted attribute values
fn start_tag_end(raw: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in raw.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '>') => return Some(i),
            _ => {}
        }
    }
    None
}

/// True for an element written as `<name ... />`
fn is_self_closing(content: &str, node: &Node) -> bool {
    content[node.range()].ends_with("/>")
}

/// The start tag of an element as written, with a self-closing tag reopened
fn open_tag(raw: &str) -> Option<String> {
    let tag = &raw[..=start_tag_end(raw)?];
    Some(match tag.strip_suffix("/>") {
        Some(open) => format!("{}>", open.trim_end()),
        None => tag.to_string(),
    })
}

/// SDLXLIFF segment markers (`<mrk mtype="seg">`) below a node, in document order
fn segment_markers<'a, 'input>(node: &Node<'a, 'input>) -> Vec<Node<'a, 'input>> {
    node.descendants()
        .filter(|n| is_element(n, "mrk") && n.attribute("mtype") == Some("seg"))
        .collect()
}

/// Compute the edit that makes `escaped` the whole content of an element
fn content_edit(content: &str, node: &Node, escaped: &str) -> Option<(Range<usize>, String)> {
    let range = node.range();
    let raw = &content[range.clone()];

    if is_self_closing(content, node) {
        let qname = raw_qname(raw);
        return Some((range, format!("{}{}</{}>", open_tag(raw)?, escaped, qname)));
    }

    let open_end = start_tag_end(raw)?;
    let close_start = raw.rfind("</")?;
    if close_start <= open_end {
        return None;
    }
    Some((range.start + open_end + 1..range.start + close_start, escaped.to_string()))
}

/// Edits that put `text` into an existing `<target>` element
///
/// When the target is segmented, the text goes into the first segment marker
/// and the remaining markers are emptied, so every marker and its attributes
/// survive.
fn replace_target_edits(content: &str, target: &Node, text: &str) -> Option<Vec<(Range<usize>, String)>> {
    let escaped = escape_xml_text(text);
    let markers = segment_markers(target);
    if markers.is_empty() {
        return content_edit(content, target, &escaped).map(|edit| vec![edit]);
    }

    let mut edits = Vec::with_capacity(markers.len());
    for (index, marker) in markers.iter().enumerate() {
        if index == 0 {
            edits.push(content_edit(content, marker, &escaped)?);
        } else if !is_self_closing(content, marker) {
            edits.push(content_edit(content, marker, "")?);
        }
    }
    Some(edits)
}

/// Compute the edit that inserts a new `<target>` after `<seg-source>` or `<source>`
///
/// A segmented `<seg-source>` has its markers mirrored into the new target.
fn insert_target_edit(content: &str, unit: &Node, text: &str) -> Option<(Range<usize>, String)> {
    let source = child_element(unit, "source")?;
    let seg_source = child_element(unit, "seg-source");
    let anchor = seg_source.unwrap_or(source);

    let source_qname = raw_qname(&content[source.range()]);
    let target_qname = match source_qname.split_once(':') {
        Some((prefix, _)) => format!("{}:target", prefix),
        None => "target".to_string(),
    };

    let escaped = escape_xml_text(text);
    let markers = seg_source.map(|s| segment_markers(&s)).unwrap_or_default();
    let body = if markers.is_empty() {
        escaped
    } else {
        let mut body = String::new();
        for (index, marker) in markers.iter().enumerate() {
            let raw = &content[marker.range()];
            body.push_str(&open_tag(raw)?);
            if index == 0 {
                body.push_str(&escaped);
            }
            body.push_str(&format!("</{}>", raw_qname(raw)));
        }
        body
    };

    let at = anchor.range().end;
    Some((at..at, format!("<{0}>{1}</{0}>", target_qname, body)))
}

impl SegmentCodec for XliffCodec {
    fn extract(&self, content: &str, extract_all: bool) -> Result<Vec<Segment>, DocumentError> {
        let doc = parse(content)?;
        let mut seen = HashSet::new();
        let mut segments = Vec::new();
        let mut skipped_translated = 0usize;

        for (scope, unit) in scoped_units(&doc) {
            let id = unit.attribute("id").unwrap_or_default();
            let key = segment_key(scope, id);
            if !id.is_empty() && !seen.insert(key.clone()) {
                return Err(DocumentError::DuplicateSegmentId(key));
            }

            if is_untranslatable(&unit) {
                continue;
            }

            let Some(source) = child_element(&unit, "source") else {
                continue;
            };
            let source_text = inner_text(&source).trim().to_string();
            if source_text.is_empty() {
                continue;
            }

            if id.is_empty() {
                return Err(DocumentError::Malformed(format!(
                    "trans-unit without id at byte {}",
                    unit.range().start
                )));
            }

            let has_translation = child_element(&unit, "target")
                .map(|t| !inner_text(&t).trim().is_empty())
                .unwrap_or(false);
            if has_translation && !extract_all {
                skipped_translated += 1;
                continue;
            }

            if source.descendants().any(|n| n.is_element() && n != source) {
                debug!("Segment {} contains inline markup; it is extracted as plain text", key);
            }

            segments.push(Segment::new(key, source_text));
        }

        if skipped_translated > 0 {
            debug!("Skipped {} already translated unit(s)", skipped_translated);
        }

        Ok(segments)
    }

    fn apply(
        &self,
        content: &str,
        translations: &HashMap<String, String>,
    ) -> Result<AppliedDocument, DocumentError> {
        let doc = parse(content)?;
        let mut edits: Vec<(Range<usize>, String)> = Vec::new();
        let mut visited = HashSet::new();
        let mut unplaced = Vec::new();
        let mut replaced = 0;

        for (scope, unit) in scoped_units(&doc) {
            let Some(id) = unit.attribute("id") else {
                continue;
            };
            let key = segment_key(scope, id);
            let Some(text) = translations.get(&key).map(|t| t.trim()).filter(|t| !t.is_empty()) else {
                continue;
            };
            visited.insert(key.clone());

            let unit_edits = match child_element(&unit, "target") {
                Some(target) => replace_target_edits(content, &target, text),
                None => insert_target_edit(content, &unit, text).map(|edit| vec![edit]),
            };

            match unit_edits {
                Some(unit_edits) => {
                    edits.extend(unit_edits);
                    replaced += 1;
                }
                None => {
                    warn!("Could not place translation for unit {}", key);
                    unplaced.push(key);
                }
            }
        }

        let mut orphans: Vec<String> = translations
            .iter()
            .filter(|(key, text)| !text.trim().is_empty() && !visited.contains(key.as_str()))
            .map(|(key, _)| key.clone())
            .collect();
        orphans.sort();
        if !orphans.is_empty() {
            warn!("No trans-unit for translation id(s): {}", orphans.join(", "));
        }
        unplaced.extend(orphans);

        // Splice from the back so earlier ranges stay valid
        edits.sort_by_key(|(range, _)| std::cmp::Reverse(range.start));
        let mut output = content.to_string();
        for (range, replacement) in &edits {
            output.replace_range(range.clone(), replacement);
        }

        Ok(AppliedDocument {
            content: output,
            replaced,
            unplaced,
        })
    }
}
