//! Extraction of numbered, tagged blocks from model output.
//!
//! The sub-agents are prompted to answer in an XML-like shape:
//!
//! ```text
//! <discussion>
//! <ddx1>
//! <diagnosis>Pneumonia</diagnosis>
//! <probability>60%</probability>
//! </ddx1>
//! <ddx2>...</ddx2>
//! </discussion>
//! ```
//!
//! Model output is not a well-formed document, so nothing here is an XML
//! parser. Opening and closing tags are located with regexes (closers are
//! indexed once per call) and sub-fields with plain substring search.
//! Anything that does not line up is skipped: the parser never fails, it
//! only finds fewer blocks.
//!
//! Blocks come back in order of appearance. Ordinals are whatever the
//! model wrote and are not re-sorted.

use std::collections::{BTreeMap, HashMap};

use laudos_core::models::block::{BlockField, BlockKind, StructuredBlock};
use regex::Regex;

/// How the numeric suffix of a closing tag relates to its opening tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrdinalMatching {
    /// `<step3>` only closes at `</step3>`. Unclosed blocks are dropped.
    #[default]
    Strict,
    /// `<step3>` closes at the first `</stepN>` for any N, as older editor
    /// builds parsed it.
    Loose,
}

/// Block parser, configurable in how closing tags are matched.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagParser {
    matching: OrdinalMatching,
}

impl TagParser {
    pub fn new(matching: OrdinalMatching) -> Self {
        Self { matching }
    }

    pub fn strict() -> Self {
        Self::new(OrdinalMatching::Strict)
    }

    pub fn loose() -> Self {
        Self::new(OrdinalMatching::Loose)
    }

    /// Parse every `<{tag}{digits}>…</{tag}{digits}>` block in `text`.
    ///
    /// Sub-fields are chosen by [`BlockKind`] when `tag` names one; any
    /// other tag extracts every known field. A field missing from a block
    /// is stored as an empty string.
    pub fn parse(&self, text: &str, tag: &str) -> Vec<StructuredBlock> {
        let escaped = regex::escape(tag);
        let (Ok(opener), Ok(closer)) = (
            Regex::new(&format!("<{escaped}([0-9]+)>")),
            Regex::new(&format!("</{escaped}([0-9]+)>")),
        ) else {
            return Vec::new();
        };
        let closers = CloserIndex::build(&closer, text);

        let fields = BlockKind::from_tag(tag)
            .map(BlockKind::fields)
            .unwrap_or(&BlockField::ALL);

        let mut blocks = Vec::new();
        let mut cursor = 0;

        while let Some(caps) = opener.captures_at(text, cursor) {
            let (Some(open), Some(digits)) = (caps.get(0), caps.get(1)) else {
                break;
            };
            let body_start = open.end();

            let close = match self.matching {
                OrdinalMatching::Strict => closers.next_matching(digits.as_str(), body_start),
                OrdinalMatching::Loose => closers.next_any(body_start),
            };

            let Some((body_end, close_end)) = close else {
                cursor = body_start;
                continue;
            };
            cursor = close_end;

            // Suffixes too long for a u32 are not ordinals anyone prompted for.
            let Ok(ordinal) = digits.as_str().parse::<u32>() else {
                continue;
            };

            let body = &text[body_start..body_end];
            let values: BTreeMap<BlockField, String> = fields
                .iter()
                .map(|&field| {
                    let value = field_value(body, field.tag()).unwrap_or_default();
                    (field, value.to_string())
                })
                .collect();

            blocks.push(StructuredBlock {
                ordinal,
                fields: values,
            });
        }

        blocks
    }
}

/// Every closing tag of one family, located in a single pass.
///
/// Lookups are binary searches, so unclosed openers cost no rescans of
/// the remaining text.
struct CloserIndex<'t> {
    /// `(start, end)` of every closer, in order.
    all: Vec<(usize, usize)>,
    /// The same spans grouped by the literal digit suffix.
    by_ordinal: HashMap<&'t str, Vec<(usize, usize)>>,
}

impl<'t> CloserIndex<'t> {
    fn build(closer: &Regex, text: &'t str) -> Self {
        let mut all = Vec::new();
        let mut by_ordinal: HashMap<&'t str, Vec<(usize, usize)>> = HashMap::new();
        for caps in closer.captures_iter(text) {
            let (Some(whole), Some(digits)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let span = (whole.start(), whole.end());
            all.push(span);
            by_ordinal.entry(digits.as_str()).or_default().push(span);
        }
        Self { all, by_ordinal }
    }

    fn next_any(&self, from: usize) -> Option<(usize, usize)> {
        first_at_or_after(&self.all, from)
    }

    fn next_matching(&self, digits: &str, from: usize) -> Option<(usize, usize)> {
        first_at_or_after(self.by_ordinal.get(digits)?, from)
    }
}

fn first_at_or_after(spans: &[(usize, usize)], from: usize) -> Option<(usize, usize)> {
    let i = spans.partition_point(|&(start, _)| start < from);
    spans.get(i).copied()
}

/// Parse blocks with strict ordinal matching.
pub fn parse_blocks(text: &str, tag: &str) -> Vec<StructuredBlock> {
    TagParser::strict().parse(text, tag)
}

/// Parse blocks of a known kind with strict ordinal matching.
pub fn parse_kind(text: &str, kind: BlockKind) -> Vec<StructuredBlock> {
    parse_blocks(text, kind.tag())
}

/// Content of the first `<name>…</name>` pair in `body`, untrimmed.
pub fn field_value<'a>(body: &'a str, name: &str) -> Option<&'a str> {
    extract_section(body, name).map(|section| section.inner)
}

/// A located `<tag>…</tag>` region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaggedSection<'a> {
    /// Text between the tags.
    pub inner: &'a str,
    /// Byte offset of the opening `<`.
    pub start: usize,
    /// Byte offset just past the closing `>`.
    pub end: usize,
}

/// Locate the first `<tag>` that has a matching `</tag>` after it.
pub fn extract_section<'a>(text: &'a str, tag: &str) -> Option<TaggedSection<'a>> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");

    let start = text.find(&open)?;
    let inner_start = start + open.len();
    let inner_len = text[inner_start..].find(&close)?;
    let inner_end = inner_start + inner_len;

    Some(TaggedSection {
        inner: &text[inner_start..inner_end],
        start,
        end: inner_end + close.len(),
    })
}

/// Remove the first `<tag>…</tag>` region from `text`.
///
/// Returns the remaining text trimmed, and the trimmed inner content when
/// the region was present. Without the region, `text` is returned as-is.
pub fn strip_section(text: &str, tag: &str) -> (String, Option<String>) {
    match extract_section(text, tag) {
        Some(section) => {
            let mut rest = String::with_capacity(text.len() - (section.end - section.start));
            rest.push_str(&text[..section.start]);
            rest.push_str(&text[section.end..]);
            (rest.trim().to_string(), Some(section.inner.trim().to_string()))
        }
        None => (text.to_string(), None),
    }
}
