//! Structured-object extraction from free-form analysis documents.
//!
//! A document is split into numbered subsections (lines starting with
//! `## <n>.`); each subsection is scanned line by line for objects that
//! start on a line beginning with `{` and end when the running brace depth
//! returns to zero. Brace matching is purely textual: a `{` or `}` inside a
//! JSON string value shifts the depth just like structural braces, which can
//! swallow the rest of a subsection.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::normalize::video_id_of;

static SECTION_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^## \d+\.").expect("valid section heading regex"));

/// One accepted structured object and the prose of the subsection it came
/// from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedBlock {
    pub payload: Value,
    pub qualitative_text: String,
}

/// Scanner state while walking a subsection.
enum ScanState<'a> {
    Outside,
    Inside { depth: i64, lines: Vec<&'a str> },
}

/// Extracts every identifiable structured object from `text`.
///
/// Unparseable blocks and objects without a `video_id` are skipped. All
/// objects from one subsection share that subsection's qualitative text.
///
/// Lines are compared with both ends trimmed: an indented `{` starts a
/// block and an indented `JSON` label is a marker line, not prose.
#[must_use]
pub fn extract_blocks(text: &str) -> Vec<ExtractedBlock> {
    let mut results = Vec::new();

    for (index, section) in split_sections(text).iter().enumerate() {
        let (payloads, qualitative_text) = scan_section(section, index);
        if payloads.is_empty() {
            continue;
        }
        results.extend(payloads.into_iter().map(|payload| ExtractedBlock {
            payload,
            qualitative_text: qualitative_text.clone(),
        }));
    }

    results
}

/// Splits `text` into line groups, starting a new group before every
/// numbered heading. Lines before the first heading form group zero.
pub(crate) fn split_sections(text: &str) -> Vec<Vec<&str>> {
    let mut sections: Vec<Vec<&str>> = vec![Vec::new()];

    for line in text.split('\n') {
        if SECTION_HEADING.is_match(line) {
            sections.push(Vec::new());
        }
        if let Some(current) = sections.last_mut() {
            current.push(line);
        }
    }

    sections
}

/// Returns the accepted objects of one subsection and its qualitative text.
fn scan_section(section_lines: &[&str], section: usize) -> (Vec<Value>, String) {
    let mut payloads = Vec::new();
    let mut prose: Vec<&str> = Vec::new();
    let mut state = ScanState::Outside;

    for &line in section_lines {
        let trimmed = line.trim();

        if matches!(state, ScanState::Outside) && trimmed.starts_with('{') {
            state = ScanState::Inside {
                depth: 0,
                lines: Vec::new(),
            };
        }

        let mut closed_block = None;
        match &mut state {
            ScanState::Inside { depth, lines } => {
                lines.push(line);
                *depth += brace_delta(trimmed);
                if *depth <= 0 {
                    closed_block = Some(lines.join("\n"));
                }
            }
            ScanState::Outside => {
                if !is_marker_line(trimmed) {
                    prose.push(line);
                }
            }
        }

        if let Some(block) = closed_block {
            payloads.extend(parse_block(&block, section));
            state = ScanState::Outside;
        }
    }

    if let ScanState::Inside { lines, .. } = state {
        tracing::debug!(
            section,
            lines = lines.len(),
            "discarding unterminated structured block"
        );
    }

    (payloads, prose.join("\n").trim().to_string())
}

#[allow(clippy::cast_possible_wrap)]
fn brace_delta(line: &str) -> i64 {
    let opens = line.matches('{').count() as i64;
    let closes = line.matches('}').count() as i64;
    opens - closes
}

fn parse_block(block: &str, section: usize) -> Option<Value> {
    let payload = match serde_json::from_str::<Value>(block) {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!(section, error = %e, "discarding unparseable structured block");
            return None;
        }
    };
    if video_id_of(&payload).is_none() {
        tracing::debug!(section, "discarding structured block without video_id");
        return None;
    }
    Some(payload)
}

/// Heading and label lines that only announce a structured block.
/// `trimmed` has had leading and trailing whitespace removed.
fn is_marker_line(trimmed: &str) -> bool {
    trimmed == "JSON" || trimmed == "##" || (trimmed.starts_with("**") && trimmed.contains("JSON"))
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
