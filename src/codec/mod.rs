//! Markdown dialect codec
//!
//! Entity files are line-oriented markdown with three sub-grammars: a single
//! `# Kind: Title` heading, metadata lines `- **Key**: Value`, and `##`
//! section blocks whose bodies run to the next `##` heading or end of text.
//! The scanner here tokenizes a file into those pieces once; the per-entity
//! decoders in [`decode`] read fields out of the result, and [`encode`]
//! renders the canonical inverse.

use std::collections::HashMap;

pub mod decode;
pub mod encode;

pub use decode::{
    decode_epic, decode_feature, decode_milestone, decode_project, decode_team,
};
pub use encode::{
    encode_epic, encode_feature, encode_milestone, encode_project, encode_team,
};

/// One `## Name` block and its body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub body: String,
}

/// A scanned entity file
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Kind literal from the `# Kind: Title` heading (e.g. "Epic")
    pub heading_kind: Option<String>,
    /// Title from the heading, absent for bare headings like `# Team`
    pub heading_title: Option<String>,
    /// All `- **Key**: Value` lines, order-independent, last occurrence wins
    pub metadata: HashMap<String, String>,
    /// `##` sections in file order
    pub sections: Vec<Section>,
}

impl Document {
    /// Tokenize one entity file. Never fails; unrecognized lines are
    /// section body text or ignored preamble.
    pub fn scan(text: &str) -> Self {
        let mut doc = Document::default();
        let mut current: Option<(String, Vec<&str>)> = None;

        for line in text.lines() {
            if let Some(name) = section_heading(line) {
                if let Some((name, body)) = current.take() {
                    doc.sections.push(Section {
                        name,
                        body: body.join("\n"),
                    });
                }
                current = Some((name.to_string(), Vec::new()));
                continue;
            }

            if doc.heading_kind.is_none() && current.is_none() {
                if let Some((kind, title)) = title_heading(line) {
                    doc.heading_kind = Some(kind.to_string());
                    doc.heading_title = title.map(str::to_string);
                    continue;
                }
            }

            // Metadata lines are collected globally but stay part of the
            // enclosing section body (team member blocks rely on that).
            if let Some((key, value)) = metadata_line(line) {
                doc.metadata.insert(key.to_string(), value.to_string());
            }

            if let Some((_, body)) = current.as_mut() {
                body.push(line);
            }
        }

        if let Some((name, body)) = current.take() {
            doc.sections.push(Section {
                name,
                body: body.join("\n"),
            });
        }

        doc
    }

    /// Body of the first section with this name
    pub fn section(&self, name: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.body.as_str())
    }

    /// Metadata value by key
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Resolve the entity title: the `# Kind:` heading if it matches the
    /// expected kind, else a `Title` metadata line, else `"Untitled"`.
    pub fn title_for(&self, kind: &str) -> String {
        if self.heading_kind.as_deref() == Some(kind) {
            if let Some(title) = self.heading_title.as_deref() {
                if !title.is_empty() {
                    return title.to_string();
                }
            }
        }
        match self.meta("Title") {
            Some(title) => title.to_string(),
            None => "Untitled".to_string(),
        }
    }
}

/// `## Name` heading, rejecting deeper levels like `###`
fn section_heading(line: &str) -> Option<&str> {
    let name = line.strip_prefix("## ")?;
    Some(name.trim())
}

/// `# Kind: Title` or a bare `# Kind` heading
fn title_heading(line: &str) -> Option<(&str, Option<&str>)> {
    let rest = line.strip_prefix("# ")?;
    match rest.split_once(':') {
        Some((kind, title)) => Some((kind.trim(), Some(title.trim()))),
        None => Some((rest.trim(), None)),
    }
}

/// `- **Key**: Value` with a non-empty value
pub fn metadata_line(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix('-')?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim_start().strip_prefix("**")?;
    let (key, value) = rest.split_once("**:")?;
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    Some((key.trim(), value))
}

/// One parsed checkbox list item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxItem {
    pub checked: bool,
    pub text: String,
}

/// Parse `- [ ]` / `- [x]` list items out of a section body. Lines that are
/// not checkbox items are skipped.
pub fn checkbox_items(body: &str) -> Vec<CheckboxItem> {
    let mut items = Vec::new();
    for line in body.lines() {
        let rest = match line.trim_start().strip_prefix('-') {
            Some(r) => r.trim_start(),
            None => continue,
        };
        let (checked, text) = if let Some(r) = rest.strip_prefix("[x]") {
            (true, r)
        } else if let Some(r) = rest.strip_prefix("[ ]") {
            (false, r)
        } else {
            continue;
        };
        items.push(CheckboxItem {
            checked,
            text: text.trim().to_string(),
        });
    }
    items
}

/// parseFloat-style numeric extraction: the leading numeral of the value,
/// trailing unit words ("hours", "h/week") ignored. Missing or unparsable
/// values yield `0`, never an error, so hand-edited files always decode.
pub fn leading_number(value: Option<&str>) -> f64 {
    let s = match value {
        Some(v) => v.trim_start(),
        None => return 0.0,
    };
    let bytes = s.as_bytes();
    let mut end = 0;
    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let mut seen_digit = false;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => {
                seen_digit = true;
                end += 1;
            }
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }
    if !seen_digit {
        return 0.0;
    }
    s[..end].parse().unwrap_or(0.0)
}

/// Split a comma-separated value into trimmed, non-empty items
pub fn comma_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
