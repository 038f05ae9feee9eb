//! Section source: where the canonical display text comes from
//!
//! Two formats are accepted. A JSON array of `{id, title, subtitle?,
//! content}` objects, or a TypeScript data module whose object literals
//! carry `id:`, `title:`, `subtitle:` and `content:` string fields.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{ensure, Context, Result};
use regex::Regex;
use tracing::debug;

use crate::types::Section;

/// Load every section from a manifest file, choosing the parser by extension.
pub fn load_sections<P: AsRef<Path>>(path: P) -> Result<Vec<Section>> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read sections file {:?}", path))?;

    let is_typescript = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ts"));

    let sections = if is_typescript {
        parse_typescript_sections(&raw)?
    } else {
        parse_json_sections(&raw)?
    };
    ensure!(!sections.is_empty(), "No sections found in {:?}", path);
    debug!(count = sections.len(), path = %path.display(), "sections loaded");
    Ok(sections)
}

pub fn parse_json_sections(raw: &str) -> Result<Vec<Section>> {
    serde_json::from_str(raw).context("Failed to parse sections JSON")
}

/// Extract sections from object literals in a TypeScript data module.
///
/// Objects missing an id, title or content are ignored.
pub fn parse_typescript_sections(raw: &str) -> Result<Vec<Section>> {
    let patterns = patterns();
    let sections = patterns
        .block
        .find_iter(raw)
        .filter_map(|found| {
            let text = found.as_str();
            Some(Section {
                id: capture(&patterns.id, text)?,
                title: capture(&patterns.title, text)?,
                subtitle: capture(&patterns.subtitle, text),
                content: capture(&patterns.content, text)?,
            })
        })
        .collect();
    Ok(sections)
}

/// Pick the sections to process; `None` selects all of them.
pub fn select_sections<'a>(sections: &'a [Section], only: Option<&str>) -> Vec<&'a Section> {
    match only {
        Some(id) => sections.iter().filter(|s| s.id == id).collect(),
        None => sections.iter().collect(),
    }
}

struct Patterns {
    block: Regex,
    id: Regex,
    title: Regex,
    subtitle: Regex,
    content: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        block: Regex::new(r"\{[\s\S]*?id:[\s\S]*?\}").expect("object literal regex"),
        id: string_field("id"),
        title: string_field("title"),
        subtitle: string_field("subtitle"),
        content: string_field("content"),
    })
}

fn string_field(name: &str) -> Regex {
    Regex::new(&format!(r#"\b{name}:\s*"((?:\\.|[^"])*)""#)).expect("string field regex")
}

fn capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|value| value.as_str().replace("\\\"", "\""))
}
