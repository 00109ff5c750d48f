//! Reading and writing the search index payload.
//!
//! The payload is a JSON object with a single `docs` array. Documentation
//! builds usually ship it assigned to a script variable:
//!
//! ```text
//! var documenterSearchIndex = {"docs": [...]}
//! ```
//!
//! Both forms are accepted by [`parse`]; [`parse_json`] only takes the bare
//! object.

use crate::entry::DocEntry;
use crate::error::{ParseError, Result};
use crate::index::SearchIndex;
use anyhow::Context;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

/// Variable name used by documentation builds for the search index.
pub const DEFAULT_VAR_NAME: &str = "documenterSearchIndex";

/// Declaration keywords accepted in front of the variable name.
const DECLARATION_KEYWORDS: &[&str] = &["var", "let", "const"];

#[derive(Serialize)]
struct PayloadRef<'a> {
    docs: &'a [DocEntry],
}

/// Parse a payload in either bare JSON or script-wrapped form.
pub fn parse(input: &str) -> std::result::Result<SearchIndex, ParseError> {
    let trimmed = input.trim_start_matches('\u{feff}').trim();
    if trimmed.starts_with('{') {
        return parse_json(trimmed);
    }
    parse_json(strip_script_wrapper(trimmed)?)
}

/// Parse a bare JSON payload of the form `{"docs": [...]}`.
pub fn parse_json(input: &str) -> std::result::Result<SearchIndex, ParseError> {
    let value: Value = serde_json::from_str(input).map_err(|e| ParseError::syntax(&e))?;

    let Value::Object(mut object) = value else {
        return Err(ParseError::MissingDocs);
    };
    let Some(Value::Array(docs)) = object.remove("docs") else {
        return Err(ParseError::MissingDocs);
    };

    let entries = docs
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            serde_json::from_value::<DocEntry>(raw).map_err(|e| ParseError::invalid_entry(index, &e))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    tracing::debug!("Parsed search index payload with {} entries", entries.len());
    Ok(SearchIndex::new(entries))
}

/// Read and parse a payload file.
pub async fn load(path: &Path) -> Result<SearchIndex> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read search index at {}", path.display()))?;
    let index = parse(&content)
        .with_context(|| format!("Failed to parse search index at {}", path.display()))?;
    tracing::info!(
        "Loaded {} documentation entries from {}",
        index.len(),
        path.display()
    );
    Ok(index)
}

/// Serialize to the compact `{"docs": [...]}` shape.
pub fn to_json(index: &SearchIndex) -> String {
    serde_json::to_string(&PayloadRef {
        docs: index.entries(),
    })
    .unwrap_or_else(|_| unreachable!("string-only records always serialize"))
}

/// Serialize to the `{"docs": [...]}` shape with indentation.
pub fn to_json_pretty(index: &SearchIndex) -> String {
    serde_json::to_string_pretty(&PayloadRef {
        docs: index.entries(),
    })
    .unwrap_or_else(|_| unreachable!("string-only records always serialize"))
}

/// Serialize in the script-wrapped form the documentation viewer loads.
pub fn to_script(index: &SearchIndex, var_name: &str) -> String {
    format!("var {} = {}\n", var_name, to_json(index))
}

/// Strip `var name = ` and an optional trailing `;` from a script payload.
fn strip_script_wrapper(input: &str) -> std::result::Result<&str, ParseError> {
    let (declaration, rest) = input.split_once('=').ok_or_else(|| ParseError::Wrapper {
        message: "expected `var <name> = {...}` or a JSON object".to_string(),
    })?;

    let mut words = declaration.split_whitespace();
    let (keyword, name) = match (words.next(), words.next(), words.next()) {
        (Some(keyword), Some(name), None) => (Some(keyword), name),
        (Some(name), None, None) => (None, name),
        _ => {
            return Err(ParseError::Wrapper {
                message: format!("unexpected declaration `{}`", declaration.trim()),
            });
        }
    };

    if let Some(keyword) = keyword
        && !DECLARATION_KEYWORDS.contains(&keyword)
    {
        return Err(ParseError::Wrapper {
            message: format!("unknown declaration keyword `{}`", keyword),
        });
    }
    if DECLARATION_KEYWORDS.contains(&name) || !is_script_identifier(name) {
        return Err(ParseError::Wrapper {
            message: format!("invalid variable name `{}`", name),
        });
    }

    Ok(rest.trim().trim_end_matches(';').trim_end())
}

/// Accepts plain and member-access names (`window.searchIndex`).
fn is_script_identifier(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|part| {
            let mut chars = part.chars();
            chars
                .next()
                .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
                && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        })
}
