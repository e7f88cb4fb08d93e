//! Offline dataset normalizer.
//!
//! Turns a raw schema.org-style recipe corpus into the fixed
//! `{title, ingredients, steps}` records the recipe store loads. Ingredient
//! and instruction fields come in several shapes (a newline-separated string,
//! a list of strings, a list of `HowToStep` objects, `HowToSection` objects
//! with a nested `itemListElement`), all reduced to a flat list of strings.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::NormalizeError;
use crate::types::Recipe;

/// Number of corpus entries kept by default.
pub const DEFAULT_NORMALIZE_LIMIT: usize = 50;

/// Shape of a text-bearing field in the raw corpus.
#[derive(Debug, Clone, PartialEq)]
pub enum TextSource<'a> {
    /// Newline-separated text.
    PlainString(&'a str),
    /// A list made only of strings.
    StringList(Vec<&'a str>),
    /// A list holding at least one non-string item.
    ObjectList(Vec<TextNode<'a>>),
    /// Anything else contributes nothing.
    Unsupported,
}

/// One item of an [`TextSource::ObjectList`].
#[derive(Debug, Clone, PartialEq)]
pub enum TextNode<'a> {
    Text(&'a str),
    /// A section whose `itemListElement` is parsed recursively.
    Nested(TextSource<'a>),
    Skip,
}

impl<'a> TextSource<'a> {
    pub fn parse(value: &'a Value) -> Self {
        match value {
            Value::String(s) => TextSource::PlainString(s),
            Value::Array(items) => {
                let strings: Option<Vec<&str>> = items.iter().map(Value::as_str).collect();
                match strings {
                    Some(strings) => TextSource::StringList(strings),
                    None => TextSource::ObjectList(items.iter().map(TextNode::parse).collect()),
                }
            }
            _ => TextSource::Unsupported,
        }
    }

    /// Reduce to a flat, ordered list of strings.
    pub fn flatten(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(&self, out: &mut Vec<String>) {
        match self {
            TextSource::PlainString(s) => out.extend(
                s.split('\n')
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(str::to_string),
            ),
            TextSource::StringList(items) => out.extend(items.iter().map(|s| s.to_string())),
            TextSource::ObjectList(nodes) => {
                for node in nodes {
                    match node {
                        TextNode::Text(s) => out.push(s.to_string()),
                        TextNode::Nested(source) => source.flatten_into(out),
                        TextNode::Skip => {}
                    }
                }
            }
            TextSource::Unsupported => {}
        }
    }
}

impl<'a> TextNode<'a> {
    pub fn parse(item: &'a Value) -> Self {
        match item {
            Value::String(s) => TextNode::Text(s),
            Value::Object(map) => {
                // A `text` key wins even when it is empty.
                if let Some(text) = map.get("text") {
                    match text.as_str() {
                        Some(t) if !t.is_empty() => TextNode::Text(t),
                        _ => TextNode::Skip,
                    }
                } else if let Some(nested) = map.get("itemListElement") {
                    TextNode::Nested(TextSource::parse(nested))
                } else {
                    TextNode::Skip
                }
            }
            _ => TextNode::Skip,
        }
    }
}

fn flatten_field(entry: &serde_json::Map<String, Value>, key: &str) -> Vec<String> {
    entry
        .get(key)
        .map(|value| TextSource::parse(value).flatten())
        .unwrap_or_default()
}

/// Normalize one corpus entry.
pub fn normalize_entry(entry: &Value, index: usize) -> Result<Recipe, NormalizeError> {
    let entry = entry
        .as_object()
        .ok_or(NormalizeError::InvalidEntry(index))?;

    let title = ["name", "title"]
        .iter()
        .find_map(|key| {
            entry
                .get(*key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        })
        .map(str::to_string);

    Ok(Recipe {
        title,
        ingredients: flatten_field(entry, "recipeIngredient"),
        steps: flatten_field(entry, "recipeInstructions"),
    })
}

/// Normalize the first `limit` entries of a corpus array.
pub fn normalize_corpus(corpus: &Value, limit: usize) -> Result<Vec<Recipe>, NormalizeError> {
    let entries = corpus.as_array().ok_or(NormalizeError::NotAnArray)?;

    entries
        .iter()
        .take(limit)
        .enumerate()
        .map(|(index, entry)| normalize_entry(entry, index))
        .collect()
}

/// Read a raw corpus file, normalize it, and write the working dataset.
///
/// Returns the number of recipes written.
pub fn normalize_file(input: &Path, output: &Path, limit: usize) -> Result<usize, NormalizeError> {
    let content = fs::read_to_string(input).map_err(|source| NormalizeError::Io {
        path: input.to_path_buf(),
        source,
    })?;
    let corpus: Value = serde_json::from_str(&content)?;

    let recipes = normalize_corpus(&corpus, limit)?;
    let rendered = serde_json::to_string_pretty(&recipes)?;

    fs::write(output, rendered).map_err(|source| NormalizeError::Io {
        path: output.to_path_buf(),
        source,
    })?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        available = corpus.as_array().map(Vec::len).unwrap_or_default(),
        written = recipes.len(),
        "Normalized recipe corpus"
    );

    Ok(recipes.len())
}
