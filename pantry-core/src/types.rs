use serde::{Deserialize, Serialize};

/// A recipe from the working dataset. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Display name; absent when the source corpus had none.
    #[serde(default)]
    pub title: Option<String>,
    /// Free-text ingredient descriptions, in source order.
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Free-text instruction steps, in source order. May be empty.
    #[serde(default)]
    pub steps: Vec<String>,
}

impl Recipe {
    pub fn new(title: impl Into<String>, ingredients: Vec<String>, steps: Vec<String>) -> Self {
        Self {
            title: Some(title.into()),
            ingredients,
            steps,
        }
    }

    /// Title for presentation; empty when the recipe has none.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }
}

/// The ingredients a user submitted for one request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserQuery {
    pub ingredients: Vec<String>,
}

impl UserQuery {
    /// Split a raw comma-separated submission into trimmed entries.
    ///
    /// Empty entries are kept, so a blank submission yields one empty string.
    pub fn parse(raw: &str) -> Self {
        Self {
            ingredients: raw.split(',').map(|s| s.trim().to_string()).collect(),
        }
    }
}

/// A recipe paired with how many user ingredients it contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult<'a> {
    pub recipe: &'a Recipe,
    pub match_count: usize,
}

/// Cooking instructions produced for one matched recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedInstruction {
    pub title: String,
    /// Raw model output, or the formatted fallback text.
    pub steps: String,
}
