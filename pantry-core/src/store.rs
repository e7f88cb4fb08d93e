//! Recipe store: the read-only working dataset loaded at startup.

use std::fs;
use std::path::Path;

use crate::error::StoreError;
use crate::types::Recipe;

/// Ordered, immutable collection of recipes.
///
/// Built once at process start and shared by reference; nothing mutates it
/// afterwards, so concurrent readers need no synchronization.
#[derive(Debug, Clone, Default)]
pub struct RecipeStore {
    recipes: Vec<Recipe>,
}

impl RecipeStore {
    /// Load recipes from a JSON array file.
    ///
    /// Fails if the file is missing or is not a JSON array of recipe objects.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let recipes: Vec<Recipe> =
            serde_json::from_str(&content).map_err(|source| StoreError::InvalidJson {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::info!(
            path = %path.display(),
            count = recipes.len(),
            "Loaded recipe store"
        );

        Ok(Self { recipes })
    }

    pub fn from_recipes(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
