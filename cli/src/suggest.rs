use anyhow::{Context, Result};
use pantry_core::{detect_capability_from_env, InstructionGenerator, RecipeStore, UserQuery};
use std::path::Path;

/// Run one suggestion request from the terminal and print the results
pub async fn suggest(recipes_path: &Path, ingredients: &str, offline: bool) -> Result<()> {
    let store = RecipeStore::load(recipes_path)
        .with_context(|| format!("Failed to load recipes from {}", recipes_path.display()))?;

    let generator = if offline {
        InstructionGenerator::fallback_only()
    } else {
        InstructionGenerator::new(detect_capability_from_env().await)
    };

    let query = UserQuery::parse(ingredients);
    let suggestions = generator.suggest(store.recipes(), &query).await;

    if suggestions.is_empty() {
        println!("No recipes matched: {}", query.ingredients.join(", "));
        return Ok(());
    }

    for (i, suggestion) in suggestions.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("=== {} ===", suggestion.title);
        println!("{}", suggestion.steps);
    }

    Ok(())
}
