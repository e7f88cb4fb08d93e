//! Cooking-instruction generation for matched recipes.
//!
//! Whether a text-generation service is used is decided once, at startup, and
//! captured in [`AiCapability`]. A failed call while the service is available
//! falls back for that call only; it never flips the capability.

use std::sync::Arc;

use crate::fallback::format_fallback;
use crate::llm::{create_provider, LlmProvider, ProviderConfig};
use crate::matcher::{find_matches, DEFAULT_MATCH_LIMIT};
use crate::prompts::render_instructions_prompt;
use crate::types::{GeneratedInstruction, Recipe, UserQuery};

/// Whether a text-generation service can be used for this process.
#[derive(Debug, Clone)]
pub enum AiCapability {
    Available(Arc<dyn LlmProvider>),
    Unavailable,
}

impl AiCapability {
    pub fn is_available(&self) -> bool {
        matches!(self, AiCapability::Available(_))
    }
}

/// Build the configured provider and check it can be reached.
///
/// Any failure is logged and yields [`AiCapability::Unavailable`].
pub async fn detect_capability(config: &ProviderConfig) -> AiCapability {
    let provider = match create_provider(config) {
        Ok(provider) => provider,
        Err(e) => {
            tracing::warn!(
                provider = config.kind.as_str(),
                error = %e,
                "Text generation not available, using fallback instructions"
            );
            return AiCapability::Unavailable;
        }
    };

    match provider.verify().await {
        Ok(()) => {
            tracing::info!(
                provider = provider.provider_name(),
                model = provider.model_name(),
                "Text generation available"
            );
            AiCapability::Available(Arc::from(provider))
        }
        Err(e) => {
            tracing::warn!(
                provider = provider.provider_name(),
                error = %e,
                "Text generation provider failed verification, using fallback instructions"
            );
            AiCapability::Unavailable
        }
    }
}

/// Load provider configuration from the environment and detect capability.
///
/// Misconfiguration is never fatal: it only means fallback mode.
pub async fn detect_capability_from_env() -> AiCapability {
    match ProviderConfig::from_env() {
        Ok(config) => detect_capability(&config).await,
        Err(e) => {
            tracing::warn!(error = %e, "Invalid text generation configuration, using fallback instructions");
            AiCapability::Unavailable
        }
    }
}

/// Produces instructions for matched recipes.
#[derive(Debug, Clone)]
pub struct InstructionGenerator {
    capability: AiCapability,
}

impl InstructionGenerator {
    pub fn new(capability: AiCapability) -> Self {
        Self { capability }
    }

    /// A generator that always uses the deterministic fallback.
    pub fn fallback_only() -> Self {
        Self::new(AiCapability::Unavailable)
    }

    pub fn capability(&self) -> &AiCapability {
        &self.capability
    }

    /// Instructions for one recipe: model output verbatim when available,
    /// otherwise the fallback text.
    pub async fn generate(
        &self,
        title: &str,
        user_ingredients: &[String],
        original: Option<&Recipe>,
    ) -> String {
        let AiCapability::Available(provider) = &self.capability else {
            return format_fallback(title, user_ingredients, original);
        };

        let prompt = render_instructions_prompt(title, user_ingredients);
        match provider.complete(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(
                    provider = provider.provider_name(),
                    recipe = title,
                    error = %e,
                    "Text generation failed, using fallback instructions"
                );
                format_fallback(title, user_ingredients, original)
            }
        }
    }

    /// Match the query against `recipes` and generate instructions for each
    /// of the top matches, best first.
    pub async fn suggest(&self, recipes: &[Recipe], query: &UserQuery) -> Vec<GeneratedInstruction> {
        let matches = find_matches(&query.ingredients, recipes, DEFAULT_MATCH_LIMIT);

        let mut suggestions = Vec::with_capacity(matches.len());
        for recipe in matches {
            let title = recipe.display_title();
            let steps = self.generate(title, &query.ingredients, Some(recipe)).await;
            suggestions.push(GeneratedInstruction {
                title: title.to_string(),
                steps,
            });
        }
        suggestions
    }
}
