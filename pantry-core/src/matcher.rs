//! Ingredient-overlap matching between a user query and the recipe store.
//!
//! Scoring is a plain containment count: each user ingredient that appears,
//! case-insensitively, inside any of a recipe's ingredient strings is worth one
//! point. "onion" therefore scores against "red onion" and "onion rings" alike.

use crate::types::{MatchResult, Recipe};

/// How many recipes a request surfaces.
pub const DEFAULT_MATCH_LIMIT: usize = 3;

/// Case-insensitive substring test. An empty needle is contained in anything.
pub(crate) fn contains_term(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Number of user ingredients contained in at least one recipe ingredient.
pub fn match_count(user_ingredients: &[String], recipe: &Recipe) -> usize {
    user_ingredients
        .iter()
        .filter(|user| {
            recipe
                .ingredients
                .iter()
                .any(|ingredient| contains_term(ingredient, user))
        })
        .count()
}

/// Score every recipe, drop the ones with no overlap, and order by score.
///
/// The sort is stable: recipes with equal scores keep their dataset order.
pub fn score_recipes<'a>(user_ingredients: &[String], recipes: &'a [Recipe]) -> Vec<MatchResult<'a>> {
    let mut scored: Vec<MatchResult<'a>> = recipes
        .iter()
        .map(|recipe| MatchResult {
            recipe,
            match_count: match_count(user_ingredients, recipe),
        })
        .filter(|m| m.match_count > 0)
        .collect();

    scored.sort_by(|a, b| b.match_count.cmp(&a.match_count));
    scored
}

/// Top `limit` recipes for the given ingredients, best first.
pub fn find_matches<'a>(
    user_ingredients: &[String],
    recipes: &'a [Recipe],
    limit: usize,
) -> Vec<&'a Recipe> {
    let scored = score_recipes(user_ingredients, recipes);
    tracing::debug!(
        candidates = recipes.len(),
        matched = scored.len(),
        limit,
        "Scored recipes"
    );
    scored.into_iter().take(limit).map(|m| m.recipe).collect()
}
