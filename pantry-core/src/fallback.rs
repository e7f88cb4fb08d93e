//! Deterministic instruction text used when no model output is available.

use crate::matcher::contains_term;
use crate::types::Recipe;

/// Cap on how many missing ingredients are listed.
pub const MAX_MISSING_LISTED: usize = 5;

/// Original-recipe ingredients (lower-cased) with no counterpart among the
/// user's ingredients. Either string containing the other counts as a match.
pub fn missing_ingredients(user_ingredients: &[String], recipe: &Recipe) -> Vec<String> {
    recipe
        .ingredients
        .iter()
        .map(|ingredient| ingredient.to_lowercase())
        .filter(|ingredient| {
            !user_ingredients.iter().map(|u| u.trim()).any(|user| {
                contains_term(ingredient, user) || contains_term(user, ingredient)
            })
        })
        .collect()
}

/// Build instructions from the stored recipe, or a generic skeleton when the
/// recipe is absent or has no steps.
pub fn format_fallback(title: &str, user_ingredients: &[String], original: Option<&Recipe>) -> String {
    match original {
        Some(recipe) if !recipe.steps.is_empty() => adapt_stored_steps(user_ingredients, recipe),
        _ => generic_template(title, user_ingredients),
    }
}

fn adapt_stored_steps(user_ingredients: &[String], recipe: &Recipe) -> String {
    let mut out = recipe
        .steps
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {}", i + 1, step))
        .collect::<Vec<_>>()
        .join("\n");

    out.push_str(&format!(
        "\nNote: This recipe has been adapted for your available ingredients: {}",
        user_ingredients.join(", ")
    ));

    let missing = missing_ingredients(user_ingredients, recipe);
    if missing.is_empty() {
        out.push_str("\n\nYou have most of the ingredients needed for this recipe!");
    } else {
        out.push_str("\n\nMissing ingredients you might want to substitute or add:\n");
        let bullets: Vec<String> = missing
            .iter()
            .take(MAX_MISSING_LISTED)
            .map(|ingredient| format!("• {}", ingredient))
            .collect();
        out.push_str(&bullets.join("\n"));
    }

    out
}

fn generic_template(title: &str, user_ingredients: &[String]) -> String {
    format!(
        "Here's a basic recipe for {title} using your ingredients:

1. Prepare all your ingredients: {ingredients}
2. Heat a pan or pot over medium heat
3. Start with aromatics like onions and garlic if available
4. Add your main protein or vegetables
5. Season with salt, pepper, and any available spices
6. Cook until ingredients are properly done
7. Taste and adjust seasoning as needed
8. Serve hot and enjoy!

Note: This is a basic template. For detailed instructions, please ensure your AI text generation service is properly configured.",
        title = title,
        ingredients = user_ingredients.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_missing_ingredients_basic() {
        let recipe = Recipe::new("Sauce", strings(&["onion", "garlic", "tomato"]), vec![]);
        assert_eq!(
            missing_ingredients(&strings(&["onion"]), &recipe),
            vec!["garlic", "tomato"]
        );
    }

    #[test]
    fn test_missing_ingredients_containment_both_ways() {
        let recipe = Recipe::new("Stew", strings(&["Beef", "2 carrots", "thyme"]), vec![]);
        // "beef chuck" contains "beef"; "2 carrots" contains "carrot".
        let user = strings(&["  beef chuck ", "CARROT"]);
        assert_eq!(missing_ingredients(&user, &recipe), vec!["thyme"]);
    }

    #[test]
    fn test_empty_user_term_covers_every_ingredient() {
        let recipe = Recipe::new("Sauce", strings(&["onion", "garlic", "tomato"]), vec![]);
        assert!(missing_ingredients(&strings(&["onion", ""]), &recipe).is_empty());
    }

    #[test]
    fn test_trailing_comma_reports_nothing_missing() {
        let recipe = Recipe::new(
            "Sauce",
            strings(&["onion", "garlic", "tomato"]),
            strings(&["Simmer."]),
        );
        let out = format_fallback("Sauce", &strings(&["onion", ""]), Some(&recipe));
        assert_eq!(
            out,
            "1. Simmer.\nNote: This recipe has been adapted for your available ingredients: onion, \n\n\
             You have most of the ingredients needed for this recipe!"
        );
    }

    #[test]
    fn test_stored_steps_with_missing_list() {
        let recipe = Recipe::new(
            "Tomato Soup",
            strings(&["tomato", "onion", "cream"]),
            strings(&["Chop everything.", "Simmer 20 minutes."]),
        );
        let out = format_fallback("Tomato Soup", &strings(&["tomato"]), Some(&recipe));
        assert_eq!(
            out,
            "1. Chop everything.\n2. Simmer 20 minutes.\n\
             Note: This recipe has been adapted for your available ingredients: tomato\n\n\
             Missing ingredients you might want to substitute or add:\n\
             • onion\n• cream"
        );
    }

    #[test]
    fn test_stored_steps_nothing_missing() {
        let recipe = Recipe::new("Toast", strings(&["bread", "Butter"]), strings(&["Toast it."]));
        let out = format_fallback("Toast", &strings(&["bread", "butter"]), Some(&recipe));
        assert_eq!(
            out,
            "1. Toast it.\nNote: This recipe has been adapted for your available ingredients: bread, butter\n\n\
             You have most of the ingredients needed for this recipe!"
        );
    }

    #[test]
    fn test_missing_list_capped() {
        let recipe = Recipe::new(
            "Curry",
            strings(&["a1", "b2", "c3", "d4", "e5", "f6", "g7"]),
            strings(&["Cook."]),
        );
        let out = format_fallback("Curry", &strings(&["rice"]), Some(&recipe));
        assert_eq!(out.matches("• ").count(), MAX_MISSING_LISTED);
        assert!(out.contains("• e5"));
        assert!(!out.contains("f6"));
    }

    #[test]
    fn test_generic_template_without_steps() {
        let recipe = Recipe::new("Mystery Bake", strings(&["flour"]), vec![]);
        let user = strings(&["Flour", "eggs", "sugar"]);
        let out = format_fallback("Mystery Bake", &user, Some(&recipe));

        assert!(out.starts_with("Here's a basic recipe for Mystery Bake using your ingredients:"));
        assert!(out.contains("1. Prepare all your ingredients: Flour, eggs, sugar"));
        assert!(out.contains("8. Serve hot and enjoy!"));
        for ingredient in &user {
            assert!(out.contains(ingredient.as_str()));
        }
        assert_eq!(out, format_fallback("Mystery Bake", &user, None));
    }

    #[test]
    fn test_deterministic() {
        let recipe = Recipe::new("Pasta", strings(&["pasta", "basil"]), strings(&["Boil."]));
        let user = strings(&["pasta"]);
        assert_eq!(
            format_fallback("Pasta", &user, Some(&recipe)),
            format_fallback("Pasta", &user, Some(&recipe))
        );
    }
}
