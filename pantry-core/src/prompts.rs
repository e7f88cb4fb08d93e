//! Prompt templates sent to the text-generation service.

/// Render the cooking-instructions prompt for a matched recipe.
pub fn render_instructions_prompt(title: &str, ingredients: &[String]) -> String {
    let ingredients_list = ingredients.join(", ");

    format!(
        r#"Suggest a step-by-step recipe for "{title}" using these ingredients:
{ingredients_list}.

If something is missing, offer substitutions. Provide only cooking instructions in clear numbered steps."#,
        title = title,
        ingredients_list = ingredients_list
    )
}
