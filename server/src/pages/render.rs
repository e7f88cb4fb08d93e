//! HTML rendering for the suggestion page.

use pantry_core::GeneratedInstruction;

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_suggestion(suggestion: &GeneratedInstruction) -> String {
    format!(
        r#"    <section class="recipe">
      <h2>{title}</h2>
      <pre>{steps}</pre>
    </section>
"#,
        title = escape_html(&suggestion.title),
        steps = escape_html(&suggestion.steps),
    )
}

/// Render the full page: the ingredient form, then one section per
/// suggestion. `submitted` is the raw input echoed back into the form; it is
/// `None` for a fresh visit.
pub fn render_page(submitted: Option<&str>, suggestions: &[GeneratedInstruction]) -> String {
    let results = match submitted {
        None => String::new(),
        Some(_) if suggestions.is_empty() => {
            "    <p class=\"empty\">No recipes matched your ingredients.</p>\n".to_string()
        }
        Some(_) => suggestions.iter().map(render_suggestion).collect(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>Smart Recipe Generator</title>
  </head>
  <body>
    <h1>Smart Recipe Generator</h1>
    <form method="post" action="/">
      <label for="ingredients">Ingredients (comma-separated)</label>
      <input type="text" id="ingredients" name="ingredients" value="{value}" placeholder="chicken, rice, garlic">
      <button type="submit">Find recipes</button>
    </form>
{results}  </body>
</html>
"#,
        value = escape_html(submitted.unwrap_or_default()),
        results = results,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Mac" & 'cheese'</b>"#),
            "&lt;b&gt;&quot;Mac&quot; &amp; &#39;cheese&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_fresh_page_has_form_only() {
        let page = render_page(None, &[]);
        assert!(page.contains(r#"name="ingredients""#));
        assert!(!page.contains("<section"));
        assert!(!page.contains("No recipes matched"));
    }

    #[test]
    fn test_results_are_escaped() {
        let suggestions = vec![GeneratedInstruction {
            title: "Fish & Chips".to_string(),
            steps: "1. Fry <hot> oil".to_string(),
        }];
        let page = render_page(Some("fish, \"potato\""), &suggestions);
        assert!(page.contains("<h2>Fish &amp; Chips</h2>"));
        assert!(page.contains("<pre>1. Fry &lt;hot&gt; oil</pre>"));
        assert!(page.contains(r#"value="fish, &quot;potato&quot;""#));
    }

    #[test]
    fn test_submitted_without_matches() {
        let page = render_page(Some("saffron"), &[]);
        assert!(page.contains("No recipes matched your ingredients."));
    }
}
