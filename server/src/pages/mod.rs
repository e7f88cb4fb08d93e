pub mod render;

use crate::AppState;
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Form, Router};
use pantry_core::UserQuery;
use serde::Deserialize;

/// Returns the router for the suggestion page (mounted at /)
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(show_form).post(suggest))
}

#[derive(Debug, Deserialize)]
pub struct SuggestForm {
    pub ingredients: String,
}

pub async fn show_form() -> Html<String> {
    Html(render::render_page(None, &[]))
}

pub async fn suggest(State(state): State<AppState>, Form(form): Form<SuggestForm>) -> Html<String> {
    let query = UserQuery::parse(&form.ingredients);
    let suggestions = state
        .generator
        .suggest(state.store.recipes(), &query)
        .await;

    tracing::info!(
        ingredients = query.ingredients.len(),
        suggestions = suggestions.len(),
        "Served recipe suggestions"
    );

    Html(render::render_page(Some(&form.ingredients), &suggestions))
}
