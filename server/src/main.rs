use std::sync::Arc;

use anyhow::{Context, Result};
use pantry_core::{detect_capability_from_env, InstructionGenerator, RecipeStore};
use pantry_server::config::ServerConfig;
use pantry_server::telemetry::init_telemetry;
use pantry_server::{app, Pantry};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is normal; real environment variables still apply.
    let dotenv = dotenvy::dotenv();

    init_telemetry();

    if let Err(e) = dotenv {
        tracing::debug!("No .env file loaded: {}", e);
    }

    let config = ServerConfig::from_env()?;

    let store = RecipeStore::load(&config.recipes_path).with_context(|| {
        format!(
            "cannot serve requests without recipes from {}",
            config.recipes_path.display()
        )
    })?;

    let capability = detect_capability_from_env().await;
    if !capability.is_available() {
        tracing::info!("Using fallback recipe generation");
    }

    let state = Arc::new(Pantry {
        store,
        generator: InstructionGenerator::new(capability),
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
