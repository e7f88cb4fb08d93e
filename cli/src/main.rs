mod normalize;
mod suggest;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pantry_core::DEFAULT_NORMALIZE_LIMIT;

#[derive(Parser)]
#[command(name = "pantry")]
#[command(about = "Pantry CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a raw recipe corpus into the working recipe dataset
    Normalize {
        /// Raw corpus JSON file
        #[arg(long, default_value = "cookbook-100.json")]
        input: PathBuf,
        /// Where to write the normalized recipes
        #[arg(long, default_value = "recipes50.json")]
        output: PathBuf,
        /// Number of corpus entries to keep
        #[arg(long, default_value_t = DEFAULT_NORMALIZE_LIMIT)]
        limit: usize,
    },
    /// Suggest recipes for a comma-separated ingredient list
    Suggest {
        /// Recipe dataset to search
        #[arg(long, default_value = "recipes50.json")]
        recipes: PathBuf,
        /// Skip the text-generation service and use stored steps only
        #[arg(long)]
        offline: bool,
        /// Ingredients, e.g. "chicken, rice, garlic"
        ingredients: String,
    },
}

fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Normalize {
            input,
            output,
            limit,
        } => {
            normalize::normalize(&input, &output, limit)?;
        }
        Commands::Suggest {
            recipes,
            offline,
            ingredients,
        } => {
            suggest::suggest(&recipes, &ingredients, offline).await?;
        }
    }

    Ok(())
}
