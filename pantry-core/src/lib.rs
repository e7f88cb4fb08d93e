pub mod error;
pub mod fallback;
pub mod generate;
pub mod llm;
pub mod matcher;
pub mod normalize;
pub mod prompts;
pub mod store;
pub mod types;

pub use error::{NormalizeError, StoreError};
pub use fallback::{format_fallback, missing_ingredients, MAX_MISSING_LISTED};
pub use generate::{detect_capability, detect_capability_from_env, AiCapability, InstructionGenerator};
pub use matcher::{find_matches, match_count, score_recipes, DEFAULT_MATCH_LIMIT};
pub use normalize::{normalize_corpus, normalize_file, DEFAULT_NORMALIZE_LIMIT};
pub use store::RecipeStore;
pub use types::{GeneratedInstruction, MatchResult, Recipe, UserQuery};
