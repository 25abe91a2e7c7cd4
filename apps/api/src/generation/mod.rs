// Cover-letter generation: prompt construction, template fallback, and the
// per-session orchestrator that chooses between them.
// All Gemini calls go through llm_client — nothing here talks HTTP directly.

pub mod fallback;
pub mod handlers;
pub mod models;
pub mod orchestrator;
pub mod prompts;
