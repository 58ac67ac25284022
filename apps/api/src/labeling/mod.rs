// Labeling engine: task catalog, prompt construction, response validation.
// All LLM calls go through llm_client; no direct HTTP calls here.

pub mod handlers;
pub mod labeler;
pub mod models;
pub mod prompts;
pub mod task;
pub mod validator;
