// Free and premium career report flows. Model access is via `llm_client` only.

pub mod free;
pub mod handlers;
pub mod premium;
pub mod prompts;
