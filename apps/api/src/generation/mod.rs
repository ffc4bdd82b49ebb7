// Generation: the two upstream calls, then parse → compose → render.
// All upstream calls go through llm_client::TextGenerator.

pub mod handlers;
pub mod pipeline;
pub mod prompts;

pub use pipeline::{build_resume_and_cover_letter, TailoredDocuments};
