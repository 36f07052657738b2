//! LLM provider clients.

pub mod groq;
pub mod openai;

pub use groq::Groq;
pub use openai::OpenAi;
