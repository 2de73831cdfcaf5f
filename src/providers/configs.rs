pub mod base;
pub mod gemini;
pub mod openrouter;

pub use base::ProviderConfig;
pub use gemini::GeminiProviderConfig;
pub use openrouter::OpenRouterProviderConfig;
