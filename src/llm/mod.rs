/// Ollama-backed generation for the tool endpoints.
///
/// The whole desk computes one thing: given a tool and its payload fields,
/// build that tool's persona prompt ([`prompts`]) and run it through a local
/// Ollama model ([`ollama::OllamaClient`]). The server's endpoint handlers
/// are the only callers; the client half of the crate never talks to Ollama
/// directly.
pub mod ollama;
pub mod prompts;

pub use ollama::OllamaClient;
