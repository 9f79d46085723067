// Hybrid résumé / job-description scoring.
// Skill overlap against a controlled vocabulary plus embedding similarity, fused by fixed weights.
// Embedding calls go through the injected `Embedder`; nothing here loads a model.

pub mod extractor;
pub mod fusion;
pub mod handlers;
pub mod overlap;
pub mod pipeline;
pub mod semantic;
pub mod vocabulary;

pub use pipeline::Analyzer;
pub use vocabulary::VocabularyStore;
