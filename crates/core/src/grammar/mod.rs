/// Recognized command keywords.
pub mod command;
/// Re-exports from the diagnostics crate.
pub mod diag;
/// Quote-aware field tokenizer and fixed-shape extractors.
pub mod fields;
/// Line scanner and positional argument splitter.
pub mod lexer;
