//! TSPL label-language core library.
//!
//! Provides structural validation of TSPL documents, interpretation into a
//! pixel-space layout, and the unit arithmetic both rely on. The main entry
//! points are [`validate`] for diagnostics, [`parse`] for the layout, and
//! [`render`] for the combined envelope.

#![warn(missing_docs)]

/// Built-in example documents.
pub mod catalog;
/// TSPL grammar: line splitting, argument and field tokenizing, keywords.
pub mod grammar;
/// Document interpretation into [`RenderData`].
pub mod interpret;
/// Layout types produced by the interpreter.
pub mod layout;
/// Validate-then-interpret envelope.
pub mod response;
/// Measurement parsing and pixel conversion.
pub mod units;
/// Whole-document structural validation.
pub mod validate;

// ── Convenience re-exports ──────────────────────────────────────────────────

// Validator
pub use validate::{ValidationResult, validate};

// Interpreter
pub use interpret::{InterpretError, InterpretErrorKind, parse};

// Layout
pub use layout::{Element, ElementKind, Gap, LabelSize, Reference, RenderData};

// Envelope
pub use response::{RenderResponse, render};

// Units
pub use units::{DPI, Measurement, Unit, UnitError, mm_to_pixels, parse_value_with_unit};

// Diagnostics (re-exported from the diagnostics crate)
pub use grammar::diag::{ErrorKind, LineIndex, Span, ValidationError, codes, explain};

// Examples
pub use catalog::{Example, example, examples};

// Keywords
pub use grammar::command::Command;
