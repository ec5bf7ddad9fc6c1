//! Whole-document validation.
//!
//! [`validate`] is an accumulator: every semantic line is checked on its own
//! and every finding is collected, then the whole-document checks run. It
//! never stops early and never fails; a bad document simply produces a
//! [`ValidationResult`] with `valid == false`.

mod args;
mod context;

pub use crate::grammar::diag::ValidationError;
use crate::grammar::command::Command;
use crate::grammar::diag::ErrorKind;
use crate::grammar::fields::{
    BARCODE_USAGE, FieldError, QRCODE_USAGE, TEXT_USAGE, barcode_fields, qrcode_fields,
    text_fields,
};
use crate::grammar::lexer::lines;
use context::LineCtx;
use serde::Serialize;

/// Outcome of validating one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// `true` iff `errors` is empty.
    pub valid: bool,
    /// Findings in line order, whole-document findings (line 0) last.
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Findings of the given kind.
    pub fn errors_of(&self, kind: ErrorKind) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().filter(move |e| e.kind == kind)
    }
}

/// Validate a document, collecting every structural error.
pub fn validate(text: &str) -> ValidationResult {
    let mut errors = Vec::new();
    let mut has_size = false;
    let mut has_print = false;
    let mut checked = 0usize;

    for line in lines(text) {
        checked += 1;
        let Some(command) = line.command() else {
            let name = line.command_name();
            errors.push(ValidationError::new(
                ErrorKind::UnknownCommand,
                line.number,
                name.as_str(),
                format!("unknown command: {name}"),
            ));
            continue;
        };

        match command {
            Command::Size => has_size = true,
            Command::Print => has_print = true,
            _ => {}
        }

        if let Err(e) = check_line(&LineCtx { line, command }) {
            tracing::trace!(line = e.line, code = e.code(), message = %e.message, "validation finding");
            errors.push(e);
        }
    }

    if !has_size {
        errors.push(ValidationError::document(
            ErrorKind::MissingRequiredCommand,
            Command::Size.as_str(),
            "missing required SIZE command",
        ));
    }
    if !has_print {
        errors.push(ValidationError::document(
            ErrorKind::MissingRequiredCommand,
            Command::Print.as_str(),
            "missing required PRINT command",
        ));
    }

    tracing::debug!(lines = checked, errors = errors.len(), "validated document");
    ValidationResult::from_errors(errors)
}

/// Apply the structural rule for one recognized command.
fn check_line(cx: &LineCtx<'_>) -> Result<(), ValidationError> {
    match cx.command {
        Command::Size => args::measurement_pair(cx, "width", "height"),
        Command::Gap => args::measurement_pair(cx, "distance", "offset"),
        Command::Direction => args::direction(cx),
        Command::Reference => args::reference(cx),
        Command::Text => shape(cx, text_fields(cx.line.rest).map(drop), TEXT_USAGE),
        Command::Barcode => shape(cx, barcode_fields(cx.line.rest).map(drop), BARCODE_USAGE),
        Command::Qrcode => shape(cx, qrcode_fields(cx.line.rest).map(drop), QRCODE_USAGE),
        Command::Box => args::integers(cx, ["x", "y", "end-x", "end-y", "thickness"]),
        Command::Bar => args::integers(cx, ["x", "y", "width", "height"]),
        Command::Print => args::print(cx),
        Command::Density => args::density(cx),
        Command::Speed => args::speed(cx),
        _ => Ok(()),
    }
}

fn shape(
    cx: &LineCtx<'_>,
    parsed: Result<(), FieldError>,
    usage: &str,
) -> Result<(), ValidationError> {
    parsed.map_err(|e| {
        cx.error(
            ErrorKind::PatternMismatch,
            format!("{e}; expected: {usage}"),
        )
    })
}
