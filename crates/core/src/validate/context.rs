use crate::grammar::command::Command;
use crate::grammar::diag::{ErrorKind, ValidationError};
use crate::grammar::lexer::SourceLine;

/// Per-line view used by the validation rules.
#[derive(Clone, Copy)]
pub(super) struct LineCtx<'a> {
    pub(super) line: SourceLine<'a>,
    pub(super) command: Command,
}

impl LineCtx<'_> {
    /// Build a finding attributed to this line and command.
    pub(super) fn error(&self, kind: ErrorKind, message: impl Into<String>) -> ValidationError {
        ValidationError::new(kind, self.line.number, self.command.as_str(), message)
    }
}
