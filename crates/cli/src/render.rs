//! Pretty diagnostic rendering using ariadne.
//!
//! Line-addressed findings are anchored back into the source through a
//! [`LineIndex`] so each report shows the offending line. Whole-document
//! findings (line 0) print as standalone messages.

use std::io::{self, IsTerminal};

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use tspl_sim_core::InterpretError;
use tspl_sim_diagnostics::{LineIndex, ValidationError};

// ── Output format ───────────────────────────────────────────────────────

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Coloured, source-annotated output (ariadne).
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Use the explicit choice, else pretty on a TTY and JSON otherwise.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            _ => {
                if io::stdout().is_terminal() {
                    Format::Pretty
                } else {
                    Format::Json
                }
            }
        }
    }
}

// ── Pretty rendering ────────────────────────────────────────────────────

/// One finding to draw, independent of which pass produced it.
struct Finding<'a> {
    line: usize,
    code: &'static str,
    command: &'a str,
    message: String,
    help: Option<&'static str>,
}

impl<'a> From<&'a ValidationError> for Finding<'a> {
    fn from(e: &'a ValidationError) -> Self {
        Finding {
            line: e.line,
            code: e.code(),
            command: &e.command,
            message: e.message.clone(),
            help: e.explain(),
        }
    }
}

impl<'a> From<&'a InterpretError> for Finding<'a> {
    fn from(e: &'a InterpretError) -> Self {
        let code = e.error_kind().code();
        Finding {
            line: e.line,
            code,
            command: e.command.as_str(),
            message: e.kind.to_string(),
            help: tspl_sim_diagnostics::explain(code),
        }
    }
}

fn render_findings(source: &str, filename: &str, findings: &[Finding<'_>]) {
    let index = LineIndex::new(source);
    let config = Config::default()
        .with_compact(false)
        .with_index_type(IndexType::Byte);
    let mut cache = (filename, Source::from(source));

    for f in findings {
        let Some(span) = index.line_span(f.line) else {
            eprintln!("error[{}]: {}: {}", f.code, f.command, f.message);
            if let Some(help) = f.help {
                eprintln!("  = help: {help}");
            }
            continue;
        };

        let range = span.start..span.end;
        let mut builder = Report::build(ReportKind::Error, (filename, range.clone()))
            .with_code(f.code)
            .with_message(format!("{}: {}", f.command, f.message))
            .with_config(config)
            .with_label(
                Label::new((filename, range))
                    .with_message(&f.message)
                    .with_color(Color::Red),
            );
        if let Some(help) = f.help {
            builder = builder.with_help(help);
        }
        builder.finish().eprint(&mut cache).ok();
    }
}

/// Render validation findings to stderr with source context.
pub(crate) fn render_validation_pretty(source: &str, filename: &str, errors: &[ValidationError]) {
    let findings: Vec<Finding<'_>> = errors.iter().map(Finding::from).collect();
    render_findings(source, filename, &findings);
}

/// Render an interpreter failure to stderr with source context.
pub(crate) fn render_interpret_pretty(source: &str, filename: &str, error: &InterpretError) {
    render_findings(source, filename, &[Finding::from(error)]);
}

// ── Summary line ────────────────────────────────────────────────────────

/// Print a coloured summary line, e.g. `2 errors`.
pub(crate) fn print_summary(errors: usize) {
    use ariadne::Fmt;

    if errors == 0 {
        return;
    }
    let s = if errors == 1 { "" } else { "s" };
    eprintln!("{}", format!("{errors} error{s}").fg(Color::Red));
}
