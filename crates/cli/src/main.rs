mod render;

use std::fs;
use std::io::{self, Read};
use std::process;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tspl_sim_core::{example, examples, parse, render as render_document, validate};
use tspl_sim_diagnostics as diag;

use crate::render::{Format, print_summary, render_interpret_pretty, render_validation_pretty};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "tspl",
    version,
    about = "TSPL simulator: validate TSPL label files and interpret them into a canvas layout"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace).
    /// `RUST_LOG` takes precedence when set.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Check a TSPL file and report every structural error.
    #[command(alias = "check")]
    Validate {
        /// Input file, or `-` for stdin.
        file: String,
    },

    /// Interpret a TSPL file into its canvas layout (no validation).
    Parse {
        /// Input file, or `-` for stdin.
        file: String,
    },

    /// Validate, then interpret, printing the combined result envelope.
    Render {
        /// Input file, or `-` for stdin.
        file: String,
    },

    /// Explain a diagnostic ID (e.g. TSPL1101).
    Explain { id: String },

    /// List the built-in example documents, or print one by ID.
    Examples {
        /// Example ID (e.g. shipping_label). Lists all when omitted.
        id: Option<String>,
    },
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let format = Format::resolve_or_detect(cli.output.as_deref());

    let result = match cli.cmd {
        Cmd::Validate { file } => cmd_validate(&file, format),
        Cmd::Parse { file } => cmd_parse(&file, format),
        Cmd::Render { file } => cmd_render(&file, format),
        Cmd::Explain { id } => cmd_explain(&id, format),
        Cmd::Examples { id } => cmd_examples(id.as_deref(), format),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            report_failure(&err, format);
            process::exit(1);
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(io::stderr)
        .init();
}

// ── Commands ────────────────────────────────────────────────────────────
//
// Each command returns `Ok(false)` when the input was processed but rejected,
// which maps to exit code 1 without an error envelope.

fn cmd_validate(file: &str, format: Format) -> Result<bool> {
    let input = read_input(file)?;
    let result = validate(&input);
    tracing::info!(file, valid = result.valid, errors = result.errors.len(), "validate");

    match format {
        Format::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Format::Pretty => {
            render_validation_pretty(&input, display_name(file), &result.errors);
            print_summary(result.errors.len());
            if result.valid {
                eprintln!("valid");
            }
        }
    }
    Ok(result.valid)
}

fn cmd_parse(file: &str, format: Format) -> Result<bool> {
    let input = read_input(file)?;
    match parse(&input) {
        Ok(data) => {
            tracing::info!(file, elements = data.elements.len(), "parse");
            println!("{}", serde_json::to_string_pretty(&data)?);
            Ok(true)
        }
        Err(e) => {
            tracing::info!(file, error = %e, "parse failed");
            match format {
                Format::Json => {
                    let out = serde_json::json!({
                        "success": false,
                        "error": "parse_failed",
                        "code": e.error_kind().code(),
                        "line": e.line,
                        "command": e.command.as_str(),
                        "message": e.to_string(),
                    });
                    println!("{}", serde_json::to_string_pretty(&out)?);
                }
                Format::Pretty => render_interpret_pretty(&input, display_name(file), &e),
            }
            Ok(false)
        }
    }
}

fn cmd_render(file: &str, format: Format) -> Result<bool> {
    let input = read_input(file)?;
    let response = render_document(&input);
    tracing::info!(file, success = response.success, "render");

    match format {
        Format::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Format::Pretty => match &response.data {
            Some(data) => println!("{}", serde_json::to_string_pretty(data)?),
            None => {
                render_validation_pretty(&input, display_name(file), &response.validation_errors);
                print_summary(response.validation_errors.len());
                if let Some(error) = &response.error {
                    eprintln!("error: {error}");
                }
            }
        },
    }
    Ok(response.success)
}

fn cmd_explain(id: &str, format: Format) -> Result<bool> {
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "id": id,
                "summary": diag::summary(id),
                "explanation": diag::explain(id),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            // Explanation is the expected output; write to stdout, not stderr.
            if let Some(text) = diag::explain(id) {
                use ariadne::Fmt;
                match diag::summary(id) {
                    Some(summary) => {
                        println!("{}: {}\n\n{}", id.fg(ariadne::Color::Cyan), summary, text)
                    }
                    None => println!("{}: {}", id.fg(ariadne::Color::Cyan), text),
                }
            } else {
                println!("{id}: (no explanation available)");
            }
        }
    }
    Ok(true)
}

fn cmd_examples(id: Option<&str>, format: Format) -> Result<bool> {
    let Some(id) = id else {
        match format {
            Format::Json => {
                let out = serde_json::json!({ "examples": examples() });
                println!("{}", serde_json::to_string_pretty(&out)?);
            }
            Format::Pretty => {
                for e in examples() {
                    println!("{:<16} {:<10} {}", e.id, e.category, e.description);
                }
            }
        }
        return Ok(true);
    };

    let Some(entry) = example(id) else {
        bail!("unknown example '{id}'; run `tspl examples` to list them");
    };
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "id": entry.id,
                "name": entry.name,
                "category": entry.category,
                "code": entry.code,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        // Raw document, so it can be piped straight into `tspl render -`.
        Format::Pretty => print!("{}", entry.code),
    }
    Ok(true)
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// Read the whole input, from stdin when `file` is `-`.
fn read_input(file: &str) -> Result<String> {
    if file == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(file).with_context(|| format!("failed to read {file}"))
}

fn display_name(file: &str) -> &str {
    if file == "-" { "<stdin>" } else { file }
}

/// Report a command failure in the selected output format.
fn report_failure(err: &anyhow::Error, format: Format) {
    let message = format!("{err:#}");
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "success": false,
                "error": "command_failed",
                "message": message,
            });
            println!("{out}");
        }
        Format::Pretty => eprintln!("error: {message}"),
    }
}
