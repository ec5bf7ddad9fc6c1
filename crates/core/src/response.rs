//! Combined validate-then-interpret result envelope.

use crate::grammar::diag::ValidationError;
use crate::interpret::parse;
use crate::layout::RenderData;
use crate::validate::validate;
use serde::Serialize;

/// Message used when validation rejects the document.
pub const VALIDATION_FAILED: &str = "validation failed";

/// Outcome of [`render`], shaped for JSON consumers.
///
/// Exactly one of `data` and `error` is present. `validation_errors` is only
/// populated (and only serialized) when validation rejected the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderResponse {
    /// `true` when `data` holds a layout.
    pub success: bool,
    /// Interpreted layout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<RenderData>,
    /// Short failure description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Findings that caused a `"validation failed"` response.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validation_errors: Vec<ValidationError>,
}

/// Validate `text` and, if it is valid, interpret it.
pub fn render(text: &str) -> RenderResponse {
    let report = validate(text);
    if !report.valid {
        return RenderResponse {
            success: false,
            data: None,
            error: Some(VALIDATION_FAILED.to_string()),
            validation_errors: report.errors,
        };
    }
    match parse(text) {
        Ok(data) => RenderResponse {
            success: true,
            data: Some(data),
            error: None,
            validation_errors: Vec::new(),
        },
        Err(e) => {
            tracing::debug!(error = %e, "valid document failed to interpret");
            RenderResponse {
                success: false,
                data: None,
                error: Some(format!("parse error: {e}")),
                validation_errors: Vec::new(),
            }
        }
    }
}
