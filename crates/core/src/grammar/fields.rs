//! Field tokenizer and per-field extraction for the fixed-shape commands
//! (`TEXT`, `BARCODE`, `QRCODE`).
//!
//! The argument text is first cut into [`Field`]s by [`split_fields`], which
//! understands double-quoted strings. Each shape extractor then walks the
//! fields in order and reports the first one that does not fit, naming its
//! 1-based position and role.

use crate::layout::{EccLevel, QrMode};
use thiserror::Error;

/// Expected layout of a `TEXT` line.
pub const TEXT_USAGE: &str = "TEXT x,y,\"font\",rotation,x-scale,y-scale,\"content\"";
/// Expected layout of a `BARCODE` line.
pub const BARCODE_USAGE: &str =
    "BARCODE x,y,\"type\",height,readable,rotation,narrow,wide,\"code\"";
/// Expected layout of a `QRCODE` line.
pub const QRCODE_USAGE: &str = "QRCODE x,y,ecc,cell-size,mode,rotation,\"data\"";

/// One comma-separated field of a fixed-shape command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    /// Field text; for quoted fields, the text between the quotes.
    pub text: &'a str,
    /// Whether the field was written in double quotes.
    pub quoted: bool,
}

/// Why a fixed-shape command could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// A `"` was opened but never closed.
    #[error("field {position}: unterminated quoted string")]
    UnterminatedQuote {
        /// 1-based field position.
        position: usize,
    },
    /// Text follows a closing quote before the next comma.
    #[error("field {position}: unexpected text after closing quote")]
    TrailingText {
        /// 1-based field position.
        position: usize,
    },
    /// The line has the wrong number of fields.
    #[error("expected {expected} fields, found {found}")]
    FieldCount {
        /// Accepted field counts, for display.
        expected: &'static str,
        /// Number of fields found.
        found: usize,
    },
    /// A single field has the wrong form.
    #[error("field {position} ({name}): {problem}")]
    Field {
        /// 1-based field position.
        position: usize,
        /// Role of the field (e.g. `"rotation"`).
        name: &'static str,
        /// What is wrong with it.
        problem: FieldProblem,
    },
}

/// What is wrong with an individual field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldProblem {
    /// Expected ASCII digits.
    #[error("expected an unsigned integer, found {0:?}")]
    NotUnsigned(String),
    /// Digits were found but the value does not fit.
    #[error("integer {0} is too large")]
    TooLarge(String),
    /// Expected a double-quoted string.
    #[error("expected a double-quoted string, found {0:?}")]
    NotQuoted(String),
    /// A quoted string that must carry text was empty.
    #[error("quoted string must not be empty")]
    EmptyString,
    /// Expected one of a fixed set of letters.
    #[error("expected one of {allowed}, found {found:?}")]
    NotOneOf {
        /// Accepted spellings, for display.
        allowed: &'static str,
        /// The text that was found.
        found: String,
    },
}

/// Cut `rest` into comma-separated fields, honouring double quotes.
///
/// Quoted fields run to the next `"` (there is no escape syntax) and may
/// contain commas. Unquoted fields run to the next comma and are trimmed.
pub fn split_fields(rest: &str) -> Result<Vec<Field<'_>>, FieldError> {
    let b = rest.as_bytes();
    let mut fields = Vec::new();
    let mut i = 0usize;
    loop {
        let position = fields.len() + 1;
        while i < b.len() && b[i].is_ascii_whitespace() {
            i += 1;
        }
        if i < b.len() && b[i] == b'"' {
            let start = i + 1;
            let close = rest[start..]
                .find('"')
                .map(|off| start + off)
                .ok_or(FieldError::UnterminatedQuote { position })?;
            fields.push(Field {
                text: &rest[start..close],
                quoted: true,
            });
            i = close + 1;
            while i < b.len() && b[i].is_ascii_whitespace() {
                i += 1;
            }
            if i < b.len() && b[i] != b',' {
                return Err(FieldError::TrailingText { position });
            }
        } else {
            let start = i;
            let end = rest[start..].find(',').map_or(rest.len(), |off| start + off);
            fields.push(Field {
                text: rest[start..end].trim(),
                quoted: false,
            });
            i = end;
        }
        if i >= b.len() {
            break;
        }
        // Step over the comma.
        i += 1;
    }
    Ok(fields)
}

// ─── Shapes ─────────────────────────────────────────────────────────────────

/// Fields of a `TEXT` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFields<'a> {
    /// Horizontal position in dots.
    pub x: i32,
    /// Vertical position in dots.
    pub y: i32,
    /// Font name.
    pub font: &'a str,
    /// Rotation in degrees.
    pub rotation: i32,
    /// Horizontal magnification.
    pub x_scale: i32,
    /// Vertical magnification.
    pub y_scale: i32,
    /// Optional pair between the scales and the content.
    pub options: Option<[i32; 2]>,
    /// Text to print (may be empty).
    pub content: &'a str,
}

/// Fields of a `BARCODE` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarcodeFields<'a> {
    /// Horizontal position in dots.
    pub x: i32,
    /// Vertical position in dots.
    pub y: i32,
    /// Symbology name (e.g. `128`, `EAN13`).
    pub symbology: &'a str,
    /// Bar height in dots.
    pub height: i32,
    /// Human-readable line mode.
    pub readable: i32,
    /// Rotation in degrees.
    pub rotation: i32,
    /// Narrow bar width in dots.
    pub narrow: i32,
    /// Wide bar width in dots.
    pub wide: i32,
    /// Encoded payload (may be empty).
    pub code: &'a str,
}

/// Fields of a `QRCODE` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrCodeFields<'a> {
    /// Horizontal position in dots.
    pub x: i32,
    /// Vertical position in dots.
    pub y: i32,
    /// Error-correction level.
    pub ecc: EccLevel,
    /// Module size in dots.
    pub cell_size: i32,
    /// Encoding mode.
    pub mode: QrMode,
    /// Rotation in degrees.
    pub rotation: i32,
    /// Optional triple between the rotation and the data.
    pub options: Option<[i32; 3]>,
    /// Encoded payload (may be empty).
    pub data: &'a str,
}

const TEXT_NAMES: [&str; 9] = [
    "x", "y", "font", "rotation", "x-scale", "y-scale", "option", "option", "content",
];
const BARCODE_NAMES: [&str; 9] = [
    "x", "y", "type", "height", "readable", "rotation", "narrow", "wide", "code",
];
const QRCODE_NAMES: [&str; 10] = [
    "x", "y", "ecc", "cell-size", "mode", "rotation", "option", "option", "option", "data",
];

/// Read a `TEXT` argument string.
pub fn text_fields(rest: &str) -> Result<TextFields<'_>, FieldError> {
    let fields = split_fields(rest)?;
    let with_options = match fields.len() {
        7 => false,
        9 => true,
        found => {
            return Err(FieldError::FieldCount {
                expected: "7 or 9",
                found,
            });
        }
    };
    let mut c = Cursor::new(&fields);
    let x = c.uint(TEXT_NAMES[0])?;
    let y = c.uint(TEXT_NAMES[1])?;
    let font = c.quoted(TEXT_NAMES[2], false)?;
    let rotation = c.uint(TEXT_NAMES[3])?;
    let x_scale = c.uint(TEXT_NAMES[4])?;
    let y_scale = c.uint(TEXT_NAMES[5])?;
    let options = if with_options {
        Some([c.uint(TEXT_NAMES[6])?, c.uint(TEXT_NAMES[7])?])
    } else {
        None
    };
    let content = c.quoted(TEXT_NAMES[8], true)?;
    Ok(TextFields {
        x,
        y,
        font,
        rotation,
        x_scale,
        y_scale,
        options,
        content,
    })
}

/// Read a `BARCODE` argument string.
pub fn barcode_fields(rest: &str) -> Result<BarcodeFields<'_>, FieldError> {
    let fields = split_fields(rest)?;
    if fields.len() != 9 {
        return Err(FieldError::FieldCount {
            expected: "9",
            found: fields.len(),
        });
    }
    let mut c = Cursor::new(&fields);
    Ok(BarcodeFields {
        x: c.uint(BARCODE_NAMES[0])?,
        y: c.uint(BARCODE_NAMES[1])?,
        symbology: c.quoted(BARCODE_NAMES[2], false)?,
        height: c.uint(BARCODE_NAMES[3])?,
        readable: c.uint(BARCODE_NAMES[4])?,
        rotation: c.uint(BARCODE_NAMES[5])?,
        narrow: c.uint(BARCODE_NAMES[6])?,
        wide: c.uint(BARCODE_NAMES[7])?,
        code: c.quoted(BARCODE_NAMES[8], true)?,
    })
}

/// Read a `QRCODE` argument string.
pub fn qrcode_fields(rest: &str) -> Result<QrCodeFields<'_>, FieldError> {
    let fields = split_fields(rest)?;
    let with_options = match fields.len() {
        7 => false,
        10 => true,
        found => {
            return Err(FieldError::FieldCount {
                expected: "7 or 10",
                found,
            });
        }
    };
    let mut c = Cursor::new(&fields);
    let x = c.uint(QRCODE_NAMES[0])?;
    let y = c.uint(QRCODE_NAMES[1])?;
    let ecc = c.choice(QRCODE_NAMES[2], "H, M, L", EccLevel::from_letter)?;
    let cell_size = c.uint(QRCODE_NAMES[3])?;
    let mode = c.choice(QRCODE_NAMES[4], "A, M", QrMode::from_letter)?;
    let rotation = c.uint(QRCODE_NAMES[5])?;
    let options = if with_options {
        Some([
            c.uint(QRCODE_NAMES[6])?,
            c.uint(QRCODE_NAMES[7])?,
            c.uint(QRCODE_NAMES[8])?,
        ])
    } else {
        None
    };
    let data = c.quoted(QRCODE_NAMES[9], true)?;
    Ok(QrCodeFields {
        x,
        y,
        ecc,
        cell_size,
        mode,
        rotation,
        options,
        data,
    })
}

/// Walks fields in order, tracking the 1-based position for error reports.
struct Cursor<'f, 'a> {
    fields: &'f [Field<'a>],
    pos: usize,
}

impl<'f, 'a> Cursor<'f, 'a> {
    fn new(fields: &'f [Field<'a>]) -> Self {
        Self { fields, pos: 0 }
    }

    fn next(&mut self) -> Result<(usize, Field<'a>), FieldError> {
        let position = self.pos + 1;
        let field = self
            .fields
            .get(self.pos)
            .copied()
            .ok_or(FieldError::FieldCount {
                expected: "more",
                found: self.fields.len(),
            })?;
        self.pos += 1;
        Ok((position, field))
    }

    fn uint(&mut self, name: &'static str) -> Result<i32, FieldError> {
        let (position, field) = self.next()?;
        let fail = |problem| FieldError::Field {
            position,
            name,
            problem,
        };
        if field.quoted || field.text.is_empty() || !field.text.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(fail(FieldProblem::NotUnsigned(display_text(field))));
        }
        field
            .text
            .parse::<i32>()
            .map_err(|_| fail(FieldProblem::TooLarge(field.text.to_string())))
    }

    fn quoted(&mut self, name: &'static str, allow_empty: bool) -> Result<&'a str, FieldError> {
        let (position, field) = self.next()?;
        let fail = |problem| FieldError::Field {
            position,
            name,
            problem,
        };
        if !field.quoted {
            return Err(fail(FieldProblem::NotQuoted(field.text.to_string())));
        }
        if !allow_empty && field.text.is_empty() {
            return Err(fail(FieldProblem::EmptyString));
        }
        Ok(field.text)
    }

    fn choice<T>(
        &mut self,
        name: &'static str,
        allowed: &'static str,
        pick: fn(&str) -> Option<T>,
    ) -> Result<T, FieldError> {
        let (position, field) = self.next()?;
        let found = if field.quoted { None } else { pick(field.text) };
        found.ok_or_else(|| FieldError::Field {
            position,
            name,
            problem: FieldProblem::NotOneOf {
                allowed,
                found: display_text(field),
            },
        })
    }
}

/// Field text as the user wrote it, quotes included.
fn display_text(field: Field<'_>) -> String {
    if field.quoted {
        format!("\"{}\"", field.text)
    } else {
        field.text.to_string()
    }
}
