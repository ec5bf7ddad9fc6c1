//! Document interpretation into a [`RenderData`] layout.
//!
//! [`parse`] is fail-fast: the first line it cannot read aborts the call and
//! no partial layout is returned. Only the commands that shape the layout are
//! interpreted; every other line, known or not, is skipped.

use crate::grammar::command::Command;
use crate::grammar::diag::ErrorKind;
use crate::grammar::fields::{FieldError, barcode_fields, qrcode_fields, text_fields};
use crate::grammar::lexer::{lines, split_args};
use crate::layout::{
    BarProps, BarcodeProps, BoxProps, Element, ElementKind, Gap, LabelSize, QrCodeProps,
    Reference, RenderData, TextProps,
};
use crate::units::{Unit, UnitError, mm_to_pixels, parse_value_with_unit};
use thiserror::Error;

/// The first problem that stopped interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {command}: {kind}")]
pub struct InterpretError {
    /// 1-based source line.
    pub line: usize,
    /// Command on that line.
    pub command: Command,
    /// What went wrong.
    pub kind: InterpretErrorKind,
}

impl InterpretError {
    /// Category of this failure in the shared diagnostic taxonomy.
    pub fn error_kind(&self) -> ErrorKind {
        match self.kind {
            InterpretErrorKind::MissingArguments { .. } => ErrorKind::ArgumentCount,
            InterpretErrorKind::Measurement { .. } | InterpretErrorKind::NotAnInteger { .. } => {
                ErrorKind::ArgumentFormat
            }
            InterpretErrorKind::UnitMismatch { .. } => ErrorKind::UnitMismatch,
            InterpretErrorKind::Fields(_) => ErrorKind::PatternMismatch,
        }
    }
}

/// Reasons a single line cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpretErrorKind {
    /// Fewer arguments than the command needs.
    #[error("expected at least {expected} arguments, found {found}")]
    MissingArguments {
        /// Minimum argument count.
        expected: usize,
        /// Arguments present.
        found: usize,
    },
    /// A measurement could not be read.
    #[error("invalid {name}: {source}")]
    Measurement {
        /// Role of the measurement (e.g. `"width"`).
        name: &'static str,
        /// Underlying parse failure.
        #[source]
        source: UnitError,
    },
    /// The two measurements of a pair use different units.
    #[error("units differ ({first} vs {second})")]
    UnitMismatch {
        /// Unit of the first measurement.
        first: Unit,
        /// Unit of the second measurement.
        second: Unit,
    },
    /// An integer argument could not be read.
    #[error("{name} must be an integer, found {value:?}")]
    NotAnInteger {
        /// Role of the argument.
        name: &'static str,
        /// Text that was found.
        value: String,
    },
    /// A fixed-shape command did not match its field layout.
    #[error(transparent)]
    Fields(#[from] FieldError),
}

/// Interpret a document into a layout.
///
/// Callers normally run [`validate`](crate::validate::validate) first, but
/// malformed input still yields an [`InterpretError`] rather than a panic.
pub fn parse(text: &str) -> Result<RenderData, InterpretError> {
    let mut data = RenderData::default();

    for line in lines(text) {
        let Some(command) = line.command() else {
            tracing::trace!(line = line.number, keyword = line.keyword, "skipping unknown command");
            continue;
        };
        apply(&mut data, command, line.rest).map_err(|kind| InterpretError {
            line: line.number,
            command,
            kind,
        })?;
    }

    // Declared numbers are read as millimeters regardless of `label_size.unit`,
    // so an inch-denominated SIZE yields an undersized canvas.
    data.width = mm_to_pixels(data.label_size.width);
    data.height = mm_to_pixels(data.label_size.height);

    tracing::debug!(
        width = data.width,
        height = data.height,
        elements = data.elements.len(),
        "interpreted document"
    );
    Ok(data)
}

fn apply(data: &mut RenderData, command: Command, rest: &str) -> Result<(), InterpretErrorKind> {
    match command {
        Command::Size => {
            let (width, height, unit) = measurement_pair(rest, ["width", "height"])?;
            data.label_size = LabelSize {
                width,
                height,
                unit: Some(unit),
            };
        }
        Command::Gap => {
            let (distance, offset, unit) = measurement_pair(rest, ["distance", "offset"])?;
            data.gap = Gap {
                distance,
                offset,
                unit: Some(unit),
            };
        }
        Command::Direction => {
            let [direction] = integers(rest, ["direction"])?;
            data.direction = direction;
        }
        Command::Reference => {
            let [x, y] = integers(rest, ["x", "y"])?;
            data.reference = Reference { x, y };
        }
        Command::Text => {
            let t = text_fields(rest)?;
            data.elements.push(Element {
                x: t.x,
                y: t.y,
                kind: ElementKind::Text(TextProps {
                    text: t.content.to_string(),
                    font: t.font.to_string(),
                    rotation: t.rotation,
                    x_scale: t.x_scale,
                    y_scale: t.y_scale,
                }),
            });
        }
        Command::Barcode => {
            let b = barcode_fields(rest)?;
            data.elements.push(Element {
                x: b.x,
                y: b.y,
                kind: ElementKind::Barcode(BarcodeProps {
                    code: b.code.to_string(),
                    symbology: b.symbology.to_string(),
                    height: b.height,
                    readable: b.readable,
                    rotation: b.rotation,
                    narrow: b.narrow,
                    wide: b.wide,
                }),
            });
        }
        Command::Qrcode => {
            let q = qrcode_fields(rest)?;
            data.elements.push(Element {
                x: q.x,
                y: q.y,
                kind: ElementKind::QrCode(QrCodeProps {
                    data: q.data.to_string(),
                    ecc_level: q.ecc,
                    cell_size: q.cell_size,
                    mode: q.mode,
                    rotation: q.rotation,
                }),
            });
        }
        Command::Box => {
            let [x, y, end_x, end_y, thickness] =
                integers(rest, ["x", "y", "end-x", "end-y", "thickness"])?;
            data.elements.push(Element {
                x,
                y,
                kind: ElementKind::Box(BoxProps {
                    end_x,
                    end_y,
                    thickness,
                }),
            });
        }
        Command::Bar => {
            let [x, y, width, height] = integers(rest, ["x", "y", "width", "height"])?;
            data.elements.push(Element {
                x,
                y,
                kind: ElementKind::Bar(BarProps { width, height }),
            });
        }
        Command::Cls | Command::Print => {}
        other => {
            tracing::trace!(command = %other, "no layout semantics; skipped");
        }
    }
    Ok(())
}

/// First `N` arguments as integers; extra arguments are ignored.
fn integers<const N: usize>(
    rest: &str,
    names: [&'static str; N],
) -> Result<[i32; N], InterpretErrorKind> {
    let args = split_args(rest);
    if args.len() < N {
        return Err(InterpretErrorKind::MissingArguments {
            expected: N,
            found: args.len(),
        });
    }
    let mut out = [0i32; N];
    for ((slot, value), name) in out.iter_mut().zip(&args).zip(names) {
        *slot = value
            .parse::<i32>()
            .map_err(|_| InterpretErrorKind::NotAnInteger {
                name,
                value: (*value).to_string(),
            })?;
    }
    Ok(out)
}

/// Two measurements that must share a unit; extra arguments are ignored.
fn measurement_pair(
    rest: &str,
    names: [&'static str; 2],
) -> Result<(f64, f64, Unit), InterpretErrorKind> {
    let args = split_args(rest);
    if args.len() < 2 {
        return Err(InterpretErrorKind::MissingArguments {
            expected: 2,
            found: args.len(),
        });
    }
    let read = |i: usize| {
        parse_value_with_unit(args[i]).map_err(|source| InterpretErrorKind::Measurement {
            name: names[i],
            source,
        })
    };
    let first = read(0)?;
    let second = read(1)?;
    if first.unit != second.unit {
        return Err(InterpretErrorKind::UnitMismatch {
            first: first.unit,
            second: second.unit,
        });
    }
    Ok((first.value, second.value, first.unit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{EccLevel, QrMode};

    #[test]
    fn defaults_without_layout_commands() {
        let data = parse("CLS\nPRINT 1\n").unwrap();
        assert_eq!(data, RenderData::default());
    }

    #[test]
    fn size_and_gap_are_recorded() {
        let data = parse("SIZE 50 mm, 30 mm\nGAP 2 mm, 0 mm\n").unwrap();
        assert_eq!(data.label_size, LabelSize { width: 50.0, height: 30.0, unit: Some(Unit::Mm) });
        assert_eq!(data.gap, Gap { distance: 2.0, offset: 0.0, unit: Some(Unit::Mm) });
        assert_eq!((data.width, data.height), (399, 239));
    }

    #[test]
    fn later_size_replaces_earlier() {
        let data = parse("SIZE 10mm,10mm\nSIZE 25.4mm,50.8mm\n").unwrap();
        assert_eq!((data.width, data.height), (203, 406));
    }

    #[test]
    fn unit_mismatch_fails() {
        let err = parse("SIZE 2 inch, 30 mm\n").unwrap_err();
        assert_eq!(err.line, 1);
        assert_eq!(err.command, Command::Size);
        assert_eq!(
            err.kind,
            InterpretErrorKind::UnitMismatch { first: Unit::Inch, second: Unit::Mm }
        );
        assert_eq!(err.error_kind(), ErrorKind::UnitMismatch);
        assert_eq!(err.to_string(), "line 1: SIZE: units differ (inch vs mm)");
    }

    #[test]
    fn gap_unit_mismatch_fails() {
        let err = parse("GAP 0.12 inch, 0 mm\n").unwrap_err();
        assert_eq!(err.command, Command::Gap);
    }

    #[test]
    fn inch_size_is_converted_as_millimeters() {
        let data = parse("SIZE 2 inch, 1 inch\n").unwrap();
        assert_eq!(data.label_size.unit, Some(Unit::Inch));
        // 2 "mm" -> 15 px, not the 406 px a 2 inch label really spans.
        assert_eq!((data.width, data.height), (15, 7));
    }

    #[test]
    fn overflowing_measurement_fails_instead_of_saturating() {
        let doc = format!("GAP 2mm,0mm\nSIZE 50mm,{}mm\n", "9".repeat(400));
        let err = parse(&doc).unwrap_err();
        assert_eq!(err.line, 2);
        assert!(matches!(
            err.kind,
            InterpretErrorKind::Measurement { name: "height", source: UnitError::OutOfRange(_) }
        ));
        assert_eq!(err.error_kind(), ErrorKind::ArgumentFormat);
    }

    #[test]
    fn direction_is_not_range_checked() {
        let data = parse("DIRECTION 7\n").unwrap();
        assert_eq!(data.direction, 7);
    }

    #[test]
    fn reference_is_recorded() {
        let data = parse("REFERENCE 12, -4\n").unwrap();
        assert_eq!(data.reference, Reference { x: 12, y: -4 });
    }

    #[test]
    fn elements_keep_source_order() {
        let doc = "BOX 0,0,100,100,2\nTEXT 10,10,\"3\",0,1,1,\"A\"\nBAR 5,5,50,3\n\
                   QRCODE 20,20,M,4,A,0,\"q\"\nBARCODE 1,2,\"128\",50,1,0,2,2,\"123\"\n";
        let data = parse(doc).unwrap();
        let kinds: Vec<_> = data.elements.iter().map(Element::type_name).collect();
        assert_eq!(kinds, vec!["box", "text", "bar", "qrcode", "barcode"]);
        assert_eq!(
            data.elements[3].kind,
            ElementKind::QrCode(QrCodeProps {
                data: "q".into(),
                ecc_level: EccLevel::M,
                cell_size: 4,
                mode: QrMode::A,
                rotation: 0,
            })
        );
        assert_eq!(
            data.elements[0],
            Element { x: 0, y: 0, kind: ElementKind::Box(BoxProps { end_x: 100, end_y: 100, thickness: 2 }) }
        );
    }

    #[test]
    fn box_with_bad_integer_fails_instead_of_zeroing() {
        let err = parse("BOX 0,0,wide,100,2\n").unwrap_err();
        assert_eq!(
            err.kind,
            InterpretErrorKind::NotAnInteger { name: "end-x", value: "wide".into() }
        );
        assert_eq!(err.error_kind(), ErrorKind::ArgumentFormat);
    }

    #[test]
    fn missing_arguments_fail() {
        let err = parse("BAR 1,2,3\n").unwrap_err();
        assert_eq!(err.kind, InterpretErrorKind::MissingArguments { expected: 4, found: 3 });
        assert_eq!(err.error_kind(), ErrorKind::ArgumentCount);
    }

    #[test]
    fn unknown_and_unhandled_commands_are_skipped() {
        let data = parse("FOO 1,2\nDENSITY 99\nSPEED zero\nSIZE 25.4mm,25.4mm\n").unwrap();
        assert_eq!((data.width, data.height), (203, 203));
    }

    #[test]
    fn first_failure_aborts() {
        let err = parse("TEXT 1,1,\"3\",0,1,1,nope\nSIZE 1mm\n").unwrap_err();
        assert_eq!(err.line, 1);
        assert_eq!(err.error_kind(), ErrorKind::PatternMismatch);
    }
}
