use super::context::LineCtx;
use crate::grammar::diag::{ErrorKind, ValidationError};
use crate::grammar::lexer::split_args;
use crate::units::parse_value_with_unit;

type RuleResult = Result<(), ValidationError>;

/// Require exactly `N` arguments; `names` lists their roles for the message.
fn exact<'a, const N: usize>(
    cx: &LineCtx<'a>,
    names: [&str; N],
) -> Result<[&'a str; N], ValidationError> {
    let args = split_args(cx.line.rest);
    <[&str; N]>::try_from(args.as_slice()).map_err(|_| {
        let plural = if N == 1 { "" } else { "s" };
        cx.error(
            ErrorKind::ArgumentCount,
            format!(
                "{} requires {N} argument{plural} ({}), found {}",
                cx.command,
                names.join(", "),
                args.len()
            ),
        )
    })
}

fn int(cx: &LineCtx<'_>, name: &str, value: &str) -> Result<i32, ValidationError> {
    value.parse::<i32>().map_err(|_| {
        cx.error(
            ErrorKind::ArgumentFormat,
            format!("{name} must be an integer, found {value:?}"),
        )
    })
}

fn within<T: PartialOrd + std::fmt::Display>(
    cx: &LineCtx<'_>,
    name: &str,
    value: T,
    lo: T,
    hi: T,
) -> RuleResult {
    if value < lo || value > hi {
        return Err(cx.error(
            ErrorKind::RangeViolation,
            format!("{name} must be between {lo} and {hi}, found {value}"),
        ));
    }
    Ok(())
}

/// `SIZE` / `GAP`: two measurements. Units are deliberately not compared.
pub(super) fn measurement_pair(cx: &LineCtx<'_>, first: &str, second: &str) -> RuleResult {
    let [a, b] = exact(cx, [first, second])?;
    for (name, token) in [(first, a), (second, b)] {
        parse_value_with_unit(token).map_err(|e| {
            cx.error(ErrorKind::ArgumentFormat, format!("invalid {name}: {e}"))
        })?;
    }
    Ok(())
}

/// `DIRECTION n` with `n` in 0–3.
pub(super) fn direction(cx: &LineCtx<'_>) -> RuleResult {
    let [v] = exact(cx, ["direction"])?;
    let n = int(cx, "direction", v)?;
    within(cx, "direction", n, 0, 3)
}

/// `REFERENCE x,y`.
pub(super) fn reference(cx: &LineCtx<'_>) -> RuleResult {
    let [x, y] = exact(cx, ["x", "y"])?;
    int(cx, "x", x)?;
    int(cx, "y", y)?;
    Ok(())
}

/// Fixed-count integer commands (`BOX`, `BAR`): each position checked in turn.
pub(super) fn integers<const N: usize>(cx: &LineCtx<'_>, names: [&str; N]) -> RuleResult {
    let values = exact(cx, names)?;
    for (i, (value, name)) in values.iter().zip(names).enumerate() {
        if value.parse::<i32>().is_err() {
            return Err(cx.error(
                ErrorKind::ArgumentFormat,
                format!("argument {} ({name}) must be an integer, found {value:?}", i + 1),
            ));
        }
    }
    Ok(())
}

/// `PRINT [quantity[,copies]]`.
pub(super) fn print(cx: &LineCtx<'_>) -> RuleResult {
    const NAMES: [&str; 2] = ["quantity", "copies"];
    let args = split_args(cx.line.rest);
    if args.len() > NAMES.len() {
        return Err(cx.error(
            ErrorKind::ArgumentCount,
            format!(
                "PRINT accepts at most 2 arguments ({}), found {}",
                NAMES.join(", "),
                args.len()
            ),
        ));
    }
    for (i, (value, name)) in args.iter().zip(NAMES).enumerate() {
        if value.parse::<i32>().is_err() {
            return Err(cx.error(
                ErrorKind::ArgumentFormat,
                format!("argument {} ({name}) must be an integer, found {value:?}", i + 1),
            ));
        }
    }
    Ok(())
}

/// `DENSITY n` with `n` in 0–15.
pub(super) fn density(cx: &LineCtx<'_>) -> RuleResult {
    let [v] = exact(cx, ["density"])?;
    let n = int(cx, "density", v)?;
    within(cx, "density", n, 0, 15)
}

/// `SPEED n` with `n` in 1–14 (fractional values allowed).
pub(super) fn speed(cx: &LineCtx<'_>) -> RuleResult {
    let [v] = exact(cx, ["speed"])?;
    let n = v
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| {
            cx.error(
                ErrorKind::ArgumentFormat,
                format!("speed must be a number, found {v:?}"),
            )
        })?;
    within(cx, "speed", n, 1.0, 14.0)
}
