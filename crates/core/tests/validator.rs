//! Validator tests keyed by diagnostic code.
//!
//! Each section exercises one code end to end: the finding's kind, its
//! stable ID, the reported line and command, and the message text users see.
//! Whole-document behaviour shared with the interpreter lives in
//! `pipeline.rs`.

mod common;

use common::wrap;
use tspl_sim_core::{ValidationError, codes, explain, validate};

fn only_error(doc: &str) -> ValidationError {
    let r = validate(doc);
    assert_eq!(r.errors.len(), 1, "expected exactly one error: {:?}", r.errors);
    r.errors.into_iter().next().unwrap()
}

// ─── TSPL1001: Unknown command ──────────────────────────────────────────────

#[test]
fn diag_tspl1001_unknown_keyword() {
    let e = only_error(&wrap("barcodex 1,2"));
    assert_eq!(e.code(), codes::UNKNOWN_COMMAND);
    assert_eq!(e.command, "BARCODEX");
    assert_eq!(e.message, "unknown command: BARCODEX");
}

#[test]
fn diag_tspl1001_not_raised_for_passthrough_keywords() {
    let body = "SET CUTTER OFF\nOFFSET 0 mm\nSOUND 2,100\nCODEPAGE 850\nBITMAP 0,0,1,1,0,x";
    let r = validate(&wrap(body));
    assert!(r.valid, "{:?}", r.errors);
}

// ─── TSPL1101: Argument count ───────────────────────────────────────────────

#[test]
fn diag_tspl1101_gap_with_three_arguments() {
    let e = only_error(&wrap("GAP 2 mm, 0 mm, 1 mm"));
    assert_eq!(e.code(), codes::ARGUMENT_COUNT);
    assert_eq!(e.line, 2);
    assert_eq!(e.command, "GAP");
    assert!(e.message.contains("requires 2 arguments"), "{}", e.message);
    assert!(e.message.ends_with("found 3"), "{}", e.message);
}

#[test]
fn diag_tspl1101_direction_takes_one_argument() {
    let e = only_error(&wrap("DIRECTION 1,0"));
    assert_eq!(e.code(), codes::ARGUMENT_COUNT);
    assert!(e.message.contains("requires 1 argument ("), "{}", e.message);
}

#[test]
fn diag_tspl1101_dangling_comma_is_not_an_argument() {
    assert!(validate(&wrap("REFERENCE 0,0,")).valid);
}

// ─── TSPL1201: Argument format ──────────────────────────────────────────────

#[test]
fn diag_tspl1201_bad_measurement_names_its_role() {
    let e = only_error("SIZE 50cm, 30 mm\nPRINT\n");
    assert_eq!(e.code(), codes::ARGUMENT_FORMAT);
    assert!(e.message.starts_with("invalid width:"), "{}", e.message);
    let e = only_error("SIZE 50mm,thirty\nPRINT\n");
    assert!(e.message.starts_with("invalid height:"), "{}", e.message);
}

#[test]
fn diag_tspl1201_measurement_overflowing_f64() {
    let doc = format!("SIZE {}mm,30mm\nPRINT\n", "9".repeat(400));
    let e = only_error(&doc);
    assert_eq!(e.code(), codes::ARGUMENT_FORMAT);
    assert_eq!(e.line, 1);
    assert!(e.message.starts_with("invalid width:"), "{}", e.message);
    assert!(e.message.contains("out of range"), "{}", e.message);
}

#[test]
fn diag_tspl1201_interior_empty_argument() {
    let e = only_error(&wrap("BAR 1,,2,3"));
    assert_eq!(e.code(), codes::ARGUMENT_FORMAT);
    assert!(e.message.starts_with("argument 2 (y)"), "{}", e.message);
}

// ─── TSPL1202: Range ────────────────────────────────────────────────────────

#[test]
fn diag_tspl1202_bounds_are_inclusive() {
    for ok in ["DIRECTION 0", "DIRECTION 3", "DENSITY 0", "DENSITY 15", "SPEED 1", "SPEED 14"] {
        assert!(validate(&wrap(ok)).valid, "{ok}");
    }
    for bad in ["DIRECTION -1", "DENSITY -1", "SPEED 14.5", "SPEED 0"] {
        let e = only_error(&wrap(bad));
        assert_eq!(e.code(), codes::RANGE_VIOLATION, "{bad}");
    }
}

#[test]
fn diag_tspl1202_message_shows_bounds() {
    let e = only_error(&wrap("DENSITY 16"));
    assert_eq!(e.message, "density must be between 0 and 15, found 16");
}

// ─── TSPL1301: Pattern mismatch ─────────────────────────────────────────────

#[test]
fn diag_tspl1301_barcode_shape() {
    assert!(validate(&wrap("BARCODE 100,100,\"128\",50,1,0,2,2,\"12345\"")).valid);
    let e = only_error(&wrap("BARCODE 100,100,\"128\",50,1,0,2,2"));
    assert_eq!(e.code(), codes::PATTERN_MISMATCH);
    assert!(e.message.contains("expected: BARCODE"), "{}", e.message);
}

#[test]
fn diag_tspl1301_qrcode_ecc_is_case_sensitive() {
    assert!(validate(&wrap("QRCODE 10,10,L,4,A,0,\"x\"")).valid);
    let e = only_error(&wrap("QRCODE 10,10,l,4,A,0,\"x\""));
    assert_eq!(e.code(), codes::PATTERN_MISMATCH);
    assert!(e.message.contains("(ecc)"), "{}", e.message);
}

#[test]
fn diag_tspl1301_text_accepts_optional_group() {
    assert!(validate(&wrap("TEXT 10,10,\"3\",0,1,1,2,1,\"x\"")).valid);
    let e = only_error(&wrap("TEXT 10,10,\"3\",0,1,1,2,\"x\""));
    assert_eq!(e.code(), codes::PATTERN_MISMATCH);
}

// ─── TSPL2001: Missing required command ─────────────────────────────────────

#[test]
fn diag_tspl2001_document_findings_come_last() {
    let r = validate("FOO\nBAR 1\n");
    let codes_seen: Vec<_> = r.errors.iter().map(|e| e.code()).collect();
    assert_eq!(
        codes_seen,
        vec![
            codes::UNKNOWN_COMMAND,
            codes::ARGUMENT_COUNT,
            codes::MISSING_REQUIRED_COMMAND,
            codes::MISSING_REQUIRED_COMMAND,
        ]
    );
}

// ─── Explanations ───────────────────────────────────────────────────────────

#[test]
fn every_reported_code_has_an_explanation() {
    let r = validate("FOO\nSIZE 1mm\nDIRECTION 7\nTEXT 1\nBOX a,b,c,d,e\n");
    assert!(!r.errors.is_empty());
    for e in &r.errors {
        assert!(explain(e.code()).is_some(), "no explanation for {}", e.code());
        assert_eq!(e.explain(), explain(e.code()));
    }
}
