//! Build script for generating diagnostic code tables at compile time.
//!
//! Reads `data/diagnostics.json` and generates:
//! - `generated_codes.rs`: public constants mapping constant names to IDs
//! - `generated_explain.rs`: a match expression mapping IDs to descriptions
//! - `generated_summary.rs`: a match expression mapping IDs to one-line summaries

use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::Path;

fn main() {
    let data_path = Path::new("data/diagnostics.json");
    println!("cargo:rerun-if-changed={}", data_path.display());

    let raw = fs::read_to_string(data_path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", data_path.display()));

    let doc: serde_json::Value =
        serde_json::from_str(&raw).expect("failed to parse diagnostics.json");

    let diagnostics = doc["diagnostics"]
        .as_array()
        .expect("diagnostics.json: expected `diagnostics` array");

    let out_dir = env::var("OUT_DIR").unwrap();
    let out_path = Path::new(&out_dir);

    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut seen_names: HashSet<String> = HashSet::new();

    // ── generated_codes.rs ──────────────────────────────────────────────
    let mut codes =
        String::from("// Auto-generated from data/diagnostics.json; DO NOT EDIT.\n\n");
    let mut explain = String::from("match id {\n");
    let mut summaries = String::from("match id {\n");

    for (i, entry) in diagnostics.iter().enumerate() {
        let id = entry["id"]
            .as_str()
            .unwrap_or_else(|| panic!("diagnostics[{i}] missing `id`"));
        let const_name = entry["constName"]
            .as_str()
            .unwrap_or_else(|| panic!("diagnostics[{i}] (id={id}) missing `constName`"));
        let summary = entry["summary"]
            .as_str()
            .unwrap_or_else(|| panic!("diagnostics[{i}] (id={id}) missing `summary`"));
        let description = entry["description"]
            .as_str()
            .unwrap_or_else(|| panic!("diagnostics[{i}] (id={id}) missing `description`"));

        assert!(
            id.starts_with("TSPL") && id.len() == 8 && id[4..].bytes().all(|b| b.is_ascii_digit()),
            "diagnostics[{i}]: id '{id}' must look like TSPL0000"
        );
        assert!(
            !const_name.is_empty()
                && const_name
                    .bytes()
                    .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_')
                && const_name.as_bytes()[0].is_ascii_uppercase(),
            "diagnostics[{i}] (id={id}): constName '{const_name}' is not SCREAMING_SNAKE_CASE"
        );
        assert!(
            seen_ids.insert(id.to_string()),
            "diagnostics[{i}]: duplicate id '{id}'"
        );
        assert!(
            seen_names.insert(const_name.to_string()),
            "diagnostics[{i}] (id={id}): duplicate constName '{const_name}'"
        );

        codes.push_str(&format!("/// {summary}\n"));
        codes.push_str(&format!("pub const {const_name}: &str = \"{id}\";\n\n"));

        let escaped: String = description.chars().flat_map(char::escape_default).collect();
        explain.push_str(&format!("    \"{id}\" => Some(\"{escaped}\"),\n"));
        let escaped: String = summary.chars().flat_map(char::escape_default).collect();
        summaries.push_str(&format!("    \"{id}\" => Some(\"{escaped}\"),\n"));
    }

    explain.push_str("    _ => None,\n}\n");
    summaries.push_str("    _ => None,\n}\n");

    fs::write(out_path.join("generated_codes.rs"), &codes)
        .expect("failed to write generated_codes.rs");
    fs::write(out_path.join("generated_explain.rs"), &explain)
        .expect("failed to write generated_explain.rs");
    fs::write(out_path.join("generated_summary.rs"), &summaries)
        .expect("failed to write generated_summary.rs");
}
