//! Lightweight validate/parse/render benchmark harness for local baselines.
//!
//! Run from repository root:
//! `cargo run -p tspl_sim_core --example pipeline_benchmark --release`

use std::fs;
use std::time::{Duration, Instant};

use tspl_sim_core::{parse, render, validate};

fn time(iterations: usize, mut f: impl FnMut()) -> Duration {
    let start = Instant::now();
    for _ in 0..iterations {
        f();
    }
    start.elapsed()
}

fn report(stage: &str, elapsed: Duration, iterations: usize) {
    println!(
        "  {stage:<9} total={:?}, per_iter={:.3} ms",
        elapsed,
        elapsed.as_secs_f64() * 1000.0 / iterations as f64
    );
}

fn run_benchmark(label: &str, input: &str, iterations: usize) {
    let validate_elapsed = time(iterations, || {
        let _ = validate(input);
    });
    let parse_elapsed = time(iterations, || {
        let _ = parse(input);
    });
    let render_elapsed = time(iterations, || {
        let _ = render(input);
    });

    println!("Benchmark: {label}");
    println!("  input_bytes: {}", input.len());
    report("validate:", validate_elapsed, iterations);
    report("parse:", parse_elapsed, iterations);
    report("render:", render_elapsed, iterations);
}

fn main() -> Result<(), String> {
    let iterations = std::env::var("TSPL_BENCH_ITERS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(5_000);

    let sample_paths = [
        ("shipping_label", "samples/shipping_label.tspl"),
        ("product_label", "samples/product_label.tspl"),
    ];

    for (label, path) in sample_paths {
        let input = fs::read_to_string(path)
            .map_err(|e| format!("failed to read sample '{}': {e}", path))?;
        run_benchmark(label, &input, iterations);
    }

    Ok(())
}
