// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Pooling benchmark and correctness harness.
//!
//! Loads a recorded scene, runs the selected kernel ordering `--iters`
//! times over a zero-filled output grid, reports the average latency, and
//! compares the result element-wise against the recorded reference grid.
//!
//! Exit codes: 0 = comparison passed, 1 = mismatch, 2 = usage/load error.

use std::path::PathBuf;
use std::process;
use std::time::Instant;

use bevpool_io::Scene;
use bevpool_kernel::{pool_channel_outer, pool_pairing_outer, validate};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Ordering {
    Pairing,
    Channel,
    Parallel,
}

impl Ordering {
    fn parse(token: &str) -> Option<Self> {
        match token {
            "pairing" => Some(Self::Pairing),
            "channel" => Some(Self::Channel),
            "parallel" => Some(Self::Parallel),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Pairing => "pairing",
            Self::Channel => "channel",
            Self::Parallel => "parallel",
        }
    }
}

struct Opts {
    data_dir: PathBuf,
    iters: usize,
    ordering: Ordering,
    tolerance: f32,
    skip_validation: bool,
}

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: pool_bench [--data-dir <path>] [--iters <n>] \
         [--ordering pairing|channel|parallel] [--tolerance <f32>] [--skip-validation]\n\n\
         Defaults:\n\
         - data-dir: .\n\
         - iters: 100\n\
         - ordering: pairing\n\
         - tolerance: 1e-6\n"
    );
    process::exit(2);
}

fn parse_args() -> Opts {
    let mut opts = Opts {
        data_dir: PathBuf::from("."),
        iters: 100,
        ordering: Ordering::Pairing,
        tolerance: 1e-6,
        skip_validation: false,
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--data-dir" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                opts.data_dir = PathBuf::from(v);
            }
            "--iters" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                opts.iters = v.parse().unwrap_or_else(|_| usage_and_exit());
            }
            "--ordering" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                opts.ordering = Ordering::parse(&v).unwrap_or_else(|| usage_and_exit());
            }
            "--tolerance" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                opts.tolerance = v.parse().unwrap_or_else(|_| usage_and_exit());
            }
            "--skip-validation" => opts.skip_validation = true,
            "-h" | "--help" => usage_and_exit(),
            other => {
                eprintln!("Unknown argument: {other}");
                usage_and_exit();
            }
        }
    }

    if opts.iters == 0 {
        usage_and_exit();
    }
    opts
}

/// First `model name` line of /proc/cpuinfo, the way the recorded harness
/// logged its host.
fn cpu_model() -> Option<String> {
    let cpuinfo = std::fs::read_to_string("/proc/cpuinfo").ok()?;
    cpuinfo
        .lines()
        .find(|l| l.starts_with("model name"))
        .and_then(|l| l.split(':').nth(1))
        .map(|m| m.trim().to_string())
}

fn run_kernel(ordering: Ordering, problem: &bevpool_kernel::PoolProblem<'_>, out: &mut [f32]) {
    match ordering {
        Ordering::Pairing => pool_pairing_outer(problem, out),
        Ordering::Channel => pool_channel_outer(problem, out),
        #[cfg(feature = "parallel")]
        Ordering::Parallel => bevpool_kernel::pool_parallel(problem, out),
        #[cfg(not(feature = "parallel"))]
        Ordering::Parallel => {
            eprintln!("pool_bench was built without the `parallel` feature");
            process::exit(2);
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let opts = parse_args();

    if let Some(model) = cpu_model() {
        info!(model = %model, "host cpu");
    }

    let scene = match Scene::load(&opts.data_dir) {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("Failed to load scene from {}: {e}", opts.data_dir.display());
            process::exit(2);
        }
    };
    let problem = scene.problem();

    if !opts.skip_validation {
        let started = Instant::now();
        if let Err(e) = validate(&problem, scene.n_cells) {
            eprintln!("Malformed scene: {e}");
            process::exit(2);
        }
        info!(elapsed_us = started.elapsed().as_micros() as u64, "scene validated");
    }

    info!(
        ordering = opts.ordering.name(),
        iters = opts.iters,
        "running the kernel... this may take a while"
    );

    let mut out = vec![0.0_f32; scene.n_cells * scene.channels];
    let mut total_us = 0.0_f64;
    for _ in 0..opts.iters {
        out.fill(0.0);
        let start = Instant::now();
        run_kernel(opts.ordering, &problem, &mut out);
        total_us += start.elapsed().as_secs_f64() * 1e6;
    }
    let avg_us = total_us / opts.iters as f64;
    info!(avg_latency_us = avg_us, "timing complete");

    let mut max_abs_diff = 0.0_f32;
    let mut first_mismatch: Option<usize> = None;
    for (i, (got, want)) in out.iter().zip(&scene.reference).enumerate() {
        let diff = (got - want).abs();
        if diff > max_abs_diff {
            max_abs_diff = diff;
        }
        if diff > opts.tolerance && first_mismatch.is_none() {
            first_mismatch = Some(i);
        }
    }

    let passed = first_mismatch.is_none();
    if let Some(i) = first_mismatch {
        eprintln!(
            "Mismatch at index {i}: got {}, expected {} (tolerance {})",
            out[i], scene.reference[i], opts.tolerance
        );
    }

    let summary = serde_json::json!({
        "ordering": opts.ordering.name(),
        "iters": opts.iters,
        "avg_latency_us": avg_us,
        "max_abs_diff": max_abs_diff,
        "passed": passed,
    });
    println!("{summary}");

    process::exit(if passed { 0 } else { 1 });
}
