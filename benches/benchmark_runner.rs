/// Benchmark runner for the capability engine.
///
/// Compares the cost of a registry's first probe pass (parse + evaluate)
/// against repeated memoized reads.

extern crate autoprobe;

use std::time::{Duration, Instant};

use autoprobe::engine::registry::CapabilityRegistry;
use autoprobe::host::profile::HostProfile;
use autoprobe::interp::script_host::new_standard_context;

/// Time one full probe pass over a fresh registry.
fn run_first_pass(iterations: u32) -> Duration {
    let start = Instant::now();
    for _ in 0..iterations {
        let ctx = new_standard_context(HostProfile::full());
        let caps = CapabilityRegistry::build(ctx);
        for name in caps.capability_names() {
            let _ = caps.check(name);
        }
        caps.restore();
    }
    start.elapsed()
}

/// Time repeated reads of already-memoized results.
fn run_memoized_reads(iterations: u32) -> Duration {
    let ctx = new_standard_context(HostProfile::full());
    let caps = CapabilityRegistry::build(ctx);
    for name in caps.capability_names() {
        let _ = caps.check(name);
    }

    let start = Instant::now();
    for _ in 0..iterations {
        for name in caps.capability_names() {
            let _ = caps.check(name);
        }
    }
    let elapsed = start.elapsed();
    caps.restore();
    elapsed
}

fn main() {
    const ITERATIONS: u32 = 1_000;

    let first = run_first_pass(ITERATIONS);
    println!(
        "first probe pass:   {} iterations in {}ms",
        ITERATIONS,
        first.as_millis()
    );

    let memoized = run_memoized_reads(ITERATIONS);
    println!(
        "memoized re-reads:  {} iterations in {}ms",
        ITERATIONS,
        memoized.as_millis()
    );
}
