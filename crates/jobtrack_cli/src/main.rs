//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `jobtrack_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // Tiny probe to validate core crate wiring independently from the
    // tool-adapter runtime.
    println!("jobtrack_core ping={}", jobtrack_core::ping());
    println!("jobtrack_core version={}", jobtrack_core::core_version());
}
