//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `rollcall_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("rollcall_core ping={}", rollcall_core::ping());
    println!("rollcall_core version={}", rollcall_core::core_version());
}
