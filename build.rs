//! Build script for RTTY beacon firmware
//!
//! Handles:
//! - Linker scripts for the embedded binary (cortex-m-rt, defmt)

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Host test builds link no firmware binary
    if std::env::var_os("CARGO_FEATURE_EMBEDDED").is_none() {
        return;
    }

    // memory.x comes from embassy-stm32's `memory-x` feature
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}
