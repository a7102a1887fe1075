//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `welllog_core` linkage and the
//!   environment-driven store configuration.
//! - Keep output deterministic for quick local sanity checks.

use welllog_core::StoreConfig;

fn main() {
    println!("welllog_core ping={}", welllog_core::ping());
    println!("welllog_core version={}", welllog_core::core_version());

    match StoreConfig::from_env() {
        Ok(config) => match config.open() {
            Ok(_) => println!(
                "store backend={}",
                if config.use_memory { "memory" } else { "sqlite" }
            ),
            Err(err) => println!("store open failed: {err}"),
        },
        Err(err) => println!("store config invalid: {err}"),
    }
}
