//! Main binary entry point for cookcop.
//!
//! This binary sets up logging and delegates to the shared
//! `entry_point::run_with_args()` function.

use anyhow::Result;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let code = cookcop::entry_point::run_with_args(std::env::args().skip(1).collect())?;
    std::process::exit(code);
}
