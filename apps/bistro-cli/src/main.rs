//! # Bistro CLI Entry Point
//!
//! The actual setup is in lib.rs for better testability.

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    std::process::exit(bistro_cli::run(args));
}
