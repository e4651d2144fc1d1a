//! pinch_volume — interactive entry point.

use clap::Parser;
use pinch_volume::app::{run, Cli};

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║          Pinch Volume — thumb + index finger mixer           ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "leap")]
    println!("  Mode: LeapMotion hardware");
    #[cfg(not(feature = "leap"))]
    println!("  Mode: Pointer simulation  (use --features leap for hardware)");
    println!("  Press X in the window to quit.");
    println!();

    let cfg = match cli.into_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cfg) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
