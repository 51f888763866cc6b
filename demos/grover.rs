//! Grover search for a single answer.
//!
//! Usage: cargo run --example grover [answer] [bit|matrix|composite]

use qsim_rs::Strategy;
use qsim_rs::algorithms::{Grover, GroverConfig, GroverOracle};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let answer: usize = args.next().map(|s| s.parse()).transpose()?.unwrap_or(42);
    let strategy: Strategy = match args.next() {
        Some(s) => serde_json::from_str(&format!("\"{s}\""))?,
        None => Strategy::Bit,
    };

    let oracle = GroverOracle::from_answer(answer);
    let config = GroverConfig {
        strategy,
        ..GroverConfig::default()
    };
    let grover = Grover::new(oracle, config);
    println!(
        "Searching {} states with {} iterations ({strategy:?})",
        oracle.base_count(),
        grover.iterations()
    );
    let outcome = grover.run(&mut rand::thread_rng())?;
    println!("{outcome}");
    Ok(())
}
