//! Factor an integer with Shor's algorithm.
//!
//! Usage: cargo run --release --example shor [number]

use qsim_rs::algorithms::{Shor, ShorConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let number: u64 = std::env::args()
        .nth(1)
        .map(|s| s.parse())
        .transpose()?
        .unwrap_or(15);

    let shor = Shor::new(number, ShorConfig::default())?;
    let outcome = shor.run(&mut rand::thread_rng())?;
    println!("{outcome}");
    println!("Attempts: {}", outcome.attempts);
    Ok(())
}
