//! Deutsch-Jozsa on every oracle kind.
//!
//! Usage: cargo run --example deutsch_jozsa [qubits]
//! Set `RUST_LOG=debug` to follow each stage.

use qsim_rs::algorithms::{DeutschJozsa, OracleKind};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let bits = std::env::args()
        .nth(1)
        .map(|s| s.parse())
        .transpose()?
        .unwrap_or(10);
    let mut rng = rand::thread_rng();

    for kind in [
        OracleKind::ConstantZero,
        OracleKind::ConstantOne,
        OracleKind::BalancedMidpoint,
        OracleKind::BalancedParity,
    ] {
        let outcome = DeutschJozsa::new(bits, kind)?.run(&mut rng)?;
        println!("{kind:?}: {outcome}");
    }
    Ok(())
}
