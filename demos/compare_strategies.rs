//! Applies the same circuit with each strategy and reports the largest
//! amplitude difference and the wall time.
//!
//! Usage: cargo run --release --example compare_strategies [qubits]

use std::time::Instant;

use qsim_rs::operator::gate_sequence;
use qsim_rs::{Gate, Operator, Qft, Register, Strategy};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn circuit(n: usize) -> Vec<Gate> {
    let mut gates: Vec<Gate> = (0..n).map(Gate::Hadamard).collect();
    for i in 0..n - 1 {
        gates.push(Gate::CNot {
            control: i,
            target: n - 1 - i,
        });
    }
    if n >= 3 {
        gates.push(Gate::CCNot {
            control1: 0,
            control2: n - 1,
            target: n / 2,
        });
    }
    gates.push(Gate::Swap(0, n - 1));
    gates.extend(Qft::new(n).circuit());
    gates
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let n: usize = std::env::args()
        .nth(1)
        .map(|s| s.parse())
        .transpose()?
        .unwrap_or(8)
        .max(2);
    let gates = circuit(n);
    info!(qubits = n, gates = gates.len(), "circuit built");

    let mut results = Vec::new();
    for strategy in [Strategy::Bit, Strategy::Matrix, Strategy::Composite] {
        let start = Instant::now();
        let mut reg = Register::new(n);
        for op in gate_sequence(&gates, strategy) {
            reg = op.apply(&reg)?;
        }
        println!("{strategy:?}: {:?}", start.elapsed());
        results.push(reg);
    }

    let reference = &results[0];
    for (strategy, reg) in [Strategy::Matrix, Strategy::Composite].iter().zip(&results[1..]) {
        let diff = (0..reference.base_count())
            .map(|i| (reference.amplitude(i) - reg.amplitude(i)).norm())
            .fold(0.0, f64::max);
        println!("max |Bit - {strategy:?}| = {diff:.3e}");
    }
    Ok(())
}
