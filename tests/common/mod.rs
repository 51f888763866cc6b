//! Shared test utilities for qsim-rs integration tests.

use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use qsim_rs::{Complex, ComplexVector, Gate, Register};

/// Absolute tolerance for amplitude comparisons.
#[allow(dead_code)]
pub const ATOL: f64 = 1e-10;

/// Normalized register with amplitudes drawn from `seed`.
#[allow(dead_code)]
pub fn random_register(bits: usize, seed: u64) -> Register {
    let mut rng = StdRng::seed_from_u64(seed);
    let amps: Vec<Complex> = (0..1usize << bits)
        .map(|_| Complex::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
        .collect();
    let mut v = ComplexVector::from_vec(amps);
    v.normalize();
    Register::from_vector(v).unwrap()
}

/// Component-wise comparison within [`ATOL`].
#[allow(dead_code)]
pub fn assert_registers_close(a: &Register, b: &Register) {
    assert_eq!(a.bit_count(), b.bit_count());
    for i in 0..a.base_count() {
        assert_abs_diff_eq!(a.amplitude(i).re, b.amplitude(i).re, epsilon = ATOL);
        assert_abs_diff_eq!(a.amplitude(i).im, b.amplitude(i).im, epsilon = ATOL);
    }
}

/// Every gate of every family on an `n`-qubit register, over all valid
/// qubit placements.
#[allow(dead_code)]
pub fn all_gates(n: usize) -> Vec<Gate> {
    let mut gates = Vec::new();
    for a in 0..n {
        gates.push(Gate::Hadamard(a));
        gates.push(Gate::Phase {
            bit: a,
            theta: 0.3 + a as f64,
        });
        for b in (0..n).filter(|&b| b != a) {
            gates.push(Gate::ControlledPhase {
                control: a,
                target: b,
                theta: 1.1,
            });
            gates.push(Gate::cv(a, b));
            gates.push(Gate::CNot {
                control: a,
                target: b,
            });
            if a < b {
                gates.push(Gate::Swap(a, b));
            }
            for c in (0..n).filter(|&c| c != a && c != b) {
                gates.push(Gate::CCNot {
                    control1: a,
                    control2: b,
                    target: c,
                });
            }
        }
    }
    gates
}
