//! The gate set and its local matrices and decompositions.

use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2};
use std::fmt;

use crate::complex::{Complex, ComplexExt, ONE, ZERO};
use crate::matrix::{DenseMatrix, Matrix};

/// Qubit gates. Bit indices are fixed at construction.
///
/// Multi-qubit gates list their qubits most significant first in
/// [`Gate::qubits`]; that order matches the rows of [`Gate::matrix`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gate {
    /// Hadamard on one qubit.
    Hadamard(usize),
    /// Phase shift: diag(1, e^(iθ)).
    Phase { bit: usize, theta: f64 },
    /// Controlled phase: diag(1, 1, 1, e^(iθ)).
    ControlledPhase {
        control: usize,
        target: usize,
        theta: f64,
    },
    CNot {
        control: usize,
        target: usize,
    },
    /// Toffoli: flips `target` when both controls are set.
    CCNot {
        control1: usize,
        control2: usize,
        target: usize,
    },
    Swap(usize, usize),
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::Hadamard(bit) => write!(f, "H({})", bit),
            Gate::Phase { bit, theta } => write!(f, "Phase({}, {:.4})", bit, theta),
            Gate::ControlledPhase {
                control,
                target,
                theta,
            } => write!(f, "CPhase({}, {}, {:.4})", control, target, theta),
            Gate::CNot { control, target } => write!(f, "CNOT({}, {})", control, target),
            Gate::CCNot {
                control1,
                control2,
                target,
            } => write!(f, "CCNOT({}, {}, {})", control1, control2, target),
            Gate::Swap(a, b) => write!(f, "SWAP({}, {})", a, b),
        }
    }
}

impl Gate {
    /// Controlled-V: the controlled phase with θ = π/2, so that V² = Z.
    pub fn cv(control: usize, target: usize) -> Self {
        Gate::ControlledPhase {
            control,
            target,
            theta: FRAC_PI_2,
        }
    }

    /// Qubits the gate acts on, most significant first.
    pub fn qubits(&self) -> Vec<usize> {
        match *self {
            Gate::Hadamard(bit) | Gate::Phase { bit, .. } => vec![bit],
            Gate::ControlledPhase {
                control, target, ..
            }
            | Gate::CNot { control, target } => vec![control, target],
            Gate::CCNot {
                control1,
                control2,
                target,
            } => vec![control1, control2, target],
            Gate::Swap(a, b) => vec![a, b],
        }
    }

    /// The local `2^k × 2^k` matrix over [`Gate::qubits`].
    pub fn matrix(&self) -> DenseMatrix {
        match *self {
            Gate::Hadamard(_) => {
                let h = Complex::new(FRAC_1_SQRT_2, 0.0);
                DenseMatrix::from_rows(2, &[h, h, h, -h])
            }
            Gate::Phase { theta, .. } => {
                DenseMatrix::from_rows(2, &[ONE, ZERO, ZERO, Complex::from_angle(theta)])
            }
            Gate::ControlledPhase { theta, .. } => {
                let mut m = DenseMatrix::identity(4);
                m.set_element(3, 3, Complex::from_angle(theta));
                m
            }
            Gate::CNot { .. } => permutation_matrix(4, |i| if i >= 2 { i ^ 1 } else { i }),
            Gate::CCNot { .. } => permutation_matrix(8, |i| if i >= 6 { i ^ 1 } else { i }),
            Gate::Swap(..) => permutation_matrix(4, |i| match i {
                1 => 2,
                2 => 1,
                other => other,
            }),
        }
    }

    /// Rewrites the gate as a sequence over the universal set {H, phase,
    /// controlled phase}, in application order.
    ///
    /// CNOT is `H(t)·CV·CV·H(t)`; Toffoli uses the five-gate controlled-V
    /// construction; SWAP is three CNOTs.
    pub fn decompose(&self) -> Vec<Gate> {
        match *self {
            Gate::Hadamard(_) | Gate::Phase { .. } | Gate::ControlledPhase { .. } => vec![*self],
            Gate::CNot { control, target } => vec![
                Gate::Hadamard(target),
                Gate::cv(control, target),
                Gate::cv(control, target),
                Gate::Hadamard(target),
            ],
            Gate::CCNot {
                control1,
                control2,
                target,
            } => {
                let mut seq = vec![Gate::Hadamard(target), Gate::cv(control2, target)];
                seq.extend(Gate::CNot { control: control1, target: control2 }.decompose());
                for _ in 0..3 {
                    seq.push(Gate::cv(control2, target));
                }
                seq.extend(Gate::CNot { control: control1, target: control2 }.decompose());
                seq.push(Gate::cv(control1, target));
                seq.push(Gate::Hadamard(target));
                seq
            }
            Gate::Swap(a, b) => [
                Gate::CNot { control: a, target: b },
                Gate::CNot { control: b, target: a },
                Gate::CNot { control: a, target: b },
            ]
            .iter()
            .flat_map(Gate::decompose)
            .collect(),
        }
    }
}

/// Permutation matrix with a one at `(perm(i), i)` for every column `i`.
fn permutation_matrix(order: usize, perm: impl Fn(usize) -> usize) -> DenseMatrix {
    let mut m = DenseMatrix::zeros(order);
    for i in 0..order {
        m.set_element(perm(i), i, ONE);
    }
    m
}
