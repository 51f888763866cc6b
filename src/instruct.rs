//! Bit-indexed amplitude kernels.
//!
//! Each kernel updates a state slice in place using index arithmetic on the
//! affected bit positions only; no operator matrix is materialized. Bit `b` of
//! an amplitude index is qubit `b`.

use crate::complex::{Complex, ComplexExt};
use crate::gate::Gate;
use crate::matrix::{DenseMatrix, Matrix};

/// Apply a 2x2 matrix to the amplitude pair `(i, j)`.
///
/// `i` is the `|0⟩` component and `j` the `|1⟩` component in the gate's basis.
pub fn u1rows(state: &mut [Complex], i: usize, j: usize, gate: &DenseMatrix) {
    debug_assert_eq!(gate.order(), 2);

    let old_i = state[i];
    let old_j = state[j];

    state[i] = gate.element(0, 0) * old_i + gate.element(0, 1) * old_j;
    state[j] = gate.element(1, 0) * old_i + gate.element(1, 1) * old_j;
}

/// Multiply the amplitude at `i` by `factor`.
pub fn mulrow(state: &mut [Complex], i: usize, factor: Complex) {
    state[i] *= factor;
}

/// Exchange the amplitudes at `i` and `j`.
pub fn swaprows(state: &mut [Complex], i: usize, j: usize) {
    state.swap(i, j);
}

/// Apply a single-qubit matrix to qubit `bit`.
///
/// Indices are visited in blocks of `2^(bit+1)`; within a block the lower half
/// has the bit clear and pairs with the upper half.
///
/// # Example
/// ```
/// use qsim_rs::instruct::instruct_single;
/// use qsim_rs::{Complex, Gate};
///
/// let mut state = vec![Complex::new(1.0, 0.0), Complex::new(0.0, 0.0)];
/// instruct_single(&mut state, &Gate::Hadamard(0).matrix(), 0);
/// assert!((state[1].re - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
/// ```
pub fn instruct_single(state: &mut [Complex], gate: &DenseMatrix, bit: usize) {
    let block = 1usize << bit;
    let stride = block << 1;
    for start in (0..state.len()).step_by(stride) {
        for i in start..start + block {
            u1rows(state, i, i + block, gate);
        }
    }
}

/// Multiply by `phase` every amplitude whose index has all bits of `mask` set.
///
/// A single-bit mask is a phase gate; a control-plus-target mask is a
/// controlled phase.
pub fn instruct_masked_phase(state: &mut [Complex], mask: usize, phase: Complex) {
    for i in 0..state.len() {
        if i & mask == mask {
            mulrow(state, i, phase);
        }
    }
}

/// Flip qubit `target` wherever every bit of `controls` is set.
///
/// With one control bit this is CNOT; with two it is the Toffoli gate.
pub fn instruct_controlled_flip(state: &mut [Complex], controls: usize, target: usize) {
    let t = 1usize << target;
    debug_assert_eq!(controls & t, 0);
    for i in 0..state.len() {
        if i & controls == controls && i & t == 0 {
            swaprows(state, i, i | t);
        }
    }
}

/// Exchange qubits `a` and `b`.
pub fn instruct_swap(state: &mut [Complex], a: usize, b: usize) {
    if a == b {
        return;
    }
    let (ma, mb) = (1usize << a, 1usize << b);
    for i in 0..state.len() {
        // Each pair is visited once: from the index with `a` set and `b` clear.
        if i & ma != 0 && i & mb == 0 {
            swaprows(state, i, i ^ ma ^ mb);
        }
    }
}

/// Apply `gate` with its dedicated bit-indexed kernel.
///
/// Bit indices must already be validated against the state length.
pub fn instruct_gate(state: &mut [Complex], gate: &Gate) {
    match *gate {
        Gate::Hadamard(bit) => instruct_single(state, &gate.matrix(), bit),
        Gate::Phase { bit, theta } => {
            instruct_masked_phase(state, 1 << bit, Complex::from_angle(theta))
        }
        Gate::ControlledPhase {
            control,
            target,
            theta,
        } => instruct_masked_phase(
            state,
            (1 << control) | (1 << target),
            Complex::from_angle(theta),
        ),
        Gate::CNot { control, target } => instruct_controlled_flip(state, 1 << control, target),
        Gate::CCNot {
            control1,
            control2,
            target,
        } => instruct_controlled_flip(state, (1 << control1) | (1 << control2), target),
        Gate::Swap(a, b) => instruct_swap(state, a, b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complex::{ONE, ZERO};
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn basis(len: usize, i: usize) -> Vec<Complex> {
        let mut v = vec![ZERO; len];
        v[i] = ONE;
        v
    }

    #[test]
    fn test_u1rows() {
        let x = DenseMatrix::from_rows(2, &[ZERO, ONE, ONE, ZERO]);
        let mut state = basis(2, 0);
        u1rows(&mut state, 0, 1, &x);
        assert_eq!(state, basis(2, 1));
    }

    #[test]
    fn test_instruct_single_on_middle_bit() {
        // H on qubit 1 of |000⟩ gives (|000⟩ + |010⟩)/√2.
        let mut state = basis(8, 0);
        instruct_single(&mut state, &Gate::Hadamard(1).matrix(), 1);
        assert_abs_diff_eq!(state[0].re, FRAC_1_SQRT_2, epsilon = 1e-12);
        assert_abs_diff_eq!(state[2].re, FRAC_1_SQRT_2, epsilon = 1e-12);
        for i in [1, 3, 4, 5, 6, 7] {
            assert_eq!(state[i], ZERO);
        }
    }

    #[test]
    fn test_controlled_flip() {
        // CNOT(control 2, target 0): |100⟩ -> |101⟩, |000⟩ unchanged.
        let mut state = basis(8, 0b100);
        instruct_controlled_flip(&mut state, 0b100, 0);
        assert_eq!(state, basis(8, 0b101));

        let mut state = basis(8, 0b000);
        instruct_controlled_flip(&mut state, 0b100, 0);
        assert_eq!(state, basis(8, 0b000));

        // Toffoli needs both controls.
        let mut state = basis(8, 0b011);
        instruct_controlled_flip(&mut state, 0b011, 2);
        assert_eq!(state, basis(8, 0b111));
        let mut state = basis(8, 0b010);
        instruct_controlled_flip(&mut state, 0b011, 2);
        assert_eq!(state, basis(8, 0b010));
    }

    #[test]
    fn test_masked_phase() {
        let mut state = vec![ONE; 4];
        instruct_masked_phase(&mut state, 0b11, Complex::new(0.0, 1.0));
        assert_eq!(state[..3], [ONE, ONE, ONE]);
        assert_eq!(state[3], Complex::new(0.0, 1.0));
    }

    #[test]
    fn test_swap() {
        let mut state = basis(8, 0b001);
        instruct_swap(&mut state, 0, 2);
        assert_eq!(state, basis(8, 0b100));
        instruct_swap(&mut state, 1, 1);
        assert_eq!(state, basis(8, 0b100));
    }

    #[test]
    fn test_instruct_gate_dispatch() {
        let mut state = basis(4, 0b10);
        instruct_gate(&mut state, &Gate::CNot { control: 1, target: 0 });
        assert_eq!(state, basis(4, 0b11));
        instruct_gate(&mut state, &Gate::Swap(0, 1));
        assert_eq!(state, basis(4, 0b11));
        instruct_gate(
            &mut state,
            &Gate::Phase {
                bit: 0,
                theta: std::f64::consts::PI,
            },
        );
        assert_abs_diff_eq!(state[3].re, -1.0, epsilon = 1e-12);
    }
}
