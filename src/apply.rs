//! Full-matrix gate embedding.
//!
//! A gate on `k` qubits of an `n`-qubit register becomes a `2^n × 2^n`
//! operator. Gates on a contiguous descending run of qubits embed directly as
//! `I ⊗ G ⊗ I`. Otherwise adjacent SWAPs first move the gate's qubits onto
//! positions `k-1..0`, the local gate acts there, and the same swaps run in
//! reverse.

use crate::error::Result;
use crate::gate::Gate;
use crate::matrix::{DenseMatrix, DynMatrix, Matrix, identity};

/// `I(2^(n-low-k)) ⊗ local ⊗ I(2^low)` for a `k`-qubit `local` matrix.
pub fn embed(n: usize, low: usize, local: &dyn Matrix) -> DynMatrix {
    let k = local.order().trailing_zeros() as usize;
    debug_assert!(low + k <= n);
    let high = identity(1 << (n - low - k));
    high.tensor_product(local)
        .tensor_product(&identity(1 << low))
}

/// Full matrix exchanging qubits `low` and `low + 1`.
pub fn adjacent_swap(n: usize, low: usize) -> DynMatrix {
    embed(n, low, &Gate::Swap(low + 1, low).matrix())
}

/// Full matrix of `local` acting on `qubits` (most significant first).
///
/// Bit indices must already be validated against `n`.
pub fn local_matrix(n: usize, qubits: &[usize], local: &DenseMatrix) -> Result<DynMatrix> {
    if let Some(low) = contiguous_base(qubits) {
        return Ok(embed(n, low, local));
    }

    let swaps = routing_swaps(n, qubits);
    let swap_matrices: Vec<DynMatrix> = swaps.iter().map(|&p| adjacent_swap(n, p)).collect();

    let mut full = embed(n, 0, local);
    // full · S_m ⋯ S_1
    for s in swap_matrices.iter().rev() {
        full = full.multiply(s)?;
    }
    // S_1 ⋯ S_m · full
    for s in swap_matrices.iter().rev() {
        full = s.multiply(&full)?;
    }
    Ok(full)
}

/// Full matrix of `gate` on an `n`-qubit register.
pub fn gate_matrix(n: usize, gate: &Gate) -> Result<DynMatrix> {
    local_matrix(n, &gate.qubits(), &gate.matrix())
}

/// The lowest qubit if `qubits` is a run `low+k-1, …, low+1, low`.
fn contiguous_base(qubits: &[usize]) -> Option<usize> {
    let low = *qubits.last()?;
    qubits
        .iter()
        .rev()
        .enumerate()
        .all(|(offset, &q)| q == low + offset)
        .then_some(low)
}

/// Adjacent swaps, in application order, that bring `qubits[j]` to position
/// `k-1-j`. Each entry `p` swaps positions `p` and `p+1`.
fn routing_swaps(n: usize, qubits: &[usize]) -> Vec<usize> {
    let k = qubits.len();
    // layout[p] is the logical qubit currently held at position p.
    let mut layout: Vec<usize> = (0..n).collect();
    let mut swaps = Vec::new();
    for dest in 0..k {
        let qubit = qubits[k - 1 - dest];
        let Some(mut pos) = layout.iter().position(|&q| q == qubit) else {
            continue;
        };
        while pos > dest {
            layout.swap(pos - 1, pos);
            swaps.push(pos - 1);
            pos -= 1;
        }
    }
    swaps
}
