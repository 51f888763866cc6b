//! The operator capability: transform a register, or compose with another
//! operator.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::apply::gate_matrix;
use crate::error::{QuantumError, Result};
use crate::gate::Gate;
use crate::instruct::instruct_gate;
use crate::matrix::Matrix;
use crate::register::Register;

/// Anything that maps a register to a new register.
pub trait Operator: fmt::Debug {
    /// Applies the operator, leaving `register` untouched.
    fn apply(&self, register: &Register) -> Result<Register>;

    /// Sequential composition: `self` first, then `next`. Never fails.
    fn then<O>(self, next: O) -> CompositeOperator
    where
        Self: Sized + 'static,
        O: Operator + 'static,
    {
        CompositeOperator::new(self, next)
    }
}

impl<T: Operator + ?Sized> Operator for Box<T> {
    fn apply(&self, register: &Register) -> Result<Register> {
        (**self).apply(register)
    }
}

/// How a gate is carried out on a register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Index arithmetic on the affected bits.
    #[default]
    Bit,
    /// Build the full `2^n × 2^n` operator and multiply.
    Matrix,
    /// Rewrite over the universal gate set, then apply bit-indexed.
    Composite,
}

/// A gate bound to an application strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateOperator {
    gate: Gate,
    strategy: Strategy,
}

impl GateOperator {
    pub fn new(gate: Gate, strategy: Strategy) -> Self {
        GateOperator { gate, strategy }
    }

    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    fn validate(&self, register: &Register) -> Result<()> {
        let qubits = self.gate.qubits();
        for (i, &q) in qubits.iter().enumerate() {
            register.check_bit(q)?;
            if qubits[..i].contains(&q) {
                return Err(QuantumError::DuplicateBit { index: q });
            }
        }
        Ok(())
    }
}

impl Operator for GateOperator {
    fn apply(&self, register: &Register) -> Result<Register> {
        self.validate(register)?;
        let amplitudes = match self.strategy {
            Strategy::Bit => {
                let mut out = register.amplitudes().clone();
                instruct_gate(out.as_slice_mut(), &self.gate);
                out
            }
            Strategy::Matrix => {
                gate_matrix(register.bit_count(), &self.gate)?
                    .multiply_vector(register.amplitudes())?
            }
            Strategy::Composite => {
                let mut out = register.amplitudes().clone();
                for g in self.gate.decompose() {
                    instruct_gate(out.as_slice_mut(), &g);
                }
                out
            }
        };
        Register::from_prior(register, amplitudes)
    }
}

impl fmt::Display for GateOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{:?}]", self.gate, self.strategy)
    }
}

/// Two operators applied in sequence: `first`, then `second`.
///
/// Nested composites form a binary tree whose in-order traversal is the gate
/// sequence.
#[derive(Debug)]
pub struct CompositeOperator {
    first: Box<dyn Operator>,
    second: Box<dyn Operator>,
}

impl CompositeOperator {
    pub fn new(first: impl Operator + 'static, second: impl Operator + 'static) -> Self {
        CompositeOperator {
            first: Box::new(first),
            second: Box::new(second),
        }
    }

    /// Folds a sequence into a left-leaning tree. Returns `None` for fewer
    /// than two operators.
    pub fn chain<I>(operators: I) -> Option<Self>
    where
        I: IntoIterator<Item = Box<dyn Operator>>,
    {
        let mut iter = operators.into_iter();
        let first = iter.next()?;
        let second = iter.next()?;
        let mut composite = CompositeOperator { first, second };
        for next in iter {
            composite = CompositeOperator {
                first: Box::new(composite),
                second: next,
            };
        }
        Some(composite)
    }
}

impl Operator for CompositeOperator {
    fn apply(&self, register: &Register) -> Result<Register> {
        let mid = self.first.apply(register)?;
        self.second.apply(&mid)
    }
}

/// Gate operators for `gates`, all with the same strategy, as boxed trait
/// objects ready for [`CompositeOperator::chain`].
pub fn gate_sequence(gates: &[Gate], strategy: Strategy) -> Vec<Box<dyn Operator>> {
    gates
        .iter()
        .map(|&g| Box::new(GateOperator::new(g, strategy)) as Box<dyn Operator>)
        .collect()
}
