//! State-vector simulation of qubit registers.
//!
//! Gates run through one of three [`Strategy`] choices: bit-indexed kernels,
//! full `2^n × 2^n` matrices, or a decomposition into a universal gate set.
//! The [`algorithms`] module drives Deutsch–Jozsa, Grover and Shor on top.

pub mod algorithms;
pub mod apply;
pub mod classical;
pub mod complex;
pub mod error;
pub mod gate;
pub mod instruct;
pub mod matrix;
pub mod measure;
pub mod modexp;
pub mod operator;
pub mod qft;
pub mod register;
pub mod vector;

pub use complex::{Complex, ComplexExt};
pub use error::{QuantumError, Result};
pub use gate::Gate;
pub use matrix::{DenseMatrix, DynMatrix, Matrix, SparseMatrix, Storage, select_storage};
pub use modexp::ModularExponentiation;
pub use operator::{CompositeOperator, GateOperator, Operator, Strategy};
pub use qft::Qft;
pub use register::Register;
pub use vector::ComplexVector;
