//! Modular exponentiation `|x⟩|y⟩ → |x⟩|y·mˣ mod N⟩`.

use crate::classical::mod_pow;
use crate::complex::ZERO;
use crate::error::{QuantumError, Result};
use crate::operator::Operator;
use crate::register::Register;
use crate::vector::ComplexVector;

/// Entangles a prepared argument register with a value register.
///
/// The operator holds the (already transformed) argument register `|x⟩` and is
/// applied to the value register. The result is the joint register with the
/// arguments in the high qubits. Value basis states `y >= modulus` pass
/// through unchanged, so the map stays a permutation.
#[derive(Debug, Clone)]
pub struct ModularExponentiation {
    arguments: Register,
    base: u64,
    modulus: u64,
}

impl ModularExponentiation {
    pub fn new(arguments: Register, base: u64, modulus: u64) -> Self {
        ModularExponentiation {
            arguments,
            base,
            modulus,
        }
    }

    pub fn arguments(&self) -> &Register {
        &self.arguments
    }
}

impl Operator for ModularExponentiation {
    /// # Errors
    /// [`QuantumError::ZeroModulus`] if the modulus is zero;
    /// [`QuantumError::LengthMismatch`] if the value register cannot hold
    /// every residue below the modulus.
    fn apply(&self, values: &Register) -> Result<Register> {
        if self.modulus == 0 {
            return Err(QuantumError::ZeroModulus);
        }
        let width = values.base_count();
        if (width as u64) < self.modulus {
            return Err(QuantumError::length_mismatch(
                self.modulus.next_power_of_two() as usize,
                width,
            ));
        }

        let mut out = vec![ZERO; self.arguments.base_count() * width];
        for (x, &ax) in self.arguments.amplitudes().iter().enumerate() {
            if ax == ZERO {
                continue;
            }
            let factor = mod_pow(self.base, x as u64, self.modulus);
            for (y, &ay) in values.amplitudes().iter().enumerate() {
                let y = y as u64;
                let mapped = if y < self.modulus {
                    (y * factor) % self.modulus
                } else {
                    y
                };
                out[x * width + mapped as usize] += ax * ay;
            }
        }
        let bits = self.arguments.bit_count() + values.bit_count();
        let joint = Register::from_vector(ComplexVector::from_vec(out))?;
        debug_assert_eq!(joint.bit_count(), bits);
        Ok(joint)
    }
}
