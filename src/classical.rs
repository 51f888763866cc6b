//! Classical number theory used by period finding.

/// Greatest common divisor. `gcd(0, 0) == 0`.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// `base^exp mod modulus` by square-and-multiply.
///
/// Intermediate products fit in `u64` for moduli below `2^32`.
///
/// # Panics
/// If `modulus` is zero.
pub fn mod_pow(base: u64, mut exp: u64, modulus: u64) -> u64 {
    if modulus == 1 {
        return 0;
    }
    let mut result = 1;
    let mut b = base % modulus;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * b % modulus;
        }
        b = b * b % modulus;
        exp >>= 1;
    }
    result
}

/// Convergents `p/q` of the continued fraction of `numerator / denominator`,
/// in order of increasing denominator.
///
/// The expansion is exact, so the last convergent equals the fraction in
/// lowest terms. An empty list is returned when `denominator` is zero.
pub fn convergents(numerator: u64, denominator: u64) -> Vec<(u64, u64)> {
    let mut out = Vec::new();
    let (mut n, mut d) = (numerator, denominator);
    // (p_{k-1}, q_{k-1}) and (p_{k-2}, q_{k-2})
    let (mut p1, mut q1, mut p2, mut q2) = (1u64, 0u64, 0u64, 1u64);
    while d != 0 {
        let a = n / d;
        let (p, q) = (a * p1 + p2, a * q1 + q2);
        out.push((p, q));
        (p2, q2, p1, q1) = (p1, q1, p, q);
        (n, d) = (d, n % d);
    }
    out
}
