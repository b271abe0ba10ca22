// Complex arithmetic, complex polynomials and Newton root finding.

pub mod complex;
pub mod newton;
pub mod polynomial;

pub use complex::Complex;
pub use newton::{group_zeros, solve, solve_all, zeros, Zero};
pub use polynomial::ComplexPolynomial;
