pub mod polynomial;
pub mod square;

pub use polynomial::PolynomialFractal;
pub use square::SquareFractal;
