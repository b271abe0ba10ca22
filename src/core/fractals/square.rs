use crate::domain::ports::ComplexFractal;
use crate::math::Complex;
use crate::utils::error::Result;

/// `f(w) = w² + c`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquareFractal {
    pub c: Complex,
}

impl SquareFractal {
    pub fn new(c: Complex) -> Self {
        Self { c }
    }
}

impl Default for SquareFractal {
    fn default() -> Self {
        Self::new(Complex::ONE)
    }
}

impl ComplexFractal for SquareFractal {
    fn dimensions(&self) -> usize {
        2
    }

    fn pre_images(&self, z: Complex) -> Result<Vec<Complex>> {
        let w = (z - self.c).sqrt();
        Ok(vec![w, -w])
    }
}
