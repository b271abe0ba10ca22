use crate::domain::ports::ComplexFractal;
use crate::math::{newton, Complex, ComplexPolynomial};
use crate::utils::error::{FractalError, Result};

const PRE_IMAGE_EPS2: f64 = 1e-15;

/// `f(w) = p(w)`，原像是 `p(w) - z` 的零點
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialFractal {
    p: ComplexPolynomial,
}

impl PolynomialFractal {
    /// 最高次項係數在前，次數至少為 1
    pub fn new(coefficients: &[Complex]) -> Result<Self> {
        let p = ComplexPolynomial::new(coefficients);

        match p.degree() {
            Some(d) if d >= 1 && !p.coefficient(d).is_zero() => Ok(Self { p }),
            _ => Err(FractalError::InvalidArgument {
                message: format!(
                    "Polynomial must have degree >= 1 and a non-zero leading coefficient, got {}",
                    p
                ),
            }),
        }
    }

    pub fn polynomial(&self) -> &ComplexPolynomial {
        &self.p
    }
}

impl ComplexFractal for PolynomialFractal {
    fn dimensions(&self) -> usize {
        self.p.degree().unwrap_or(0)
    }

    fn pre_images(&self, z: Complex) -> Result<Vec<Complex>> {
        let mut q = self.p.clone();
        q.shift(-z);

        newton::solve_all(&q, None, PRE_IMAGE_EPS2)
    }
}
