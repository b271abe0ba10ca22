use super::complex::Complex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;

/// 複係數多項式
///
/// 內部以升冪儲存 (`coefficients[k]` 是 `z^k` 的係數)，建構時則以自然順序
/// (最高次項在前) 傳入。沒有係數的多項式是「空多項式」，只用於邊界條件，
/// 它的次數沒有定義。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComplexPolynomial {
    coefficients: Vec<Complex>,
}

impl ComplexPolynomial {
    /// 最高次項係數在前。有兩個以上係數時，第一個不應為零。
    pub fn new(coefficients: &[Complex]) -> Self {
        Self {
            coefficients: coefficients.iter().rev().copied().collect(),
        }
    }

    /// 以升冪係數建立 (`ascending[k]` 是 `z^k` 的係數)
    pub fn from_ascending(ascending: Vec<Complex>) -> Self {
        Self {
            coefficients: ascending,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn one() -> Self {
        Self::new(&[Complex::ONE])
    }

    /// (z - η₁)(z - η₂)…，沒有零點時得到常數 1
    pub fn from_zeros<I>(zeros: I) -> Self
    where
        I: IntoIterator<Item = Complex>,
    {
        zeros.into_iter().fold(Self::one(), |p, zero| {
            p.multiply(&Self::new(&[Complex::ONE, -zero]))
        })
    }

    fn zeroed(degree: usize) -> Self {
        Self {
            coefficients: vec![Complex::ZERO; degree + 1],
        }
    }

    /// 空多項式回傳 `None`
    pub fn degree(&self) -> Option<usize> {
        self.coefficients.len().checked_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// `z^k` 的係數，超出範圍時為零
    pub fn coefficient(&self, k: usize) -> Complex {
        self.coefficients.get(k).copied().unwrap_or(Complex::ZERO)
    }

    /// 最高次項在前，與 [`ComplexPolynomial::new`] 的順序相同
    pub fn coefficients(&self) -> Vec<Complex> {
        self.coefficients.iter().rev().copied().collect()
    }

    pub fn apply(&self, z: Complex) -> Complex {
        // Horner
        self.coefficients
            .iter()
            .rev()
            .fold(Complex::ZERO, |acc, c| acc * z + *c)
    }

    /// 除以最高次項係數
    pub fn normalize(&self) -> Self {
        let Some(n) = self.degree() else {
            return self.clone();
        };

        let d = self.coefficients[n];
        let mut p = self.clone();
        for c in p.coefficients.iter_mut().take(n) {
            *c = *c / d;
        }
        p.coefficients[n] = Complex::ONE;
        p
    }

    /// 把 `z` 加到常數項上
    pub fn shift(&mut self, z: Complex) {
        if let Some(c0) = self.coefficients.first_mut() {
            *c0 += z;
        }
    }

    /// 一階形式導數；常數與空多項式的導數是空多項式
    pub fn derivative(&self) -> Self {
        match self.degree() {
            None | Some(0) => Self::empty(),
            Some(_) => Self {
                coefficients: self
                    .coefficients
                    .iter()
                    .enumerate()
                    .skip(1)
                    .map(|(k, c)| c.scale(k as f64))
                    .collect(),
            },
        }
    }

    pub fn integral(&self) -> Self {
        self.integral_with(Complex::ZERO)
    }

    /// 積分常數為 `c` 的原函數
    pub fn integral_with(&self, c: Complex) -> Self {
        let mut coefficients = Vec::with_capacity(self.coefficients.len() + 1);
        coefficients.push(c);
        coefficients.extend(
            self.coefficients
                .iter()
                .enumerate()
                .map(|(k, a)| a.scale(1.0 / (k + 1) as f64)),
        );

        Self { coefficients }
    }

    pub fn multiply(&self, q: &ComplexPolynomial) -> Self {
        let (Some(n), Some(m)) = (self.degree(), q.degree()) else {
            return Self::empty();
        };

        let mut p = Self::zeroed(n + m);
        for (i, a) in self.coefficients.iter().enumerate() {
            for (j, b) in q.coefficients.iter().enumerate() {
                p.coefficients[i + j] += *a * *b;
            }
        }
        p
    }

    /// 回傳 `self / (z - η)`，餘數捨棄
    pub fn split_zero(&self, eta: Complex) -> Self {
        let n = match self.degree() {
            None | Some(0) => return Self::empty(),
            Some(n) => n,
        };

        let mut p = Self::zeroed(n - 1);
        let mut carry = Complex::ZERO;

        for k in (0..n).rev() {
            carry += self.coefficients[k + 1];
            p.coefficients[k] = carry;
            carry *= eta;
        }

        p
    }
}

impl Mul for &ComplexPolynomial {
    type Output = ComplexPolynomial;

    fn mul(self, q: &ComplexPolynomial) -> ComplexPolynomial {
        self.multiply(q)
    }
}

impl fmt::Display for ComplexPolynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "∅");
        }

        let terms: Vec<String> = self
            .coefficients
            .iter()
            .enumerate()
            .rev()
            .map(|(k, c)| match k {
                0 => format!("{}", c),
                1 => format!("{}·z", c),
                _ => format!("{}·z^{}", c, k),
            })
            .collect();
        write!(f, "{}", terms.join(" + "))
    }
}
