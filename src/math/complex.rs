use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// 複數 (雙精度)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Complex = Complex { re: 0.0, im: 0.0 };
    pub const ONE: Complex = Complex { re: 1.0, im: 0.0 };
    pub const I: Complex = Complex { re: 0.0, im: 1.0 };

    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// 只有實部的複數
    pub const fn real(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    pub fn from_polar(r: f64, phi: f64) -> Self {
        Self::new(r * phi.cos(), r * phi.sin())
    }

    pub fn re(&self) -> f64 {
        self.re
    }

    pub fn im(&self) -> f64 {
        self.im
    }

    pub fn is_zero(&self) -> bool {
        self.re == 0.0 && self.im == 0.0
    }

    pub fn is_nan(&self) -> bool {
        self.re.is_nan() || self.im.is_nan()
    }

    pub fn is_infinite(&self) -> bool {
        self.re.is_infinite() || self.im.is_infinite()
    }

    pub fn conj(self) -> Self {
        Self::new(self.re, -self.im)
    }

    pub fn inv(self) -> Self {
        let n = self.norm();
        Self::new(self.re / n, -self.im / n)
    }

    /// 模長的平方 (不是模長本身)
    pub fn norm(&self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    pub fn abs(&self) -> f64 {
        self.norm().sqrt()
    }

    /// 輻角，範圍 (-π, π]，零的輻角定義為 0
    pub fn arg(&self) -> f64 {
        self.arg_with_abs(self.abs())
    }

    fn arg_with_abs(&self, r: f64) -> f64 {
        if r == 0.0 {
            return 0.0;
        }

        let ac = (self.re / r).clamp(-1.0, 1.0).acos();
        if self.im >= 0.0 {
            ac
        } else {
            -ac
        }
    }

    /// 回傳 (r, φ)
    pub fn to_polar(&self) -> (f64, f64) {
        let r = self.abs();
        (r, self.arg_with_abs(r))
    }

    pub fn scale(self, t: f64) -> Self {
        Self::new(self.re * t, self.im * t)
    }

    /// 乘以 i·t
    pub fn mul_i(self, t: f64) -> Self {
        Self::new(-self.im * t, self.re * t)
    }

    pub fn sqr(self) -> Self {
        Self::new(self.re * self.re - self.im * self.im, 2.0 * self.re * self.im)
    }

    pub fn sqrt(self) -> Self {
        let a = self.abs();
        let sgn = if self.im >= 0.0 { 1.0 } else { -1.0 };

        Self::new(((a + self.re) / 2.0).sqrt(), sgn * ((a - self.re) / 2.0).sqrt())
    }

    pub fn powi(self, n: i32) -> Self {
        match n {
            0 => Self::ONE,
            1 => self,
            n => {
                // i32::MIN 不能取負號，所以在 f64 上算
                let (r, phi) = self.to_polar();
                let k = f64::from(n.unsigned_abs());
                let z = Self::from_polar(r.powf(k), phi * k);
                if n < 0 {
                    z.inv()
                } else {
                    z
                }
            }
        }
    }

    pub fn powc(self, w: Complex) -> Self {
        (w * self.ln()).exp()
    }

    pub fn exp(self) -> Self {
        Self::from_polar(self.re.exp(), self.im)
    }

    /// 主值對數
    pub fn ln(self) -> Self {
        let (r, phi) = self.to_polar();
        Self::new(r.ln(), phi)
    }

    pub fn sin(self) -> Self {
        Self::new(
            self.re.sin() * self.im.cosh(),
            self.re.cos() * self.im.sinh(),
        )
    }

    pub fn cos(self) -> Self {
        Self::new(
            self.re.cos() * self.im.cosh(),
            -self.re.sin() * self.im.sinh(),
        )
    }

    pub fn tan(self) -> Self {
        self.sin() / self.cos()
    }

    pub fn cot(self) -> Self {
        self.cos() / self.sin()
    }

    /// asin z = -i·ln(iz + √(1 - z²))
    pub fn asin(self) -> Self {
        ((Self::ONE - self.sqr()).sqrt() + self.mul_i(1.0)).ln().mul_i(-1.0)
    }

    /// acos z = -i·ln(z + i√(1 - z²))
    pub fn acos(self) -> Self {
        ((Self::ONE - self.sqr()).sqrt().mul_i(1.0) + self).ln().mul_i(-1.0)
    }

    /// atan z = -i/2·ln((1 + iz) / (1 - iz))
    pub fn atan(self) -> Self {
        let iz = self.mul_i(1.0);
        ((Self::ONE + iz) / (Self::ONE - iz)).ln().mul_i(-0.5)
    }

    pub fn acot(self) -> Self {
        Self::real(FRAC_PI_2) - self.atan()
    }

    pub fn sinh(self) -> Self {
        (self.exp() - (-self).exp()).scale(0.5)
    }

    pub fn cosh(self) -> Self {
        (self.exp() + (-self).exp()).scale(0.5)
    }

    pub fn tanh(self) -> Self {
        self.sinh() / self.cosh()
    }

    pub fn coth(self) -> Self {
        self.cosh() / self.sinh()
    }

    pub fn asinh(self) -> Self {
        ((self.sqr() + Self::ONE).sqrt() + self).ln()
    }

    pub fn acosh(self) -> Self {
        ((self + Self::ONE).sqrt() * (self - Self::ONE).sqrt() + self).ln()
    }

    pub fn atanh(self) -> Self {
        ((Self::ONE + self) / (Self::ONE - self)).ln().scale(0.5)
    }

    pub fn acoth(self) -> Self {
        ((self + Self::ONE) / (self - Self::ONE)).ln().scale(0.5)
    }
}

impl From<f64> for Complex {
    fn from(re: f64) -> Self {
        Self::real(re)
    }
}

impl From<(f64, f64)> for Complex {
    fn from((re, im): (f64, f64)) -> Self {
        Self::new(re, im)
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.re, self.im)
    }
}

impl Neg for Complex {
    type Output = Complex;

    fn neg(self) -> Complex {
        Complex::new(-self.re, -self.im)
    }
}

impl Add for Complex {
    type Output = Complex;

    fn add(self, w: Complex) -> Complex {
        Complex::new(self.re + w.re, self.im + w.im)
    }
}

impl Sub for Complex {
    type Output = Complex;

    fn sub(self, w: Complex) -> Complex {
        Complex::new(self.re - w.re, self.im - w.im)
    }
}

impl Mul for Complex {
    type Output = Complex;

    fn mul(self, w: Complex) -> Complex {
        Complex::new(
            self.re * w.re - self.im * w.im,
            self.re * w.im + self.im * w.re,
        )
    }
}

impl Mul<f64> for Complex {
    type Output = Complex;

    fn mul(self, t: f64) -> Complex {
        self.scale(t)
    }
}

impl Div for Complex {
    type Output = Complex;

    // 除以零時兩個分量都除以 0.0，得到 inf/NaN 而不是 panic
    fn div(self, w: Complex) -> Complex {
        let nw = w.norm();

        if nw > 0.0 {
            Complex::new(
                (self.re * w.re + self.im * w.im) / nw,
                (self.im * w.re - self.re * w.im) / nw,
            )
        } else {
            Complex::new(self.re / 0.0, self.im / 0.0)
        }
    }
}

impl AddAssign for Complex {
    fn add_assign(&mut self, w: Complex) {
        *self = *self + w;
    }
}

impl SubAssign for Complex {
    fn sub_assign(&mut self, w: Complex) {
        *self = *self - w;
    }
}

impl MulAssign for Complex {
    fn mul_assign(&mut self, w: Complex) {
        *self = *self * w;
    }
}

impl DivAssign for Complex {
    fn div_assign(&mut self, w: Complex) {
        *self = *self / w;
    }
}

impl std::iter::Sum for Complex {
    fn sum<I: Iterator<Item = Complex>>(iter: I) -> Complex {
        iter.fold(Complex::ZERO, |acc, z| acc + z)
    }
}
