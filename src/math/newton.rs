use super::complex::Complex;
use super::polynomial::ComplexPolynomial;
use crate::utils::error::{FractalError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;

/// 每次起點最多迭代次數
pub const MAX_ITERATIONS: usize = 1000;

/// 不收斂時換起點重試的次數
pub const MAX_RESTARTS: usize = 8;

/// `solve_all` 沒有給起點時使用，刻意不在實軸上
pub const DEFAULT_START: Complex = Complex::new(0.4, 0.9);

const POLISH_STEPS: usize = 8;

/// 多項式的零點及其重數
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zero {
    pub value: Complex,
    pub multiplicity: usize,
}

impl Zero {
    pub fn new(value: Complex) -> Self {
        Self::with_multiplicity(value, 1)
    }

    pub fn with_multiplicity(value: Complex, multiplicity: usize) -> Self {
        Self {
            value,
            multiplicity,
        }
    }
}

impl fmt::Display for Zero {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ×{}", self.value, self.multiplicity)
    }
}

fn check_eps2(eps2: f64) -> Result<()> {
    // NaN 也會被擋下
    if eps2 > 0.0 {
        Ok(())
    } else {
        Err(FractalError::InvalidArgument {
            message: "ε² must be positive.".to_string(),
        })
    }
}

/// 用牛頓法找出 `p` 的一個零點，直到 `|p(z)|² <= eps2`。
///
/// `z0` 是猜測零點附近的起點。若在 [`MAX_ITERATIONS`] 次內沒有收斂，
/// 會從繞著 `z0` 旋轉的起點重試 [`MAX_RESTARTS`] 次。
pub fn solve(p: &ComplexPolynomial, z0: Complex, eps2: f64) -> Result<Complex> {
    if p.degree().map_or(true, |d| d < 2) {
        return Err(FractalError::InvalidArgument {
            message: "Degree of polynomial must be at least 2.".to_string(),
        });
    }
    check_eps2(eps2)?;

    let pd = p.derivative();
    let radius = 1.0 + z0.abs();
    let mut last = z0;

    for attempt in 0..=MAX_RESTARTS {
        let start = if attempt == 0 {
            z0
        } else {
            let phi = 0.5 + TAU * attempt as f64 / MAX_RESTARTS as f64;
            z0 + Complex::from_polar(radius, phi)
        };

        match iterate(p, &pd, start, eps2) {
            Ok(z) => {
                if attempt > 0 {
                    tracing::debug!("Newton iteration converged after {} restart(s)", attempt);
                }
                return Ok(z);
            }
            Err(z) => {
                tracing::debug!("Newton iteration from {} stopped at {}", start, z);
                last = z;
            }
        }
    }

    Err(FractalError::NoConvergence {
        iterations: MAX_ITERATIONS * (MAX_RESTARTS + 1),
        last,
    })
}

/// 成功時回傳零點，失敗時回傳最後的迭代值
fn iterate(
    p: &ComplexPolynomial,
    pd: &ComplexPolynomial,
    start: Complex,
    eps2: f64,
) -> std::result::Result<Complex, Complex> {
    let stagnation = (4.0 * f64::EPSILON).powi(2);
    let mut z = start;

    for _ in 0..MAX_ITERATIONS {
        let w = p.apply(z);
        if w.norm() <= eps2 {
            return Ok(z);
        }

        let dw = pd.apply(z);
        if dw.is_zero() {
            // 導數為零時推開一點再繼續
            z += Complex::new(0.1, 0.1).scale(1.0 + z.abs());
            continue;
        }

        let step = w / dw;
        let next = z - step;
        if next.is_nan() || next.is_infinite() {
            return Err(z);
        }

        // 步長已低於機器精度，再迭代也不會更好
        if step.norm() <= stagnation * z.norm().max(1.0) {
            return Ok(next);
        }

        z = next;
    }

    Err(z)
}

/// 以原多項式對近似零點做幾步牛頓修正，只接受讓 `|p|` 變小的步驟
fn polish(p: &ComplexPolynomial, pd: &ComplexPolynomial, mut z: Complex) -> Complex {
    let mut residual = p.apply(z).norm();

    for _ in 0..POLISH_STEPS {
        let dw = pd.apply(z);
        if residual == 0.0 || dw.is_zero() {
            break;
        }

        let next = z - p.apply(z) / dw;
        let next_residual = p.apply(next).norm();
        if next_residual.is_nan() || next_residual >= residual {
            break;
        }

        z = next;
        residual = next_residual;
    }

    z
}

/// 找出 `p` 的全部零點 (依重數重複出現)。
///
/// 一次與二次多項式用公式求解，更高次則先用 [`solve`] 找一個零點，
/// 除掉對應的一次因式後從該零點繼續。
pub fn solve_all(p: &ComplexPolynomial, z0: Option<Complex>, eps2: f64) -> Result<Vec<Complex>> {
    check_eps2(eps2)?;

    let mut zeros = Vec::new();
    let mut q = p.clone();
    let mut start = z0.unwrap_or(DEFAULT_START);
    let mut deflated = false;

    loop {
        match q.degree() {
            None | Some(0) => break,
            Some(1) => {
                zeros.push(-(q.coefficient(0) / q.coefficient(1)));
                break;
            }
            Some(2) => {
                let qn = q.normalize();
                let p2 = qn.coefficient(1).scale(0.5);
                let dis = (p2.sqr() - qn.coefficient(0)).sqrt();
                zeros.push(-p2 + dis);
                zeros.push(-p2 - dis);
                break;
            }
            Some(_) => {
                let eta = solve(&q, start, eps2)?;
                zeros.push(eta);
                q = q.split_zero(eta);
                start = eta;
                deflated = true;
            }
        }
    }

    if deflated {
        let pd = p.derivative();
        for z in zeros.iter_mut() {
            *z = polish(p, &pd, *z);
        }
    }

    Ok(zeros)
}

/// 把距離小於 `tolerance` 的零點合併並計算重數，保留第一次出現的值
pub fn group_zeros<I>(values: I, tolerance: f64) -> Vec<Zero>
where
    I: IntoIterator<Item = Complex>,
{
    let t2 = tolerance * tolerance;
    let mut grouped: Vec<Zero> = Vec::new();

    for z in values {
        match grouped.iter_mut().find(|g| (g.value - z).norm() < t2) {
            Some(g) => g.multiplicity += 1,
            None => grouped.push(Zero::new(z)),
        }
    }

    grouped
}

/// 合併零點時預設的距離
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// 列出零點時 `|p(z)|²` 的門檻
pub const ZEROS_EPS2: f64 = 1e-20;

/// 缺少時用 [`DEFAULT_TOLERANCE`]，必須是正的有限值
pub fn grouping_tolerance(eps: Option<f64>) -> Result<f64> {
    let tolerance = eps.unwrap_or(DEFAULT_TOLERANCE);
    if tolerance.is_finite() && tolerance > 0.0 {
        Ok(tolerance)
    } else {
        Err(FractalError::InvalidArgument {
            message: format!("eps must be a positive number, got {}", tolerance),
        })
    }
}

/// [`solve_all`] 後再以 [`group_zeros`] 合併
pub fn zeros(
    p: &ComplexPolynomial,
    z0: Option<Complex>,
    eps2: f64,
    tolerance: f64,
) -> Result<Vec<Zero>> {
    let all = solve_all(p, z0, eps2)?;
    Ok(group_zeros(all, tolerance))
}
