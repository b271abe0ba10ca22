use crate::domain::ports::ComplexFractal;
use crate::math::Complex;
use crate::utils::error::{FractalError, Result};
use tracing::debug;

/// 一次計算最多產生的點數
pub const MAX_NUMBERS: u128 = 1 << 10;

/// 逆向迭代：從 `z0` 出發，反覆取原像。
pub struct Calculator;

impl Calculator {
    /// 以深度優先的前序收集所有點，`z0` 永遠是第一個。
    ///
    /// `max_depth` 是樹的層數，`dimensions^max_depth` 不可超過 [`MAX_NUMBERS`]。
    pub fn calculate<F>(fractal: &F, z0: Complex, max_depth: usize) -> Result<Vec<Complex>>
    where
        F: ComplexFractal + ?Sized,
    {
        if max_depth < 1 {
            return Err(FractalError::InvalidArgument {
                message: "Maximal recursion depth should be at least 1".to_string(),
            });
        }

        let dimensions = fractal.dimensions() as u128;
        let needed = u32::try_from(max_depth)
            .ok()
            .and_then(|depth| dimensions.checked_pow(depth));

        match needed {
            Some(n) if n <= MAX_NUMBERS && max_depth as u128 <= MAX_NUMBERS => {
                debug!(
                    "🌀 Calculating up to {} pre-images (dimensions={}, depth={})",
                    n, dimensions, max_depth
                );
            }
            Some(n) => {
                return Err(FractalError::LimitExceeded {
                    message: format!(
                        "Number of needed calculations ({}) exceeds {}",
                        n.max(max_depth as u128),
                        MAX_NUMBERS
                    ),
                });
            }
            None => {
                return Err(FractalError::LimitExceeded {
                    message: format!(
                        "Number of needed calculations ({}^{}) exceeds {}",
                        dimensions, max_depth, MAX_NUMBERS
                    ),
                });
            }
        }

        let mut points = Vec::new();
        let mut stack = vec![(z0, max_depth)];

        while let Some((z, depth)) = stack.pop() {
            points.push(z);

            if depth > 1 {
                let pre_images = fractal.pre_images(z)?;
                // 反向入堆疊，出堆疊時才會維持原像的順序
                stack.extend(pre_images.into_iter().rev().map(|w| (w, depth - 1)));
            }
        }

        Ok(points)
    }
}
