use crate::domain::model::TracedPoint;
use crate::math::Complex;
use crate::utils::error::{FractalError, Result};
use std::f64::consts::PI;
use tracing::debug;

pub const DEFAULT_IMAX: i64 = 10;
pub const DEFAULT_SPREAD: i64 = 2;
pub const IMAX_RANGE: (i64, i64) = (2, 12);
pub const SPREAD_RANGE: (i64, i64) = (2, 10);

/// `spread^imax` 必須嚴格小於這個值
pub const NMAX: u64 = 10_000_000;

/// 回溯樹：每個節點往外長出 `spread` 個子節點，半徑每層減半。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackTrace {
    imax: u32,
    spread: u32,
}

impl BackTrace {
    /// 缺少的參數用預設值，超出範圍的會被夾回範圍內。
    pub fn new(imax: Option<i64>, spread: Option<i64>) -> Self {
        let imax = imax
            .unwrap_or(DEFAULT_IMAX)
            .clamp(IMAX_RANGE.0, IMAX_RANGE.1);
        let spread = spread
            .unwrap_or(DEFAULT_SPREAD)
            .clamp(SPREAD_RANGE.0, SPREAD_RANGE.1);

        Self {
            imax: imax as u32,
            spread: spread as u32,
        }
    }

    pub fn imax(&self) -> u32 {
        self.imax
    }

    pub fn spread(&self) -> u32 {
        self.spread
    }

    pub fn calculate(&self) -> Result<Vec<TracedPoint>> {
        let n = (self.spread as u64).pow(self.imax);
        if n >= NMAX {
            return Err(FractalError::LimitExceeded {
                message: format!(
                    "Too many values to calculate ({}^{} = {}, limit {})",
                    self.spread, self.imax, n, NMAX
                ),
            });
        }

        debug!(
            "🌳 Tracing back tree with imax={} spread={}",
            self.imax, self.spread
        );

        let mut points = Vec::new();
        self.trace(&mut points, TracedPoint::root(), 0);
        Ok(points)
    }

    fn trace(&self, points: &mut Vec<TracedPoint>, node: TracedPoint, depth: u32) {
        if depth >= self.imax {
            return;
        }

        points.push(node);

        let spread = self.spread as f64;
        let phi0 = PI / spread * depth as f64;
        let r0 = 0.5f64.powi(depth as i32);

        for k in 0..self.spread {
            let phi = 2.0 * PI * k as f64 / spread + phi0;
            let w = node.number + Complex::from_polar(r0, phi);
            self.trace(
                points,
                TracedPoint::new(k as usize, depth as usize, w),
                depth + 1,
            );
        }
    }
}

impl Default for BackTrace {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::complex::testing::*;

    #[test]
    fn test_defaults_and_clamping() {
        let bt = BackTrace::default();
        assert_eq!((bt.imax(), bt.spread()), (10, 2));

        let bt = BackTrace::new(Some(1), Some(-5));
        assert_eq!((bt.imax(), bt.spread()), (2, 2));

        let bt = BackTrace::new(Some(100), Some(100));
        assert_eq!((bt.imax(), bt.spread()), (12, 10));
    }

    #[test]
    fn test_node_count() {
        let points = BackTrace::new(Some(3), Some(3)).calculate().unwrap();
        // 1 + 3 + 9
        assert_eq!(points.len(), 13);

        let points = BackTrace::default().calculate().unwrap();
        assert_eq!(points.len(), 1023);
    }

    #[test]
    fn test_tree_layout() {
        let points = BackTrace::new(Some(2), Some(2)).calculate().unwrap();

        assert_eq!(points.len(), 3);
        assert_eq!(points[0], TracedPoint::root());
        assert_close(points[0].number, Complex::ZERO, STD_OFFSET);

        // 第 0 層的子節點在單位圓上，角度 0 與 π
        assert_eq!((points[1].id, points[1].depth), (0, 0));
        assert_close(points[1].number, Complex::ONE, STD_OFFSET);
        assert_eq!((points[2].id, points[2].depth), (1, 0));
        assert_close(points[2].number, Complex::real(-1.0), STD_OFFSET);
    }

    #[test]
    fn test_second_level_is_rotated_and_halved() {
        let points = BackTrace::new(Some(3), Some(2)).calculate().unwrap();

        // 前序：root, 1, 1 的兩個子節點, -1, ...
        assert_eq!(points.len(), 7);
        let child = points[2];
        assert_eq!((child.id, child.depth), (0, 1));
        // 1 + 0.5·e^{iπ/2}
        assert_close(child.number, Complex::new(1.0, 0.5), STD_OFFSET);

        let child = points[3];
        assert_eq!((child.id, child.depth), (1, 1));
        assert_close(child.number, Complex::new(1.0, -0.5), STD_OFFSET);
    }

    #[test]
    fn test_limit_exceeded() {
        // 10^7 剛好達到上限
        let result = BackTrace::new(Some(7), Some(10)).calculate();
        assert!(matches!(result, Err(FractalError::LimitExceeded { .. })));

        assert!(BackTrace::new(Some(6), Some(10)).calculate().is_ok());
    }
}
