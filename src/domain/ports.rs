use crate::math::Complex;
use crate::utils::error::Result;

/// 可以做逆向迭代的複映射 `f`
pub trait ComplexFractal: Send + Sync {
    /// 每個點的原像個數
    fn dimensions(&self) -> usize;

    /// 滿足 `f(w) = z` 的所有 `w`
    fn pre_images(&self, z: Complex) -> Result<Vec<Complex>>;
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
