use crate::core::render::{encode_png, plot, plot_traced, points_csv, traced_csv};
use crate::core::{BackTrace, Calculator, PolynomialFractal, SquareFractal, Storage};
use crate::domain::model::OutputFormat;
use crate::math::Complex;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use tracing::info;

/// 要做逆向迭代的映射
#[derive(Debug, Clone, PartialEq)]
pub enum FractalKind {
    Square { c: Complex },
    /// 最高次項係數在前
    Polynomial { coefficients: Vec<Complex> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderJob {
    pub kind: FractalKind,
    pub z0: Complex,
    pub depth: usize,
    pub width: u32,
    pub format: OutputFormat,
}

impl RenderJob {
    pub fn points(&self) -> Result<Vec<Complex>> {
        match &self.kind {
            FractalKind::Square { c } => {
                Calculator::calculate(&SquareFractal::new(*c), self.z0, self.depth)
            }
            FractalKind::Polynomial { coefficients } => {
                let fractal = PolynomialFractal::new(coefficients)?;
                Calculator::calculate(&fractal, self.z0, self.depth)
            }
        }
    }
}

/// 計算、輸出、寫入儲存空間
pub struct RenderEngine<S: Storage> {
    storage: S,
    monitor: SystemMonitor,
}

impl<S: Storage> RenderEngine<S> {
    pub fn new(storage: S) -> Self {
        Self::new_with_monitoring(storage, false)
    }

    pub fn new_with_monitoring(storage: S, monitor_enabled: bool) -> Self {
        Self {
            storage,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// 回傳寫入的檔名
    pub async fn render(&self, job: &RenderJob) -> Result<String> {
        info!("🌀 Starting inverse iteration (depth {})", job.depth);
        self.monitor.log_stats("Start");

        let points = job.points()?;
        info!("📊 Calculated {} points", points.len());
        self.monitor.log_stats("Calculate");

        let data = match job.format {
            OutputFormat::Png => encode_png(&plot(&points, job.width)?)?,
            OutputFormat::Csv => points_csv(&points)?.into_bytes(),
        };

        let path = format!("fractal.{}", job.format.extension());
        self.store(&path, &data).await?;
        Ok(path)
    }

    pub async fn backtrace(
        &self,
        backtrace: &BackTrace,
        width: u32,
        format: OutputFormat,
    ) -> Result<String> {
        info!(
            "🌳 Starting back trace (imax {}, spread {})",
            backtrace.imax(),
            backtrace.spread()
        );
        self.monitor.log_stats("Start");

        let points = backtrace.calculate()?;
        info!("📊 Calculated {} nodes", points.len());
        self.monitor.log_stats("Calculate");

        let data = match format {
            OutputFormat::Png => encode_png(&plot_traced(&points, width)?)?,
            OutputFormat::Csv => traced_csv(&points)?.into_bytes(),
        };

        let path = format!("backtrace.{}", format.extension());
        self.store(&path, &data).await?;
        Ok(path)
    }

    async fn store(&self, path: &str, data: &[u8]) -> Result<()> {
        self.storage.write_file(path, data).await?;
        info!("💾 Wrote {} bytes to {}", data.len(), path);

        self.monitor.log_stats("Write");
        self.monitor.log_final_stats();
        Ok(())
    }
}
