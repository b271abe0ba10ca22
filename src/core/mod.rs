pub mod backtrace;
pub mod calculator;
pub mod engine;
pub mod fractals;
pub mod render;

pub use crate::domain::model::{OutputFormat, TracedPoint};
pub use crate::domain::ports::{ComplexFractal, Storage};
pub use crate::utils::error::Result;
pub use backtrace::BackTrace;
pub use calculator::Calculator;
pub use engine::{FractalKind, RenderEngine, RenderJob};
pub use fractals::{PolynomialFractal, SquareFractal};
