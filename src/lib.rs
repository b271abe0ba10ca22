#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod math;
pub mod server;
pub mod utils;

pub use config::{AppConfig, LocalStorage};

#[cfg(feature = "cli")]
pub use config::Cli;

pub use crate::core::{BackTrace, Calculator, FractalKind, RenderEngine, RenderJob};
pub use math::{Complex, ComplexPolynomial};
pub use utils::error::{FractalError, Result};
