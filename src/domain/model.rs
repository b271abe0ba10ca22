use crate::math::Complex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// 回溯樹上的一個點：`id` 是在兄弟節點中的編號，`depth` 是父節點的深度。
///
/// 相等與雜湊只看 `(id, depth)`，不看座標。
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TracedPoint {
    pub id: usize,
    pub depth: usize,
    pub number: Complex,
}

impl TracedPoint {
    pub fn new(id: usize, depth: usize, number: Complex) -> Self {
        Self { id, depth, number }
    }

    pub fn root() -> Self {
        Self::new(0, 0, Complex::ZERO)
    }
}

impl PartialEq for TracedPoint {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.depth == other.depth
    }
}

impl Eq for TracedPoint {}

impl Hash for TracedPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.depth.hash(state);
    }
}

impl fmt::Display for TracedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TracedPoint{{id={}, depth={}, number={}}}",
            self.id, self.depth, self.number
        )
    }
}

/// 輸出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Png,
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Csv => "csv",
        }
    }
}
