use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Layout parameters, fixed for the lifetime of a [`crate::Sankey`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SankeyConfig {
    /// Horizontal thickness of every node rectangle.
    pub node_width: f64,
    /// Minimum vertical gap between two nodes of the same column.
    pub node_padding: f64,
    /// Canvas the layout is fitted into.
    pub size: Size,
    /// Number of relaxation rounds (each round is one right-to-left and one left-to-right pass).
    pub iterations: usize,
    /// Link curvature in `[0, 1]`. `0` draws straight diagonals between the link stubs.
    pub curvature: f64,
    /// Moves pure sources to the layer just before their nearest target instead of layer 0.
    pub align_sources_right: bool,
}

impl Default for SankeyConfig {
    fn default() -> Self {
        Self {
            node_width: 24.0,
            node_padding: 8.0,
            size: Size::new(1.0, 1.0),
            iterations: 32,
            curvature: 0.5,
            align_sources_right: false,
        }
    }
}

impl SankeyConfig {
    pub fn validate(&self) -> Result<()> {
        fn non_negative(name: &str, v: f64) -> Result<()> {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidConfig {
                    message: format!("{name} must be a finite, non-negative number (got {v})"),
                })
            }
        }

        non_negative("nodeWidth", self.node_width)?;
        non_negative("nodePadding", self.node_padding)?;
        non_negative("size.width", self.size.width)?;
        non_negative("size.height", self.size.height)?;
        if !(0.0..=1.0).contains(&self.curvature) {
            return Err(Error::InvalidConfig {
                message: format!("curvature must be within [0, 1] (got {})", self.curvature),
            });
        }
        Ok(())
    }
}
