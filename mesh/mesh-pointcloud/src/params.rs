//! Parameters for point cloud construction.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Parameters for a [`PointCloud`](crate::PointCloud).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CloudParams {
    /// Color given to points ingested without explicit colors.
    /// Default: mid-gray (128, 128, 128)
    pub default_color: Color,
}

impl Default for CloudParams {
    fn default() -> Self {
        Self {
            default_color: Color::GRAY,
        }
    }
}

impl CloudParams {
    /// Set the color used for uncolored ingestion.
    #[must_use]
    pub const fn with_default_color(mut self, color: Color) -> Self {
        self.default_color = color;
        self
    }
}
