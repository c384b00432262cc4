//! Per-point RGB color.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::CloudError;

/// RGB color attached to every point of a cloud.
///
/// Colors carry no alpha channel; the PLY export writes a constant alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
}

impl Color {
    /// Create a new color from RGB components.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_pointcloud::Color;
    ///
    /// let red = Color::new(255, 0, 0);
    /// assert_eq!(red.r, 255);
    /// ```
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Mid-gray (128, 128, 128), used when no color is given.
    pub const GRAY: Self = Self::new(128, 128, 128);

    /// Black color (0, 0, 0).
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// White color (255, 255, 255).
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Components as an array.
    #[inline]
    #[must_use]
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::GRAY
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

/// Integer triples are range-checked rather than clamped.
///
/// # Example
///
/// ```
/// use mesh_pointcloud::Color;
///
/// assert_eq!(Color::try_from([10, 20, 30]).unwrap(), Color::new(10, 20, 30));
/// assert!(Color::try_from([0, 256, 0]).is_err());
/// ```
impl TryFrom<[i32; 3]> for Color {
    type Error = CloudError;

    fn try_from(rgb: [i32; 3]) -> Result<Self, Self::Error> {
        let channel =
            |value: i32| u8::try_from(value).map_err(|_| CloudError::ColorOutOfRange { value });
        Ok(Self::new(channel(rgb[0])?, channel(rgb[1])?, channel(rgb[2])?))
    }
}
