use serde::{Deserialize, Serialize};

use crate::error::{AxesError, AxesResult};

/// Pixel size of the area handed to the axes by the chart layout step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn validate(self) -> AxesResult<Self> {
        if !self.is_valid() {
            return Err(AxesError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

/// Space reserved around the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Margin {
    #[must_use]
    pub const fn new(top: f64, left: f64, right: f64, bottom: f64) -> Self {
        Self {
            top,
            left,
            right,
            bottom,
        }
    }

    #[must_use]
    pub fn horizontal(self) -> f64 {
        self.left + self.right
    }

    #[must_use]
    pub fn vertical(self) -> f64 {
        self.top + self.bottom
    }

    /// Width left for the plot once the side margins are removed.
    #[must_use]
    pub fn inner_width(self, viewport: Viewport) -> f64 {
        viewport.width - self.horizontal()
    }

    #[must_use]
    pub fn inner_height(self, viewport: Viewport) -> f64 {
        viewport.height - self.vertical()
    }
}

/// Axis-aligned rectangle in viewport pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Plot area left after subtracting `margin` from `viewport`.
    ///
    /// Sizes are clamped at zero when the margins exceed the viewport.
    #[must_use]
    pub fn plot_area(viewport: Viewport, margin: Margin) -> Self {
        Self {
            left: margin.left,
            top: margin.top,
            width: margin.inner_width(viewport).max(0.0),
            height: margin.inner_height(viewport).max(0.0),
        }
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }
}

/// RGBA color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Parses `#rgb` or `#rrggbb` host fill colors.
    pub fn from_hex(input: &str) -> AxesResult<Self> {
        let invalid = || AxesError::InvalidData(format!("invalid hex color `{input}`"));
        let digits = input.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |text: &str| u8::from_str_radix(text, 16).map_err(|_| invalid());
        let (red, green, blue) = match digits.len() {
            3 => {
                let expand = |index: usize| channel(&digits[index..=index].repeat(2));
                (expand(0)?, expand(1)?, expand(2)?)
            }
            6 => (
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            ),
            _ => return Err(invalid()),
        };
        Ok(Self::rgb(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
        ))
    }
}
