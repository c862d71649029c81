use serde::{Deserialize, Serialize};

use crate::core::{Margin, Viewport};
use crate::error::{AxesError, AxesResult};

use super::text_measurement::FontProperties;

/// Largest share of the viewport width a side margin may take.
pub const MAX_MARGIN_FACTOR: f64 = 0.25;
pub const MIN_BOTTOM_MARGIN: f64 = 25.0;
pub const TOP_MARGIN: f64 = 8.0;
/// Pixels the first/last x label may hang over the plot edge.
pub const X_LABEL_MAX_ALLOWED_OVERFLOW: f64 = 25.0;
/// Extra room for the category axis title.
pub const X_AXIS_LABEL_PADDING: f64 = 20.0;
/// Extra room for a value axis title.
pub const Y_AXIS_LABEL_PADDING: f64 = 20.0;
/// Fixed-point rounds of the margin negotiation.
pub const MAX_ITERATIONS: usize = 2;

/// Gap between tick labels and the plot edge.
pub const AXIS_PADDING: Margin = Margin::new(0.0, 10.0, 15.0, 12.0);

/// Margin the first negotiation round starts from.
pub const INITIAL_MARGIN: Margin = Margin::new(TOP_MARGIN, 1.0, 0.0, MIN_BOTTOM_MARGIN);

/// Upper bounds for label-driven margins in one viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginLimits {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
}

impl MarginLimits {
    #[must_use]
    pub fn for_viewport(viewport: Viewport, max_margin_factor: f64) -> Self {
        let side = viewport.width * max_margin_factor;
        Self {
            left: side,
            right: side,
            bottom: MIN_BOTTOM_MARGIN.max((viewport.height * max_margin_factor).ceil()),
        }
    }
}

/// Engine knobs for the margin negotiation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NegotiationTuning {
    pub max_margin_factor: f64,
    pub max_iterations: usize,
    /// Start the secondary value axis at zero when the value axes split and
    /// every value domain is non-negative.
    pub pin_secondary_start_to_zero: bool,
    /// Axis titles are dropped when the viewport is shorter than this.
    pub hide_axis_titles_below_height: Option<f64>,
    pub font: FontProperties,
}

impl Default for NegotiationTuning {
    fn default() -> Self {
        Self {
            max_margin_factor: MAX_MARGIN_FACTOR,
            max_iterations: MAX_ITERATIONS,
            pin_secondary_start_to_zero: false,
            hide_axis_titles_below_height: None,
            font: FontProperties::default(),
        }
    }
}

impl NegotiationTuning {
    pub fn validate(self) -> AxesResult<Self> {
        if !self.max_margin_factor.is_finite()
            || self.max_margin_factor <= 0.0
            || self.max_margin_factor > 1.0
        {
            return Err(AxesError::InvalidData(
                "max margin factor must be finite and in (0, 1]".to_owned(),
            ));
        }

        if self.max_iterations == 0 {
            return Err(AxesError::InvalidData(
                "negotiation needs at least one iteration".to_owned(),
            ));
        }

        if let Some(height) = self.hide_axis_titles_below_height {
            if !height.is_finite() || height < 0.0 {
                return Err(AxesError::InvalidData(
                    "title hiding height must be finite and >= 0".to_owned(),
                ));
            }
        }

        if !self.font.size_px.is_finite() || self.font.size_px <= 0.0 {
            return Err(AxesError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }

        Ok(self)
    }

    /// Parses tuning from JSON; absent fields keep their defaults.
    pub fn from_json_str(input: &str) -> AxesResult<Self> {
        let tuning: Self = serde_json::from_str(input).map_err(|e| {
            AxesError::InvalidData(format!("failed to parse negotiation tuning json: {e}"))
        })?;
        tuning.validate()
    }

    #[must_use]
    pub fn margin_limits(&self, viewport: Viewport) -> MarginLimits {
        MarginLimits::for_viewport(viewport, self.max_margin_factor)
    }

    #[must_use]
    pub fn hides_axis_titles(&self, viewport: Viewport) -> bool {
        self.hide_axis_titles_below_height
            .is_some_and(|threshold| viewport.height < threshold)
    }
}
