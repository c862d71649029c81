use serde::Serialize;

use crate::core::{AxisScale, Color};

use super::value_formatter::{AxisValueType, ValueFormatter};

/// Concrete geometry and labelling of one axis for the current layout pass.
///
/// Produced by a layer's resolver and refined by the margin negotiator
/// (fit flags, title text) before being handed to the layout step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisProperties {
    pub scale: AxisScale,
    /// Tick positions in data space (category indexes for ordinal axes).
    pub tick_values: Vec<f64>,
    /// Rendered label text, parallel to `tick_values`.
    pub tick_labels: Vec<String>,
    /// Widest tick label in pixels.
    pub max_label_width: f64,
    pub axis_type: AxisValueType,
    pub formatter: ValueFormatter,
    /// Axis title; `None` hides it.
    pub axis_label: Option<String>,
    pub is_category_axis: bool,
    /// Whether unrotated labels fit side by side.
    pub will_labels_fit: bool,
    /// Whether labels are wrapped onto several lines instead of rotated.
    pub will_labels_word_break: bool,
    /// Width available to one category label (ordinal axes).
    pub x_label_max_width: Option<f64>,
    pub category_thickness: Option<f64>,
    /// Pixels of padding the scale leaves before the first and after the last band.
    pub outer_padding: Option<f64>,
    /// No data fixed the domain; the axis shows a placeholder range.
    pub using_default_domain: bool,
    pub is_log_scale_allowed: bool,
    pub label_color: Option<Color>,
}

impl AxisProperties {
    #[must_use]
    pub fn tick_count(&self) -> usize {
        self.tick_values.len()
    }

    #[must_use]
    pub fn has_ticks(&self) -> bool {
        !self.tick_values.is_empty()
    }

    #[must_use]
    pub fn is_ordinal(&self) -> bool {
        self.axis_type.is_ordinal() || self.scale.is_ordinal()
    }
}

/// The axes of a Cartesian chart: category, primary value and optional secondary value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartesianAxisProperties {
    pub x: AxisProperties,
    pub y1: AxisProperties,
    pub y2: Option<AxisProperties>,
}

impl CartesianAxisProperties {
    #[must_use]
    pub fn y1_tick_count(&self) -> usize {
        self.y1.tick_count()
    }

    #[must_use]
    pub fn y2_tick_count(&self) -> Option<usize> {
        self.y2.as_ref().map(AxisProperties::tick_count)
    }
}
