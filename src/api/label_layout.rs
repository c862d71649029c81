use ordered_float::OrderedFloat;

use super::axis_properties::AxisProperties;
use super::text_measurement::{FontProperties, TextMeasurer};

/// Angle used when category labels are rotated to avoid collisions.
pub const DEFAULT_LABEL_ROTATION_DEGREES: f64 = 35.0;

/// Precomputed trigonometry for a label rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelRotation {
    pub degrees: f64,
    pub sine: f64,
    pub cosine: f64,
}

impl LabelRotation {
    #[must_use]
    pub fn from_degrees(degrees: f64) -> Self {
        let radians = degrees.to_radians();
        Self {
            degrees,
            sine: radians.sin(),
            cosine: radians.cos(),
        }
    }

    /// Footprint `(width, height)` of a label of `width` pixels once rotated.
    #[must_use]
    pub fn rotated_extent(self, width: f64) -> (f64, f64) {
        (width * self.cosine, width * self.sine)
    }
}

impl Default for LabelRotation {
    fn default() -> Self {
        Self::from_degrees(DEFAULT_LABEL_ROTATION_DEGREES)
    }
}

/// Widest label of `labels` under `font`, zero for none.
#[must_use]
pub fn max_label_width(labels: &[String], measurer: &dyn TextMeasurer, font: &FontProperties) -> f64 {
    labels
        .iter()
        .map(|label| OrderedFloat(measurer.measure_width(label, font)))
        .max()
        .map_or(0.0, |width| width.0)
}

/// Whether the x-axis labels fit side by side without rotation.
///
/// Ordinal labels must fit their category; scalar labels must fit the
/// smallest pixel gap between adjacent ticks.
#[must_use]
pub fn will_labels_fit(
    axis: &AxisProperties,
    available_width: f64,
    measurer: &dyn TextMeasurer,
    font: &FontProperties,
) -> bool {
    if axis.tick_labels.is_empty() {
        return true;
    }
    let slot_width = match axis.x_label_max_width {
        Some(width) => width,
        None => min_tick_spacing(axis).unwrap_or(available_width),
    };
    axis.tick_labels
        .iter()
        .all(|label| measurer.measure_width(label, font) <= slot_width)
}

/// Whether wrapping every ordinal label onto at most `max_bottom / line height`
/// lines keeps each line inside its category.
#[must_use]
pub fn will_labels_word_break(
    axis: &AxisProperties,
    max_bottom_margin: f64,
    measurer: &dyn TextMeasurer,
    font: &FontProperties,
) -> bool {
    if !axis.is_ordinal() || axis.tick_labels.is_empty() {
        return false;
    }
    let Some(max_width) = axis.x_label_max_width else {
        return false;
    };
    let line_height = measurer.estimate_height(font);
    if line_height <= 0.0 {
        return false;
    }
    let max_lines = (max_bottom_margin / line_height).floor() as usize;
    if max_lines == 0 {
        return false;
    }
    axis.tick_labels.iter().all(|label| {
        measurer
            .split_by_width(label, font, max_width, max_lines)
            .iter()
            .all(|line| measurer.measure_width(line, font) <= max_width)
    })
}

fn min_tick_spacing(axis: &AxisProperties) -> Option<f64> {
    axis.tick_values
        .windows(2)
        .map(|pair| OrderedFloat((axis.scale.map(pair[1]) - axis.scale.map(pair[0])).abs()))
        .min()
        .map(|spacing| spacing.0)
}
