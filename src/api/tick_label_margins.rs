use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::core::Viewport;

use super::axis_properties::{AxisProperties, CartesianAxisProperties};
use super::label_layout::LabelRotation;
use super::negotiation_tuning::{MarginLimits, X_LABEL_MAX_ALLOWED_OVERFLOW};
use super::text_measurement::{FontProperties, TextMeasurer};

/// Pixels each side needs for tick labels alone, before padding and titles.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TickLabelMargins {
    /// Height of the tallest x label.
    pub x_max: f64,
    pub y_left: f64,
    pub y_right: f64,
}

/// Inputs of one tick-label margin computation.
#[derive(Clone, Copy)]
pub struct TickLabelMarginRequest<'a> {
    pub viewport: Viewport,
    pub limits: MarginLimits,
    pub axes: &'a CartesianAxisProperties,
    pub render_x: bool,
    pub render_y1: bool,
    pub render_y2: bool,
    /// The primary value axis is drawn on the right.
    pub show_y1_on_right: bool,
    pub rotation: LabelRotation,
    pub font: &'a FontProperties,
    pub measurer: &'a dyn TextMeasurer,
}

/// Measures the tick labels of `request.axes` and turns them into margins.
///
/// Every value is ceiled and clamped to the matching limit. The first and
/// last x labels may hang over the plot edges by up to
/// [`X_LABEL_MAX_ALLOWED_OVERFLOW`] pixels; that overflow feeds the side
/// margins.
#[must_use]
pub fn resolve_tick_label_margins(request: &TickLabelMarginRequest<'_>) -> TickLabelMargins {
    let axes = request.axes;
    let limits = request.limits;

    let x = if request.render_x {
        measure_x_labels(request, &axes.x)
    } else {
        XLabelExtent::default()
    };

    let y1_width = if request.render_y1 {
        axes.y1.max_label_width
    } else {
        0.0
    };
    let y2_width = match &axes.y2 {
        Some(y2) if request.render_y2 => y2.max_label_width,
        _ => 0.0,
    };

    let (left_labels, right_labels) = if request.show_y1_on_right {
        (y2_width, y1_width)
    } else {
        (y1_width, y2_width)
    };

    TickLabelMargins {
        x_max: x.bottom.ceil().min(limits.bottom),
        y_left: x.left_overflow.max(left_labels).min(limits.left).ceil(),
        y_right: x.right_overflow.max(right_labels).min(limits.right).ceil(),
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct XLabelExtent {
    bottom: f64,
    left_overflow: f64,
    right_overflow: f64,
}

fn measure_x_labels(request: &TickLabelMarginRequest<'_>, x: &AxisProperties) -> XLabelExtent {
    let labels = &x.tick_labels;
    let Some(last_index) = labels.len().checked_sub(1) else {
        return XLabelExtent::default();
    };

    let measurer = request.measurer;
    let font = request.font;
    let text_height = measurer.estimate_height(font);
    let max_lines = if text_height > 0.0 {
        (request.limits.bottom / text_height).floor() as usize
    } else {
        0
    };

    let label_offset = match (x.outer_padding, x.category_thickness) {
        (Some(_), Some(thickness)) => thickness / 2.0,
        _ => 0.0,
    };
    let outer_padding = x.outer_padding.unwrap_or_else(|| {
        x.x_label_max_width.map_or(0.0, |max_width| {
            ((request.viewport.width - max_width * labels.len() as f64) / 2.0).max(0.0)
        })
    });
    let word_break = x.is_ordinal() && x.will_labels_word_break;
    let rotated = !x.will_labels_fit && !word_break;

    let mut extent = XLabelExtent::default();
    let mut heights = Vec::with_capacity(labels.len());
    for (index, label) in labels.iter().enumerate() {
        let mut width = measurer.measure_width(label, font);
        let height = if word_break {
            let max_width = x.x_label_max_width.unwrap_or(width);
            let lines = measurer.split_by_width(label, font, max_width, max_lines);
            lines.len() as f64 * text_height
        } else if rotated {
            let (rotated_width, rotated_height) = request.rotation.rotated_extent(width);
            width = rotated_width;
            rotated_height
        } else {
            text_height
        };
        heights.push(OrderedFloat(height));

        // Labels that do not fit flat are anchored at their end, so the first
        // one hangs left by its full width and none hangs right.
        if index == 0 {
            extent.left_overflow = if x.will_labels_fit {
                width / 2.0 - label_offset - outer_padding
            } else {
                width - label_offset - outer_padding
            };
        } else if index == last_index && x.will_labels_fit {
            extent.right_overflow = width / 2.0 - label_offset - outer_padding;
        }
    }

    extent.bottom = heights.into_iter().max().map_or(0.0, |height| height.0);
    extent.left_overflow = extent.left_overflow.clamp(0.0, X_LABEL_MAX_ALLOWED_OVERFLOW);
    extent.right_overflow = extent.right_overflow.clamp(0.0, X_LABEL_MAX_ALLOWED_OVERFLOW);
    extent
}
