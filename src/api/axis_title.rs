//! Axis title text: display-unit suffixes and small-viewport hiding.

use super::axis_config::SecondaryTitleStyle;
use super::axis_properties::{AxisProperties, CartesianAxisProperties};

/// `"Title (unit)"`, or the plain title when the formatter has no unit.
#[must_use]
pub fn title_with_unit(title: &str, unit: Option<&str>) -> String {
    match unit {
        Some(unit) => format!("{title} ({unit})"),
        None => title.to_owned(),
    }
}

/// Secondary value axis title under `style`.
#[must_use]
pub fn secondary_title(title: &str, unit: Option<&str>, style: SecondaryTitleStyle) -> String {
    match (style, unit) {
        (SecondaryTitleStyle::ShowBoth, _) => title_with_unit(title, unit),
        (SecondaryTitleStyle::ShowUnitOnly, Some(unit)) => unit.to_owned(),
        (SecondaryTitleStyle::ShowUnitOnly, None) | (SecondaryTitleStyle::ShowTitleOnly, _) => {
            title.to_owned()
        }
    }
}

/// Appends the display unit of each axis formatter to its title.
pub fn attach_unit_suffixes(axes: &mut CartesianAxisProperties, style: SecondaryTitleStyle) {
    suffix_primary(&mut axes.x);
    suffix_primary(&mut axes.y1);
    if let Some(y2) = axes.y2.as_mut() {
        let unit = y2.formatter.unit_type();
        if let Some(title) = y2.axis_label.as_mut() {
            *title = secondary_title(title, unit, style);
        }
    }
}

/// Drops every axis title.
pub fn clear_axis_titles(axes: &mut CartesianAxisProperties) {
    axes.x.axis_label = None;
    axes.y1.axis_label = None;
    if let Some(y2) = axes.y2.as_mut() {
        y2.axis_label = None;
    }
}

fn suffix_primary(axis: &mut AxisProperties) {
    let unit = axis.formatter.unit_type();
    if let Some(title) = axis.axis_label.as_mut() {
        *title = title_with_unit(title, unit);
    }
}
