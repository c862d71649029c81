use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

/// Data type carried by an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AxisValueType {
    #[default]
    Numeric,
    /// Unix timestamps in seconds.
    DateTime,
    /// Ordinal categories; labels come from the data, not the formatter.
    Text,
}

impl AxisValueType {
    #[must_use]
    pub fn is_ordinal(self) -> bool {
        matches!(self, Self::Text)
    }
}

/// Scale factor applied to numeric labels, e.g. `1.2M` for `1_200_000`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisplayUnit {
    pub value: f64,
    pub title: &'static str,
    pub label_suffix: &'static str,
}

pub const DISPLAY_UNIT_NONE: DisplayUnit = DisplayUnit {
    value: 1.0,
    title: "",
    label_suffix: "",
};
pub const DISPLAY_UNIT_THOUSANDS: DisplayUnit = DisplayUnit {
    value: 1e3,
    title: "thousands",
    label_suffix: "K",
};
pub const DISPLAY_UNIT_MILLIONS: DisplayUnit = DisplayUnit {
    value: 1e6,
    title: "millions",
    label_suffix: "M",
};
pub const DISPLAY_UNIT_BILLIONS: DisplayUnit = DisplayUnit {
    value: 1e9,
    title: "billions",
    label_suffix: "bn",
};
pub const DISPLAY_UNIT_TRILLIONS: DisplayUnit = DisplayUnit {
    value: 1e12,
    title: "trillions",
    label_suffix: "T",
};

/// How a value axis picks its display unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DisplayUnitPolicy {
    None,
    /// Chosen from the largest absolute tick value.
    #[default]
    Auto,
    Thousands,
    Millions,
    Billions,
    Trillions,
}

impl DisplayUnitPolicy {
    #[must_use]
    pub fn resolve(self, max_abs_value: f64) -> DisplayUnit {
        match self {
            Self::None => DISPLAY_UNIT_NONE,
            Self::Thousands => DISPLAY_UNIT_THOUSANDS,
            Self::Millions => DISPLAY_UNIT_MILLIONS,
            Self::Billions => DISPLAY_UNIT_BILLIONS,
            Self::Trillions => DISPLAY_UNIT_TRILLIONS,
            Self::Auto => [
                DISPLAY_UNIT_TRILLIONS,
                DISPLAY_UNIT_BILLIONS,
                DISPLAY_UNIT_MILLIONS,
                DISPLAY_UNIT_THOUSANDS,
            ]
            .into_iter()
            .find(|unit| max_abs_value >= unit.value)
            .unwrap_or(DISPLAY_UNIT_NONE),
        }
    }
}

/// Formats tick values into label text for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueFormatter {
    value_type: AxisValueType,
    display_unit: DisplayUnit,
    precision: u32,
    date_pattern: DatePattern,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
enum DatePattern {
    Date,
    DateTime,
    Time,
}

impl DatePattern {
    fn for_step_seconds(step: f64) -> Self {
        if step >= 86_400.0 {
            Self::Date
        } else if step >= 3_600.0 {
            Self::DateTime
        } else {
            Self::Time
        }
    }

    fn format_str(self) -> &'static str {
        match self {
            Self::Date => "%Y-%m-%d",
            Self::DateTime => "%m-%d %H:%M",
            Self::Time => "%H:%M:%S",
        }
    }
}

impl Default for ValueFormatter {
    fn default() -> Self {
        Self::plain(AxisValueType::Numeric)
    }
}

impl ValueFormatter {
    /// Formatter with no display unit and integer precision.
    #[must_use]
    pub fn plain(value_type: AxisValueType) -> Self {
        Self {
            value_type,
            display_unit: DISPLAY_UNIT_NONE,
            precision: 0,
            date_pattern: DatePattern::Date,
        }
    }

    /// Picks display unit and precision so that adjacent ticks stay distinct.
    #[must_use]
    pub fn for_ticks(value_type: AxisValueType, ticks: &[f64], policy: DisplayUnitPolicy) -> Self {
        let step = tick_step(ticks);
        match value_type {
            AxisValueType::DateTime => Self {
                date_pattern: DatePattern::for_step_seconds(step),
                ..Self::plain(value_type)
            },
            AxisValueType::Text => Self::plain(value_type),
            AxisValueType::Numeric => {
                let max_abs = ticks.iter().fold(0.0_f64, |acc, tick| acc.max(tick.abs()));
                let display_unit = policy.resolve(max_abs);
                Self {
                    value_type,
                    display_unit,
                    precision: precision_for_step(step / display_unit.value),
                    date_pattern: DatePattern::Date,
                }
            }
        }
    }

    #[must_use]
    pub fn value_type(self) -> AxisValueType {
        self.value_type
    }

    #[must_use]
    pub fn display_unit(self) -> DisplayUnit {
        self.display_unit
    }

    #[must_use]
    pub fn precision(self) -> u32 {
        self.precision
    }

    /// Title of the display unit when it actually scales values.
    #[must_use]
    pub fn unit_type(self) -> Option<&'static str> {
        (self.display_unit.value > 1.0).then_some(self.display_unit.title)
    }

    #[must_use]
    pub fn format(self, value: f64) -> String {
        match self.value_type {
            AxisValueType::DateTime => format_timestamp(value, self.date_pattern),
            AxisValueType::Numeric | AxisValueType::Text => {
                let scaled = value / self.display_unit.value;
                format!(
                    "{}{}",
                    format_decimal(scaled, self.precision),
                    self.display_unit.label_suffix
                )
            }
        }
    }
}

fn tick_step(ticks: &[f64]) -> f64 {
    ticks
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).abs())
        .filter(|step| *step > 0.0 && step.is_finite())
        .fold(f64::INFINITY, f64::min)
}

fn precision_for_step(step: f64) -> u32 {
    if !step.is_finite() || step <= 0.0 || step >= 1.0 {
        return 0;
    }
    (-step.log10().floor()).clamp(0.0, 10.0) as u32
}

fn format_decimal(value: f64, precision: u32) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    match Decimal::from_f64(value) {
        Some(decimal) => decimal.round_dp(precision).normalize().to_string(),
        None => format!("{value}"),
    }
}

fn format_timestamp(seconds: f64, pattern: DatePattern) -> String {
    if !seconds.is_finite() {
        return String::new();
    }
    match DateTime::<Utc>::from_timestamp(seconds.floor() as i64, 0) {
        Some(time) => time.format(pattern.format_str()).to_string(),
        None => format!("{seconds}"),
    }
}
