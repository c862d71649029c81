//! Reference [`CartesianLayer`] driven by pre-extracted series values.
//!
//! Hosts that already know a series' domains and tick candidates can wrap
//! them in a [`LayerAxisContribution`] instead of writing their own resolver.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::ticks::{
    log_ticks, nice_domain, nice_ticks, recommended_tick_count_for_x_axis,
    recommended_tick_count_for_y_axis, widen_degenerate,
};
use crate::core::{AxisScale, BandScale, Domain, ForcedDomain, LinearScale, LogScale};
use crate::error::AxesResult;

use super::axis_config::AxisScaleType;
use super::axis_properties::AxisProperties;
use super::label_layout::max_label_width;
use super::layer::{AxesPropertiesRequest, CartesianLayer, LayerAxes, LayerCapabilities};
use super::value_formatter::{AxisValueType, DisplayUnitPolicy, ValueFormatter};

/// Value domain shown when a layer has no values yet.
pub const DEFAULT_VALUE_DOMAIN: Domain = Domain::new(0.0, 10.0);

/// Tick density used for the value tick candidates reported to the merger.
const CANDIDATE_TICK_COUNT: usize = 8;

/// Axis-relevant data extracted from one series by the host.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayerAxisContribution {
    pub x_domain: Option<Domain>,
    pub y_domain: Option<Domain>,
    /// Scalar category values.
    pub x_values: Vec<f64>,
    pub y_values: Vec<f64>,
    /// Category names for ordinal axes, one per category.
    pub category_labels: Vec<String>,
    pub is_scalar: bool,
    pub category_title: Option<String>,
    pub value_title: Option<String>,
    pub category_value_type: AxisValueType,
    pub value_display_units: DisplayUnitPolicy,
}

impl LayerAxisContribution {
    /// Scalar series; domains are derived from the values.
    #[must_use]
    pub fn scalar(x_values: Vec<f64>, y_values: Vec<f64>) -> Self {
        Self {
            x_domain: Domain::from_values(&x_values),
            y_domain: Domain::from_values(&y_values),
            x_values,
            y_values,
            is_scalar: true,
            ..Self::default()
        }
    }

    /// Ordinal series with one value per category.
    #[must_use]
    pub fn categorical(category_labels: Vec<String>, y_values: Vec<f64>) -> Self {
        Self {
            x_domain: Some(Domain::ordinal(category_labels.len())),
            y_domain: Domain::from_values(&y_values),
            y_values,
            category_labels,
            category_value_type: AxisValueType::Text,
            is_scalar: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_y_domain(mut self, domain: Domain) -> Self {
        self.y_domain = Some(domain);
        self
    }

    #[must_use]
    pub fn with_titles(
        mut self,
        category_title: impl Into<String>,
        value_title: impl Into<String>,
    ) -> Self {
        self.category_title = Some(category_title.into());
        self.value_title = Some(value_title.into());
        self
    }

    #[must_use]
    pub fn with_category_value_type(mut self, value_type: AxisValueType) -> Self {
        self.category_value_type = value_type;
        self
    }

    #[must_use]
    pub fn with_value_display_units(mut self, policy: DisplayUnitPolicy) -> Self {
        self.value_display_units = policy;
        self
    }
}

/// Chart layer whose axes are computed from a [`LayerAxisContribution`].
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesLayer {
    contribution: LayerAxisContribution,
    capabilities: LayerCapabilities,
    category_outer_padding_px: f64,
    value_tick_candidates: Vec<f64>,
}

impl SeriesLayer {
    /// Line-style layer: no zero baseline, points sit on band centers.
    #[must_use]
    pub fn line(contribution: LayerAxisContribution) -> Self {
        Self::new(contribution, LayerCapabilities::default(), 0.0)
    }

    /// Column-style layer: value axis includes zero, bands get outer padding.
    #[must_use]
    pub fn column(contribution: LayerAxisContribution) -> Self {
        Self::new(
            contribution,
            LayerCapabilities {
                requires_zero_baseline: true,
            },
            5.0,
        )
    }

    fn new(
        contribution: LayerAxisContribution,
        capabilities: LayerCapabilities,
        category_outer_padding_px: f64,
    ) -> Self {
        let value_tick_candidates = contribution
            .y_domain
            .map(|domain| {
                let domain = with_baseline(domain, capabilities);
                nice_ticks(
                    nice_domain(domain, CANDIDATE_TICK_COUNT),
                    CANDIDATE_TICK_COUNT,
                )
            })
            .unwrap_or_default();
        Self {
            contribution,
            capabilities,
            category_outer_padding_px,
            value_tick_candidates,
        }
    }

    #[must_use]
    pub fn contribution(&self) -> &LayerAxisContribution {
        &self.contribution
    }

    fn category_axis(&self, request: &AxesPropertiesRequest<'_>) -> AxesResult<AxisProperties> {
        let contribution = &self.contribution;
        let width = request.inner_width();
        let axis_label = request
            .show_category_axis_label
            .then(|| contribution.category_title.clone())
            .flatten();

        if contribution.is_scalar {
            let raw = request
                .forced_category_domain
                .apply_to(contribution.x_domain)
                .unwrap_or(Domain::new(0.0, 1.0));
            let domain = widen_degenerate(raw);
            let is_log_scale_allowed = LogScale::supports(domain);
            let use_log = request.category_scale_type == AxisScaleType::Log;
            if use_log && !is_log_scale_allowed {
                debug!(
                    min = domain.min,
                    max = domain.max,
                    "category log scale unavailable, using linear"
                );
            }
            let (scale, tick_values) = if use_log && is_log_scale_allowed {
                (
                    AxisScale::Log(LogScale::new(domain, (0.0, width))?),
                    log_ticks(domain),
                )
            } else {
                (
                    AxisScale::Linear(LinearScale::new(domain, (0.0, width))?),
                    nice_ticks(domain, recommended_tick_count_for_x_axis(width)),
                )
            };
            let formatter = ValueFormatter::for_ticks(
                contribution.category_value_type,
                &tick_values,
                DisplayUnitPolicy::Auto,
            );
            let tick_labels: Vec<String> =
                tick_values.iter().map(|value| formatter.format(*value)).collect();
            return Ok(AxisProperties {
                scale,
                max_label_width: max_label_width(&tick_labels, request.measurer, request.font),
                tick_values,
                tick_labels,
                axis_type: contribution.category_value_type,
                formatter,
                axis_label,
                is_category_axis: true,
                will_labels_fit: true,
                will_labels_word_break: false,
                x_label_max_width: None,
                category_thickness: None,
                outer_padding: None,
                using_default_domain: contribution.x_domain.is_none(),
                is_log_scale_allowed,
                label_color: None,
            });
        }

        let count = contribution.category_labels.len();
        let scale = BandScale::new(count, (0.0, width), self.category_outer_padding_px)?;
        let thickness = scale.bandwidth();
        let tick_labels = contribution.category_labels.clone();
        Ok(AxisProperties {
            scale: AxisScale::Band(scale),
            tick_values: (0..count).map(|index| index as f64).collect(),
            max_label_width: max_label_width(&tick_labels, request.measurer, request.font),
            tick_labels,
            axis_type: AxisValueType::Text,
            formatter: ValueFormatter::plain(AxisValueType::Text),
            axis_label,
            is_category_axis: true,
            will_labels_fit: true,
            will_labels_word_break: false,
            x_label_max_width: Some(thickness),
            category_thickness: Some(thickness),
            outer_padding: Some(self.category_outer_padding_px),
            using_default_domain: count == 0,
            is_log_scale_allowed: false,
            label_color: None,
        })
    }

    fn value_axis(&self, request: &AxesPropertiesRequest<'_>) -> AxesResult<AxisProperties> {
        let contribution = &self.contribution;
        let height = request.inner_height();
        let using_default_domain = contribution.y_domain.is_none();

        let data_domain = with_baseline(
            contribution.y_domain.unwrap_or(DEFAULT_VALUE_DOMAIN),
            self.capabilities,
        );
        let domain = data_domain.apply_forced(request.forced_value_domain);
        let is_log_scale_allowed = LogScale::supports(domain);
        if request.value_scale_type == AxisScaleType::Log && !is_log_scale_allowed {
            debug!(min = domain.min, max = domain.max, "log scale unavailable, using linear");
        }
        let recommended = recommended_tick_count_for_y_axis(height);
        let tick_count = request
            .forced_tick_count
            .map_or(recommended, |forced| forced.min(recommended));

        // Pixel range runs bottom-up: larger values sit closer to the top.
        let range = (height, 0.0);
        let (scale, tick_values) =
            if request.value_scale_type == AxisScaleType::Log && is_log_scale_allowed {
                let log_domain = widen_degenerate(domain);
                (
                    AxisScale::Log(LogScale::new(log_domain, range)?),
                    log_ticks(log_domain),
                )
            } else {
                let nice = nice_bounds(domain, request.forced_value_domain, tick_count);
                (
                    AxisScale::Linear(LinearScale::new(nice, range)?),
                    nice_ticks(nice, tick_count),
                )
            };

        let formatter = ValueFormatter::for_ticks(
            AxisValueType::Numeric,
            &tick_values,
            contribution.value_display_units,
        );
        let tick_labels: Vec<String> =
            tick_values.iter().map(|value| formatter.format(*value)).collect();
        Ok(AxisProperties {
            scale,
            max_label_width: max_label_width(&tick_labels, request.measurer, request.font),
            tick_values,
            tick_labels,
            axis_type: AxisValueType::Numeric,
            formatter,
            axis_label: request
                .show_value_axis_label
                .then(|| contribution.value_title.clone())
                .flatten(),
            is_category_axis: false,
            will_labels_fit: true,
            will_labels_word_break: false,
            x_label_max_width: None,
            category_thickness: None,
            outer_padding: None,
            using_default_domain,
            is_log_scale_allowed,
            label_color: None,
        })
    }
}

fn with_baseline(domain: Domain, capabilities: LayerCapabilities) -> Domain {
    if capabilities.requires_zero_baseline {
        Domain::new(domain.min.min(0.0), domain.max.max(0.0))
    } else {
        domain
    }
}

/// Nices the unforced ends of `domain`; user-forced ends stay exact.
fn nice_bounds(domain: Domain, forced: ForcedDomain, tick_count: usize) -> Domain {
    let nice = nice_domain(domain, tick_count);
    let widened = widen_degenerate(domain);
    Domain::new(
        if forced.start.is_some() { widened.min } else { nice.min },
        if forced.end.is_some() { widened.max } else { nice.max },
    )
}

impl CartesianLayer for SeriesLayer {
    fn calculate_axes_properties(
        &self,
        request: &AxesPropertiesRequest<'_>,
    ) -> AxesResult<LayerAxes> {
        Ok(LayerAxes {
            category: self.category_axis(request)?,
            value: self.value_axis(request)?,
        })
    }

    fn x_domain(&self) -> Option<Domain> {
        self.contribution.x_domain
    }

    fn y_domain(&self) -> Option<Domain> {
        self.contribution.y_domain
    }

    fn y_tick_candidates(&self) -> &[f64] {
        &self.value_tick_candidates
    }

    fn is_scalar(&self) -> bool {
        self.contribution.is_scalar
    }

    fn capabilities(&self) -> LayerCapabilities {
        self.capabilities
    }
}
