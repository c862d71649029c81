use crate::core::{Domain, ForcedDomain, Margin, Viewport};
use crate::error::AxesResult;

use super::axis_config::AxisScaleType;
use super::axis_properties::AxisProperties;
use super::text_measurement::{FontProperties, TextMeasurer};

/// Optional behaviors a layer may support, declared up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayerCapabilities {
    /// Bars/columns: the value axis must include zero.
    pub requires_zero_baseline: bool,
}

/// Everything a layer needs to resolve its axes for one negotiation round.
#[derive(Clone, Copy)]
pub struct AxesPropertiesRequest<'a> {
    pub viewport: Viewport,
    pub margin: Margin,
    pub forced_category_domain: ForcedDomain,
    pub forced_value_domain: ForcedDomain,
    /// Value-axis tick count shared by split axes; replaces the
    /// height-based count when smaller.
    pub forced_tick_count: Option<usize>,
    pub force_merge: bool,
    pub category_scale_type: AxisScaleType,
    pub value_scale_type: AxisScaleType,
    pub show_category_axis_label: bool,
    pub show_value_axis_label: bool,
    pub font: &'a FontProperties,
    pub measurer: &'a dyn TextMeasurer,
}

impl AxesPropertiesRequest<'_> {
    /// Plot width once the side margins are removed.
    #[must_use]
    pub fn inner_width(&self) -> f64 {
        self.margin.inner_width(self.viewport).max(0.0)
    }

    /// Plot height once the top and bottom margins are removed.
    #[must_use]
    pub fn inner_height(&self) -> f64 {
        self.margin.inner_height(self.viewport).max(0.0)
    }
}

impl std::fmt::Debug for AxesPropertiesRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AxesPropertiesRequest")
            .field("viewport", &self.viewport)
            .field("margin", &self.margin)
            .field("forced_category_domain", &self.forced_category_domain)
            .field("forced_value_domain", &self.forced_value_domain)
            .field("forced_tick_count", &self.forced_tick_count)
            .field("force_merge", &self.force_merge)
            .field("category_scale_type", &self.category_scale_type)
            .field("value_scale_type", &self.value_scale_type)
            .field("show_category_axis_label", &self.show_category_axis_label)
            .field("show_value_axis_label", &self.show_value_axis_label)
            .field("font", self.font)
            .finish_non_exhaustive()
    }
}

/// Category and value axis resolved by one layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerAxes {
    pub category: AxisProperties,
    pub value: AxisProperties,
}

/// A chart series source participating in axis negotiation.
///
/// Implementations are deterministic for identical requests and keep no
/// state between calls; the coordinator may call them several times per
/// layout pass.
pub trait CartesianLayer {
    fn calculate_axes_properties(&self, request: &AxesPropertiesRequest<'_>)
    -> AxesResult<LayerAxes>;

    /// Category domain, `None` while the layer has no categories. Scalar
    /// layers share the union of their domains.
    fn x_domain(&self) -> Option<Domain>;

    /// Value domain, `None` while the layer has no values.
    fn y_domain(&self) -> Option<Domain>;

    /// Candidate value ticks; their count feeds the merged tick hint.
    fn y_tick_candidates(&self) -> &[f64];

    /// The category axis is continuous rather than ordinal.
    fn is_scalar(&self) -> bool;

    fn capabilities(&self) -> LayerCapabilities {
        LayerCapabilities::default()
    }
}
