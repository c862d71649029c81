mod axes_calculator;
mod axis_config;
mod axis_merger;
mod axis_properties;
mod axis_title;
mod cartesian_axes_coordinator;
mod label_layout;
mod layer;
mod margin_negotiator;
mod negotiation_tuning;
mod series_layer;
mod text_measurement;
mod tick_label_margins;
mod value_formatter;

pub use axes_calculator::{AxesCalculation, LayerAssignment, LayerRole};
pub use axis_config::{
    AxisConfig, AxisScaleType, CATEGORY_AXIS_OBJECT, CartesianAxesConfig, DataViewObject,
    DataViewObjects, FillValue, PropertyValue, SecondaryTitleStyle, SolidFill, VALUE_AXIS_OBJECT,
    ValueAxisPosition,
};
pub use axis_merger::{
    MIN_OVERLAP_PCT_TO_MERGE_VALUE_AXES, MergedAxisResult, SecondaryValueAxis,
    ValueAxisMergeOutcome, ValueDomainContribution, merge_value_domains, try_merge,
};
pub use axis_properties::{AxisProperties, CartesianAxisProperties};
pub use axis_title::{attach_unit_suffixes, clear_axis_titles, secondary_title, title_with_unit};
pub use cartesian_axes_coordinator::{CartesianAxesCoordinator, CartesianAxesLayout};
pub use label_layout::{
    DEFAULT_LABEL_ROTATION_DEGREES, LabelRotation, max_label_width, will_labels_fit,
    will_labels_word_break,
};
pub use layer::{AxesPropertiesRequest, CartesianLayer, LayerAxes, LayerCapabilities};
pub use margin_negotiator::{
    AxesResolver, AxisVisibility, MarginNegotiator, NegotiatedAxes, NegotiationState,
    NegotiationStatus,
};
pub use negotiation_tuning::{
    AXIS_PADDING, INITIAL_MARGIN, MAX_ITERATIONS, MAX_MARGIN_FACTOR, MIN_BOTTOM_MARGIN,
    MarginLimits, NegotiationTuning, TOP_MARGIN, X_AXIS_LABEL_PADDING,
    X_LABEL_MAX_ALLOWED_OVERFLOW, Y_AXIS_LABEL_PADDING,
};
pub use series_layer::{DEFAULT_VALUE_DOMAIN, LayerAxisContribution, SeriesLayer};
pub use text_measurement::{FontProperties, HeuristicTextMeasurer, LabelLines, TextMeasurer};
pub use tick_label_margins::{TickLabelMarginRequest, TickLabelMargins, resolve_tick_label_margins};
pub use value_formatter::{
    AxisValueType, DISPLAY_UNIT_BILLIONS, DISPLAY_UNIT_MILLIONS, DISPLAY_UNIT_NONE,
    DISPLAY_UNIT_THOUSANDS, DISPLAY_UNIT_TRILLIONS, DisplayUnit, DisplayUnitPolicy,
    ValueFormatter,
};
