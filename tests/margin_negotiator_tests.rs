use std::cell::Cell;

use approx::assert_relative_eq;
use chart_axes::api::{
    AxesCalculation, AxesPropertiesRequest, AxesResolver, CartesianAxesConfig,
    CartesianAxisProperties, CartesianLayer, FontProperties, HeuristicTextMeasurer,
    INITIAL_MARGIN, LayerAssignment, LayerAxisContribution, MarginNegotiator, NegotiationStatus,
    NegotiationTuning, SeriesLayer, TOP_MARGIN, Y_AXIS_LABEL_PADDING,
};
use chart_axes::core::{ForcedDomain, Margin, Viewport};
use chart_axes::{AxesError, AxesResult};

fn sales_layer() -> SeriesLayer {
    SeriesLayer::line(
        LayerAxisContribution::scalar(vec![0.0, 6.0, 12.0], vec![0.0, 42.0, 100.0])
            .with_titles("Month", "Sales"),
    )
}

fn resolve_single(
    layer: &SeriesLayer,
    viewport: Viewport,
    margin: Margin,
) -> AxesResult<CartesianAxisProperties> {
    let font = FontProperties::default();
    let axes = layer.calculate_axes_properties(&AxesPropertiesRequest {
        viewport,
        margin,
        forced_category_domain: ForcedDomain::default(),
        forced_value_domain: ForcedDomain::default(),
        forced_tick_count: None,
        force_merge: false,
        category_scale_type: Default::default(),
        value_scale_type: Default::default(),
        show_category_axis_label: true,
        show_value_axis_label: true,
        font: &font,
        measurer: &HeuristicTextMeasurer,
    })?;
    Ok(CartesianAxisProperties {
        x: axes.category,
        y1: axes.value,
        y2: None,
    })
}

#[test]
fn negotiation_converges_and_matches_a_recomputation() {
    let viewport = Viewport::new(800.0, 400.0);
    let config = CartesianAxesConfig::default();
    let tuning = NegotiationTuning::default();
    let layer = sales_layer();
    let layers: [&dyn CartesianLayer; 1] = [&layer];
    let assignment = LayerAssignment::new(1, None);
    let calculation = AxesCalculation {
        layers: &layers,
        assignment: &assignment,
        config: &config,
        viewport,
        margin: Margin::default(),
        limits: tuning.margin_limits(viewport),
        pin_secondary_start_to_zero: false,
        font: &tuning.font,
        measurer: &HeuristicTextMeasurer,
    };
    let negotiator = MarginNegotiator {
        viewport,
        config: &config,
        tuning: &tuning,
        measurer: &HeuristicTextMeasurer,
    };

    let negotiated = negotiator.negotiate(&calculation).expect("negotiation succeeds");

    assert_eq!(negotiated.status, NegotiationStatus::Converged);
    assert!(negotiated.iterations >= 1 && negotiated.iterations <= 2);
    assert_relative_eq!(negotiated.margin.top, TOP_MARGIN);
    assert!(negotiated.margin.bottom >= 25.0);

    let again = calculation
        .resolve_axes(negotiated.margin, Some(&negotiated.axes))
        .expect("recompute");
    assert_eq!(again.y1.tick_values, negotiated.axes.y1.tick_values);
}

#[test]
fn stable_categorical_chart_settles_on_the_single_pass_margin() {
    let viewport = Viewport::new(800.0, 400.0);
    let config = CartesianAxesConfig::default();
    let tuning = NegotiationTuning::default();
    let layer = SeriesLayer::column(LayerAxisContribution::categorical(
        vec!["Q1".to_owned(), "Q2".to_owned(), "Q3".to_owned(), "Q4".to_owned()],
        vec![12.0, 18.0, 9.0, 15.0],
    ));
    let layers: [&dyn CartesianLayer; 1] = [&layer];
    let assignment = LayerAssignment::new(1, None);
    let calculation = AxesCalculation {
        layers: &layers,
        assignment: &assignment,
        config: &config,
        viewport,
        margin: Margin::default(),
        limits: tuning.margin_limits(viewport),
        pin_secondary_start_to_zero: false,
        font: &tuning.font,
        measurer: &HeuristicTextMeasurer,
    };
    let negotiator = MarginNegotiator {
        viewport,
        config: &config,
        tuning: &tuning,
        measurer: &HeuristicTextMeasurer,
    };

    let negotiated = negotiator.negotiate(&calculation).expect("negotiation succeeds");
    let first_pass = calculation
        .resolve_axes(INITIAL_MARGIN, None)
        .expect("initial axes");

    assert_eq!(negotiated.status, NegotiationStatus::Converged);
    assert_eq!(negotiated.iterations, 1);
    assert_eq!(negotiated.margin, negotiator.margin_for(&first_pass));
}

#[test]
fn value_axis_title_widens_its_side() {
    let viewport = Viewport::new(800.0, 400.0);
    let tuning = NegotiationTuning::default();
    let layer = sales_layer();
    let axes = resolve_single(&layer, viewport, Margin::default()).expect("axes");

    let untitled = CartesianAxesConfig::default();
    let negotiator = MarginNegotiator {
        viewport,
        config: &untitled,
        tuning: &tuning,
        measurer: &HeuristicTextMeasurer,
    };
    let with_title = negotiator.margin_for(&axes);

    let mut bare = axes.clone();
    bare.y1.axis_label = None;
    let without_title = negotiator.margin_for(&bare);

    assert_relative_eq!(with_title.left - without_title.left, Y_AXIS_LABEL_PADDING);
}

#[test]
fn unstable_tick_counts_exhaust_the_iteration_cap() {
    let viewport = Viewport::new(800.0, 400.0);
    let config = CartesianAxesConfig::default();
    let tuning = NegotiationTuning::default();
    let layer = sales_layer();
    let calls = Cell::new(0_usize);

    let resolver = |margin: Margin,
                    _existing: Option<&CartesianAxisProperties>|
     -> AxesResult<CartesianAxisProperties> {
        let mut axes = resolve_single(&layer, viewport, margin)?;
        calls.set(calls.get() + 1);
        axes.y1.tick_values.truncate(calls.get());
        axes.y1.tick_labels.truncate(calls.get());
        Ok(axes)
    };
    let negotiator = MarginNegotiator {
        viewport,
        config: &config,
        tuning: &tuning,
        measurer: &HeuristicTextMeasurer,
    };
    let negotiated = negotiator.negotiate(&resolver).expect("negotiation succeeds");

    assert_eq!(negotiated.status, NegotiationStatus::Exhausted);
    assert_eq!(negotiated.iterations, 2);
    assert_eq!(calls.get(), 3);
}

#[test]
fn resolver_errors_propagate_unchanged() {
    let viewport = Viewport::new(800.0, 400.0);
    let config = CartesianAxesConfig::default();
    let tuning = NegotiationTuning::default();
    let resolver = |_margin: Margin,
                    _existing: Option<&CartesianAxisProperties>|
     -> AxesResult<CartesianAxisProperties> {
        Err(AxesError::InvalidData("layer exploded".to_owned()))
    };
    let negotiator = MarginNegotiator {
        viewport,
        config: &config,
        tuning: &tuning,
        measurer: &HeuristicTextMeasurer,
    };

    match negotiator.negotiate(&resolver) {
        Err(AxesError::InvalidData(message)) => assert_eq!(message, "layer exploded"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn invalid_viewport_is_rejected_before_resolving() {
    let viewport = Viewport::new(0.0, 400.0);
    let config = CartesianAxesConfig::default();
    let tuning = NegotiationTuning::default();
    let calls = Cell::new(0_usize);
    let layer = sales_layer();
    let resolver = |margin: Margin,
                    _existing: Option<&CartesianAxisProperties>|
     -> AxesResult<CartesianAxisProperties> {
        calls.set(calls.get() + 1);
        resolve_single(&layer, Viewport::new(800.0, 400.0), margin)
    };
    let negotiator = MarginNegotiator {
        viewport,
        config: &config,
        tuning: &tuning,
        measurer: &HeuristicTextMeasurer,
    };

    assert!(matches!(
        negotiator.negotiate(&resolver),
        Err(AxesError::InvalidViewport { .. })
    ));
    assert_eq!(calls.get(), 0);
}

#[test]
fn single_iteration_tuning_stops_after_one_round() {
    let viewport = Viewport::new(800.0, 400.0);
    let config = CartesianAxesConfig::default();
    let tuning = NegotiationTuning {
        max_iterations: 1,
        ..NegotiationTuning::default()
    };
    let layer = sales_layer();
    let calls = Cell::new(0_usize);
    let resolver = |margin: Margin,
                    _existing: Option<&CartesianAxisProperties>|
     -> AxesResult<CartesianAxisProperties> {
        let mut axes = resolve_single(&layer, viewport, margin)?;
        calls.set(calls.get() + 1);
        axes.y1.tick_values.truncate(calls.get());
        Ok(axes)
    };
    let negotiator = MarginNegotiator {
        viewport,
        config: &config,
        tuning: &tuning,
        measurer: &HeuristicTextMeasurer,
    };

    let negotiated = negotiator.negotiate(&resolver).expect("negotiation succeeds");
    assert_eq!(negotiated.iterations, 1);
    assert_eq!(negotiated.status, NegotiationStatus::Exhausted);
}
