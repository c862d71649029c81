use std::cell::RefCell;

use approx::assert_relative_eq;
use chart_axes::api::{
    AxesPropertiesRequest, CartesianAxesConfig, CartesianLayer, DataViewObjects, LayerAxes,
    LayerAxisContribution, LayerCapabilities, NegotiationStatus, SeriesLayer,
};
use chart_axes::core::{Domain, Viewport};
use chart_axes::{AxesError, AxesResult, CartesianAxesCoordinator, NegotiationTuning};

fn line(y_values: Vec<f64>) -> SeriesLayer {
    SeriesLayer::line(LayerAxisContribution::scalar(vec![0.0, 6.0, 12.0], y_values))
}

fn titled_line(y_values: Vec<f64>, value_title: &str) -> SeriesLayer {
    SeriesLayer::line(
        LayerAxisContribution::scalar(vec![0.0, 6.0, 12.0], y_values)
            .with_titles("Month", value_title),
    )
}

fn config(json: &str) -> CartesianAxesConfig {
    CartesianAxesConfig::from_json_str(json).expect("valid config")
}

#[test]
fn single_layer_gets_one_value_axis() {
    let layer = line(vec![0.0, 37.0, 100.0]);
    let layout = CartesianAxesCoordinator::default()
        .layout(&[&layer], Viewport::new(800.0, 400.0), &CartesianAxesConfig::default())
        .expect("layout");

    assert!(layout.axes.y2.is_none());
    assert!(!layout.render_y2);
    assert!(layout.render_x);
    assert!(layout.render_y1);
    assert_eq!(layout.axes.y1.tick_values.first().copied(), Some(0.0));
    assert_eq!(layout.axes.y1.tick_values.last().copied(), Some(100.0));
    assert!(layout.margin.bottom >= 25.0);
    assert_relative_eq!(layout.margin.top, 8.0);
    assert_eq!(layout.negotiation, NegotiationStatus::Converged);
    assert!(layout.ignored_layers.is_empty());
}

#[test]
fn plot_area_is_viewport_minus_margin() {
    let layer = line(vec![0.0, 100.0]);
    let viewport = Viewport::new(800.0, 400.0);
    let layout = CartesianAxesCoordinator::default()
        .layout(&[&layer], viewport, &CartesianAxesConfig::default())
        .expect("layout");

    assert_relative_eq!(layout.plot_area.left, layout.margin.left);
    assert_relative_eq!(layout.plot_area.top, layout.margin.top);
    assert_relative_eq!(
        layout.plot_area.width,
        viewport.width - layout.margin.left - layout.margin.right
    );
    assert_relative_eq!(
        layout.plot_area.height,
        viewport.height - layout.margin.top - layout.margin.bottom
    );
}

#[test]
fn distant_value_domains_split_onto_two_axes() {
    let primary = line(vec![0.0, 25.0, 50.0]);
    let secondary = line(vec![200.0, 220.0, 250.0]);
    let layout = CartesianAxesCoordinator::default()
        .layout(
            &[&primary, &secondary],
            Viewport::new(800.0, 400.0),
            &CartesianAxesConfig::default(),
        )
        .expect("layout");

    let y2 = layout.axes.y2.as_ref().expect("secondary axis");
    assert_eq!(y2.scale.domain(), Domain::new(200.0, 250.0));
    assert_eq!(layout.axes.y1.scale.domain(), Domain::new(0.0, 50.0));
    assert!(layout.render_y2);
    assert!(layout.margin.right >= 15.0);
}

#[test]
fn overlapping_value_domains_merge() {
    let primary = line(vec![0.0, 100.0]);
    let secondary = line(vec![10.0, 90.0]);
    let layout = CartesianAxesCoordinator::default()
        .layout(
            &[&primary, &secondary],
            Viewport::new(800.0, 400.0),
            &CartesianAxesConfig::default(),
        )
        .expect("layout");

    assert!(layout.axes.y2.is_none());
    assert!(!layout.render_y2);
    assert_eq!(layout.axes.y1.scale.domain(), Domain::new(0.0, 100.0));
}

#[test]
fn hidden_secondary_axis_forces_merge() {
    let primary = line(vec![0.0, 1.0]);
    let secondary = line(vec![1_000.0, 2_000.0]);
    let layout = CartesianAxesCoordinator::default()
        .layout(
            &[&primary, &secondary],
            Viewport::new(800.0, 400.0),
            &config(r#"{"valueAxis": {"secShow": false}}"#),
        )
        .expect("layout");

    assert!(layout.axes.y2.is_none());
    assert!(!layout.render_y2);
    assert_eq!(layout.axes.y1.scale.domain(), Domain::new(0.0, 2_000.0));
}

#[test]
fn shown_secondary_axis_skips_the_overlap_check() {
    let primary = line(vec![0.0, 100.0]);
    let secondary = line(vec![10.0, 90.0]);
    let layout = CartesianAxesCoordinator::default()
        .layout(
            &[&primary, &secondary],
            Viewport::new(800.0, 400.0),
            &config(r#"{"valueAxis": {"secShow": true}}"#),
        )
        .expect("layout");

    assert!(layout.axes.y2.is_some());
    assert!(layout.render_y2);
}

#[test]
fn third_unmergeable_layer_is_reported() {
    let first = line(vec![0.0, 50.0]);
    let second = line(vec![200.0, 250.0]);
    let third = line(vec![5_000.0, 6_000.0]);
    let layout = CartesianAxesCoordinator::default()
        .layout(
            &[&first, &second, &third],
            Viewport::new(800.0, 400.0),
            &CartesianAxesConfig::default(),
        )
        .expect("layout");

    assert_eq!(layout.ignored_layers, vec![2]);
    let y2 = layout.axes.y2.as_ref().expect("secondary axis");
    assert_eq!(y2.scale.domain(), Domain::new(200.0, 250.0));
}

fn categories(names: &[&str], values: Vec<f64>) -> SeriesLayer {
    SeriesLayer::line(LayerAxisContribution::categorical(
        names.iter().map(|name| (*name).to_owned()).collect(),
        values,
    ))
}

#[test]
fn ignored_layer_never_takes_over_the_axes() {
    let first = categories(&["A", "B"], vec![0.0, 50.0]);
    let second = categories(&["A", "B"], vec![200.0, 250.0]);
    let third = categories(&["A", "B", "C", "D", "E"], vec![5_000.0, 5_500.0, 6_000.0]);
    let layout = CartesianAxesCoordinator::default()
        .layout(
            &[&first, &second, &third],
            Viewport::new(800.0, 400.0),
            &CartesianAxesConfig::default(),
        )
        .expect("layout");

    assert_eq!(layout.ignored_layers, vec![2]);
    assert_eq!(layout.axes.x.tick_labels, vec!["A", "B"]);
    assert_eq!(layout.axes.y1.scale.domain(), Domain::new(0.0, 50.0));
    let y2 = layout.axes.y2.as_ref().expect("secondary axis");
    assert_eq!(y2.scale.domain(), Domain::new(200.0, 250.0));
}

#[test]
fn category_takeover_stops_once_the_secondary_axis_is_set() {
    let first = categories(&["A", "B"], vec![0.0, 50.0]);
    let second = categories(&["A", "B"], vec![200.0, 250.0]);
    let third = categories(&["A", "B", "C", "D", "E"], vec![0.0, 40.0]);
    let layout = CartesianAxesCoordinator::default()
        .layout(
            &[&first, &second, &third],
            Viewport::new(800.0, 400.0),
            &CartesianAxesConfig::default(),
        )
        .expect("layout");

    assert!(layout.ignored_layers.is_empty());
    assert_eq!(layout.axes.x.tick_labels, vec!["A", "B"]);
    assert_eq!(layout.axes.y1.scale.domain(), Domain::new(0.0, 50.0));
    assert!(layout.axes.y2.is_some());
}

/// Delegates to a [`SeriesLayer`] and records the tick count it was asked for.
struct RecordingLayer {
    inner: SeriesLayer,
    forced_tick_counts: RefCell<Vec<Option<usize>>>,
}

impl RecordingLayer {
    fn new(inner: SeriesLayer) -> Self {
        Self {
            inner,
            forced_tick_counts: RefCell::new(Vec::new()),
        }
    }
}

impl CartesianLayer for RecordingLayer {
    fn calculate_axes_properties(
        &self,
        request: &AxesPropertiesRequest<'_>,
    ) -> AxesResult<LayerAxes> {
        self.forced_tick_counts
            .borrow_mut()
            .push(request.forced_tick_count);
        self.inner.calculate_axes_properties(request)
    }

    fn x_domain(&self) -> Option<Domain> {
        self.inner.x_domain()
    }

    fn y_domain(&self) -> Option<Domain> {
        self.inner.y_domain()
    }

    fn y_tick_candidates(&self) -> &[f64] {
        self.inner.y_tick_candidates()
    }

    fn is_scalar(&self) -> bool {
        self.inner.is_scalar()
    }

    fn capabilities(&self) -> LayerCapabilities {
        self.inner.capabilities()
    }
}

#[test]
fn split_value_axes_share_the_merged_tick_count() {
    let primary = RecordingLayer::new(line(vec![0.0, 1.5, 3.0]));
    let secondary = RecordingLayer::new(line(vec![1_000.0, 4_000.0, 7_000.0]));
    // Both layers offer seven candidate ticks: 0..3 by 0.5, 1000..7000 by 1000.
    assert_eq!(primary.y_tick_candidates().len(), 7);
    assert_eq!(secondary.y_tick_candidates().len(), 7);

    let layout = CartesianAxesCoordinator::default()
        .layout(
            &[&primary, &secondary],
            Viewport::new(800.0, 400.0),
            &CartesianAxesConfig::default(),
        )
        .expect("layout");

    for layer in [&primary, &secondary] {
        let counts = layer.forced_tick_counts.borrow();
        assert!(!counts.is_empty());
        assert!(counts.iter().all(|count| *count == Some(7)));
    }
    let y2 = layout.axes.y2.as_ref().expect("secondary axis");
    assert_eq!(layout.axes.y1.tick_values.len(), y2.tick_values.len());
}

#[test]
fn merged_value_axes_keep_the_height_based_tick_count() {
    let primary = RecordingLayer::new(line(vec![0.0, 100.0]));
    let secondary = RecordingLayer::new(line(vec![10.0, 90.0]));
    let layout = CartesianAxesCoordinator::default()
        .layout(
            &[&primary, &secondary],
            Viewport::new(800.0, 400.0),
            &CartesianAxesConfig::default(),
        )
        .expect("layout");

    assert!(layout.axes.y2.is_none());
    assert!(
        primary
            .forced_tick_counts
            .borrow()
            .iter()
            .all(Option::is_none)
    );
}

#[test]
fn scalar_layers_share_one_category_domain() {
    let early = SeriesLayer::line(LayerAxisContribution::scalar(
        vec![0.0, 6.0, 12.0],
        vec![1.0, 2.0, 3.0],
    ));
    let late = SeriesLayer::line(LayerAxisContribution::scalar(
        vec![6.0, 18.0, 24.0],
        vec![1.5, 2.5, 3.5],
    ));
    let layout = CartesianAxesCoordinator::default()
        .layout(
            &[&early, &late],
            Viewport::new(800.0, 400.0),
            &CartesianAxesConfig::default(),
        )
        .expect("layout");

    assert!(layout.is_scalar);
    assert_eq!(layout.axes.x.scale.domain(), Domain::new(0.0, 24.0));

    let forced = CartesianAxesCoordinator::default()
        .layout(
            &[&early, &late],
            Viewport::new(800.0, 400.0),
            &config(r#"{"categoryAxis": {"start": 2}}"#),
        )
        .expect("layout");
    assert_eq!(forced.axes.x.scale.domain(), Domain::new(2.0, 24.0));
}

#[test]
fn value_axis_title_carries_the_display_unit() {
    let layer = titled_line(vec![0.0, 2_500_000.0, 5_000_000.0], "Sales");
    let layout = CartesianAxesCoordinator::default()
        .layout(
            &[&layer],
            Viewport::new(800.0, 400.0),
            &config(r#"{"categoryAxis": {"showAxisTitle": true}, "valueAxis": {"showAxisTitle": true}}"#),
        )
        .expect("layout");

    assert_eq!(layout.axes.y1.axis_label.as_deref(), Some("Sales (millions)"));
    assert_eq!(layout.axes.x.axis_label.as_deref(), Some("Month"));
}

#[test]
fn secondary_title_follows_its_style() {
    let primary = titled_line(vec![0.0, 50.0], "Units");
    let secondary = titled_line(vec![2_000_000.0, 3_000_000.0], "Revenue");
    let objects = r#"{
        "valueAxis": {
            "showAxisTitle": true,
            "secShowAxisTitle": true,
            "secAxisStyle": "showUnitOnly"
        }
    }"#;
    let layout = CartesianAxesCoordinator::default()
        .layout(&[&primary, &secondary], Viewport::new(800.0, 400.0), &config(objects))
        .expect("layout");

    assert_eq!(layout.axes.y1.axis_label.as_deref(), Some("Units"));
    let y2 = layout.axes.y2.as_ref().expect("secondary axis");
    assert_eq!(y2.axis_label.as_deref(), Some("millions"));
}

#[test]
fn small_viewport_hides_axis_titles() {
    let layer = titled_line(vec![0.0, 100.0], "Sales");
    let objects = r#"{"categoryAxis": {"showAxisTitle": true}, "valueAxis": {"showAxisTitle": true}}"#;
    let viewport = Viewport::new(400.0, 150.0);

    let hiding = CartesianAxesCoordinator::new(NegotiationTuning {
        hide_axis_titles_below_height: Some(200.0),
        ..NegotiationTuning::default()
    })
    .expect("valid tuning");
    let hidden = hiding
        .layout(&[&layer], viewport, &config(objects))
        .expect("layout");
    assert_eq!(hidden.axes.x.axis_label, None);
    assert_eq!(hidden.axes.y1.axis_label, None);

    let shown = CartesianAxesCoordinator::default()
        .layout(&[&layer], viewport, &config(objects))
        .expect("layout");
    assert_eq!(shown.axes.y1.axis_label.as_deref(), Some("Sales"));
    assert!(shown.margin.left > hidden.margin.left);
    assert!(shown.margin.bottom > hidden.margin.bottom);
}

#[test]
fn secondary_start_can_be_pinned_to_zero() {
    let primary = line(vec![0.0, 50.0]);
    let secondary = line(vec![200.0, 250.0]);
    let coordinator = CartesianAxesCoordinator::new(NegotiationTuning {
        pin_secondary_start_to_zero: true,
        ..NegotiationTuning::default()
    })
    .expect("valid tuning");
    let layout = coordinator
        .layout(
            &[&primary, &secondary],
            Viewport::new(800.0, 400.0),
            &CartesianAxesConfig::default(),
        )
        .expect("layout");

    let y2 = layout.axes.y2.as_ref().expect("secondary axis");
    assert_eq!(y2.scale.domain().min, 0.0);
}

#[test]
fn user_forced_domain_wins_over_data() {
    let layer = line(vec![3.0, 97.0]);
    let layout = CartesianAxesCoordinator::default()
        .layout(
            &[&layer],
            Viewport::new(800.0, 400.0),
            &config(r#"{"valueAxis": {"start": -10, "end": 110}}"#),
        )
        .expect("layout");

    assert_eq!(layout.axes.y1.scale.domain(), Domain::new(-10.0, 110.0));
}

#[test]
fn hidden_axes_do_not_render() {
    let layer = line(vec![0.0, 100.0]);
    let layout = CartesianAxesCoordinator::default()
        .layout(
            &[&layer],
            Viewport::new(800.0, 400.0),
            &config(r#"{"categoryAxis": {"show": false}, "valueAxis": {"show": false}}"#),
        )
        .expect("layout");

    assert!(!layout.render_x);
    assert!(!layout.render_y1);
    assert!(layout.margin.bottom < 25.0);
}

#[test]
fn primary_axis_on_the_right_takes_the_right_margin() {
    let layer = line(vec![0.0, 100_000.0]);
    let layout = CartesianAxesCoordinator::default()
        .layout(
            &[&layer],
            Viewport::new(800.0, 400.0),
            &config(r#"{"valueAxis": {"position": "right"}}"#),
        )
        .expect("layout");

    assert!(layout.margin.right >= layout.axes.y1.max_label_width + 10.0);
}

#[test]
fn larger_ordinal_layer_takes_over_the_category_axis() {
    let short = SeriesLayer::column(LayerAxisContribution::categorical(
        vec!["A".to_owned(), "B".to_owned()],
        vec![1.0, 2.0],
    ));
    let long = SeriesLayer::column(LayerAxisContribution::categorical(
        vec!["A".to_owned(), "B".to_owned(), "C".to_owned()],
        vec![1.5, 2.5, 3.5],
    ));
    let layout = CartesianAxesCoordinator::default()
        .layout(
            &[&short, &long],
            Viewport::new(800.0, 400.0),
            &CartesianAxesConfig::default(),
        )
        .expect("layout");

    assert_eq!(layout.axes.x.tick_labels, vec!["A", "B", "C"]);
}

#[test]
fn layout_reads_the_host_property_bag() {
    let objects: DataViewObjects =
        serde_json::from_str(r#"{"valueAxis": {"start": 0, "end": 200}}"#).expect("valid json");
    let layer = line(vec![10.0, 20.0]);
    let layers: [&dyn CartesianLayer; 1] = [&layer];
    let layout = CartesianAxesCoordinator::default()
        .layout_from_objects(&layers, Viewport::new(640.0, 480.0), &objects)
        .expect("layout");

    assert_eq!(layout.axes.y1.scale.domain(), Domain::new(0.0, 200.0));
}

#[test]
fn invalid_inputs_are_rejected() {
    let coordinator = CartesianAxesCoordinator::default();
    let config = CartesianAxesConfig::default();

    assert!(matches!(
        coordinator.layout(&[], Viewport::new(800.0, 400.0), &config),
        Err(AxesError::InvalidArgument(_))
    ));

    let layer = line(vec![0.0, 1.0]);
    assert!(matches!(
        coordinator.layout(&[&layer], Viewport::new(800.0, f64::NAN), &config),
        Err(AxesError::InvalidViewport { .. })
    ));

    assert!(matches!(
        CartesianAxesCoordinator::new(NegotiationTuning {
            max_iterations: 0,
            ..NegotiationTuning::default()
        }),
        Err(AxesError::InvalidData(_))
    ));
}

#[test]
fn layout_is_deterministic() {
    let primary = line(vec![0.0, 50.0]);
    let secondary = line(vec![200.0, 250.0]);
    let coordinator = CartesianAxesCoordinator::default();
    let config = CartesianAxesConfig::default();
    let viewport = Viewport::new(800.0, 400.0);

    let first = coordinator
        .layout(&[&primary, &secondary], viewport, &config)
        .expect("layout");
    let second = coordinator
        .layout(&[&primary, &secondary], viewport, &config)
        .expect("layout");
    assert_eq!(first, second);
}
