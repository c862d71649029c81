use serde::Serialize;
use tracing::debug;

use crate::core::{BoundingBox, Domain, Margin, Viewport};
use crate::error::{AxesError, AxesResult};

use super::axes_calculator::{AxesCalculation, LayerAssignment};
use super::axis_config::{CartesianAxesConfig, DataViewObjects};
use super::axis_merger::{ValueAxisMergeOutcome, ValueDomainContribution, merge_value_domains};
use super::axis_properties::CartesianAxisProperties;
use super::layer::CartesianLayer;
use super::margin_negotiator::{MarginNegotiator, NegotiationStatus};
use super::negotiation_tuning::NegotiationTuning;
use super::text_measurement::{HeuristicTextMeasurer, TextMeasurer};

/// Axes, margin and plot area for one chart update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartesianAxesLayout {
    pub axes: CartesianAxisProperties,
    pub margin: Margin,
    pub plot_area: BoundingBox,
    pub render_x: bool,
    pub render_y1: bool,
    pub render_y2: bool,
    pub negotiation: NegotiationStatus,
    pub iterations: usize,
    /// The first layer plots a continuous category axis.
    pub is_scalar: bool,
    /// Layers whose values could not share either value axis.
    pub ignored_layers: Vec<usize>,
}

/// Entry point: turns layers, a viewport and axis settings into a layout.
///
/// Holds only immutable tuning and the text measurer; every call is a pure
/// function of its arguments.
#[derive(Debug, Clone)]
pub struct CartesianAxesCoordinator<M: TextMeasurer = HeuristicTextMeasurer> {
    tuning: NegotiationTuning,
    measurer: M,
}

impl Default for CartesianAxesCoordinator {
    fn default() -> Self {
        Self {
            tuning: NegotiationTuning::default(),
            measurer: HeuristicTextMeasurer,
        }
    }
}

impl CartesianAxesCoordinator {
    pub fn new(tuning: NegotiationTuning) -> AxesResult<Self> {
        Self::with_measurer(tuning, HeuristicTextMeasurer)
    }
}

impl<M: TextMeasurer> CartesianAxesCoordinator<M> {
    pub fn with_measurer(tuning: NegotiationTuning, measurer: M) -> AxesResult<Self> {
        Ok(Self {
            tuning: tuning.validate()?,
            measurer,
        })
    }

    #[must_use]
    pub fn tuning(&self) -> &NegotiationTuning {
        &self.tuning
    }

    #[must_use]
    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    /// Parses the host property bag and lays out the axes.
    pub fn layout_from_objects(
        &self,
        layers: &[&dyn CartesianLayer],
        viewport: Viewport,
        objects: &DataViewObjects,
    ) -> AxesResult<CartesianAxesLayout> {
        let config = CartesianAxesConfig::from_objects(objects)?;
        self.layout(layers, viewport, &config)
    }

    /// Lays out the axes of `layers` in caller order.
    ///
    /// The first layer seeds the category axis and the primary value axis.
    pub fn layout(
        &self,
        layers: &[&dyn CartesianLayer],
        viewport: Viewport,
        config: &CartesianAxesConfig,
    ) -> AxesResult<CartesianAxesLayout> {
        let viewport = viewport.validate()?;
        if layers.is_empty() {
            return Err(AxesError::InvalidArgument(
                "axes layout needs at least one layer".to_owned(),
            ));
        }

        let outcome = self.merge_outcome(layers, config)?;
        let assignment = LayerAssignment::new(layers.len(), outcome.as_ref())
            .with_shared_category_domain(shared_category_domain(layers)?);
        let calculation = AxesCalculation {
            layers,
            assignment: &assignment,
            config,
            viewport,
            margin: Margin::default(),
            limits: self.tuning.margin_limits(viewport),
            pin_secondary_start_to_zero: self.tuning.pin_secondary_start_to_zero,
            font: &self.tuning.font,
            measurer: &self.measurer,
        };
        let negotiator = MarginNegotiator {
            viewport,
            config,
            tuning: &self.tuning,
            measurer: &self.measurer,
        };
        let negotiated = negotiator.negotiate(&calculation)?;

        Ok(CartesianAxesLayout {
            is_scalar: layers.first().is_some_and(|layer| layer.is_scalar()),
            plot_area: BoundingBox::plot_area(viewport, negotiated.margin),
            axes: negotiated.axes,
            margin: negotiated.margin,
            render_x: negotiated.visibility.render_x,
            render_y1: negotiated.visibility.render_y1,
            render_y2: negotiated.visibility.render_y2,
            negotiation: negotiated.status,
            iterations: negotiated.iterations,
            ignored_layers: outcome
                .map(|outcome| outcome.ignored_layers)
                .unwrap_or_default(),
        })
    }

    fn merge_outcome(
        &self,
        layers: &[&dyn CartesianLayer],
        config: &CartesianAxesConfig,
    ) -> AxesResult<Option<ValueAxisMergeOutcome>> {
        if layers.len() < 2 || config.skip_value_axis_merge() {
            return Ok(None);
        }
        let contributions: Vec<ValueDomainContribution> = layers
            .iter()
            .map(|layer| ValueDomainContribution {
                domain: layer.y_domain(),
                tick_candidate_count: layer.y_tick_candidates().len(),
            })
            .collect();
        let outcome = merge_value_domains(&contributions, config.force_value_axis_merge())?;
        if let Some(outcome) = &outcome {
            debug!(
                merged = outcome.is_merged(),
                tick_count_hint = outcome.primary.tick_count_hint,
                primary_min = outcome.primary.domain.min,
                primary_max = outcome.primary.domain.max,
                force_start_to_zero = outcome.force_start_to_zero,
                "value axes merge decision"
            );
        }
        Ok(outcome)
    }
}

/// Category extent spanning every scalar layer, so that all of them draw
/// against one x scale. `None` with fewer than two scalar layers.
fn shared_category_domain(layers: &[&dyn CartesianLayer]) -> AxesResult<Option<Domain>> {
    let domains: Vec<Domain> = layers
        .iter()
        .filter(|layer| layer.is_scalar())
        .filter_map(|layer| layer.x_domain())
        .collect();
    if domains.len() < 2 {
        return Ok(None);
    }
    Domain::max_extents(&domains).map(Some)
}
