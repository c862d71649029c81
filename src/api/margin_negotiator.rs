use serde::Serialize;
use tracing::{debug, trace};

use crate::core::{Margin, Viewport};
use crate::error::AxesResult;

use super::axis_config::CartesianAxesConfig;
use super::axis_properties::CartesianAxisProperties;
use super::axis_title::{attach_unit_suffixes, clear_axis_titles};
use super::label_layout::LabelRotation;
use super::negotiation_tuning::{
    AXIS_PADDING, INITIAL_MARGIN, NegotiationTuning, TOP_MARGIN, X_AXIS_LABEL_PADDING,
    Y_AXIS_LABEL_PADDING,
};
use super::text_measurement::TextMeasurer;
use super::tick_label_margins::{TickLabelMarginRequest, resolve_tick_label_margins};

/// Recomputes the axes for a candidate margin.
///
/// `existing` carries the previous round's axes; resolvers copy label fit
/// decisions from it.
pub trait AxesResolver {
    fn resolve_axes(
        &self,
        margin: Margin,
        existing: Option<&CartesianAxisProperties>,
    ) -> AxesResult<CartesianAxisProperties>;
}

impl<F> AxesResolver for F
where
    F: Fn(Margin, Option<&CartesianAxisProperties>) -> AxesResult<CartesianAxisProperties>,
{
    fn resolve_axes(
        &self,
        margin: Margin,
        existing: Option<&CartesianAxisProperties>,
    ) -> AxesResult<CartesianAxisProperties> {
        self(margin, existing)
    }
}

/// How the negotiation loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NegotiationStatus {
    /// Tick counts were stable across the last round.
    Converged,
    /// The iteration cap was reached first; the last margin is used anyway.
    Exhausted,
}

/// Which axes are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AxisVisibility {
    pub render_x: bool,
    pub render_y1: bool,
    pub render_y2: bool,
}

impl AxisVisibility {
    /// An axis renders when it is switched on and has at least one tick.
    #[must_use]
    pub fn resolve(config: &CartesianAxesConfig, axes: &CartesianAxisProperties) -> Self {
        Self {
            render_x: config.category_axis.show && axes.x.has_ticks(),
            render_y1: config.value_axis.show && axes.y1.has_ticks(),
            render_y2: config.secondary_value_axis.show
                && axes.y2.as_ref().is_some_and(|y2| y2.has_ticks()),
        }
    }
}

/// Snapshot of the negotiation after a round.
#[derive(Debug, Clone, PartialEq)]
pub struct NegotiationState {
    pub axes: CartesianAxisProperties,
    pub margin: Margin,
    pub iterations: usize,
    pub status: Option<NegotiationStatus>,
}

/// Final result of [`MarginNegotiator::negotiate`].
#[derive(Debug, Clone, PartialEq)]
pub struct NegotiatedAxes {
    /// Axes resolved against `margin`, titles decorated.
    pub axes: CartesianAxisProperties,
    pub margin: Margin,
    pub visibility: AxisVisibility,
    pub status: NegotiationStatus,
    pub iterations: usize,
}

/// Bounded fixed-point search for margins that fit the tick labels.
pub struct MarginNegotiator<'a> {
    pub viewport: Viewport,
    pub config: &'a CartesianAxesConfig,
    pub tuning: &'a NegotiationTuning,
    pub measurer: &'a dyn TextMeasurer,
}

impl MarginNegotiator<'_> {
    /// Resolves axes against the initial margin, then refines the margin
    /// until the value-axis tick counts stop changing or the iteration cap
    /// is reached.
    ///
    /// Resolver errors are returned unchanged.
    pub fn negotiate(&self, resolver: &dyn AxesResolver) -> AxesResult<NegotiatedAxes> {
        self.viewport.validate()?;

        let mut state = NegotiationState {
            axes: resolver.resolve_axes(INITIAL_MARGIN, None)?,
            margin: INITIAL_MARGIN,
            iterations: 0,
            status: None,
        };
        while state.status.is_none() {
            state = self.step(state, resolver)?;
        }

        let status = state.status.unwrap_or(NegotiationStatus::Exhausted);
        debug!(
            ?status,
            iterations = state.iterations,
            left = state.margin.left,
            right = state.margin.right,
            bottom = state.margin.bottom,
            "margin negotiation finished"
        );

        let visibility = AxisVisibility::resolve(self.config, &state.axes);
        let mut axes = state.axes;
        self.decorate_titles(&mut axes);
        Ok(NegotiatedAxes {
            axes,
            margin: state.margin,
            visibility,
            status,
            iterations: state.iterations,
        })
    }

    /// One negotiation round: margin from the current axes, then new axes.
    pub fn step(
        &self,
        state: NegotiationState,
        resolver: &dyn AxesResolver,
    ) -> AxesResult<NegotiationState> {
        let iterations = state.iterations + 1;
        let margin = self.margin_for(&state.axes);
        trace!(
            iteration = iterations,
            top = margin.top,
            left = margin.left,
            right = margin.right,
            bottom = margin.bottom,
            "margin negotiation round"
        );

        let axes = resolver.resolve_axes(margin, Some(&state.axes))?;
        let stable = axes.y1_tick_count() == state.axes.y1_tick_count()
            && axes.y2_tick_count() == state.axes.y2_tick_count();
        let status = if stable {
            Some(NegotiationStatus::Converged)
        } else if iterations >= self.tuning.max_iterations {
            Some(NegotiationStatus::Exhausted)
        } else {
            None
        };

        Ok(NegotiationState {
            axes,
            margin,
            iterations,
            status,
        })
    }

    /// Margin needed by the labels and titles of `axes`.
    #[must_use]
    pub fn margin_for(&self, axes: &CartesianAxisProperties) -> Margin {
        let visibility = AxisVisibility::resolve(self.config, axes);
        let on_right = self.config.show_value_axis_on_right();

        let mut decorated = axes.clone();
        self.decorate_titles(&mut decorated);

        let tick_margins = resolve_tick_label_margins(&TickLabelMarginRequest {
            viewport: self.viewport,
            limits: self.tuning.margin_limits(self.viewport),
            axes: &decorated,
            render_x: visibility.render_x,
            render_y1: visibility.render_y1,
            render_y2: visibility.render_y2,
            show_y1_on_right: on_right,
            rotation: LabelRotation::default(),
            font: &self.tuning.font,
            measurer: self.measurer,
        });

        let (mut main_side, mut second_side) = if on_right {
            (tick_margins.y_right, tick_margins.y_left)
        } else {
            (tick_margins.y_left, tick_margins.y_right)
        };
        let mut bottom = tick_margins.x_max;

        main_side += AXIS_PADDING.left;
        if (visibility.render_y2 && !on_right) || (on_right && visibility.render_y1) {
            second_side += AXIS_PADDING.right;
        }
        bottom += AXIS_PADDING.bottom;

        if visibility.render_x && decorated.x.axis_label.is_some() {
            bottom += X_AXIS_LABEL_PADDING;
        }
        if visibility.render_y1 && decorated.y1.axis_label.is_some() {
            main_side += Y_AXIS_LABEL_PADDING;
        }
        if visibility.render_y2
            && decorated
                .y2
                .as_ref()
                .is_some_and(|y2| y2.axis_label.is_some())
        {
            second_side += Y_AXIS_LABEL_PADDING;
        }

        let (left, right) = if on_right {
            (second_side, main_side)
        } else {
            (main_side, second_side)
        };
        Margin::new(TOP_MARGIN, left, right, bottom)
    }

    fn decorate_titles(&self, axes: &mut CartesianAxisProperties) {
        if self.tuning.hides_axis_titles(self.viewport) {
            clear_axis_titles(axes);
        }
        attach_unit_suffixes(axes, self.config.secondary_title_style);
    }
}
