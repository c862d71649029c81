use tracing::debug;

use crate::core::{Domain, ForcedDomain, Margin, Viewport};
use crate::error::{AxesError, AxesResult};

use super::axis_config::CartesianAxesConfig;
use super::axis_merger::ValueAxisMergeOutcome;
use super::axis_properties::CartesianAxisProperties;
use super::label_layout::{will_labels_fit, will_labels_word_break};
use super::layer::{AxesPropertiesRequest, CartesianLayer};
use super::margin_negotiator::AxesResolver;
use super::negotiation_tuning::MarginLimits;
use super::text_measurement::{FontProperties, TextMeasurer};

/// Which value axis a layer's values are drawn against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerRole {
    Primary,
    Secondary,
    /// Failed to merge after the secondary axis was taken; skipped when the
    /// axes are assembled.
    Ignored,
}

/// Value-axis assignment of every layer for one layout.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerAssignment {
    roles: Vec<LayerRole>,
    merged: bool,
    primary_domain: ForcedDomain,
    force_start_to_zero: bool,
    forced_tick_count: Option<usize>,
    shared_category_domain: ForcedDomain,
}

impl LayerAssignment {
    /// Assigns roles from a merge outcome, or by position when no merge ran.
    ///
    /// Without an outcome the first layer is primary, the second secondary
    /// and any later layer ignored.
    #[must_use]
    pub fn new(layer_count: usize, outcome: Option<&ValueAxisMergeOutcome>) -> Self {
        let Some(outcome) = outcome else {
            let roles = (0..layer_count)
                .map(|index| match index {
                    0 => LayerRole::Primary,
                    1 => LayerRole::Secondary,
                    _ => LayerRole::Ignored,
                })
                .collect();
            return Self {
                roles,
                merged: false,
                primary_domain: ForcedDomain::default(),
                force_start_to_zero: false,
                forced_tick_count: None,
                shared_category_domain: ForcedDomain::default(),
            };
        };

        let roles = (0..layer_count)
            .map(|index| {
                if outcome
                    .secondary
                    .is_some_and(|secondary| secondary.layer_index == index)
                {
                    LayerRole::Secondary
                } else if outcome.ignored_layers.contains(&index) {
                    LayerRole::Ignored
                } else {
                    LayerRole::Primary
                }
            })
            .collect();
        Self {
            roles,
            merged: outcome.is_merged(),
            primary_domain: if outcome.primary.merged {
                ForcedDomain::from(outcome.primary.domain)
            } else {
                ForcedDomain::default()
            },
            force_start_to_zero: outcome.force_start_to_zero,
            forced_tick_count: (!outcome.is_merged() && outcome.primary.tick_count_hint > 0)
                .then_some(outcome.primary.tick_count_hint),
            shared_category_domain: ForcedDomain::default(),
        }
    }

    /// Draws every layer against `domain` on the category axis unless the
    /// user forced that end.
    #[must_use]
    pub fn with_shared_category_domain(mut self, domain: Option<Domain>) -> Self {
        self.shared_category_domain = domain.map(ForcedDomain::from).unwrap_or_default();
        self
    }

    #[must_use]
    pub fn role(&self, layer_index: usize) -> LayerRole {
        self.roles
            .get(layer_index)
            .copied()
            .unwrap_or(LayerRole::Ignored)
    }

    /// Every value domain shares the primary axis.
    #[must_use]
    pub fn is_merged(&self) -> bool {
        self.merged
    }
}

/// Inputs of one axes calculation pass.
#[derive(Clone, Copy)]
pub struct AxesCalculation<'a> {
    pub layers: &'a [&'a dyn CartesianLayer],
    pub assignment: &'a LayerAssignment,
    pub config: &'a CartesianAxesConfig,
    pub viewport: Viewport,
    pub margin: Margin,
    pub limits: MarginLimits,
    pub pin_secondary_start_to_zero: bool,
    pub font: &'a FontProperties,
    pub measurer: &'a dyn TextMeasurer,
}

impl AxesCalculation<'_> {
    /// Resolves every layer against `self.margin` and assembles `{x, y1, y2}`.
    ///
    /// Label fit flags are copied from `existing` when given so that a
    /// negotiation round never flips between rotated and flat labels.
    pub fn calculate(
        &self,
        existing: Option<&CartesianAxisProperties>,
    ) -> AxesResult<CartesianAxisProperties> {
        let mut axes: Option<CartesianAxisProperties> = None;
        for (layer_index, layer) in self.layers.iter().enumerate() {
            let role = self.assignment.role(layer_index);
            if role == LayerRole::Ignored {
                continue;
            }
            let resolved = layer.calculate_axes_properties(&self.request(role))?;

            let current = match axes.as_mut() {
                Some(current) => current,
                None => {
                    axes = Some(CartesianAxisProperties {
                        x: resolved.category,
                        y1: resolved.value,
                        y2: None,
                    });
                    continue;
                }
            };

            if current.y2.is_none()
                && resolved.category.scale.domain_len() > current.x.scale.domain_len()
            {
                debug!(layer_index, "layer with more categories takes over the x axis");
                let replaced = layer.calculate_axes_properties(&self.request(LayerRole::Primary))?;
                current.x = replaced.category;
                current.y1 = replaced.value;
            } else if role == LayerRole::Secondary
                && !self.assignment.is_merged()
                && !resolved.value.using_default_domain
            {
                current.y2 = Some(resolved.value);
            }
        }

        let mut axes = axes.ok_or_else(|| {
            AxesError::InvalidArgument("axes calculation needs at least one layer".to_owned())
        })?;
        self.apply_label_colors(&mut axes);
        self.apply_fit_flags(&mut axes, existing);
        Ok(axes)
    }

    fn request(&self, role: LayerRole) -> AxesPropertiesRequest<'_> {
        let config = self.config;
        let (forced_value_domain, value_scale_type, show_value_axis_label) = match role {
            LayerRole::Primary => (
                config
                    .value_axis
                    .forced_domain
                    .or(self.assignment.primary_domain),
                config.value_axis.scale_type,
                config.value_axis.show_title,
            ),
            LayerRole::Secondary | LayerRole::Ignored => {
                let mut forced = config.secondary_value_axis.forced_domain;
                if self.pin_secondary_start_to_zero
                    && self.assignment.force_start_to_zero
                    && forced.start.is_none()
                {
                    forced.start = Some(0.0);
                }
                (
                    forced,
                    config.secondary_value_axis.scale_type,
                    config.secondary_value_axis.show_title && !self.assignment.is_merged(),
                )
            }
        };

        AxesPropertiesRequest {
            viewport: self.viewport,
            margin: self.margin,
            forced_category_domain: config
                .category_axis
                .forced_domain
                .or(self.assignment.shared_category_domain),
            forced_value_domain,
            forced_tick_count: self.assignment.forced_tick_count,
            force_merge: config.force_value_axis_merge(),
            category_scale_type: config.category_axis.scale_type,
            value_scale_type,
            show_category_axis_label: config.category_axis.show_title,
            show_value_axis_label,
            font: self.font,
            measurer: self.measurer,
        }
    }

    fn apply_label_colors(&self, axes: &mut CartesianAxisProperties) {
        axes.x.label_color = self.config.category_axis.label_color;
        axes.y1.label_color = self.config.value_axis.label_color;
        if let Some(y2) = axes.y2.as_mut() {
            y2.label_color = self.config.secondary_value_axis.label_color;
        }
    }

    fn apply_fit_flags(
        &self,
        axes: &mut CartesianAxisProperties,
        existing: Option<&CartesianAxisProperties>,
    ) {
        if let Some(existing) = existing {
            axes.x.will_labels_fit = existing.x.will_labels_fit;
            axes.x.will_labels_word_break = existing.x.will_labels_word_break;
            return;
        }

        let inner_width = self.margin.inner_width(self.viewport).max(0.0);
        axes.x.will_labels_fit = will_labels_fit(&axes.x, inner_width, self.measurer, self.font);
        axes.x.will_labels_word_break = !axes.x.will_labels_fit
            && will_labels_word_break(&axes.x, self.limits.bottom, self.measurer, self.font);
    }
}

impl AxesResolver for AxesCalculation<'_> {
    fn resolve_axes(
        &self,
        margin: Margin,
        existing: Option<&CartesianAxisProperties>,
    ) -> AxesResult<CartesianAxisProperties> {
        AxesCalculation { margin, ..*self }.calculate(existing)
    }
}
