use serde::Serialize;
use tracing::{debug, warn};

use crate::core::Domain;
use crate::error::AxesResult;

/// Two value domains share one axis only when their overlap covers at least
/// this share of the combined range.
pub const MIN_OVERLAP_PCT_TO_MERGE_VALUE_AXES: f64 = 0.1;

/// Outcome of testing one value domain against the running primary axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MergedAxisResult {
    pub domain: Domain,
    pub merged: bool,
    pub tick_count_hint: usize,
}

/// Value-axis domain reported by one layer, in layer order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValueDomainContribution {
    pub domain: Option<Domain>,
    pub tick_candidate_count: usize,
}

/// The layer whose value domain could not join the primary axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SecondaryValueAxis {
    pub layer_index: usize,
    pub domain: Domain,
}

/// Result of merging every layer's value domain in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueAxisMergeOutcome {
    /// Running primary axis after all merges.
    pub primary: MergedAxisResult,
    /// Index of the layer that seeded the primary axis.
    pub primary_layer_index: usize,
    pub secondary: Option<SecondaryValueAxis>,
    /// Layers that failed to merge after the secondary axis was already taken.
    pub ignored_layers: Vec<usize>,
    /// Merge failed and every value domain is non-negative.
    pub force_start_to_zero: bool,
}

impl ValueAxisMergeOutcome {
    /// Whether every contributing layer shares the primary axis.
    #[must_use]
    pub fn is_merged(&self) -> bool {
        self.secondary.is_none()
    }
}

/// Decides whether `new` can share a scale with `existing`.
///
/// A forced merge always succeeds. Otherwise a zero combined range, no
/// intersection, or an overlap below [`MIN_OVERLAP_PCT_TO_MERGE_VALUE_AXES`]
/// keeps `existing` unmerged.
pub fn try_merge(existing: Domain, new: Domain, force_merge: bool) -> AxesResult<MergedAxisResult> {
    let merged_domain = Domain::max_extents(&[existing, new])?;
    let merged = MergedAxisResult {
        domain: merged_domain,
        merged: true,
        tick_count_hint: 0,
    };
    if force_merge {
        return Ok(merged);
    }

    let refused = MergedAxisResult {
        domain: existing,
        merged: false,
        tick_count_hint: 0,
    };
    let range = merged_domain.range();
    if range == 0.0 {
        return Ok(refused);
    }
    let Some(intersection) = existing.intersect(new) else {
        return Ok(refused);
    };
    let overlap_pct = intersection.range() / range;
    if overlap_pct < MIN_OVERLAP_PCT_TO_MERGE_VALUE_AXES {
        return Ok(refused);
    }
    Ok(merged)
}

/// Merges value domains incrementally in layer order.
///
/// The first layer with a domain seeds the primary axis and every later
/// domain is tested against the running primary. The first layer that fails
/// becomes the secondary axis; later failures are reported in
/// `ignored_layers` since only two value axes exist. Returns `None` when no
/// layer has a value domain.
pub fn merge_value_domains(
    contributions: &[ValueDomainContribution],
    force_merge: bool,
) -> AxesResult<Option<ValueAxisMergeOutcome>> {
    let tick_count_hint = contributions
        .iter()
        .map(|contribution| contribution.tick_candidate_count)
        .max()
        .unwrap_or(0);

    let mut outcome: Option<ValueAxisMergeOutcome> = None;
    for (layer_index, contribution) in contributions.iter().enumerate() {
        let Some(domain) = contribution.domain else {
            continue;
        };
        if outcome.is_none() {
            outcome = Some(ValueAxisMergeOutcome {
                primary: MergedAxisResult {
                    domain,
                    merged: false,
                    tick_count_hint,
                },
                primary_layer_index: layer_index,
                secondary: None,
                ignored_layers: Vec::new(),
                force_start_to_zero: false,
            });
            continue;
        }
        let Some(state) = outcome.as_mut() else {
            continue;
        };

        let attempt = try_merge(state.primary.domain, domain, force_merge)?;
        debug!(
            layer_index,
            merged = attempt.merged,
            min = attempt.domain.min,
            max = attempt.domain.max,
            "value axis merge attempt"
        );
        if attempt.merged {
            state.primary = MergedAxisResult {
                tick_count_hint,
                ..attempt
            };
        } else if state.secondary.is_none() {
            state.secondary = Some(SecondaryValueAxis {
                layer_index,
                domain,
            });
        } else {
            warn!(
                layer_index,
                "only two value axes are supported, layer is left out of the axes"
            );
            state.ignored_layers.push(layer_index);
        }
    }

    if let Some(state) = outcome.as_mut() {
        state.force_start_to_zero = state.secondary.is_some()
            && contributions
                .iter()
                .filter_map(|contribution| contribution.domain)
                .all(Domain::is_non_negative);
    }
    Ok(outcome)
}
