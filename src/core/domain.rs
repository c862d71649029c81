use serde::{Deserialize, Serialize};

use crate::error::{AxesError, AxesResult};

/// Closed numeric interval used as an axis data range.
///
/// A domain may be degenerate (`min == max`). Callers keep `min <= max`;
/// construction stores both ends verbatim and never reorders them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

/// Explicit start/end override supplied by the user for one axis.
///
/// `None` on either side keeps the computed value for that side.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ForcedDomain {
    pub start: Option<f64>,
    pub end: Option<f64>,
}

impl ForcedDomain {
    #[must_use]
    pub fn new(start: Option<f64>, end: Option<f64>) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Overlays `self` on an optional computed domain.
    ///
    /// Returns `None` only when neither side is known.
    #[must_use]
    pub fn apply_to(self, computed: Option<Domain>) -> Option<Domain> {
        match computed {
            Some(domain) => Some(domain.apply_forced(self)),
            None => match (self.start, self.end) {
                (Some(start), Some(end)) => Some(Domain::new(start, end)),
                _ => None,
            },
        }
    }

    /// Keeps explicit values from `self` and fills the gaps from `fallback`.
    #[must_use]
    pub fn or(self, fallback: ForcedDomain) -> Self {
        Self {
            start: self.start.or(fallback.start),
            end: self.end.or(fallback.end),
        }
    }
}

impl From<Domain> for ForcedDomain {
    fn from(domain: Domain) -> Self {
        Self::new(Some(domain.min), Some(domain.max))
    }
}

impl Domain {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Domain spanning `count` ordinal slots.
    #[must_use]
    pub fn ordinal(count: usize) -> Self {
        Self::new(0.0, count as f64)
    }

    /// Smallest domain enclosing every finite value, `None` when there is none.
    #[must_use]
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut finite = values.iter().copied().filter(|value| value.is_finite());
        let first = finite.next()?;
        let (min, max) = finite.fold((first, first), |(min, max), value| {
            (min.min(value), max.max(value))
        });
        Some(Self::new(min, max))
    }

    #[must_use]
    pub fn from_array(min_max: [f64; 2]) -> Self {
        Self::new(min_max[0], min_max[1])
    }

    #[must_use]
    pub fn to_array(self) -> [f64; 2] {
        [self.min, self.max]
    }

    /// Signed span `max - min`; callers guard before dividing by it.
    #[must_use]
    pub fn range(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn is_non_negative(self) -> bool {
        self.min >= 0.0
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Overlap of two domains; `None` when they share no positive-length range.
    #[must_use]
    pub fn intersect(self, other: Domain) -> Option<Domain> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        (max > min).then(|| Domain::new(min, max))
    }

    /// Replaces each side with the user's explicit value when present.
    #[must_use]
    pub fn apply_forced(self, forced: ForcedDomain) -> Domain {
        Domain::new(
            forced.start.unwrap_or(self.min),
            forced.end.unwrap_or(self.max),
        )
    }

    /// Widest enclosing interval of all `domains`.
    pub fn max_extents(domains: &[Domain]) -> AxesResult<Domain> {
        let (first, rest) = domains.split_first().ok_or_else(|| {
            AxesError::InvalidArgument("max extents requires at least one domain".to_owned())
        })?;
        Ok(rest.iter().fold(*first, |acc, domain| {
            Domain::new(acc.min.min(domain.min), acc.max.max(domain.max))
        }))
    }

    /// Left fold of [`Domain::intersect`] over `domains`.
    ///
    /// Returns `Ok(None)` as soon as any pairwise intersection is absent.
    pub fn intersect_all(domains: &[Domain]) -> AxesResult<Option<Domain>> {
        let (first, rest) = domains.split_first().ok_or_else(|| {
            AxesError::InvalidArgument("intersect requires at least one domain".to_owned())
        })?;
        let mut intersection = *first;
        for domain in rest {
            match intersection.intersect(*domain) {
                Some(next) => intersection = next,
                None => return Ok(None),
            }
        }
        Ok(Some(intersection))
    }
}
