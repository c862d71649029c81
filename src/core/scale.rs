use serde::{Deserialize, Serialize};

use crate::core::Domain;
use crate::error::{AxesError, AxesResult};

/// Continuous mapping from a numeric domain to a pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: Domain, range: (f64, f64)) -> AxesResult<Self> {
        if !domain.is_finite() || domain.min == domain.max {
            return Err(AxesError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        validate_range(range)?;

        Ok(Self {
            domain_start: domain.min,
            domain_end: domain.max,
            range_start: range.0,
            range_end: range.1,
        })
    }

    #[must_use]
    pub fn domain(self) -> Domain {
        Domain::new(self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let span = self.range_end - self.range_start;
        if span == 0.0 {
            return self.domain_start;
        }
        let normalized = (pixel - self.range_start) / span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }
}

/// Base-10 logarithmic mapping; both domain ends must be strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogScale {
    linear: LinearScale,
    domain_start: f64,
    domain_end: f64,
}

impl LogScale {
    pub fn new(domain: Domain, range: (f64, f64)) -> AxesResult<Self> {
        if !Self::supports(domain) {
            return Err(AxesError::InvalidData(
                "log scale domain must be finite and > 0".to_owned(),
            ));
        }
        let linear = LinearScale::new(
            Domain::new(domain.min.log10(), domain.max.log10()),
            range,
        )?;
        Ok(Self {
            linear,
            domain_start: domain.min,
            domain_end: domain.max,
        })
    }

    /// Whether a log mapping is defined over `domain`.
    #[must_use]
    pub fn supports(domain: Domain) -> bool {
        domain.is_finite() && domain.min > 0.0 && domain.max > 0.0
    }

    #[must_use]
    pub fn domain(self) -> Domain {
        Domain::new(self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.linear.range()
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        if value <= 0.0 {
            return self.linear.range().0;
        }
        self.linear.map(value.log10())
    }
}

/// Discrete mapping of `count` ordinal slots onto equal-width bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    count: usize,
    range_start: f64,
    range_end: f64,
    outer_padding_px: f64,
}

impl BandScale {
    pub fn new(count: usize, range: (f64, f64), outer_padding_px: f64) -> AxesResult<Self> {
        validate_range(range)?;
        if !outer_padding_px.is_finite() || outer_padding_px < 0.0 {
            return Err(AxesError::InvalidData(
                "band outer padding must be finite and >= 0".to_owned(),
            ));
        }
        Ok(Self {
            count,
            range_start: range.0,
            range_end: range.1,
            outer_padding_px,
        })
    }

    #[must_use]
    pub fn count(self) -> usize {
        self.count
    }

    #[must_use]
    pub fn outer_padding_px(self) -> f64 {
        self.outer_padding_px
    }

    /// Width of one band; zero for an empty scale.
    #[must_use]
    pub fn bandwidth(self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let span = (self.range_end - self.range_start).abs() - 2.0 * self.outer_padding_px;
        (span / self.count as f64).max(0.0)
    }

    /// Center of band `index` (fractional indexes are interpolated).
    #[must_use]
    pub fn map(self, index: f64) -> f64 {
        let direction = if self.range_end >= self.range_start {
            1.0
        } else {
            -1.0
        };
        self.range_start
            + direction * (self.outer_padding_px + self.bandwidth() * (index + 0.5))
    }
}

/// The scale an axis uses to place ticks and data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AxisScale {
    Linear(LinearScale),
    Log(LogScale),
    Band(BandScale),
}

impl AxisScale {
    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        match self {
            Self::Linear(scale) => scale.map(value),
            Self::Log(scale) => scale.map(value),
            Self::Band(scale) => scale.map(value),
        }
    }

    /// Data domain of the scale; band scales report `[0, count]`.
    #[must_use]
    pub fn domain(self) -> Domain {
        match self {
            Self::Linear(scale) => scale.domain(),
            Self::Log(scale) => scale.domain(),
            Self::Band(scale) => Domain::ordinal(scale.count()),
        }
    }

    /// Number of domain entries: categories for band scales, two ends otherwise.
    #[must_use]
    pub fn domain_len(self) -> usize {
        match self {
            Self::Band(scale) => scale.count(),
            Self::Linear(_) | Self::Log(_) => 2,
        }
    }

    #[must_use]
    pub fn is_ordinal(self) -> bool {
        matches!(self, Self::Band(_))
    }
}

fn validate_range(range: (f64, f64)) -> AxesResult<()> {
    if !range.0.is_finite() || !range.1.is_finite() {
        return Err(AxesError::InvalidData(
            "scale range must be finite".to_owned(),
        ));
    }
    Ok(())
}
