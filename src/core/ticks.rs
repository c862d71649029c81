use crate::core::Domain;

const LOG_EPSILON: f64 = 1e-9;

/// Tick count the x axis aims for given its pixel width.
#[must_use]
pub fn recommended_tick_count_for_x_axis(available_width: f64) -> usize {
    if !available_width.is_finite() || available_width <= 0.0 {
        return 0;
    }
    if available_width < 300.0 {
        3
    } else if available_width < 500.0 {
        5
    } else {
        8
    }
}

/// Tick count the y axis aims for given its pixel height.
#[must_use]
pub fn recommended_tick_count_for_y_axis(available_height: f64) -> usize {
    if !available_height.is_finite() || available_height <= 0.0 {
        return 0;
    }
    if available_height < 150.0 {
        3
    } else if available_height < 300.0 {
        5
    } else {
        8
    }
}

/// Rounds a raw step to 1, 2, 5 or 10 times a power of ten.
#[must_use]
pub fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

/// Widens a degenerate domain so a scale can be built over it.
#[must_use]
pub fn widen_degenerate(domain: Domain) -> Domain {
    if domain.range() != 0.0 {
        return domain;
    }
    if domain.min == 0.0 {
        return Domain::new(0.0, 1.0);
    }
    let pad = domain.min.abs() * 0.5;
    Domain::new(domain.min - pad, domain.max + pad)
}

/// Extends `domain` outwards to multiples of the nice step for `count` ticks.
#[must_use]
pub fn nice_domain(domain: Domain, count: usize) -> Domain {
    let domain = widen_degenerate(domain);
    let step = nice_step(domain.range() / count.max(1) as f64);
    if step == 0.0 {
        return domain;
    }
    Domain::new(
        (domain.min / step).floor() * step,
        (domain.max / step).ceil() * step,
    )
}

/// Evenly stepped "nice" tick values covering `domain`, roughly `count` of them.
///
/// Only ticks inside the domain are returned.
#[must_use]
pub fn nice_ticks(domain: Domain, count: usize) -> Vec<f64> {
    if count == 0 || !domain.is_finite() {
        return Vec::new();
    }
    if domain.range() <= 0.0 {
        return vec![domain.min];
    }
    let step = nice_step(domain.range() / count as f64);
    if step == 0.0 {
        return vec![domain.min, domain.max];
    }

    let start = (domain.min / step).ceil();
    let stop = (domain.max / step).floor();
    let n = (stop - start).round().clamp(0.0, 10_000.0) as u64;
    (0..=n)
        .map(|i| snap_to_step((start + i as f64) * step, step))
        .collect()
}

/// Powers of ten inside a strictly positive domain.
#[must_use]
pub fn log_ticks(domain: Domain) -> Vec<f64> {
    if domain.min <= 0.0 || domain.max <= 0.0 || !domain.is_finite() {
        return Vec::new();
    }
    let start = (domain.min.log10() - LOG_EPSILON).ceil() as i32;
    let stop = (domain.max.log10() + LOG_EPSILON).floor() as i32;
    if stop < start {
        return vec![domain.min, domain.max];
    }
    (start..=stop).map(|power| 10_f64.powi(power)).collect()
}

/// Removes floating-point noise such as `0.30000000000000004`.
fn snap_to_step(value: f64, step: f64) -> f64 {
    let decimals = (-step.log10().floor()).max(0.0) as i32;
    let factor = 10_f64.powi(decimals);
    let snapped = (value * factor).round() / factor;
    if snapped == 0.0 { 0.0 } else { snapped }
}
