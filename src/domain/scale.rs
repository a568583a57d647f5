// Axis scaling - tick interval selection and y-axis bounds
use super::series::SeriesKind;

/// Step function from a series maximum to a tick interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickScale {
    /// `(upper_inclusive, interval)` pairs in ascending order.
    steps: &'static [(f64, f64)],
    fallback: f64,
}

pub const MONTHLY_SCALE: TickScale = TickScale {
    steps: &[(10.0, 1.0), (50.0, 5.0), (100.0, 10.0), (500.0, 50.0)],
    fallback: 100.0,
};

pub const WEEKLY_SCALE: TickScale = TickScale {
    steps: &[(5.0, 1.0), (10.0, 2.0), (15.0, 3.0), (20.0, 4.0), (24.0, 5.0)],
    fallback: 8.0,
};

impl TickScale {
    pub fn for_kind(kind: SeriesKind) -> Self {
        match kind {
            SeriesKind::Monthly => MONTHLY_SCALE,
            SeriesKind::Weekly => WEEKLY_SCALE,
        }
    }

    /// `max_value` must be non-negative.
    pub fn tick_interval(&self, max_value: f64) -> f64 {
        debug_assert!(!(max_value < 0.0), "negative series maximum {}", max_value);
        self.steps
            .iter()
            .find(|(upper, _)| max_value <= *upper)
            .map(|(_, interval)| *interval)
            .unwrap_or(self.fallback)
    }
}

pub fn tick_interval_monthly(max_value: f64) -> f64 {
    MONTHLY_SCALE.tick_interval(max_value)
}

pub fn tick_interval_weekly(max_value: f64) -> f64 {
    WEEKLY_SCALE.tick_interval(max_value)
}

/// Top of the y axis: one tick of headroom for months, one hour for days.
pub fn axis_upper_bound(kind: SeriesKind, max_value: f64, tick_interval: f64) -> f64 {
    match kind {
        SeriesKind::Monthly => max_value + tick_interval,
        SeriesKind::Weekly => max_value + 1.0,
    }
}

/// Hard ceiling on generated tick positions.
pub const MAX_Y_TICKS: usize = 1000;

/// Tick positions `0, step, 2*step, ...` strictly below `upper`, at most `MAX_Y_TICKS` of them.
pub fn tick_values(upper: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || !upper.is_finite() {
        return Vec::new();
    }
    let count = ((upper / step).ceil().max(0.0) as usize).min(MAX_Y_TICKS);
    (0..count)
        .map(|i| i as f64 * step)
        .filter(|v| *v < upper)
        .collect()
}

/// Formats a tick without a trailing ".0" for whole numbers.
pub fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
