// Chart plan - renderer-neutral description of what to draw
use super::error::ChartError;
use super::scale::{axis_upper_bound, format_tick, tick_values, TickScale};
use super::series::{MonthlySeries, WeeklySeries};
use super::smoothing::smooth;

/// Background gradient stops, left to right.
pub const GRADIENT_STOPS: [(u8, u8, u8); 3] = [(0xb0, 0x83, 0xff), (0x64, 0x0d, 0xfb), (0x5d, 0x00, 0xff)];

pub const BAR_WIDTH: f64 = 0.4;
pub const BAR_CORNER_RADIUS: f64 = 0.15;
pub const BAR_ALPHA: f64 = 0.6;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub center: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Encoding {
    SmoothLine {
        curve: Vec<(f64, f64)>,
        markers: Vec<(f64, f64)>,
    },
    RoundedBars {
        bars: Vec<Bar>,
        width: f64,
        corner_radius: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPlan {
    pub title: String,
    pub x_range: (f64, f64),
    /// `(position, label)` for each category on the x axis.
    pub categories: Vec<(f64, String)>,
    pub y_upper: f64,
    pub tick_interval: f64,
    /// `(value, label)` for each y tick.
    pub y_ticks: Vec<(f64, String)>,
    pub y_axis_on_right: bool,
    pub encoding: Encoding,
}

impl ChartPlan {
    /// Line through a cubic spline of the monthly counts, with the raw counts as markers.
    pub fn monthly(series: &MonthlySeries, smooth_points: usize) -> Result<Self, ChartError> {
        let max = series.max();
        let tick_interval = TickScale::for_kind(series.kind()).tick_interval(max);
        let y_upper = axis_upper_bound(series.kind(), max, tick_interval);

        let months: Vec<f64> = (1..=series.values().len()).map(|m| m as f64).collect();
        let (xs, ys) = smooth(&months, series.values(), smooth_points)?;

        let categories = series
            .labelled()
            .enumerate()
            .map(|(i, (label, _))| ((i + 1) as f64, label.to_string()))
            .collect();

        let y_ticks = tick_values(y_upper, tick_interval)
            .into_iter()
            .map(|v| (v, format_tick(v)))
            .collect();

        Ok(Self {
            title: "Books read per month".to_string(),
            x_range: (1.0, months.len() as f64),
            categories,
            y_upper,
            tick_interval,
            y_ticks,
            y_axis_on_right: true,
            encoding: Encoding::SmoothLine {
                curve: xs.into_iter().zip(ys).collect(),
                markers: months.into_iter().zip(series.values().iter().copied()).collect(),
            },
        })
    }

    /// One rounded bar per day.
    pub fn weekly(series: &WeeklySeries) -> Self {
        let max = series.max();
        let tick_interval = TickScale::for_kind(series.kind()).tick_interval(max);
        let y_upper = axis_upper_bound(series.kind(), max, tick_interval);

        let mut categories = Vec::new();
        let mut bars = Vec::new();
        for (i, (label, hours)) in series.labelled().enumerate() {
            categories.push((i as f64, label.to_string()));
            bars.push(Bar {
                center: i as f64,
                height: hours,
            });
        }

        let y_ticks = tick_values(y_upper, tick_interval)
            .into_iter()
            .map(|v| (v, format!("{} hr", format_tick(v))))
            .collect();

        Self {
            title: "Hours read per day".to_string(),
            x_range: (-0.5, bars.len() as f64 - 0.5),
            categories,
            y_upper,
            tick_interval,
            y_ticks,
            y_axis_on_right: false,
            encoding: Encoding::RoundedBars {
                bars,
                width: BAR_WIDTH,
                corner_radius: BAR_CORNER_RADIUS,
            },
        }
    }
}

/// Colour of the gradient at `t` in `[0, 1]`.
pub fn gradient_at(t: f64) -> (u8, u8, u8) {
    let t = t.clamp(0.0, 1.0);
    let segments = (GRADIENT_STOPS.len() - 1) as f64;
    let scaled = t * segments;
    let idx = (scaled.floor() as usize).min(GRADIENT_STOPS.len() - 2);
    let local = scaled - idx as f64;

    let (a, b) = (GRADIENT_STOPS[idx], GRADIENT_STOPS[idx + 1]);
    let mix = |from: u8, to: u8| (from as f64 + (to as f64 - from as f64) * local).round() as u8;
    (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}
