//! Projects the chart series into viewbox coordinates for the UI `Path`.
use crate::app::state::format_hms_local;
use crate::series::SeriesPoint;
use std::fmt::Write;

/// Side of the square viewbox the path commands are expressed in.
pub const VIEWBOX: f64 = 1000.0;

const PRICE_STEPS: usize = 5;
const TIME_STEPS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    /// 0..1 along the axis (top-to-bottom for price, left-to-right for time)
    pub pos: f32,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartView {
    /// SVG-style `M x y L x y ...` commands; empty when there is nothing to draw.
    pub commands: String,
    pub price_ticks: Vec<AxisTick>,
    pub time_ticks: Vec<AxisTick>,
}

impl ChartView {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

pub fn build_chart_view(points: &[SeriesPoint]) -> ChartView {
    if points.is_empty() {
        return ChartView::default();
    }
    let (lo, hi) = price_range(points);
    let span = (hi - lo).max(1e-9);

    let t0 = points[0].t;
    let t1 = points[points.len() - 1].t;
    let t_span = (t1 - t0) as f64;

    let x = |t: i64| -> f64 {
        if t_span <= 0.0 {
            VIEWBOX / 2.0
        } else {
            (t - t0) as f64 / t_span * VIEWBOX
        }
    };
    let y = |price: f64| -> f64 { ((hi - price) / span).clamp(0.0, 1.0) * VIEWBOX };

    let mut commands = String::with_capacity(points.len() * 16);
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(commands, "{cmd} {:.1} {:.1} ", x(p.t), y(p.price));
    }
    if points.len() == 1 {
        // a lone point still needs a visible stroke
        let _ = write!(commands, "L {:.1} {:.1}", x(t0) + 1.0, y(points[0].price));
    }

    ChartView {
        commands: commands.trim_end().to_string(),
        price_ticks: price_ticks(lo, hi),
        time_ticks: time_ticks(t0, t1),
    }
}

/// Min/max with 2% padding; a flat series gets a band around its value.
fn price_range(points: &[SeriesPoint]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for p in points {
        lo = lo.min(p.price);
        hi = hi.max(p.price);
    }
    let mut span = hi - lo;
    if !span.is_finite() || span <= 0.0 {
        span = (hi.abs() * 0.01).max(1.0);
        lo = hi - span / 2.0;
        hi += span / 2.0;
    }
    let pad = span * 0.02;
    (lo - pad, hi + pad)
}

fn price_ticks(lo: f64, hi: f64) -> Vec<AxisTick> {
    let span = hi - lo;
    let decimals = if span >= 100.0 {
        0
    } else if span >= 1.0 {
        2
    } else {
        4
    };
    (0..PRICE_STEPS)
        .map(|i| {
            let frac = i as f64 / (PRICE_STEPS - 1) as f64;
            let price = hi - frac * span;
            AxisTick {
                pos: frac as f32,
                label: format!("{price:.decimals$}"),
            }
        })
        .collect()
}

fn time_ticks(t0: i64, t1: i64) -> Vec<AxisTick> {
    if t1 <= t0 {
        return vec![AxisTick {
            pos: 0.5,
            label: format_hms_local(t0),
        }];
    }
    (0..TIME_STEPS)
        .map(|i| {
            let frac = i as f64 / (TIME_STEPS - 1) as f64;
            let t = t0 + ((t1 - t0) as f64 * frac).round() as i64;
            AxisTick {
                pos: frac as f32,
                label: format_hms_local(t),
            }
        })
        .collect()
}
