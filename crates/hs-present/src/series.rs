//! Normalization of the inertia history and per-hospital loads into chart
//! coordinates.

use hs_core::HospitalSummary;

use crate::geometry::DrawPoint;

/// Side of the square coordinate space the line chart is normalized into.
pub const CHART_EXTENT: f64 = 100.0;

/// Maps `history` into a `CHART_EXTENT` square, larger values drawn higher.
///
/// Fewer than two samples produce an empty series. A flat series sits on the
/// vertical midpoint.
pub fn normalize_history(history: &[f64]) -> Vec<DrawPoint> {
    if history.len() < 2 {
        return Vec::new();
    }

    let lo = history.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = history.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let n = (history.len() - 1).max(1) as f64;

    history
        .iter()
        .enumerate()
        .map(|(i, &h)| {
            let x = (i as f64 / n) * CHART_EXTENT;
            let y = if hi == lo {
                CHART_EXTENT / 2.0
            } else {
                CHART_EXTENT - ((h - lo) / (hi - lo)) * CHART_EXTENT
            };
            DrawPoint::new(x, y)
        })
        .collect()
}

/// First and last raw history values, rounded to whole numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryCaption {
    pub first: String,
    pub last: String,
}

impl HistoryCaption {
    pub fn from_history(history: &[f64]) -> Option<Self> {
        if history.len() < 2 {
            return None;
        }
        let first = history.first()?;
        let last = history.last()?;
        Some(Self {
            first: format!("{:.0}", first.round()),
            last: format!("{:.0}", last.round()),
        })
    }
}

/// Line chart of inertia per iteration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InertiaChart {
    pub points: Vec<DrawPoint>,
    pub caption: Option<HistoryCaption>,
}

impl InertiaChart {
    pub fn build(history: &[f64]) -> Self {
        Self {
            points: normalize_history(history),
            caption: HistoryCaption::from_history(history),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Width fraction of each count relative to the largest, floored at 1 so an
/// all-zero input yields zero-width bars.
pub fn normalize_counts(counts: &[u32]) -> Vec<f64> {
    let max_count = counts.iter().copied().max().unwrap_or(0).max(1);
    counts
        .iter()
        .map(|&c| f64::from(c) / f64::from(max_count))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadBar {
    pub hospital_id: usize,
    pub count: u32,
    pub fraction: f64,
}

impl LoadBar {
    pub fn percent(&self) -> f64 {
        self.fraction * 100.0
    }
}

/// One bar per summary, in summary order.
pub fn load_bars(summaries: &[HospitalSummary]) -> Vec<LoadBar> {
    let counts: Vec<u32> = summaries.iter().map(|s| s.vecindarios_asignados).collect();
    summaries
        .iter()
        .zip(normalize_counts(&counts))
        .map(|(s, fraction)| LoadBar {
            hospital_id: s.hospital_id,
            count: s.vecindarios_asignados,
            fraction,
        })
        .collect()
}

/// Spread of assigned neighborhoods across hospitals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadBalance {
    pub min: u32,
    pub max: u32,
    pub mean: f64,
    pub std_dev: f64,
    /// `max / mean`; 1.0 means perfectly even.
    pub imbalance: f64,
}

pub fn load_balance(counts: &[u32]) -> Option<LoadBalance> {
    let min = counts.iter().copied().min()?;
    let max = counts.iter().copied().max()?;
    let len = counts.len() as f64;
    let mean = counts.iter().map(|&c| f64::from(c)).sum::<f64>() / len;
    let variance = counts
        .iter()
        .map(|&c| (f64::from(c) - mean).powi(2))
        .sum::<f64>()
        / len;
    let imbalance = if mean > 0.0 {
        f64::from(max) / mean
    } else {
        1.0
    };

    Some(LoadBalance {
        min,
        max,
        mean,
        std_dev: variance.sqrt(),
        imbalance,
    })
}
