//! Result tabs and the per-tab view data they render.

use hs_core::SimulationResult;

use crate::compose::{HospitalRow, compose_rows};
use crate::geometry::PlotScene;
use crate::series::{InertiaChart, LoadBalance, LoadBar, load_balance, load_bars};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewTab {
    #[default]
    Plot,
    Analytics,
    Detail,
}

impl ViewTab {
    pub const ALL: [ViewTab; 3] = [ViewTab::Plot, ViewTab::Analytics, ViewTab::Detail];

    pub fn label(self) -> &'static str {
        match self {
            ViewTab::Plot => "Plot",
            ViewTab::Analytics => "Analytics",
            ViewTab::Detail => "Detail",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "plot" => Some(ViewTab::Plot),
            "analytics" => Some(ViewTab::Analytics),
            "detail" => Some(ViewTab::Detail),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    pub label: &'static str,
    pub value: String,
}

/// Convergence and load-balance data for the analytics tab.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsView {
    pub inertia: InertiaChart,
    pub load_bars: Vec<LoadBar>,
    /// Computed over every hospital, including those without a summary.
    pub balance: Option<LoadBalance>,
    pub metrics: Vec<MetricRow>,
}

impl AnalyticsView {
    pub fn build(result: &SimulationResult) -> Self {
        let counts: Vec<u32> = compose_rows(&result.hospitals, &result.summaries)
            .iter()
            .map(|row| row.vecindarios_asignados)
            .collect();

        let m = &result.metrics;
        let mut metrics = vec![
            MetricRow {
                label: "Average distance",
                value: format!("{:.2}", m.avg_distance),
            },
            MetricRow {
                label: "Max distance",
                value: format!("{:.2}", m.max_distance),
            },
            MetricRow {
                label: "Inertia",
                value: format!("{:.2}", m.inertia),
            },
            MetricRow {
                label: "Iterations",
                value: m.iterations.to_string(),
            },
        ];
        if let Some(message) = &result.mensaje {
            metrics.push(MetricRow {
                label: "Solver message",
                value: message.clone(),
            });
        }

        Self {
            inertia: InertiaChart::build(m.history()),
            load_bars: load_bars(&result.summaries),
            balance: load_balance(&counts),
            metrics,
        }
    }
}

/// Closed set of result renderers, selected by the active tab.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultView {
    Plot(PlotScene),
    Analytics(AnalyticsView),
    Detail(Vec<HospitalRow>),
}

impl ResultView {
    pub fn for_tab(tab: ViewTab, result: &SimulationResult) -> Self {
        match tab {
            ViewTab::Plot => ResultView::Plot(PlotScene::build(result)),
            ViewTab::Analytics => ResultView::Analytics(AnalyticsView::build(result)),
            ViewTab::Detail => {
                ResultView::Detail(compose_rows(&result.hospitals, &result.summaries))
            }
        }
    }

    pub fn tab(&self) -> ViewTab {
        match self {
            ResultView::Plot(_) => ViewTab::Plot,
            ResultView::Analytics(_) => ViewTab::Analytics,
            ResultView::Detail(_) => ViewTab::Detail,
        }
    }
}
