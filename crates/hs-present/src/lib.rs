//! Presentation engine for simulation results.
//!
//! Turns a solver payload into chart geometry and table rows, and owns the
//! session state machine (draft, in-flight submissions, stored result,
//! active tab). Nothing in this crate performs I/O.

pub mod compose;
pub mod geometry;
pub mod series;
pub mod session;
pub mod svg;
pub mod view;

pub use compose::{HospitalRow, compose_rows};
pub use geometry::{
    DrawPoint, LegendEntry, Marker, PALETTE, PlotScene, Rgb, cluster_color, from_drawing_space,
    to_drawing_space,
};
pub use series::{
    CHART_EXTENT, HistoryCaption, InertiaChart, LoadBalance, LoadBar, load_balance, load_bars,
    normalize_counts, normalize_history,
};
pub use session::{Action, Effect, Generation, Outcome, Session, SettlePolicy};
pub use view::{AnalyticsView, MetricRow, ResultView, ViewTab};
