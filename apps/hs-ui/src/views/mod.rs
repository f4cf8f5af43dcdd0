pub mod analytics_view;
pub mod detail_view;
pub mod plot_view;

pub use analytics_view::AnalyticsView;
pub use detail_view::DetailView;
pub use plot_view::PlotView;

use hs_present::Rgb;

pub(crate) fn color32(rgb: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}
