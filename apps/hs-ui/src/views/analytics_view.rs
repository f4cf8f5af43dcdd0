use egui::{Color32, Pos2, Sense, Shape, Stroke, vec2};
use hs_present::{CHART_EXTENT, cluster_color};

use super::color32;

const CHART_HEIGHT: f32 = 220.0;
const BAR_MAX_WIDTH: f32 = 320.0;

#[derive(Default)]
pub struct AnalyticsView {
    show_points: bool,
}

impl AnalyticsView {
    pub fn show(&mut self, ui: &mut egui::Ui, analytics: &hs_present::AnalyticsView) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.heading("Metrics");
            egui::Grid::new("metrics_grid")
                .num_columns(2)
                .striped(true)
                .show(ui, |ui| {
                    for row in &analytics.metrics {
                        ui.label(row.label);
                        ui.monospace(&row.value);
                        ui.end_row();
                    }
                });

            ui.separator();
            ui.horizontal(|ui| {
                ui.heading("Convergence");
                ui.checkbox(&mut self.show_points, "Show samples");
            });
            self.show_inertia(ui, analytics);

            ui.separator();
            ui.heading("Load per hospital");
            show_load_bars(ui, analytics);
        });
    }

    fn show_inertia(&self, ui: &mut egui::Ui, analytics: &hs_present::AnalyticsView) {
        let chart = &analytics.inertia;
        if chart.is_empty() {
            ui.label("Not enough iterations to chart inertia");
            return;
        }

        let width = ui.available_width().min(640.0);
        let (response, painter) = ui.allocate_painter(vec2(width, CHART_HEIGHT), Sense::hover());
        let rect = response.rect;
        let extent = CHART_EXTENT as f32;
        let points: Vec<Pos2> = chart
            .points
            .iter()
            .map(|p| {
                rect.min
                    + vec2(
                        p.x as f32 / extent * rect.width(),
                        p.y as f32 / extent * rect.height(),
                    )
            })
            .collect();

        painter.rect_stroke(rect, 0.0, Stroke::new(1.0, Color32::GRAY));
        let line_color = color32(cluster_color(0));
        if self.show_points {
            for p in &points {
                painter.circle_filled(*p, 3.0, line_color);
            }
        }
        painter.add(Shape::line(points, Stroke::new(2.0, line_color)));

        if let Some(caption) = &chart.caption {
            ui.horizontal(|ui| {
                ui.label(format!("Start: {}", caption.first));
                ui.separator();
                ui.label(format!("End: {}", caption.last));
            });
        }
    }
}

fn show_load_bars(ui: &mut egui::Ui, analytics: &hs_present::AnalyticsView) {
    if analytics.load_bars.is_empty() {
        ui.label("No hospital summaries in this result");
    }

    for bar in &analytics.load_bars {
        ui.horizontal(|ui| {
            ui.label(format!("Hospital {:<3}", bar.hospital_id));
            let (track, _) = ui.allocate_exact_size(vec2(BAR_MAX_WIDTH, 14.0), Sense::hover());
            ui.painter().rect_filled(track, 2.0, Color32::from_gray(235));
            let mut filled = track;
            filled.set_width(track.width() * bar.fraction as f32);
            ui.painter()
                .rect_filled(filled, 2.0, color32(cluster_color(bar.hospital_id)));
            ui.label(format!("{} ({:.1}%)", bar.count, bar.percent()));
        });
    }

    if let Some(balance) = &analytics.balance {
        ui.add_space(6.0);
        egui::Grid::new("balance_grid").num_columns(2).show(ui, |ui| {
            ui.label("Min / max");
            ui.monospace(format!("{} / {}", balance.min, balance.max));
            ui.end_row();
            ui.label("Mean");
            ui.monospace(format!("{:.2}", balance.mean));
            ui.end_row();
            ui.label("Std dev");
            ui.monospace(format!("{:.2}", balance.std_dev));
            ui.end_row();
            ui.label("Imbalance (max / mean)");
            ui.monospace(format!("{:.2}", balance.imbalance));
            ui.end_row();
        });
    }
}
