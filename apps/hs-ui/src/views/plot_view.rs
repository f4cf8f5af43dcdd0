use egui::{Color32, Pos2, Rect, Sense, Stroke, vec2};
use hs_present::{DrawPoint, Marker, PALETTE, PlotScene};

use super::color32;

const LEGEND_WIDTH: f32 = 190.0;
const HOVER_RADIUS_PX: f32 = 8.0;

pub struct PlotView {
    show_neighborhoods: bool,
    point_radius: f32,
}

impl Default for PlotView {
    fn default() -> Self {
        Self {
            show_neighborhoods: true,
            point_radius: 2.5,
        }
    }
}

impl PlotView {
    pub fn show(&mut self, ui: &mut egui::Ui, scene: &PlotScene) {
        ui.horizontal(|ui| {
            ui.checkbox(&mut self.show_neighborhoods, "Neighborhoods");
            ui.add(egui::Slider::new(&mut self.point_radius, 1.0..=6.0).text("Point size"));
        });
        ui.separator();

        if scene.side <= 0.0 {
            ui.label("Result has an empty grid");
            return;
        }

        ui.horizontal_top(|ui| {
            let side_px = (ui.available_width() - LEGEND_WIDTH)
                .min(ui.available_height())
                .max(160.0);
            let (response, painter) = ui.allocate_painter(vec2(side_px, side_px), Sense::hover());
            let rect = response.rect;
            let to_screen = |p: DrawPoint| -> Pos2 {
                rect.min
                    + vec2(
                        (p.x / scene.side) as f32 * rect.width(),
                        (p.y / scene.side) as f32 * rect.height(),
                    )
            };

            painter.rect_filled(rect, 0.0, Color32::from_gray(250));
            painter.rect_stroke(rect, 0.0, Stroke::new(1.0, Color32::GRAY));

            if self.show_neighborhoods {
                for n in &scene.neighborhoods {
                    painter.circle_filled(to_screen(n.position), self.point_radius, color32(n.color));
                }
            }

            let mark = self.point_radius * 3.0;
            for h in &scene.hospitals {
                let marker = Rect::from_center_size(to_screen(h.position), vec2(mark, mark));
                painter.rect_filled(marker, 1.0, color32(h.color));
                painter.rect_stroke(marker, 1.0, Stroke::new(1.5, Color32::BLACK));
            }

            if let Some(pointer) = response.hover_pos() {
                let hit = nearest(&scene.hospitals, pointer, &to_screen)
                    .map(|h| format!("Hospital {}", h.id))
                    .or_else(|| {
                        nearest(&scene.neighborhoods, pointer, &to_screen)
                            .map(|n| format!("Neighborhood {} -> hospital {}", n.id, n.cluster))
                    });
                if let Some(text) = hit {
                    response.on_hover_text(text);
                }
            }

            ui.vertical(|ui| {
                ui.strong("Hospitals");
                egui::ScrollArea::vertical().show(ui, |ui| {
                    for entry in &scene.legend {
                        ui.horizontal(|ui| {
                            let (swatch, _) = ui.allocate_exact_size(vec2(12.0, 12.0), Sense::hover());
                            ui.painter().rect_filled(swatch, 2.0, color32(entry.color));
                            ui.label(format!(
                                "#{}  ({} neighborhoods)",
                                entry.hospital_id, entry.neighborhoods
                            ));
                        });
                    }
                    if scene.legend.len() > PALETTE.len() {
                        ui.small(format!("Colors repeat every {} hospitals", PALETTE.len()));
                    }
                });
            });
        });
    }
}

fn nearest<'a>(
    markers: &'a [Marker],
    pointer: Pos2,
    to_screen: &impl Fn(DrawPoint) -> Pos2,
) -> Option<&'a Marker> {
    markers
        .iter()
        .map(|m| (m, to_screen(m.position).distance(pointer)))
        .filter(|(_, d)| *d <= HOVER_RADIUS_PX)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(m, _)| m)
}
