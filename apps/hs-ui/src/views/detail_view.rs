use egui_extras::{Column, TableBuilder};
use hs_present::{HospitalRow, cluster_color};

use super::color32;

#[derive(Default)]
pub struct DetailView;

impl DetailView {
    pub fn show(&mut self, ui: &mut egui::Ui, rows: &[HospitalRow]) {
        if rows.is_empty() {
            ui.label("The result has no hospitals");
            return;
        }

        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(80.0))
            .column(Column::auto().at_least(80.0))
            .column(Column::auto().at_least(80.0))
            .column(Column::auto().at_least(90.0))
            .column(Column::remainder())
            .header(22.0, |mut header| {
                for title in ["Hospital", "X", "Y", "Assigned", "Avg distance"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for row in rows {
                    let coords = row.display_coordinates();
                    body.row(20.0, |mut table_row| {
                        table_row.col(|ui| {
                            ui.colored_label(
                                color32(cluster_color(row.hospital_id)),
                                format!("#{}", row.hospital_id),
                            );
                        });
                        table_row.col(|ui| {
                            ui.monospace(format!("{:.2}", coords.x));
                        });
                        table_row.col(|ui| {
                            ui.monospace(format!("{:.2}", coords.y));
                        });
                        table_row.col(|ui| {
                            ui.monospace(row.vecindarios_asignados.to_string());
                        });
                        table_row.col(|ui| {
                            let text = row
                                .avg_distance
                                .map(|d| format!("{d:.2}"))
                                .unwrap_or_else(|| "-".to_string());
                            ui.monospace(text);
                        });
                    });
                }
            });
    }
}
