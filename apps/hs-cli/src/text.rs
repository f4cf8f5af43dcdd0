//! Plain-text renderings of the result views.

use std::fmt::Write;

use hs_present::{AnalyticsView, CHART_EXTENT, DrawPoint, HospitalRow, PALETTE, PlotScene};

const MAP_COLS: usize = 48;
const MAP_ROWS: usize = 24;
const BAR_WIDTH: usize = 40;

pub fn plot(scene: &PlotScene) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Grid {side}x{side}, {} neighborhoods, {} hospitals",
        scene.neighborhoods.len(),
        scene.hospitals.len(),
        side = scene.side
    );

    if scene.side > 0.0 && !scene.is_empty() {
        let mut cells = vec![vec![' '; MAP_COLS]; MAP_ROWS];
        for n in &scene.neighborhoods {
            let (row, col) = cell(n.position, scene.side);
            cells[row][col] = cluster_glyph(n.cluster);
        }
        for h in &scene.hospitals {
            let (row, col) = cell(h.position, scene.side);
            cells[row][col] = 'H';
        }

        let border = format!("+{}+", "-".repeat(MAP_COLS));
        let _ = writeln!(out, "{border}");
        for row in cells {
            let _ = writeln!(out, "|{}|", row.into_iter().collect::<String>());
        }
        let _ = writeln!(out, "{border}");
    }

    let _ = writeln!(out, "Legend:");
    for entry in &scene.legend {
        let _ = writeln!(
            out,
            "  [{}] Hospital {:<3} {}  {} neighborhoods",
            cluster_glyph(entry.hospital_id),
            entry.hospital_id,
            entry.color.to_hex(),
            entry.neighborhoods
        );
    }
    if scene.legend.len() > PALETTE.len() {
        let _ = writeln!(
            out,
            "  (colors repeat every {} hospitals)",
            PALETTE.len()
        );
    }
    out
}

pub fn analytics(view: &AnalyticsView) -> String {
    let mut out = String::new();

    for row in &view.metrics {
        let _ = writeln!(out, "{:<18} {}", row.label, row.value);
    }

    let _ = writeln!(out, "\nConvergence:");
    match &view.inertia.caption {
        Some(caption) if !view.inertia.is_empty() => {
            let _ = writeln!(out, "  inertia {} -> {}", caption.first, caption.last);
            for (i, point) in view.inertia.points.iter().enumerate() {
                let _ = writeln!(out, "  {:>4} {}", i, bar(height_fraction(*point)));
            }
        }
        _ => {
            let _ = writeln!(out, "  (not enough history to chart)");
        }
    }

    let _ = writeln!(out, "\nLoad per hospital:");
    if view.load_bars.is_empty() {
        let _ = writeln!(out, "  (no hospital summaries)");
    }
    for load in &view.load_bars {
        let _ = writeln!(
            out,
            "  Hospital {:<3} {:<width$} {:>5} ({:.1}%)",
            load.hospital_id,
            bar(load.fraction),
            load.count,
            load.percent(),
            width = BAR_WIDTH
        );
    }

    if let Some(balance) = &view.balance {
        let _ = writeln!(
            out,
            "\nBalance: min {} / max {} / mean {:.2} / std dev {:.2} / imbalance {:.2}",
            balance.min, balance.max, balance.mean, balance.std_dev, balance.imbalance
        );
    }
    out
}

pub fn detail(rows: &[HospitalRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:>10} {:>10} {:>10} {:>14}",
        "Hospital", "X", "Y", "Assigned", "Avg distance"
    );
    for row in rows {
        let coords = row.display_coordinates();
        let avg = row
            .avg_distance
            .map(|d| format!("{d:.2}"))
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:<10} {:>10.2} {:>10.2} {:>10} {:>14}",
            row.hospital_id, coords.x, coords.y, row.vecindarios_asignados, avg
        );
    }
    out
}

fn cell(point: DrawPoint, side: f64) -> (usize, usize) {
    let scale = |v: f64, cells: usize| {
        let idx = (v / side * cells as f64).floor().max(0.0) as usize;
        idx.min(cells - 1)
    };
    (scale(point.y, MAP_ROWS), scale(point.x, MAP_COLS))
}

fn cluster_glyph(cluster: usize) -> char {
    // Same wrap as the color palette.
    char::from_digit((cluster % PALETTE.len()) as u32, 36).unwrap_or('?')
}

/// Chart y grows downward; a bar's length grows with the value.
fn height_fraction(point: DrawPoint) -> f64 {
    (CHART_EXTENT - point.y) / CHART_EXTENT
}

fn bar(fraction: f64) -> String {
    let len = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(len)
}
