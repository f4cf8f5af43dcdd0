//! Standalone SVG rendering of the plot scene and analytics charts.

use std::fmt::Write;

use crate::geometry::PlotScene;
use crate::series::{CHART_EXTENT, InertiaChart, LoadBar};

const BAR_HEIGHT: f64 = 8.0;
const BAR_GAP: f64 = 4.0;

/// Square scatter plot with a `side x side` viewBox. Hospitals are drawn as
/// outlined squares on top of the neighborhood dots.
pub fn render_plot_svg(scene: &PlotScene) -> String {
    let side = scene.side;
    let dot = (side / 150.0).max(0.2);
    let mark = dot * 3.0;

    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {side} {side}" width="600" height="600">"#
    );
    let _ = writeln!(
        out,
        r##"  <rect x="0" y="0" width="{side}" height="{side}" fill="#ffffff" stroke="#cccccc" stroke-width="{}"/>"##,
        dot / 2.0
    );

    for n in &scene.neighborhoods {
        let _ = writeln!(
            out,
            r#"  <circle cx="{:.3}" cy="{:.3}" r="{:.3}" fill="{}"><title>Neighborhood {} (hospital {})</title></circle>"#,
            n.position.x,
            n.position.y,
            dot,
            n.color.to_hex(),
            n.id,
            n.cluster
        );
    }

    for h in &scene.hospitals {
        let _ = writeln!(
            out,
            r##"  <rect x="{:.3}" y="{:.3}" width="{:.3}" height="{:.3}" fill="{}" stroke="#000000" stroke-width="{:.3}"><title>Hospital {}</title></rect>"##,
            h.position.x - mark / 2.0,
            h.position.y - mark / 2.0,
            mark,
            mark,
            h.color.to_hex(),
            dot / 2.0,
            h.id
        );
    }

    out.push_str("</svg>\n");
    out
}

/// Inertia line chart in a `CHART_EXTENT` square viewBox. Empty charts
/// produce an empty frame.
pub fn render_inertia_svg(chart: &InertiaChart) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {e} {e}" width="400" height="400" preserveAspectRatio="none">"#,
        e = CHART_EXTENT
    );

    if !chart.is_empty() {
        let points: Vec<String> = chart
            .points
            .iter()
            .map(|p| format!("{:.3},{:.3}", p.x, p.y))
            .collect();
        let _ = writeln!(
            out,
            r##"  <polyline points="{}" fill="none" stroke="#1f77b4" stroke-width="1"/>"##,
            points.join(" ")
        );
    }

    if let Some(caption) = &chart.caption {
        let _ = writeln!(
            out,
            r#"  <title>Inertia {} to {}</title>"#,
            caption.first, caption.last
        );
    }

    out.push_str("</svg>\n");
    out
}

/// Horizontal load bars, one row per bar, widths in percent of the viewBox.
pub fn render_load_bars_svg(bars: &[LoadBar]) -> String {
    let height = bars.len() as f64 * (BAR_HEIGHT + BAR_GAP) + BAR_GAP;
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 {height}" width="400" preserveAspectRatio="none">"#
    );
    for (i, bar) in bars.iter().enumerate() {
        let y = BAR_GAP + i as f64 * (BAR_HEIGHT + BAR_GAP);
        let _ = writeln!(
            out,
            r#"  <rect x="0" y="{y}" width="{:.3}" height="{BAR_HEIGHT}" fill="{}"><title>Hospital {}: {}</title></rect>"#,
            bar.percent(),
            crate::geometry::cluster_color(bar.hospital_id).to_hex(),
            bar.hospital_id,
            bar.count
        );
    }
    out.push_str("</svg>\n");
    out
}
