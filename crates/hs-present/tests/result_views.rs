use hs_core::SimulationResult;
use hs_present::*;

const PAYLOAD: &str = r#"{
    "grid_size": 100,
    "hospitals": [{"id": 0, "x": 10.0, "y": 90.0}, {"id": 1, "x": 60.0, "y": 40.0}, {"id": 2, "x": 90.0, "y": 10.0}],
    "neighborhoods": [
        {"id": 0, "x": 12.0, "y": 88.0, "cluster": 0},
        {"id": 1, "x": 58.0, "y": 42.0, "cluster": 1},
        {"id": 2, "x": 61.0, "y": 39.0, "cluster": 1},
        {"id": 3, "x": 65.0, "y": 35.0, "cluster": 1}
    ],
    "metrics": {"avg_distance": 3.2, "max_distance": 7.1, "inertia": 61.0, "iterations": 3, "history": [100.0, 50.0, 10.0]},
    "resumen_hospitales": [
        {"hospital_id": 1, "vecindarios_asignados": 3, "avg_distance": 4.0},
        {"hospital_id": 0, "vecindarios_asignados": 1, "avg_distance": 2.8, "coordinates": {"x": 10.0, "y": 90.0}}
    ]
}"#;

fn result() -> SimulationResult {
    serde_json::from_str(PAYLOAD).unwrap()
}

#[test]
fn plot_scene_flips_every_marker() {
    let result = result();
    let scene = PlotScene::build(&result);

    assert_eq!(scene.neighborhoods.len(), 4);
    for (marker, n) in scene.neighborhoods.iter().zip(&result.neighborhoods) {
        assert_eq!(marker.position, DrawPoint::new(n.x, 100.0 - n.y));
        assert_eq!(marker.color, cluster_color(n.cluster));
    }
    assert_eq!(scene.hospitals[2].position, DrawPoint::new(90.0, 90.0));
    let counts: Vec<usize> = scene.legend.iter().map(|e| e.neighborhoods).collect();
    assert_eq!(counts, vec![1, 3, 0]);
}

#[test]
fn analytics_combines_history_loads_and_balance() {
    let analytics = AnalyticsView::build(&result());

    let ys: Vec<f64> = analytics.inertia.points.iter().map(|p| p.y).collect();
    assert_eq!(ys[0], 0.0);
    assert!((ys[1] - 55.555_555_555).abs() < 1e-6);
    assert_eq!(ys[2], 100.0);
    assert_eq!(
        analytics.inertia.caption,
        Some(HistoryCaption {
            first: "100".to_string(),
            last: "10".to_string()
        })
    );

    let bars: Vec<(usize, u32)> = analytics
        .load_bars
        .iter()
        .map(|b| (b.hospital_id, b.count))
        .collect();
    assert_eq!(bars, vec![(1, 3), (0, 1)]);

    let balance = analytics.balance.unwrap();
    assert_eq!((balance.min, balance.max), (0, 3));
    assert!((balance.imbalance - 3.0 / (4.0 / 3.0)).abs() < 1e-9);
    assert_eq!(analytics.metrics.len(), 4);
}

#[test]
fn detail_rows_follow_hospital_order() {
    let result = result();
    let ResultView::Detail(rows) = ResultView::for_tab(ViewTab::Detail, &result) else {
        panic!("expected detail view");
    };
    let ids: Vec<usize> = rows.iter().map(|r| r.hospital_id).collect();
    assert_eq!(ids, vec![0, 1, 2]);
    assert_eq!(rows[2].vecindarios_asignados, 0);
    assert_eq!(rows[1].avg_distance, Some(4.0));
}

#[test]
fn building_views_leaves_result_untouched() {
    let result = result();
    let before = result.clone();
    for tab in ViewTab::ALL {
        let view = ResultView::for_tab(tab, &result);
        assert_eq!(view.tab(), tab);
    }
    assert_eq!(result, before);
}
