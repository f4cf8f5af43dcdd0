//! Joins hospitals with their summaries for the detail table.

use std::collections::HashMap;

use hs_core::{Coordinates, Hospital, HospitalSummary};

#[derive(Debug, Clone, PartialEq)]
pub struct HospitalRow {
    pub hospital_id: usize,
    /// Position reported in the hospital list.
    pub position: Coordinates,
    pub vecindarios_asignados: u32,
    pub avg_distance: Option<f64>,
    /// Position reported in the summary, if any.
    pub coordinates: Option<Coordinates>,
}

impl HospitalRow {
    /// Summary coordinates when present, the hospital's own otherwise.
    pub fn display_coordinates(&self) -> Coordinates {
        self.coordinates.unwrap_or(self.position)
    }
}

/// One row per hospital, in hospital order. Hospitals without a summary get
/// zero assigned neighborhoods and no distance or coordinates.
pub fn compose_rows(hospitals: &[Hospital], summaries: &[HospitalSummary]) -> Vec<HospitalRow> {
    let by_id: HashMap<usize, &HospitalSummary> =
        summaries.iter().map(|s| (s.hospital_id, s)).collect();

    hospitals
        .iter()
        .map(|h| {
            let summary = by_id.get(&h.id);
            HospitalRow {
                hospital_id: h.id,
                position: h.position(),
                vecindarios_asignados: summary.map_or(0, |s| s.vecindarios_asignados),
                avg_distance: summary.and_then(|s| s.avg_distance),
                coordinates: summary.and_then(|s| s.coordinates),
            }
        })
        .collect()
}
