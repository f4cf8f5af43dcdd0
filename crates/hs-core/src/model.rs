//! Wire types exchanged with the solver service.
//!
//! Field names follow the solver's JSON contract exactly, including the
//! Spanish `resumen_hospitales`, `vecindarios_asignados` and `mensaje` keys.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

use crate::error::{ModelError, ModelResult};

/// Scenario parameters sent as the body of `POST /simular`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioRequest {
    pub m: u32,
    pub num_neighborhoods: u32,
    pub k: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub random_seed: Option<i64>,
}

/// A position in solver space (origin bottom-left, y up).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

impl Coordinates {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighborhood {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub cluster: usize,
}

impl Neighborhood {
    pub fn position(&self) -> Coordinates {
        Coordinates::new(self.x, self.y)
    }
}

/// A cluster center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    pub id: usize,
    pub x: f64,
    pub y: f64,
}

impl Hospital {
    pub fn position(&self) -> Coordinates {
        Coordinates::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub avg_distance: f64,
    pub max_distance: f64,
    pub inertia: f64,
    pub iterations: u32,
    /// Inertia per iteration, when the solver reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<f64>>,
}

impl Metrics {
    pub fn history(&self) -> &[f64] {
        self.history.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalSummary {
    pub hospital_id: usize,
    pub vecindarios_asignados: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

/// Successful solver payload. Replaces any previous result wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub grid_size: u32,
    pub hospitals: Vec<Hospital>,
    pub neighborhoods: Vec<Neighborhood>,
    pub metrics: Metrics,
    #[serde(
        rename = "resumen_hospitales",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub summaries: Vec<HospitalSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mensaje: Option<String>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl SimulationResult {
    /// Side of the square solver area.
    pub fn side(&self) -> f64 {
        f64::from(self.grid_size)
    }

    pub fn hospital(&self, id: usize) -> Option<&Hospital> {
        self.hospitals.iter().find(|h| h.id == id)
    }

    /// Checks the cross-references between neighborhoods, hospitals and
    /// summaries. Returns the first violation found.
    pub fn check_consistency(&self) -> ModelResult<()> {
        let mut hospital_ids = HashSet::new();
        for hospital in &self.hospitals {
            if !hospital_ids.insert(hospital.id) {
                return Err(ModelError::DuplicateHospital {
                    hospital_id: hospital.id,
                });
            }
        }

        for neighborhood in &self.neighborhoods {
            if !hospital_ids.contains(&neighborhood.cluster) {
                return Err(ModelError::UnknownCluster {
                    neighborhood_id: neighborhood.id,
                    cluster: neighborhood.cluster,
                });
            }
        }

        let mut summary_ids = HashSet::new();
        for summary in &self.summaries {
            if !summary_ids.insert(summary.hospital_id) {
                return Err(ModelError::DuplicateSummary {
                    hospital_id: summary.hospital_id,
                });
            }
            if !hospital_ids.contains(&summary.hospital_id) {
                return Err(ModelError::UnknownSummaryHospital {
                    hospital_id: summary.hospital_id,
                });
            }
        }

        Ok(())
    }
}
