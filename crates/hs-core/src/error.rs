use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Neighborhood {neighborhood_id} references unknown hospital {cluster}")]
    UnknownCluster { neighborhood_id: usize, cluster: usize },

    #[error("Duplicate hospital summary for hospital {hospital_id}")]
    DuplicateSummary { hospital_id: usize },

    #[error("Summary references unknown hospital {hospital_id}")]
    UnknownSummaryHospital { hospital_id: usize },

    #[error("Duplicate hospital id: {hospital_id}")]
    DuplicateHospital { hospital_id: usize },
}
