//! HTTP client for the solver service.

use hs_core::{ScenarioRequest, SimulationResult};

use crate::config::SolverConfig;
use crate::error::{AppError, AppResult, SubmitError};

/// One blocking round trip to a solver. Implementations must be callable
/// from worker threads.
pub trait SolverTransport: Send + Sync {
    fn simulate(&self, request: &ScenarioRequest) -> Result<SimulationResult, SubmitError>;
}

/// `POST <base>/simular` with the scenario as a JSON body.
pub struct HttpSolver {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpSolver {
    pub fn new(config: &SolverConfig) -> AppResult<Self> {
        config.validate()?;
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SolverTransport for HttpSolver {
    fn simulate(&self, request: &ScenarioRequest) -> Result<SimulationResult, SubmitError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| SubmitError::Decode(e.to_string()))
    }
}
