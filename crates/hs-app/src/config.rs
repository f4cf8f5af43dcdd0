//! Solver connection settings, read once at startup.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{AppError, AppResult};

pub const BASE_URL_ENV: &str = "SOLVER_BASE_URL";
pub const TIMEOUT_ENV: &str = "SOLVER_TIMEOUT_S";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_S: f64 = 120.0;

const SIMULATE_PATH: &str = "simular";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub base_url: String,
    /// Per-request timeout in seconds; zero disables it.
    pub request_timeout_s: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_s: DEFAULT_TIMEOUT_S,
        }
    }
}

impl SolverConfig {
    /// Defaults, overlaid by the YAML file (if given), overlaid by the
    /// process environment.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        config.with_env(|key| std::env::var(key).ok())
    }

    pub fn from_yaml_file(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&contents).map_err(|e| AppError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(TIMEOUT_ENV).filter(|v| !v.trim().is_empty()) {
            self.request_timeout_s = raw.trim().parse().map_err(|_| {
                AppError::Config(format!("{TIMEOUT_ENV} must be a number of seconds, got '{raw}'"))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(AppError::Config("solver base URL is empty".to_string()));
        }
        if !self.request_timeout_s.is_finite() || self.request_timeout_s < 0.0 {
            return Err(AppError::Config(format!(
                "request timeout must be a non-negative number, got {}",
                self.request_timeout_s
            )));
        }
        Ok(())
    }

    /// `POST` target: the base URL without trailing slashes, plus `/simular`.
    pub fn endpoint(&self) -> String {
        format!("{}/{SIMULATE_PATH}", self.base_url.trim_end_matches('/'))
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.request_timeout_s > 0.0).then(|| Duration::from_secs_f64(self.request_timeout_s))
    }
}
