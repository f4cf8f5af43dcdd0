//! Service layer shared by the CLI and desktop frontends.
//!
//! Loads solver configuration, talks to the solver service over HTTP and
//! drives the presentation session from background submissions.

pub mod config;
pub mod controller;
pub mod error;
pub mod solver_client;

pub use config::SolverConfig;
pub use controller::{RequestController, Settlement};
pub use error::{AppError, AppResult, SubmitError};
pub use solver_client::{HttpSolver, SolverTransport};
