//! hs-core: shared foundation for the hospital-siting client.
//!
//! Contains:
//! - model (scenario request + solver result wire types)
//! - validate (scenario form validation and parsing)
//! - error (shared error types)

pub mod error;
pub mod model;
pub mod validate;

pub use error::{ModelError, ModelResult};
pub use model::*;
pub use validate::{ScenarioDraft, validate};
