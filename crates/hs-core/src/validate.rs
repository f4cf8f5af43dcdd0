//! Scenario form validation.
//!
//! The form holds raw text. Every rule is evaluated independently so that
//! all problems are reported together.

use serde::{Deserialize, Serialize};

use crate::model::ScenarioRequest;

pub const GRID_SIZE_INVALID: &str = "Grid size (m) must be a positive number";
pub const NEIGHBORHOODS_INVALID: &str = "Number of neighborhoods must be a positive number";
pub const HOSPITALS_INVALID: &str = "Number of hospitals (K) must be a positive number";
pub const HOSPITALS_EXCEED_NEIGHBORHOODS: &str =
    "Number of hospitals (K) cannot exceed the number of neighborhoods";
pub const SEED_INVALID: &str = "Random seed must be a whole number or left blank";

/// Raw scenario form contents, one string per input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioDraft {
    pub m: String,
    pub num_neighborhoods: String,
    pub k: String,
    pub random_seed: String,
}

impl Default for ScenarioDraft {
    fn default() -> Self {
        Self {
            m: "100".to_string(),
            num_neighborhoods: "600".to_string(),
            k: "5".to_string(),
            random_seed: "42".to_string(),
        }
    }
}

impl From<&ScenarioRequest> for ScenarioDraft {
    fn from(request: &ScenarioRequest) -> Self {
        Self {
            m: request.m.to_string(),
            num_neighborhoods: request.num_neighborhoods.to_string(),
            k: request.k.to_string(),
            random_seed: request
                .random_seed
                .map(|seed| seed.to_string())
                .unwrap_or_default(),
        }
    }
}

impl ScenarioDraft {
    /// Converts the draft into a request, or returns every validation error.
    pub fn to_request(&self) -> Result<ScenarioRequest, Vec<String>> {
        let (errors, request) = check(self);
        match request {
            Some(request) if errors.is_empty() => Ok(request),
            _ => Err(errors),
        }
    }
}

/// Returns human-readable problems with the draft; empty iff submittable.
pub fn validate(draft: &ScenarioDraft) -> Vec<String> {
    check(draft).0
}

fn check(draft: &ScenarioDraft) -> (Vec<String>, Option<ScenarioRequest>) {
    let mut errors = Vec::new();

    let m = parse_count(&draft.m);
    let num_neighborhoods = parse_count(&draft.num_neighborhoods);
    let k = parse_count(&draft.k);
    let random_seed = parse_seed(&draft.random_seed);

    if m.is_none() {
        errors.push(GRID_SIZE_INVALID.to_string());
    }
    if num_neighborhoods.is_none() {
        errors.push(NEIGHBORHOODS_INVALID.to_string());
    }
    if k.is_none() {
        errors.push(HOSPITALS_INVALID.to_string());
    }
    // Compared whenever both parse, even if one of them is non-positive.
    if let (Some(n), Some(k)) = (
        parse_integer(&draft.num_neighborhoods),
        parse_integer(&draft.k),
    ) {
        if k > n {
            errors.push(HOSPITALS_EXCEED_NEIGHBORHOODS.to_string());
        }
    }
    if random_seed.is_err() {
        errors.push(SEED_INVALID.to_string());
    }

    let request = match (m, num_neighborhoods, k, random_seed) {
        (Some(m), Some(num_neighborhoods), Some(k), Ok(random_seed)) => Some(ScenarioRequest {
            m,
            num_neighborhoods,
            k,
            random_seed,
        }),
        _ => None,
    };

    (errors, request)
}

fn parse_integer(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok()
}

fn parse_count(text: &str) -> Option<u32> {
    parse_integer(text)
        .filter(|v| *v > 0)
        .and_then(|v| u32::try_from(v).ok())
}

fn parse_seed(text: &str) -> Result<Option<i64>, ()> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse::<i64>().map(Some).map_err(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(m: &str, n: &str, k: &str, seed: &str) -> ScenarioDraft {
        ScenarioDraft {
            m: m.to_string(),
            num_neighborhoods: n.to_string(),
            k: k.to_string(),
            random_seed: seed.to_string(),
        }
    }

    #[test]
    fn default_draft_is_submittable() {
        assert!(validate(&ScenarioDraft::default()).is_empty());
    }

    #[test]
    fn all_violations_reported_together() {
        let errors = validate(&draft("0", "-3", "abc", ""));
        assert_eq!(
            errors,
            vec![
                GRID_SIZE_INVALID.to_string(),
                NEIGHBORHOODS_INVALID.to_string(),
                HOSPITALS_INVALID.to_string(),
            ]
        );
    }

    #[test]
    fn k_above_neighborhoods_is_flagged() {
        let errors = validate(&draft("100", "4", "5", ""));
        assert_eq!(errors, vec![HOSPITALS_EXCEED_NEIGHBORHOODS.to_string()]);
    }

    #[test]
    fn k_comparison_skipped_when_neighborhoods_malformed() {
        let errors = validate(&draft("100", "", "5", ""));
        assert_eq!(errors, vec![NEIGHBORHOODS_INVALID.to_string()]);
    }

    #[test]
    fn k_equal_to_neighborhoods_is_allowed() {
        assert!(validate(&draft("10", "5", "5", "")).is_empty());
    }

    #[test]
    fn blank_seed_is_omitted() {
        let request = draft(" 100 ", "600", "5", "  ").to_request().unwrap();
        assert_eq!(request.m, 100);
        assert_eq!(request.random_seed, None);
    }

    #[test]
    fn non_numeric_seed_is_rejected() {
        let errors = validate(&draft("100", "600", "5", "seed"));
        assert_eq!(errors, vec![SEED_INVALID.to_string()]);
    }

    #[test]
    fn fractional_values_are_not_well_formed() {
        let errors = validate(&draft("2.5", "600", "5", ""));
        assert_eq!(errors, vec![GRID_SIZE_INVALID.to_string()]);
    }

    #[test]
    fn draft_round_trips_through_request() {
        let request = ScenarioRequest {
            m: 100,
            num_neighborhoods: 600,
            k: 5,
            random_seed: Some(-7),
        };
        assert_eq!(ScenarioDraft::from(&request).to_request(), Ok(request));
    }
}
