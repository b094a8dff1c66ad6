//! Worksheet run: validates a request snapshot and drives one generation run.
//!
//! Flow: validate request → resolve categories → seed RNG → assemble pages →
//!       answer key (optional) → render sheets → response.
//!
//! CPU-bound and synchronous; handlers call `run_worksheet` inside `spawn_blocking`.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::{enabled_categories, unknown_ids};
use crate::config::Config;
use crate::errors::{AppError, GenerationError};
use crate::generation::answer_key::{build_answer_key, AnswerLine};
use crate::generation::assembler::{assemble, MAX_PROBLEMS_PER_PAGE};
use crate::generation::policy::GenerationPolicy;
use crate::generation::problem::Page;
use crate::render::render_document;
use crate::render::sheet::Sheet;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LongMultiplicationSettings {
    pub multiplicand_digits: u32,
    pub multiplier_digits: u32,
}

impl Default for LongMultiplicationSettings {
    fn default() -> Self {
        let policy = GenerationPolicy::default();
        Self {
            multiplicand_digits: policy.long_multiplicand_digits,
            multiplier_digits: policy.long_multiplier_digits,
        }
    }
}

/// Full configuration snapshot for one run. Missing fields take the defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorksheetRequest {
    pub title: String,
    pub enabled_categories: Vec<String>,
    pub allow_negatives: bool,
    pub whole_number_division: bool,
    pub generate_answer_key: bool,
    pub page_count: u32,
    pub long_multiplication: LongMultiplicationSettings,
    /// Falls back to the configured page capacity.
    pub problems_per_page: Option<usize>,
    /// Fixes the random source; the same seed and request reproduce the same run.
    pub seed: Option<u64>,
}

impl Default for WorksheetRequest {
    fn default() -> Self {
        let policy = GenerationPolicy::default();
        Self {
            title: String::new(),
            enabled_categories: Vec::new(),
            allow_negatives: policy.allow_negatives,
            whole_number_division: policy.whole_number_division,
            generate_answer_key: false,
            page_count: 1,
            long_multiplication: LongMultiplicationSettings::default(),
            problems_per_page: None,
            seed: None,
        }
    }
}

impl WorksheetRequest {
    pub fn policy(&self) -> GenerationPolicy {
        GenerationPolicy {
            allow_negatives: self.allow_negatives,
            whole_number_division: self.whole_number_division,
            long_multiplicand_digits: self.long_multiplication.multiplicand_digits,
            long_multiplier_digits: self.long_multiplication.multiplier_digits,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WorksheetResponse {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub title: String,
    pub pages: Vec<Page>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_key: Option<Vec<AnswerLine>>,
    /// Worksheet sheets first, then the answer key sheet when requested.
    pub sheets: Vec<Sheet>,
    pub forced_duplicates: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Run
// ────────────────────────────────────────────────────────────────────────────

/// Runs one complete generation. Nothing is produced unless every check passes.
pub fn run_worksheet(
    request: WorksheetRequest,
    config: &Config,
) -> Result<WorksheetResponse, AppError> {
    if !(1..=config.max_page_count).contains(&request.page_count) {
        return Err(AppError::Validation(format!(
            "page_count must be between 1 and {}",
            config.max_page_count
        )));
    }

    let problems_per_page = request
        .problems_per_page
        .unwrap_or(config.problems_per_page);
    if !(1..=MAX_PROBLEMS_PER_PAGE).contains(&problems_per_page) {
        return Err(AppError::Validation(format!(
            "problems_per_page must be between 1 and {MAX_PROBLEMS_PER_PAGE}"
        )));
    }

    let enabled_ids: HashSet<String> = request.enabled_categories.iter().cloned().collect();
    let unknown = unknown_ids(&enabled_ids);
    if !unknown.is_empty() {
        warn!("Ignoring unknown category ids: {}", unknown.join(", "));
    }

    let categories = enabled_categories(&enabled_ids);
    if categories.is_empty() {
        return Err(GenerationError::NoCategories.into());
    }

    let mut rng = match request.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let run_id = Uuid::new_v4();
    info!(
        "Run {run_id}: {} pages x {problems_per_page} from [{}]",
        request.page_count,
        categories
            .iter()
            .map(|c| c.id)
            .collect::<Vec<_>>()
            .join(", ")
    );

    let assembly = assemble(
        &categories,
        &request.policy(),
        request.page_count,
        problems_per_page,
        &mut rng,
    )?;

    let answer_key = request
        .generate_answer_key
        .then(|| build_answer_key(&assembly.pages));
    let document = render_document(&assembly.pages, &request.title, request.generate_answer_key);

    Ok(WorksheetResponse {
        run_id,
        generated_at: Utc::now(),
        title: document.title,
        pages: assembly.pages,
        answer_key,
        sheets: document.sheets,
        forced_duplicates: assembly.forced_duplicates,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::sheet::SheetKind;

    fn make_request(ids: &[&str]) -> WorksheetRequest {
        WorksheetRequest {
            enabled_categories: ids.iter().map(|s| s.to_string()).collect(),
            seed: Some(17),
            ..WorksheetRequest::default()
        }
    }

    #[test]
    fn test_request_deserialization_fills_defaults() {
        let json = serde_json::json!({ "enabled_categories": ["add_1"] });
        let request: WorksheetRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.page_count, 1);
        assert!(request.whole_number_division);
        assert!(!request.allow_negatives);
        assert_eq!(request.long_multiplication.multiplicand_digits, 4);
        assert_eq!(request.long_multiplication.multiplier_digits, 2);
        assert!(request.seed.is_none());
    }

    #[test]
    fn test_empty_selection_is_configuration_error() {
        let err = run_worksheet(make_request(&[]), &Config::default()).unwrap_err();
        assert!(matches!(
            err,
            AppError::Configuration(GenerationError::NoCategories)
        ));
    }

    #[test]
    fn test_only_unknown_ids_is_configuration_error() {
        let err = run_worksheet(make_request(&["bogus"]), &Config::default()).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn test_page_count_out_of_range_is_rejected() {
        for page_count in [0, 11] {
            let request = WorksheetRequest {
                page_count,
                ..make_request(&["add_1"])
            };
            let err = run_worksheet(request, &Config::default()).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
    }

    #[test]
    fn test_problems_per_page_ceiling() {
        let request = WorksheetRequest {
            problems_per_page: Some(MAX_PROBLEMS_PER_PAGE + 1),
            ..make_request(&["add_2"])
        };
        assert!(matches!(
            run_worksheet(request, &Config::default()),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_run_with_answer_key() {
        let request = WorksheetRequest {
            title: "Friday drill".to_string(),
            page_count: 2,
            generate_answer_key: true,
            ..make_request(&["add_2", "div_1"])
        };
        let response = run_worksheet(request, &Config::default()).unwrap();

        assert_eq!(response.title, "Friday drill");
        assert_eq!(response.pages.len(), 2);
        assert!(response.pages.iter().all(|p| p.problems.len() == 12));
        assert_eq!(response.answer_key.as_ref().map(Vec::len), Some(24));
        assert_eq!(response.sheets.len(), 3);
        assert_eq!(response.sheets[2].kind, SheetKind::AnswerKey);
    }

    #[test]
    fn test_run_without_answer_key_omits_it() {
        let response = run_worksheet(make_request(&["sub_2"]), &Config::default()).unwrap();
        assert!(response.answer_key.is_none());
        assert_eq!(response.sheets.len(), 1);
    }

    #[test]
    fn test_configured_page_capacity_applies() {
        let config = Config {
            problems_per_page: 6,
            ..Config::default()
        };
        let response = run_worksheet(make_request(&["mul_2"]), &config).unwrap();
        assert_eq!(response.pages[0].problems.len(), 6);
    }

    #[test]
    fn test_same_seed_reproduces_pages() {
        let a = run_worksheet(make_request(&["add_3", "mul_long"]), &Config::default()).unwrap();
        let b = run_worksheet(make_request(&["add_3", "mul_long"]), &Config::default()).unwrap();
        assert_eq!(a.pages, b.pages);
        assert_ne!(a.run_id, b.run_id);
    }

    #[test]
    fn test_invalid_long_multiplication_width_is_configuration_error() {
        let request = WorksheetRequest {
            long_multiplication: LongMultiplicationSettings {
                multiplicand_digits: 12,
                multiplier_digits: 2,
            },
            ..make_request(&["mul_long"])
        };
        let err = run_worksheet(request, &Config::default()).unwrap_err();
        assert!(matches!(
            err,
            AppError::Configuration(GenerationError::InvalidDigits { digits: 12, .. })
        ));
    }
}
