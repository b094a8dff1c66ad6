//! Page Assembler: fills pages with generated problems under a run-wide dedup constraint.
//!
//! # Dedup policy
//! Each slot retries (re-pick category, regenerate) while the drawn signature was already
//! seen in this run, up to `MAX_DEDUP_ATTEMPTS` draws. After that the colliding problem is
//! accepted as a forced duplicate. Small category sets cannot always supply enough distinct
//! problems; the run still fills every slot.
//!
//! The seen set lives on the stack of one `assemble` call and is dropped on return.

use std::collections::HashSet;

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::Category;
use crate::errors::GenerationError;
use crate::generation::generator::{check_category, generate};
use crate::generation::policy::GenerationPolicy;
use crate::generation::problem::{Page, Problem, Signature};

/// Default page capacity.
pub const PROBLEMS_PER_PAGE: usize = 12;

/// Hard ceiling for a page capacity, from config or a request.
pub const MAX_PROBLEMS_PER_PAGE: usize = 100;

/// Draws per slot before a duplicate is accepted.
pub const MAX_DEDUP_ATTEMPTS: u32 = 30;

/// Output of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assembly {
    /// Exactly `page_count` pages of exactly `problems_per_page` problems, in generation order.
    pub pages: Vec<Page>,
    /// Problems accepted after exhausting the retry budget.
    pub forced_duplicates: usize,
}

/// Generates `page_count` pages of `problems_per_page` problems each.
///
/// Every category is validated against `policy` before the first draw, so a run either
/// fails up front or completes.
pub fn assemble<R: Rng>(
    categories: &[&Category],
    policy: &GenerationPolicy,
    page_count: u32,
    problems_per_page: usize,
    rng: &mut R,
) -> Result<Assembly, GenerationError> {
    if categories.is_empty() {
        return Err(GenerationError::NoCategories);
    }
    if page_count == 0 {
        return Err(GenerationError::NoPages);
    }
    if problems_per_page == 0 {
        return Err(GenerationError::EmptyPage);
    }
    for category in categories {
        check_category(category, policy)?;
    }

    let total = page_count as usize * problems_per_page;
    let mut seen: HashSet<Signature> = HashSet::with_capacity(total);
    let mut pages = Vec::with_capacity(page_count as usize);
    let mut forced_duplicates = 0;

    for number in 1..=page_count {
        let mut problems = Vec::with_capacity(problems_per_page);
        for slot in 0..problems_per_page {
            let (problem, is_fresh) = draw_unique(categories, policy, &seen, rng)?;
            if !is_fresh {
                forced_duplicates += 1;
                debug!(
                    "Page {number} slot {slot}: accepted duplicate {} {} {} after {MAX_DEDUP_ATTEMPTS} attempts",
                    problem.operand1,
                    problem.operation.symbol(),
                    problem.operand2
                );
            }
            // Recorded even when forced; the set only grows.
            seen.insert(problem.signature());
            problems.push(problem);
        }
        pages.push(Page { number, problems });
    }

    if forced_duplicates > 0 {
        warn!(
            "{forced_duplicates}/{total} problems are duplicates: enabled categories cannot supply enough distinct problems"
        );
    }
    info!(
        "Assembled {page_count} pages x {problems_per_page} problems from {} categories",
        categories.len()
    );

    Ok(Assembly {
        pages,
        forced_duplicates,
    })
}

/// Draws until the signature is unseen or the attempt budget runs out.
/// Returns the problem and whether it is fresh.
fn draw_unique<R: Rng>(
    categories: &[&Category],
    policy: &GenerationPolicy,
    seen: &HashSet<Signature>,
    rng: &mut R,
) -> Result<(Problem, bool), GenerationError> {
    let mut attempts = 0;
    loop {
        let category = categories[rng.gen_range(0..categories.len())];
        let problem = generate(category, policy, rng)?;
        attempts += 1;

        if !seen.contains(&problem.signature()) {
            return Ok((problem, true));
        }
        if attempts >= MAX_DEDUP_ATTEMPTS {
            return Ok((problem, false));
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
