//! Answer Key: every problem of a run as one compact, numbered listing.

use serde::{Deserialize, Serialize};

use crate::generation::problem::{Page, Problem};

/// One answer key line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerLine {
    /// 1-based, run-wide.
    pub number: usize,
    /// Inline form, e.g. `"47 ÷ 5"`.
    pub expression: String,
    /// e.g. `"9"` or `"9 R2"`.
    pub answer: String,
}

/// All problems of all pages in page-then-slot order.
pub fn flatten(pages: &[Page]) -> Vec<&Problem> {
    pages.iter().flat_map(|page| page.problems.iter()).collect()
}

pub fn build_answer_key(pages: &[Page]) -> Vec<AnswerLine> {
    flatten(pages)
        .into_iter()
        .enumerate()
        .map(|(i, problem)| AnswerLine {
            number: i + 1,
            expression: inline_expression(problem),
            answer: answer_text(problem),
        })
        .collect()
}

pub fn inline_expression(problem: &Problem) -> String {
    format!(
        "{} {} {}",
        problem.operand1,
        problem.operation.symbol(),
        problem.operand2
    )
}

pub fn answer_text(problem: &Problem) -> String {
    match problem.remainder {
        Some(remainder) => format!("{} R{remainder}", problem.result),
        None => problem.result.to_string(),
    }
}
