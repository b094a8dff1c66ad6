//! Sheet model: what one printed page shows, independent of any output format.

use serde::{Deserialize, Serialize};

use crate::catalog::Operation;
use crate::generation::answer_key::{build_answer_key, AnswerLine};
use crate::generation::problem::Page;

const DEFAULT_TITLE: &str = "Math Practice";
const ANSWER_KEY_TITLE: &str = "Answer Key";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetKind {
    Worksheet,
    AnswerKey,
}

/// One problem as laid out on a worksheet. Answers are never shown here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemCell {
    /// Run-wide, 1-based.
    pub number: usize,
    pub operand1: i64,
    pub operand2: i64,
    pub operation: Operation,
    pub symbol: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    pub kind: SheetKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// `"Page N"` or `"Answer Key"`.
    pub label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cells: Vec<ProblemCell>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<AnswerLine>,
}

/// Every sheet of a run: worksheet pages first, then the optional answer key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedDocument {
    pub title: String,
    pub sheets: Vec<Sheet>,
}

/// Renders one worksheet page. `first_number` is the run-wide number of its first problem.
pub fn render_page(page: &Page, title: &str, first_number: usize) -> Sheet {
    let cells = page
        .problems
        .iter()
        .enumerate()
        .map(|(slot, p)| ProblemCell {
            number: first_number + slot,
            operand1: p.operand1,
            operand2: p.operand2,
            operation: p.operation,
            symbol: p.operation.symbol().to_string(),
        })
        .collect();

    Sheet {
        kind: SheetKind::Worksheet,
        title: worksheet_title(title),
        subtitle: None,
        label: format!("Page {}", page.number),
        cells,
        answers: Vec::new(),
    }
}

/// Renders the single answer key sheet covering all pages.
pub fn render_answer_key(pages: &[Page], title: &str) -> Sheet {
    let title = match title.trim() {
        "" => ANSWER_KEY_TITLE.to_string(),
        t => format!("Answers: {t}"),
    };
    Sheet {
        kind: SheetKind::AnswerKey,
        title,
        subtitle: Some(format!("All problems from pages 1 to {}", pages.len())),
        label: ANSWER_KEY_TITLE.to_string(),
        cells: Vec::new(),
        answers: build_answer_key(pages),
    }
}

pub fn render_document(pages: &[Page], title: &str, include_answer_key: bool) -> RenderedDocument {
    let mut sheets = Vec::with_capacity(pages.len() + 1);
    let mut next_number = 1;
    for page in pages {
        sheets.push(render_page(page, title, next_number));
        next_number += page.problems.len();
    }
    if include_answer_key {
        sheets.push(render_answer_key(pages, title));
    }

    RenderedDocument {
        title: worksheet_title(title),
        sheets,
    }
}

fn worksheet_title(title: &str) -> String {
    match title.trim() {
        "" => DEFAULT_TITLE.to_string(),
        t => t.to_string(),
    }
}
