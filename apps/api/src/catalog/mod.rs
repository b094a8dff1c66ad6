//! Category Catalog: the static table of problem categories.
//!
//! Leaf data. The generator and the assembler only ever read from it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl Operation {
    /// Operator symbol as printed on a sheet.
    pub fn symbol(self) -> &'static str {
        match self {
            Operation::Addition => "+",
            Operation::Subtraction => "-",
            Operation::Multiplication => "×",
            Operation::Division => "÷",
        }
    }
}

/// Operand ranges for multiplication categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiplicationKind {
    /// Both factors in 2..=5.
    Simple,
    /// Both factors in 2..=12.
    Medium,
    /// Factor widths come from the generation policy, not the category.
    Long,
}

/// A named arithmetic problem template.
///
/// `digits_top` / `digits_bottom` are the exact digit widths of the two operands.
/// For division `digits_top` bounds the dividend and `digits_bottom` is the divisor width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub operation: Operation,
    pub digits_top: u32,
    pub digits_bottom: u32,
    /// Only meaningful for multiplication. `None` falls back to the Medium range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiplication: Option<MultiplicationKind>,
}

impl Category {
    pub const fn new(
        id: &'static str,
        name: &'static str,
        operation: Operation,
        digits_top: u32,
        digits_bottom: u32,
    ) -> Self {
        Self {
            id,
            name,
            operation,
            digits_top,
            digits_bottom,
            multiplication: None,
        }
    }

    pub const fn multiplication(
        id: &'static str,
        name: &'static str,
        kind: MultiplicationKind,
        digits_top: u32,
        digits_bottom: u32,
    ) -> Self {
        Self {
            id,
            name,
            operation: Operation::Multiplication,
            digits_top,
            digits_bottom,
            multiplication: Some(kind),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static catalog
// ────────────────────────────────────────────────────────────────────────────

pub static CATALOG: &[Category] = &[
    // Addition
    Category::new("add_1", "Addition: 1-digit", Operation::Addition, 1, 1),
    Category::new("add_2", "Addition: 2-digits", Operation::Addition, 2, 2),
    Category::new("add_3", "Addition: 3-digits", Operation::Addition, 3, 3),
    // Subtraction
    Category::new("sub_1", "Subtraction: 1-digit", Operation::Subtraction, 1, 1),
    Category::new("sub_2", "Subtraction: 2-digits", Operation::Subtraction, 2, 2),
    Category::new("sub_3", "Subtraction: 3-digits", Operation::Subtraction, 3, 3),
    // Multiplication
    Category::multiplication(
        "mul_1",
        "Multiplication: Simple (2-5)",
        MultiplicationKind::Simple,
        1,
        1,
    ),
    Category::multiplication(
        "mul_2",
        "Multiplication: Medium (2-12)",
        MultiplicationKind::Medium,
        1,
        1,
    ),
    Category::multiplication(
        "mul_long",
        "Long Multiplication",
        MultiplicationKind::Long,
        4,
        2,
    ),
    // Division
    Category::new(
        "div_1",
        "Division: Simple (1-digit divisor)",
        Operation::Division,
        2,
        1,
    ),
    Category::new(
        "div_2",
        "Division: Medium (2-digit divisor)",
        Operation::Division,
        3,
        2,
    ),
];

// ────────────────────────────────────────────────────────────────────────────
// Lookups
// ────────────────────────────────────────────────────────────────────────────

/// Filters the catalog down to the selected ids, preserving catalog order.
///
/// Returns an empty list when nothing matches; the caller decides whether that is an error.
pub fn enabled_categories(enabled_ids: &HashSet<String>) -> Vec<&'static Category> {
    CATALOG
        .iter()
        .filter(|c| enabled_ids.contains(c.id))
        .collect()
}

pub fn find(id: &str) -> Option<&'static Category> {
    CATALOG.iter().find(|c| c.id == id)
}

/// Requested ids that do not exist in the catalog, sorted for stable log output.
pub fn unknown_ids(enabled_ids: &HashSet<String>) -> Vec<String> {
    let mut unknown: Vec<String> = enabled_ids
        .iter()
        .filter(|id| find(id).is_none())
        .cloned()
        .collect();
    unknown.sort();
    unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> HashSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        let unique: HashSet<&str> = CATALOG.iter().map(|c| c.id).collect();
        assert_eq!(unique.len(), CATALOG.len());
    }

    #[test]
    fn test_enabled_categories_preserves_catalog_order() {
        // Selection order is irrelevant; catalog order wins.
        let selected = enabled_categories(&ids(&["div_1", "add_1", "mul_long"]));
        let got: Vec<&str> = selected.iter().map(|c| c.id).collect();
        assert_eq!(got, vec!["add_1", "mul_long", "div_1"]);
    }

    #[test]
    fn test_enabled_categories_empty_when_nothing_matches() {
        assert!(enabled_categories(&ids(&["nope", "mul_9"])).is_empty());
        assert!(enabled_categories(&HashSet::new()).is_empty());
    }

    #[test]
    fn test_unknown_ids_are_reported_sorted() {
        let unknown = unknown_ids(&ids(&["add_1", "zzz", "abc"]));
        assert_eq!(unknown, vec!["abc".to_string(), "zzz".to_string()]);
    }

    #[test]
    fn test_multiplication_kinds_are_structured() {
        assert_eq!(
            find("mul_1").and_then(|c| c.multiplication),
            Some(MultiplicationKind::Simple)
        );
        assert_eq!(
            find("mul_long").and_then(|c| c.multiplication),
            Some(MultiplicationKind::Long)
        );
        assert!(CATALOG
            .iter()
            .filter(|c| c.operation != Operation::Multiplication)
            .all(|c| c.multiplication.is_none()));
    }

    #[test]
    fn test_operation_serializes_snake_case() {
        let json = serde_json::to_string(&Operation::Multiplication).unwrap();
        assert_eq!(json, "\"multiplication\"");
    }
}
