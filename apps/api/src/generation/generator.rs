//! Problem Generator: draws one arithmetic problem for a category.
//!
//! Values are random, shape is fixed by the category and the policy. The random source is
//! injected so callers (and tests) decide between entropy and a fixed seed.
//!
//! # Whole-number division
//! The quotient is drawn from `2..=floor(max_dividend / divisor)`. A large divisor can make
//! that range empty, so the divisor itself is only drawn from divisors that leave room for a
//! quotient of at least 2. That is the same distribution as rerolling the divisor until it
//! fits. A category where no divisor fits is rejected by `check_category`.

use std::ops::RangeInclusive;

use rand::Rng;

use crate::catalog::{Category, MultiplicationKind, Operation};
use crate::errors::GenerationError;
use crate::generation::policy::GenerationPolicy;
use crate::generation::problem::Problem;

/// Upper bound for any operand width. Two 9-digit factors still fit in an `i64` product.
pub const MAX_DIGITS: u32 = 9;

const MIN_QUOTIENT: i64 = 2;
const SIMPLE_FACTORS: RangeInclusive<i64> = 2..=5;
const MEDIUM_FACTORS: RangeInclusive<i64> = 2..=12;

struct Operands {
    operand1: i64,
    operand2: i64,
    result: i64,
    remainder: Option<i64>,
}

// ────────────────────────────────────────────────────────────────────────────
// Public API
// ────────────────────────────────────────────────────────────────────────────

/// Draws one problem for `category` under `policy`.
///
/// Fails only when the category/policy combination cannot produce a valid problem
/// (see `check_category`); a valid combination always yields a problem on the first draw.
pub fn generate<R: Rng>(
    category: &Category,
    policy: &GenerationPolicy,
    rng: &mut R,
) -> Result<Problem, GenerationError> {
    check_category(category, policy)?;

    let drawn = match category.operation {
        Operation::Addition => draw_addition(category, rng),
        Operation::Subtraction => draw_subtraction(category, policy, rng),
        Operation::Multiplication => draw_multiplication(category, policy, rng),
        Operation::Division => draw_division(category, policy, rng)?,
    };

    Ok(Problem {
        id: uuid::Builder::from_random_bytes(rng.gen()).into_uuid(),
        operand1: drawn.operand1,
        operand2: drawn.operand2,
        operation: category.operation,
        result: drawn.result,
        remainder: drawn.remainder,
        category_id: category.id.to_string(),
    })
}

/// Validates that `category` can be generated under `policy`.
///
/// Checks every operand width the draw will use and, for whole-number division,
/// that at least one divisor leaves a quotient of at least 2.
pub fn check_category(
    category: &Category,
    policy: &GenerationPolicy,
) -> Result<(), GenerationError> {
    if let Some((top, bottom)) = operand_widths(category, policy) {
        for digits in [top, bottom] {
            if !(1..=MAX_DIGITS).contains(&digits) {
                return Err(GenerationError::InvalidDigits {
                    category_id: category.id.to_string(),
                    digits,
                    max: MAX_DIGITS,
                });
            }
        }
    }

    if category.operation == Operation::Division
        && policy.whole_number_division
        && whole_number_divisors(category.digits_top, category.digits_bottom).is_none()
    {
        return Err(infeasible_division(category));
    }

    Ok(())
}

/// All integers with exactly `digits` digits. `digits` must be in `1..=MAX_DIGITS`.
pub fn digit_range(digits: u32) -> RangeInclusive<i64> {
    10_i64.pow(digits - 1)..=10_i64.pow(digits) - 1
}

// ────────────────────────────────────────────────────────────────────────────
// Per-operation draws
// ────────────────────────────────────────────────────────────────────────────

fn draw_addition<R: Rng>(category: &Category, rng: &mut R) -> Operands {
    let operand1 = rng.gen_range(digit_range(category.digits_top));
    let operand2 = rng.gen_range(digit_range(category.digits_bottom));
    Operands {
        operand1,
        operand2,
        result: operand1 + operand2,
        remainder: None,
    }
}

fn draw_subtraction<R: Rng>(
    category: &Category,
    policy: &GenerationPolicy,
    rng: &mut R,
) -> Operands {
    let mut operand1 = rng.gen_range(digit_range(category.digits_top));
    let mut operand2 = rng.gen_range(digit_range(category.digits_bottom));
    if !policy.allow_negatives && operand1 < operand2 {
        std::mem::swap(&mut operand1, &mut operand2);
    }
    Operands {
        operand1,
        operand2,
        result: operand1 - operand2,
        remainder: None,
    }
}

fn draw_multiplication<R: Rng>(
    category: &Category,
    policy: &GenerationPolicy,
    rng: &mut R,
) -> Operands {
    let (operand1, operand2) = match category.multiplication {
        Some(MultiplicationKind::Simple) => (
            rng.gen_range(SIMPLE_FACTORS),
            rng.gen_range(SIMPLE_FACTORS),
        ),
        Some(MultiplicationKind::Long) => (
            rng.gen_range(digit_range(policy.long_multiplicand_digits)),
            rng.gen_range(digit_range(policy.long_multiplier_digits)),
        ),
        Some(MultiplicationKind::Medium) | None => (
            rng.gen_range(MEDIUM_FACTORS),
            rng.gen_range(MEDIUM_FACTORS),
        ),
    };
    Operands {
        operand1,
        operand2,
        result: operand1 * operand2,
        remainder: None,
    }
}

fn draw_division<R: Rng>(
    category: &Category,
    policy: &GenerationPolicy,
    rng: &mut R,
) -> Result<Operands, GenerationError> {
    if policy.whole_number_division {
        let divisors = whole_number_divisors(category.digits_top, category.digits_bottom)
            .ok_or_else(|| infeasible_division(category))?;
        let divisor = rng.gen_range(divisors);
        let quotient = rng.gen_range(MIN_QUOTIENT..=max_dividend(category.digits_top) / divisor);
        return Ok(Operands {
            operand1: divisor * quotient,
            operand2: divisor,
            result: quotient,
            remainder: None,
        });
    }

    let divisor = rng.gen_range(divisor_range(category.digits_bottom));
    let dividend = rng.gen_range(digit_range(category.digits_top));
    let remainder = dividend % divisor;
    Ok(Operands {
        operand1: dividend,
        operand2: divisor,
        result: dividend / divisor,
        remainder: (remainder != 0).then_some(remainder),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Range helpers
// ────────────────────────────────────────────────────────────────────────────

/// Operand widths a draw for this category will use, or `None` for fixed-range categories.
fn operand_widths(category: &Category, policy: &GenerationPolicy) -> Option<(u32, u32)> {
    match (category.operation, category.multiplication) {
        (Operation::Multiplication, Some(MultiplicationKind::Long)) => Some((
            policy.long_multiplicand_digits,
            policy.long_multiplier_digits,
        )),
        (Operation::Multiplication, _) => None,
        _ => Some((category.digits_top, category.digits_bottom)),
    }
}

/// `digits`-digit divisors, never below 2.
fn divisor_range(digits: u32) -> RangeInclusive<i64> {
    let digits = digit_range(digits);
    (*digits.start()).max(2)..=*digits.end()
}

fn max_dividend(digits: u32) -> i64 {
    *digit_range(digits).end()
}

/// Divisors that still allow a quotient of at least `MIN_QUOTIENT`.
fn whole_number_divisors(dividend_digits: u32, divisor_digits: u32) -> Option<RangeInclusive<i64>> {
    let divisors = divisor_range(divisor_digits);
    let largest = (*divisors.end()).min(max_dividend(dividend_digits) / MIN_QUOTIENT);
    (largest >= *divisors.start()).then(|| *divisors.start()..=largest)
}

fn infeasible_division(category: &Category) -> GenerationError {
    GenerationError::InfeasibleDivision {
        category_id: category.id.to_string(),
        dividend_digits: category.digits_top,
        divisor_digits: category.digits_bottom,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
