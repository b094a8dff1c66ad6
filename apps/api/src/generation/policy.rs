use serde::{Deserialize, Serialize};

/// Numeric rules applied to every problem of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationPolicy {
    /// Subtraction may produce a negative result.
    pub allow_negatives: bool,
    /// Division must come out even (no remainder).
    pub whole_number_division: bool,
    /// Width of the first factor for long multiplication.
    pub long_multiplicand_digits: u32,
    /// Width of the second factor for long multiplication.
    pub long_multiplier_digits: u32,
}

impl Default for GenerationPolicy {
    fn default() -> Self {
        Self {
            allow_negatives: false,
            whole_number_division: true,
            long_multiplicand_digits: 4,
            long_multiplier_digits: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let policy: GenerationPolicy =
            serde_json::from_value(serde_json::json!({ "allow_negatives": true })).unwrap();
        assert!(policy.allow_negatives);
        assert!(policy.whole_number_division);
        assert_eq!(policy.long_multiplicand_digits, 4);
        assert_eq!(policy.long_multiplier_digits, 2);
    }
}
