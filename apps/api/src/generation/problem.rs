use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::Operation;

/// One generated arithmetic problem. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub id: Uuid,
    pub operand1: i64,
    pub operand2: i64,
    pub operation: Operation,
    /// Sum, difference, product, or integer quotient.
    pub result: i64,
    /// Division only, and only when nonzero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remainder: Option<i64>,
    pub category_id: String,
}

impl Problem {
    pub fn signature(&self) -> Signature {
        Signature {
            operand1: self.operand1,
            operation: self.operation,
            operand2: self.operand2,
        }
    }
}

/// Run-wide dedup key. Order-sensitive: `5 - 3` and `3 - 5` differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    pub operand1: i64,
    pub operation: Operation,
    pub operand2: i64,
}

/// One printable sheet worth of problems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based.
    pub number: u32,
    pub problems: Vec<Problem>,
}
