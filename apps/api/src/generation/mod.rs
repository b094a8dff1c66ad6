// Worksheet generation engine
// Implements: problem generation, page assembly with run-wide dedup, answer key, worksheet runs.
// Pure and synchronous; the only randomness comes from the injected `rand::Rng`.

pub mod answer_key;
pub mod assembler;
pub mod generator;
pub mod handlers;
pub mod policy;
pub mod problem;
pub mod worksheet;
