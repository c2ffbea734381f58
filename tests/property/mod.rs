//! Property-based tests for resolver and protocol guarantees

mod determinism;
