//! Test modules for the match evaluator
