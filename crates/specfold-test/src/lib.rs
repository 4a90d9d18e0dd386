//! CLI regression tests for the specfold binary.

#[cfg(test)]
pub mod cli;
