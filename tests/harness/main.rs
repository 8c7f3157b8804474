//! Benchmark Run Tests
//!
//! End-to-end runs of the harness, organized by concern:
//! - scenarios: healthy runs and configuration failures
//! - fail_fast: a backend failure stops the run at the failing phase
//! - cleanup: the working directory is cleaned on every exit path

#[path = "../common/mod.rs"]
mod common;

mod cleanup;
mod fail_fast;
mod scenarios;
