//! Shared helpers for integration tests.

pub mod rspec_runner;
