//! Integration tests for the Verifalia Rust SDK.
//!
//! These tests drive the public API against local mock endpoints, so they
//! need neither credentials nor network access.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test integration
//!
//! # With SDK logs
//! RUST_LOG=verifalia=debug cargo test --test integration -- --nocapture
//! ```

mod common;
mod failover_tests;
mod validation_tests;
