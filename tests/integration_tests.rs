//! Integration tests for sqlpipe.
//!
//! The runner tests use the in-memory mock client and always run. The
//! pipeline tests require a running PostgreSQL database; set DATABASE_URL to
//! enable them.
//!
//! Run with: `cargo test --test integration_tests`

mod integration;
