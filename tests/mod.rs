//! Integration tests for reeltui
//!
//! Tests are organized by component:
//! - tmdb_test: TMDB API client tests
//! - flow_test: End-to-end flows (Search -> Detail -> Previous/Next -> Close)
//! - ui_test: UI rendering tests
//! - cli_test: CLI parsing and command handlers

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
