//! Dependency Runtime Tests
//!
//! These tests validate:
//! - Registry identity, freshness, release and concurrent reads
//! - Live and static cycle detection
//! - Batch ordering and both failure policies
//! - Usage counting through the hook table
//! - Graph export formats
//! - The facade wiring everything together

mod export_tests;
mod optimizer_tests;
mod registry_tests;
