//! Integration test suite for taskgroups.
//!
//! These tests exercise the path from a registry file to a resolved queue,
//! and the debug temp-file capture used alongside it.
//!
//! # Test Categories
//!
//! - `resolution_e2e`: Registry → candidates → queue scenarios
//! - `properties`: Invariants checked over generated descriptor pools
//! - `temp_files`: Debug capture naming and cleanup

mod fixtures;

mod resolution_e2e;
mod temp_files;
