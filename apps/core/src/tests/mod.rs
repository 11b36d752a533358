//! Test Module
//!
//! Integration test suite for the decision engine.
//!
//! ## Test Categories
//! - `pipeline_tests`: full cascade behavior, stage ordering, degradation
//! - `screening_tests`: severity band grids and submission validation
//! - `state_tests`: startup wiring and end-to-end operation flow

pub mod screening_tests;
