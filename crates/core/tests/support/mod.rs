//! Shared test helpers for `apigate-core` integration tests.
//!
//! These helpers provide an in-memory gateway so that reconciliation tests
//! can focus on call sequencing instead of transport details.

pub mod gateway;
