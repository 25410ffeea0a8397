//! Shared helpers for barflow's integration tests and the simulator's tests.
//!
//! Kept free of a dependency on `barflow` itself so any test binary in the
//! workspace can pull it in.

pub mod logging;
pub mod unique_helpers;

pub use unique_helpers::{unique_customer_id, unique_str};
