//! Transfer submission
//!
//! This module hashes a transfer payload, hands the transfer to the
//! on-chain collaborator and records the result.

pub mod submission_state;
pub mod submission_pipeline;

pub use submission_state::*;
pub use submission_pipeline::*;
