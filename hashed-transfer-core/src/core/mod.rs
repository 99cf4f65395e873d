//! Core functionality
//!
//! This module contains hashing, benchmarking and transfer submission.

pub mod crypto;
pub mod benchmark;
pub mod transactions;
