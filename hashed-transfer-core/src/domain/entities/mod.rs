//! Domain entities and value objects
//!
//! This module contains the core domain entities and value objects
//! that represent the business concepts of a hashed transfer.

pub mod amount;
pub mod transfer;

// Re-export entities
pub use amount::*;
pub use transfer::*;
