//! Domain repositories
//!
//! This module contains the collaborator traits the core depends on:
//! the on-chain transfer call, the record store and the address directory.

pub mod transfer_gateway;
pub mod transfer_record_store;
pub mod address_directory;

// Re-export repositories
pub use transfer_gateway::*;
pub use transfer_record_store::*;
pub use address_directory::*;
