//! Infrastructure layer
//!
//! Configuration and the concrete collaborators behind the domain traits:
//! the JSON-RPC transfer gateway, the JSON file record store and the
//! in-memory address directory.

pub mod config;
pub mod json_rpc_gateway;
pub mod file_storage;
pub mod address_book;

// Re-export infrastructure components
pub use config::*;
pub use json_rpc_gateway::*;
pub use file_storage::*;
pub use address_book::*;
