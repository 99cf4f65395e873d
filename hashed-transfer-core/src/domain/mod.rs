//! Domain layer - entities and repositories
//!
//! This module contains the transfer entities and the collaborator traits
//! the submission pipeline is built against.

pub mod entities;
pub mod repositories;

// Re-export domain components
pub use entities::*;
pub use repositories::*;
