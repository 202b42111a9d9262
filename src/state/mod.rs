//! State containers and component layout.
//!
//! # Submodules
//!
//! - [`field`]: dense multi-component arrays over an index box
//! - [`slots`]: conservative/primitive/Godunov component slot constants
//! - [`passive`]: passive-scalar slot mapping

pub mod field;
pub mod passive;
pub mod slots;

pub use field::{Field, StateError};
pub use passive::PassiveMap;
