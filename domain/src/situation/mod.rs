//! Situations and their structural validation.

pub mod entities;
pub mod validation;

pub use entities::Situation;
pub use validation::{SituationValidator, ValidationReport};
