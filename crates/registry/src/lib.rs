//! Ingredient Registry: the host's ingredient manager.
//!
//! # Invariants
//! - A type uid is registered at most once.
//! - Typed ingredients handed out by the registry passed their helper's validity check.

mod helper;
mod registry;

pub use helper::{FluidStackHelper, IngredientHelper, ItemStackHelper};
pub use registry::{IngredientRegistry, RegistryError};

pub fn crate_info() -> &'static str {
    "ingredient-registry v0.1.0"
}
