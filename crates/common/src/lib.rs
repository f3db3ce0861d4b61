//! Shared ingredient types for the lookup GUI.
//!
//! # Invariants
//! - A typed ingredient's value always belongs to its type token.
//! - Ingredient identity (`Eq` + `Hash`) is stable for the life of the value.

pub mod fault;
pub mod ingredient;
pub mod manager;
pub mod text;
pub mod typed;
pub mod vanilla;

pub use fault::PluginFault;
pub use ingredient::{Ingredient, IngredientType, IngredientTypeWithSubtypes};
pub use manager::{EmptyIngredientManager, IngredientManager};
pub use text::{Argb, ChatColor, TextContent, TextLine, TranslationError, Translations};
pub use typed::{AnyTypedIngredient, TypedIngredient};
pub use vanilla::{FLUID_STACK, FluidStack, ITEM_STACK, ITEM_STACK_BY_ITEM, ItemStack};

pub fn crate_info() -> &'static str {
    "ingredient-common v0.1.0"
}
