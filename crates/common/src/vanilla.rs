//! Built-in ingredient types shipped with the host.

use serde::{Deserialize, Serialize};

use crate::ingredient::{IngredientType, IngredientTypeWithSubtypes};

/// A stack of items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemStack {
    /// Registry name of the item, e.g. `minecraft:stone`.
    pub item: String,
    pub count: u32,
}

impl ItemStack {
    pub fn new(item: impl Into<String>, count: u32) -> Self {
        Self {
            item: item.into(),
            count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// An amount of fluid, in millibuckets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FluidStack {
    pub fluid: String,
    pub amount: u64,
}

impl FluidStack {
    pub fn new(fluid: impl Into<String>, amount: u64) -> Self {
        Self {
            fluid: fluid.into(),
            amount,
        }
    }
}

pub const ITEM_STACK: IngredientType<ItemStack> = IngredientType::new("item_stack");
pub const FLUID_STACK: IngredientType<FluidStack> = IngredientType::new("fluid_stack");

/// Item stacks keyed by their item.
pub const ITEM_STACK_BY_ITEM: IngredientTypeWithSubtypes<String, ItemStack> =
    IngredientTypeWithSubtypes::new("item_stack", item_of);

fn item_of(stack: &ItemStack) -> String {
    stack.item.clone()
}
