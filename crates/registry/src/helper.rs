use ingredient_common::{FluidStack, Ingredient, ItemStack};

/// Per-type knowledge about ingredient values: naming, identity and
/// validation.
pub trait IngredientHelper<T: Ingredient> {
    fn display_name(&self, ingredient: &T) -> String;

    /// Stable id distinguishing this ingredient from others of its type.
    fn unique_id(&self, ingredient: &T) -> String;

    fn is_valid(&self, _ingredient: &T) -> bool {
        true
    }

    /// Extra detail for crash logs.
    fn error_info(&self, ingredient: &T) -> String {
        format!("{ingredient:?}")
    }
}

/// Readable name from a namespaced id: "minecraft:oak_log" -> "oak log".
fn path_name(id: &str) -> String {
    let path = id.rsplit(':').next().unwrap_or(id);
    path.replace('_', " ")
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ItemStackHelper;

impl IngredientHelper<ItemStack> for ItemStackHelper {
    fn display_name(&self, ingredient: &ItemStack) -> String {
        path_name(&ingredient.item)
    }

    fn unique_id(&self, ingredient: &ItemStack) -> String {
        ingredient.item.clone()
    }

    fn is_valid(&self, ingredient: &ItemStack) -> bool {
        !ingredient.is_empty() && !ingredient.item.is_empty()
    }

    fn error_info(&self, ingredient: &ItemStack) -> String {
        format!("{} x{}", ingredient.item, ingredient.count)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FluidStackHelper;

impl IngredientHelper<FluidStack> for FluidStackHelper {
    fn display_name(&self, ingredient: &FluidStack) -> String {
        path_name(&ingredient.fluid)
    }

    fn unique_id(&self, ingredient: &FluidStack) -> String {
        format!("fluid:{}", ingredient.fluid)
    }

    fn is_valid(&self, ingredient: &FluidStack) -> bool {
        ingredient.amount > 0 && !ingredient.fluid.is_empty()
    }

    fn error_info(&self, ingredient: &FluidStack) -> String {
        format!("{} {}mB", ingredient.fluid, ingredient.amount)
    }
}
