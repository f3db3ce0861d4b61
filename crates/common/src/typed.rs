use std::any::Any;
use std::fmt;

use crate::ingredient::{Ingredient, IngredientType, IngredientTypeWithSubtypes};
use crate::vanilla::{ITEM_STACK, ItemStack};

/// An ingredient paired with its type.
///
/// Instances are created by the ingredient manager, which checks that the
/// type is registered and the value is valid for it.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TypedIngredient<T: Ingredient> {
    ingredient_type: IngredientType<T>,
    ingredient: T,
}

impl<T: Ingredient> TypedIngredient<T> {
    /// Pair a type and value without validation. Ingredient managers call
    /// this after their own checks.
    pub fn new_unchecked(ingredient_type: IngredientType<T>, ingredient: T) -> Self {
        Self {
            ingredient_type,
            ingredient,
        }
    }

    pub fn ingredient_type(&self) -> &IngredientType<T> {
        &self.ingredient_type
    }

    pub fn ingredient(&self) -> &T {
        &self.ingredient
    }

    pub fn into_ingredient(self) -> T {
        self.ingredient
    }

    /// The ingredient's base ingredient, e.g. the item of an item stack.
    pub fn base_ingredient<B>(&self, ingredient_type: &IngredientTypeWithSubtypes<B, T>) -> B {
        ingredient_type.base(&self.ingredient)
    }
}

impl<T: Ingredient> fmt::Debug for TypedIngredient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:?}", self.ingredient_type.uid(), self.ingredient)
    }
}

/// Type-erased view of a [`TypedIngredient`], for code that handles
/// ingredients of any type.
pub trait AnyTypedIngredient: fmt::Debug {
    /// Uid of the ingredient's type.
    fn type_uid(&self) -> &'static str;

    /// The wrapped ingredient as `Any`.
    fn ingredient_any(&self) -> &dyn Any;

    /// The whole typed ingredient as `Any`, for downcasting back to
    /// `TypedIngredient<T>`.
    fn as_any(&self) -> &dyn Any;

    fn clone_boxed(&self) -> Box<dyn AnyTypedIngredient>;
}

impl<T: Ingredient> AnyTypedIngredient for TypedIngredient<T> {
    fn type_uid(&self) -> &'static str {
        self.ingredient_type.uid()
    }

    fn ingredient_any(&self) -> &dyn Any {
        &self.ingredient
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_boxed(&self) -> Box<dyn AnyTypedIngredient> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn AnyTypedIngredient> {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

impl dyn AnyTypedIngredient + '_ {
    /// This instance, only if it has the given type.
    pub fn cast<V: Ingredient>(
        &self,
        ingredient_type: &IngredientType<V>,
    ) -> Option<&TypedIngredient<V>> {
        if self.type_uid() != ingredient_type.uid() {
            return None;
        }
        self.as_any().downcast_ref::<TypedIngredient<V>>()
    }

    /// Borrow the ingredient, only if it has the given type.
    pub fn cast_ingredient<V: Ingredient>(
        &self,
        ingredient_type: &IngredientType<V>,
    ) -> Option<&V> {
        self.cast(ingredient_type).map(TypedIngredient::ingredient)
    }

    /// Clone the ingredient out, only if it has the given type.
    pub fn ingredient_of<V: Ingredient>(&self, ingredient_type: &IngredientType<V>) -> Option<V> {
        self.cast_ingredient(ingredient_type).cloned()
    }

    /// The wrapped item stack, if this holds one.
    pub fn item_stack(&self) -> Option<ItemStack> {
        self.ingredient_of(&ITEM_STACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vanilla::{FLUID_STACK, FluidStack, ITEM_STACK_BY_ITEM};

    fn stone() -> TypedIngredient<ItemStack> {
        TypedIngredient::new_unchecked(ITEM_STACK, ItemStack::new("minecraft:stone", 4))
    }

    #[test]
    fn cast_tiers_on_matching_type() {
        let typed = stone();
        let erased: &dyn AnyTypedIngredient = &typed;

        assert_eq!(erased.cast(&ITEM_STACK), Some(&typed));
        assert_eq!(
            erased.cast_ingredient(&ITEM_STACK).map(|s| s.count),
            Some(4)
        );
        assert_eq!(
            erased.ingredient_of(&ITEM_STACK),
            Some(typed.ingredient().clone())
        );
        assert_eq!(
            erased.item_stack().map(|s| s.item),
            Some("minecraft:stone".to_string())
        );
    }

    #[test]
    fn cast_tiers_on_other_type() {
        let typed = stone();
        let erased: &dyn AnyTypedIngredient = &typed;

        assert!(erased.cast(&FLUID_STACK).is_none());
        assert!(erased.cast_ingredient(&FLUID_STACK).is_none());
        assert!(erased.ingredient_of(&FLUID_STACK).is_none());
    }

    #[test]
    fn fluid_is_not_an_item_stack() {
        let water = FluidStack::new("minecraft:water", 1000);
        let water = TypedIngredient::new_unchecked(FLUID_STACK, water);
        let erased: &dyn AnyTypedIngredient = &water;
        assert!(erased.item_stack().is_none());
        assert_eq!(erased.type_uid(), "fluid_stack");
    }

    #[test]
    fn base_ingredient_projection() {
        let base = stone().base_ingredient(&ITEM_STACK_BY_ITEM);
        assert_eq!(base, "minecraft:stone");
    }

    #[test]
    fn boxed_clone_keeps_value() {
        let boxed: Box<dyn AnyTypedIngredient> = Box::new(stone());
        let copy = boxed.clone();
        assert_eq!(copy.item_stack(), boxed.item_stack());
    }
}
