use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// A value that can be shown in the lookup GUI.
///
/// Identity (`Eq` + `Hash`) is what the isolation layer remembers when a
/// plugin fails on an ingredient, so equality must be stable across lookups.
pub trait Ingredient: Any + Clone + Eq + Hash + fmt::Debug {}

impl<T> Ingredient for T where T: Any + Clone + Eq + Hash + fmt::Debug {}

/// Type token for one registered kind of ingredient.
///
/// Two tokens are equal when both the uid and the Rust type match.
pub struct IngredientType<T> {
    uid: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Ingredient> IngredientType<T> {
    pub const fn new(uid: &'static str) -> Self {
        Self {
            uid,
            _marker: PhantomData,
        }
    }

    /// Stable string id of this type.
    pub fn uid(&self) -> &'static str {
        self.uid
    }

    /// Rust type carried by ingredients of this type.
    pub fn ingredient_type_id(&self) -> TypeId {
        TypeId::of::<T>()
    }

    /// Returns true if `other` names the same ingredient type.
    pub fn matches<V: Ingredient>(&self, other: &IngredientType<V>) -> bool {
        self.uid == other.uid && TypeId::of::<T>() == TypeId::of::<V>()
    }

    /// Borrow `value` as `T` if it actually is one.
    pub fn cast_ref<'a>(&self, value: &'a dyn Any) -> Option<&'a T> {
        value.downcast_ref::<T>()
    }
}

// Manual impls: derives would put bounds on `T`.
impl<T> Clone for IngredientType<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for IngredientType<T> {}

impl<T: Ingredient> PartialEq for IngredientType<T> {
    fn eq(&self, other: &Self) -> bool {
        self.uid == other.uid
    }
}

impl<T: Ingredient> Eq for IngredientType<T> {}

impl<T: Ingredient> Hash for IngredientType<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uid.hash(state);
    }
}

impl<T> fmt::Debug for IngredientType<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IngredientType({})", self.uid)
    }
}

/// An ingredient type whose values have a coarser "base" ingredient,
/// e.g. an item stack's base is its item.
pub struct IngredientTypeWithSubtypes<B, T> {
    ingredient_type: IngredientType<T>,
    base: fn(&T) -> B,
}

impl<B, T: Ingredient> IngredientTypeWithSubtypes<B, T> {
    pub const fn new(uid: &'static str, base: fn(&T) -> B) -> Self {
        Self {
            ingredient_type: IngredientType::new(uid),
            base,
        }
    }

    pub fn ingredient_type(&self) -> &IngredientType<T> {
        &self.ingredient_type
    }

    /// Project an ingredient to its base ingredient.
    pub fn base(&self, ingredient: &T) -> B {
        (self.base)(ingredient)
    }
}

impl<B, T> fmt::Debug for IngredientTypeWithSubtypes<B, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngredientTypeWithSubtypes")
            .field("uid", &self.ingredient_type.uid)
            .finish()
    }
}
