use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;

use ingredient_common::{Ingredient, IngredientManager, IngredientType, TypedIngredient};
use ingredient_render::IngredientRenderer;

use crate::helper::IngredientHelper;

/// Errors from registering types or creating typed ingredients.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("ingredient type already registered: {0}")]
    DuplicateType(&'static str),
    #[error("ingredient type not registered: {0}")]
    UnknownType(&'static str),
    #[error("ingredient type {0} is registered with a different value type")]
    TypeMismatch(&'static str),
    #[error("invalid ingredient for type {uid}: {info}")]
    InvalidIngredient { uid: &'static str, info: String },
}

struct TypeEntry<T: Ingredient> {
    display_name: String,
    helper: Box<dyn IngredientHelper<T>>,
    renderer: Arc<dyn IngredientRenderer<T>>,
}

/// Type-erased access to a [`TypeEntry`].
trait RegisteredType {
    fn as_any(&self) -> &dyn Any;

    fn display_name(&self) -> &str;

    /// `None` when `ingredient` is not this type's value type.
    fn describe(&self, ingredient: &dyn Any) -> Option<Vec<String>>;
}

impl<T: Ingredient> RegisteredType for TypeEntry<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn describe(&self, ingredient: &dyn Any) -> Option<Vec<String>> {
        let ingredient = ingredient.downcast_ref::<T>()?;
        Some(vec![
            format!("Unique Id: {}", self.helper.unique_id(ingredient)),
            format!("Display Name: {}", self.helper.display_name(ingredient)),
            format!("Info: {}", self.helper.error_info(ingredient)),
            format!("Renderer: {}", self.renderer.renderer_name()),
        ])
    }
}

/// The set of ingredient types known to the host, with their helpers and
/// renderers.
///
/// Uses BTreeMap so listings come out in uid order.
#[derive(Default)]
pub struct IngredientRegistry {
    types: BTreeMap<&'static str, Box<dyn RegisteredType>>,
}

impl IngredientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an ingredient type. Each uid can be registered once.
    pub fn register<T: Ingredient>(
        &mut self,
        ingredient_type: IngredientType<T>,
        display_name: impl Into<String>,
        helper: impl IngredientHelper<T> + 'static,
        renderer: Arc<dyn IngredientRenderer<T>>,
    ) -> Result<(), RegistryError> {
        let uid = ingredient_type.uid();
        if self.types.contains_key(uid) {
            return Err(RegistryError::DuplicateType(uid));
        }
        tracing::debug!(
            ingredient_type = uid,
            renderer = renderer.renderer_name(),
            "registered ingredient type"
        );
        self.types.insert(
            uid,
            Box::new(TypeEntry {
                display_name: display_name.into(),
                helper: Box::new(helper),
                renderer,
            }),
        );
        Ok(())
    }

    fn entry<T: Ingredient>(
        &self,
        ingredient_type: &IngredientType<T>,
    ) -> Result<&TypeEntry<T>, RegistryError> {
        let uid = ingredient_type.uid();
        let entry = self.types.get(uid).ok_or(RegistryError::UnknownType(uid))?;
        entry
            .as_any()
            .downcast_ref::<TypeEntry<T>>()
            .ok_or(RegistryError::TypeMismatch(uid))
    }

    /// Pair a value with its type after checking both.
    pub fn create_typed_ingredient<T: Ingredient>(
        &self,
        ingredient_type: IngredientType<T>,
        ingredient: T,
    ) -> Result<TypedIngredient<T>, RegistryError> {
        let entry = self.entry(&ingredient_type)?;
        if !entry.helper.is_valid(&ingredient) {
            return Err(RegistryError::InvalidIngredient {
                uid: ingredient_type.uid(),
                info: entry.helper.error_info(&ingredient),
            });
        }
        Ok(TypedIngredient::new_unchecked(ingredient_type, ingredient))
    }

    /// Renderer registered for a type.
    pub fn renderer<T: Ingredient>(
        &self,
        ingredient_type: &IngredientType<T>,
    ) -> Option<Arc<dyn IngredientRenderer<T>>> {
        self.entry(ingredient_type)
            .ok()
            .map(|e| Arc::clone(&e.renderer))
    }

    /// Registered type uids in order.
    pub fn type_uids(&self) -> Vec<&'static str> {
        self.types.keys().copied().collect()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }
}

impl IngredientManager for IngredientRegistry {
    fn is_registered(&self, type_uid: &str) -> bool {
        self.types.contains_key(type_uid)
    }

    fn type_display_name(&self, type_uid: &str) -> Option<String> {
        self.types
            .get(type_uid)
            .map(|t| t.display_name().to_string())
    }

    fn ingredient_info(&self, type_uid: &str, ingredient: &dyn Any) -> Vec<String> {
        let Some(entry) = self.types.get(type_uid) else {
            return vec![format!("unregistered ingredient type: {type_uid}")];
        };
        let mismatch = format!("value does not belong to ingredient type {type_uid}");
        entry.describe(ingredient).unwrap_or_else(|| vec![mismatch])
    }
}

impl std::fmt::Debug for IngredientRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngredientRegistry")
            .field("types", &self.type_uids())
            .finish()
    }
}
