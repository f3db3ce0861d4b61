use std::any::Any;

/// Read-only view of the ingredient registry.
///
/// The isolation layer only uses it to enrich crash logs and reports, so
/// every method must answer for unknown types or values instead of failing.
pub trait IngredientManager {
    /// Whether a type with this uid is registered.
    fn is_registered(&self, type_uid: &str) -> bool;

    /// Human-readable name of a registered type.
    fn type_display_name(&self, type_uid: &str) -> Option<String>;

    /// Diagnostic lines describing `ingredient` of the given type.
    fn ingredient_info(&self, type_uid: &str, ingredient: &dyn Any) -> Vec<String>;
}

/// Manager that knows no types. Useful before the registry is built.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyIngredientManager;

impl IngredientManager for EmptyIngredientManager {
    fn is_registered(&self, _type_uid: &str) -> bool {
        false
    }

    fn type_display_name(&self, _type_uid: &str) -> Option<String> {
        None
    }

    fn ingredient_info(&self, type_uid: &str, _ingredient: &dyn Any) -> Vec<String> {
        vec![format!("unregistered ingredient type: {type_uid}")]
    }
}
