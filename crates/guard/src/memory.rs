use std::any::{Any, TypeId};
use std::borrow::Borrow;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use ingredient_common::Ingredient;
use ingredient_render::IngredientRenderer;

/// Which plugin operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// Building an ingredient's tooltip.
    Tooltip,
    /// Drawing one ingredient.
    SingleRender,
    /// Drawing a batch of ingredients with one renderer.
    BatchRender,
}

impl FaultKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Tooltip => "tooltip",
            Self::SingleRender => "render",
            Self::BatchRender => "batch render",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Object-safe equality and hashing over any ingredient value.
trait DynKey: fmt::Debug {
    fn as_any(&self) -> &dyn Any;

    fn dyn_eq(&self, other: &dyn DynKey) -> bool;

    fn dyn_hash(&self, state: &mut dyn Hasher);
}

impl<T: Ingredient> DynKey for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn DynKey) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|o| o == self)
    }

    fn dyn_hash(&self, mut state: &mut dyn Hasher) {
        TypeId::of::<T>().hash(&mut state);
        self.hash(&mut state);
    }
}

impl PartialEq for dyn DynKey {
    fn eq(&self, other: &Self) -> bool {
        self.dyn_eq(other)
    }
}

impl Eq for dyn DynKey {}

impl Hash for dyn DynKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dyn_hash(state);
    }
}

/// Owned, type-erased ingredient used as a set key. Values of different
/// Rust types never compare equal.
#[derive(Debug)]
struct IngredientKey(Box<dyn DynKey>);

impl IngredientKey {
    fn new<T: Ingredient>(ingredient: &T) -> Self {
        Self(Box::new(ingredient.clone()))
    }
}

impl PartialEq for IngredientKey {
    fn eq(&self, other: &Self) -> bool {
        *self.0 == *other.0
    }
}

impl Eq for IngredientKey {}

impl Hash for IngredientKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

// Lets lookups borrow the caller's ingredient instead of cloning it.
impl Borrow<dyn DynKey> for IngredientKey {
    fn borrow(&self) -> &(dyn DynKey + 'static) {
        self.0.as_ref()
    }
}

/// Identity of one shared renderer instance: its allocation plus its
/// concrete type.
///
/// Only stable while the allocation is alive; [`FailureMemory`] holds a
/// handle to every renderer it keys so the address cannot be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RendererKey {
    addr: usize,
    name: &'static str,
}

impl RendererKey {
    pub fn of<T, R>(renderer: &Arc<R>) -> Self
    where
        T: Ingredient,
        R: IngredientRenderer<T> + ?Sized,
    {
        Self {
            addr: Arc::as_ptr(renderer).cast::<()>() as usize,
            name: renderer.renderer_name(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Everything known to have crashed, per operation kind.
///
/// Sets only grow: once a key is recorded the plugin is never called again
/// for that operation until [`FailureMemory::clear`].
#[derive(Debug, Default)]
pub struct FailureMemory {
    tooltips: HashSet<IngredientKey>,
    renders: HashSet<IngredientKey>,
    /// Failed batch renderers, each kept alive by its handle.
    batch_renderers: HashMap<RendererKey, Box<dyn Any>>,
}

impl FailureMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_tooltip_crashing<T: Ingredient>(&self, ingredient: &T) -> bool {
        self.tooltips.contains(ingredient as &(dyn DynKey + 'static))
    }

    pub fn is_render_crashing<T: Ingredient>(&self, ingredient: &T) -> bool {
        self.renders.contains(ingredient as &(dyn DynKey + 'static))
    }

    pub fn is_batch_crashing(&self, renderer: &RendererKey) -> bool {
        self.batch_renderers.contains_key(renderer)
    }

    /// Remember a tooltip failure. Returns false if it was already known.
    pub fn record_tooltip_crash<T: Ingredient>(&mut self, ingredient: &T) -> bool {
        let added = self.tooltips.insert(IngredientKey::new(ingredient));
        if added {
            tracing::debug!(ingredient = ?ingredient, "tooltip blacklisted");
        }
        added
    }

    /// Remember a single-render failure. Returns false if it was already known.
    pub fn record_render_crash<T: Ingredient>(&mut self, ingredient: &T) -> bool {
        let added = self.renders.insert(IngredientKey::new(ingredient));
        if added {
            tracing::debug!(ingredient = ?ingredient, "render blacklisted");
        }
        added
    }

    /// Remember a batch-render failure, retaining the renderer. Returns false
    /// if it was already known.
    pub fn record_batch_crash<T, R>(&mut self, renderer: &Arc<R>) -> bool
    where
        T: Ingredient,
        R: IngredientRenderer<T> + ?Sized + 'static,
    {
        let key = RendererKey::of::<T, R>(renderer);
        match self.batch_renderers.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(Box::new(Arc::clone(renderer)));
                tracing::debug!(renderer = key.name(), "batch renderer blacklisted");
                true
            }
        }
    }

    pub fn count(&self, kind: FaultKind) -> usize {
        match kind {
            FaultKind::Tooltip => self.tooltips.len(),
            FaultKind::SingleRender => self.renders.len(),
            FaultKind::BatchRender => self.batch_renderers.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tooltips.is_empty() && self.renders.is_empty() && self.batch_renderers.is_empty()
    }

    /// Forget every recorded failure.
    pub fn clear(&mut self) {
        self.tooltips.clear();
        self.renders.clear();
        self.batch_renderers.clear();
    }

    pub fn summary(&self) -> FailureSummary {
        FailureSummary {
            tooltips: self.tooltips.len(),
            renders: self.renders.len(),
            batch_renderers: self.batch_renderers.len(),
        }
    }
}

/// Counts of blacklisted keys, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FailureSummary {
    pub tooltips: usize,
    pub renders: usize,
    pub batch_renderers: usize,
}

impl fmt::Display for FailureSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failures: tooltips={} renders={} batch_renderers={}",
            self.tooltips, self.renders, self.batch_renderers
        )
    }
}
