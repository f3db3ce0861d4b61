//! Rendering contracts for ingredient plugins.
//!
//! # Invariants
//! - Renderers draw only through a [`DrawSurface`] and never own host state.
//! - Tooltip sinks are append-only.

mod renderer;
mod surface;
mod tooltip;

pub use renderer::{BatchRenderElement, IngredientRenderer};
pub use surface::{DrawCommand, DrawSurface, NEUTRAL_TINT, RecordingSurface};
pub use tooltip::{DisplayOptions, TooltipFlag, TooltipLines, TooltipSink};

pub fn crate_info() -> &'static str {
    "ingredient-render v0.1.0"
}
