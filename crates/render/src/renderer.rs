use ingredient_common::{Ingredient, PluginFault};

use crate::surface::DrawSurface;
use crate::tooltip::{TooltipFlag, TooltipSink};

/// One ingredient positioned for a batched draw.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BatchRenderElement<T> {
    pub ingredient: T,
    pub x: i32,
    pub y: i32,
}

impl<T> BatchRenderElement<T> {
    pub fn new(ingredient: T, x: i32, y: i32) -> Self {
        Self { ingredient, x, y }
    }
}

/// Plugin-supplied drawing and tooltip logic for one ingredient type.
///
/// One renderer instance serves every ingredient of its type. Implementations
/// are third-party code: callers must treat every method as fallible and may
/// also see panics.
pub trait IngredientRenderer<T: Ingredient> {
    /// Draw one ingredient with its top-left corner at (x, y).
    fn render(
        &self,
        surface: &mut dyn DrawSurface,
        ingredient: &T,
        x: i32,
        y: i32,
    ) -> Result<(), PluginFault>;

    /// Draw many ingredients at once. Renderers that can share setup between
    /// draws override this.
    fn render_batch(
        &self,
        surface: &mut dyn DrawSurface,
        elements: &[BatchRenderElement<T>],
    ) -> Result<(), PluginFault> {
        for element in elements {
            self.render(surface, &element.ingredient, element.x, element.y)?;
        }
        Ok(())
    }

    /// Append tooltip lines describing `ingredient`.
    fn tooltip(
        &self,
        sink: &mut dyn TooltipSink,
        ingredient: &T,
        flag: TooltipFlag,
    ) -> Result<(), PluginFault>;

    fn width(&self) -> i32 {
        16
    }

    fn height(&self) -> i32 {
        16
    }

    /// Name used in logs, the concrete renderer type by default.
    fn renderer_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
