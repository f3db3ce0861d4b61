use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use ingredient_common::{
    Argb, ChatColor, Ingredient, IngredientManager, IngredientType, PluginFault, TextLine,
    TypedIngredient,
};
use ingredient_render::{
    BatchRenderElement, DisplayOptions, DrawSurface, IngredientRenderer, NEUTRAL_TINT, TooltipFlag,
    TooltipSink,
};

use crate::config::ConfigSource;
use crate::crash::{ReportedCrash, create_ingredient_crash_report, log_ingredient_crash};
use crate::memory::{FailureMemory, FailureSummary, FaultKind, RendererKey};

pub const TOOLTIP_ERROR_KEY: &str = "jei.tooltip.error.crash";
pub const RENDER_ERROR_KEY: &str = "jei.tooltip.error.render.crash";

const TOOLTIP_CRASH_TITLE: &str = "Caught an error getting an Ingredient's tooltip";
const RENDER_CRASH_TITLE: &str = "Caught an error rendering an Ingredient";
const RENDER_REPORT_TITLE: &str = "Rendering ingredient";
const BATCH_CRASH_TITLE: &str = "Caught an error while rendering a batch of Ingredients";

/// Vertical offset of the second glyph line.
const ERROR_GLYPH_LINE_HEIGHT: i32 = 8;

/// Run plugin code, turning panics into runtime faults.
fn call_plugin(f: impl FnOnce() -> Result<(), PluginFault>) -> Result<(), PluginFault> {
    catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|p| Err(PluginFault::from_panic(p)))
}

/// Fault-isolation layer between the host and ingredient renderer plugins.
///
/// Every tooltip and draw call for plugin-supplied renderers goes through
/// one long-lived guard. A plugin that fails for an ingredient is never
/// called again for that (operation, ingredient) pair; the guard shows a
/// red fallback instead. Only single-render faults can escape, and only as
/// a [`ReportedCrash`] when the config does not ask for them to be caught.
pub struct IngredientGuard {
    memory: FailureMemory,
    ingredient_manager: Arc<dyn IngredientManager>,
    config: Box<dyn ConfigSource>,
}

impl IngredientGuard {
    pub fn new(
        ingredient_manager: Arc<dyn IngredientManager>,
        config: impl ConfigSource + 'static,
    ) -> Self {
        Self {
            memory: FailureMemory::new(),
            ingredient_manager,
            config: Box::new(config),
        }
    }

    pub fn set_config(&mut self, config: impl ConfigSource + 'static) {
        self.config = Box::new(config);
    }

    pub fn memory(&self) -> &FailureMemory {
        &self.memory
    }

    pub fn summary(&self) -> FailureSummary {
        self.memory.summary()
    }

    /// Forget all recorded failures, e.g. after the host reloads plugins.
    pub fn reset(&mut self) {
        let failures = self.memory.summary();
        tracing::info!(%failures, "resetting ingredient failure memory");
        self.memory.clear();
    }

    /// Build a tooltip using the host's display settings at creative detail.
    pub fn get_tooltip_for_display<T: Ingredient>(
        &mut self,
        sink: &mut dyn TooltipSink,
        ingredient_manager: &dyn IngredientManager,
        renderer: &dyn IngredientRenderer<T>,
        typed_ingredient: &TypedIngredient<T>,
        display: &DisplayOptions,
    ) {
        let flag = TooltipFlag::from_display(display);
        self.get_tooltip(sink, ingredient_manager, renderer, typed_ingredient, flag);
    }

    /// Append the renderer's tooltip for `typed_ingredient` to `sink`.
    ///
    /// Never fails: a faulting renderer is logged, blacklisted for this
    /// ingredient and replaced by an error line.
    pub fn get_tooltip<T: Ingredient>(
        &mut self,
        sink: &mut dyn TooltipSink,
        ingredient_manager: &dyn IngredientManager,
        renderer: &dyn IngredientRenderer<T>,
        typed_ingredient: &TypedIngredient<T>,
        flag: TooltipFlag,
    ) {
        let ingredient = typed_ingredient.ingredient();

        if self.memory.is_tooltip_crashing(ingredient) {
            add_tooltip_error(sink);
            return;
        }

        sink.set_ingredient(typed_ingredient);
        match call_plugin(|| renderer.tooltip(sink, ingredient, flag)) {
            Ok(()) => {
                // A renderer that cannot draw may still describe the ingredient wrongly.
                if self.memory.is_render_crashing(ingredient) {
                    add_render_error(sink);
                }
            }
            Err(fault) => {
                self.memory.record_tooltip_crash(ingredient);
                log_ingredient_crash(
                    &fault,
                    TOOLTIP_CRASH_TITLE,
                    ingredient_manager,
                    typed_ingredient.ingredient_type(),
                    ingredient,
                );
                add_tooltip_error(sink);
            }
        }
    }

    /// Draw a batch of ingredients that share one renderer.
    ///
    /// A failing batch draws nothing for that call and is never retried;
    /// later batches for the same renderer go through [`Self::render_element`]
    /// one element at a time. The guard keeps a handle to every failed
    /// renderer so its identity stays unique.
    pub fn render_batch<T, R>(
        &mut self,
        surface: &mut dyn DrawSurface,
        ingredient_type: &IngredientType<T>,
        renderer: &Arc<R>,
        elements: &[BatchRenderElement<T>],
    ) -> Result<(), ReportedCrash>
    where
        T: Ingredient,
        R: IngredientRenderer<T> + ?Sized + 'static,
    {
        let key = RendererKey::of::<T, R>(renderer);
        if self.memory.is_batch_crashing(&key) {
            for element in elements {
                self.render_element(surface, &**renderer, ingredient_type, element)?;
            }
            return Ok(());
        }

        if let Err(fault) = call_plugin(|| renderer.render_batch(surface, elements)) {
            self.memory.record_batch_crash::<T, R>(renderer);
            tracing::error!(
                renderer = key.name(),
                ingredient_type = ingredient_type.uid(),
                elements = elements.len(),
                fault = %fault,
                linkage = fault.is_linkage(),
                "{BATCH_CRASH_TITLE}"
            );
        }
        Ok(())
    }

    pub fn render_typed<T, R>(
        &mut self,
        surface: &mut dyn DrawSurface,
        renderer: &R,
        typed_ingredient: &TypedIngredient<T>,
        x: i32,
        y: i32,
    ) -> Result<(), ReportedCrash>
    where
        T: Ingredient,
        R: IngredientRenderer<T> + ?Sized,
    {
        self.render(
            surface,
            renderer,
            typed_ingredient.ingredient_type(),
            typed_ingredient.ingredient(),
            x,
            y,
        )
    }

    pub fn render_element<T, R>(
        &mut self,
        surface: &mut dyn DrawSurface,
        renderer: &R,
        ingredient_type: &IngredientType<T>,
        element: &BatchRenderElement<T>,
    ) -> Result<(), ReportedCrash>
    where
        T: Ingredient,
        R: IngredientRenderer<T> + ?Sized,
    {
        let BatchRenderElement { ingredient, x, y } = element;
        self.render(surface, renderer, ingredient_type, ingredient, *x, *y)
    }

    /// Draw one ingredient at (x, y).
    ///
    /// On a renderer fault the ingredient is blacklisted. With
    /// catch-render-errors on, the fault is logged and the error glyph drawn;
    /// otherwise a crash report is returned and nothing is drawn.
    pub fn render<T, R>(
        &mut self,
        surface: &mut dyn DrawSurface,
        renderer: &R,
        ingredient_type: &IngredientType<T>,
        ingredient: &T,
        x: i32,
        y: i32,
    ) -> Result<(), ReportedCrash>
    where
        T: Ingredient,
        R: IngredientRenderer<T> + ?Sized,
    {
        if self.memory.is_render_crashing(ingredient) {
            render_error(surface, x, y);
            return Ok(());
        }

        let Err(fault) = call_plugin(|| renderer.render(surface, ingredient, x, y)) else {
            return Ok(());
        };
        self.memory.record_render_crash(ingredient);

        let manager = self.ingredient_manager.as_ref();
        if self.config.catch_render_errors() {
            let title = RENDER_CRASH_TITLE;
            log_ingredient_crash(&fault, title, manager, ingredient_type, ingredient);
            render_error(surface, x, y);
            Ok(())
        } else {
            let report = create_ingredient_crash_report(
                fault,
                FaultKind::SingleRender,
                RENDER_REPORT_TITLE,
                manager,
                ingredient_type,
                ingredient,
            );
            tracing::warn!(%report, "render errors are not caught");
            Err(ReportedCrash::new(report))
        }
    }
}

impl std::fmt::Debug for IngredientGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngredientGuard")
            .field("memory", &self.memory)
            .field("catch_render_errors", &self.config.catch_render_errors())
            .finish()
    }
}

fn add_tooltip_error(sink: &mut dyn TooltipSink) {
    let line = TextLine::translatable(TOOLTIP_ERROR_KEY).with_color(ChatColor::Red);
    sink.add(line);
}

fn add_render_error(sink: &mut dyn TooltipSink) {
    let line = TextLine::translatable(RENDER_ERROR_KEY).with_color(ChatColor::Red);
    sink.add(line);
}

/// Draw the two-line "ERR"/"OR" glyph anchored at (x, y), then put the
/// shader tint back to neutral.
pub fn render_error(surface: &mut dyn DrawSurface, x: i32, y: i32) {
    surface.draw_text("ERR", x, y, Argb::RED);
    surface.draw_text("OR", x, y + ERROR_GLYPH_LINE_HEIGHT, Argb::RED);
    surface.set_shader_color(NEUTRAL_TINT);
}
