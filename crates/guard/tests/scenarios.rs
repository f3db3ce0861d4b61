//! End-to-end fault containment with a real ingredient registry.

use std::cell::Cell;
use std::sync::Arc;

use ingredient_common::{
    Argb, FLUID_STACK, FluidStack, ITEM_STACK, IngredientManager, ItemStack, PluginFault,
    TextLine, Translations, TypedIngredient,
};
use ingredient_guard::{
    ClientConfig, FaultKind, IngredientGuard, RENDER_ERROR_KEY, TOOLTIP_ERROR_KEY,
};
use ingredient_registry::{FluidStackHelper, IngredientRegistry, ItemStackHelper};
use ingredient_render::{
    BatchRenderElement, DrawCommand, DrawSurface, IngredientRenderer, RecordingSurface,
    TooltipFlag, TooltipLines, TooltipSink,
};

/// Item renderer that cannot draw `minecraft:bad_item` and has a broken
/// batch path.
#[derive(Default)]
struct ItemRenderer {
    renders: Cell<usize>,
    batches: Cell<usize>,
    tooltips: Cell<usize>,
}

impl IngredientRenderer<ItemStack> for ItemRenderer {
    fn render(
        &self,
        surface: &mut dyn DrawSurface,
        stack: &ItemStack,
        x: i32,
        y: i32,
    ) -> Result<(), PluginFault> {
        self.renders.set(self.renders.get() + 1);
        if stack.item == "minecraft:bad_item" {
            return Err(PluginFault::runtime("model not baked"));
        }
        surface.fill(x, y, 16, 16, Argb::WHITE);
        Ok(())
    }

    fn render_batch(
        &self,
        _: &mut dyn DrawSurface,
        _: &[BatchRenderElement<ItemStack>],
    ) -> Result<(), PluginFault> {
        self.batches.set(self.batches.get() + 1);
        Err(PluginFault::linkage("renderBatch not found"))
    }

    fn tooltip(
        &self,
        sink: &mut dyn TooltipSink,
        stack: &ItemStack,
        flag: TooltipFlag,
    ) -> Result<(), PluginFault> {
        self.tooltips.set(self.tooltips.get() + 1);
        if stack.item == "minecraft:bad_tooltip" {
            panic!("tooltip component was null");
        }
        sink.add(TextLine::literal(stack.item.clone()));
        if flag.advanced {
            sink.add(TextLine::literal(format!("count: {}", stack.count)));
        }
        Ok(())
    }
}

struct FluidRenderer;

impl IngredientRenderer<FluidStack> for FluidRenderer {
    fn render(
        &self,
        surface: &mut dyn DrawSurface,
        fluid: &FluidStack,
        x: i32,
        y: i32,
    ) -> Result<(), PluginFault> {
        surface.draw_text(&fluid.fluid, x, y, Argb::WHITE);
        Ok(())
    }

    fn tooltip(
        &self,
        sink: &mut dyn TooltipSink,
        fluid: &FluidStack,
        _: TooltipFlag,
    ) -> Result<(), PluginFault> {
        sink.add(TextLine::literal(format!("{} mB", fluid.amount)));
        Ok(())
    }
}

struct Host {
    registry: Arc<IngredientRegistry>,
    items: Arc<ItemRenderer>,
}

fn host() -> Host {
    let items = Arc::new(ItemRenderer::default());
    let mut registry = IngredientRegistry::new();
    registry
        .register(ITEM_STACK, "Items", ItemStackHelper, items.clone())
        .unwrap();
    let fluids = Arc::new(FluidRenderer);
    registry
        .register(FLUID_STACK, "Fluids", FluidStackHelper, fluids)
        .unwrap();
    Host {
        registry: Arc::new(registry),
        items,
    }
}

fn guard(host: &Host, config: Option<ClientConfig>) -> IngredientGuard {
    IngredientGuard::new(host.registry.clone(), config)
}

fn item(host: &Host, id: &str, count: u32) -> TypedIngredient<ItemStack> {
    let stack = ItemStack::new(id, count);
    host.registry
        .create_typed_ingredient(ITEM_STACK, stack)
        .unwrap()
}

#[test]
fn failing_render_is_drawn_as_error_glyph_and_never_retried() {
    let host = host();
    let mut guard = guard(&host, Some(ClientConfig::default()));
    let renderer = host.registry.renderer(&ITEM_STACK).unwrap();
    let bad = item(&host, "minecraft:bad_item", 1);

    let mut surface = RecordingSurface::new();
    guard
        .render_typed(&mut surface, &*renderer, &bad, 32, 48)
        .unwrap();
    let first = surface.take_commands();
    assert_eq!(first.len(), 3);
    assert_eq!(surface.shader_color(), glam::Vec4::ONE);

    guard
        .render_typed(&mut surface, &*renderer, &bad, 32, 48)
        .unwrap();
    assert_eq!(surface.take_commands(), first);
    assert_eq!(host.items.renders.get(), 1);
}

#[test]
fn uncaught_render_fault_carries_registry_context() {
    let host = host();
    let mut guard = guard(&host, None);
    let renderer = host.registry.renderer(&ITEM_STACK).unwrap();
    let bad = ItemStack::new("minecraft:bad_item", 1);
    let mut surface = RecordingSurface::new();

    let crash = guard
        .render(&mut surface, &*renderer, &ITEM_STACK, &bad, 0, 0)
        .unwrap_err();

    let report = crash.report();
    assert_eq!(report.kind, FaultKind::SingleRender);
    let category = report.category("Ingredient").unwrap();
    let type_name = category.detail("Ingredient Type");
    assert_eq!(type_name, Some("Items (item_stack)"));
    assert_eq!(
        category.detail("Ingredient Info 1"),
        Some("Unique Id: minecraft:bad_item")
    );
    assert!(report.full_report().contains("model not baked"));
}

#[test]
fn batch_failure_falls_back_from_the_next_call() {
    let host = host();
    let mut guard = guard(&host, Some(ClientConfig::default()));
    let renderer = host.registry.renderer(&ITEM_STACK).unwrap();
    let elements = vec![
        BatchRenderElement::new(ItemStack::new("minecraft:a", 1), 0, 0),
        BatchRenderElement::new(ItemStack::new("minecraft:b", 1), 5, 5),
    ];
    let mut surface = RecordingSurface::new();

    guard
        .render_batch(&mut surface, &ITEM_STACK, &renderer, &elements)
        .unwrap();
    assert!(surface.commands().is_empty());

    guard
        .render_batch(&mut surface, &ITEM_STACK, &renderer, &elements)
        .unwrap();
    let fills: Vec<_> = surface
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Fill { pos, .. } => Some((pos.x, pos.y)),
            _ => None,
        })
        .collect();
    assert_eq!(fills, vec![(0, 0), (5, 5)]);
    assert_eq!(host.items.batches.get(), 1);
    assert_eq!(guard.summary().batch_renderers, 1);
}

#[test]
fn panicking_tooltip_is_contained_per_ingredient() {
    let host = host();
    let mut guard = guard(&host, None);
    let renderer = host.registry.renderer(&ITEM_STACK).unwrap();
    let manager: &dyn IngredientManager = &*host.registry;
    let tr = Translations::new();

    let bad = item(&host, "minecraft:bad_tooltip", 1);
    let good = item(&host, "minecraft:stone", 2);

    for _ in 0..3 {
        let mut tooltip = TooltipLines::new();
        let flag = TooltipFlag::NORMAL;
        guard.get_tooltip(&mut tooltip, manager, &*renderer, &bad, flag);
        assert_eq!(tooltip.to_strings(&tr), vec![TOOLTIP_ERROR_KEY]);
    }
    assert_eq!(host.items.tooltips.get(), 1);

    let mut tooltip = TooltipLines::new();
    let flag = TooltipFlag::ADVANCED;
    guard.get_tooltip(&mut tooltip, manager, &*renderer, &good, flag);
    assert_eq!(tooltip.to_strings(&tr), vec!["minecraft:stone", "count: 2"]);
}

#[test]
fn render_failure_shows_in_tooltip_of_same_ingredient() {
    let host = host();
    let mut guard = guard(&host, Some(ClientConfig::default()));
    let renderer = host.registry.renderer(&ITEM_STACK).unwrap();
    let bad = item(&host, "minecraft:bad_item", 1);

    let mut surface = RecordingSurface::new();
    guard
        .render_typed(&mut surface, &*renderer, &bad, 0, 0)
        .unwrap();

    let mut translations = Translations::new();
    translations.insert(RENDER_ERROR_KEY, "Rendering error, see log");
    let mut tooltip = TooltipLines::new();
    guard.get_tooltip(
        &mut tooltip,
        &*host.registry,
        &*renderer,
        &bad,
        TooltipFlag::NORMAL,
    );
    assert_eq!(
        tooltip.to_strings(&translations),
        vec!["minecraft:bad_item", "Rendering error, see log"]
    );
}

#[test]
fn other_ingredient_types_are_unaffected() {
    let host = host();
    let mut guard = guard(&host, Some(ClientConfig::default()));
    let items = host.registry.renderer(&ITEM_STACK).unwrap();
    let fluids = host.registry.renderer(&FLUID_STACK).unwrap();
    let bad = ItemStack::new("minecraft:bad_item", 1);
    let water = FluidStack::new("minecraft:water", 1000);
    let mut surface = RecordingSurface::new();

    guard
        .render(&mut surface, &*items, &ITEM_STACK, &bad, 0, 0)
        .unwrap();
    surface.take_commands();

    guard
        .render(&mut surface, &*fluids, &FLUID_STACK, &water, 0, 0)
        .unwrap();
    assert_eq!(surface.texts(), vec![("minecraft:water", 0, 0)]);
}
