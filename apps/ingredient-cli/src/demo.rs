use std::sync::Arc;

use anyhow::Result;
use ingredient_common::{
    Argb, ChatColor, FLUID_STACK, FluidStack, ITEM_STACK, ItemStack, PluginFault, TextLine,
    Translations, TypedIngredient,
};
use ingredient_guard::{ClientConfig, IngredientGuard};
use ingredient_registry::{FluidStackHelper, IngredientRegistry, ItemStackHelper};
use ingredient_render::{
    BatchRenderElement, DisplayOptions, DrawSurface, IngredientRenderer, RecordingSurface,
    TooltipFlag, TooltipLines, TooltipSink,
};

const GLITCHED_ITEM: &str = "minecraft:glitched_ore";
const CURSED_ITEM: &str = "minecraft:cursed_book";
const SLOT_SIZE: i32 = 18;

/// A plugin item renderer with three classic bugs: one item it cannot draw,
/// one item whose tooltip panics, and a batch path built against an older
/// host API.
struct BuggyItemRenderer;

impl IngredientRenderer<ItemStack> for BuggyItemRenderer {
    fn render(
        &self,
        surface: &mut dyn DrawSurface,
        stack: &ItemStack,
        x: i32,
        y: i32,
    ) -> Result<(), PluginFault> {
        if stack.item == GLITCHED_ITEM {
            let message = format!("no baked model for {}", stack.item);
            return Err(PluginFault::runtime(message));
        }
        surface.fill(x, y, self.width(), self.height(), Argb(0xFF8B_8B8B));
        if stack.count > 1 {
            surface.draw_text(&stack.count.to_string(), x + 11, y + 9, Argb::WHITE);
        }
        Ok(())
    }

    fn render_batch(
        &self,
        _: &mut dyn DrawSurface,
        _: &[BatchRenderElement<ItemStack>],
    ) -> Result<(), PluginFault> {
        let missing = "method renderBatch(GuiGraphics, List) not found";
        Err(PluginFault::linkage(missing))
    }

    fn tooltip(
        &self,
        sink: &mut dyn TooltipSink,
        stack: &ItemStack,
        flag: TooltipFlag,
    ) -> Result<(), PluginFault> {
        if stack.item == CURSED_ITEM {
            panic!("enchantment list was empty");
        }
        sink.add(TextLine::literal(stack.item.clone()));
        if flag.advanced {
            let count = TextLine::literal(format!("count: {}", stack.count));
            sink.add(count.with_color(ChatColor::DarkGray));
        }
        Ok(())
    }
}

struct FluidRenderer;

impl IngredientRenderer<FluidStack> for FluidRenderer {
    fn render(
        &self,
        surface: &mut dyn DrawSurface,
        _: &FluidStack,
        x: i32,
        y: i32,
    ) -> Result<(), PluginFault> {
        surface.fill(x, y, self.width(), self.height(), Argb(0xFF3F_76E4));
        Ok(())
    }

    fn tooltip(
        &self,
        sink: &mut dyn TooltipSink,
        fluid: &FluidStack,
        _: TooltipFlag,
    ) -> Result<(), PluginFault> {
        let amount = TextLine::literal(format!("{} mB", fluid.amount));
        sink.add(TextLine::literal(fluid.fluid.clone()));
        sink.add(amount.with_color(ChatColor::Gray));
        Ok(())
    }
}

pub struct DemoOptions {
    pub config: Option<ClientConfig>,
    pub frames: u32,
    pub advanced_tooltips: bool,
}

fn build_registry() -> Result<IngredientRegistry> {
    let mut registry = IngredientRegistry::new();
    let items = Arc::new(BuggyItemRenderer);
    let fluids = Arc::new(FluidRenderer);
    registry.register(ITEM_STACK, "Items", ItemStackHelper, items)?;
    registry.register(FLUID_STACK, "Fluids", FluidStackHelper, fluids)?;
    Ok(registry)
}

fn print_tooltip(tooltip: &TooltipLines, translations: &Translations) {
    for line in tooltip.to_strings(translations) {
        println!("    | {line}");
    }
}

/// Draw and describe a small ingredient grid for several frames, printing
/// what reaches the surface and the tooltips.
pub fn run(options: &DemoOptions, translations: &Translations) -> Result<()> {
    let registry = Arc::new(build_registry()?);
    let mut guard = IngredientGuard::new(registry.clone(), options.config);
    let display = DisplayOptions {
        advanced_item_tooltips: options.advanced_tooltips,
    };

    let items: Vec<TypedIngredient<ItemStack>> = [
        ItemStack::new("minecraft:stone", 64),
        ItemStack::new(GLITCHED_ITEM, 1),
        ItemStack::new(CURSED_ITEM, 1),
    ]
    .into_iter()
    .map(|stack| registry.create_typed_ingredient(ITEM_STACK, stack))
    .collect::<Result<_, _>>()?;
    let water = FluidStack::new("minecraft:water", 1000);
    let water = registry.create_typed_ingredient(FLUID_STACK, water)?;

    let elements: Vec<BatchRenderElement<ItemStack>> = items
        .iter()
        .zip(0..)
        .map(|(typed, slot)| {
            BatchRenderElement::new(typed.ingredient().clone(), slot * SLOT_SIZE, 0)
        })
        .collect();

    let item_renderer = registry
        .renderer(&ITEM_STACK)
        .ok_or_else(|| anyhow::anyhow!("no renderer for {}", ITEM_STACK.uid()))?;
    let fluid_renderer = registry
        .renderer(&FLUID_STACK)
        .ok_or_else(|| anyhow::anyhow!("no renderer for {}", FLUID_STACK.uid()))?;

    let mut surface = RecordingSurface::new();
    for frame in 1..=options.frames {
        println!("=== Frame {frame} ===");

        let drawn = guard
            .render_batch(&mut surface, &ITEM_STACK, &item_renderer, &elements)
            .and_then(|()| {
                guard.render_typed(&mut surface, &*fluid_renderer, &water, 0, SLOT_SIZE)
            });
        if let Err(crash) = drawn {
            eprintln!("{}", crash.report().full_report());
            return Err(crash.into());
        }

        print!("{}", surface.describe());
        surface.take_commands();

        for typed in &items {
            let mut tooltip = TooltipLines::new();
            guard.get_tooltip_for_display(
                &mut tooltip,
                &*registry,
                &*item_renderer,
                typed,
                &display,
            );
            println!("  tooltip {}:", typed.ingredient().item);
            print_tooltip(&tooltip, translations);
        }
        let mut tooltip = TooltipLines::new();
        guard.get_tooltip_for_display(
            &mut tooltip,
            &*registry,
            &*fluid_renderer,
            &water,
            &display,
        );
        println!("  tooltip {}:", water.ingredient().fluid);
        print_tooltip(&tooltip, translations);

        println!("{}", guard.summary());
    }

    Ok(())
}
