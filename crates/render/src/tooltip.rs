use ingredient_common::{AnyTypedIngredient, TextLine, Translations};

/// How much detail a tooltip should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TooltipFlag {
    /// Show registry names and other debug detail.
    pub advanced: bool,
    /// Show creative-mode detail.
    pub creative: bool,
}

impl TooltipFlag {
    pub const NORMAL: TooltipFlag = TooltipFlag {
        advanced: false,
        creative: false,
    };
    pub const ADVANCED: TooltipFlag = TooltipFlag {
        advanced: true,
        creative: false,
    };

    #[must_use]
    pub fn as_creative(self) -> Self {
        Self {
            creative: true,
            ..self
        }
    }

    /// Flag for the host's current display settings, at creative detail.
    pub fn from_display(options: &DisplayOptions) -> Self {
        let flag = if options.advanced_item_tooltips {
            Self::ADVANCED
        } else {
            Self::NORMAL
        };
        flag.as_creative()
    }
}

/// Host display settings that influence tooltips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayOptions {
    pub advanced_item_tooltips: bool,
}

/// Ordered, append-only tooltip line buffer.
pub trait TooltipSink {
    fn add(&mut self, line: TextLine);

    fn add_all(&mut self, lines: Vec<TextLine>) {
        for line in lines {
            self.add(line);
        }
    }

    /// Record which ingredient this tooltip describes.
    fn set_ingredient(&mut self, ingredient: &dyn AnyTypedIngredient);
}

/// Plain in-memory tooltip.
#[derive(Debug, Clone, Default)]
pub struct TooltipLines {
    lines: Vec<TextLine>,
    ingredient: Option<Box<dyn AnyTypedIngredient>>,
}

impl TooltipLines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[TextLine] {
        &self.lines
    }

    pub fn ingredient(&self) -> Option<&dyn AnyTypedIngredient> {
        self.ingredient.as_deref()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Resolve every line to display text.
    pub fn to_strings(&self, translations: &Translations) -> Vec<String> {
        self.lines.iter().map(|l| l.resolve(translations)).collect()
    }
}

impl TooltipSink for TooltipLines {
    fn add(&mut self, line: TextLine) {
        self.lines.push(line);
    }

    fn set_ingredient(&mut self, ingredient: &dyn AnyTypedIngredient) {
        self.ingredient = Some(ingredient.clone_boxed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ingredient_common::{ITEM_STACK, ItemStack, TypedIngredient};

    #[test]
    fn flag_from_display_is_always_creative() {
        let normal = TooltipFlag::from_display(&DisplayOptions::default());
        assert!(normal.creative);
        assert!(!normal.advanced);

        let advanced = TooltipFlag::from_display(&DisplayOptions {
            advanced_item_tooltips: true,
        });
        assert_eq!(advanced, TooltipFlag::ADVANCED.as_creative());
    }

    #[test]
    fn lines_keep_insertion_order() {
        let mut tooltip = TooltipLines::new();
        tooltip.add(TextLine::literal("one"));
        tooltip.add_all(vec![TextLine::literal("two"), TextLine::literal("three")]);
        assert_eq!(
            tooltip.to_strings(&Translations::new()),
            vec!["one", "two", "three"]
        );
    }

    #[test]
    fn subject_is_recorded() {
        let mut tooltip = TooltipLines::new();
        assert!(tooltip.ingredient().is_none());

        let stone = ItemStack::new("minecraft:stone", 1);
        let stone = TypedIngredient::new_unchecked(ITEM_STACK, stone);
        tooltip.set_ingredient(&stone);
        let subject = tooltip.ingredient().and_then(|i| i.item_stack());
        assert_eq!(subject, Some(ItemStack::new("minecraft:stone", 1)));
    }
}
