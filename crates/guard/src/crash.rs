//! Crash logging and structured crash reports for ingredient faults.

use std::fmt::{self, Write as _};

use ingredient_common::{Ingredient, IngredientManager, IngredientType, PluginFault};

use crate::memory::FaultKind;

/// Named group of key/value details in a crash report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrashReportCategory {
    pub name: String,
    pub details: Vec<(String, String)>,
}

impl CrashReportCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            details: Vec::new(),
        }
    }

    pub fn set_detail(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.details.push((key.into(), value.into()));
        self
    }

    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Diagnostic record for a fault the host decided not to contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrashReport {
    pub title: String,
    pub kind: FaultKind,
    pub fault: PluginFault,
    pub categories: Vec<CrashReportCategory>,
}

impl CrashReport {
    pub fn new(title: impl Into<String>, kind: FaultKind, fault: PluginFault) -> Self {
        Self {
            title: title.into(),
            kind,
            fault,
            categories: Vec::new(),
        }
    }

    pub fn add_category(&mut self, name: impl Into<String>) -> &mut CrashReportCategory {
        self.categories.push(CrashReportCategory::new(name));
        let last = self.categories.len() - 1;
        &mut self.categories[last]
    }

    pub fn category(&self, name: &str) -> Option<&CrashReportCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Multi-line report for showing to the user or writing to disk.
    pub fn full_report(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "---- Crash Report ----");
        let _ = writeln!(out, "Description: {}", self.title);
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.fault);
        for category in &self.categories {
            let _ = writeln!(out);
            let _ = writeln!(out, "-- {} --", category.name);
            for (key, value) in &category.details {
                let _ = writeln!(out, "\t{key}: {value}");
            }
        }
        out
    }
}

impl fmt::Display for CrashReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.fault)
    }
}

/// A crash report raised to the host. Rendering must stop and surface it.
#[derive(Debug, Clone, thiserror::Error)]
#[error("reported crash: {0}")]
pub struct ReportedCrash(pub Box<CrashReport>);

impl ReportedCrash {
    pub fn new(report: CrashReport) -> Self {
        Self(Box::new(report))
    }

    pub fn report(&self) -> &CrashReport {
        &self.0
    }
}

fn type_description<T: Ingredient>(
    manager: &dyn IngredientManager,
    ingredient_type: &IngredientType<T>,
) -> String {
    let uid = ingredient_type.uid();
    match manager.type_display_name(uid) {
        Some(name) => format!("{name} ({uid})"),
        None => uid.to_string(),
    }
}

/// Log a contained ingredient fault with everything known about it.
pub fn log_ingredient_crash<T: Ingredient>(
    fault: &PluginFault,
    title: &str,
    manager: &dyn IngredientManager,
    ingredient_type: &IngredientType<T>,
    ingredient: &T,
) {
    let info = manager.ingredient_info(ingredient_type.uid(), ingredient);
    tracing::error!(
        fault = %fault,
        linkage = fault.is_linkage(),
        ingredient_type = %type_description(manager, ingredient_type),
        ingredient = ?ingredient,
        info = ?info,
        "{title}"
    );
}

/// Build the crash report for an ingredient fault that must not be contained.
pub fn create_ingredient_crash_report<T: Ingredient>(
    fault: PluginFault,
    kind: FaultKind,
    title: &str,
    manager: &dyn IngredientManager,
    ingredient_type: &IngredientType<T>,
    ingredient: &T,
) -> CrashReport {
    let info = manager.ingredient_info(ingredient_type.uid(), ingredient);
    let type_name = type_description(manager, ingredient_type);
    let mut report = CrashReport::new(title, kind, fault);
    let category = report.add_category("Ingredient");
    category
        .set_detail("Operation", kind.label())
        .set_detail("Ingredient Type", type_name)
        .set_detail("Ingredient", format!("{ingredient:?}"));
    for (i, line) in info.into_iter().enumerate() {
        category.set_detail(format!("Ingredient Info {}", i + 1), line);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use ingredient_common::{EmptyIngredientManager, ITEM_STACK, ItemStack};

    #[test]
    fn ingredient_report_has_context() {
        let stone = ItemStack::new("minecraft:stone", 1);
        let report = create_ingredient_crash_report(
            PluginFault::runtime("bad texture"),
            FaultKind::SingleRender,
            "Rendering ingredient",
            &EmptyIngredientManager,
            &ITEM_STACK,
            &stone,
        );

        assert_eq!(report.title, "Rendering ingredient");
        let category = report.category("Ingredient").unwrap();
        assert_eq!(category.detail("Ingredient Type"), Some("item_stack"));
        assert_eq!(category.detail("Operation"), Some("render"));
        let ingredient = category.detail("Ingredient").unwrap();
        assert!(ingredient.contains("minecraft:stone"));
        assert_eq!(
            category.detail("Ingredient Info 1"),
            Some("unregistered ingredient type: item_stack")
        );
    }

    #[test]
    fn full_report_lists_categories() {
        let fault = PluginFault::linkage("missing fn");
        let mut report = CrashReport::new("Boom", FaultKind::Tooltip, fault);
        report.add_category("Extra").set_detail("key", "value");

        let text = report.full_report();
        assert!(text.contains("Description: Boom"));
        assert!(text.contains("linkage fault: missing fn"));
        assert!(text.contains("-- Extra --"));
        assert!(text.contains("\tkey: value"));
    }

    #[test]
    fn reported_crash_display() {
        let crash = ReportedCrash::new(CrashReport::new(
            "Rendering ingredient",
            FaultKind::SingleRender,
            PluginFault::runtime("x"),
        ));
        assert_eq!(
            crash.to_string(),
            "reported crash: Rendering ingredient: runtime fault: x"
        );
        assert_eq!(crash.report().kind, FaultKind::SingleRender);
    }
}
