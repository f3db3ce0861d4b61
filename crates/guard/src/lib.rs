//! Ingredient Guard: isolates the host from faulty ingredient renderer plugins.
//!
//! # Invariants
//! - Once a key fails for an operation kind, the plugin is not called again
//!   for that (operation, key) until the guard is reset.
//! - Tooltip and batch-render faults never reach the caller.
//! - A single-render fault reaches the caller only as a [`ReportedCrash`],
//!   and only when render errors are not caught.
//! - The error glyph always leaves the surface tint neutral.
//! - A failed batch renderer is retained, so a new renderer can never take
//!   over its identity.

mod config;
mod crash;
mod guard;
mod memory;

pub use config::{ClientConfig, ConfigError, ConfigSource};
pub use crash::{
    CrashReport, CrashReportCategory, ReportedCrash, create_ingredient_crash_report,
    log_ingredient_crash,
};
pub use guard::{IngredientGuard, RENDER_ERROR_KEY, TOOLTIP_ERROR_KEY, render_error};
pub use memory::{FailureMemory, FailureSummary, FaultKind, RendererKey};

pub fn crate_info() -> &'static str {
    "ingredient-guard v0.1.0"
}
