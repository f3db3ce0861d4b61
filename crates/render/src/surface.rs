use std::fmt::Write as _;

use glam::{IVec2, Vec4};
use ingredient_common::Argb;

/// Neutral shader tint: white, fully opaque.
pub const NEUTRAL_TINT: Vec4 = Vec4::ONE;

/// Host drawing primitives available to ingredient renderers.
///
/// The shader tint is shared pipeline state: whatever one draw leaves behind
/// affects the next one until it is reset.
pub trait DrawSurface {
    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Argb);

    fn fill(&mut self, x: i32, y: i32, width: i32, height: i32, color: Argb);

    fn set_shader_color(&mut self, tint: Vec4);

    fn shader_color(&self) -> Vec4;
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Text {
        text: String,
        pos: IVec2,
        color: Argb,
    },
    Fill {
        pos: IVec2,
        size: IVec2,
        color: Argb,
    },
    ShaderColor(Vec4),
}

/// Surface that records draw calls instead of rasterizing them.
///
/// Used by tests and the CLI to observe exactly what was drawn.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    tint: Vec4,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            tint: NEUTRAL_TINT,
        }
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain recorded commands, keeping the current tint.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Text draws only, as `(text, x, y)`.
    pub fn texts(&self) -> Vec<(&str, i32, i32)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, pos, .. } => Some((text.as_str(), pos.x, pos.y)),
                _ => None,
            })
            .collect()
    }

    /// Human-readable listing of the recorded commands.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        for command in &self.commands {
            let _ = match command {
                DrawCommand::Text { text, pos, color } => {
                    writeln!(out, "text {text:?} at ({}, {}) color={color}", pos.x, pos.y)
                }
                DrawCommand::Fill { pos, size, color } => writeln!(
                    out,
                    "fill {}x{} at ({}, {}) color={color}",
                    size.x, size.y, pos.x, pos.y
                ),
                DrawCommand::ShaderColor(t) => writeln!(
                    out,
                    "shader color ({:.1}, {:.1}, {:.1}, {:.1})",
                    t.x, t.y, t.z, t.w
                ),
            };
        }
        out
    }
}

impl DrawSurface for RecordingSurface {
    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Argb) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos: IVec2::new(x, y),
            color,
        });
    }

    fn fill(&mut self, x: i32, y: i32, width: i32, height: i32, color: Argb) {
        self.commands.push(DrawCommand::Fill {
            pos: IVec2::new(x, y),
            size: IVec2::new(width, height),
            color,
        });
    }

    fn set_shader_color(&mut self, tint: Vec4) {
        self.tint = tint;
        self.commands.push(DrawCommand::ShaderColor(tint));
    }

    fn shader_color(&self) -> Vec4 {
        self.tint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut surface = RecordingSurface::new();
        surface.fill(0, 0, 16, 16, Argb::WHITE);
        surface.draw_text("hi", 2, 3, Argb::RED);
        surface.set_shader_color(Vec4::new(0.5, 0.5, 0.5, 1.0));

        assert_eq!(surface.commands().len(), 3);
        assert_eq!(surface.texts(), vec![("hi", 2, 3)]);
        assert_eq!(surface.shader_color(), Vec4::new(0.5, 0.5, 0.5, 1.0));
    }

    #[test]
    fn starts_with_neutral_tint() {
        let surface = RecordingSurface::new();
        assert_eq!(surface.shader_color(), NEUTRAL_TINT);
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn describe_lists_commands() {
        let mut surface = RecordingSurface::new();
        surface.draw_text("ERR", 4, 5, Argb::RED);
        let out = surface.describe();
        assert!(out.contains("\"ERR\" at (4, 5)"));
        assert!(out.contains("#FFFF0000"));
    }

    #[test]
    fn take_commands_keeps_tint() {
        let mut surface = RecordingSurface::new();
        surface.set_shader_color(Vec4::ZERO);
        let taken = surface.take_commands();
        assert_eq!(taken.len(), 1);
        assert!(surface.commands().is_empty());
        assert_eq!(surface.shader_color(), Vec4::ZERO);
    }
}
