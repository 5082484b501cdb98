// src/surface.rs

use crate::color::Color;
use crate::geometry::Path;

/// The only operations shape rendering needs from a 2D target.
pub trait DrawSurface {
    /// Wipes everything drawn so far and paints the whole surface with `color`.
    fn clear(&mut self, color: Color);
    fn fill_path(&mut self, path: &Path, color: Color);
    fn stroke_path(&mut self, path: &Path, color: Color, line_width: f64);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Fill { path: Path, color: Color },
    Stroke { path: Path, color: Color, line_width: f64 },
}

impl DrawCommand {
    pub fn path(&self) -> &Path {
        match self {
            DrawCommand::Fill { path, .. } | DrawCommand::Stroke { path, .. } => path,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            DrawCommand::Fill { color, .. } | DrawCommand::Stroke { color, .. } => *color,
        }
    }

    pub fn is_fill(&self) -> bool {
        matches!(self, DrawCommand::Fill { .. })
    }
}

/// Retained, write-only record of everything drawn since the last clear.
///
/// The window redraws every frame, so the canvas keeps its draw calls here
/// and the renderer replays them. A `revision` counter lets the renderer skip
/// re-tessellating an unchanged list.
#[derive(Clone, Debug)]
pub struct DisplayList {
    width: f64,
    height: f64,
    background: Color,
    commands: Vec<DrawCommand>,
    revision: u64,
}

impl DisplayList {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            background: Color::WHITE,
            commands: Vec::new(),
            revision: 0,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl DrawSurface for DisplayList {
    fn clear(&mut self, color: Color) {
        self.background = color;
        self.commands.clear();
        self.touch();
    }

    fn fill_path(&mut self, path: &Path, color: Color) {
        if path.len() < 3 {
            return;
        }
        self.commands.push(DrawCommand::Fill { path: path.clone(), color });
        self.touch();
    }

    fn stroke_path(&mut self, path: &Path, color: Color, line_width: f64) {
        if path.segment_count() == 0 {
            return;
        }
        self.commands.push(DrawCommand::Stroke { path: path.clone(), color, line_width });
        self.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point2;

    #[test]
    fn test_clear_drops_commands_and_sets_background() {
        let mut list = DisplayList::new(900.0, 1000.0);
        list.stroke_path(&Path::segment(Point2::new(0.0, 0.0), Point2::new(5.0, 5.0)), Color::BLACK, 1.0);
        assert_eq!(list.commands().len(), 1);
        let before = list.revision();
        list.clear(Color::LIGHT_GRAY);
        assert!(list.commands().is_empty());
        assert_eq!(list.background(), Color::LIGHT_GRAY);
        assert!(list.revision() > before);
    }

    #[test]
    fn test_degenerate_paths_are_ignored() {
        let mut list = DisplayList::new(10.0, 10.0);
        list.fill_path(&Path::segment(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)), Color::BLUE);
        let mut lone = Path::new();
        lone.move_to(Point2::new(3.0, 3.0));
        list.stroke_path(&lone, Color::BLUE, 2.0);
        assert!(list.commands().is_empty());
    }
}
