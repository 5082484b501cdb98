// src/shapes.rs

use std::fmt;

use crate::color::Color;
use crate::config::GeneratorSettings;
use crate::geometry::{Path, Point2};
use crate::surface::DrawSurface;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Line,
    Circle,
    Rectangle,
    Triangle,
    Parabola,
    Trapezoid,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Line,
        ShapeKind::Circle,
        ShapeKind::Rectangle,
        ShapeKind::Triangle,
        ShapeKind::Parabola,
        ShapeKind::Trapezoid,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Line => "line",
            ShapeKind::Circle => "circle",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Parabola => "parabola",
            ShapeKind::Trapezoid => "trapezoid",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    Fill(Color),
    Stroke(Color),
}

impl Paint {
    pub fn new(fill: bool, color: Color) -> Self {
        if fill {
            Paint::Fill(color)
        } else {
            Paint::Stroke(color)
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Paint::Fill(c) | Paint::Stroke(c) => *c,
        }
    }

    pub fn is_fill(&self) -> bool {
        matches!(self, Paint::Fill(_))
    }
}

/// One generated shape in region coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeSpec {
    Line {
        from: Point2,
        to: Point2,
        color: Color,
    },
    /// Circle inscribed in the square at `origin` (top-left) with side `diameter`.
    Circle {
        origin: Point2,
        diameter: f64,
        paint: Paint,
    },
    /// `draw_scale` multiplies position and size once more at draw time.
    Rectangle {
        origin: Point2,
        width: f64,
        height: f64,
        draw_scale: f64,
        paint: Paint,
    },
    Triangle {
        vertices: [Point2; 3],
        paint: Paint,
    },
    /// Downward-opening parabola `y = apex.y - height * t^2`, `t` in `[-1, 1]`,
    /// spanning `apex.x - half_width ..= apex.x + half_width`.
    Parabola {
        apex: Point2,
        half_width: f64,
        height: f64,
        paint: Paint,
    },
    Trapezoid {
        vertices: [Point2; 4],
        paint: Paint,
    },
}

/// Tessellation and stroke settings shared by every shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOptions {
    pub stroke_width: f64,
    pub ellipse_segments: usize,
    pub parabola_steps: usize,
    pub rescale_rectangles: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from(&GeneratorSettings::default())
    }
}

impl From<&GeneratorSettings> for RenderOptions {
    fn from(settings: &GeneratorSettings) -> Self {
        Self {
            stroke_width: settings.stroke_width,
            ellipse_segments: settings.ellipse_segments,
            parabola_steps: settings.parabola_steps,
            rescale_rectangles: settings.rescale_rectangles_on_draw,
        }
    }
}

impl ShapeSpec {
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeSpec::Line { .. } => ShapeKind::Line,
            ShapeSpec::Circle { .. } => ShapeKind::Circle,
            ShapeSpec::Rectangle { .. } => ShapeKind::Rectangle,
            ShapeSpec::Triangle { .. } => ShapeKind::Triangle,
            ShapeSpec::Parabola { .. } => ShapeKind::Parabola,
            ShapeSpec::Trapezoid { .. } => ShapeKind::Trapezoid,
        }
    }

    pub fn paint(&self) -> Paint {
        match self {
            ShapeSpec::Line { color, .. } => Paint::Stroke(*color),
            ShapeSpec::Circle { paint, .. }
            | ShapeSpec::Rectangle { paint, .. }
            | ShapeSpec::Triangle { paint, .. }
            | ShapeSpec::Parabola { paint, .. }
            | ShapeSpec::Trapezoid { paint, .. } => *paint,
        }
    }

    /// The outline this shape draws, before fill/stroke is applied.
    pub fn path(&self, options: &RenderOptions) -> Path {
        match self {
            ShapeSpec::Line { from, to, .. } => Path::segment(*from, *to),
            ShapeSpec::Circle { origin, diameter, .. } => {
                Path::ellipse(*origin, *diameter, *diameter, options.ellipse_segments)
            }
            ShapeSpec::Rectangle { origin, width, height, draw_scale, .. } => {
                let factor = if options.rescale_rectangles { *draw_scale } else { 1.0 };
                Path::rect(origin.scaled(factor), width * factor, height * factor)
            }
            ShapeSpec::Triangle { vertices, .. } => Path::polygon(vertices),
            ShapeSpec::Trapezoid { vertices, .. } => Path::polygon(vertices),
            ShapeSpec::Parabola { apex, half_width, height, paint } => {
                let steps = options.parabola_steps.max(1);
                let mut path = Path::with_capacity(steps + 1);
                for (i, p) in parabola_points(*apex, *half_width, *height, steps).enumerate() {
                    if i == 0 {
                        path.move_to(p);
                    } else {
                        path.line_to(p);
                    }
                }
                if paint.is_fill() {
                    path.close();
                }
                path
            }
        }
    }

    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S, options: &RenderOptions) {
        let path = self.path(options);
        match self.paint() {
            Paint::Fill(color) => surface.fill_path(&path, color),
            Paint::Stroke(color) => surface.stroke_path(&path, color, options.stroke_width),
        }
    }
}

/// `steps + 1` evenly spaced samples of the parabola, left to right.
pub fn parabola_points(
    apex: Point2,
    half_width: f64,
    height: f64,
    steps: usize,
) -> impl Iterator<Item = Point2> {
    (0..=steps).map(move |i| {
        let t = i as f64 / steps as f64 * 2.0 - 1.0;
        Point2::new(apex.x + half_width * t, apex.y - height * t * t)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DisplayList, DrawCommand};

    #[test]
    fn test_parabola_endpoints_and_apex() {
        let pts: Vec<Point2> = parabola_points(Point2::new(50.0, 80.0), 20.0, 10.0, 100).collect();
        assert_eq!(pts.len(), 101);
        assert_eq!(pts[0], Point2::new(30.0, 70.0));
        assert_eq!(pts[50], Point2::new(50.0, 80.0));
        assert_eq!(pts[100], Point2::new(70.0, 70.0));
    }

    #[test]
    fn test_parabola_outline_is_open_and_fill_is_closed() {
        let options = RenderOptions::default();
        let outline = ShapeSpec::Parabola {
            apex: Point2::new(0.0, 0.0),
            half_width: 5.0,
            height: 5.0,
            paint: Paint::Stroke(Color::BLUE),
        };
        assert!(!outline.path(&options).is_closed());
        assert_eq!(outline.path(&options).segment_count(), 100);

        let filled = ShapeSpec::Parabola {
            apex: Point2::new(0.0, 0.0),
            half_width: 5.0,
            height: 5.0,
            paint: Paint::Fill(Color::BLUE),
        };
        assert!(filled.path(&options).is_closed());
    }

    #[test]
    fn test_rectangle_rescaled_on_draw() {
        let rect = ShapeSpec::Rectangle {
            origin: Point2::new(10.0, 20.0),
            width: 30.0,
            height: 40.0,
            draw_scale: 1.5,
            paint: Paint::Fill(Color::BLACK),
        };
        let mut options = RenderOptions::default();
        let scaled = rect.path(&options);
        assert_eq!(scaled.points()[0], Point2::new(15.0, 30.0));
        assert_eq!(scaled.points()[2], Point2::new(60.0, 90.0));

        options.rescale_rectangles = false;
        let plain = rect.path(&options);
        assert_eq!(plain.points()[0], Point2::new(10.0, 20.0));
        assert_eq!(plain.points()[2], Point2::new(40.0, 60.0));
    }

    #[test]
    fn test_draw_dispatches_on_paint() {
        let options = RenderOptions::default();
        let mut list = DisplayList::new(100.0, 100.0);
        let vertices = [Point2::new(0.0, 0.0), Point2::new(10.0, 0.0), Point2::new(5.0, 8.0)];
        ShapeSpec::Triangle { vertices, paint: Paint::Fill(Color::BLUE) }.draw(&mut list, &options);
        ShapeSpec::Triangle { vertices, paint: Paint::Stroke(Color::BLACK) }.draw(&mut list, &options);
        ShapeSpec::Line { from: vertices[0], to: vertices[1], color: Color::BLACK }.draw(&mut list, &options);

        let commands = list.commands();
        assert!(matches!(commands[0], DrawCommand::Fill { color, .. } if color == Color::BLUE));
        assert!(matches!(commands[1], DrawCommand::Stroke { line_width, .. } if line_width == 2.0));
        assert!(!commands[2].is_fill());
        assert_eq!(commands[2].path().points(), &[vertices[0], vertices[1]]);
    }
}
