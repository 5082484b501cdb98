// src/generator.rs

use rand::Rng;

use crate::color::Color;
use crate::config::GeneratorSettings;
use crate::geometry::{Point2, Region};
use crate::sampler::sample_coordinate;
use crate::shapes::{Paint, ShapeKind, ShapeSpec};

const LINE_MAX_LENGTH: f64 = 100.0;
const CIRCLE_MAX_DIAMETER: f64 = 50.0;
const RECT_MAX_WIDTH: f64 = 80.0;
const RECT_MAX_HEIGHT: f64 = 50.0;
const TRIANGLE_MAX_OFFSET: f64 = 50.0;
const PARABOLA_MAX_WIDTH: f64 = 100.0;
const PARABOLA_MAX_HEIGHT: f64 = 50.0;
const TRAPEZOID_TOP_WIDTH: f64 = 60.0;
const TRAPEZOID_SIDE_OFFSET: f64 = 40.0;
const TRAPEZOID_MAX_HEIGHT: f64 = 50.0;

/// How many shapes of each kind one generation call produces.
/// Non-positive counts produce nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShapeCounts {
    pub lines: i32,
    pub circles: i32,
    pub rectangles: i32,
    pub triangles: i32,
    pub parabolas: i32,
    pub trapezoids: i32,
}

impl ShapeCounts {
    pub fn of(&self, kind: ShapeKind) -> i32 {
        match kind {
            ShapeKind::Line => self.lines,
            ShapeKind::Circle => self.circles,
            ShapeKind::Rectangle => self.rectangles,
            ShapeKind::Triangle => self.triangles,
            ShapeKind::Parabola => self.parabolas,
            ShapeKind::Trapezoid => self.trapezoids,
        }
    }

    pub fn total(&self) -> usize {
        ShapeKind::ALL.iter().map(|k| self.of(*k).max(0) as usize).sum()
    }
}

/// Placement parameters shared by every shape of one generation call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub region: Region,
    /// Zoom factor applied to size limits, nominally `1.0..=1.5`.
    pub scale: f64,
    /// Clustering strength, see [`sample_coordinate`].
    pub density: f64,
    pub fill: bool,
}

pub struct ShapeGenerator<R: Rng> {
    rng: R,
    max_line_attempts: u32,
    line_color: Color,
}

impl<R: Rng> ShapeGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self::with_settings(rng, &GeneratorSettings::default())
    }

    pub fn with_settings(rng: R, settings: &GeneratorSettings) -> Self {
        Self {
            rng,
            max_line_attempts: settings.max_line_attempts.max(1),
            line_color: settings.line_color,
        }
    }

    /// Lazily yields the requested shapes, kinds in [`ShapeKind::ALL`] order.
    pub fn shapes<'a>(
        &'a mut self,
        counts: &ShapeCounts,
        placement: &'a Placement,
    ) -> impl Iterator<Item = ShapeSpec> + 'a {
        let counts = *counts;
        ShapeKind::ALL
            .into_iter()
            .flat_map(move |kind| std::iter::repeat(kind).take(counts.of(kind).max(0) as usize))
            .map(move |kind| self.generate_one(kind, placement))
    }

    pub fn generate(&mut self, counts: &ShapeCounts, placement: &Placement) -> Vec<ShapeSpec> {
        self.shapes(counts, placement).collect()
    }

    pub fn generate_one(&mut self, kind: ShapeKind, placement: &Placement) -> ShapeSpec {
        let shape = match kind {
            ShapeKind::Line => self.line(placement),
            ShapeKind::Circle => self.circle(placement),
            ShapeKind::Rectangle => self.rectangle(placement),
            ShapeKind::Triangle => self.triangle(placement),
            ShapeKind::Parabola => self.parabola(placement),
            ShapeKind::Trapezoid => self.trapezoid(placement),
        };
        log::trace!("generated {shape:?}");
        shape
    }

    fn sample_point(&mut self, placement: &Placement) -> Point2 {
        let r = &placement.region;
        Point2::new(
            sample_coordinate(&mut self.rng, r.min_x(), r.max_x(), placement.density),
            sample_coordinate(&mut self.rng, r.min_y(), r.max_y(), placement.density),
        )
    }

    /// `U(0, 1) * limit * scale`.
    fn scaled_extent(&mut self, limit: f64, scale: f64) -> f64 {
        self.rng.gen::<f64>() * limit * scale
    }

    fn paint(&mut self, fill: bool) -> Paint {
        Paint::new(fill, Color::random(&mut self.rng))
    }

    pub fn line(&mut self, placement: &Placement) -> ShapeSpec {
        let max_length = LINE_MAX_LENGTH * placement.scale;
        let from = self.sample_point(placement);

        let mut to = self.sample_point(placement);
        let mut attempts = 1;
        while from.distance_to(&to) > max_length {
            if attempts >= self.max_line_attempts {
                log::warn!(
                    "line endpoint still {:.1} away after {attempts} attempts, clamping to {max_length:.1}",
                    from.distance_to(&to)
                );
                to = from.toward(&to, max_length);
                break;
            }
            to = self.sample_point(placement);
            attempts += 1;
        }

        ShapeSpec::Line { from, to, color: self.line_color }
    }

    pub fn circle(&mut self, placement: &Placement) -> ShapeSpec {
        let r = &placement.region;
        let mut origin = self.sample_point(placement);
        let diameter = self
            .scaled_extent(CIRCLE_MAX_DIAMETER, placement.scale)
            .min((r.max_x() - origin.x).min(r.max_y() - origin.y));

        if origin.x + diameter > r.max_x() {
            origin.x = r.max_x() - diameter;
        }
        if origin.y + diameter > r.max_y() {
            origin.y = r.max_y() - diameter;
        }

        ShapeSpec::Circle { origin, diameter, paint: self.paint(placement.fill) }
    }

    pub fn rectangle(&mut self, placement: &Placement) -> ShapeSpec {
        let r = &placement.region;
        let origin = self.sample_point(placement);
        let width = self
            .scaled_extent(RECT_MAX_WIDTH, placement.scale)
            .min(r.max_x() - origin.x);
        let height = self
            .scaled_extent(RECT_MAX_HEIGHT, placement.scale)
            .min(r.max_y() - origin.y);

        ShapeSpec::Rectangle {
            origin,
            width,
            height,
            draw_scale: placement.scale,
            paint: self.paint(placement.fill),
        }
    }

    pub fn triangle(&mut self, placement: &Placement) -> ShapeSpec {
        let r = &placement.region;
        let scale = placement.scale;
        let first = self.sample_point(placement);

        let second = Point2::new(
            (first.x + self.scaled_extent(TRIANGLE_MAX_OFFSET, scale)).min(r.max_x()),
            (first.y + self.scaled_extent(TRIANGLE_MAX_OFFSET, scale)).min(r.max_y()),
        );
        let third = Point2::new(
            (first.x - self.scaled_extent(TRIANGLE_MAX_OFFSET, scale)).max(r.min_x()),
            (first.y + self.scaled_extent(TRIANGLE_MAX_OFFSET, scale)).min(r.max_y()),
        );

        ShapeSpec::Triangle {
            vertices: [r.clamp(first), r.clamp(second), r.clamp(third)],
            paint: self.paint(placement.fill),
        }
    }

    pub fn parabola(&mut self, placement: &Placement) -> ShapeSpec {
        let r = &placement.region;
        let apex = self.sample_point(placement);
        let half_width = self
            .scaled_extent(PARABOLA_MAX_WIDTH, placement.scale)
            .min((apex.x - r.min_x()).min(r.max_x() - apex.x));
        let height = self
            .scaled_extent(PARABOLA_MAX_HEIGHT, placement.scale)
            .min(r.max_y() - apex.y);

        ShapeSpec::Parabola { apex, half_width, height, paint: self.paint(placement.fill) }
    }

    /// Vertices are capped only in the direction each offset moves them.
    pub fn trapezoid(&mut self, placement: &Placement) -> ShapeSpec {
        let r = &placement.region;
        let scale = placement.scale;
        let top_left = self.sample_point(placement);

        let top_right = Point2::new(
            (top_left.x + self.scaled_extent(TRAPEZOID_TOP_WIDTH, scale)).min(r.max_x()),
            top_left.y,
        );
        let bottom_right = Point2::new(
            (top_left.x + self.scaled_extent(TRAPEZOID_SIDE_OFFSET, scale)).min(r.max_x()),
            (top_left.y + self.scaled_extent(TRAPEZOID_MAX_HEIGHT, scale)).min(r.max_y()),
        );
        let bottom_left = Point2::new(
            (top_left.x - self.scaled_extent(TRAPEZOID_SIDE_OFFSET, scale)).max(r.min_x()),
            bottom_right.y,
        );

        ShapeSpec::Trapezoid {
            vertices: [top_left, top_right, bottom_right, bottom_left],
            paint: self.paint(placement.fill),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPS: f64 = 1e-9;

    fn placement(region: Region, scale: f64, density: f64, fill: bool) -> Placement {
        Placement { region, scale, density, fill }
    }

    fn generator(seed: u64) -> ShapeGenerator<StdRng> {
        ShapeGenerator::new(StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_lines_respect_max_length() {
        let mut gen = generator(10);
        for scale in [1.0, 1.25, 1.5] {
            let p = placement(Region::new(0, 800, 0, 900), scale, 15.0, false);
            for _ in 0..300 {
                match gen.line(&p) {
                    ShapeSpec::Line { from, to, color } => {
                        assert!(from.distance_to(&to) <= 100.0 * scale + EPS);
                        assert_eq!(color, Color::BLACK);
                    }
                    other => panic!("expected a line, got {other:?}"),
                }
            }
        }
    }

    #[test]
    fn test_line_retry_cap_clamps_to_max_length() {
        // Sparse density over a huge region makes short lines very unlikely.
        let settings = GeneratorSettings { max_line_attempts: 1, ..Default::default() };
        let mut gen = ShapeGenerator::with_settings(StdRng::seed_from_u64(11), &settings);
        let p = placement(Region::new(0, 1_000_000, 0, 1_000_000), 1.0, 0.5, false);
        for _ in 0..50 {
            if let ShapeSpec::Line { from, to, .. } = gen.line(&p) {
                assert!(from.distance_to(&to) <= 100.0 + 1e-6);
            }
        }
    }

    #[test]
    fn test_collapsed_region_lines_terminate_on_the_point() {
        let mut gen = generator(12);
        let p = placement(Region::new(40, 40, 60, 60), 1.0, 15.0, false);
        let counts = ShapeCounts { lines: 5, ..Default::default() };
        let shapes = gen.generate(&counts, &p);
        assert_eq!(shapes.len(), 5);
        for shape in shapes {
            match shape {
                ShapeSpec::Line { from, to, .. } => {
                    assert_eq!(from, Point2::new(40.0, 60.0));
                    assert_eq!(to, Point2::new(40.0, 60.0));
                }
                other => panic!("expected a line, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_circles_and_rectangles_stay_inside_max_edges() {
        let mut gen = generator(13);
        let region = Region::new(100, 400, 50, 300);
        for density in [1.0, 15.0, 50.0] {
            let p = placement(region, 1.5, density, true);
            for _ in 0..300 {
                if let ShapeSpec::Circle { origin, diameter, .. } = gen.circle(&p) {
                    assert!(origin.x + diameter <= 400.0 + EPS);
                    assert!(origin.y + diameter <= 300.0 + EPS);
                    assert!(origin.x >= 100.0 - EPS && origin.y >= 50.0 - EPS);
                }
                if let ShapeSpec::Rectangle { origin, width, height, draw_scale, .. } = gen.rectangle(&p) {
                    assert!(origin.x + width <= 400.0 + EPS);
                    assert!(origin.y + height <= 300.0 + EPS);
                    assert!(width <= 80.0 * 1.5 && height <= 50.0 * 1.5);
                    assert_eq!(draw_scale, 1.5);
                }
            }
        }
    }

    #[test]
    fn test_triangle_vertices_are_clamped_into_region() {
        let mut gen = generator(14);
        let region = Region::new(0, 60, 0, 60);
        let p = placement(region, 1.5, 1.0, false);
        for _ in 0..300 {
            if let ShapeSpec::Triangle { vertices, paint } = gen.triangle(&p) {
                assert!(!paint.is_fill());
                for v in vertices {
                    assert!(region.contains(&v), "{v:?} outside {region:?}");
                }
                assert!(vertices[1].x >= vertices[0].x && vertices[2].x <= vertices[0].x);
                assert!(vertices[1].y >= vertices[0].y && vertices[2].y >= vertices[0].y);
            }
        }
    }

    #[test]
    fn test_parabola_extent_is_capped() {
        let mut gen = generator(15);
        let region = Region::new(0, 200, 0, 200);
        let p = placement(region, 1.0, 15.0, true);
        for _ in 0..300 {
            if let ShapeSpec::Parabola { apex, half_width, height, .. } = gen.parabola(&p) {
                assert!(apex.x - half_width >= -EPS);
                assert!(apex.x + half_width <= 200.0 + EPS);
                assert!(height <= 50.0 && height <= 200.0 - apex.y + EPS);
            }
        }
    }

    #[test]
    fn test_trapezoid_shape_and_caps() {
        let mut gen = generator(16);
        let region = Region::new(0, 120, 0, 120);
        let p = placement(region, 1.5, 1.0, true);
        for _ in 0..300 {
            if let ShapeSpec::Trapezoid { vertices: [a, b, c, d], .. } = gen.trapezoid(&p) {
                assert_eq!(a.y, b.y);
                assert_eq!(c.y, d.y);
                assert!(b.x >= a.x && c.x >= a.x && d.x <= a.x);
                for v in [a, b, c, d] {
                    assert!(region.contains(&v));
                }
            }
        }
    }

    #[test]
    fn test_fill_flag_selects_paint_and_colors_vary() {
        let mut gen = generator(17);
        let region = Region::new(0, 500, 0, 500);
        let counts = ShapeCounts { circles: 4, rectangles: 4, triangles: 4, parabolas: 4, trapezoids: 4, ..Default::default() };

        let filled = gen.generate(&counts, &placement(region, 1.0, 15.0, true));
        assert!(filled.iter().all(|s| s.paint().is_fill()));
        let outlined = gen.generate(&counts, &placement(region, 1.0, 15.0, false));
        assert!(outlined.iter().all(|s| !s.paint().is_fill()));

        let first = filled[0].paint().color();
        assert!(filled.iter().skip(1).any(|s| s.paint().color() != first));
    }

    #[test]
    fn test_generate_follows_kind_order_and_skips_negative_counts() {
        let mut gen = generator(18);
        let counts = ShapeCounts { lines: 1, circles: -3, rectangles: 2, triangles: 0, parabolas: 1, trapezoids: 1 };
        let kinds: Vec<ShapeKind> = gen
            .generate(&counts, &placement(Region::new(0, 300, 0, 300), 1.0, 15.0, false))
            .iter()
            .map(ShapeSpec::kind)
            .collect();
        assert_eq!(
            kinds,
            vec![ShapeKind::Line, ShapeKind::Rectangle, ShapeKind::Rectangle, ShapeKind::Parabola, ShapeKind::Trapezoid]
        );
        assert_eq!(counts.total(), 5);
    }

    #[test]
    fn test_same_seed_same_shapes() {
        let counts = ShapeCounts { lines: 3, circles: 3, rectangles: 3, triangles: 3, parabolas: 3, trapezoids: 3 };
        let p = placement(Region::new(10, 700, 10, 700), 1.2, 20.0, true);
        assert_eq!(generator(99).generate(&counts, &p), generator(99).generate(&counts, &p));
    }

    #[test]
    fn test_huge_counts_are_produced_lazily() {
        let mut gen = generator(20);
        let counts = ShapeCounts {
            lines: i32::MAX,
            circles: i32::MAX,
            rectangles: i32::MAX,
            triangles: i32::MAX,
            parabolas: i32::MAX,
            trapezoids: i32::MAX,
        };
        let p = placement(Region::new(0, 300, 0, 300), 1.0, 15.0, false);
        let first: Vec<ShapeSpec> = gen.shapes(&counts, &p).take(4).collect();
        assert_eq!(first.len(), 4);
        assert!(first.iter().all(|s| s.kind() == ShapeKind::Line));
    }

    #[test]
    fn test_inverted_region_degrades_without_panicking() {
        let mut gen = generator(19);
        let counts = ShapeCounts { lines: 2, circles: 2, rectangles: 2, triangles: 2, parabolas: 2, trapezoids: 2 };
        let shapes = gen.generate(&counts, &placement(Region::new(300, 0, 300, 0), 1.0, 15.0, true));
        assert_eq!(shapes.len(), 12);
    }
}
