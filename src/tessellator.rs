// src/tessellator.rs

use std::ops::Range;

use glam::{Affine2, Vec2};

use crate::color::Color;
use crate::geometry::Path;
use crate::surface::{DisplayList, DrawCommand};
use crate::vertex::Vertex;

/// Indexed triangle list for one frame.
#[derive(Debug, Default, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Triangle fan around the first point. Every filled shape the generator
    /// emits is convex, so a fan covers it exactly.
    pub fn add_fill(&mut self, points: &[Vec2], color: Color) {
        if points.len() < 3 {
            return;
        }
        let start = self.vertices.len() as u32;
        self.vertices.extend(points.iter().map(|p| Vertex::new(*p, color)));
        for i in 1..(points.len() as u32 - 1) {
            self.indices.extend_from_slice(&[start, start + i, start + i + 1]);
        }
    }

    /// One quad of `width` per segment, centered on the segment. Zero-length
    /// segments are skipped.
    pub fn add_stroke(&mut self, points: &[Vec2], closed: bool, color: Color, width: f32) {
        let segments = points.windows(2).map(|w| (w[0], w[1]));
        let closing = match (closed && points.len() > 2, points.first(), points.last()) {
            (true, Some(first), Some(last)) => Some((*last, *first)),
            _ => None,
        };

        let half = width / 2.0;
        for (a, b) in segments.chain(closing) {
            let dir = (b - a).normalize_or_zero();
            if dir == Vec2::ZERO {
                continue;
            }
            let n = dir.perp() * half;
            let start = self.vertices.len() as u32;
            self.vertices.extend_from_slice(&[
                Vertex::new(a + n, color),
                Vertex::new(b + n, color),
                Vertex::new(b - n, color),
                Vertex::new(a - n, color),
            ]);
            self.indices.extend_from_slice(&[start, start + 1, start + 2, start, start + 2, start + 3]);
        }
    }
}

/// A slice of a [`Mesh`] that can be drawn on its own: `indices` only
/// reference vertices inside `vertices`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshBatch {
    pub vertices: Range<usize>,
    pub indices: Range<usize>,
}

impl Mesh {
    /// Splits the mesh at triangle boundaries so that no batch spans more than
    /// `max_vertices` vertices or `max_indices` indices.
    pub fn batches(&self, max_vertices: usize, max_indices: usize) -> Vec<MeshBatch> {
        let max_vertices = max_vertices.max(3);
        let max_indices = (max_indices / 3).max(1) * 3;

        let mut batches = Vec::new();
        let mut start = 0;
        let mut span = 0..0;
        for (t, triangle) in self.indices.chunks_exact(3).enumerate() {
            let i = t * 3;
            let lo = triangle.iter().copied().min().unwrap_or(0) as usize;
            let hi = triangle.iter().copied().max().unwrap_or(0) as usize + 1;
            if i == start {
                span = lo..hi;
                continue;
            }
            let merged = span.start.min(lo)..span.end.max(hi);
            if merged.len() > max_vertices || i + 3 - start > max_indices {
                batches.push(MeshBatch { vertices: span.clone(), indices: start..i });
                start = i;
                span = lo..hi;
            } else {
                span = merged;
            }
        }
        if start < self.indices.len() {
            batches.push(MeshBatch { vertices: span, indices: start..self.indices.len() });
        }
        batches
    }
}

/// Turns a display list into a [`Mesh`], reusing its buffers between frames.
#[derive(Debug, Default)]
pub struct Tessellator {
    mesh: Mesh,
    scratch: Vec<Vec2>,
}

impl Tessellator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Background first, then every command in drawing order. `transform`
    /// maps canvas units to view units and is not applied to the background.
    pub fn tessellate(&mut self, list: &DisplayList, transform: Affine2) -> &Mesh {
        self.mesh.clear();

        let (w, h) = (list.width() as f32, list.height() as f32);
        let background = [Vec2::ZERO, Vec2::new(w, 0.0), Vec2::new(w, h), Vec2::new(0.0, h)];
        self.mesh.add_fill(&background, list.background());

        for command in list.commands() {
            self.load_points(command.path(), transform);
            match command {
                DrawCommand::Fill { color, .. } => self.mesh.add_fill(&self.scratch, *color),
                DrawCommand::Stroke { path, color, line_width } => {
                    self.mesh.add_stroke(&self.scratch, path.is_closed(), *color, *line_width as f32)
                }
            }
        }
        &self.mesh
    }

    fn load_points(&mut self, path: &Path, transform: Affine2) {
        self.scratch.clear();
        self.scratch
            .extend(path.points().iter().map(|p| transform.transform_point2(p.to_vec2())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point2;
    use crate::surface::DrawSurface;

    #[test]
    fn test_fill_is_a_fan() {
        let mut mesh = Mesh::default();
        let pentagon = [
            Vec2::new(0.0, -10.0),
            Vec2::new(9.5, -3.0),
            Vec2::new(6.0, 8.0),
            Vec2::new(-6.0, 8.0),
            Vec2::new(-9.5, -3.0),
        ];
        mesh.add_fill(&pentagon, Color::BLUE);
        assert_eq!(mesh.vertices.len(), 5);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3, 0, 3, 4]);
    }

    #[test]
    fn test_stroke_quads_per_segment() {
        let mut mesh = Mesh::default();
        let square = [Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0), Vec2::new(0.0, 10.0)];
        mesh.add_stroke(&square, false, Color::BLACK, 2.0);
        assert_eq!(mesh.vertices.len(), 3 * 4);
        mesh.clear();
        mesh.add_stroke(&square, true, Color::BLACK, 2.0);
        assert_eq!(mesh.vertices.len(), 4 * 4);
        assert_eq!(mesh.indices.len(), 4 * 6);
        // First quad straddles the x axis by half the width.
        assert_eq!(mesh.vertices[0].position, [0.0, 1.0]);
        assert_eq!(mesh.vertices[3].position, [0.0, -1.0]);
    }

    #[test]
    fn test_zero_length_segment_is_skipped() {
        let mut mesh = Mesh::default();
        mesh.add_stroke(&[Vec2::ONE, Vec2::ONE], false, Color::BLACK, 1.0);
        assert!(mesh.is_empty());
    }

    fn closed_squares(count: usize) -> Mesh {
        let mut mesh = Mesh::default();
        for k in 0..count {
            let o = Vec2::new(k as f32 * 20.0, 0.0);
            let square = [o, o + Vec2::new(10.0, 0.0), o + Vec2::new(10.0, 10.0), o + Vec2::new(0.0, 10.0)];
            mesh.add_stroke(&square, true, Color::BLACK, 2.0);
        }
        mesh
    }

    #[test]
    fn test_small_mesh_is_one_batch() {
        let mesh = closed_squares(3);
        let batches = mesh.batches(usize::MAX, usize::MAX);
        assert_eq!(batches, vec![MeshBatch { vertices: 0..48, indices: 0..72 }]);
        assert!(Mesh::default().batches(16, 16).is_empty());
    }

    #[test]
    fn test_batches_respect_vertex_limit() {
        let mesh = closed_squares(3);
        let batches = mesh.batches(16, usize::MAX);
        assert_eq!(
            batches,
            vec![
                MeshBatch { vertices: 0..16, indices: 0..24 },
                MeshBatch { vertices: 16..32, indices: 24..48 },
                MeshBatch { vertices: 32..48, indices: 48..72 },
            ]
        );
    }

    #[test]
    fn test_batches_respect_index_limit_and_cover_the_mesh() {
        let mesh = closed_squares(3);
        let batches = mesh.batches(usize::MAX, 12);
        assert_eq!(batches.len(), 6);
        assert_eq!(batches[1], MeshBatch { vertices: 8..16, indices: 12..24 });

        let mut next = 0;
        for batch in &batches {
            assert_eq!(batch.indices.start, next);
            assert!(batch.indices.len() <= 12);
            for &index in &mesh.indices[batch.indices.clone()] {
                assert!(batch.vertices.contains(&(index as usize)));
            }
            next = batch.indices.end;
        }
        assert_eq!(next, mesh.indices.len());
    }

    #[test]
    fn test_tessellate_display_list() {
        let mut list = DisplayList::new(900.0, 1000.0);
        list.fill_path(&Path::rect(Point2::new(10.0, 10.0), 20.0, 20.0), Color::BLUE);
        list.stroke_path(&Path::segment(Point2::new(0.0, 0.0), Point2::new(0.0, 50.0)), Color::BLACK, 2.0);

        let mut tessellator = Tessellator::new();
        let mesh = tessellator.tessellate(&list, Affine2::from_translation(Vec2::new(5.0, 0.0)));
        // background + rect fan + one stroke quad
        assert_eq!(mesh.vertices.len(), 4 + 4 + 4);
        assert_eq!(mesh.indices.len(), 6 + 6 + 6);
        assert_eq!(mesh.vertices[2].position, [900.0, 1000.0]);
        assert_eq!(mesh.vertices[4].position, [15.0, 10.0]);
        assert_eq!(mesh.vertices[4].color, Color::BLUE.to_array());
    }
}
