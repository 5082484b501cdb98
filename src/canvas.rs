// src/canvas.rs

use glam::{Affine2, Vec2};

use crate::config::CanvasSettings;
use crate::geometry::{Path, Point2};
use crate::surface::DrawSurface;

/// The fixed-size drawing area and its background grid.
///
/// `scale` only changes through [`Canvas::set_scale`], which also recomputes
/// the offset that keeps a zoomed canvas centered in the window.
#[derive(Debug, Clone)]
pub struct Canvas {
    settings: CanvasSettings,
    scale: f64,
    offset: Vec2,
}

impl Canvas {
    pub fn new(settings: CanvasSettings) -> Self {
        Self { settings, scale: 1.0, offset: Vec2::ZERO }
    }

    pub fn width(&self) -> f64 {
        self.settings.width
    }

    pub fn height(&self) -> f64 {
        self.settings.height
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }

    pub fn clear<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        surface.clear(self.settings.background);
    }

    pub fn draw_grid<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        let step = self.settings.grid_step * self.scale;
        if step.is_nan() || step <= 0.0 {
            log::warn!("skipping grid with non-positive step {step}");
            return;
        }

        // A centered zoom shifts content by a negative offset; extend the grid
        // so it still reaches the far edges.
        let reach = if self.settings.center_zoom { self.scale.max(1.0) } else { 1.0 };
        let width = self.width() * reach;
        let height = self.height() * reach;
        let color = self.settings.grid_color;
        let line_width = self.settings.grid_line_width;

        let mut i = 0u32;
        while f64::from(i) * step < width {
            let x = f64::from(i) * step;
            surface.stroke_path(&Path::segment(Point2::new(x, 0.0), Point2::new(x, height)), color, line_width);
            i += 1;
        }
        let mut j = 0u32;
        while f64::from(j) * step < height {
            let y = f64::from(j) * step;
            surface.stroke_path(&Path::segment(Point2::new(0.0, y), Point2::new(width, y)), color, line_width);
            j += 1;
        }
    }

    /// Stores the new scale, repaints the background grid at the new step and
    /// recomputes the centering offset.
    pub fn set_scale<S: DrawSurface + ?Sized>(&mut self, scale: f64, surface: &mut S) {
        self.scale = scale;
        self.clear(surface);
        self.draw_grid(surface);
        self.update_offset();
        log::debug!("canvas scale set to {scale:.2}, offset {:?}", self.offset);
    }

    fn update_offset(&mut self) {
        let w = self.width();
        let h = self.height();
        self.offset = Vec2::new(
            ((w - w * self.scale) / 2.0) as f32,
            ((h - h * self.scale) / 2.0) as f32,
        );
    }

    /// Canvas-to-view transform. Identity unless `center_zoom` is enabled,
    /// in which case it translates by the centering offset.
    pub fn view_transform(&self) -> Affine2 {
        if self.settings.center_zoom {
            Affine2::from_translation(self.offset)
        } else {
            Affine2::IDENTITY
        }
    }
}
