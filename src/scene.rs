// src/scene.rs

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::canvas::Canvas;
use crate::config::{AppConfig, GeneratorSettings};
use crate::error::FormError;
use crate::form::{ControlForm, GenerationRequest};
use crate::generator::ShapeGenerator;
use crate::highlight::highlight_region;
use crate::shapes::{RenderOptions, ShapeKind};
use crate::surface::DisplayList;

/// Rng for a new scene: seeded from config when a seed is set, otherwise from
/// OS entropy.
pub fn scene_rng(settings: &GeneratorSettings) -> StdRng {
    match settings.seed {
        Some(seed) => {
            log::info!("Using fixed shape seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub lines: usize,
    pub circles: usize,
    pub rectangles: usize,
    pub triangles: usize,
    pub parabolas: usize,
    pub trapezoids: usize,
}

impl GenerationReport {
    fn record(&mut self, kind: ShapeKind) {
        match kind {
            ShapeKind::Line => self.lines += 1,
            ShapeKind::Circle => self.circles += 1,
            ShapeKind::Rectangle => self.rectangles += 1,
            ShapeKind::Triangle => self.triangles += 1,
            ShapeKind::Parabola => self.parabolas += 1,
            ShapeKind::Trapezoid => self.trapezoids += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.lines + self.circles + self.rectangles + self.triangles + self.parabolas + self.trapezoids
    }
}

/// The canvas, its retained drawing and the shape generator, driven by the
/// control panel's two actions: changing the scale and generating.
pub struct CanvasScene<R: Rng> {
    config: AppConfig,
    canvas: Canvas,
    display: DisplayList,
    generator: ShapeGenerator<R>,
    render_options: RenderOptions,
}

impl<R: Rng> CanvasScene<R> {
    pub fn new(config: AppConfig, rng: R) -> Self {
        let canvas = Canvas::new(config.canvas.clone());
        let mut display = DisplayList::new(canvas.width(), canvas.height());
        canvas.clear(&mut display);
        canvas.draw_grid(&mut display);

        Self {
            generator: ShapeGenerator::with_settings(rng, &config.generator),
            render_options: RenderOptions::from(&config.generator),
            canvas,
            display,
            config,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn display_list(&self) -> &DisplayList {
        &self.display
    }

    /// Scale slider moved: the canvas is wiped and only the grid is redrawn.
    pub fn set_scale(&mut self, scale: f64) {
        self.canvas.set_scale(scale, &mut self.display);
    }

    pub fn submit(&mut self, form: &ControlForm) -> Result<GenerationReport, FormError> {
        let request = form.parse().map_err(|e| {
            log::error!("Input error: {e}");
            e
        })?;
        Ok(self.generate(&request))
    }

    /// Clear, optional grid, region highlight, then every requested shape.
    pub fn generate(&mut self, request: &GenerationRequest) -> GenerationReport {
        self.canvas.clear(&mut self.display);
        if request.show_grid {
            self.canvas.draw_grid(&mut self.display);
        }
        highlight_region(&mut self.display, &request.region, self.canvas.scale(), &self.config.highlight);

        let placement = request.placement();
        let mut report = GenerationReport::default();
        for shape in self.generator.shapes(&request.counts, &placement) {
            shape.draw(&mut self.display, &self.render_options);
            report.record(shape.kind());
        }

        log::info!(
            "Shapes generated: {} lines, {} circles, {} rectangles, {} triangles, {} parabolas, {} trapezoids",
            report.lines,
            report.circles,
            report.rectangles,
            report.triangles,
            report.parabolas,
            report.trapezoids
        );
        report
    }
}
