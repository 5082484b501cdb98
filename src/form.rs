// src/form.rs

use crate::config::ControlSettings;
use crate::error::FormError;
use crate::generator::{Placement, ShapeCounts};
use crate::geometry::Region;

pub const LINES: &str = "Number of lines";
pub const CIRCLES: &str = "Number of circles";
pub const RECTANGLES: &str = "Number of rectangles";
pub const TRIANGLES: &str = "Number of triangles";
pub const PARABOLAS: &str = "Number of parabolas";
pub const TRAPEZOIDS: &str = "Number of trapezoids";
pub const MIN_X: &str = "Minimum X";
pub const MAX_X: &str = "Maximum X";
pub const MIN_Y: &str = "Minimum Y";
pub const MAX_Y: &str = "Maximum Y";

/// Parses a required integer field, ignoring surrounding whitespace.
pub fn parse_required_field(field: &'static str, text: &str) -> Result<i32, FormError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(FormError::Empty { field });
    }
    trimmed.parse::<i32>().map_err(|source| FormError::Invalid {
        field,
        value: trimmed.to_string(),
        source,
    })
}

/// Everything one "Generate" click needs, already validated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationRequest {
    pub counts: ShapeCounts,
    pub region: Region,
    pub fill: bool,
    pub show_grid: bool,
    pub scale: f64,
    pub density: f64,
}

impl GenerationRequest {
    pub fn placement(&self) -> Placement {
        Placement {
            region: self.region,
            scale: self.scale,
            density: self.density,
            fill: self.fill,
        }
    }
}

/// Raw state of the control panel: text fields as typed, plus the
/// checkboxes and sliders.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlForm {
    pub lines: String,
    pub circles: String,
    pub rectangles: String,
    pub triangles: String,
    pub parabolas: String,
    pub trapezoids: String,
    pub min_x: String,
    pub max_x: String,
    pub min_y: String,
    pub max_y: String,
    pub fill: bool,
    pub show_grid: bool,
    pub scale: f64,
    pub density: f64,
}

impl ControlForm {
    pub fn new(controls: &ControlSettings) -> Self {
        Self {
            lines: String::new(),
            circles: String::new(),
            rectangles: String::new(),
            triangles: String::new(),
            parabolas: String::new(),
            trapezoids: String::new(),
            min_x: String::new(),
            max_x: String::new(),
            min_y: String::new(),
            max_y: String::new(),
            fill: false,
            show_grid: controls.show_grid_default,
            scale: controls.scale_default.clamp(controls.scale_min, controls.scale_max.max(controls.scale_min)),
            density: controls
                .density_default
                .clamp(controls.density_min, controls.density_max.max(controls.density_min)),
        }
    }

    pub fn count_fields_mut(&mut self) -> [(&'static str, &mut String); 6] {
        [
            (LINES, &mut self.lines),
            (CIRCLES, &mut self.circles),
            (RECTANGLES, &mut self.rectangles),
            (TRIANGLES, &mut self.triangles),
            (PARABOLAS, &mut self.parabolas),
            (TRAPEZOIDS, &mut self.trapezoids),
        ]
    }

    pub fn bound_fields_mut(&mut self) -> [(&'static str, &mut String); 4] {
        [
            (MIN_X, &mut self.min_x),
            (MAX_X, &mut self.max_x),
            (MIN_Y, &mut self.min_y),
            (MAX_Y, &mut self.max_y),
        ]
    }

    /// Validates every text field. The first bad field aborts the parse.
    pub fn parse(&self) -> Result<GenerationRequest, FormError> {
        let counts = ShapeCounts {
            lines: parse_required_field(LINES, &self.lines)?,
            circles: parse_required_field(CIRCLES, &self.circles)?,
            rectangles: parse_required_field(RECTANGLES, &self.rectangles)?,
            triangles: parse_required_field(TRIANGLES, &self.triangles)?,
            parabolas: parse_required_field(PARABOLAS, &self.parabolas)?,
            trapezoids: parse_required_field(TRAPEZOIDS, &self.trapezoids)?,
        };
        let region = Region::new(
            parse_required_field(MIN_X, &self.min_x)?,
            parse_required_field(MAX_X, &self.max_x)?,
            parse_required_field(MIN_Y, &self.min_y)?,
            parse_required_field(MAX_Y, &self.max_y)?,
        );
        Ok(GenerationRequest {
            counts,
            region,
            fill: self.fill,
            show_grid: self.show_grid,
            scale: self.scale,
            density: self.density,
        })
    }
}
