// src/highlight.rs

use crate::config::HighlightStyle;
use crate::geometry::{Path, Region};
use crate::surface::DrawSurface;

pub fn highlight_region<S: DrawSurface + ?Sized>(
    surface: &mut S,
    region: &Region,
    scale: f64,
    style: &HighlightStyle,
) {
    let (origin, width, height) = region.scaled_rect(scale);
    let rect = Path::rect(origin, width, height);
    surface.fill_path(&rect, style.fill);
    surface.stroke_path(&rect, style.border, style.border_width);
}
