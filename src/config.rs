// src/config.rs

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::ConfigError;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV_VAR: &str = "SHAPE_CANVAS_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub canvas: CanvasSettings,
    pub highlight: HighlightStyle,
    pub generator: GeneratorSettings,
    pub controls: ControlSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub width: f64,
    pub height: f64,
    pub background: Color,
    pub grid_step: f64,
    pub grid_color: Color,
    pub grid_line_width: f64,
    /// Apply the zoom-centering offset computed by `Canvas::set_scale`
    /// to everything drawn on the canvas.
    pub center_zoom: bool,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 1000.0,
            background: Color::WHITE,
            grid_step: 20.0,
            grid_color: Color::LIGHT_GRAY,
            grid_line_width: 0.5,
            center_zoom: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightStyle {
    pub fill: Color,
    pub border: Color,
    pub border_width: f64,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            fill: Color::LIGHT_BLUE.with_alpha(0.3),
            border: Color::BLUE,
            border_width: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Seed for the shape rng; `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Cap on resampling the far end of a line before it is pulled in.
    pub max_line_attempts: u32,
    pub line_color: Color,
    /// Width of every shape outline and line.
    pub stroke_width: f64,
    pub ellipse_segments: usize,
    pub parabola_steps: usize,
    /// Multiply rectangle position and size by the scale factor again when
    /// drawing, on top of the size scaling applied during generation.
    pub rescale_rectangles_on_draw: bool,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            seed: None,
            max_line_attempts: 1000,
            line_color: Color::BLACK,
            stroke_width: 2.0,
            ellipse_segments: 48,
            parabola_steps: 100,
            rescale_rectangles_on_draw: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSettings {
    pub scale_min: f64,
    pub scale_max: f64,
    pub scale_default: f64,
    pub density_min: f64,
    pub density_max: f64,
    pub density_default: f64,
    pub show_grid_default: bool,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            scale_min: 1.0,
            scale_max: 1.5,
            scale_default: 1.0,
            density_min: 15.0,
            density_max: 50.0,
            // Sliders clamp their initial value into range.
            density_default: 15.0,
            show_grid_default: true,
        }
    }
}

impl AppConfig {
    pub fn from_json_str(path: &Path, json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(path, &json)
    }

    /// Loads the file named by [`CONFIG_ENV_VAR`], or the defaults when unset.
    pub fn load_from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                let path = std::path::PathBuf::from(path);
                log::info!("Loading configuration from {}", path.display());
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }
}
