// src/lib.rs

pub mod canvas;
pub mod color;
pub mod config;
pub mod error;
pub mod form;
pub mod generator;
pub mod geometry;
pub mod highlight;
pub mod sampler;
pub mod scene;
pub mod shapes;
pub mod surface;
pub mod tessellator;
pub mod vertex;

pub use color::Color;
pub use config::AppConfig;
pub use error::{ConfigError, FormError};
pub use generator::{Placement, ShapeCounts, ShapeGenerator};
pub use geometry::{Path, Point2, Region};
pub use scene::CanvasScene;
pub use shapes::{Paint, ShapeKind, ShapeSpec};
pub use surface::{DisplayList, DrawCommand, DrawSurface};
