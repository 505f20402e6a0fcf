//! Pages module - per-page chart registries
//!
//! Each page mirrors one tab of the dashboard: a factory builds every chart
//! for the page eagerly from the athlete events table and returns the
//! finished registry.

pub mod medals;
pub mod physique;
pub mod registry;

use thiserror::Error;

pub use registry::{CaptionedChart, ChartRegistry, RenderPayload, Resolution};

use crate::charts::{BuildError, GridError};
use crate::data::TransformError;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("data transform failed: {0}")]
    Transform(#[from] TransformError),
    #[error("chart build failed: {0}")]
    Build(#[from] BuildError),
    #[error("subplot composition failed: {0}")]
    Grid(#[from] GridError),
}
