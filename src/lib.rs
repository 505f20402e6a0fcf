//! Olymdash - Olympic athletes CSV analysis & chart registry core
//!
//! Loads a static Olympic athletes dataset into an in-memory table, eagerly
//! builds per-page chart registries and resolves UI selections into render
//! payloads. Rendering itself is an external collaborator's job: the
//! payloads this crate produces are plain serializable chart descriptions.

pub mod charts;
pub mod data;
pub mod pages;

pub use charts::{
    compose_into_grid, BuilderOptions, CellKind, Chart, Orientation, SubplotGrid, Trace,
};
pub use pages::{ChartRegistry, RenderPayload, Resolution};
