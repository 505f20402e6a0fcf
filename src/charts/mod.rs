//! Charts module - chart model, builders and subplot composition

pub mod builders;
pub mod model;
pub mod subplot;

pub use builders::{BuildError, BuilderOptions};
pub use model::{BarMode, CellAnnotations, Chart, GridLayout, Layout, Orientation, Trace};
pub use subplot::{compose_into_grid, CellKind, GridError, SubplotGrid};
