//! Subplot Module
//! Fixed-dimension grid of chart cells and the compositor that embeds
//! independently-built charts into it.
//!
//! Cells are addressed by 1-indexed (row, column) pairs. Out-of-range
//! coordinates are a contract violation and fail fast without touching the
//! grid.

use polars::prelude::DataFrame;
use thiserror::Error;
use tracing::debug;

use crate::charts::builders::{BuildError, BuilderOptions};
use crate::charts::model::{CellAnnotations, Chart, GridLayout, Orientation, Trace};

#[derive(Error, Debug)]
pub enum GridError {
    #[error("subplot cell ({row}, {col}) is out of range for a {rows}x{cols} grid")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("trace kind does not match the declared kind of cell ({row}, {col})")]
    KindMismatch { row: usize, col: usize },
    #[error("chart build failed: {0}")]
    Build(#[from] BuildError),
}

/// Declared content kind of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Cartesian,
    Pie,
}

/// One independently addressable cell: traces plus optional axis titles.
#[derive(Debug, Clone, Default)]
pub struct GridCell {
    traces: Vec<Trace>,
    x_title: Option<String>,
    y_title: Option<String>,
}

impl GridCell {
    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    pub fn x_title(&self) -> Option<&str> {
        self.x_title.as_deref()
    }

    pub fn y_title(&self) -> Option<&str> {
        self.y_title.as_deref()
    }
}

/// A 2D arrangement of chart cells with fixed dimensions.
#[derive(Debug, Clone)]
pub struct SubplotGrid {
    rows: usize,
    cols: usize,
    cells: Vec<GridCell>,
    kinds: Vec<CellKind>,
    cell_titles: Vec<Option<String>>,
    title: Option<String>,
}

impl SubplotGrid {
    /// Allocate a rows x cols grid of empty Cartesian cells.
    pub fn new(rows: usize, cols: usize) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        let count = rows * cols;
        Self {
            rows,
            cols,
            cells: vec![GridCell::default(); count],
            kinds: vec![CellKind::Cartesian; count],
            cell_titles: vec![None; count],
            title: None,
        }
    }

    /// Declare every cell as the same kind.
    pub fn with_uniform_kind(mut self, kind: CellKind) -> Self {
        self.kinds.fill(kind);
        self
    }

    /// Set per-cell titles in row-major order.
    pub fn with_cell_titles(mut self, titles: &[&str]) -> Self {
        for (slot, title) in self.cell_titles.iter_mut().zip(titles) {
            *slot = Some((*title).to_string());
        }
        self
    }

    /// Set the grid-wide title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row-major index of a 1-indexed (row, col) pair, or an out-of-range
    /// error when either coordinate falls outside the declared dimensions.
    fn cell_index(&self, row: usize, col: usize) -> Result<usize, GridError> {
        if row == 0 || col == 0 || row > self.rows || col > self.cols {
            return Err(GridError::OutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok((row - 1) * self.cols + (col - 1))
    }

    /// Declared kind of a cell.
    pub fn cell_kind(&self, row: usize, col: usize) -> Result<CellKind, GridError> {
        Ok(self.kinds[self.cell_index(row, col)?])
    }

    /// Read access to a cell.
    pub fn cell(&self, row: usize, col: usize) -> Result<&GridCell, GridError> {
        Ok(&self.cells[self.cell_index(row, col)?])
    }

    /// Copy a trace into a cell. The trace kind must match the cell's
    /// declared kind.
    pub fn add_trace(&mut self, row: usize, col: usize, trace: Trace) -> Result<(), GridError> {
        let index = self.cell_index(row, col)?;
        let expects_pie = self.kinds[index] == CellKind::Pie;
        if trace.is_pie() != expects_pie {
            return Err(GridError::KindMismatch { row, col });
        }
        self.cells[index].traces.push(trace);
        Ok(())
    }

    /// Set axis titles for one cell only. `None` arguments leave the
    /// existing title untouched.
    pub fn set_axis_titles(
        &mut self,
        row: usize,
        col: usize,
        x_title: Option<&str>,
        y_title: Option<&str>,
    ) -> Result<(), GridError> {
        let index = self.cell_index(row, col)?;
        if let Some(x_title) = x_title {
            self.cells[index].x_title = Some(x_title.to_string());
        }
        if let Some(y_title) = y_title {
            self.cells[index].y_title = Some(y_title.to_string());
        }
        Ok(())
    }

    /// Flatten the grid into a single chart whose layout carries the
    /// subplot structure. Traces are ordered cell by cell, row-major.
    pub fn into_chart(self) -> Chart {
        let mut traces = Vec::new();
        let mut trace_cells = Vec::new();
        let mut cells = Vec::with_capacity(self.cells.len());

        for (index, cell) in self.cells.into_iter().enumerate() {
            cells.push(CellAnnotations {
                title: self.cell_titles[index].clone(),
                x_title: cell.x_title,
                y_title: cell.y_title,
            });
            for trace in cell.traces {
                traces.push(trace);
                trace_cells.push(index);
            }
        }

        let mut chart = Chart::new().with_grid(GridLayout {
            rows: self.rows,
            cols: self.cols,
            trace_cells,
            cells,
        });
        if let Some(title) = self.title {
            chart = chart.with_title(title);
        }
        for trace in traces {
            chart = chart.with_trace(trace);
        }
        chart
    }
}

/// Embed the output of a 2D Cartesian chart builder into one cell of the
/// grid.
///
/// When the options request horizontal orientation, the x/y data columns
/// and the axis labels are swapped before the builder runs, so one builder
/// serves both orientations without the caller re-deriving labels. The
/// swap operates on a local copy; the caller's options are never modified.
///
/// The standalone chart the builder returns is dropped after its traces
/// are copied into the target cell; no reference to it survives and no
/// other cell is touched. A builder failure propagates unchanged and
/// leaves the grid in its prior state.
#[allow(clippy::too_many_arguments)]
pub fn compose_into_grid<F>(
    grid: &mut SubplotGrid,
    builder: F,
    df: &DataFrame,
    row: usize,
    col: usize,
    x_label: Option<&str>,
    y_label: Option<&str>,
    options: &BuilderOptions,
) -> Result<(), GridError>
where
    F: FnOnce(&DataFrame, &BuilderOptions) -> Result<Chart, BuildError>,
{
    // Validate the target before building anything so a failed call leaves
    // no partial mutation behind.
    let kind = grid.cell_kind(row, col)?;

    let mut options = options.clone();
    let mut x_label = x_label;
    let mut y_label = y_label;
    if options.orientation == Some(Orientation::Horizontal) {
        std::mem::swap(&mut options.x, &mut options.y);
        std::mem::swap(&mut x_label, &mut y_label);
    }

    let chart = builder(df, &options)?;
    if chart
        .traces()
        .iter()
        .any(|trace| trace.is_pie() != (kind == CellKind::Pie))
    {
        return Err(GridError::KindMismatch { row, col });
    }

    debug!(row, col, traces = chart.len(), "composing chart into grid cell");
    for trace in chart.traces() {
        grid.add_trace(row, col, trace.clone())?;
    }
    grid.set_axis_titles(row, col, x_label, y_label)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::builders;
    use polars::prelude::*;

    fn sample_df() -> DataFrame {
        DataFrame::new(vec![
            Column::new("A".into(), &["Judo", "Swimming", "Judo"]),
            Column::new("B".into(), &[2.0f64, 1.0, 3.0]),
        ])
        .unwrap()
    }

    fn assert_cell_untouched(grid: &SubplotGrid, row: usize, col: usize) {
        let cell = grid.cell(row, col).unwrap();
        assert!(cell.traces().is_empty());
        assert!(cell.x_title().is_none());
        assert!(cell.y_title().is_none());
    }

    #[test]
    fn compose_targets_one_cell_only() {
        let mut grid = SubplotGrid::new(1, 4);
        compose_into_grid(
            &mut grid,
            builders::bar_chart,
            &sample_df(),
            1,
            2,
            Some("Sport"),
            Some("Count"),
            &BuilderOptions::new().x("A").y("B"),
        )
        .unwrap();

        let target = grid.cell(1, 2).unwrap();
        assert_eq!(target.traces().len(), 1);
        assert_eq!(target.x_title(), Some("Sport"));
        assert_eq!(target.y_title(), Some("Count"));

        assert_cell_untouched(&grid, 1, 1);
        assert_cell_untouched(&grid, 1, 3);
        assert_cell_untouched(&grid, 1, 4);
    }

    #[test]
    fn orientation_swap_pairs_with_swapped_call() {
        let df = sample_df();

        let mut horizontal = SubplotGrid::new(1, 1);
        compose_into_grid(
            &mut horizontal,
            builders::bar_chart,
            &df,
            1,
            1,
            Some("X"),
            Some("Y"),
            &BuilderOptions::new()
                .x("A")
                .y("B")
                .orientation(Orientation::Horizontal),
        )
        .unwrap();

        // The same grid cell contents must come out of the pre-swapped call
        // with no explicit orientation (the builder infers horizontal from
        // the numeric x column).
        let mut swapped = SubplotGrid::new(1, 1);
        compose_into_grid(
            &mut swapped,
            builders::bar_chart,
            &df,
            1,
            1,
            Some("Y"),
            Some("X"),
            &BuilderOptions::new().x("B").y("A"),
        )
        .unwrap();

        let lhs = horizontal.cell(1, 1).unwrap();
        let rhs = swapped.cell(1, 1).unwrap();
        assert_eq!(lhs.traces(), rhs.traces());
        assert_eq!(lhs.x_title(), rhs.x_title());
        assert_eq!(lhs.y_title(), rhs.y_title());
    }

    #[test]
    fn out_of_range_fails_without_partial_mutation() {
        let mut grid = SubplotGrid::new(1, 4);
        let err = compose_into_grid(
            &mut grid,
            builders::bar_chart,
            &sample_df(),
            2,
            1,
            None,
            None,
            &BuilderOptions::new().x("A").y("B"),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            GridError::OutOfRange {
                row: 2,
                col: 1,
                rows: 1,
                cols: 4
            }
        ));
        for col in 1..=4 {
            assert_cell_untouched(&grid, 1, col);
        }
    }

    #[test]
    fn builder_failure_propagates_and_leaves_grid_untouched() {
        let mut grid = SubplotGrid::new(1, 1);
        let err = compose_into_grid(
            &mut grid,
            |_, _| Err(BuildError::MissingOption("x")),
            &sample_df(),
            1,
            1,
            Some("Sport"),
            None,
            &BuilderOptions::new(),
        )
        .unwrap_err();

        assert!(matches!(err, GridError::Build(_)));
        assert_cell_untouched(&grid, 1, 1);
    }

    #[test]
    fn pie_traces_are_rejected_by_cartesian_cells() {
        let mut grid = SubplotGrid::new(1, 2);
        let pie = Trace::Pie {
            name: None,
            labels: vec!["Gold".to_string()],
            values: vec![1.0],
            colors: Vec::new(),
        };
        let err = grid.add_trace(1, 1, pie.clone()).unwrap_err();
        assert!(matches!(err, GridError::KindMismatch { row: 1, col: 1 }));

        let mut pies = SubplotGrid::new(1, 2).with_uniform_kind(CellKind::Pie);
        pies.add_trace(1, 2, pie).unwrap();
        assert_eq!(pies.cell(1, 2).unwrap().traces().len(), 1);
    }

    #[test]
    fn into_chart_keeps_cell_structure() {
        let mut grid = SubplotGrid::new(1, 2)
            .with_cell_titles(&["Left", "Right"])
            .with_title("Overview");
        compose_into_grid(
            &mut grid,
            builders::bar_chart,
            &sample_df(),
            1,
            2,
            Some("Sport"),
            Some("Count"),
            &BuilderOptions::new().x("A").y("B"),
        )
        .unwrap();

        let chart = grid.into_chart();
        assert_eq!(chart.layout().title.as_deref(), Some("Overview"));

        let layout_grid = chart.layout().grid.as_ref().unwrap();
        assert_eq!((layout_grid.rows, layout_grid.cols), (1, 2));
        assert_eq!(layout_grid.trace_cells, vec![1]);
        assert_eq!(layout_grid.cells[0].title.as_deref(), Some("Left"));
        assert_eq!(layout_grid.cells[1].title.as_deref(), Some("Right"));
        assert_eq!(layout_grid.cells[1].x_title.as_deref(), Some("Sport"));
        assert_eq!(layout_grid.cells[1].y_title.as_deref(), Some("Count"));
    }
}
