//! Chart Model Module
//! Immutable chart value types: traces plus layout metadata.
//!
//! A `Chart` is built once from the dataset and never mutated afterwards.
//! Rendering is an external collaborator's job; these types only describe
//! what should be drawn.

use serde::Serialize;

/// Bar orientation (vertical = default bar, horizontal = barh).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// How multiple bar or histogram traces share the category axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BarMode {
    Group,
    Overlay,
    Stack,
}

/// The atomic drawable unit of a chart.
///
/// Trace data is plain coordinate arrays or categorical counts; a trace is
/// exclusively owned by the chart that produced it until it is copied into
/// a subplot grid cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trace {
    Scatter {
        name: Option<String>,
        x: Vec<f64>,
        y: Vec<f64>,
    },
    Line {
        name: Option<String>,
        x: Vec<f64>,
        y: Vec<f64>,
        markers: bool,
    },
    Bar {
        name: Option<String>,
        categories: Vec<String>,
        values: Vec<f64>,
        orientation: Orientation,
    },
    Histogram {
        name: Option<String>,
        values: Vec<f64>,
        nbins: usize,
    },
    Pie {
        name: Option<String>,
        labels: Vec<String>,
        values: Vec<f64>,
        colors: Vec<String>,
    },
    Heatmap {
        x_edges: Vec<f64>,
        y_edges: Vec<f64>,
        counts: Vec<Vec<u32>>,
    },
}

impl Trace {
    /// Legend name of the trace, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            Trace::Scatter { name, .. }
            | Trace::Line { name, .. }
            | Trace::Bar { name, .. }
            | Trace::Histogram { name, .. }
            | Trace::Pie { name, .. } => name.as_deref(),
            Trace::Heatmap { .. } => None,
        }
    }

    /// Pie traces may only live in cells declared as pie cells.
    pub fn is_pie(&self) -> bool {
        matches!(self, Trace::Pie { .. })
    }
}

/// Per-cell annotations for a chart assembled from a subplot grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CellAnnotations {
    pub title: Option<String>,
    pub x_title: Option<String>,
    pub y_title: Option<String>,
}

/// Subplot structure of a chart assembled from a grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridLayout {
    pub rows: usize,
    pub cols: usize,
    /// Row-major cell index for each trace, aligned with the chart's traces.
    pub trace_cells: Vec<usize>,
    /// Row-major annotations, one entry per cell.
    pub cells: Vec<CellAnnotations>,
}

/// Layout metadata: titles, colors, legend and bar behavior.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    pub title: Option<String>,
    pub x_title: Option<String>,
    pub y_title: Option<String>,
    pub legend_title: Option<String>,
    pub bar_mode: Option<BarMode>,
    /// Discrete color sequence, assigned to traces in order.
    pub colors: Vec<String>,
    /// Present when the chart was assembled from a subplot grid.
    pub grid: Option<GridLayout>,
}

/// An immutable visual artifact: one or more traces plus layout metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    traces: Vec<Trace>,
    layout: Layout,
}

impl Default for Chart {
    fn default() -> Self {
        Self::new()
    }
}

impl Chart {
    /// Create an empty chart with a default layout.
    pub fn new() -> Self {
        Self {
            traces: Vec::new(),
            layout: Layout::default(),
        }
    }

    /// Set the chart title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.layout.title = Some(title.into());
        self
    }

    /// Set both axis titles.
    pub fn with_axis_titles(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.layout.x_title = Some(x.into());
        self.layout.y_title = Some(y.into());
        self
    }

    /// Set the legend title.
    pub fn with_legend_title(mut self, title: impl Into<String>) -> Self {
        self.layout.legend_title = Some(title.into());
        self
    }

    /// Set the discrete color sequence.
    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.layout.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    /// Set how bar and histogram traces share the category axis.
    pub fn with_bar_mode(mut self, mode: BarMode) -> Self {
        self.layout.bar_mode = Some(mode);
        self
    }

    /// Attach subplot structure to the layout.
    pub fn with_grid(mut self, grid: GridLayout) -> Self {
        self.layout.grid = Some(grid);
        self
    }

    /// Append a trace.
    pub fn with_trace(mut self, trace: Trace) -> Self {
        self.traces.push(trace);
        self
    }

    /// All traces in insertion order.
    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    /// Layout metadata.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Number of traces.
    pub fn len(&self) -> usize {
        self.traces.len()
    }

    /// Check if the chart has no traces.
    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_builder_sets_layout() {
        let chart = Chart::new()
            .with_title("Top 3 Sports")
            .with_axis_titles("Sport", "Count")
            .with_colors(["#FF0000"])
            .with_bar_mode(BarMode::Group);

        assert_eq!(chart.layout().title.as_deref(), Some("Top 3 Sports"));
        assert_eq!(chart.layout().x_title.as_deref(), Some("Sport"));
        assert_eq!(chart.layout().y_title.as_deref(), Some("Count"));
        assert_eq!(chart.layout().colors, vec!["#FF0000".to_string()]);
        assert_eq!(chart.layout().bar_mode, Some(BarMode::Group));
        assert!(chart.is_empty());
    }

    #[test]
    fn traces_keep_insertion_order() {
        let chart = Chart::new()
            .with_trace(Trace::Line {
                name: Some("Height".to_string()),
                x: vec![1992.0, 1996.0],
                y: vec![170.0, 171.5],
                markers: false,
            })
            .with_trace(Trace::Line {
                name: Some("Weight".to_string()),
                x: vec![1992.0, 1996.0],
                y: vec![65.0, 66.0],
                markers: false,
            });

        assert_eq!(chart.len(), 2);
        assert_eq!(chart.traces()[0].name(), Some("Height"));
        assert_eq!(chart.traces()[1].name(), Some("Weight"));
    }

    #[test]
    fn pie_detection() {
        let pie = Trace::Pie {
            name: None,
            labels: vec!["Gold".to_string()],
            values: vec![1.0],
            colors: Vec::new(),
        };
        let bar = Trace::Bar {
            name: None,
            categories: vec!["Judo".to_string()],
            values: vec![2.0],
            orientation: Orientation::Vertical,
        };

        assert!(pie.is_pie());
        assert!(!bar.is_pie());
    }
}
