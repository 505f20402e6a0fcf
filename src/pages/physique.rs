//! Physique Page
//! Height and age distributions for Japanese combat-sport athletes, plus a
//! composed overview grid.

use polars::prelude::DataFrame;
use rayon::prelude::*;
use tracing::info;

use crate::charts::builders::{self, BuilderOptions};
use crate::charts::model::{BarMode, Chart, Orientation};
use crate::charts::subplot::{compose_into_grid, SubplotGrid};
use crate::data::transform;
use crate::pages::registry::{CaptionedChart, ChartRegistry, RenderPayload};
use crate::pages::PageError;

const COMBAT_SPORTS: [&str; 5] = ["Boxing", "Fencing", "Judo", "Taekwondo", "Wrestling"];

const LOW_PHYSICALITY_SPORTS: [&str; 7] = [
    "Fencing",
    "Curling",
    "Golf",
    "Shooting",
    "Equestrianism",
    "Sailing",
    "Archery",
];

const START_YEAR: i32 = 1992;
const END_YEAR: i32 = 2016;

/// Medalist blue over non-medalist red, matching the overlay order (groups
/// are sorted by name).
const GROUP_COLORS: [&str; 2] = ["#0000FF", "#FF0000"];

/// Overlaid medalist/non-medalist height histogram for one sport, limited
/// to individual events in the covered year range.
fn height_histogram(events: &DataFrame, sport: &str, title: &str) -> Result<Chart, PageError> {
    let rows = transform::filter_sports(events, &[sport])?;
    let rows = transform::filter_year_range(&rows, START_YEAR, END_YEAR)?;
    let rows = transform::individual_events(&rows)?;
    let rows = transform::drop_null_rows(&rows, "Height")?;

    let chart = builders::histogram(
        &rows,
        &BuilderOptions::new()
            .x("Height")
            .color("Group")
            .bar_mode(BarMode::Overlay)
            .title(title)
            .colors(GROUP_COLORS),
    )?;
    Ok(chart)
}

/// Build the physique registry. The first two keys map to captioned chart
/// lists; the last is a grid composed through the subplot compositor.
pub fn build_registry(df: &DataFrame) -> Result<ChartRegistry, PageError> {
    let mut registry = ChartRegistry::new();

    let jpn = transform::filter_noc(df, "JPN")?;
    let jpn = transform::with_medalist_flag(&jpn)?;

    // One captioned histogram per combat sport, built in parallel.
    let entries: Vec<CaptionedChart> = COMBAT_SPORTS
        .par_iter()
        .map(|sport| -> Result<CaptionedChart, PageError> {
            let caption = format!("Height Distribution of Japanese Athletes in {sport}");
            let chart = height_histogram(&jpn, sport, &caption)?;
            Ok(CaptionedChart { chart, caption })
        })
        .collect::<Result<Vec<_>, PageError>>()?;
    registry.insert("combat_heights", RenderPayload::CaptionedList(entries));

    // Ages of medalists in individual low-physicality sports, worldwide.
    let low = transform::filter_sports(df, &LOW_PHYSICALITY_SPORTS)?;
    let low = transform::individual_events(&low)?;
    let low = transform::exclude_event_contains(&low, "Equestrianism", &["eventing", "mixed"])?;
    let low = transform::medal_rows(&low)?;
    let low = transform::drop_null_rows(&low, "Age")?;
    let caption =
        "Age Distribution of Olympic Medalists in Individual Low-Physicality Sports (Global)";
    let chart = builders::histogram(
        &low,
        &BuilderOptions::new().x("Age").title(caption),
    )?;
    registry.insert(
        "low_physicality_ages",
        RenderPayload::CaptionedList(vec![CaptionedChart {
            chart,
            caption: caption.to_string(),
        }]),
    );

    // Side-by-side overview: medalist heights next to medal counts per
    // sport, the latter drawn horizontally through the orientation swap.
    let combat = transform::filter_sports(&jpn, &COMBAT_SPORTS)?;
    let combat_medalists = transform::medal_rows(&combat)?;
    let mut grid = SubplotGrid::new(1, 2)
        .with_cell_titles(&["Medalist Heights", "Medals by Sport"])
        .with_title("Japanese Combat Sports Overview");
    compose_into_grid(
        &mut grid,
        builders::histogram,
        &combat_medalists,
        1,
        1,
        Some("Height (cm)"),
        Some("Athletes"),
        &BuilderOptions::new().x("Height").nbins(15),
    )?;
    let medal_counts = transform::value_counts(&combat_medalists, "Sport")?;
    compose_into_grid(
        &mut grid,
        builders::bar_chart,
        &medal_counts,
        1,
        2,
        Some("Sport"),
        Some("Medals"),
        &BuilderOptions::new()
            .x("Sport")
            .y("count")
            .orientation(Orientation::Horizontal),
    )?;
    registry.insert("combat_overview", RenderPayload::Single(grid.into_chart()));

    info!(charts = registry.len(), "physique registry built");
    Ok(registry)
}
