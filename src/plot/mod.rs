//! Scatter rendering of parsed node data.
//!
//! One point per node at its initial position, colored by the time the node
//! spends idle before its first movement command (the ghost duration). The
//! figure is written to a PNG in the current working directory and then
//! handed to the platform image viewer when a display is available.

use anyhow::Context;
use log::debug;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::colors::colormaps::{ColorMap, ViridisRGB};
use std::ops::Range;
use std::path::Path;
use std::process::Command;

use crate::trace::{MovementTimes, NodePositions};

/// Output image written to the current working directory.
pub const OUTPUT_FILENAME: &str = "ghost_node_analysis.png";

const IMAGE_WIDTH: u32 = 1200;
const IMAGE_HEIGHT: u32 = 800;
/// Width of the colorbar strip on the right edge, in pixels.
const COLORBAR_WIDTH: u32 = 150;
const POINT_RADIUS: i32 = 7;
const POINT_ALPHA: f64 = 0.8;
/// Axis ranges used when the trace holds no nodes at all.
const EMPTY_AXIS_RANGE: Range<f64> = 0.0..100.0;

/// Render the scatter plot and write it to `path`, overwriting any existing
/// file. An empty trace still produces a valid image with default axes.
pub fn render_scatter(
    path: &Path,
    positions: &NodePositions,
    movements: &MovementTimes,
) -> anyhow::Result<()> {
    let points: Vec<(f64, f64, f64)> = positions
        .iter()
        .map(|(node, position)| (position.x, position.y, movements.entry_time(node)))
        .collect();

    let root = BitMapBackend::new(path, (IMAGE_WIDTH, IMAGE_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let (chart_area, bar_area) = root.split_horizontally((IMAGE_WIDTH - COLORBAR_WIDTH) as i32);

    let (x_range, y_range) = axis_ranges(&points);
    let (wait_min, wait_max) = wait_range(&points);

    let mut chart = ChartBuilder::on(&chart_area)
        .caption("Vehicle spawn positions at app start (t=0)", ("sans-serif", 22))
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 50)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("X Position (meters)")
        .y_desc("Y Position (meters)")
        .light_line_style(BLACK.mix(0.08))
        .bold_line_style(BLACK.mix(0.2))
        .label_style(("sans-serif", 14))
        .axis_desc_style(("sans-serif", 16))
        .draw()?;

    // Fill first, outline second, so every point keeps a visible black border.
    chart.draw_series(points.iter().map(|&(x, y, wait)| {
        let color = wait_color(wait, wait_min, wait_max);
        Circle::new((x, y), POINT_RADIUS, color.mix(POINT_ALPHA).filled())
    }))?;
    chart.draw_series(
        points
            .iter()
            .map(|&(x, y, _)| Circle::new((x, y), POINT_RADIUS, BLACK.stroke_width(1))),
    )?;

    draw_colorbar(&bar_area, wait_min, wait_max)?;

    root.present()
        .with_context(|| format!("failed to write '{}'", path.display()))?;
    debug!("Rendered {} points to {}", points.len(), path.display());
    Ok(())
}

/// Open the saved image in the platform viewer.
///
/// On Linux the viewer is only launched when a display server is reachable.
/// Spawn failures propagate; the image is already on disk at this point.
pub fn open_viewer(path: &str) -> anyhow::Result<()> {
    if cfg!(target_os = "linux")
        && std::env::var_os("DISPLAY").is_none()
        && std::env::var_os("WAYLAND_DISPLAY").is_none()
    {
        debug!("No display available, skipping image viewer");
        return Ok(());
    }

    let mut command = if cfg!(target_os = "macos") {
        let mut c = Command::new("open");
        c.arg(path);
        c
    } else if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", "", path]);
        c
    } else {
        let mut c = Command::new("xdg-open");
        c.arg(path);
        c
    };

    command
        .spawn()
        .with_context(|| format!("failed to open image viewer for '{path}'"))?;
    Ok(())
}

/// Color for one node's wait time, normalized into the Viridis colormap.
fn wait_color(wait: f64, wait_min: f64, wait_max: f64) -> RGBColor {
    let t = ((wait - wait_min) / (wait_max - wait_min)).clamp(0.0, 1.0);
    ViridisRGB.get_color(t)
}

/// Data-driven axis ranges with a small margin, or defaults when empty.
fn axis_ranges(points: &[(f64, f64, f64)]) -> (Range<f64>, Range<f64>) {
    if points.is_empty() {
        return (EMPTY_AXIS_RANGE, EMPTY_AXIS_RANGE);
    }

    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for &(x, y, _) in points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    let x_pad = ((x_max - x_min) * 0.05).max(1.0);
    let y_pad = ((y_max - y_min) * 0.05).max(1.0);
    (x_min - x_pad..x_max + x_pad, y_min - y_pad..y_max + y_pad)
}

/// Wait-time span used for color normalization.
///
/// A degenerate span (no nodes, or all waits equal) widens to one second so
/// normalization never divides by zero.
fn wait_range(points: &[(f64, f64, f64)]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &(_, _, wait) in points {
        lo = lo.min(wait);
        hi = hi.max(wait);
    }
    if !lo.is_finite() {
        return (0.0, 1.0);
    }
    if hi - lo < f64::EPSILON {
        return (lo, lo + 1.0);
    }
    (lo, hi)
}

/// Vertical legend strip mapping wait time to color, maximum at the top.
fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    wait_min: f64,
    wait_max: f64,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let (_, height) = area.dim_in_pixel();
    let bar_left = 20;
    let bar_right = bar_left + 30;
    let bar_top = 80;
    let bar_bottom = height as i32 - 60;

    area.draw(&Text::new(
        "Ghost Duration (seconds)",
        (6, 30),
        ("sans-serif", 13),
    ))?;
    area.draw(&Text::new(
        "(time spent sitting idle)",
        (6, 48),
        ("sans-serif", 12),
    ))?;

    let steps = (bar_bottom - bar_top).max(1);
    for i in 0..steps {
        let t = 1.0 - i as f64 / steps as f64;
        let y = bar_top + i;
        area.draw(&Rectangle::new(
            [(bar_left, y), (bar_right, y + 1)],
            ViridisRGB.get_color(t).filled(),
        ))?;
    }
    area.draw(&Rectangle::new(
        [(bar_left, bar_top), (bar_right, bar_bottom)],
        BLACK.stroke_width(1),
    ))?;

    area.draw(&Text::new(
        format!("{wait_max:.1}"),
        (bar_right + 6, bar_top),
        ("sans-serif", 12),
    ))?;
    area.draw(&Text::new(
        format!("{wait_min:.1}"),
        (bar_right + 6, bar_bottom - 10),
        ("sans-serif", 12),
    ))?;
    Ok(())
}
