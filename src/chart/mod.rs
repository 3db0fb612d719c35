//! Chart rendering to PNG files via Plotters.
//!
//! Each render is independent: one `AggregatedSeries` in, one PNG out at a
//! fixed filename under the output directory. Reruns overwrite silently.
//! The returned `ChartArtifact` carries the path plus the caption and page
//! offset the report composer needs.

use std::path::Path;

use plotters::coord::ranged1d::SegmentValue;
use plotters::element::Pie;
use plotters::prelude::*;
use plotters::style::FontTransform;
use plotters::style::full_palette::{CYAN, ORANGE, PURPLE, TEAL};

use crate::aggregate::AggregatedSeries;
use crate::domain::ChartArtifact;
use crate::error::AppError;

/// Fixed chart filenames inside the output directory.
pub const EXPENSES_FILE: &str = "expenses_per_campaign.png";
pub const CLICKS_FILE: &str = "clicks_over_time.png";
pub const TRAFFIC_FILE: &str = "traffic_share.png";

/// Raster size for all chart PNGs. 4:3 keeps the page-width scaling in the
/// report from producing overly tall images.
const CHART_SIZE: (u32, u32) = (960, 720);

type DrawResult = Result<(), Box<dyn std::error::Error>>;

/// Bar chart: total cost per campaign.
pub fn render_expenses_bar(
    out_dir: &Path,
    series: &AggregatedSeries,
) -> Result<ChartArtifact, AppError> {
    let path = out_dir.join(EXPENSES_FILE);
    draw_bar(&path, series).map_err(|e| {
        AppError::export(format!(
            "Failed to render bar chart '{}': {e}",
            path.display()
        ))
    })?;
    Ok(ChartArtifact {
        path,
        caption: "Figure 1: Expenses per Campaign".to_string(),
        y_start_mm: 25.0,
    })
}

/// Line chart: total clicks per date, chronological.
pub fn render_clicks_line(
    out_dir: &Path,
    series: &AggregatedSeries,
) -> Result<ChartArtifact, AppError> {
    let path = out_dir.join(CLICKS_FILE);
    draw_line(&path, series).map_err(|e| {
        AppError::export(format!(
            "Failed to render line chart '{}': {e}",
            path.display()
        ))
    })?;
    Ok(ChartArtifact {
        path,
        caption: "Figure 2: Clicks over Time".to_string(),
        // Larger offset: the rotated date tick labels sit inside the image.
        y_start_mm: 40.0,
    })
}

/// Pie chart: per-campaign share of total clicks.
pub fn render_traffic_pie(
    out_dir: &Path,
    series: &AggregatedSeries,
) -> Result<ChartArtifact, AppError> {
    let path = out_dir.join(TRAFFIC_FILE);
    draw_pie(&path, series).map_err(|e| {
        AppError::export(format!(
            "Failed to render pie chart '{}': {e}",
            path.display()
        ))
    })?;
    Ok(ChartArtifact {
        path,
        caption: "Figure 3: Traffic Share".to_string(),
        y_start_mm: 25.0,
    })
}

fn draw_bar(path: &Path, series: &AggregatedSeries) -> DrawResult {
    let keys: Vec<String> = series.keys().map(str::to_string).collect();
    let y_max = series.values().fold(0.0_f64, f64::max).max(1.0) * 1.1;

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Expenses per Campaign", ("sans-serif", 32))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..keys.len() as u32).into_segmented(), 0.0..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("Cost")
        .x_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(i) => keys.get(*i as usize).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .label_style(("sans-serif", 16))
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(ORANGE.filled())
            .margin(25)
            .data(series.values().enumerate().map(|(i, v)| (i as u32, v))),
    )?;

    root.present()?;
    Ok(())
}

fn draw_line(path: &Path, series: &AggregatedSeries) -> DrawResult {
    let keys: Vec<String> = series.keys().map(str::to_string).collect();
    let points: Vec<(i32, f64)> = series
        .values()
        .enumerate()
        .map(|(i, v)| (i as i32, v))
        .collect();
    let x_max = (keys.len() as i32 - 1).max(1);
    let y_max = series.values().fold(0.0_f64, f64::max).max(1.0) * 1.1;

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Graph: Clicks over Time", ("sans-serif", 32))
        .margin(10)
        .x_label_area_size(80)
        .y_label_area_size(60)
        .build_cartesian_2d(0..x_max, 0.0..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Date")
        .y_desc("Clicks")
        .x_labels(keys.len().min(10))
        .x_label_formatter(&|x| keys.get(*x as usize).cloned().unwrap_or_default())
        // The bitmap text path only supports right-angle rotations, so the
        // date labels are turned 90° to stay readable for dense series. Kept
        // small so the rotated text does not dominate the label area.
        .x_label_style(("sans-serif", 12).into_font().transform(FontTransform::Rotate90))
        .label_style(("sans-serif", 16))
        .draw()?;

    chart.draw_series(LineSeries::new(points.iter().copied(), &GREEN))?;
    chart.draw_series(
        points
            .iter()
            .map(|p| Circle::new(*p, 4, GREEN.filled())),
    )?;

    root.present()?;
    Ok(())
}

fn draw_pie(path: &Path, series: &AggregatedSeries) -> DrawResult {
    const WHEEL: [RGBColor; 6] = [ORANGE, GREEN, BLUE, PURPLE, CYAN, TEAL];

    let sizes: Vec<f64> = series.values().collect();
    let labels: Vec<String> = series.keys().map(str::to_string).collect();
    let colors: Vec<RGBColor> = (0..sizes.len()).map(|i| WHEEL[i % WHEEL.len()]).collect();

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled("Graph: Traffic share by campaigns", ("sans-serif", 32))?;

    let (w, h) = root.dim_in_pixel();
    let center = (w as i32 / 2, h as i32 / 2);
    let radius = f64::from(w.min(h)) * 0.35;

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(90.0);
    pie.label_style(("sans-serif", 20).into_font());
    // Percentage annotations render to one decimal place.
    pie.percentages(("sans-serif", 18).into_font());
    root.draw(&pie)?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::group_by_sum;

    fn series() -> AggregatedSeries {
        group_by_sum(vec![
            ("Alpha".to_string(), 120.0),
            ("Beta".to_string(), 80.0),
            ("Gamma".to_string(), 40.0),
        ])
    }

    #[test]
    fn bar_chart_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = render_expenses_bar(dir.path(), &series()).unwrap();
        let bytes = std::fs::read(&artifact.path).unwrap();
        assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[test]
    fn line_chart_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let dates = group_by_sum(vec![
            ("2024-01-01".to_string(), 50.0),
            ("2024-01-02".to_string(), 75.0),
            ("2024-01-03".to_string(), 60.0),
        ]);
        let artifact = render_clicks_line(dir.path(), &dates).unwrap();
        assert!(artifact.path.exists());
        assert_eq!(artifact.y_start_mm, 40.0);
    }

    #[test]
    fn pie_chart_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = render_traffic_pie(dir.path(), &series()).unwrap();
        assert!(artifact.path.exists());
    }

    #[test]
    fn render_into_missing_directory_fails_with_exit_code_4() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = render_expenses_bar(&missing, &series()).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
