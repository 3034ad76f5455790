use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use tracing::debug;

use crate::render::chart::{Chart, ChartKind};

/// Fraction of a category slot covered by its bars.
const GROUP_WIDTH: f64 = 0.8;

/// Width of the strip right of the plot that holds the legend.
const LEGEND_WIDTH: u32 = 130;

/// Draws `chart` into a PNG at `path`.
///
/// A chart without categories or values still produces an image with its
/// title and axes.
pub fn render(chart: &Chart, path: &Path) -> Result<()> {
    draw(chart, path).with_context(|| format!("failed to render chart {}", path.display()))?;
    debug!(path = %path.display(), title = %chart.title, "Chart written");
    Ok(())
}

fn draw(chart: &Chart, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, chart.size).into_drawing_area();
    root.fill(&WHITE)?;

    let (plot_area, legend_area) = if chart.has_legend() {
        let (width, _) = root.dim_in_pixel();
        let (plot, legend) = root.split_horizontally(width.saturating_sub(LEGEND_WIDTH));
        (plot, Some(legend))
    } else {
        (root.clone(), None)
    };

    let slots = chart.categories.len().max(1);
    let ceiling = chart.value_ceiling();
    let categories = &chart.categories;

    let mut ctx = ChartBuilder::on(&plot_area)
        .caption(&chart.title, ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5f64..(slots as f64 - 0.5), 0f64..ceiling)?;

    ctx.configure_mesh()
        .disable_x_mesh()
        .x_labels(slots)
        .x_label_formatter(&|x: &f64| category_label(categories, *x))
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .draw()?;

    let label_style = TextStyle::from(("sans-serif", 13).into_font()).color(&BLACK);
    let above = label_style.pos(Pos::new(HPos::Center, VPos::Bottom));
    let centred = label_style.pos(Pos::new(HPos::Center, VPos::Center));
    let gap = ceiling * 0.01;

    let mut labels = Vec::new();
    let mut stack_base = vec![0.0f64; chart.categories.len()];
    let width = match chart.kind {
        ChartKind::StackedBar => GROUP_WIDTH,
        ChartKind::Bar | ChartKind::Histogram => GROUP_WIDTH / chart.series.len().max(1) as f64,
    };

    for (s, series) in chart.series.iter().enumerate() {
        let mut bars: Vec<Rectangle<(f64, f64)>> = Vec::new();
        for (i, value) in series.values.iter().enumerate().take(chart.categories.len()) {
            let Some(value) = value.filter(|v| v.is_finite()) else {
                continue;
            };
            let centre = i as f64;

            match chart.kind {
                ChartKind::StackedBar => {
                    if value <= 0.0 {
                        continue;
                    }
                    let (lo, hi) = (stack_base[i], stack_base[i] + value);
                    stack_base[i] = hi;
                    bars.push(Rectangle::new(
                        [(centre - width / 2.0, lo), (centre + width / 2.0, hi)],
                        series.color_at(i).filled(),
                    ));
                    labels.push(Text::new(
                        chart.annotation.format(value),
                        (centre, (lo + hi) / 2.0),
                        centred.clone(),
                    ));
                }
                ChartKind::Bar | ChartKind::Histogram => {
                    let left = centre - GROUP_WIDTH / 2.0 + s as f64 * width;
                    bars.push(Rectangle::new(
                        [(left, 0.0), (left + width, value)],
                        series.color_at(i).filled(),
                    ));
                    labels.push(Text::new(
                        chart.annotation.format(value),
                        (left + width / 2.0, value + gap),
                        above.clone(),
                    ));
                }
            }
        }

        ctx.draw_series(bars)?;
    }

    ctx.draw_series(labels)?;

    if let Some(area) = &legend_area {
        draw_legend(chart, area)?;
    }

    root.present()?;
    Ok(())
}

/// Series swatches stacked top-down, outside the plot so they never cover a bar.
fn draw_legend(chart: &Chart, area: &DrawingArea<BitMapBackend<'_>, Shift>) -> Result<()> {
    let style = TextStyle::from(("sans-serif", 13).into_font())
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Center));

    for (y, series) in legend_rows(chart.series.len()).zip(&chart.series) {
        area.draw(&Rectangle::new(
            [(6, y - 6), (18, y + 6)],
            series.color_at(0).filled(),
        ))?;
        area.draw(&Text::new(series.name.clone(), (24, y), style.clone()))?;
    }
    Ok(())
}

/// Vertical pixel centre of each legend row, starting below the caption.
fn legend_rows(count: usize) -> impl Iterator<Item = i32> {
    (0..count).map(|i| 50 + i as i32 * 22)
}

/// Tick label for axis position `x`: the category name at whole positions only.
fn category_label(categories: &[String], x: f64) -> String {
    let nearest = x.round();
    if (x - nearest).abs() > 1e-6 || nearest < 0.0 {
        return String::new();
    }
    categories.get(nearest as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::chart::{Annotation, Series};

    #[test]
    fn test_category_label_whole_positions() {
        let categories = vec!["Lunch".to_string(), "Dinner".to_string()];
        assert_eq!(category_label(&categories, 0.0), "Lunch");
        assert_eq!(category_label(&categories, 1.0), "Dinner");
    }

    #[test]
    fn test_legend_rows_do_not_overlap() {
        let rows: Vec<i32> = legend_rows(3).collect();
        assert_eq!(rows, [50, 72, 94]);
    }

    #[test]
    fn test_render_all_undefined_values() {
        let chart = Chart {
            kind: ChartKind::Bar,
            title: "Average Ratings Overview - Nowhere".to_string(),
            x_label: "Rating Category".to_string(),
            y_label: "Average Rating".to_string(),
            categories: vec!["Food Rating".to_string(), "Drink Rating".to_string()],
            series: vec![Series {
                name: "Average".to_string(),
                colors: vec![RGBColor(0x1f, 0x77, 0xb4)],
                values: vec![None, None],
            }],
            size: (400, 300),
            annotation: Annotation::Mean,
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("undefined.png");

        render(&chart, &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_render_stacked_with_legend_and_no_categories() {
        let chart = Chart {
            kind: ChartKind::StackedBar,
            title: "Empty".to_string(),
            x_label: "Eating Time".to_string(),
            y_label: "Number of Feedbacks".to_string(),
            categories: Vec::new(),
            series: vec![
                Series { name: "1-3 Stars".to_string(), colors: Vec::new(), values: Vec::new() },
                Series { name: "4-5 Stars".to_string(), colors: Vec::new(), values: Vec::new() },
            ],
            size: (400, 300),
            annotation: Annotation::Count,
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");

        render(&chart, &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_category_label_off_grid() {
        let categories = vec!["Lunch".to_string()];
        assert_eq!(category_label(&categories, 0.5), "");
        assert_eq!(category_label(&categories, -1.0), "");
        assert_eq!(category_label(&categories, 3.0), "");
    }
}
