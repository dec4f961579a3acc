use std::f64::consts::{FRAC_PI_2, PI};

use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::charts::bootstrap::ChartInstance;
use crate::charts::format::share_label;
use crate::charts::spec::{
    axis_max, category_label, BarColoring, ChartKind, ChartSpec, LegendStyle, TickFormat,
};
use crate::charts::theme::ChartTheme;
use crate::error::SiteError;

fn render_err<E: std::fmt::Display>(e: E) -> SiteError {
    SiteError::Render(e.to_string())
}

/// A chart drawn onto a canvas. Destroying it wipes the canvas.
pub struct CanvasChart {
    canvas_id: String,
    canvas: HtmlCanvasElement,
}

impl CanvasChart {
    pub fn render(canvas: HtmlCanvasElement, spec: &ChartSpec, theme: &ChartTheme) -> Result<Self, SiteError> {
        let chart = Self {
            canvas_id: spec.canvas_id.to_string(),
            canvas,
        };
        chart.clear()?;
        draw(&chart.canvas, spec, theme)?;
        Ok(chart)
    }

    fn clear(&self) -> Result<(), SiteError> {
        let context = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| SiteError::Render("2d context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SiteError::Render("unexpected context type".to_string()))?;
        context.clear_rect(0.0, 0.0, self.canvas.width() as f64, self.canvas.height() as f64);
        Ok(())
    }
}

impl ChartInstance for CanvasChart {
    fn canvas_id(&self) -> &str {
        &self.canvas_id
    }

    fn destroy(&mut self) {
        let _ = self.clear();
    }
}

pub fn draw(canvas: &HtmlCanvasElement, spec: &ChartSpec, theme: &ChartTheme) -> Result<(), SiteError> {
    let backend = CanvasBackend::with_canvas_object(canvas.clone())
        .ok_or_else(|| SiteError::Render(format!("no canvas backend for {}", spec.canvas_id)))?;
    let root = backend.into_drawing_area();
    root.fill(&theme.color(theme.palette.white)).map_err(render_err)?;

    match &spec.kind {
        ChartKind::Line { ticks } => draw_line(&root, spec, *ticks, theme)?,
        ChartKind::Bar { ticks, y_max, coloring } => draw_bars(&root, spec, *ticks, *y_max, *coloring, theme)?,
        ChartKind::Doughnut { cutout } => draw_doughnut(&root, spec, *cutout, theme)?,
    }

    root.present().map_err(render_err)?;
    Ok(())
}

fn draw_line(
    root: &DrawingArea<CanvasBackend, plotters::coord::Shift>,
    spec: &ChartSpec,
    ticks: TickFormat,
    theme: &ChartTheme,
) -> Result<(), SiteError> {
    let labels = &spec.dataset.labels;
    let x_max = labels.len().saturating_sub(1).max(1) as f64;
    let y_max = axis_max(spec.dataset.max_value(), None);
    let tick_color = theme.color(theme.tick_color);
    let grid_color = theme.color(theme.grid_color);

    let mut chart = ChartBuilder::on(root)
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .bold_line_style(grid_color.stroke_width(1))
        .light_line_style(TRANSPARENT.stroke_width(0))
        .axis_style(TRANSPARENT.stroke_width(0))
        .x_labels(labels.len())
        .x_label_formatter(&|x| category_label(labels, *x))
        .y_label_formatter(&|y| ticks.label(*y))
        .label_style((theme.font_family, f64::from(theme.font_size)).into_font().color(&tick_color))
        .draw()
        .map_err(render_err)?;

    for (idx, series) in spec.dataset.series.iter().enumerate() {
        let color = theme.color(spec.color_at(idx));
        let points: Vec<(f64, f64)> = series
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v))
            .collect();

        chart
            .draw_series(
                AreaSeries::new(points.iter().copied(), 0.0, color.mix(theme.area_opacity))
                    .border_style(color.stroke_width(theme.line_width)),
            )
            .map_err(render_err)?
            .label(series.label.as_str())
            .legend(move |(x, y)| Circle::new((x + 5, y), 5, color.filled()));

        chart
            .draw_series(
                points
                    .iter()
                    .map(|p| Circle::new(*p, theme.point_radius, color.filled())),
            )
            .map_err(render_err)?;
    }

    if spec.legend != LegendStyle::Hidden {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8).filled())
            .border_style(TRANSPARENT.stroke_width(0))
            .label_font((theme.font_family, f64::from(theme.font_size)).into_font().color(&theme.color(theme.text_color)))
            .draw()
            .map_err(render_err)?;
    }

    Ok(())
}

/// Horizontal extent of bar `series` within category `category`.
pub fn bar_span(category: usize, series: usize, series_count: usize) -> (f64, f64) {
    const GROUP_WIDTH: f64 = 0.8;
    let count = series_count.max(1) as f64;
    let width = GROUP_WIDTH / count;
    let left = category as f64 - GROUP_WIDTH / 2.0 + series as f64 * width;
    (left, left + width)
}

fn draw_bars(
    root: &DrawingArea<CanvasBackend, plotters::coord::Shift>,
    spec: &ChartSpec,
    ticks: TickFormat,
    y_max: Option<f64>,
    coloring: BarColoring,
    theme: &ChartTheme,
) -> Result<(), SiteError> {
    let labels = &spec.dataset.labels;
    let y_top = axis_max(spec.dataset.max_value(), y_max);
    let tick_color = theme.color(theme.tick_color);
    let grid_color = theme.color(theme.grid_color);

    let mut chart = ChartBuilder::on(root)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5f64..(labels.len() as f64 - 0.5), 0f64..y_top)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .bold_line_style(grid_color.stroke_width(1))
        .light_line_style(TRANSPARENT.stroke_width(0))
        .axis_style(TRANSPARENT.stroke_width(0))
        .x_labels(labels.len())
        .x_label_formatter(&|x| category_label(labels, *x))
        .y_label_formatter(&|y| ticks.label(*y))
        .label_style((theme.font_family, f64::from(theme.font_size)).into_font().color(&tick_color))
        .draw()
        .map_err(render_err)?;

    let series_count = spec.dataset.series.len();
    for (s, series) in spec.dataset.series.iter().enumerate() {
        let series_color = theme.color(spec.color_at(s));
        let bars = series.values.iter().enumerate().map(|(i, v)| {
            let (left, right) = bar_span(i, s, series_count);
            let color = match coloring {
                BarColoring::BySeries => series_color,
                BarColoring::ByCategory => theme.color(spec.color_at(i)),
            };
            Rectangle::new([(left, 0.0), (right, v.min(y_top))], color.filled())
        });

        let anno = chart.draw_series(bars).map_err(render_err)?;
        if coloring == BarColoring::BySeries {
            anno.label(series.label.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], series_color.filled()));
        }
    }

    if spec.legend != LegendStyle::Hidden && coloring == BarColoring::BySeries {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8).filled())
            .border_style(TRANSPARENT.stroke_width(0))
            .label_font((theme.font_family, f64::from(theme.font_size)).into_font().color(&theme.color(theme.text_color)))
            .draw()
            .map_err(render_err)?;
    }

    Ok(())
}

/// `(start, sweep)` angles in radians for each value, starting at twelve
/// o'clock and running clockwise. Empty when the values sum to zero.
pub fn doughnut_slices(values: &[f64]) -> Vec<(f64, f64)> {
    let total: f64 = values.iter().filter(|v| **v > 0.0).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    let mut start = -FRAC_PI_2;
    values
        .iter()
        .map(|v| {
            let sweep = v.max(0.0) / total * 2.0 * PI;
            let slice = (start, sweep);
            start += sweep;
            slice
        })
        .collect()
}

/// Outline of one ring segment in pixel coordinates.
pub fn wedge_polygon(center: (i32, i32), outer: f64, inner: f64, start: f64, sweep: f64) -> Vec<(i32, i32)> {
    let steps = ((sweep / (PI / 90.0)).ceil() as usize).max(2);
    let point = |radius: f64, angle: f64| {
        (
            center.0 + (radius * angle.cos()).round() as i32,
            center.1 + (radius * angle.sin()).round() as i32,
        )
    };
    let mut points: Vec<(i32, i32)> = (0..=steps)
        .map(|i| point(outer, start + sweep * i as f64 / steps as f64))
        .collect();
    points.extend((0..=steps).rev().map(|i| point(inner, start + sweep * i as f64 / steps as f64)));
    points
}

fn draw_doughnut(
    root: &DrawingArea<CanvasBackend, plotters::coord::Shift>,
    spec: &ChartSpec,
    cutout: f64,
    theme: &ChartTheme,
) -> Result<(), SiteError> {
    let (width, height) = root.dim_in_pixel();
    let (width, height) = (width as f64, height as f64);
    let ring_width = if spec.legend == LegendStyle::Hidden { width } else { width * 0.55 };
    let center = ((ring_width / 2.0) as i32, (height / 2.0) as i32);
    let outer = (ring_width / 2.0).min(height / 2.0) - 10.0;
    let inner = outer * cutout;
    let white = theme.color(theme.palette.white);

    let Some(series) = spec.dataset.series.first() else {
        return Ok(());
    };

    for (i, (start, sweep)) in doughnut_slices(&series.values).into_iter().enumerate() {
        if sweep <= 0.0 {
            continue;
        }
        let points = wedge_polygon(center, outer, inner, start, sweep);
        let color = theme.color(spec.color_at(i));
        root.draw(&Polygon::new(points.clone(), color.filled())).map_err(render_err)?;
        let mut outline = points;
        if let Some(first) = outline.first().copied() {
            outline.push(first);
        }
        root.draw(&PathElement::new(outline, white.stroke_width(3))).map_err(render_err)?;
    }

    if spec.legend == LegendStyle::Hidden {
        return Ok(());
    }

    let total = spec.dataset.first_series_total();
    let text_style = (theme.font_family, f64::from(theme.font_size))
        .into_font()
        .color(&theme.color(theme.text_color));
    let legend_x = (ring_width + 10.0) as i32;
    let row_height = 22;
    let legend_top = center.1 - (spec.dataset.labels.len() as i32 * row_height) / 2;

    for (i, label) in spec.dataset.labels.iter().enumerate() {
        let value = series.values.get(i).copied().unwrap_or(0.0);
        let text = match spec.legend {
            LegendStyle::Share => share_label(label, value, total),
            _ => label.clone(),
        };
        let y = legend_top + i as i32 * row_height;
        root.draw(&Circle::new((legend_x, y), 5, theme.color(spec.color_at(i)).filled()))
            .map_err(render_err)?;
        root.draw(&Text::new(text, (legend_x + 12, y - 7), text_style.clone()))
            .map_err(render_err)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_cover_full_circle() {
        let slices = doughnut_slices(&[8420.0, 3280.0, 6720.0, 1200.0, 800.0, 1580.0]);
        let swept: f64 = slices.iter().map(|(_, s)| s).sum();
        assert!((swept - 2.0 * PI).abs() < 1e-9);
        assert!((slices[0].0 + FRAC_PI_2).abs() < 1e-12);
        for pair in slices.windows(2) {
            assert!((pair[0].0 + pair[0].1 - pair[1].0).abs() < 1e-9);
        }
    }

    #[test]
    fn empty_or_zero_values_produce_no_slices() {
        assert!(doughnut_slices(&[]).is_empty());
        assert!(doughnut_slices(&[0.0, 0.0]).is_empty());
    }

    #[test]
    fn wedge_has_outer_and_inner_arcs() {
        let points = wedge_polygon((100, 100), 50.0, 30.0, -FRAC_PI_2, PI / 2.0);
        // Starts at twelve o'clock on the outer ring.
        assert_eq!(points[0], (100, 50));
        // Ends at twelve o'clock on the inner ring.
        assert_eq!(*points.last().unwrap(), (100, 70));
        assert_eq!(points.len() % 2, 0);
    }

    #[test]
    fn grouped_bars_do_not_overlap() {
        let spans: Vec<_> = (0..4).map(|s| bar_span(2, s, 4)).collect();
        assert!((spans[0].0 - 1.6).abs() < 1e-9);
        assert!((spans[3].1 - 2.4).abs() < 1e-9);
        for pair in spans.windows(2) {
            assert!(pair[0].1 <= pair[1].0 + 1e-12);
        }
    }

    #[test]
    fn single_series_bar_is_centred() {
        let (left, right) = bar_span(0, 0, 1);
        assert!((left + right).abs() < 1e-12);
    }
}
