// Chart renderer backed by the plotters bitmap backend
use crate::application::chart_service::ChartRenderer;
use crate::domain::chart::{gradient_at, ChartPlan, Encoding, BAR_ALPHA};
use crate::domain::error::ChartError;
use anyhow::Context;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::{Path, PathBuf};

const GRADIENT_COLUMNS: i32 = 256;
const CORNER_STEPS: usize = 8;
const LABEL_FONT: (&str, f64) = ("sans-serif", 14.0);
const MARKER_RADIUS: i32 = 4;

#[derive(Debug, Clone)]
pub struct PlottersRenderer {
    output_dir: PathBuf,
    width: u32,
    height: u32,
}

fn render_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

fn rgb((r, g, b): (u8, u8, u8)) -> RGBColor {
    RGBColor(r, g, b)
}

impl PlottersRenderer {
    pub fn new(output_dir: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            output_dir: output_dir.into(),
            width,
            height,
        }
    }

    pub fn chart_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{}.png", name))
    }

    fn draw(&self, plan: &ChartPlan, path: &Path) -> Result<(), ChartError> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&rgb(gradient_at(0.5))).map_err(render_err)?;

        let (margin_left, margin_right) = if plan.y_axis_on_right { (30, 70) } else { (70, 30) };
        let (x_min, x_max) = plan.x_range;
        let mut chart = ChartBuilder::on(&root)
            .caption(&plan.title, LABEL_FONT.into_font().resize(20.0).color(&WHITE))
            .margin_top(10)
            .margin_bottom(40)
            .margin_left(margin_left)
            .margin_right(margin_right)
            .build_cartesian_2d(x_min..x_max, 0f64..plan.y_upper)
            .map_err(render_err)?;

        // Gradient runs left to right across the plotting area
        let (x_px, y_px) = chart.plotting_area().get_pixel_range();
        let span = (x_px.end - x_px.start).max(1);
        for column in 0..GRADIENT_COLUMNS {
            let left = x_px.start + span * column / GRADIENT_COLUMNS;
            let right = x_px.start + span * (column + 1) / GRADIENT_COLUMNS;
            let color = rgb(gradient_at(column as f64 / (GRADIENT_COLUMNS - 1) as f64));
            root.draw(&Rectangle::new(
                [(left, y_px.start), (right, y_px.end)],
                color.filled(),
            ))
            .map_err(render_err)?;
        }

        chart
            .draw_series(plan.y_ticks.iter().map(|(y, _)| {
                PathElement::new(vec![(x_min, *y), (x_max, *y)], WHITE.mix(0.8).stroke_width(1))
            }))
            .map_err(render_err)?;
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(x_min, 0.0), (x_max, 0.0)],
                WHITE.stroke_width(2),
            )))
            .map_err(render_err)?;

        match &plan.encoding {
            Encoding::SmoothLine { curve, markers } => {
                chart
                    .draw_series(LineSeries::new(curve.iter().copied(), WHITE.stroke_width(2)))
                    .map_err(render_err)?;
                chart
                    .draw_series(
                        markers
                            .iter()
                            .map(|&point| Circle::new(point, MARKER_RADIUS, WHITE.filled())),
                    )
                    .map_err(render_err)?;
                chart
                    .draw_series(markers.iter().map(|&point| {
                        Circle::new(point, MARKER_RADIUS, RGBColor(128, 128, 128).stroke_width(1))
                    }))
                    .map_err(render_err)?;
            }
            Encoding::RoundedBars {
                bars,
                width,
                corner_radius,
            } => {
                for bar in bars {
                    let (left, top) = chart.backend_coord(&(bar.center - width / 2.0, bar.height));
                    let (right, bottom) = chart.backend_coord(&(bar.center + width / 2.0, 0.0));
                    let radius_px =
                        chart.backend_coord(&(bar.center - width / 2.0 + corner_radius, 0.0)).0 - left;
                    let outline = rounded_rect(left, top, right, bottom, radius_px);
                    root.draw(&Polygon::new(outline, WHITE.mix(BAR_ALPHA).filled()))
                        .map_err(render_err)?;
                }
            }
        }

        let label_style = LABEL_FONT.into_font().color(&WHITE);

        let axis_x = if plan.y_axis_on_right { x_max } else { x_min };
        let (anchor, offset) = if plan.y_axis_on_right {
            (Pos::new(HPos::Left, VPos::Center), 8)
        } else {
            (Pos::new(HPos::Right, VPos::Center), -8)
        };
        for (value, label) in &plan.y_ticks {
            let (px, py) = chart.backend_coord(&(axis_x, *value));
            root.draw(&Text::new(label.clone(), (px + offset, py), label_style.pos(anchor)))
                .map_err(render_err)?;
        }

        let below = Pos::new(HPos::Center, VPos::Top);
        for (position, label) in &plan.categories {
            let (px, py) = chart.backend_coord(&(*position, 0.0));
            root.draw(&Text::new(label.clone(), (px, py + 10), label_style.pos(below)))
                .map_err(render_err)?;
        }

        root.present().map_err(render_err)?;
        Ok(())
    }
}

impl ChartRenderer for PlottersRenderer {
    fn render(&self, plan: &ChartPlan, name: &str) -> anyhow::Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir).with_context(|| {
            format!("Failed to create output directory {}", self.output_dir.display())
        })?;

        let path = self.chart_path(name);
        self.draw(plan, &path)?;
        Ok(path)
    }
}

/// Outline of a rectangle with all four corners rounded, clockwise on screen.
fn rounded_rect(left: i32, top: i32, right: i32, bottom: i32, radius: i32) -> Vec<(i32, i32)> {
    let r = radius.min((right - left) / 2).min((bottom - top) / 2).max(0);
    if r == 0 {
        return vec![(left, top), (right, top), (right, bottom), (left, bottom)];
    }

    // (centre x, centre y, start angle in degrees); screen y grows downwards
    let corners = [
        (right - r, top + r, -90.0),
        (right - r, bottom - r, 0.0),
        (left + r, bottom - r, 90.0),
        (left + r, top + r, 180.0),
    ];

    corners
        .iter()
        .flat_map(|&(cx, cy, start): &(i32, i32, f64)| {
            (0..=CORNER_STEPS).map(move |step| {
                let angle = (start + 90.0 * step as f64 / CORNER_STEPS as f64).to_radians();
                (
                    cx + (r as f64 * angle.cos()).round() as i32,
                    cy + (r as f64 * angle.sin()).round() as i32,
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::series::{MonthlySeries, WeeklySeries};

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_renders_both_charts_to_png() {
        let dir = std::env::temp_dir().join(format!("reading-charts-render-{}", std::process::id()));
        let renderer = PlottersRenderer::new(&dir, 640, 400);

        let books = MonthlySeries::from_validated(vec![
            3.0, 5.0, 2.0, 8.0, 6.0, 1.0, 9.0, 4.0, 7.0, 2.0, 5.0, 3.0,
        ]);
        let hours = WeeklySeries::from_validated(vec![1.5, 2.0, 7.5, 3.0, 0.5, 4.0, 6.0]);
        let plans = [
            (ChartPlan::monthly(&books, 100).unwrap(), "books-per-month"),
            (ChartPlan::weekly(&hours), "hours-per-day"),
        ];

        for (plan, name) in &plans {
            let path = renderer.render(plan, name).unwrap();
            assert_eq!(path, dir.join(format!("{}.png", name)));
            let bytes = std::fs::read(&path).unwrap();
            assert!(bytes.len() > PNG_MAGIC.len());
            assert_eq!(bytes[..8], PNG_MAGIC);
        }

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_rounded_rect_stays_in_bounds() {
        let outline = rounded_rect(10, 20, 50, 120, 6);
        assert_eq!(outline.len(), 4 * (CORNER_STEPS + 1));
        assert_eq!(outline.iter().map(|p| p.0).min(), Some(10));
        assert_eq!(outline.iter().map(|p| p.0).max(), Some(50));
        assert_eq!(outline.iter().map(|p| p.1).min(), Some(20));
        assert_eq!(outline.iter().map(|p| p.1).max(), Some(120));
        // Starts where the top-right arc meets the top edge
        assert_eq!(outline[0], (44, 20));
    }

    #[test]
    fn test_rounded_rect_degenerates_for_flat_bars() {
        let outline = rounded_rect(10, 100, 50, 100, 6);
        assert_eq!(outline, vec![(10, 100), (50, 100), (50, 100), (10, 100)]);
    }

    #[test]
    fn test_chart_path() {
        let renderer = PlottersRenderer::new("out", 800, 600);
        assert_eq!(
            renderer.chart_path("hours-per-day"),
            PathBuf::from("out/hours-per-day.png")
        );
    }
}
