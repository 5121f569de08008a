//! Graph of a sampled function.
//!
//! A [`Graph`] is built from the samples produced by [`deriv_compute::numerical::sample`]. The
//! curve through the samples is split into [`Graph::segments()`]: a segment ends wherever the
//! function is undefined, and wherever two neighboring samples jump from one side of the visible
//! range to the other, which is how a vertical asymptote shows up in sampled data.
//!
//! With the `png` feature, [`Graph::draw()`] renders the graph to a [`cairo::ImageSurface`]:
//!
//! ```no_run
//! # #[cfg(feature = "png")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use deriv_compute::{derive, Config};
//! use deriv_graph::{Graph, GraphOptions};
//! use std::fs::File;
//!
//! let derivation = derive("tan(x)", &Config::default())?;
//! let surface = Graph::with_opts(&derivation.samples, GraphOptions::default()).draw()?;
//!
//! let mut file = File::create("output.png")?;
//! surface.write_to_png(&mut file)?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "png"))]
//! # fn main() {}
//! ```

pub mod opts;
pub mod point;

use deriv_compute::numerical::Sample;
pub use opts::GraphOptions;
pub use point::{CanvasPoint, GraphPoint};

#[cfg(feature = "png")]
use cairo::{Context, Error, FontSlant, FontWeight, Format, ImageSurface};
#[cfg(feature = "png")]
use super::text_align::ShowTextAlign;

/// Formats a grid line value with at most 3 decimal places.
#[cfg(feature = "png")]
fn format_value(n: f64) -> String {
    let raw = format!("{:.3}", n);
    raw.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// A graph of a sampled function.
///
/// See the [module-level documentation](self) for more information.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    /// The samples to draw, in ascending order of `x`.
    pub points: Vec<GraphPoint<f64>>,

    /// The rendering options for the graph.
    pub options: GraphOptions,
}

impl Graph {
    /// Create a graph of the samples with the default options.
    pub fn new(samples: &[Sample]) -> Graph {
        Graph::with_opts(samples, GraphOptions::default())
    }

    /// Create a graph of the samples with the given options.
    pub fn with_opts(samples: &[Sample], options: GraphOptions) -> Graph {
        Graph {
            points: samples.iter().copied().map(GraphPoint::from).collect(),
            options,
        }
    }

    /// Returns true if moving from `a` to `b` crosses the whole visible range of the vertical
    /// axis.
    fn jumps(&self, a: f64, b: f64) -> bool {
        let (min, max) = self.options.visible_y();
        (a > max && b < min) || (a < min && b > max)
    }

    /// Splits the curve into the runs of samples that can be joined by straight lines.
    pub fn segments(&self) -> Vec<Vec<GraphPoint<f64>>> {
        let mut segments = Vec::new();
        let mut current: Vec<GraphPoint<f64>> = Vec::new();

        for point in &self.points {
            let breaks = !point.is_finite()
                || current.last().is_some_and(|last| self.jumps(last.1, point.1));
            if breaks && !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
            if point.is_finite() {
                current.push(*point);
            }
        }

        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}

#[cfg(feature = "png")]
impl Graph {
    /// Renders the graph onto a new [`ImageSurface`] of the configured canvas size: grid, axes,
    /// tick values, curve, then labels, on a black background.
    pub fn draw(&self) -> Result<ImageSurface, Error> {
        let surface = ImageSurface::create(
            Format::ARgb32,
            self.options.canvas_size.0 as i32,
            self.options.canvas_size.1 as i32,
        )?;
        let context = Context::new(&surface)?;

        context.set_source_rgb(0.0, 0.0, 0.0);
        context.paint()?;

        context.select_font_face("sans-serif", FontSlant::Oblique, FontWeight::Normal);

        let origin_canvas = self.options.to_canvas(GraphPoint(0.0, 0.0));
        self.draw_grid_lines(&context)?;
        self.draw_origin_axes(&context, origin_canvas)?;
        self.draw_grid_line_numbers(&context, origin_canvas)?;
        self.draw_curve(&context)?;
        self.draw_labels(&context)?;

        Ok(surface)
    }

    /// Strokes the full-width horizontal line at canvas height `y`, if it is on the canvas.
    fn stroke_row(&self, context: &Context, y: f64) -> Result<(), Error> {
        let (width, height) = (self.options.canvas_size.0 as f64, self.options.canvas_size.1 as f64);
        if (0.0..=height).contains(&y) {
            context.move_to(0.0, y);
            context.line_to(width, y);
            context.stroke()?;
        }
        Ok(())
    }

    /// Strokes the full-height vertical line at canvas offset `x`, if it is on the canvas.
    fn stroke_column(&self, context: &Context, x: f64) -> Result<(), Error> {
        let (width, height) = (self.options.canvas_size.0 as f64, self.options.canvas_size.1 as f64);
        if (0.0..=width).contains(&x) {
            context.move_to(x, 0.0);
            context.line_to(x, height);
            context.stroke()?;
        }
        Ok(())
    }

    fn draw_grid_lines(&self, context: &Context) -> Result<(), Error> {
        let opts = &self.options;
        context.set_source_rgb(0.4, 0.4, 0.4);
        context.set_line_width(1.0);

        for x in opts.x_grid_lines() {
            self.stroke_column(context, opts.x_to_canvas(x))?;
        }
        for y in opts.y_grid_lines() {
            self.stroke_row(context, opts.y_to_canvas(y))?;
        }
        Ok(())
    }

    /// The lines `x = 0` and `y = 0`, drawn over the grid.
    fn draw_origin_axes(&self, context: &Context, origin_canvas: CanvasPoint<f64>) -> Result<(), Error> {
        context.set_source_rgb(1.0, 1.0, 1.0);
        context.set_line_width(2.0);
        self.stroke_column(context, origin_canvas.0)?;
        self.stroke_row(context, origin_canvas.1)
    }

    /// Labels each grid line with its value, next to the axes.
    fn draw_grid_line_numbers(&self, context: &Context, origin_canvas: CanvasPoint<f64>) -> Result<(), Error> {
        let width = self.options.canvas_size.0 as f64;
        let height = self.options.canvas_size.1 as f64;
        let padding = 4.0;

        context.set_source_rgb(1.0, 1.0, 1.0);
        context.set_font_size(12.0);

        // keep the numbers on screen even if the axis is not
        let number_y = origin_canvas.1.clamp(0.0, height - 2.0 * padding - 12.0);
        for x in self.options.x_grid_lines() {
            let x_canvas = self.options.x_to_canvas(x);
            if x == 0.0 || !(0.0..=width).contains(&x_canvas) {
                continue;
            }
            context.show_text_align(&format_value(x), (x_canvas, number_y + padding), (0.5, 1.0))?;
        }

        let number_x = origin_canvas.0.clamp(0.0, width - 4.0 * padding - 24.0);
        for y in self.options.y_grid_lines() {
            let y_canvas = self.options.y_to_canvas(y);
            if y == 0.0 || !(0.0..=height).contains(&y_canvas) {
                continue;
            }
            context.show_text_align(&format_value(y), (number_x + padding, y_canvas), (0.0, 0.5))?;
        }

        Ok(())
    }

    /// Strokes each segment of the curve. Points far outside the visible range are pulled in so
    /// that cairo never sees huge coordinates.
    fn draw_curve(&self, context: &Context) -> Result<(), Error> {
        let (min, max) = self.options.visible_y();
        let margin = (max - min) * 10.0;

        context.set_source_rgb(1.0, 0.0, 0.0);
        context.set_line_width(2.5);

        for segment in self.segments() {
            if segment.len() < 2 {
                continue;
            }

            for (idx, point) in segment.iter().enumerate() {
                let clamped = GraphPoint(point.0, point.1.clamp(min - margin, max + margin));
                let canvas = self.options.to_canvas(clamped);
                if idx == 0 {
                    context.move_to(canvas.0, canvas.1);
                } else {
                    context.line_to(canvas.0, canvas.1);
                }
            }
            context.stroke()?;
        }

        Ok(())
    }

    /// Title at the top, axis names in the corners.
    fn draw_labels(&self, context: &Context) -> Result<(), Error> {
        let width = self.options.canvas_size.0 as f64;
        let height = self.options.canvas_size.1 as f64;
        let padding = 10.0;

        context.set_source_rgb(1.0, 1.0, 1.0);

        context.set_font_size(20.0);
        context.show_text_align(&self.options.title, (width / 2.0, padding), (0.5, 1.0))?;

        context.set_font_size(16.0);
        context.show_text_align(&self.options.x_label, (width - padding, height - padding), (1.0, 0.0))?;
        context.show_text_align(&self.options.y_label, (padding, padding), (0.0, 1.0))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn graph(points: &[(f64, f64)]) -> Graph {
        let samples = points.iter()
            .map(|&(x, y)| Sample { x, y })
            .collect::<Vec<_>>();
        Graph::new(&samples)
    }

    #[test]
    fn single_segment() {
        let graph = graph(&[(0.0, 0.0), (1.0, 1.0), (2.0, 4.0)]);
        assert_eq!(graph.segments().len(), 1);
        assert_eq!(graph.segments()[0].len(), 3);
    }

    #[test]
    fn breaks_at_undefined_points() {
        let graph = graph(&[(-1.0, -1.0), (0.0, f64::INFINITY), (1.0, 1.0), (2.0, f64::NAN)]);
        assert_eq!(graph.segments(), vec![
            vec![GraphPoint(-1.0, -1.0)],
            vec![GraphPoint(1.0, 1.0)],
        ]);
    }

    #[test]
    fn breaks_at_asymptotes() {
        // tan(x) around pi/2
        let graph = graph(&[(1.5, 14.1), (1.55, 48.1), (1.6, -34.2), (1.65, -12.6)]);
        assert_eq!(graph.segments().len(), 2);

        // steep, but continuous
        let graph = graph(&[(0.0, -15.0), (0.1, 15.0)]);
        assert_eq!(graph.segments().len(), 1);
    }
}
