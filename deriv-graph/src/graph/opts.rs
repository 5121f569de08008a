use super::point::{CanvasPoint, GraphPoint};

/// Upper bound on the number of grid lines drawn along one axis.
const MAX_GRID_LINES: f64 = 40.0;

/// Widens `spacing` to the next `1, 2, 5 * 10^k` step if the visible `range` would otherwise
/// need more than [`MAX_GRID_LINES`] lines.
fn fit_spacing(range: f64, spacing: f64) -> f64 {
    if range / spacing <= MAX_GRID_LINES {
        return spacing;
    }

    let min_step = range / MAX_GRID_LINES;
    let magnitude = 10f64.powf(min_step.log10().floor());
    [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|mantissa| mantissa * magnitude)
        .find(|step| *step >= min_step)
        .unwrap_or(10.0 * magnitude)
}

/// Multiples of the (fitted) spacing between `center - scale` and `center + scale`.
fn grid_lines(center: f64, scale: f64, spacing: f64) -> Vec<f64> {
    if !(spacing > 0.0 && scale > 0.0 && center.is_finite() && scale.is_finite()) {
        return Vec::new();
    }

    let spacing = fit_spacing(2.0 * scale, spacing);
    let first = ((center - scale) / spacing).ceil() as i64;
    let last = ((center + scale) / spacing).floor() as i64;
    (first..=last).map(|k| k as f64 * spacing).collect()
}

/// Options to use when drawing a graph.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphOptions {
    /// The width and height of the canvas, in pixels.
    ///
    /// The default value is `(800, 600)`.
    pub canvas_size: CanvasPoint<u16>,

    /// The `(x, y)` point at which to center the graph.
    ///
    /// The default value is `(0.0, 0.0)`.
    pub center: GraphPoint<f64>,

    /// Half the visible width and height, in graph units. The default of `(10.0, 20.0)` around
    /// the origin shows `-10 <= x <= 10` and `-20 <= y <= 20`.
    pub scale: GraphPoint<f64>,

    /// The number of graph units between each grid line, given as a pair of `(x, y)` units.
    ///
    /// The default value is `(2.0, 5.0)`.
    pub grid_spacing: GraphPoint<f64>,

    /// The title drawn at the top of the canvas.
    pub title: String,

    /// The label of the horizontal axis.
    pub x_label: String,

    /// The label of the vertical axis.
    pub y_label: String,
}

/// The default options for a graph of a derivative over `[-10, 10]`, with the vertical axis
/// clipped to `[-20, 20]`.
impl Default for GraphOptions {
    fn default() -> GraphOptions {
        GraphOptions {
            canvas_size: CanvasPoint(800, 600),
            center: GraphPoint(0.0, 0.0),
            scale: GraphPoint(10.0, 20.0),
            grid_spacing: GraphPoint(2.0, 5.0),
            title: String::from("Graph of the derivative function"),
            x_label: String::from("x"),
            y_label: String::from("f'(x)"),
        }
    }
}

impl GraphOptions {
    /// Canvas size in pixels.
    pub fn canvas_size(mut self, width: u16, height: u16) -> Self {
        self.canvas_size = CanvasPoint(width, height);
        self
    }

    /// Shows `min <= x <= max`.
    pub fn x_bounds(mut self, min: f64, max: f64) -> Self {
        self.center.0 = (min + max) / 2.0;
        self.scale.0 = (max - min) / 2.0;
        self
    }

    /// Shows `min <= y <= max`. Values outside this range are clipped.
    pub fn y_bounds(mut self, min: f64, max: f64) -> Self {
        self.center.1 = (min + max) / 2.0;
        self.scale.1 = (max - min) / 2.0;
        self
    }

    pub fn grid_spacing(mut self, x: f64, y: f64) -> Self {
        self.grid_spacing = GraphPoint(x, y);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    /// The values of the vertical grid lines. Wide ranges get a coarser spacing than
    /// [`GraphOptions::grid_spacing`], so there are never more than a few dozen lines.
    pub fn x_grid_lines(&self) -> Vec<f64> {
        grid_lines(self.center.0, self.scale.0, self.grid_spacing.0)
    }

    /// The values of the horizontal grid lines. See [`GraphOptions::x_grid_lines`].
    pub fn y_grid_lines(&self) -> Vec<f64> {
        grid_lines(self.center.1, self.scale.1, self.grid_spacing.1)
    }

    /// Returns the `(min, max)` of the visible range of the vertical axis.
    pub fn visible_y(&self) -> (f64, f64) {
        (self.center.1 - self.scale.1, self.center.1 + self.scale.1)
    }
}

impl GraphOptions {
    /// Converts an x-value in **graph** space to an x-value in **canvas** space.
    pub(crate) fn x_to_canvas(&self, x: f64) -> f64 {
        let graph_space_range = self.scale.0 * 2.0;

        // 0.0 is the left edge of the visible graph, 1.0 the right edge
        let normalized = (x - self.center.0) / graph_space_range + 0.5;

        normalized * self.canvas_size.0 as f64
    }

    /// Converts a y-value in **graph** space to a y-value in **canvas** space.
    pub(crate) fn y_to_canvas(&self, y: f64) -> f64 {
        let graph_space_range = self.scale.1 * 2.0;

        // the y-axis is flipped in canvas space, so 0.0 is the top edge
        let normalized = 0.5 - (y - self.center.1) / graph_space_range;

        normalized * self.canvas_size.1 as f64
    }

    /// Converts a point in **graph** space to **canvas** space.
    pub fn to_canvas(&self, point: GraphPoint<f64>) -> CanvasPoint<f64> {
        CanvasPoint(
            self.x_to_canvas(point.0),
            self.y_to_canvas(point.1),
        )
    }
}
