//! Filled pie chart drawn with braille dots on a canvas.
//!
//! Slices run counter-clockwise from the chart's start angle, in slice order.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Points};
use ratatui::widgets::{Block, Widget};

use inflalens_core::PieChartSpec;

use crate::theme;

pub struct RiskPie<'a> {
    spec: &'a PieChartSpec,
    block: Option<Block<'a>>,
}

impl<'a> RiskPie<'a> {
    pub fn new(spec: &'a PieChartSpec) -> Self {
        Self { spec, block: None }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for RiskPie<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = self
            .block
            .as_ref()
            .map_or(area, |b| b.inner(area));
        if inner.width == 0 || inner.height == 0 {
            if let Some(block) = self.block {
                block.render(area, buf);
            }
            return;
        }

        let (x_bounds, y_bounds) = round_bounds(inner.width, inner.height);
        // Braille cells are 2 dots wide and 4 tall.
        let cols = inner.width as usize * 2;
        let rows = inner.height as usize * 4;
        let spec = self.spec;
        let layers = slice_points(spec, x_bounds, y_bounds, cols, rows);

        let mut canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds(x_bounds)
            .y_bounds(y_bounds)
            .paint(|ctx| {
                for (i, coords) in layers.iter().enumerate() {
                    let color = theme::risk_color(spec.slices[i].color);
                    ctx.draw(&Points {
                        coords: coords.as_slice(),
                        color,
                    });
                }
            });
        if let Some(block) = self.block {
            canvas = canvas.block(block);
        }
        canvas.render(area, buf);
    }
}

/// Canvas bounds that keep the unit circle round on a terminal grid.
fn round_bounds(width: u16, height: u16) -> ([f64; 2], [f64; 2]) {
    // A cell is roughly twice as tall as it is wide.
    let aspect = width as f64 / (height as f64 * 2.0);
    if aspect >= 1.0 {
        ([-aspect, aspect], [-1.0, 1.0])
    } else {
        ([-1.0, 1.0], [-1.0 / aspect, 1.0 / aspect])
    }
}

/// Sample a `cols` x `rows` dot grid and bucket every dot inside the unit
/// circle into its slice. Returns one point list per slice.
pub fn slice_points(
    spec: &PieChartSpec,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    cols: usize,
    rows: usize,
) -> Vec<Vec<(f64, f64)>> {
    let mut layers = vec![Vec::new(); spec.slices.len()];
    if spec.total == 0 || cols == 0 || rows == 0 {
        return layers;
    }

    // Cumulative end of each slice as a fraction of the full turn.
    let mut ends = Vec::with_capacity(spec.slices.len());
    let mut acc = 0usize;
    for slice in &spec.slices {
        acc += slice.count;
        ends.push(acc as f64 / spec.total as f64);
    }

    let dx = (x_bounds[1] - x_bounds[0]) / cols as f64;
    let dy = (y_bounds[1] - y_bounds[0]) / rows as f64;
    for r in 0..rows {
        let y = y_bounds[0] + (r as f64 + 0.5) * dy;
        for c in 0..cols {
            let x = x_bounds[0] + (c as f64 + 0.5) * dx;
            if x * x + y * y > 1.0 {
                continue;
            }
            let turn = slice_fraction(x, y, spec.start_angle_deg);
            let idx = ends
                .iter()
                .position(|end| turn < *end)
                .unwrap_or(ends.len() - 1);
            layers[idx].push((x, y));
        }
    }
    layers
}

/// Counter-clockwise position of `(x, y)` measured from the start angle,
/// as a fraction of a full turn in `[0, 1)`.
fn slice_fraction(x: f64, y: f64, start_angle_deg: f64) -> f64 {
    let angle = y.atan2(x).to_degrees();
    (angle - start_angle_deg).rem_euclid(360.0) / 360.0
}
