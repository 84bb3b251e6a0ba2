//! Console and SVG rendering of dendrograms.

use super::{Dendrogram, Linkage};
use crate::Result;
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

const TEXT_WIDTH: usize = 48;

const PANEL_WIDTH: f64 = 420.0;
const PANEL_HEIGHT: f64 = 460.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 150.0;

const ABOVE_THRESHOLD_COLOR: &str = "#1f77b4";
const PALETTE: [&str; 9] = [
    "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22",
    "#17becf",
];

impl Dendrogram {
    /// Sideways text tree: leaves on the left, merge heights growing to the right.
    pub fn to_text(&self) -> String {
        let rows = 2 * self.leaves.len() - 1;
        let mut grid = vec![vec![' '; TEXT_WIDTH]; rows];

        let row_of = |x: f64| ((x - Dendrogram::leaf_position(0)) / 5.0).round() as usize;
        let col_of = |h: f64| {
            if self.max_height > 0.0 {
                ((h / self.max_height) * (TEXT_WIDTH - 1) as f64).round() as usize
            } else {
                0
            }
        };

        for link in &self.links {
            let top = row_of(link.xs[0]);
            let bottom = row_of(link.xs[3]);
            let joint = col_of(link.height());

            for (row, child_height) in [(top, link.ys[0]), (bottom, link.ys[3])] {
                for cell in &mut grid[row][col_of(child_height)..joint] {
                    if *cell == ' ' {
                        *cell = '-';
                    }
                }
                grid[row][joint] = '+';
            }
            for line in &mut grid[top + 1..bottom] {
                line[joint] = '|';
            }
        }

        let label_width = self.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let mut out = String::new();
        for (row, line) in grid.iter().enumerate() {
            let label = if row % 2 == 0 {
                self.labels[row / 2].as_str()
            } else {
                ""
            };
            let cells: String = line.iter().collect();
            let _ = writeln!(out, "{:>label_width$} {}", label, cells.trim_end());
        }
        let _ = write!(
            out,
            "{:>label_width$} 0{:>width$.2}",
            "",
            self.max_height,
            width = TEXT_WIDTH - 1
        );
        out
    }
}

/// One dendrogram with its title and axis caption.
#[derive(Clone, Debug)]
pub struct Panel {
    pub title: String,
    pub y_label: String,
    pub dendrogram: Dendrogram,
}

impl Panel {
    pub fn new(title: impl Into<String>, y_label: impl Into<String>, dendrogram: Dendrogram) -> Self {
        Self {
            title: title.into(),
            y_label: y_label.into(),
            dendrogram,
        }
    }

    /// Panel titled after the linkage method, e.g. `Dendrogram (Linkage = single)`.
    pub fn for_linkage(linkage: Linkage, y_label: impl Into<String>, dendrogram: Dendrogram) -> Self {
        Self::new(format!("Dendrogram (Linkage = {})", linkage), y_label, dendrogram)
    }
}

/// Side-by-side panels rendered to a single SVG document.
#[derive(Clone, Debug, Default)]
pub struct Figure {
    panels: Vec<Panel>,
}

impl Figure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panel(mut self, panel: Panel) -> Self {
        self.panels.push(panel);
        self
    }

    pub fn push(&mut self, panel: Panel) {
        self.panels.push(panel);
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn to_svg(&self) -> String {
        let width = PANEL_WIDTH * self.panels.len().max(1) as f64;
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
            w = width,
            h = PANEL_HEIGHT
        );
        let _ = writeln!(
            svg,
            r#"<rect width="{}" height="{}" fill="white"/>"#,
            width, PANEL_HEIGHT
        );
        for (i, panel) in self.panels.iter().enumerate() {
            render_panel(&mut svg, panel, PANEL_WIDTH * i as f64);
        }
        svg.push_str("</svg>\n");
        svg
    }

    pub fn save_svg(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_svg())?;
        info!(path = %path.as_ref().display(), panels = self.panels.len(), "figure written");
        Ok(())
    }
}

fn render_panel(svg: &mut String, panel: &Panel, offset: f64) {
    let dendrogram = &panel.dendrogram;
    let plot_left = offset + MARGIN_LEFT;
    let plot_width = PANEL_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_bottom = PANEL_HEIGHT - MARGIN_BOTTOM;
    let plot_height = PANEL_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

    let (step, top) = axis_ticks(dendrogram.max_height);
    let x_of = |x: f64| plot_left + x / dendrogram.width() * plot_width;
    let y_of = |y: f64| plot_bottom - y / top * plot_height;

    let _ = writeln!(svg, r#"<g class="panel">"#);
    let _ = writeln!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="14">{}</text>"#,
        plot_left + plot_width / 2.0,
        MARGIN_TOP - 14.0,
        escape(&panel.title)
    );

    // Dashed horizontal grid with tick labels.
    let mut tick = 0.0;
    while tick <= top + step * 1e-9 {
        let y = y_of(tick);
        let _ = writeln!(
            svg,
            r##"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="#b0b0b0" stroke-dasharray="4 3"/>"##,
            plot_left,
            y,
            plot_left + plot_width,
            y
        );
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="end" font-size="10">{}</text>"#,
            plot_left - 6.0,
            y + 3.5,
            format_tick(tick, step)
        );
        tick += step;
    }

    let _ = writeln!(
        svg,
        r#"<text transform="translate({:.1} {:.1}) rotate(-90)" text-anchor="middle" font-size="12">{}</text>"#,
        offset + 18.0,
        MARGIN_TOP + plot_height / 2.0,
        escape(&panel.y_label)
    );

    for link in &dendrogram.links {
        let color = link
            .color
            .map_or(ABOVE_THRESHOLD_COLOR, |c| PALETTE[c % PALETTE.len()]);
        let points: Vec<String> = link
            .xs
            .iter()
            .zip(link.ys.iter())
            .map(|(&x, &y)| format!("{:.2},{:.2}", x_of(x), y_of(y)))
            .collect();
        let _ = writeln!(
            svg,
            r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="1.5"/>"#,
            points.join(" "),
            color
        );
    }

    // Leaf labels rotated 45 degrees under the axis.
    for (k, label) in dendrogram.labels.iter().enumerate() {
        let x = x_of(Dendrogram::leaf_position(k));
        let y = plot_bottom + 12.0;
        let _ = writeln!(
            svg,
            r#"<text x="{x:.1}" y="{y:.1}" transform="rotate(-45 {x:.1} {y:.1})" text-anchor="end" font-size="10">{}</text>"#,
            escape(label)
        );
    }

    let _ = writeln!(
        svg,
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="none" stroke="black"/>"#,
        plot_left, MARGIN_TOP, plot_width, plot_height
    );
    let _ = writeln!(svg, "</g>");
}

/// A "nice" tick step (1, 2, 2.5 or 5 times a power of ten) and the axis top it implies.
fn axis_ticks(max: f64) -> (f64, f64) {
    if !(max > 0.0) {
        return (1.0, 1.0);
    }
    let raw = max / 5.0;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|&s| s >= raw)
        .unwrap_or(10.0 * magnitude);
    let top = (max / step).ceil() * step;
    (step, if top > max { top } else { top + step })
}

/// Formats `value` with as many decimals as `step` needs.
fn format_tick(value: f64, step: f64) -> String {
    let decimals = (0..10)
        .find(|&d| {
            let scaled = step * 10f64.powi(d);
            (scaled - scaled.round()).abs() < 1e-9
        })
        .unwrap_or(10) as usize;
    format!("{:.*}", decimals, value)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
