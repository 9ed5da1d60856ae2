//! Results-vs-time chart, embedded in the report as a base64 PNG.
//!
//! The chart is laid out as an SVG document in code and rasterized with
//! resvg. Two series are drawn whenever there is data: the measured results
//! (solid) and the design threshold (dashed) across the full x-range.

use std::fmt::Write as _;
use std::sync::OnceLock;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use ct_core::entities::Member;
use tracing::{debug, warn};
use usvg::{TreeParsing, TreeTextToPath};

use crate::error::ReportError;

pub const WIDTH: u32 = 1280;
pub const HEIGHT: u32 = 720;
/// Added on top of the tallest value so the series never touches the frame.
pub const Y_HEADROOM: f64 = 10.0;

const TITLE: &str = "Resultados vs Tiempo";
const X_AXIS_NAME: &str = "Fecha de fractura";
const Y_AXIS_NAME: &str = "Resistencia (kg/cm²)";
const Y_TICKS: u32 = 5;

const PAD_LEFT: f64 = 100.0;
const PAD_RIGHT: f64 = 40.0;
const PAD_TOP: f64 = 70.0;
const PAD_BOTTOM: f64 = 90.0;

/// One plotted value with its x-axis label.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// Reported members that have a measured result, ordered by fracture time.
///
/// Labels are the fracture date (`YYYY-MM-DD`).
#[must_use]
pub fn chart_points(members: &[Member]) -> Vec<ChartPoint> {
    let mut plotted: Vec<&Member> = members
        .iter()
        .filter(|m| m.reported() && m.result.is_some() && m.fractured_at.is_some())
        .collect();
    plotted.sort_by_key(|m| (m.fractured_at, m.id));

    plotted
        .into_iter()
        .filter_map(|m| {
            Some(ChartPoint {
                label: m.fractured_at?.format("%Y-%m-%d").to_string(),
                value: m.result?,
            })
        })
        .collect()
}

/// Upper bound of the y-axis.
#[must_use]
pub fn y_max(points: &[ChartPoint], threshold: f64) -> f64 {
    points.iter().map(|p| p.value).fold(threshold, f64::max) + Y_HEADROOM
}

/// Lay the chart out as an SVG document. `None` when there is nothing to plot.
#[must_use]
pub fn chart_svg(points: &[ChartPoint], threshold: f64) -> Option<String> {
    if points.is_empty() {
        return None;
    }

    let width = f64::from(WIDTH);
    let height = f64::from(HEIGHT);
    let plot_w = width - PAD_LEFT - PAD_RIGHT;
    let plot_h = height - PAD_TOP - PAD_BOTTOM;
    let bottom = PAD_TOP + plot_h;
    let top_value = y_max(points, threshold);

    let y_of = |value: f64| bottom - (value / top_value) * plot_h;
    #[allow(clippy::cast_precision_loss)]
    let x_of = |index: usize| {
        if points.len() == 1 {
            PAD_LEFT + plot_w / 2.0
        } else {
            PAD_LEFT + plot_w * index as f64 / (points.len() - 1) as f64
        }
    };

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="sans-serif">"#
    );
    let _ = write!(svg, r#"<rect width="{WIDTH}" height="{HEIGHT}" fill="white"/>"#);
    let _ = write!(
        svg,
        r#"<text x="{}" y="40" font-size="20" text-anchor="middle" fill="black">{TITLE}</text>"#,
        width / 2.0
    );

    // Horizontal grid and y tick labels.
    for tick in 0..=Y_TICKS {
        let value = top_value * f64::from(tick) / f64::from(Y_TICKS);
        let y = y_of(value);
        let _ = write!(
            svg,
            r##"<line x1="{PAD_LEFT}" y1="{y:.2}" x2="{:.2}" y2="{y:.2}" stroke="#a0a0a0" stroke-width="0.5"/>"##,
            PAD_LEFT + plot_w
        );
        let _ = write!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" font-size="12" text-anchor="end">{value:.0}</text>"#,
            PAD_LEFT - 8.0,
            y + 4.0
        );
    }

    // Vertical grid and date labels.
    for (index, point) in points.iter().enumerate() {
        let x = x_of(index);
        let _ = write!(
            svg,
            r##"<line x1="{x:.2}" y1="{PAD_TOP}" x2="{x:.2}" y2="{bottom:.2}" stroke="#a0a0a0" stroke-width="0.5"/>"##
        );
        let _ = write!(
            svg,
            r#"<text x="{x:.2}" y="{:.2}" font-size="12" text-anchor="middle">{}</text>"#,
            bottom + 20.0,
            point.label
        );
    }

    // Axes.
    let _ = write!(
        svg,
        r#"<path d="M{PAD_LEFT} {PAD_TOP} V{bottom:.2} H{:.2}" fill="none" stroke="black" stroke-width="1"/>"#,
        PAD_LEFT + plot_w
    );
    let _ = write!(
        svg,
        r#"<text x="{:.2}" y="{:.2}" font-size="14" text-anchor="middle">{X_AXIS_NAME}</text>"#,
        PAD_LEFT + plot_w / 2.0,
        height - 30.0
    );
    let _ = write!(
        svg,
        r#"<text x="30" y="{:.2}" font-size="14" text-anchor="middle" transform="rotate(-90 30 {:.2})">{Y_AXIS_NAME}</text>"#,
        PAD_TOP + plot_h / 2.0,
        PAD_TOP + plot_h / 2.0
    );

    // Threshold spans the full x-range, even for a single point.
    let (x_start, x_end) = if points.len() == 1 {
        (PAD_LEFT, PAD_LEFT + plot_w)
    } else {
        (x_of(0), x_of(points.len() - 1))
    };
    let threshold_y = y_of(threshold);
    let _ = write!(
        svg,
        r##"<line id="threshold" x1="{x_start:.2}" y1="{threshold_y:.2}" x2="{x_end:.2}" y2="{threshold_y:.2}" stroke="#a0a0a0" stroke-width="2" stroke-dasharray="5 5"/>"##
    );

    let coords = points
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{:.2},{:.2}", x_of(i), y_of(p.value)))
        .collect::<Vec<_>>()
        .join(" ");
    let _ = write!(
        svg,
        r##"<polyline id="measured" points="{coords}" fill="none" stroke="#1f77b4" stroke-width="3"/>"##
    );
    for (i, p) in points.iter().enumerate() {
        let _ = write!(
            svg,
            r##"<circle cx="{:.2}" cy="{:.2}" r="4" fill="#1f77b4"/>"##,
            x_of(i),
            y_of(p.value)
        );
    }

    svg.push_str("</svg>");
    Some(svg)
}

fn fonts() -> &'static usvg::fontdb::Database {
    static FONTS: OnceLock<usvg::fontdb::Database> = OnceLock::new();
    FONTS.get_or_init(|| {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        debug!(faces = db.len(), "chart fonts loaded");
        db
    })
}

/// Rasterize an SVG document to PNG bytes at the chart size.
///
/// # Errors
///
/// Returns `ReportError::Render` if the SVG cannot be parsed or the PNG
/// cannot be encoded.
pub fn rasterize(svg: &str) -> Result<Vec<u8>, ReportError> {
    let mut tree = usvg::Tree::from_str(svg, &usvg::Options::default())
        .map_err(|e| ReportError::Render(format!("chart svg: {e}")))?;
    tree.convert_text(fonts());

    let mut pixmap = tiny_skia::Pixmap::new(WIDTH, HEIGHT)
        .ok_or_else(|| ReportError::Render("chart pixmap allocation failed".to_string()))?;
    resvg::Tree::from_usvg(&tree).render(tiny_skia::Transform::default(), &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|e| ReportError::Render(format!("chart png: {e}")))
}

/// Encode the chart for `members` as a base64 PNG.
///
/// Font loading and rasterization run on the blocking pool. Any failure is
/// logged and yields `None`, so the report goes out without a chart.
pub async fn render_chart(members: &[Member], threshold: f64) -> Option<String> {
    let points = chart_points(members);
    if points.is_empty() {
        return None;
    }
    tokio::task::spawn_blocking(move || encode_chart(&points, threshold))
        .await
        .unwrap_or_else(|error| {
            warn!(%error, "chart task failed; continuing without chart");
            None
        })
}

fn encode_chart(points: &[ChartPoint], threshold: f64) -> Option<String> {
    let svg = chart_svg(points, threshold)?;
    match rasterize(&svg) {
        Ok(png) => {
            debug!(points = points.len(), bytes = png.len(), "chart rendered");
            Some(STANDARD.encode(png))
        }
        Err(error) => {
            warn!(%error, "chart rendering failed; continuing without chart");
            None
        }
    }
}
