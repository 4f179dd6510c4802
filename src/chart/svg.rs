//! SVG output.
//!
//! Sizes are given in points so the SVG and PDF renderings of a scene have
//! the same physical dimensions.

use std::fmt::Write as _;

use super::scene::{Point, Primitive, Scene, Stroke, TextOrientation, TextRun};
use super::style::Rgb;

const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";

/// Renders `scene` as a standalone SVG document.
///
/// # Example
///
/// ```rust
/// use dr_ifpr_plot::chart::{ChartConfig, Figure, Scene, generate_svg};
///
/// let figure = Figure::new(ChartConfig::default());
/// let scene = Scene::layout(&figure).unwrap();
/// let svg = generate_svg(&scene, "Empty chart");
/// assert!(svg.starts_with("<svg"));
/// ```
#[must_use]
pub fn generate_svg(scene: &Scene, title: &str) -> String {
    let mut svg = String::with_capacity(16384);

    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.3}pt" height="{h:.3}pt" viewBox="0 0 {w:.3} {h:.3}">"#,
        w = scene.width,
        h = scene.height
    );
    let _ = writeln!(svg, "<title>{}</title>", escape(title));

    for primitive in &scene.primitives {
        match primitive {
            Primitive::Line { from, to, stroke } => {
                let _ = writeln!(
                    svg,
                    r#"<line x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}" {}/>"#,
                    from.x,
                    from.y,
                    to.x,
                    to.y,
                    stroke_attrs(*stroke)
                );
            }
            Primitive::Rect {
                origin,
                width,
                height,
                fill,
                stroke,
            } => {
                let _ = writeln!(
                    svg,
                    r#"<rect x="{:.3}" y="{:.3}" width="{:.3}" height="{:.3}" {}/>"#,
                    origin.x,
                    origin.y,
                    width,
                    height,
                    paint_attrs(*fill, *stroke)
                );
            }
            Primitive::Circle {
                center,
                radius,
                fill,
                stroke,
            } => {
                let _ = writeln!(
                    svg,
                    r#"<circle cx="{:.3}" cy="{:.3}" r="{:.3}" {}/>"#,
                    center.x,
                    center.y,
                    radius,
                    paint_attrs(*fill, *stroke)
                );
            }
            Primitive::Polygon {
                points,
                fill,
                stroke,
            } => {
                let _ = writeln!(
                    svg,
                    r#"<polygon points="{}" {}/>"#,
                    polygon_points(points),
                    paint_attrs(*fill, *stroke)
                );
            }
            Primitive::Text(run) => write_text(&mut svg, run),
        }
    }

    svg.push_str("</svg>\n");
    svg
}

fn write_text(svg: &mut String, run: &TextRun) {
    let Point { x, y } = run.origin;
    let transform = match run.orientation {
        TextOrientation::Horizontal => String::new(),
        TextOrientation::Vertical => format!(r#" transform="rotate(-90 {x:.3} {y:.3})""#),
    };
    let _ = writeln!(
        svg,
        r#"<text x="{x:.3}" y="{y:.3}" font-family="{FONT_FAMILY}" font-size="{:.2}" fill="{}"{transform}>{}</text>"#,
        run.size,
        run.color,
        escape(&run.text)
    );
}

fn stroke_attrs(stroke: Stroke) -> String {
    format!(
        r#"stroke="{}" stroke-width="{:.2}" stroke-linecap="butt""#,
        stroke.color, stroke.width
    )
}

fn paint_attrs(fill: Option<Rgb>, stroke: Option<Stroke>) -> String {
    let fill = fill.map_or_else(|| "none".to_string(), |c| c.to_string());
    match stroke {
        Some(stroke) => format!(
            r#"fill="{fill}" stroke="{}" stroke-width="{:.2}" stroke-linejoin="miter""#,
            stroke.color, stroke.width
        ),
        None => format!(r#"fill="{fill}""#),
    }
}

fn polygon_points(points: &[Point]) -> String {
    let mut out = String::new();
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{:.3},{:.3}", p.x, p.y);
    }
    out
}

/// Escapes text for use in SVG character data.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
