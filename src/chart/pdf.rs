//! Single-page PDF output.
//!
//! Text uses the standard Helvetica font, so nothing is embedded and the
//! layout widths from [`super::text`] match what viewers draw.

use chrono::{DateTime, Datelike, Timelike, Utc};
use pdf_writer::{Content, Date, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

use super::scene::{Point, Primitive, Scene, Stroke, TextOrientation, TextRun};
use super::style::Rgb;

const FONT_NAME: Name<'static> = Name(b"F1");

/// Bezier handle length for approximating a quarter circle.
const KAPPA: f64 = 0.552_284_749_8;

/// Renders `scene` as a one-page PDF whose media box is the scene size.
#[must_use]
pub fn generate_pdf(scene: &Scene, title: &str, created: DateTime<Utc>) -> Vec<u8> {
    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let font_id = Ref::new(4);
    let content_id = Ref::new(5);
    let info_id = Ref::new(6);

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    let mut page = pdf.page(page_id);
    page.media_box(Rect::new(0.0, 0.0, scene.width as f32, scene.height as f32));
    page.parent(page_tree_id);
    page.contents(content_id);
    page.resources().fonts().pair(FONT_NAME, font_id);
    page.finish();

    pdf.type1_font(font_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    let content = PageContent::new(scene.height).render(scene);
    pdf.stream(content_id, &content);

    pdf.document_info(info_id)
        .title(TextStr(title))
        .producer(TextStr(concat!("dr-ifpr-plot ", env!("CARGO_PKG_VERSION"))))
        .creation_date(pdf_date(created));

    pdf.finish()
}

fn pdf_date(t: DateTime<Utc>) -> Date {
    Date::new(u16::try_from(t.year()).unwrap_or(0))
        .month(t.month() as u8)
        .day(t.day() as u8)
        .hour(t.hour() as u8)
        .minute(t.minute() as u8)
        .second(t.second() as u8)
        .utc_offset_hour(0)
        .utc_offset_minute(0)
}

/// Content stream writer that flips the scene's y-down coordinates.
struct PageContent {
    content: Content,
    page_height: f64,
}

impl PageContent {
    fn new(page_height: f64) -> Self {
        Self {
            content: Content::new(),
            page_height,
        }
    }

    fn flip(&self, p: Point) -> (f32, f32) {
        (p.x as f32, (self.page_height - p.y) as f32)
    }

    fn render(mut self, scene: &Scene) -> Vec<u8> {
        for primitive in &scene.primitives {
            match primitive {
                Primitive::Line { from, to, stroke } => {
                    self.set_stroke(*stroke);
                    let (x1, y1) = self.flip(*from);
                    let (x2, y2) = self.flip(*to);
                    self.content.move_to(x1, y1).line_to(x2, y2).stroke();
                }
                Primitive::Rect {
                    origin,
                    width,
                    height,
                    fill,
                    stroke,
                } => {
                    // PDF rectangles grow upward from their lower-left corner
                    let (x, y) = self.flip(Point::new(origin.x, origin.y + height));
                    self.set_paint(*fill, *stroke);
                    self.content.rect(x, y, *width as f32, *height as f32);
                    self.paint(*fill, *stroke);
                }
                Primitive::Circle {
                    center,
                    radius,
                    fill,
                    stroke,
                } => {
                    self.set_paint(*fill, *stroke);
                    self.circle_path(*center, *radius);
                    self.paint(*fill, *stroke);
                }
                Primitive::Polygon {
                    points,
                    fill,
                    stroke,
                } => {
                    let Some((first, rest)) = points.split_first() else {
                        continue;
                    };
                    self.set_paint(*fill, *stroke);
                    let (x, y) = self.flip(*first);
                    self.content.move_to(x, y);
                    for p in rest {
                        let (x, y) = self.flip(*p);
                        self.content.line_to(x, y);
                    }
                    self.content.close_path();
                    self.paint(*fill, *stroke);
                }
                Primitive::Text(run) => self.text(run),
            }
        }
        self.content.finish()
    }

    fn set_stroke(&mut self, stroke: Stroke) {
        let (r, g, b) = stroke.color.to_unit();
        self.content
            .set_stroke_rgb(r, g, b)
            .set_line_width(stroke.width as f32);
    }

    fn set_fill(&mut self, color: Rgb) {
        let (r, g, b) = color.to_unit();
        self.content.set_fill_rgb(r, g, b);
    }

    /// Sets colors and line width for the next path. Graphics state may not
    /// change between path construction and painting.
    fn set_paint(&mut self, fill: Option<Rgb>, stroke: Option<Stroke>) {
        if let Some(color) = fill {
            self.set_fill(color);
        }
        if let Some(stroke) = stroke {
            self.set_stroke(stroke);
        }
    }

    /// Paints the current path with the state from [`Self::set_paint`].
    fn paint(&mut self, fill: Option<Rgb>, stroke: Option<Stroke>) {
        match (fill.is_some(), stroke.is_some()) {
            (true, true) => self.content.fill_nonzero_and_stroke(),
            (true, false) => self.content.fill_nonzero(),
            (false, true) => self.content.close_and_stroke(),
            (false, false) => self.content.end_path(),
        };
    }

    fn circle_path(&mut self, center: Point, radius: f64) {
        let (cx, cy) = self.flip(center);
        let r = radius as f32;
        let k = (radius * KAPPA) as f32;
        self.content
            .move_to(cx + r, cy)
            .cubic_to(cx + r, cy + k, cx + k, cy + r, cx, cy + r)
            .cubic_to(cx - k, cy + r, cx - r, cy + k, cx - r, cy)
            .cubic_to(cx - r, cy - k, cx - k, cy - r, cx, cy - r)
            .cubic_to(cx + k, cy - r, cx + r, cy - k, cx + r, cy)
            .close_path();
    }

    fn text(&mut self, run: &TextRun) {
        let (x, y) = self.flip(run.origin);
        let matrix = match run.orientation {
            TextOrientation::Horizontal => [1.0, 0.0, 0.0, 1.0, x, y],
            TextOrientation::Vertical => [0.0, 1.0, -1.0, 0.0, x, y],
        };
        self.set_fill(run.color);
        let encoded = win_ansi(&run.text);
        self.content
            .begin_text()
            .set_font(FONT_NAME, run.size as f32)
            .set_text_matrix(matrix)
            .show(Str(&encoded))
            .end_text();
    }
}

/// Encodes text for the WinAnsi-encoded standard font. Characters outside
/// printable ASCII become `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            if c.is_ascii() && !c.is_ascii_control() {
                c as u8
            } else {
                b'?'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::figure::{Figure, LegendEntry, PlotPoint, Series};
    use crate::chart::{ChartConfig, SeriesStyle};

    fn scene() -> Scene {
        let mut figure = Figure::new(ChartConfig::default());
        for i in 0..6 {
            let style = SeriesStyle::for_index(i);
            let name = format!("Threshold 0.{}", i + 1);
            figure.add_series(Series {
                name: name.clone(),
                style,
                points: vec![PlotPoint {
                    x: 10f64.powi(i as i32 - 1) * 3.0,
                    y: 0.85 + 0.01 * i as f64,
                    label: "10".to_string(),
                }],
            });
            figure.add_legend_entry(LegendEntry { label: name, style });
        }
        Scene::layout(&figure).unwrap()
    }

    #[test]
    fn test_generate_pdf_structure() {
        let created = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let pdf = generate_pdf(&scene(), "Test Chart", created);

        assert!(pdf.starts_with(b"%PDF-"));
        let text = String::from_utf8_lossy(&pdf);
        assert!(text.contains("/Helvetica"));
        assert!(text.contains("/MediaBox"));
        assert!(text.contains("(Test Chart)"));
        assert!(text.trim_end().ends_with("%%EOF"));
    }

    #[test]
    fn test_content_contains_legend_text() {
        let scene = scene();
        let content = PageContent::new(scene.height).render(&scene);
        let text = String::from_utf8_lossy(&content);
        assert!(text.contains("(Threshold 0.1) Tj"));
        assert!(text.contains("(Threshold 0.6) Tj"));
        assert!(text.contains("(Detection Ratio) Tj"));
    }

    #[test]
    fn test_no_state_change_inside_path() {
        let scene = scene();
        let content = PageContent::new(scene.height).render(&scene);
        let text = String::from_utf8_lossy(&content);

        let mut in_path = false;
        let mut offenders = Vec::new();
        for line in text.lines() {
            let Some(op) = line.split_whitespace().last() else {
                continue;
            };
            match op {
                "m" | "l" | "c" | "v" | "y" | "h" | "re" => in_path = true,
                "S" | "s" | "f" | "F" | "f*" | "B" | "B*" | "b" | "b*" | "n" => in_path = false,
                _ if in_path => offenders.push(line.to_string()),
                _ => {}
            }
        }
        assert!(offenders.is_empty(), "state inside path: {offenders:?}");
    }

    #[test]
    fn test_fill_color_precedes_rect() {
        let scene = scene();
        let content = PageContent::new(scene.height).render(&scene);
        let text = String::from_utf8_lossy(&content);
        let lines: Vec<&str> = text.lines().collect();

        // background is the first primitive: white fill, rectangle, fill
        assert_eq!(lines[0], "1 1 1 rg");
        assert!(lines[1].ends_with(" re"));
        assert_eq!(lines[2], "f");
    }

    #[test]
    fn test_win_ansi() {
        assert_eq!(win_ansi("10 s"), b"10 s".to_vec());
        assert_eq!(win_ansi("μs"), b"?s".to_vec());
    }
}
