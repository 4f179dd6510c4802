//! Laying out a [`Figure`] as backend-neutral drawing primitives.
//!
//! Coordinates are in points with the origin at the top left and y growing
//! downward. After layout the scene is cropped to the bounding box of
//! everything drawn, so `(0, 0)` is the top-left corner of the content.

use super::config::{AxisConfig, AxisScale, ChartConfig};
use super::figure::Figure;
use super::style::{Marker, Rgb, SeriesStyle, colors};
use super::text::{CAP_HEIGHT, DESCENT, SUPERSCRIPT_RISE, SUPERSCRIPT_SCALE, text_width};
use super::ticks::{AxisTicks, Tick, TickLabel};
use crate::error::{Error, Result};

const SPINE_WIDTH: f64 = 0.8;
const MAJOR_TICK_LEN: f64 = 3.5;
const MAJOR_TICK_WIDTH: f64 = 0.8;
const MINOR_TICK_LEN: f64 = 2.0;
const MINOR_TICK_WIDTH: f64 = 0.6;
const TICK_PAD: f64 = 3.5;
const LABEL_PAD: f64 = 4.0;
const LEGEND_FRAME_WIDTH: f64 = 0.8;

/// A position in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position, growing downward.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Line color and width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Line color.
    pub color: Rgb,
    /// Line width in points.
    pub width: f64,
}

/// Direction text runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextOrientation {
    /// Left to right.
    Horizontal,
    /// Bottom to top (rotated 90 degrees counter-clockwise).
    Vertical,
}

/// A single-font run of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// Start of the baseline.
    pub origin: Point,
    /// Text content.
    pub text: String,
    /// Font size in points.
    pub size: f64,
    /// Fill color.
    pub color: Rgb,
    /// Run direction.
    pub orientation: TextOrientation,
}

impl TextRun {
    fn bounds(&self) -> Bounds {
        let w = text_width(&self.text, self.size);
        let ascent = CAP_HEIGHT * self.size;
        let descent = DESCENT * self.size;
        let Point { x, y } = self.origin;
        match self.orientation {
            TextOrientation::Horizontal => Bounds::new(x, y - ascent, x + w, y + descent),
            TextOrientation::Vertical => Bounds::new(x - ascent, y - w, x + descent, y),
        }
    }
}

/// A drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Straight line segment.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Line style.
        stroke: Stroke,
    },
    /// Axis-aligned rectangle.
    Rect {
        /// Top-left corner.
        origin: Point,
        /// Width.
        width: f64,
        /// Height.
        height: f64,
        /// Fill color.
        fill: Option<Rgb>,
        /// Outline.
        stroke: Option<Stroke>,
    },
    /// Circle.
    Circle {
        /// Center.
        center: Point,
        /// Radius.
        radius: f64,
        /// Fill color.
        fill: Option<Rgb>,
        /// Outline.
        stroke: Option<Stroke>,
    },
    /// Closed polygon.
    Polygon {
        /// Vertices in order.
        points: Vec<Point>,
        /// Fill color.
        fill: Option<Rgb>,
        /// Outline.
        stroke: Option<Stroke>,
    },
    /// Text.
    Text(TextRun),
}

impl Primitive {
    fn bounds(&self) -> Bounds {
        let half = |stroke: &Option<Stroke>| stroke.map_or(0.0, |s| s.width / 2.0);
        match self {
            Self::Line { from, to, stroke } => Bounds::new(
                from.x.min(to.x),
                from.y.min(to.y),
                from.x.max(to.x),
                from.y.max(to.y),
            )
            .inflate(stroke.width / 2.0),
            Self::Rect {
                origin,
                width,
                height,
                stroke,
                ..
            } => Bounds::new(origin.x, origin.y, origin.x + width, origin.y + height)
                .inflate(half(stroke)),
            Self::Circle {
                center,
                radius,
                stroke,
                ..
            } => Bounds::new(
                center.x - radius,
                center.y - radius,
                center.x + radius,
                center.y + radius,
            )
            .inflate(half(stroke)),
            Self::Polygon { points, stroke, .. } => points
                .iter()
                .fold(Bounds::empty(), |b, p| b.include(*p))
                .inflate(half(stroke)),
            Self::Text(run) => run.bounds(),
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        let shift = |p: &mut Point| {
            p.x += dx;
            p.y += dy;
        };
        match self {
            Self::Line { from, to, .. } => {
                shift(from);
                shift(to);
            }
            Self::Rect { origin, .. } => shift(origin),
            Self::Circle { center, .. } => shift(center),
            Self::Polygon { points, .. } => points.iter_mut().for_each(shift),
            Self::Text(run) => shift(&mut run.origin),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    fn empty() -> Self {
        Self::new(
            f64::INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::NEG_INFINITY,
        )
    }

    fn include(self, p: Point) -> Self {
        self.union(Self::new(p.x, p.y, p.x, p.y))
    }

    fn union(self, other: Self) -> Self {
        Self::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    fn inflate(self, by: f64) -> Self {
        Self::new(
            self.min_x - by,
            self.min_y - by,
            self.max_x + by,
            self.max_y + by,
        )
    }
}

/// A laid-out, cropped figure ready for a backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Page width in points.
    pub width: f64,
    /// Page height in points.
    pub height: f64,
    /// Primitives in painting order.
    pub primitives: Vec<Primitive>,
    /// Number of data markers drawn (legend markers excluded).
    pub marker_count: usize,
    /// Legend rows, top to bottom.
    pub legend_labels: Vec<String>,
}

/// Maps data values into the plot rectangle.
struct Frame<'a> {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
    x_axis: &'a AxisConfig,
    y_axis: &'a AxisConfig,
}

impl Frame<'_> {
    fn x(&self, value: f64) -> f64 {
        self.left + axis_fraction(self.x_axis, value) * (self.right - self.left)
    }

    fn y(&self, value: f64) -> f64 {
        self.bottom - axis_fraction(self.y_axis, value) * (self.bottom - self.top)
    }
}

fn axis_fraction(axis: &AxisConfig, value: f64) -> f64 {
    match axis.scale {
        AxisScale::Linear => (value - axis.min) / (axis.max - axis.min),
        AxisScale::Log => {
            (value.log10() - axis.min.log10()) / (axis.max.log10() - axis.min.log10())
        }
    }
}

fn validate_axis(name: &str, axis: &AxisConfig) -> Result<()> {
    if !(axis.min.is_finite() && axis.max.is_finite() && axis.min < axis.max) {
        return Err(Error::Render(format!(
            "{name} axis limits [{}, {}] are not an increasing finite range",
            axis.min, axis.max
        )));
    }
    if axis.scale == AxisScale::Log && axis.min <= 0.0 {
        return Err(Error::Render(format!(
            "{name} axis is logarithmic but its lower limit is {}",
            axis.min
        )));
    }
    Ok(())
}

/// Width of a tick label and its extent above the baseline.
fn tick_label_extent(label: &TickLabel, size: f64) -> (f64, f64) {
    match label {
        TickLabel::Plain(text) => (text_width(text, size), CAP_HEIGHT * size),
        TickLabel::Power { base, exponent } => (
            text_width(base, size) + text_width(exponent, size * SUPERSCRIPT_SCALE),
            (SUPERSCRIPT_RISE + CAP_HEIGHT * SUPERSCRIPT_SCALE) * size,
        ),
    }
}

/// Text runs of a tick label whose baseline starts at `origin`.
fn tick_label_runs(label: &TickLabel, size: f64, origin: Point) -> Vec<TextRun> {
    let run = |text: &str, size: f64, origin: Point| TextRun {
        origin,
        text: text.to_string(),
        size,
        color: colors::BLACK,
        orientation: TextOrientation::Horizontal,
    };
    match label {
        TickLabel::Plain(text) => vec![run(text, size, origin)],
        TickLabel::Power { base, exponent } => {
            let exp_origin = Point::new(
                origin.x + text_width(base, size),
                origin.y - SUPERSCRIPT_RISE * size,
            );
            vec![
                run(base, size, origin),
                run(exponent, size * SUPERSCRIPT_SCALE, exp_origin),
            ]
        }
    }
}

fn marker_primitives(style: SeriesStyle, center: Point, size: f64, edge: f64) -> Vec<Primitive> {
    let stroke = Stroke {
        color: style.color,
        width: edge,
    };
    let h = size / 2.0;
    match style.marker {
        Marker::Circle => vec![Primitive::Circle {
            center,
            radius: h,
            fill: Some(style.color),
            stroke: Some(stroke),
        }],
        Marker::Cross => vec![
            Primitive::Line {
                from: Point::new(center.x - h, center.y - h),
                to: Point::new(center.x + h, center.y + h),
                stroke,
            },
            Primitive::Line {
                from: Point::new(center.x - h, center.y + h),
                to: Point::new(center.x + h, center.y - h),
                stroke,
            },
        ],
        marker => {
            let points = marker
                .outline(size)
                .unwrap_or_default()
                .into_iter()
                .map(|(dx, dy)| Point::new(center.x + dx, center.y + dy))
                .collect();
            vec![Primitive::Polygon {
                points,
                fill: Some(style.color),
                stroke: Some(stroke),
            }]
        }
    }
}

impl Scene {
    /// Lays out `figure` and crops the result to its content.
    ///
    /// Points outside the axis limits are skipped; points exactly on a limit
    /// are drawn.
    pub fn layout(figure: &Figure) -> Result<Self> {
        let config = figure.config();
        validate_axis("x", &config.x_axis)?;
        validate_axis("y", &config.y_axis)?;

        let x_ticks = AxisTicks::for_axis(&config.x_axis);
        let y_ticks = AxisTicks::for_axis(&config.y_axis);
        let frame = plot_frame(config, &x_ticks, &y_ticks)?;

        let mut primitives = Vec::new();

        // Axes background
        primitives.push(Primitive::Rect {
            origin: Point::new(frame.left, frame.top),
            width: frame.right - frame.left,
            height: frame.bottom - frame.top,
            fill: Some(colors::WHITE),
            stroke: None,
        });

        // Grid, minor below major
        let grid = Stroke {
            color: config.grid_color,
            width: config.grid_width,
        };
        for tick in x_ticks.minor.iter().chain(&x_ticks.major) {
            let x = frame.x(tick.value);
            primitives.push(Primitive::Line {
                from: Point::new(x, frame.top),
                to: Point::new(x, frame.bottom),
                stroke: grid,
            });
        }
        for tick in y_ticks.minor.iter().chain(&y_ticks.major) {
            let y = frame.y(tick.value);
            primitives.push(Primitive::Line {
                from: Point::new(frame.left, y),
                to: Point::new(frame.right, y),
                stroke: grid,
            });
        }

        // Data markers and their annotations
        let mut marker_count = 0;
        for series in figure.series() {
            for point in &series.points {
                if !(config.x_axis.contains(point.x) && config.y_axis.contains(point.y)) {
                    continue;
                }
                let center = Point::new(frame.x(point.x), frame.y(point.y));
                primitives.extend(marker_primitives(
                    series.style,
                    center,
                    config.marker_size,
                    config.marker_edge_width,
                ));
                marker_count += 1;

                let size = config.annotation_font_size;
                let label_center_y = center.y + config.annotation_offset;
                primitives.push(Primitive::Text(TextRun {
                    origin: Point::new(
                        center.x - text_width(&point.label, size) / 2.0,
                        label_center_y + CAP_HEIGHT * size / 2.0,
                    ),
                    text: point.label.clone(),
                    size,
                    color: series.style.color,
                    orientation: TextOrientation::Horizontal,
                }));
            }
        }

        // Spines
        primitives.push(Primitive::Rect {
            origin: Point::new(frame.left, frame.top),
            width: frame.right - frame.left,
            height: frame.bottom - frame.top,
            fill: None,
            stroke: Some(Stroke {
                color: colors::BLACK,
                width: SPINE_WIDTH,
            }),
        });

        push_x_ticks(&mut primitives, config, &frame, &x_ticks);
        push_y_ticks(&mut primitives, config, &frame, &y_ticks);
        push_axis_labels(&mut primitives, config, &frame, &x_ticks, &y_ticks);

        let legend_labels = push_legend(&mut primitives, figure, &frame);

        Ok(Self::cropped(primitives, marker_count, legend_labels, config.pad))
    }

    fn cropped(
        mut primitives: Vec<Primitive>,
        marker_count: usize,
        legend_labels: Vec<String>,
        pad: f64,
    ) -> Self {
        let bounds = primitives
            .iter()
            .fold(Bounds::empty(), |b, p| b.union(p.bounds()));
        let dx = pad - bounds.min_x;
        let dy = pad - bounds.min_y;
        for p in &mut primitives {
            p.translate(dx, dy);
        }
        Self {
            width: bounds.max_x - bounds.min_x + 2.0 * pad,
            height: bounds.max_y - bounds.min_y + 2.0 * pad,
            primitives,
            marker_count,
            legend_labels,
        }
    }

    /// All text runs in painting order.
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text(run) => Some(run),
            _ => None,
        })
    }
}

/// Places the plot rectangle inside the figure, leaving room for tick
/// labels and axis labels.
fn plot_frame<'a>(
    config: &'a ChartConfig,
    x_ticks: &AxisTicks,
    y_ticks: &AxisTicks,
) -> Result<Frame<'a>> {
    let (fig_w, fig_h) = config.size_points();
    let label_depth = (CAP_HEIGHT + DESCENT) * config.label_font_size;

    let y_tick_width = max_label_width(config, y_ticks);
    let x_tick_height = max_label_height(config, x_ticks);

    let left = label_depth + LABEL_PAD + y_tick_width + TICK_PAD + MAJOR_TICK_LEN;
    let bottom = MAJOR_TICK_LEN + TICK_PAD + x_tick_height + LABEL_PAD + label_depth;
    let top = CAP_HEIGHT * config.major_tick_font_size / 2.0 + SPINE_WIDTH;
    let right = SPINE_WIDTH + 2.0;

    let frame = Frame {
        left,
        top,
        right: fig_w - right,
        bottom: fig_h - bottom,
        x_axis: &config.x_axis,
        y_axis: &config.y_axis,
    };
    if frame.right <= frame.left || frame.bottom <= frame.top {
        return Err(Error::Render(format!(
            "figure of {fig_w:.1}x{fig_h:.1} pt leaves no room for the plot area"
        )));
    }
    Ok(frame)
}

fn tick_font(config: &ChartConfig, major: bool) -> f64 {
    if major {
        config.major_tick_font_size
    } else {
        config.minor_tick_font_size
    }
}

fn labelled<'a>(ticks: &'a AxisTicks) -> impl Iterator<Item = (&'a Tick, &'a TickLabel, bool)> {
    let major = ticks.major.iter().map(|t| (t, true));
    let minor = ticks.minor.iter().map(|t| (t, false));
    major
        .chain(minor)
        .filter_map(|(t, is_major)| t.label.as_ref().map(|l| (t, l, is_major)))
}

fn max_label_width(config: &ChartConfig, ticks: &AxisTicks) -> f64 {
    labelled(ticks)
        .map(|(_, label, major)| tick_label_extent(label, tick_font(config, major)).0)
        .fold(0.0, f64::max)
}

fn max_label_height(config: &ChartConfig, ticks: &AxisTicks) -> f64 {
    labelled(ticks)
        .map(|(_, label, major)| tick_label_extent(label, tick_font(config, major)).1)
        .fold(0.0, f64::max)
}

fn tick_stroke(major: bool) -> Stroke {
    Stroke {
        color: colors::BLACK,
        width: if major { MAJOR_TICK_WIDTH } else { MINOR_TICK_WIDTH },
    }
}

fn push_x_ticks(out: &mut Vec<Primitive>, config: &ChartConfig, frame: &Frame, ticks: &AxisTicks) {
    for (tick, major) in ticks
        .minor
        .iter()
        .map(|t| (t, false))
        .chain(ticks.major.iter().map(|t| (t, true)))
    {
        let x = frame.x(tick.value);
        let len = if major { MAJOR_TICK_LEN } else { MINOR_TICK_LEN };
        out.push(Primitive::Line {
            from: Point::new(x, frame.bottom),
            to: Point::new(x, frame.bottom + len),
            stroke: tick_stroke(major),
        });
    }

    let top = frame.bottom + MAJOR_TICK_LEN + TICK_PAD;
    for (tick, label, major) in labelled(ticks) {
        let size = tick_font(config, major);
        let (width, ascent) = tick_label_extent(label, size);
        let origin = Point::new(frame.x(tick.value) - width / 2.0, top + ascent);
        out.extend(tick_label_runs(label, size, origin).into_iter().map(Primitive::Text));
    }
}

fn push_y_ticks(out: &mut Vec<Primitive>, config: &ChartConfig, frame: &Frame, ticks: &AxisTicks) {
    for (tick, major) in ticks
        .minor
        .iter()
        .map(|t| (t, false))
        .chain(ticks.major.iter().map(|t| (t, true)))
    {
        let y = frame.y(tick.value);
        let len = if major { MAJOR_TICK_LEN } else { MINOR_TICK_LEN };
        out.push(Primitive::Line {
            from: Point::new(frame.left, y),
            to: Point::new(frame.left - len, y),
            stroke: tick_stroke(major),
        });
    }

    let right = frame.left - MAJOR_TICK_LEN - TICK_PAD;
    for (tick, label, major) in labelled(ticks) {
        let size = tick_font(config, major);
        let (width, _) = tick_label_extent(label, size);
        let origin = Point::new(right - width, frame.y(tick.value) + CAP_HEIGHT * size / 2.0);
        out.extend(tick_label_runs(label, size, origin).into_iter().map(Primitive::Text));
    }
}

fn push_axis_labels(
    out: &mut Vec<Primitive>,
    config: &ChartConfig,
    frame: &Frame,
    x_ticks: &AxisTicks,
    y_ticks: &AxisTicks,
) {
    let size = config.label_font_size;

    let x_label = &config.x_axis.label;
    let top = frame.bottom + MAJOR_TICK_LEN + TICK_PAD + max_label_height(config, x_ticks) + LABEL_PAD;
    out.push(Primitive::Text(TextRun {
        origin: Point::new(
            (frame.left + frame.right - text_width(x_label, size)) / 2.0,
            top + CAP_HEIGHT * size,
        ),
        text: x_label.clone(),
        size,
        color: colors::BLACK,
        orientation: TextOrientation::Horizontal,
    }));

    let y_label = &config.y_axis.label;
    let right =
        frame.left - MAJOR_TICK_LEN - TICK_PAD - max_label_width(config, y_ticks) - LABEL_PAD;
    out.push(Primitive::Text(TextRun {
        origin: Point::new(
            right - DESCENT * size,
            (frame.top + frame.bottom + text_width(y_label, size)) / 2.0,
        ),
        text: y_label.clone(),
        size,
        color: colors::BLACK,
        orientation: TextOrientation::Vertical,
    }));
}

/// Draws the legend box and returns its row labels.
fn push_legend(out: &mut Vec<Primitive>, figure: &Figure, frame: &Frame) -> Vec<String> {
    let entries = figure.legend();
    if entries.is_empty() {
        return Vec::new();
    }
    let config = figure.config();
    let fs = config.legend_font_size;
    let border_pad = 0.4 * fs;
    let axes_pad = 0.5 * fs;
    let spacing = 0.5 * fs;
    let handle_len = 2.0 * fs;
    let handle_pad = 0.8 * fs;

    let rows = entries.len() as f64;
    let text_w = entries
        .iter()
        .map(|e| text_width(&e.label, fs))
        .fold(0.0, f64::max);
    let box_w = 2.0 * border_pad + handle_len + handle_pad + text_w;
    let box_h = 2.0 * border_pad + rows * fs + (rows - 1.0) * spacing;

    // Upper right, inset from the spines
    let (x, y) = (frame.right - axes_pad - box_w, frame.top + axes_pad);

    out.push(Primitive::Rect {
        origin: Point::new(x, y),
        width: box_w,
        height: box_h,
        fill: Some(colors::WHITE),
        stroke: Some(Stroke {
            color: colors::LEGEND_EDGE,
            width: LEGEND_FRAME_WIDTH,
        }),
    });

    let mut labels = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        let cy = y + border_pad + i as f64 * (fs + spacing) + fs / 2.0;
        let marker_center = Point::new(x + border_pad + handle_len / 2.0, cy);
        out.extend(marker_primitives(
            entry.style,
            marker_center,
            config.marker_size,
            config.marker_edge_width,
        ));
        out.push(Primitive::Text(TextRun {
            origin: Point::new(
                x + border_pad + handle_len + handle_pad,
                cy + CAP_HEIGHT * fs / 2.0,
            ),
            text: entry.label.clone(),
            size: fs,
            color: colors::BLACK,
            orientation: TextOrientation::Horizontal,
        }));
        labels.push(entry.label.clone());
    }
    labels
}
