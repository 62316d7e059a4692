//! Path, shape and image operators appended to the current content stream.

use crate::{
    error::KilnError,
    geometry::{Footprint, Point},
    matrix::Matrix,
    pdf::{document::Document, Name},
    simple_encode::object::format_real,
};

/// Control point offset of a quarter circle Bézier, relative to the radius.
pub const KAPPA: f64 = 0.551915024494;

/// Corners of the unit square centred at the origin.
const UNIT_SQUARE: [Point; 4] = [
    Point::new(-0.5, -0.5),
    Point::new(0.5, -0.5),
    Point::new(0.5, 0.5),
    Point::new(-0.5, 0.5),
];

/// Truncates to 3 decimals.
fn n(v: f64) -> String {
    format_real((v * 1000.0).trunc() / 1000.0)
}

/// A poly line written with `m`/`l` operators.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinePath {
    pub path: Vec<Point>,
    /// Concatenated to the CTM before the path.
    pub matrix: Option<Matrix>,
    pub closed: bool,
    /// Use the path as clip instead of stroking it.
    pub clip: bool,
    /// Wrap in `q`/`Q`.
    pub save_state: bool,
}

impl LinePath {
    pub fn new(path: Vec<Point>) -> Self {
        Self {
            path,
            matrix: None,
            closed: false,
            clip: false,
            save_state: true,
        }
    }
}

/// How a polygon is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaintStyle {
    pub closed: bool,
    pub fill: bool,
    pub stroke: bool,
    pub clip: bool,
}

impl PaintStyle {
    fn polygon_operator(&self) -> &'static str {
        match (self.clip, self.fill, self.stroke) {
            (true, _, _) => "W n",
            (false, true, true) => "B",
            (false, true, false) => "f",
            (false, false, _) => "S",
        }
    }
}

fn circle_operator(stroke: bool, fill: bool) -> &'static str {
    match (fill, stroke) {
        (true, true) => "b",
        (true, false) => "f",
        (false, _) => "S",
    }
}

/// Closed path that restricts image painting.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClipPath {
    pub matrix: Option<Matrix>,
    pub path: Vec<Point>,
}

pub fn line_ops(line: &LinePath) -> String {
    let mut ops = String::new();
    if line.save_state {
        ops.push_str(" q");
    }
    if let Some(matrix) = &line.matrix {
        ops.push_str(&matrix.to_operator());
    }
    ops.push('\n');
    for (i, point) in line.path.iter().enumerate() {
        ops.push_str(&format!(
            " {:.3} {:.3} {}",
            point.x,
            point.y,
            if i == 0 { "m" } else { "l" }
        ));
    }
    if !line.path.is_empty() {
        if line.closed {
            ops.push_str(" h");
        }
        ops.push_str(if line.clip { " W n" } else { " S" });
    }
    ops.push_str(if line.save_state { " Q\n" } else { "\n" });
    ops
}

/// Every point is mapped through `matrix`. An empty path has no operators.
pub fn polygon_ops(path: &[Point], matrix: &Matrix, style: PaintStyle) -> String {
    if path.is_empty() {
        return String::new();
    }
    let mut ops = String::new();
    for (i, point) in path.iter().enumerate() {
        let p = matrix.map_point(*point);
        ops.push_str(&format!(
            "{:.3} {:.3} {} ",
            p.x,
            p.y,
            if i == 0 { "m" } else { "l" }
        ));
    }
    if style.closed {
        ops.push_str("h ");
    }
    ops.push_str(style.polygon_operator());
    ops.push('\n');
    ops
}

/// Four cubic Béziers, one per quadrant, starting at the top. Coordinates
/// are truncated to 3 decimals.
pub fn circle_ops(x: f64, y: f64, diameter: f64, stroke: bool, fill: bool) -> String {
    circle_path(x, y, diameter, stroke, fill, n)
}

fn circle_path(x: f64, y: f64, diameter: f64, stroke: bool, fill: bool, number: fn(f64) -> String) -> String {
    let r = diameter * 0.5;
    let c = KAPPA * r;
    let points = [
        (x, y + r),
        (x + c, y + r),
        (x + r, y + c),
        (x + r, y),
        (x + r, y - c),
        (x + c, y - r),
        (x, y - r),
        (x - c, y - r),
        (x - r, y - c),
        (x - r, y),
        (x - r, y + c),
        (x - c, y + r),
        (x, y + r),
    ];
    let mut ops = format!("{} {} m", number(points[0].0), number(points[0].1));
    for segment in points[1..].chunks(3) {
        for (px, py) in segment {
            ops.push_str(&format!(" {} {}", number(*px), number(*py)));
        }
        ops.push_str(" c");
    }
    ops.push(' ');
    ops.push_str(circle_operator(stroke, fill));
    ops.push('\n');
    ops
}

/// Unit circle scaled onto the footprint. The line width is divided by the
/// larger side to undo the scaling.
///
/// The unit circle is written at full precision, truncating before the
/// scale would distort the control points.
pub fn oval_ops(footprint: &Footprint, stroke: bool, fill: bool) -> String {
    let line_width = 1.0 / footprint.width.max(footprint.height);
    format!(
        " q{}\n{} w\n{}Q\n",
        footprint.matrix().to_operator(),
        format_real(line_width),
        circle_path(0.0, 0.0, 1.0, stroke, fill, format_real)
    )
}

pub fn image_ops(matrix: &Matrix, handle: &Name, clip: Option<&ClipPath>) -> String {
    let mut ops = String::new();
    if let Some(clip) = clip {
        ops.push_str(" q");
        ops.push_str(&line_ops(&LinePath {
            path: clip.path.clone(),
            matrix: clip.matrix,
            closed: true,
            clip: true,
            save_state: false,
        }));
    }
    ops.push_str(&format!(" q{} /{} Do Q", matrix.to_operator(), handle));
    ops.push_str(if clip.is_some() { " Q\n" } else { "\n" });
    ops
}

impl Document {
    pub fn add_line(&mut self, line: &LinePath) -> Result<(), KilnError> {
        self.require_current_page()?;
        self.push_content(line_ops(line))
    }

    pub fn add_polygon(&mut self, path: &[Point], matrix: &Matrix, style: PaintStyle) -> Result<(), KilnError> {
        self.require_current_page()?;
        let ops = polygon_ops(path, matrix, style);
        if ops.is_empty() {
            return Ok(());
        }
        self.push_content(ops)
    }

    pub fn add_circle(&mut self, x: f64, y: f64, diameter: f64, stroke: bool, fill: bool) -> Result<(), KilnError> {
        self.require_current_page()?;
        self.push_content(circle_ops(x, y, diameter, stroke, fill))
    }

    pub fn add_oval(&mut self, footprint: &Footprint, stroke: bool, fill: bool) -> Result<(), KilnError> {
        self.require_current_page()?;
        self.push_content(oval_ops(footprint, stroke, fill))
    }

    /// Unlike ovals, the line width is not normalised.
    pub fn add_rectangle(&mut self, footprint: &Footprint, stroke: bool, fill: bool) -> Result<(), KilnError> {
        self.add_polygon(
            &UNIT_SQUARE,
            &footprint.matrix(),
            PaintStyle {
                closed: true,
                fill,
                stroke,
                clip: false,
            },
        )
    }

    /// Paints a registered image, `matrix` maps the unit square onto the page.
    pub fn paint_image(&mut self, matrix: &Matrix, image: &str, clip: Option<&ClipPath>) -> Result<(), KilnError> {
        self.require_current_page()?;
        let handle = self.image_handle(image)?;
        self.push_content(image_ops(matrix, &handle, clip))
    }

    pub fn set_fill_color(&mut self, color: &str) -> Result<(), KilnError> {
        self.set_color(color, "rg")
    }

    pub fn set_stroke_color(&mut self, color: &str) -> Result<(), KilnError> {
        self.set_color(color, "RG")
    }

    fn set_color(&mut self, color: &str, operator: &str) -> Result<(), KilnError> {
        self.require_current_page()?;
        if color.is_empty() {
            return Ok(());
        }
        let ops = format!("{} {}\n", self.colors.operands(color)?, operator);
        self.push_content(ops)
    }
}
