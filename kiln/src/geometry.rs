use crate::matrix::Matrix;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

impl BoundingBox {
    pub const fn new(minx: f64, miny: f64, maxx: f64, maxy: f64) -> Self {
        Self { minx, miny, maxx, maxy }
    }

    pub fn width(&self) -> f64 {
        self.maxx - self.minx
    }

    pub fn height(&self) -> f64 {
        self.maxy - self.miny
    }

    pub fn center(&self) -> Point {
        Point {
            x: (self.minx + self.maxx) * 0.5,
            y: (self.miny + self.maxy) * 0.5,
        }
    }
}

/// Oriented destination of a shape: centre, size and rotation in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Footprint {
    pub cx: f64,
    pub cy: f64,
    pub width: f64,
    pub height: f64,
    pub angle: f64,
}

impl Footprint {
    /// `translate ∘ rotate ∘ scale(width, height)`, maps the unit shape
    /// centred at the origin onto this footprint.
    pub fn matrix(&self) -> Matrix {
        Matrix::translate(self.cx, self.cy).compose(
            &Matrix::rotate(self.angle.to_radians()).compose(&Matrix::scale(self.width, self.height)),
        )
    }
}
