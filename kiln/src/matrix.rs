//! Affine transforms `[a b c d e f]`, linear part `[[a c] [b d]]` plus the
//! translation `(e, f)`.

use crate::{
    error::KilnError,
    geometry::{Footprint, Point},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix(pub [f64; 6]);

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix {
    pub const fn identity() -> Self {
        Matrix([1.0, 0.0, 0.0, 1.0, 0.0, 0.0])
    }

    pub const fn scale(sx: f64, sy: f64) -> Self {
        Matrix([sx, 0.0, 0.0, sy, 0.0, 0.0])
    }

    /// Counter-clockwise rotation by `angle` radians.
    pub fn rotate(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Matrix([cos, sin, -sin, cos, 0.0, 0.0])
    }

    pub const fn translate(tx: f64, ty: f64) -> Self {
        Matrix([1.0, 0.0, 0.0, 1.0, tx, ty])
    }

    /// `self ∘ other`: `other` is applied first, then `self`.
    pub fn compose(&self, other: &Matrix) -> Matrix {
        let [a, b, c, d, e, f] = self.0;
        let [g, h, i, j, k, l] = other.0;
        Matrix([
            a * g + c * h,
            b * g + d * h,
            a * i + c * j,
            b * i + d * j,
            a * k + c * l + e,
            b * k + d * l + f,
        ])
    }

    pub fn map_point(&self, p: Point) -> Point {
        let [a, b, c, d, e, f] = self.0;
        Point {
            x: a * p.x + c * p.y + e,
            y: b * p.x + d * p.y + f,
        }
    }

    /// Maps the box `[x0 y0 x1 y1]` onto the footprint: the source centre
    /// lands on the footprint centre, sizes are scaled and the result is
    /// rotated by the footprint angle.
    pub fn box_to_footprint(view_box: [f64; 4], dst: &Footprint) -> Matrix {
        let [x0, y0, x1, y1] = view_box;
        let sx = dst.width / (x1 - x0);
        let sy = dst.height / (y1 - y0);
        let src_cx = (x0 + x1) * 0.5;
        let src_cy = (y0 + y1) * 0.5;

        Matrix::translate(dst.cx, dst.cy).compose(
            &Matrix::rotate(dst.angle.to_radians())
                .compose(&Matrix::scale(sx, sy).compose(&Matrix::translate(-src_cx, -src_cy))),
        )
    }

    /// Content stream operator, ` a b c d e f cm` with 8 decimals each.
    pub fn to_operator(&self) -> String {
        let mut op = String::with_capacity(6 * 12 + 3);
        for v in self.0.iter() {
            // values that round to zero are written without sign
            let v = if v.abs() < 5e-9 { 0.0 } else { *v };
            op.push_str(&format!(" {:.8}", v));
        }
        op.push_str(" cm");
        op
    }
}

impl From<[f64; 6]> for Matrix {
    fn from(m: [f64; 6]) -> Self {
        Matrix(m)
    }
}

impl TryFrom<&[f64]> for Matrix {
    type Error = KilnError;

    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        let m: [f64; 6] = values
            .try_into()
            .map_err(|_| KilnError::InvalidMatrix(format!("expected 6 values, got {}", values.len())))?;
        if let Some(v) = m.iter().find(|v| !v.is_finite()) {
            return Err(KilnError::InvalidMatrix(format!("non-finite value {}", v)));
        }
        Ok(Matrix(m))
    }
}
