//! Text measuring and placement.

use crate::{
    error::KilnError,
    geometry::{BoundingBox, Point},
    pdf::{document::Document, PdfString, Resource},
    simple_encode::{object::format_real, SimpleEncoder},
    writer::Encoder,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Horizontal {
    Left,
    Right,
    #[default]
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Vertical {
    Top,
    Bottom,
    #[default]
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Alignment {
    pub horizontal: Horizontal,
    pub vertical: Vertical,
}

impl Alignment {
    /// Two letter code: `l`, `r` or `c` followed by `t`, `b` or `c`.
    /// Anything unknown or missing centres.
    pub fn parse(code: &str) -> Self {
        let mut chars = code.chars();
        let horizontal = match chars.next() {
            Some('l') => Horizontal::Left,
            Some('r') => Horizontal::Right,
            Some('c') | None => Horizontal::Center,
            Some(other) => {
                log::warn!("unknown horizontal alignment {:?} in {:?}", other, code);
                Horizontal::Center
            }
        };
        let vertical = match chars.next() {
            Some('t') => Vertical::Top,
            Some('b') => Vertical::Bottom,
            Some('c') | None => Vertical::Center,
            Some(other) => {
                log::warn!("unknown vertical alignment {:?} in {:?}", other, code);
                Vertical::Center
            }
        };
        Self { horizontal, vertical }
    }
}

/// Text origin that puts the measured box at the aligned position inside
/// `dst`.
pub fn align(measured: &BoundingBox, dst: &BoundingBox, alignment: Alignment) -> Point {
    let x = match alignment.horizontal {
        Horizontal::Left => dst.minx - measured.minx,
        Horizontal::Right => dst.maxx - measured.maxx,
        Horizontal::Center => dst.center().x - measured.center().x,
    };
    let y = match alignment.vertical {
        Vertical::Top => dst.maxy - measured.maxy,
        Vertical::Bottom => dst.miny - measured.miny,
        Vertical::Center => dst.center().y - measured.center().y,
    };
    Point { x, y }
}

/// Truncates to 3 decimals.
fn coordinate(v: f64) -> String {
    format_real((v * 1000.0).trunc() / 1000.0)
}

impl Document {
    /// Selects the font for following text. It has to be registered with
    /// `add_font` first.
    pub fn set_font(&mut self, name: &str) -> Result<(), KilnError> {
        if self.font_object(name).is_none() {
            return Err(KilnError::FontNotFound(name.to_owned()));
        }
        self.font = name.to_owned();
        Ok(())
    }

    pub fn font(&self) -> &str {
        &self.font
    }

    /// Measures text with a registered font.
    pub fn measure_text(&self, font: &str, text: &str, size: f64) -> Result<BoundingBox, KilnError> {
        let id = self
            .font_object(font)
            .ok_or_else(|| KilnError::FontNotFound(font.to_owned()))?;
        // the base font is what gets rendered, the logical name may collide
        // with an unrelated metrics key
        let metrics = match self.arena.get(id).and_then(|obj| obj.resource()) {
            Some(Resource::Font { base_font, .. }) => self.metrics.get(base_font),
            _ => None,
        }
        .or_else(|| self.metrics.get(font));
        metrics
            .map(|m| m.measure(text, size))
            .ok_or_else(|| KilnError::FontNotFound(font.to_owned()))
    }

    /// Places `text` inside `dst` with the current font.
    pub fn add_text(&mut self, text: &str, size: f64, dst: &BoundingBox, alignment: &str) -> Result<(), KilnError> {
        self.require_current_page()?;
        let font = self.font.clone();
        let measured = self.measure_text(&font, text, size)?;
        let origin = align(&measured, dst, Alignment::parse(alignment));

        let handle = self
            .font_object(&font)
            .and_then(|id| self.arena.get(id))
            .and_then(|obj| obj.resource())
            .map(|r| r.handle().clone())
            .ok_or_else(|| KilnError::FontNotFound(font.clone()))?;

        let mut string: Vec<u8> = Vec::new();
        SimpleEncoder::write_to(&PdfString::from(text), &mut string);
        let ops = format!(
            "BT /{} {} Tf\n{} {} Td\n{} Tj\nET\n",
            handle,
            format_real(size),
            coordinate(origin.x),
            coordinate(origin.y),
            String::from_utf8_lossy(&string)
        );
        log::trace!("text {:?} at {:?}", text, origin);
        self.push_content(ops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{font::FontMetricsTable, pdf::document::tests::document};

    const HELLO: BoundingBox = BoundingBox::new(1.3, -0.3, 94.44, 14.36);
    const SQUARE: BoundingBox = BoundingBox::new(0.0, 0.0, 100.0, 100.0);

    fn assert_close(p: Point, x: f64, y: f64) {
        assert!((p.x - x).abs() < 1e-9 && (p.y - y).abs() < 1e-9, "{:?}", p);
    }

    #[test]
    fn parse_codes() {
        assert_eq!(
            Alignment::parse("lt"),
            Alignment {
                horizontal: Horizontal::Left,
                vertical: Vertical::Top
            }
        );
        assert_eq!(
            Alignment::parse("rb"),
            Alignment {
                horizontal: Horizontal::Right,
                vertical: Vertical::Bottom
            }
        );
        assert_eq!(Alignment::parse(""), Alignment::default());
        assert_eq!(Alignment::parse("xy"), Alignment::default());
    }

    #[test]
    fn centred() {
        let origin = align(&HELLO, &SQUARE, Alignment::parse("cc"));
        // the centre of the placed box is the centre of the square
        assert_close(
            Point::new(origin.x + HELLO.center().x, origin.y + HELLO.center().y),
            50.0,
            50.0,
        );
    }

    #[test]
    fn left_top() {
        let origin = align(&HELLO, &SQUARE, Alignment::parse("lt"));
        assert_close(Point::new(origin.x + HELLO.minx, origin.y + HELLO.maxy), 0.0, 100.0);
    }

    #[test]
    fn right_bottom() {
        let origin = align(&HELLO, &SQUARE, Alignment::parse("rb"));
        assert_close(Point::new(origin.x + HELLO.maxx, origin.y + HELLO.miny), 100.0, 0.0);
    }

    #[test]
    fn fonts_must_be_registered() {
        let mut doc = document();
        assert_eq!(doc.font(), "helvetica");
        assert_eq!(doc.set_font("courier"), Err(KilnError::FontNotFound("courier".to_owned())));
        assert_eq!(
            doc.measure_text("courier", "x", 10.0),
            Err(KilnError::FontNotFound("courier".to_owned()))
        );
        doc.add_font("mono", "Courier").unwrap();
        doc.set_font("mono").unwrap();
        let bbox = doc.measure_text("mono", "ii", 10.0).unwrap();
        assert!(bbox.maxx > 6.0);
    }

    #[test]
    fn measured_with_the_rendered_base_font() {
        let mut doc = document();
        doc.add_font("courier", "Helvetica").unwrap();
        let table = FontMetricsTable::standard().unwrap();
        assert_eq!(
            doc.measure_text("courier", "iiii", 10.0),
            table.measure_text("helvetica", "iiii", 10.0)
        );
        assert_ne!(
            doc.measure_text("courier", "iiii", 10.0),
            table.measure_text("courier", "iiii", 10.0)
        );
    }

    #[test]
    fn measure_oracle_through_document() {
        let doc = document();
        assert_eq!(doc.measure_text("helvetica", "hello world", 20.0).unwrap(), HELLO);
    }

    #[test]
    fn text_operators() {
        let mut doc = document();
        assert_eq!(
            doc.add_text("x", 10.0, &SQUARE, "cc"),
            Err(KilnError::NoCurrentPage)
        );
        doc.add_page(None).unwrap();
        doc.add_text("hello world", 20.0, &SQUARE, "lt").unwrap();
        doc.add_text("a(b", 20.0, &SQUARE, "lt").unwrap();
        let id = doc.lookup("contents_1").unwrap();
        let stream = doc.object(id).unwrap().stream();
        assert_eq!(
            String::from_utf8_lossy(&stream[0]),
            "BT /F1 20 Tf\n-1.3 85.64 Td\n(hello world) Tj\nET\n"
        );
        assert!(String::from_utf8_lossy(&stream[1]).contains(r"(a\(b) Tj"));
    }
}
