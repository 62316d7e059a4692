//! Glyph metrics of the standard fonts, used to measure text.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use fnv::FnvHashMap;

use crate::{
    error::KilnError,
    geometry::BoundingBox,
    parse::metrics::{records, MetricRecord},
};

const HELVETICA: &str = include_str!("../assets/std-fonts/Helvetica.b64");
const COURIER: &str = include_str!("../assets/std-fonts/Courier.b64");
const TIMES_ROMAN: &str = include_str!("../assets/std-fonts/Times-Roman.b64");

/// Metrics of one glyph as a fraction of the font size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlyphMetrics {
    pub width: f64,
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

impl From<&MetricRecord> for GlyphMetrics {
    fn from(r: &MetricRecord) -> Self {
        Self {
            width: f64::from(r.width) / 1000.0,
            minx: f64::from(r.minx) / 1000.0,
            miny: f64::from(r.miny) / 1000.0,
            maxx: f64::from(r.maxx) / 1000.0,
            maxy: f64::from(r.maxy) / 1000.0,
        }
    }
}

/// Half-up rounding to 2 decimals.
fn round2(v: f64) -> f64 {
    (v * 100.0 + 0.5).floor() / 100.0
}

#[derive(Debug, Clone, PartialEq)]
pub struct FontMetrics {
    base_font: String,
    glyphs: FnvHashMap<i32, GlyphMetrics>,
}

impl FontMetrics {
    pub fn from_records(base_font: &str, records: &[MetricRecord]) -> Self {
        Self {
            base_font: base_font.to_owned(),
            glyphs: records
                .iter()
                .map(|r| (i32::from(r.code), GlyphMetrics::from(r)))
                .collect(),
        }
    }

    pub fn base_font(&self) -> &str {
        &self.base_font
    }

    pub fn glyph(&self, code: u16) -> Option<&GlyphMetrics> {
        self.glyphs.get(&i32::from(code))
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Sum of all advances, unknown characters don't move.
    pub fn advance(&self, text: &str, size: f64) -> f64 {
        text.encode_utf16()
            .filter_map(|c| self.glyph(c))
            .map(|g| g.width)
            .sum::<f64>()
            * size
    }

    /// Bounding box of `text` set at `size`.
    ///
    /// The first known character seeds the box. Every following one moves
    /// `maxx` to its own right edge and widens the vertical extent. Unknown
    /// characters are skipped.
    pub fn measure(&self, text: &str, size: f64) -> BoundingBox {
        let mut bbox: Option<BoundingBox> = None;
        let mut position = 0.0;
        for glyph in text.encode_utf16().filter_map(|c| self.glyph(c)) {
            match bbox.as_mut() {
                None => {
                    bbox = Some(BoundingBox::new(glyph.minx, glyph.miny, glyph.maxx, glyph.maxy));
                }
                Some(b) => {
                    b.maxx = position + glyph.maxx;
                    b.miny = b.miny.min(glyph.miny);
                    b.maxy = b.maxy.max(glyph.maxy);
                }
            }
            position += glyph.width;
        }
        let b = bbox.unwrap_or_default();
        BoundingBox::new(
            round2(b.minx * size),
            round2(b.miny * size),
            round2(b.maxx * size),
            round2(b.maxy * size),
        )
    }
}

/// Metrics of all known fonts by logical name.
///
/// Built once and shared read-only by any number of documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontMetricsTable {
    fonts: FnvHashMap<String, FontMetrics>,
    base_fonts: FnvHashMap<String, String>,
}

impl FontMetricsTable {
    /// Helvetica, Courier and Times-Roman under `helvetica`, `courier` and
    /// `times roman`.
    pub fn standard() -> Result<Self, KilnError> {
        let mut table = Self::default();
        table.insert_base64("helvetica", "Helvetica", HELVETICA)?;
        table.insert_base64("courier", "Courier", COURIER)?;
        table.insert_base64("times roman", "Times-Roman", TIMES_ROMAN)?;
        Ok(table)
    }

    /// Registers a font from raw 12 byte records.
    pub fn insert(&mut self, key: &str, base_font: &str, data: &[u8]) -> Result<(), KilnError> {
        let (_, recs) = records(data).map_err(|_| {
            KilnError::InvalidFontData(format!(
                "{} bytes for {} is not a list of records",
                data.len(),
                key
            ))
        })?;
        log::debug!("font {} ({}) with {} glyphs", key, base_font, recs.len());
        self.fonts
            .insert(key.to_owned(), FontMetrics::from_records(base_font, &recs));
        self.base_fonts.insert(base_font.to_owned(), key.to_owned());
        Ok(())
    }

    /// Registers a font from base64 text, whitespace is ignored.
    pub fn insert_base64(&mut self, key: &str, base_font: &str, text: &str) -> Result<(), KilnError> {
        let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        let data = STANDARD
            .decode(compact)
            .map_err(|err| KilnError::InvalidFontData(format!("{}: {}", key, err)))?;
        self.insert(key, base_font, &data)
    }

    /// Looks up a font by logical or base font name.
    pub fn get(&self, name: &str) -> Option<&FontMetrics> {
        self.fonts.get(name).or_else(|| {
            self.base_fonts
                .get(name)
                .and_then(|key| self.fonts.get(key))
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn measure_text(&self, font: &str, text: &str, size: f64) -> Result<BoundingBox, KilnError> {
        self.get(font)
            .map(|f| f.measure(text, size))
            .ok_or_else(|| KilnError::FontNotFound(font.to_owned()))
    }

    pub fn text_width(&self, font: &str, text: &str, size: f64) -> Result<f64, KilnError> {
        self.get(font)
            .map(|f| f.advance(text, size))
            .ok_or_else(|| KilnError::FontNotFound(font.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hello_world_oracle() {
        let table = FontMetricsTable::standard().unwrap();
        let bbox = table.measure_text("helvetica", "hello world", 20.0).unwrap();
        assert_eq!(bbox, BoundingBox::new(1.3, -0.3, 94.44, 14.36));
    }

    #[test]
    fn standard_fonts_cover_ascii() {
        let table = FontMetricsTable::standard().unwrap();
        for name in ["helvetica", "courier", "times roman", "Times-Roman"] {
            let font = table.get(name).unwrap();
            assert_eq!(font.len(), 95, "{}", name);
            assert!(font.glyph(u16::from(b'A')).is_some());
        }
        assert_eq!(table.get("Courier").map(FontMetrics::base_font), Some("Courier"));
    }

    #[test]
    fn courier_is_monospaced() {
        let table = FontMetricsTable::standard().unwrap();
        let width = table.text_width("courier", "iWiW", 10.0).unwrap();
        assert!((width - 24.0).abs() < 1e-9, "{}", width);
    }

    #[test]
    fn unknown_font() {
        let table = FontMetricsTable::standard().unwrap();
        assert_eq!(
            table.measure_text("comic", "x", 10.0),
            Err(KilnError::FontNotFound("comic".to_owned()))
        );
    }

    #[test]
    fn unknown_characters_are_skipped() {
        let table = FontMetricsTable::standard().unwrap();
        let plain = table.measure_text("helvetica", "hello", 12.0).unwrap();
        let mixed = table.measure_text("helvetica", "\u{2603}hel\u{1F600}lo", 12.0).unwrap();
        assert_eq!(plain, mixed);
        assert_eq!(
            table.measure_text("helvetica", "\u{2603}", 12.0).unwrap(),
            BoundingBox::default()
        );
    }

    #[test]
    fn custom_records() {
        let mut table = FontMetricsTable::default();
        let record = [0x00, 0x41, 0x01, 0xf4, 0x00, 0x00, 0x00, 0x00, 0x01, 0xf4, 0x03, 0xe8];
        table.insert("box", "Box", &record).unwrap();
        let bbox = table.measure_text("box", "AA", 10.0).unwrap();
        assert_eq!(bbox, BoundingBox::new(0.0, 0.0, 10.0, 10.0));
        assert!(matches!(
            table.insert("broken", "Broken", &record[..7]),
            Err(KilnError::InvalidFontData(_))
        ));
    }
}
