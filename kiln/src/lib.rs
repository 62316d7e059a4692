//! Builds PDF documents in memory from drawing and text calls.

pub use crate::{
    color::ColorCache,
    content::{ClipPath, LinePath, PaintStyle},
    error::KilnError,
    font::{FontMetrics, FontMetricsTable, GlyphMetrics},
    geometry::{BoundingBox, Footprint, Point},
    matrix::Matrix,
    parse::XrefSection,
    pdf::document::{Document, DocumentOptions, PixelFormat, StreamData},
    text::{Alignment, Horizontal, Vertical},
};

mod color;
pub mod content;
mod error;
mod font;
mod geometry;
mod matrix;
pub mod parse;
pub mod pdf;
pub mod simple_encode;
mod text;
pub mod writer;

/// Reads back the cross-reference section of a rendered file and checks that
/// every used entry points at the `<num> <gen> obj` line of its object.
pub fn inspect(bytes: &[u8]) -> Result<XrefSection, KilnError> {
    let (_, section) = parse::xref_section(parse::span(bytes))?;

    if section.xref.len() != section.trailer.size {
        return Err(KilnError::InvalidXref(format!(
            "{} entries but trailer size {}",
            section.xref.len(),
            section.trailer.size
        )));
    }

    for used in section.xref.used_objects() {
        let line = format!("{} {} obj", used.number, used.generation);
        let found = bytes
            .get(used.byte_offset..)
            .map_or(false, |rest| rest.starts_with(line.as_bytes()));
        if !found {
            return Err(KilnError::OffsetMismatch {
                number: used.number,
                offset: used.byte_offset,
            });
        }
    }
    log::debug!(
        "{} objects, xref at {}",
        section.xref.used_objects().count(),
        section.start_xref
    );

    Ok(section)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn sample() -> Document {
        let metrics = Arc::new(FontMetricsTable::standard().unwrap());
        let mut doc = Document::new(metrics).unwrap();
        doc.add_font("courier", "Courier").unwrap();
        doc.add_image("pixel", vec![10, 20, 30], 1, 1, PixelFormat::Rgb8).unwrap();
        doc.add_page(None).unwrap();
        doc.set_fill_color("#336699").unwrap();
        doc.add_circle(100.0, 300.0, 20.0, true, true).unwrap();
        doc.add_text(
            "Hello (world)",
            30.0,
            &BoundingBox::new(10.0, 20.0, 550.0, 800.0),
            "cc",
        )
        .unwrap();
        doc.add_page(Some([0.0, 0.0, 200.0, 200.0])).unwrap();
        doc.paint_image(&Matrix::scale(50.0, 50.0), "pixel", None).unwrap();
        doc
    }

    #[test]
    fn offsets_round_trip() {
        let mut doc = sample();
        let out = doc.render();
        let section = inspect(&out).unwrap();

        let n = doc.objects().len();
        assert_eq!(section.xref.len(), n + 1);
        assert_eq!(section.trailer.size, n + 1);
        assert_eq!(section.trailer.root, doc.catalog().reference());
        assert_eq!(section.version, (1, 3));

        let numbers: Vec<usize> = section.xref.used_objects().map(|u| u.number).collect();
        assert_eq!(numbers, (1..=n).collect::<Vec<_>>());
        for (used, obj) in section.xref.used_objects().zip(doc.objects().iter()) {
            assert_eq!(Some(used.byte_offset), obj.offset());
        }
    }

    #[test]
    fn identities_have_no_gaps() {
        let mut doc = sample();
        // failed registrations don't take an object number
        assert!(doc.add_font("courier", "Courier").is_err());
        assert!(doc.add_image("big", vec![0; 2], 1, 1, PixelFormat::Rgb8).is_err());
        let out = doc.render();
        let text = String::from_utf8_lossy(&out);
        for i in 1..=doc.objects().len() {
            assert_eq!(text.matches(&format!("\n{} 0 obj\n", i)).count(), 1, "object {}", i);
        }
        assert!(inspect(&out).is_ok());
    }

    #[test]
    fn corrupted_offsets_are_found() {
        let mut doc = sample();
        let mut out = doc.render();
        let offset = doc.object(doc.catalog()).unwrap().offset().unwrap();
        // shift the catalog by one byte
        out.insert(offset, b' ');
        assert!(matches!(inspect(&out), Err(_)));
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(inspect(b"not a pdf"), Err(KilnError::Parse));
    }
}
