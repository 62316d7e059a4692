//! The document: an arena of indirect objects plus the page, resource and
//! drawing state needed to fill it.

use std::sync::Arc;

use crate::{
    color::ColorCache,
    error::KilnError,
    font::FontMetricsTable,
    pdf::{Bytes, Dictionary, IndirectObject, ObjectArena, ObjectId},
    simple_encode::{write_document, Section, SimpleEncoder},
    writer::Encoder,
};

pub use resources::PixelFormat;

pub mod catalog;
pub mod pages;
pub mod resources;

/// Dictionary type names
pub(crate) mod dict_types {
    pub const PAGES: &[u8] = b"Pages";
    pub const PAGE: &[u8] = b"Page";
    pub const CATALOG: &[u8] = b"Catalog";
    pub const FONT: &[u8] = b"Font";
    pub const XOBJECT: &[u8] = b"XObject";
}

pub(crate) const K_TYPE: &[u8] = b"Type";
pub(crate) const K_SUBTYPE: &[u8] = b"Subtype";
pub(crate) const K_PARENT: &[u8] = b"Parent";
pub(crate) const K_KIDS: &[u8] = b"Kids";
pub(crate) const K_COUNT: &[u8] = b"Count";
pub(crate) const K_PAGES: &[u8] = b"Pages";
pub(crate) const K_LENGTH: &[u8] = b"Length";
pub(crate) const K_RESOURCES: &[u8] = b"Resources";
pub(crate) const K_CONTENTS: &[u8] = b"Contents";
pub(crate) const K_MEDIA_BOX: &[u8] = b"MediaBox";

/// Fallback page size, A4 in points.
pub const DEFAULT_PAGE_SIZE: [f64; 4] = [0.0, 0.0, 595.28, 841.89];

/// Document wide settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentOptions {
    /// Media box for pages added without an explicit size.
    pub default_size: Option<[f64; 4]>,
    /// Version written into the header line.
    pub version: (u8, u8),
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            default_size: None,
            version: (1, 3),
        }
    }
}

/// Data appended to a stream.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamData<'a> {
    Raw(Vec<u8>),
    /// Already UTF-8, copied without transcoding.
    Text(&'a str),
    /// UTF-16 code units, transcoded to UTF-8.
    Utf16(&'a [u16]),
}

impl<'a> StreamData<'a> {
    fn into_bytes(self) -> Result<Vec<u8>, KilnError> {
        match self {
            StreamData::Raw(bytes) => Ok(bytes),
            StreamData::Text(text) => Ok(text.as_bytes().to_vec()),
            StreamData::Utf16(units) => Ok(aw_utf8::encode(units)?),
        }
    }
}

impl<'a> From<Vec<u8>> for StreamData<'a> {
    fn from(v: Vec<u8>) -> Self {
        StreamData::Raw(v)
    }
}

impl<'a> From<&'a [u8]> for StreamData<'a> {
    fn from(v: &'a [u8]) -> Self {
        StreamData::Raw(v.to_vec())
    }
}

impl<'a> From<&'a str> for StreamData<'a> {
    fn from(v: &'a str) -> Self {
        StreamData::Text(v)
    }
}

impl<'a> From<&'a String> for StreamData<'a> {
    fn from(v: &'a String) -> Self {
        StreamData::Text(v)
    }
}

impl<'a> From<&'a [u16]> for StreamData<'a> {
    fn from(v: &'a [u16]) -> Self {
        StreamData::Utf16(v)
    }
}

/// Objects every document starts with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Structure {
    pub pages: ObjectId,
    pub resources: ObjectId,
    pub catalog: ObjectId,
}

/// Page that receives drawing operators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CurrentPage {
    pub page: ObjectId,
    pub content: ObjectId,
}

#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) options: DocumentOptions,
    pub(crate) metrics: Arc<FontMetricsTable>,
    pub(crate) arena: ObjectArena,
    pub(crate) structure: Structure,
    pub(crate) page_count: usize,
    pub(crate) font_count: usize,
    pub(crate) image_count: usize,
    pub(crate) current: Option<CurrentPage>,
    /// Logical name of the font used for text.
    pub(crate) font: String,
    pub(crate) colors: ColorCache,
}

impl Document {
    pub fn new(metrics: Arc<FontMetricsTable>) -> Result<Self, KilnError> {
        Self::with_options(metrics, DocumentOptions::default())
    }

    /// Creates the page tree, the shared resources and the catalog, and
    /// registers `helvetica` as the default font.
    pub fn with_options(metrics: Arc<FontMetricsTable>, options: DocumentOptions) -> Result<Self, KilnError> {
        let mut arena = ObjectArena::default();
        let structure = catalog::init_structure(&mut arena)?;
        let mut doc = Self {
            options,
            metrics,
            arena,
            structure,
            page_count: 0,
            font_count: 0,
            image_count: 0,
            current: None,
            font: resources::DEFAULT_FONT.to_owned(),
            colors: ColorCache::default(),
        };
        doc.add_font(resources::DEFAULT_FONT, resources::DEFAULT_BASE_FONT)?;
        Ok(doc)
    }

    pub fn options(&self) -> &DocumentOptions {
        &self.options
    }

    pub fn metrics(&self) -> &FontMetricsTable {
        &self.metrics
    }

    /// Adds an object with a document unique name.
    pub fn add_object(
        &mut self,
        name: &str,
        dictionary: Dictionary,
        stream: Option<Vec<u8>>,
    ) -> Result<ObjectId, KilnError> {
        let id = self.arena.add(name, dictionary)?;
        if let Some(data) = stream {
            self.arena.require_mut(id)?.stream.push(Bytes::from(data));
        }
        Ok(id)
    }

    /// Appends a chunk to the stream of an object. `Length` is computed when
    /// rendering.
    pub fn append_stream<'a>(&mut self, id: ObjectId, data: impl Into<StreamData<'a>>) -> Result<(), KilnError> {
        self.arena.require(id)?;
        let bytes = data.into().into_bytes()?;
        self.arena.require_mut(id)?.stream.push(Bytes::from(bytes));
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<ObjectId> {
        self.arena.lookup(name)
    }

    pub fn object(&self, id: ObjectId) -> Option<&IndirectObject> {
        self.arena.get(id)
    }

    pub fn objects(&self) -> &ObjectArena {
        &self.arena
    }

    pub fn catalog(&self) -> ObjectId {
        self.structure.catalog
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn color_cache(&self) -> &ColorCache {
        &self.colors
    }

    /// Writes the complete file.
    ///
    /// Offsets and stream lengths are computed from scratch on every call,
    /// so rendering again after further changes is fine.
    pub fn render(&mut self) -> Vec<u8> {
        self.update_open_action();
        for obj in self.arena.iter_mut() {
            obj.update_length();
        }

        let section = Section {
            version: self.options.version,
            objects: &self.arena,
            root: self.structure.catalog.reference(),
        };
        let mut out = Vec::with_capacity(SimpleEncoder::encoded_len(&section));
        let (xref, start_xref) = write_document(&section, &mut out);
        log::debug!(
            "rendered {} objects, {} bytes, xref at {}",
            self.arena.len(),
            out.len(),
            start_xref
        );

        for used in xref.used_objects() {
            if let Some(obj) = self.arena.get_mut(ObjectId(used.number - 1)) {
                obj.offset = Some(used.byte_offset);
            }
        }
        out
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::pdf::{Name, Object};

    pub(crate) fn document() -> Document {
        Document::new(Arc::new(FontMetricsTable::standard().unwrap())).unwrap()
    }

    #[test]
    fn initial_objects() {
        let doc = document();
        let labels: Vec<&str> = doc.objects().iter().map(IndirectObject::label).collect();
        assert_eq!(labels, vec!["Pages", "Resources", "Catalog", "font_helvetica"]);
        for (i, obj) in doc.objects().iter().enumerate() {
            assert_eq!(obj.reference().index, i + 1);
            assert_eq!(obj.offset(), None);
        }
    }

    #[test]
    fn add_object_and_stream() {
        let mut doc = document();
        let id = doc.add_object("blob", Dictionary::default(), Some(b"ab".to_vec())).unwrap();
        assert_eq!(id.number(), 5);
        assert_eq!(doc.lookup("blob"), Some(id));
        assert_eq!(doc.lookup("nothing"), None);

        doc.append_stream(id, "c\u{e9}").unwrap();
        let units: Vec<u16> = "\u{1F600}".encode_utf16().collect();
        doc.append_stream(id, &units[..]).unwrap();
        assert_eq!(doc.object(id).unwrap().stream_len(), 2 + 3 + 4);

        let lone: Vec<u16> = vec![0xd83d];
        assert_eq!(
            doc.append_stream(id, &lone[..]),
            Err(KilnError::Encoding(aw_utf8::EncodeError::IncompleteSurrogatePair { index: 0 }))
        );
        assert_eq!(doc.object(id).unwrap().stream().len(), 3);

        assert_eq!(
            doc.add_object("blob", Dictionary::default(), None),
            Err(KilnError::DuplicateName("blob".to_owned()))
        );
        assert!(matches!(
            doc.append_stream(ObjectId(99), "x"),
            Err(KilnError::NotFound(_))
        ));
    }

    #[test]
    fn text_and_utf16_streams_agree() {
        let mut doc = document();
        let text = "Grüße € 𝄞";
        let a = doc.add_object("a", Dictionary::default(), None).unwrap();
        let b = doc.add_object("b", Dictionary::default(), None).unwrap();
        doc.append_stream(a, text).unwrap();
        let units: Vec<u16> = text.encode_utf16().collect();
        doc.append_stream(b, &units[..]).unwrap();
        assert_eq!(doc.object(a).unwrap().stream(), doc.object(b).unwrap().stream());
        assert_eq!(&doc.object(b).unwrap().stream()[0][..], text.as_bytes());
    }

    #[test]
    fn render_minimal_document() {
        let mut doc = document();
        let out = doc.render();
        let text = String::from_utf8(out).unwrap();
        let expected = "%PDF-1.3\n\
1 0 obj\n<<\n/Type /Pages\n/Kids []\n/Count 0\n>>\nendobj\n\
2 0 obj\n<<\n/ProcSet [/PDF /Text /ImageB /ImageC /ImageI]\n/XObject <<\n>>\n/Font <<\n/F1 4 0 R\n>>\n>>\nendobj\n\
3 0 obj\n<<\n/Type /Catalog\n/Pages 1 0 R\n/PageLayout /OneColumn\n>>\nendobj\n\
4 0 obj\n<<\n/Type /Font\n/Subtype /Type1\n/BaseFont /Helvetica\n>>\nendobj\n";
        assert!(text.starts_with(expected), "{}", text);
        let xref_at = expected.len();
        assert_eq!(
            &text[xref_at..],
            format!(
                "xref\n0 5\n0000000000 65535 f\n0000000009 00000 n\n{:010} 00000 n\n{:010} 00000 n\n{:010} 00000 n\n\
trailer\n<<\n/Size 5\n/Root 3 0 R\n>>\nstartxref\n{}\n%%EOF",
                doc.object(ObjectId(1)).unwrap().offset().unwrap(),
                doc.object(ObjectId(2)).unwrap().offset().unwrap(),
                doc.object(ObjectId(3)).unwrap().offset().unwrap(),
                xref_at
            )
        );
        assert!(doc
            .object(doc.catalog())
            .unwrap()
            .dictionary()
            .get(&b"OpenAction"[..])
            .is_none());
    }

    #[test]
    fn stream_length_is_patched() {
        let mut doc = document();
        doc.add_page(None).unwrap();
        let content = doc.lookup("contents_1").unwrap();
        doc.append_stream(content, "abc").unwrap();
        doc.append_stream(content, b"de".to_vec()).unwrap();
        let out = doc.render();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("<<\n/Length 5\n>>\nstream\nabcde"), "{}", text);
        assert_eq!(
            doc.object(content).unwrap().dictionary().get(&b"Length"[..]),
            Some(&Object::Integer(5))
        );
    }

    #[test]
    fn open_action_points_at_first_page() {
        let mut doc = document();
        let page = doc.add_page(None).unwrap();
        doc.render();
        let action = doc
            .object(doc.catalog())
            .unwrap()
            .dictionary()
            .get(&b"OpenAction"[..])
            .cloned();
        assert_eq!(
            action,
            Some(Object::from(vec![
                Object::Reference(page.reference()),
                Object::Name(Name::from_str("FitH")),
                Object::Null,
            ]))
        );
    }

    #[test]
    fn render_is_repeatable() {
        let mut doc = document();
        doc.add_page(None).unwrap();
        doc.add_circle(10.0, 10.0, 5.0, true, false).unwrap();
        let first = doc.render();
        assert_eq!(first, doc.render());
        doc.add_circle(20.0, 10.0, 5.0, true, false).unwrap();
        let third = doc.render();
        assert!(third.len() > first.len());
    }
}
