use std::fmt::Display;

use fnv::FnvHashMap;

use super::{Bytes, Dictionary, Name};

/// Handle of an indirect object inside a document.
///
/// Handles are minted in creation order, the first object has number 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub(crate) usize);

impl ObjectId {
    /// Object number as written into the file.
    pub fn number(&self) -> usize {
        self.0 + 1
    }

    pub(crate) fn index(&self) -> usize {
        self.0
    }

    pub fn reference(&self) -> Reference {
        Reference {
            index: self.number(),
            generation: 0,
        }
    }
}

impl Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.number())
    }
}

/// `index generation R`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reference {
    pub index: usize,
    pub generation: u32,
}

impl Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} R", self.index, self.generation)
    }
}

/// Data kept next to an object that is never serialized.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    Font { handle: Name, base_font: String },
    Image { handle: Name },
}

impl Resource {
    pub fn handle(&self) -> &Name {
        match self {
            Resource::Font { handle, .. } | Resource::Image { handle } => handle,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndirectObject {
    pub(crate) label: String,
    pub(crate) reference: Reference,
    pub(crate) dictionary: Dictionary,
    pub(crate) stream: Vec<Bytes>,
    pub(crate) offset: Option<usize>,
    pub(crate) links: FnvHashMap<&'static str, ObjectId>,
    pub(crate) resource: Option<Resource>,
}

impl IndirectObject {
    pub(crate) fn new(label: String, id: ObjectId, dictionary: Dictionary) -> Self {
        Self {
            label,
            reference: id.reference(),
            dictionary,
            stream: Vec::new(),
            offset: None,
            links: FnvHashMap::default(),
            resource: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn reference(&self) -> Reference {
        self.reference
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn dictionary_mut(&mut self) -> &mut Dictionary {
        &mut self.dictionary
    }

    pub fn stream(&self) -> &[Bytes] {
        &self.stream
    }

    /// Total number of stream bytes over all chunks.
    pub fn stream_len(&self) -> usize {
        self.stream.iter().map(|chunk| chunk.len()).sum()
    }

    /// Byte offset of the `obj` line, known after rendering.
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    pub fn link(&self, name: &str) -> Option<ObjectId> {
        self.links.get(name).copied()
    }

    pub fn resource(&self) -> Option<&Resource> {
        self.resource.as_ref()
    }

    /// Sets `Length` to the total chunk size. Objects without stream bytes
    /// keep their dictionary as is.
    pub(crate) fn update_length(&mut self) {
        let len = self.stream_len();
        if len > 0 {
            self.dictionary
                .insert(Name::from(super::document::K_LENGTH), len.into());
        }
    }
}

impl Display for IndirectObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Indirect {} `{}` {{ {} entries, {} stream bytes }}",
            self.reference,
            self.label,
            self.dictionary.len(),
            self.stream_len()
        )
    }
}
