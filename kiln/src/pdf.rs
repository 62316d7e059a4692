use std::{fmt::Display, ops::Deref};

use fnv::FnvBuildHasher;
use indexmap::IndexMap;

pub use self::{
    arena::ObjectArena,
    array::Array,
    indirect::{IndirectObject, ObjectId, Reference, Resource},
    name::Name,
    string::PdfString,
    trailer::Trailer,
    xref::{FreeObject, UsedObject, Xref, XrefEntry},
};

mod arena;
mod array;
pub mod document;
mod indirect;
mod name;
mod string;
pub mod trailer;
pub mod xref;

/// A value inside a dictionary or array.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    String(PdfString),
    Real(f64),
    Integer(i64),
    Bool(bool),
    Name(Name),
    Array(Array),
    Dictionary(Dictionary),
    Reference(Reference),
    Null,
    /// Marks a key that is not written at all.
    Absent,
}

impl Object {
    pub fn name(&self) -> Option<&Name> {
        if let Object::Name(n) = self {
            Some(n)
        } else {
            None
        }
    }

    pub fn integer(&self) -> Option<i64> {
        if let Object::Integer(i) = self {
            Some(*i)
        } else {
            None
        }
    }

    pub fn reference(&self) -> Option<&Reference> {
        if let Object::Reference(r) = self {
            Some(r)
        } else {
            None
        }
    }

    pub fn array(&self) -> Option<&Array> {
        if let Object::Array(a) = self {
            Some(a)
        } else {
            None
        }
    }

    pub fn array_mut(&mut self) -> Option<&mut Array> {
        if let Object::Array(a) = self {
            Some(a)
        } else {
            None
        }
    }

    pub fn dictionary(&self) -> Option<&Dictionary> {
        if let Object::Dictionary(d) = self {
            Some(d)
        } else {
            None
        }
    }

    pub fn dictionary_mut(&mut self) -> Option<&mut Dictionary> {
        if let Object::Dictionary(d) = self {
            Some(d)
        } else {
            None
        }
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Object::String(obj) => obj.fmt(f),
            Object::Real(obj) => obj.fmt(f),
            Object::Integer(obj) => obj.fmt(f),
            Object::Bool(obj) => obj.fmt(f),
            Object::Name(obj) => obj.fmt(f),
            Object::Array(obj) => obj.fmt(f),
            Object::Dictionary(obj) => {
                write!(f, "Dictionary {{")?;
                for (key, value) in obj.iter() {
                    write!(f, "\n  {}: {}", key, value)?;
                }
                write!(f, "}}")
            }
            Object::Reference(obj) => obj.fmt(f),
            Object::Null => write!(f, "NULL"),
            Object::Absent => write!(f, "ABSENT"),
        }
    }
}

impl From<bool> for Object {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Object {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for Object {
    fn from(v: i32) -> Self {
        Self::Integer(v.into())
    }
}

impl From<usize> for Object {
    fn from(v: usize) -> Self {
        Self::Integer(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Object {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<PdfString> for Object {
    fn from(v: PdfString) -> Self {
        Self::String(v)
    }
}

impl From<Name> for Object {
    fn from(n: Name) -> Self {
        Self::Name(n)
    }
}

impl From<Reference> for Object {
    fn from(r: Reference) -> Self {
        Self::Reference(r)
    }
}

impl From<Vec<Object>> for Object {
    fn from(a: Vec<Object>) -> Self {
        Self::Array(a.into())
    }
}

impl From<Array> for Object {
    fn from(a: Array) -> Self {
        Self::Array(a)
    }
}

impl From<Dictionary> for Object {
    fn from(d: Dictionary) -> Self {
        Self::Dictionary(d)
    }
}

impl From<[f64; 4]> for Object {
    fn from(rect: [f64; 4]) -> Self {
        Self::Array(rect.iter().copied().map(Object::Real).collect::<Vec<_>>().into())
    }
}

/// A chunk of raw stream data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bytes(Vec<u8>);

impl From<Vec<u8>> for Bytes {
    fn from(v: Vec<u8>) -> Self {
        Bytes(v)
    }
}

impl Deref for Bytes {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for Bytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let limited_length = self.len().min(15);
        write!(f, "{}", &String::from_utf8_lossy(&self.0[..limited_length]))
    }
}

/// Dictionaries keep their insertion order, it is the order they are written in.
pub type Dictionary = IndexMap<Name, Object, FnvBuildHasher>;

/// Build a dictionary from `(key, value)` pairs.
pub fn dictionary<const N: usize>(entries: [(&[u8], Object); N]) -> Dictionary {
    entries
        .into_iter()
        .map(|(key, value)| (Name::from(key), value))
        .collect()
}
