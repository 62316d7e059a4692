use std::fmt;

use crate::parse::error::KlParseError;

#[derive(Debug, Clone, PartialEq)]
pub enum KilnError {
    /// Logical name collision in the object registry.
    DuplicateName(String),
    NotFound(String),
    FontNotFound(String),
    /// Drawing or text call before any page was added.
    NoCurrentPage,
    InvalidStreamData(String),
    InvalidMatrix(String),
    InvalidColor(String),
    Encoding(aw_utf8::EncodeError),
    InvalidFontData(String),
    Parse,
    InvalidXref(String),
    /// Xref entry that doesn't point at the start of its object.
    OffsetMismatch { number: usize, offset: usize },
}

impl fmt::Display for KilnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KilnError::DuplicateName(name) => write!(f, "duplicate object name {}", name),
            KilnError::NotFound(name) => write!(f, "cannot find {}", name),
            KilnError::FontNotFound(name) => write!(f, "font {} not found", name),
            KilnError::NoCurrentPage => write!(f, "no current page, add a page first"),
            KilnError::InvalidStreamData(msg) => write!(f, "invalid stream data: {}", msg),
            KilnError::InvalidMatrix(msg) => write!(f, "invalid matrix: {}", msg),
            KilnError::InvalidColor(color) => write!(f, "invalid color {:?}, expected #RRGGBB", color),
            KilnError::Encoding(err) => write!(f, "UTF-8 encode: {}", err),
            KilnError::InvalidFontData(msg) => write!(f, "invalid font metrics: {}", msg),
            KilnError::Parse => write!(f, "could not parse document"),
            KilnError::InvalidXref(msg) => write!(f, "invalid cross-reference section: {}", msg),
            KilnError::OffsetMismatch { number, offset } => {
                write!(f, "object {} is not located at byte offset {}", number, offset)
            }
        }
    }
}

impl std::error::Error for KilnError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            KilnError::Encoding(err) => Some(err),
            _ => None,
        }
    }
}

impl<I> From<nom::Err<KlParseError<I>>> for KilnError {
    fn from(err: nom::Err<KlParseError<I>>) -> Self {
        match err {
            nom::Err::Failure(KlParseError { kind, .. }) | nom::Err::Error(KlParseError { kind, .. }) => {
                log::debug!("parser failed: {:?}", kind);
            }
            nom::Err::Incomplete(needed) => log::debug!("parser needs more input: {:?}", needed),
        }
        KilnError::Parse
    }
}

impl From<aw_utf8::EncodeError> for KilnError {
    fn from(err: aw_utf8::EncodeError) -> Self {
        KilnError::Encoding(err)
    }
}
