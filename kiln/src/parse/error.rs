use nom::error::{ErrorKind, ParseError};

use crate::pdf::trailer::TrailerError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KlParseErrorKind {
    InvalidTrailer(TrailerError),
    StartxrefInvalid,
    BackwardSearchNotFound,
    XrefInvalid,
    InvalidName,
    InvalidNumber,
    Nom(ErrorKind),
}

impl From<TrailerError> for KlParseErrorKind {
    fn from(err: TrailerError) -> Self {
        KlParseErrorKind::InvalidTrailer(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KlParseError<I> {
    pub input: I,
    pub kind: KlParseErrorKind,
    pub from: Option<Box<Self>>,
}

impl<I> KlParseError<I> {
    pub fn new(input: I, kind: KlParseErrorKind) -> Self {
        Self {
            input,
            kind,
            from: None,
        }
    }
}

impl<I> ParseError<I> for KlParseError<I> {
    fn from_error_kind(input: I, kind: ErrorKind) -> Self {
        Self {
            input,
            kind: KlParseErrorKind::Nom(kind),
            from: None,
        }
    }

    fn append(input: I, kind: ErrorKind, other: Self) -> Self {
        Self {
            input,
            kind: KlParseErrorKind::Nom(kind),
            from: Some(other.into()),
        }
    }
}
