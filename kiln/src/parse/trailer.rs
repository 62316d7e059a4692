use nom::{bytes, character};
use nom_tracable::tracable_parser;

use super::{
    error::{KlParseError, KlParseErrorKind},
    object::dictionary,
    KlParseResult, Span,
};
use crate::pdf::{trailer::TRAILER, Trailer};

#[tracable_parser]
pub(crate) fn trailer(input: Span) -> KlParseResult<Trailer> {
    let (remainder, _) = character::complete::multispace0(input)?;
    let (remainder, _) = bytes::complete::tag(TRAILER)(remainder)?;
    let (remainder, _) = character::complete::multispace0(remainder)?;
    let (remainder, dict) = dictionary(remainder)?;

    let trailer = Trailer::try_from(dict)
        .map_err(|err| nom::Err::Failure(KlParseError::new(input, KlParseErrorKind::from(err))))?;

    Ok((remainder, trailer))
}
