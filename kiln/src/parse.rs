//! nom parsers for the parts of a rendered file that are read back: the
//! cross-reference section and trailer, and the binary font metric records.

use std::ops::{RangeFrom, RangeTo};

use nom::{bytes, character, IResult, InputLength, Parser, Slice};
use nom_locate::LocatedSpan;
use nom_tracable::{tracable_parser, TracableInfo};

use crate::pdf::{Trailer, Xref};

use self::error::{KlParseError, KlParseErrorKind};

pub mod error;
pub mod metrics;
pub mod object;
pub mod trailer;
pub mod xref;

pub type Span<'a> = LocatedSpan<&'a [u8], TracableInfo>;

pub type KlParseResult<'a, O> = IResult<Span<'a>, O, KlParseError<Span<'a>>>;

/// Wraps raw bytes into a span, tracing enabled in both directions.
pub fn span(input: &[u8]) -> Span {
    let info = TracableInfo::new().forward(true).backward(true);
    LocatedSpan::new_extra(input, info)
}

/// Searches the last `limit` bytes of the input for the first position (from
/// the end) where `parser` succeeds.
///
/// Returns the input in front of the match and the parser result.
pub fn backward_search<I, O, P>(
    limit: usize,
    mut parser: P,
) -> impl FnMut(I) -> IResult<I, (I, O), KlParseError<I>>
where
    I: Clone + InputLength + Slice<RangeFrom<usize>> + Slice<RangeTo<usize>>,
    P: Parser<I, O, KlParseError<I>>,
{
    move |input: I| {
        let len = input.input_len();
        for start in (len.saturating_sub(limit)..=len).rev() {
            if let Ok((after, out)) = parser.parse(input.slice(start..)) {
                return Ok((input.slice(..start), (after, out)));
            }
        }
        Err(nom::Err::Error(KlParseError::new(
            input,
            KlParseErrorKind::BackwardSearchNotFound,
        )))
    }
}

#[tracable_parser]
pub(crate) fn version(input: Span) -> KlParseResult<(u8, u8)> {
    let (remainder, _) = bytes::complete::tag_no_case("%PDF-")(input)?;
    let (remainder, major) = character::complete::u8(remainder)?;
    let (remainder, _) = character::complete::char('.')(remainder)?;
    let (remainder, minor) = character::complete::u8(remainder)?;
    let (remainder, _) = character::complete::multispace0(remainder)?;

    Ok((remainder, (major, minor)))
}

/// Header version, cross-reference table and trailer of a complete file.
#[derive(Debug, Clone, PartialEq)]
pub struct XrefSection {
    pub version: (u8, u8),
    /// Byte offset of the `xref` keyword.
    pub start_xref: usize,
    pub xref: Xref,
    pub trailer: Trailer,
}

#[tracable_parser]
pub fn xref_section(input: Span) -> KlParseResult<XrefSection> {
    let (_, version) = version(input)?;
    let (before_eof, _) = xref::eof_marker_tail(input)?;
    let (_, start_xref) = xref::startxref_tail(before_eof)?;

    if start_xref >= input.input_len() {
        return Err(nom::Err::Error(KlParseError::new(
            input,
            KlParseErrorKind::StartxrefInvalid,
        )));
    }

    let (remainder, xref) = xref::xref_table(input.slice(start_xref..))?;
    let (remainder, trailer) = trailer::trailer(remainder)?;

    Ok((
        remainder,
        XrefSection {
            version,
            start_xref,
            xref,
            trailer,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version() {
        let (rest, v) = version(span(b"%PDF-1.3\n1 0 obj")).unwrap();
        assert_eq!(v, (1, 3));
        assert_eq!(*rest.fragment(), &b"1 0 obj"[..]);
    }

    #[test]
    fn test_backward_search() {
        let input = span(b"abc xyz abc 123");
        let (before, (after, _)) =
            backward_search(20, bytes::complete::tag::<_, _, KlParseError<Span>>("abc"))(input).unwrap();
        assert_eq!(*before.fragment(), &b"abc xyz "[..]);
        assert_eq!(*after.fragment(), &b" 123"[..]);

        let res = backward_search(3, bytes::complete::tag::<_, _, KlParseError<Span>>("abc"))(input);
        assert!(matches!(
            res,
            Err(nom::Err::Error(KlParseError {
                kind: KlParseErrorKind::BackwardSearchNotFound,
                ..
            }))
        ));
    }

    #[test]
    fn test_xref_section() {
        let file = b"%PDF-1.3\n1 0 obj\n<<\n>>\nendobj\nxref\n0 2\n0000000000 65535 f\n0000000009 00000 n\ntrailer\n<<\n/Size 2\n/Root 1 0 R\n>>\nstartxref\n30\n%%EOF";
        let (_, section) = xref_section(span(file)).unwrap();
        assert_eq!(section.version, (1, 3));
        assert_eq!(section.start_xref, 30);
        assert_eq!(section.xref.len(), 2);
        assert_eq!(section.trailer.size, 2);
        assert_eq!(section.trailer.root.index, 1);
        let used: Vec<_> = section.xref.used_objects().map(|u| u.byte_offset).collect();
        assert_eq!(used, vec![9]);
    }
}
