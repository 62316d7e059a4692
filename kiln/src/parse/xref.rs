use nom::{branch, bytes, character, combinator};
use nom_tracable::tracable_parser;

use crate::pdf::{FreeObject, UsedObject, Xref, XrefEntry};

use super::{
    backward_search,
    error::{KlParseError, KlParseErrorKind},
    KlParseResult, Span,
};

const EOF_MARKER: &[u8] = b"%%EOF";
const STARTXREF: &[u8] = b"startxref";

#[tracable_parser]
pub(crate) fn startxref_tail(input: Span) -> KlParseResult<usize> {
    let (remainder, (trailing, _)) =
        backward_search(STARTXREF.len() + 2048, bytes::complete::tag_no_case(STARTXREF))(input)?;
    let (trailing, _) = character::complete::multispace0(trailing)?;
    let (_, xref_pos) = character::complete::u64(trailing)?;
    let xref_pos: usize = xref_pos
        .try_into()
        .map_err(|_| nom::Err::Error(KlParseError::new(input, KlParseErrorKind::StartxrefInvalid)))?;

    Ok((remainder, xref_pos))
}

#[tracable_parser]
fn xref_entry(input: Span) -> KlParseResult<(usize, usize, bool)> {
    let (remainder, offset) = character::complete::u64(input)?;
    let (remainder, _) = character::complete::space1(remainder)?;
    let (remainder, gen) = character::complete::u32(remainder)?;
    let (remainder, _) = character::complete::space1(remainder)?;
    let (remainder, free) = branch::alt((
        combinator::value(false, bytes::complete::tag(b"n")),
        combinator::value(true, bytes::complete::tag(b"f")),
    ))(remainder)?;
    let (remainder, _) = character::complete::multispace0(remainder)?;

    let offset = usize::try_from(offset)
        .map_err(|_| nom::Err::Error(KlParseError::new(input, KlParseErrorKind::XrefInvalid)))?;
    Ok((remainder, (offset, gen as usize, free)))
}

#[tracable_parser]
fn xref_subsection(input: Span) -> KlParseResult<Vec<XrefEntry>> {
    let (remainder, first) = character::complete::u32(input)?;
    let (remainder, _) = character::complete::space1(remainder)?;
    let (remainder, count) = character::complete::u32(remainder)?;
    let (remainder, _) = character::complete::multispace0(remainder)?;

    // every entry has at least 19 bytes, don't trust counts the input can't hold
    let capacity = (count as usize).min(remainder.fragment().len() / 19);
    let mut entries = Vec::<XrefEntry>::with_capacity(capacity);

    let mut remainder = remainder;
    for i in 0..count {
        let (inner_rmndr, (offset, generation, free)) = xref_entry(remainder)?;
        let number = (first + i) as usize;
        entries.push(if free {
            FreeObject {
                number,
                generation,
                next_free: offset,
            }
            .into()
        } else {
            UsedObject {
                number,
                byte_offset: offset,
                generation,
            }
            .into()
        });
        remainder = inner_rmndr;
    }

    Ok((remainder, entries))
}

#[tracable_parser]
pub(crate) fn xref_table(input: Span) -> KlParseResult<Xref> {
    // xref keyword
    let (remainder, _) = character::complete::multispace0(input)?;
    let (remainder, _) = bytes::complete::tag(b"xref")(remainder)?;
    let (remainder, _) = character::complete::multispace0(remainder)?;
    let (remainder, subsections) = nom::multi::many1(xref_subsection)(remainder)?;

    Ok((remainder, Xref::from(subsections.concat())))
}

#[tracable_parser]
pub(crate) fn eof_marker_tail(input: Span) -> KlParseResult<()> {
    // at most a line break may follow the EOF marker
    let (remainder, _trailing) = backward_search(EOF_MARKER.len() + 2, eof_marker)(input)?;

    Ok((remainder, ()))
}

fn eof_marker(input: Span) -> KlParseResult<()> {
    let (remainder, _) = bytes::complete::tag_no_case(EOF_MARKER)(input)?;
    let (remainder, _) = character::complete::multispace0(remainder)?;
    let (remainder, _) = combinator::eof(remainder)?;
    Ok((remainder, ()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::span;

    #[test]
    fn test_startxref_tail() {
        let input = &b"         startxref\n2132"[..];
        let res = startxref_tail(span(input));
        assert!(matches!(res, Ok((_, 2132))));

        let input = &b"         startxref\n555\nasdfsadfasdfsadfasdfsadfsadf"[..];
        let res = startxref_tail(span(input));
        assert!(matches!(res, Ok((_, 555))));
    }

    #[test]
    fn test_invalid_startxref_tail() {
        // to big
        let input = &b"         startxref\n9999999999999999999999999999999"[..];
        let res = startxref_tail(span(input));
        assert!(matches!(res, Err(nom::Err::Error(_))));
    }

    #[test]
    fn test_xref_table() {
        let input = &b"xref\n0 3\n0000000000 65535 f\n0000000009 00000 n\n0000000074 00000 n\ntrailer"[..];
        let (rest, xref) = xref_table(span(input)).unwrap();
        assert_eq!(*rest.fragment(), &b"trailer"[..]);
        assert_eq!(xref.len(), 3);
        assert_eq!(
            xref.entries().first(),
            Some(&XrefEntry::Free(FreeObject::HEAD))
        );
        let offsets: Vec<(usize, usize)> = xref.used_objects().map(|u| (u.number, u.byte_offset)).collect();
        assert_eq!(offsets, vec![(1, 9), (2, 74)]);
    }

    #[test]
    fn test_eof_marker() {
        assert!(eof_marker_tail(span(b"startxref\n9\n%%EOF")).is_ok());
        assert!(eof_marker_tail(span(b"startxref\n9\n%%EOF\n")).is_ok());
        assert!(eof_marker_tail(span(b"startxref\n9\n%%EOF trailing")).is_err());
    }
}
