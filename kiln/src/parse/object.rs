use nom::{branch, bytes, character, combinator, multi, sequence, Slice};
use nom_tracable::tracable_parser;

use super::{
    error::{KlParseError, KlParseErrorKind},
    KlParseResult, Span,
};
use crate::pdf::{Array, Dictionary, Name, Object, PdfString, Reference};

pub const TRUE_OBJECT: &str = "true";
pub const FALSE_OBJECT: &str = "false";
pub const NULL_OBJECT: &str = "null";

fn is_delimiter(chr: u8) -> bool {
    matches!(
        chr,
        b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
    )
}

pub(crate) fn is_regular(chr: u8) -> bool {
    !is_delimiter(chr) && !chr.is_ascii_whitespace()
}

fn error(input: Span, kind: KlParseErrorKind) -> nom::Err<KlParseError<Span>> {
    nom::Err::Error(KlParseError::new(input, kind))
}

/// Consume all whitespace. If input doesn't start with a whitespace, peek the
/// next char and require it to be a delimiter.
fn require_termination(input: Span) -> KlParseResult<()> {
    let (remainder, whitespace) = character::complete::multispace0(input)?;
    if whitespace.fragment().is_empty() && !remainder.fragment().is_empty() {
        bytes::complete::take_while_m_n(1, 1, is_delimiter)(remainder)?;
    }
    Ok((remainder, ()))
}

#[tracable_parser]
pub(crate) fn bool_object(input: Span) -> KlParseResult<Object> {
    let (remainder, obj) = branch::alt((
        combinator::value(Object::Bool(true), bytes::complete::tag(TRUE_OBJECT)),
        combinator::value(Object::Bool(false), bytes::complete::tag(FALSE_OBJECT)),
    ))(input)?;

    let (remainder, _) = require_termination(remainder)?;

    Ok((remainder, obj))
}

#[tracable_parser]
pub(crate) fn null_object(input: Span) -> KlParseResult<Object> {
    let (remainder, _) = bytes::complete::tag(NULL_OBJECT)(input)?;
    let (remainder, _) = require_termination(remainder)?;

    Ok((remainder, Object::Null))
}

#[tracable_parser]
pub(crate) fn reference_object(input: Span) -> KlParseResult<Object> {
    let (remainder, index) = character::complete::u64(input)?;
    let (remainder, _) = character::complete::multispace1(remainder)?;
    let (remainder, generation) = character::complete::u32(remainder)?;
    let (remainder, _) = character::complete::multispace1(remainder)?;
    let (remainder, _) = character::complete::char('R')(remainder)?;
    let (remainder, _) = require_termination(remainder)?;

    let index = usize::try_from(index).map_err(|_| error(input, KlParseErrorKind::InvalidNumber))?;

    Ok((remainder, Object::Reference(Reference { index, generation })))
}

#[tracable_parser]
pub(crate) fn number_object(input: Span) -> KlParseResult<Object> {
    let (remainder, number) = combinator::recognize(sequence::tuple((
        combinator::opt(character::complete::one_of("+-")),
        character::complete::digit0,
        combinator::opt(sequence::pair(
            character::complete::char('.'),
            character::complete::digit0,
        )),
    )))(input)?;
    let (remainder, _) = require_termination(remainder)?;

    let text = std::str::from_utf8(number.fragment())
        .map_err(|_| error(input, KlParseErrorKind::InvalidNumber))?;
    let obj = if text.contains('.') {
        text.parse::<f64>().ok().map(Object::Real)
    } else {
        text.parse::<i64>().ok().map(Object::Integer)
    }
    .ok_or_else(|| error(input, KlParseErrorKind::InvalidNumber))?;

    Ok((remainder, obj))
}

/// Name token with `#xx` escapes resolved.
#[tracable_parser]
pub(crate) fn name(input: Span) -> KlParseResult<Name> {
    let (remainder, _) = character::complete::char('/')(input)?;
    let (remainder, raw) = bytes::complete::take_while(is_regular)(remainder)?;
    let (remainder, _) = require_termination(remainder)?;

    let raw = *raw.fragment();
    let mut name = Vec::with_capacity(raw.len());
    let mut index = 0;
    while index < raw.len() {
        if raw[index] == b'#' {
            let mut c = [0u8; 1];
            raw.get(index + 1..index + 3)
                .and_then(|digits| hex::decode_to_slice(digits, &mut c).ok())
                .ok_or_else(|| error(input, KlParseErrorKind::InvalidName))?;
            name.push(c[0]);
            index += 3;
        } else {
            name.push(raw[index]);
            index += 1;
        }
    }

    Ok((remainder, Name::from(name)))
}

#[tracable_parser]
pub(crate) fn name_object(input: Span) -> KlParseResult<Object> {
    combinator::map(name, Object::from)(input)
}

/// Literal string with balanced parentheses and `\` escapes taken verbatim.
#[tracable_parser]
pub(crate) fn string_object(input: Span) -> KlParseResult<Object> {
    let (mut remainder, _) = character::complete::char('(')(input)?;
    let mut depth = 0usize;
    let mut content = Vec::new();
    loop {
        let fragment = *remainder.fragment();
        let (consumed, done) = match fragment {
            [b'\\', c, ..] => {
                content.push(*c);
                (2, false)
            }
            [b'(', ..] => {
                depth += 1;
                content.push(b'(');
                (1, false)
            }
            [b')', ..] if depth == 0 => (1, true),
            [b')', ..] => {
                depth -= 1;
                content.push(b')');
                (1, false)
            }
            [c, ..] => {
                content.push(*c);
                (1, false)
            }
            [] => return Err(error(remainder, KlParseErrorKind::Nom(nom::error::ErrorKind::Eof))),
        };
        remainder = remainder.slice(consumed..);
        if done {
            break;
        }
    }
    let (remainder, _) = character::complete::multispace0(remainder)?;

    Ok((remainder, Object::String(PdfString::from(content))))
}

#[tracable_parser]
pub(crate) fn array_object(input: Span) -> KlParseResult<Object> {
    let (remainder, items) = sequence::delimited(
        sequence::terminated(character::complete::char('['), character::complete::multispace0),
        multi::many0(object),
        sequence::terminated(character::complete::char(']'), character::complete::multispace0),
    )(input)?;

    Ok((remainder, Object::Array(Array::from(items))))
}

#[tracable_parser]
pub(crate) fn dictionary_entry(input: Span) -> KlParseResult<(Name, Object)> {
    let (remainder, name) = name(input)?;
    let (remainder, obj) = object(remainder)?;

    Ok((remainder, (name, obj)))
}

#[tracable_parser]
pub(crate) fn dictionary(input: Span) -> KlParseResult<Dictionary> {
    sequence::delimited(
        sequence::terminated(bytes::complete::tag(b"<<"), character::complete::multispace0),
        multi::fold_many0(dictionary_entry, Dictionary::default, |mut acc, (name, obj)| {
            acc.insert(name, obj);
            acc
        }),
        sequence::terminated(bytes::complete::tag(b">>"), character::complete::multispace0),
    )(input)
}

#[tracable_parser]
pub(crate) fn dictionary_object(input: Span) -> KlParseResult<Object> {
    combinator::map(dictionary, Object::from)(input)
}

#[tracable_parser]
pub(crate) fn object(input: Span) -> KlParseResult<Object> {
    branch::alt((
        dictionary_object,
        array_object,
        name_object,
        string_object,
        bool_object,
        null_object,
        reference_object,
        number_object,
    ))(input)
}
