use nom::{combinator, multi, number::complete::be_i16, sequence, IResult};

use super::error::KlParseError;

/// One glyph in thousandths of an em.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricRecord {
    pub code: i16,
    pub width: i16,
    pub minx: i16,
    pub miny: i16,
    pub maxx: i16,
    pub maxy: i16,
}

/// Size of a record in bytes.
pub const RECORD_LEN: usize = 12;

pub(crate) fn record(input: &[u8]) -> IResult<&[u8], MetricRecord, KlParseError<&[u8]>> {
    combinator::map(
        sequence::tuple((be_i16, be_i16, be_i16, be_i16, be_i16, be_i16)),
        |(code, width, minx, miny, maxx, maxy)| MetricRecord {
            code,
            width,
            minx,
            miny,
            maxx,
            maxy,
        },
    )(input)
}

/// All records of a blob. Trailing bytes that don't form a full record are an
/// error.
pub fn records(input: &[u8]) -> IResult<&[u8], Vec<MetricRecord>, KlParseError<&[u8]>> {
    combinator::all_consuming(multi::many0(record))(input)
}
