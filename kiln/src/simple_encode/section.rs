use crate::{
    pdf::{
        trailer::TRAILER, Dictionary, FreeObject, ObjectArena, Reference, Trailer, UsedObject, Xref,
        XrefEntry,
    },
    simple_encode::SimpleEncoder,
    writer::{Encoder, Writer},
};

pub const XREF: &[u8] = b"xref\n";
pub const START_XREF: &[u8] = b"startxref\n";
pub const EOF_MARKER: &[u8] = b"%%EOF";

/// Length of one classic xref line, including the line feed.
const XREF_LINE_LEN: usize = 19;

fn header(version: (u8, u8)) -> String {
    format!("%PDF-{}.{}\n", version.0, version.1)
}

fn subsection_header(o: &Xref) -> String {
    format!("0 {}\n", o.len())
}

/// Everything needed to write a complete file.
pub struct Section<'a> {
    pub version: (u8, u8),
    pub objects: &'a ObjectArena,
    pub root: Reference,
}

impl<'a> Section<'a> {
    fn trailer(&self) -> Trailer {
        Trailer {
            size: self.objects.len() + 1,
            root: self.root,
        }
    }
}

/// Writes header, objects, xref table and trailer. Returns the xref table
/// with the offset of every object.
pub fn write_document(sec: &Section, writer: &mut dyn Writer) -> (Xref, usize) {
    log::trace!("write document with {} objects", sec.objects.len());
    writer.write(header(sec.version).as_bytes());

    let mut xref = Xref::default();
    xref.push(FreeObject::HEAD);

    for obj in sec.objects.iter() {
        xref.push(UsedObject {
            number: obj.reference().index,
            byte_offset: writer.position(),
            generation: obj.reference().generation as usize,
        });
        SimpleEncoder::write_to(obj, writer);
    }

    let start_xref = writer.position();
    SimpleEncoder::write_to(&xref, writer);
    SimpleEncoder::write_to(&sec.trailer(), writer);

    writer.write(START_XREF);
    writer.write(start_xref.to_string().as_bytes());
    writer.write(b"\n");
    writer.write(EOF_MARKER);

    (xref, start_xref)
}

impl<'a> Encoder<Section<'a>> for SimpleEncoder {
    fn encoded_len(sec: &Section<'a>) -> usize {
        let start_xref = header(sec.version).len()
            + sec
                .objects
                .iter()
                .map(|obj| Self::encoded_len(obj))
                .sum::<usize>();
        let entries = sec.objects.len() + 1;
        let xref_len = XREF.len() + format!("0 {}\n", entries).len() + entries * XREF_LINE_LEN;

        start_xref
            + xref_len
            + Self::encoded_len(&sec.trailer())
            + START_XREF.len()
            + start_xref.to_string().len()
            + 1
            + EOF_MARKER.len()
    }

    fn write_to(sec: &Section<'a>, writer: &mut dyn Writer) {
        write_document(sec, writer);
    }
}

impl Encoder<Xref> for SimpleEncoder {
    fn encoded_len(o: &Xref) -> usize {
        XREF.len() + subsection_header(o).len() + o.len() * XREF_LINE_LEN
    }

    fn write_to(o: &Xref, writer: &mut dyn Writer) {
        log::trace!("write XRef");

        writer.write(XREF);
        writer.write(subsection_header(o).as_bytes());
        for entry in o.entries() {
            let line = match entry {
                XrefEntry::Free(free) => format!("{:010} {:05} f\n", free.next_free, free.generation),
                XrefEntry::Used(used) => format!("{:010} {:05} n\n", used.byte_offset, used.generation),
            };
            writer.write(line.as_bytes());
        }
    }
}

impl Encoder<Trailer> for SimpleEncoder {
    fn encoded_len(trailer: &Trailer) -> usize {
        let trailer_dict: Dictionary = trailer.clone().into();
        TRAILER.len() + 1 + Self::encoded_len(&trailer_dict) + 1
    }

    fn write_to(trailer: &Trailer, writer: &mut dyn Writer) {
        log::trace!("write Trailer");

        let trailer_dict: Dictionary = trailer.clone().into();
        writer.write(TRAILER);
        writer.write(b"\n");
        Self::write_to(&trailer_dict, writer);
        writer.write(b"\n");
    }
}
