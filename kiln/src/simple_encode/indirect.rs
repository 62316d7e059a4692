use crate::{
    pdf::IndirectObject,
    writer::{Encoder, Writer},
};

use super::SimpleEncoder;

const START_STREAM: &[u8] = b"stream\n";
const END_STREAM: &[u8] = b"endstream\n";
const END_OBJECT: &[u8] = b"endobj\n";

fn object_line(o: &IndirectObject) -> String {
    let r = o.reference();
    format!("{} {} obj\n", r.index, r.generation)
}

/// `n g obj`, the dictionary, the stream if it has any bytes and `endobj`.
///
/// The `Length` entry is not touched here, the document updates it before
/// writing.
impl Encoder<IndirectObject> for SimpleEncoder {
    fn encoded_len(o: &IndirectObject) -> usize {
        let stream_len = o.stream_len();
        let mut size = object_line(o).len() + Self::encoded_len(o.dictionary()) + 1;
        if stream_len > 0 {
            size += START_STREAM.len() + stream_len + END_STREAM.len();
        }
        size + END_OBJECT.len()
    }

    fn write_to(o: &IndirectObject, writer: &mut dyn Writer) {
        log::trace!("write {}", o);
        writer.write(object_line(o).as_bytes());
        Self::write_to(o.dictionary(), writer);
        writer.write(b"\n");
        if o.stream_len() > 0 {
            writer.write(START_STREAM);
            for chunk in o.stream() {
                writer.write(chunk);
            }
            writer.write(END_STREAM);
        }
        writer.write(END_OBJECT);
    }
}
