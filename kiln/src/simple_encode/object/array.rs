use crate::{
    pdf::{Array, Object},
    writer::Encoder,
};

use crate::simple_encode::SimpleEncoder;

fn present(array: &Array) -> impl Iterator<Item = &Object> {
    array.iter().filter(|o| !matches!(o, Object::Absent))
}

impl Encoder<Array> for SimpleEncoder {
    fn encoded_len(array: &Array) -> usize {
        // 1 Byte each for opening and closing bracket
        let mut size = 2;
        let mut count: usize = 0;

        // bytes for all contained objects
        for item in present(array) {
            size += Self::encoded_len(item);
            count += 1;
        }

        // 1 delimiter between 2 objects
        size += count.saturating_sub(1);

        size
    }

    fn write_to(array: &Array, writer: &mut dyn crate::writer::Writer) {
        writer.write(b"[");
        for (i, item) in present(array).enumerate() {
            if i != 0 {
                writer.write(b" ");
            }
            Self::write_to(item, writer);
        }
        writer.write(b"]");
    }
}
