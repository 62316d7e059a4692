use crate::{
    pdf::{Dictionary, Name, Object},
    writer::Encoder,
};

use crate::simple_encode::SimpleEncoder;

fn present(dict: &Dictionary) -> impl Iterator<Item = (&Name, &Object)> {
    dict.iter().filter(|(_, o)| !matches!(o, Object::Absent))
}

/// Dictionaries are written one entry per line: `<<\n/Key value\n>>`.
impl Encoder<Dictionary> for SimpleEncoder {
    fn encoded_len(o: &Dictionary) -> usize {
        // `<<\n` and `>>`
        let mut size = 5;
        // key, space, value, newline
        size += present(o)
            .map(|(n, o)| Self::encoded_len(n) + 1 + Self::encoded_len(o) + 1)
            .sum::<usize>();

        size
    }

    fn write_to(o: &Dictionary, writer: &mut dyn crate::writer::Writer) {
        writer.write(b"<<\n");
        for (key, value) in present(o) {
            Self::write_to(key, writer);
            writer.write(b" ");
            Self::write_to(value, writer);
            writer.write(b"\n");
        }
        writer.write(b">>");
    }
}

#[cfg(test)]
mod tests {
    use crate::pdf::{dictionary, Object};

    use super::*;

    #[test]
    fn empty_dict() {
        let d = Dictionary::default();
        let expected_len = SimpleEncoder::encoded_len(&d);
        let expected_output = b"<<\n>>";
        assert_eq!(expected_len, expected_output.len());

        let mut out: Vec<u8> = Vec::new();
        SimpleEncoder::write_to(&d, &mut out);
        assert_eq!(expected_output, &out[..]);
        assert_eq!(out.len(), expected_len);
    }

    #[test]
    fn filled_dict() {
        let mut d = Dictionary::default();
        d.insert(b"one".to_vec().into(), Object::Integer(1));
        d.insert(b"two".to_vec().into(), Object::Integer(2));
        d.insert(b"three".to_vec().into(), Object::Integer(3));

        let expected_len = SimpleEncoder::encoded_len(&d);
        let expected_output = b"<<\n/one 1\n/two 2\n/three 3\n>>";
        assert_eq!(expected_len, expected_output.len());

        let mut out: Vec<u8> = Vec::new();
        SimpleEncoder::write_to(&d, &mut out);
        assert_eq!(
            expected_output,
            &out[..],
            "expected: {} got: {}",
            String::from_utf8_lossy(expected_output),
            String::from_utf8_lossy(&out[..])
        );
        assert_eq!(out.len(), expected_len);
    }

    #[test]
    fn absent_and_nested() {
        let mut d = Dictionary::default();
        d.insert(Name::from_str("Gone"), Object::Absent);
        d.insert(Name::from_str("Font"), dictionary([]).into());
        d.insert(Name::from_str("Null"), Object::Null);

        let mut out: Vec<u8> = Vec::new();
        SimpleEncoder::write_to(&d, &mut out);
        assert_eq!(&out[..], b"<<\n/Font <<\n>>\n/Null null\n>>");
        assert_eq!(out.len(), SimpleEncoder::encoded_len(&d));
    }
}
