use crate::{parse::object::is_regular, pdf::Name, writer::Encoder};

use crate::simple_encode::SimpleEncoder;

/// Bytes that can be written without `#xx` escaping.
fn is_plain(c: u8) -> bool {
    is_regular(c) && c != b'#' && (b'!'..=b'~').contains(&c)
}

impl Encoder<Name> for SimpleEncoder {
    fn encoded_len(n: &Name) -> usize {
        n.iter().map(|c| if is_plain(*c) { 1 } else { 3 }).sum::<usize>() + 1
    }

    fn write_to(n: &Name, writer: &mut dyn crate::writer::Writer) {
        let mut last_write = 0;
        writer.write(b"/");
        for (index, &c) in n.iter().enumerate() {
            if !is_plain(c) {
                writer.write(&n[last_write..index]);
                last_write = index + 1;
                writer.write(b"#");
                writer.write(hex::encode([c]).as_bytes())
            }
        }
        writer.write(&n[last_write..]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(name: &[u8], expected: &[u8]) {
        let name = Name::from(name.to_vec());
        let encoded_len = SimpleEncoder::encoded_len(&name);
        let mut out: Vec<u8> = Vec::new();
        SimpleEncoder::write_to(&name, &mut out);
        assert_eq!(
            out,
            expected,
            "Expected {}, got {}",
            String::from_utf8_lossy(expected),
            String::from_utf8_lossy(&out)
        );
        assert_eq!(encoded_len, out.len());
    }

    #[test]
    fn delimiter_in_the_middle() {
        check(b"Hello World!", b"/Hello#20World!");
    }

    #[test]
    fn delimiter_start() {
        check(b" HelloWorld!", b"/#20HelloWorld!");
    }

    #[test]
    fn delimiter_end() {
        check(b"HelloWorld! ", b"/HelloWorld!#20");
    }

    #[test]
    fn only_delimiters() {
        check(b"   ", b"/#20#20#20");
    }

    #[test]
    fn no_delimiters() {
        check(b"HelloWorld!", b"/HelloWorld!");
    }

    #[test]
    fn number_sign_and_non_ascii() {
        check(b"A#B", b"/A#23B");
        check(b"Times-Roman", b"/Times-Roman");
        check(&[b'a', 0xe9], b"/a#e9");
        check(b"(x)", b"/#28x#29");
    }
}
