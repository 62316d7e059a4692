use crate::{
    pdf::PdfString,
    simple_encode::SimpleEncoder,
    writer::{Encoder, Writer},
};

/// Marks every parenthesis that has no partner. Balanced pairs may stay
/// unescaped inside a literal string.
fn unbalanced(str: &[u8]) -> Vec<bool> {
    let mut escape = vec![false; str.len()];
    let mut open = Vec::new();
    for (index, char) in str.iter().enumerate() {
        match char {
            b'(' => open.push(index),
            b')' => {
                if open.pop().is_none() {
                    escape[index] = true;
                }
            }
            _ => {}
        }
    }
    for index in open {
        escape[index] = true;
    }
    escape
}

impl Encoder<PdfString> for SimpleEncoder {
    fn encoded_len(str: &PdfString) -> usize {
        let escaped = unbalanced(str).iter().filter(|e| **e).count();
        let backslashes = str.iter().filter(|c| **c == b'\\').count();

        // we need two additional bytes for the opening and closing paranthesis
        str.len() + escaped + backslashes + 2
    }

    fn write_to(str: &PdfString, writer: &mut dyn Writer) {
        writer.write(b"(");

        let escape = unbalanced(str);
        let mut last_written_index = 0;
        for (index, char) in str.iter().enumerate() {
            if escape[index] || *char == b'\\' {
                writer.write(&str[last_written_index..index]);
                writer.write(br"\");
                last_written_index = index;
            }
        }
        writer.write(&str[last_written_index..]);
        writer.write(b")");
    }
}

#[cfg(test)]
mod tests {
    use crate::{pdf::PdfString, simple_encode::SimpleEncoder, writer::Encoder};

    fn encode(s: &PdfString) -> Vec<u8> {
        let mut out: Vec<u8> = Vec::new();
        SimpleEncoder::write_to(s, &mut out);
        assert_eq!(SimpleEncoder::encoded_len(s), out.len());
        out
    }

    #[test]
    fn test_simple() {
        let simple = PdfString::from(b"abcdefg".to_vec());
        assert_eq!(encode(&simple), b"(abcdefg)".to_vec());
    }

    #[test]
    fn test_end_with_closing_paranthesis() {
        let simple = PdfString::from(b"(abcdefg)".to_vec());
        assert_eq!(encode(&simple), b"((abcdefg))".to_vec());
    }

    #[test]
    fn test_end_with_unmatched_closing_paranthesis() {
        let simple = PdfString::from(b"abcdefg)".to_vec());
        assert_eq!(encode(&simple), br"(abcdefg\))".to_vec());
    }

    #[test]
    fn test_many_unmatched_closing_paranthesis() {
        let simple = PdfString::from(b")))))))))".to_vec());
        assert_eq!(encode(&simple), br"(\)\)\)\)\)\)\)\)\))".to_vec());
    }

    #[test]
    fn test_many_unmatched_opening_paranthesis() {
        let simple = PdfString::from(b"(((((((((".to_vec());
        assert_eq!(encode(&simple), br"(\(\(\(\(\(\(\(\(\()".to_vec());
    }

    #[test]
    fn test_many_matched_paranthesis() {
        let simple = PdfString::from(b"((((((()))))))".to_vec());
        assert_eq!(encode(&simple), br"(((((((())))))))".to_vec());
    }

    #[test]
    fn test_many_unmatched_paranthesis() {
        let simple = PdfString::from(b")))))(((((".to_vec());
        assert_eq!(encode(&simple), br"(\)\)\)\)\)\(\(\(\(\()".to_vec());
    }

    #[test]
    fn test_nested_with_extra_opening() {
        let simple = PdfString::from(b"((a)".to_vec());
        assert_eq!(encode(&simple), br"(\((a))".to_vec());
    }

    #[test]
    fn test_backslash() {
        let simple = PdfString::from(br"a\b".to_vec());
        assert_eq!(encode(&simple), br"(a\\b)".to_vec());
    }
}
