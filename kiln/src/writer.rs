/// Byte sink used by all encoders.
pub trait Writer {
    fn write(&mut self, buf: &[u8]);

    /// Number of bytes written so far.
    fn position(&self) -> usize;
}

impl Writer for Vec<u8> {
    fn write(&mut self, buf: &[u8]) {
        self.extend(buf);
    }

    fn position(&self) -> usize {
        self.len()
    }
}

/// Encodes values of type `T`.
///
/// `encoded_len` must return exactly the number of bytes `write_to` writes,
/// buffers are allocated with this size.
pub trait Encoder<T: ?Sized> {
    fn encoded_len(o: &T) -> usize;

    fn write_to(o: &T, writer: &mut dyn Writer);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_position_follows_writes() {
        let mut out: Vec<u8> = Vec::new();
        assert_eq!(out.position(), 0);
        out.write(b"%PDF");
        out.write(b"-1.3\n");
        assert_eq!(out.position(), 9);
        assert_eq!(&out[..], b"%PDF-1.3\n");
    }
}
