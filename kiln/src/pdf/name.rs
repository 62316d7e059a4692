use std::{borrow::Borrow, fmt, ops::Deref};

/// Raw bytes of a name object, without the leading `/`.
///
/// Keys of a [`super::Dictionary`] are names. `Borrow<[u8]>` lets the
/// `K_*` byte constants be used for lookups directly.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Name(Vec<u8>);

impl Name {
    pub fn from_str(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl Borrow<[u8]> for Name {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Name {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Name {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl Deref for Name {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", String::from_utf8_lossy(&self.0))
    }
}

/// Text without escaping, for logs and error messages.
impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::{dictionary, Object};

    #[test]
    fn byte_constants_find_keys() {
        const K_SIZE: &[u8] = b"Size";
        let dict = dictionary([(K_SIZE, Object::Integer(3))]);
        assert_eq!(dict.get(K_SIZE), Some(&Object::Integer(3)));
        assert_eq!(dict.get(&Name::from_str("Size")[..]), Some(&Object::Integer(3)));
    }

    #[test]
    fn formatting() {
        let name = Name::from(b"Times-Roman".to_vec());
        assert_eq!(name.to_string(), "Times-Roman");
        assert_eq!(format!("{:?}", name), "/Times-Roman");
    }
}
