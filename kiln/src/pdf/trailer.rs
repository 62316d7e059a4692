use super::{Dictionary, Name, Object, Reference};

pub const TRAILER: &[u8] = b"trailer";
pub const K_SIZE: &[u8] = b"Size";
pub const K_ROOT: &[u8] = b"Root";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrailerError {
    InvalidSize,
    MissingSize,
    InvalidRoot,
    MissingRoot,
}

impl std::fmt::Display for TrailerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrailerError::InvalidSize => write!(f, "Trailer `Size` is not a positive integer"),
            TrailerError::MissingSize => write!(f, "Trailer has no `Size`"),
            TrailerError::InvalidRoot => write!(f, "Trailer `Root` is not a reference"),
            TrailerError::MissingRoot => write!(f, "Trailer has no `Root`"),
        }
    }
}

impl std::error::Error for TrailerError {}

#[derive(Debug, Clone, PartialEq)]
pub struct Trailer {
    /// Number of xref entries, including the free list head.
    pub size: usize,

    /// Reference to the catalog.
    pub root: Reference,
}

impl From<Trailer> for Dictionary {
    fn from(trailer: Trailer) -> Self {
        let mut dict = Dictionary::with_capacity_and_hasher(2, Default::default());
        dict.insert(Name::from(K_SIZE), trailer.size.into());
        dict.insert(Name::from(K_ROOT), Object::Reference(trailer.root));
        dict
    }
}

impl TryFrom<Dictionary> for Trailer {
    type Error = TrailerError;

    fn try_from(dict: Dictionary) -> Result<Self, Self::Error> {
        Ok(Trailer {
            size: dict
                .get(K_SIZE)
                .ok_or(TrailerError::MissingSize)?
                .integer()
                .ok_or(TrailerError::InvalidSize)?
                .try_into()
                .map_err(|_| TrailerError::InvalidSize)?,

            root: dict
                .get(K_ROOT)
                .ok_or(TrailerError::MissingRoot)?
                .reference()
                .copied()
                .ok_or(TrailerError::InvalidRoot)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dictionary_round_trip() {
        let trailer = Trailer {
            size: 5,
            root: Reference {
                index: 3,
                generation: 0,
            },
        };
        let dict = Dictionary::from(trailer.clone());
        assert_eq!(dict.keys().next().map(|k| &k[..]), Some(K_SIZE));
        assert_eq!(Trailer::try_from(dict), Ok(trailer));
    }

    #[test]
    fn missing_root() {
        let mut dict = Dictionary::default();
        dict.insert(Name::from(K_SIZE), Object::Integer(1));
        assert_eq!(Trailer::try_from(dict), Err(TrailerError::MissingRoot));
    }
}
