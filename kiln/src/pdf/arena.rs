use fnv::FnvHashMap;

use super::{Dictionary, IndirectObject, ObjectId};
use crate::error::KilnError;

/// Owns all indirect objects of a document in creation order.
#[derive(Debug, Clone, Default)]
pub struct ObjectArena {
    objects: Vec<IndirectObject>,
    names: FnvHashMap<String, ObjectId>,
}

impl ObjectArena {
    pub fn add(&mut self, name: &str, dictionary: Dictionary) -> Result<ObjectId, KilnError> {
        if self.names.contains_key(name) {
            return Err(KilnError::DuplicateName(name.to_owned()));
        }
        let id = ObjectId(self.objects.len());
        self.objects
            .push(IndirectObject::new(name.to_owned(), id, dictionary));
        self.names.insert(name.to_owned(), id);
        log::trace!("New object `{}` as {}", name, id);
        Ok(id)
    }

    pub fn lookup(&self, name: &str) -> Option<ObjectId> {
        self.names.get(name).copied()
    }

    pub fn get(&self, id: ObjectId) -> Option<&IndirectObject> {
        self.objects.get(id.index())
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut IndirectObject> {
        self.objects.get_mut(id.index())
    }

    pub(crate) fn require(&self, id: ObjectId) -> Result<&IndirectObject, KilnError> {
        self.get(id).ok_or_else(|| KilnError::NotFound(id.to_string()))
    }

    pub(crate) fn require_mut(&mut self, id: ObjectId) -> Result<&mut IndirectObject, KilnError> {
        self.objects
            .get_mut(id.index())
            .ok_or_else(|| KilnError::NotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndirectObject> {
        self.objects.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut IndirectObject> {
        self.objects.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identities_follow_creation_order() {
        let mut arena = ObjectArena::default();
        let a = arena.add("a", Dictionary::default()).unwrap();
        let b = arena.add("b", Dictionary::default()).unwrap();
        assert_eq!(a.number(), 1);
        assert_eq!(b.number(), 2);
        assert_eq!(arena.lookup("b"), Some(b));
        assert_eq!(arena.get(b).unwrap().label(), "b");
        assert_eq!(arena.get(b).unwrap().reference().generation, 0);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut arena = ObjectArena::default();
        arena.add("a", Dictionary::default()).unwrap();
        assert_eq!(
            arena.add("a", Dictionary::default()),
            Err(KilnError::DuplicateName("a".to_owned()))
        );
        assert_eq!(arena.len(), 1);
    }
}
