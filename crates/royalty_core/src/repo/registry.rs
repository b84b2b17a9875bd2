//! Append-only, insertion-ordered record registry.
//!
//! Lookups are linear scans. Catalogs are expected to stay small enough that
//! a secondary index would cost more than it saves.

/// Record that can be stored in a [`Registry`].
pub trait Record: Clone {
    type Id: Copy + Eq;

    fn id(&self) -> Self::Id;
}

/// Ordered collection of every record of one kind.
#[derive(Debug, Clone)]
pub struct Registry<T: Record> {
    records: Vec<T>,
}

impl<T: Record> Default for Registry<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: Record> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one record and returns a reference to the stored copy.
    pub fn insert(&mut self, record: T) -> &T {
        let index = self.records.len();
        self.records.push(record);
        &self.records[index]
    }

    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn get_mut(&mut self, id: T::Id) -> Option<&mut T> {
        self.records.iter_mut().find(|record| record.id() == id)
    }

    pub fn contains(&self, id: T::Id) -> bool {
        self.get(id).is_some()
    }

    /// Returns all records in insertion order.
    pub fn as_slice(&self) -> &[T] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.records.iter()
    }

    /// Clones every record matching `predicate`, preserving insertion order.
    pub fn filtered<P>(&self, mut predicate: P) -> Vec<T>
    where
        P: FnMut(&T) -> bool,
    {
        self.records
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
