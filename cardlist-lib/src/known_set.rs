use std::collections::HashSet;

use cardlist_core::Identifier;

/// Confirmed identifiers in confirmation order, without duplicates.
///
/// Entries are only ever appended. Iteration yields them in the order they
/// were first inserted, which is also the order they are persisted in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownSet {
    order: Vec<Identifier>,
    members: HashSet<Identifier>,
}

impl KnownSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `id` if it is not already present. Returns true if it was new.
    pub fn insert(&mut self, id: Identifier) -> bool {
        if self.members.contains(&id) {
            return false;
        }
        self.members.insert(id.clone());
        self.order.push(id);
        true
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        self.members.contains(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Identifier> {
        self.order.iter()
    }

    pub fn as_slice(&self) -> &[Identifier] {
        &self.order
    }
}

impl Extend<Identifier> for KnownSet {
    fn extend<I: IntoIterator<Item = Identifier>>(&mut self, iter: I) {
        for id in iter {
            self.insert(id);
        }
    }
}

impl FromIterator<Identifier> for KnownSet {
    fn from_iter<I: IntoIterator<Item = Identifier>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a> IntoIterator for &'a KnownSet {
    type Item = &'a Identifier;
    type IntoIter = std::slice::Iter<'a, Identifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
