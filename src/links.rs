use crate::body_store::{BodyId, BodyStore};
use crate::error::{StoreError, StoreKind};

/// A declared force relationship between two specific bodies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub origin: BodyId,
    pub affected: BodyId,
    /// Scales the force law result; the sign flips its direction.
    pub strength: f32,
    /// Also apply the reaction to `origin`.
    pub bothways: bool,
}

impl Link {
    pub fn new(origin: BodyId, affected: BodyId, strength: f32, bothways: bool) -> Self {
        Link { origin, affected, strength, bothways }
    }
}

/// Fixed-capacity list of links, processed in insertion order.
#[derive(Debug, Clone)]
pub struct LinkStore {
    links: Vec<Link>,
    max_len: usize,
}

impl LinkStore {
    pub fn with_capacity(max_len: usize) -> Self {
        Self {
            links: Vec::with_capacity(max_len),
            max_len,
        }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_len
    }

    /// Stores `link`, which must reference live bodies of `bodies`.
    ///
    /// # Panics
    /// If either end of the link is not a body of `bodies`.
    pub fn append(&mut self, bodies: &BodyStore, link: Link) -> Result<(), StoreError> {
        assert!(
            bodies.contains(link.origin) && bodies.contains(link.affected),
            "link {:?} -> {:?} references a body outside the store (len {})",
            link.origin,
            link.affected,
            bodies.len()
        );
        if self.links.len() >= self.max_len {
            log::warn!(
                "Link store maximum reached ({} links). Dropping link {:?} -> {:?}.",
                self.max_len,
                link.origin,
                link.affected
            );
            return Err(StoreError::CapacityExceeded {
                store: StoreKind::Links,
                capacity: self.max_len,
            });
        }
        self.links.push(link);
        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Link> {
        self.links.iter()
    }

    pub fn as_slice(&self) -> &[Link] {
        &self.links
    }
}

impl<'a> IntoIterator for &'a LinkStore {
    type Item = &'a Link;
    type IntoIter = std::slice::Iter<'a, Link>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.iter()
    }
}
