//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Locate an entity by identity in an ordered collection.
pub fn find_entity<'a, E: Entity>(items: &'a [E], id: &E::Id) -> Option<(usize, &'a E)> {
    items.iter().enumerate().find(|(_, item)| item.id() == id)
}
