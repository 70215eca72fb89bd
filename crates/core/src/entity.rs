//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Items, alerts and sensors are all entities: two records with the same id
/// are the same record, even if every other field differs.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Whether this entity carries the given identifier.
    fn has_id(&self, id: &Self::Id) -> bool {
        self.id() == id
    }
}
