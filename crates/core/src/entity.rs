//! Minimal entity abstraction.

/// Something with a stable identity that persists across state changes.
pub trait Entity {
    /// The entity's typed identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
