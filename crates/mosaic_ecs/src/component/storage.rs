/// The storage strategy of a component type, fixed at registration.
///
/// # Table storage
///
/// Table components live columnarly: every entity of an archetype occupies
/// one contiguous row across the archetype's table columns.
///
/// |  table    | Component A | Component B | Component C |
/// |-----------|-------------|-------------|-------------|
/// | Entity X  | /* data */  | /* data */  | /* data */  |
/// | Entity Y  | /* data */  | /* data */  | /* data */  |
///
/// Iteration is cache-dense, but adding or removing such a component moves
/// the entity's whole row to another table.
///
/// # Sparse storage
///
/// Sparse components live in one sparse set per component type, keyed by
/// entity index:
///
/// |  Component A        | Component B         |
/// |---------------------|---------------------|
/// | entity index → data | entity index → data |
///
/// Attaching and detaching never touches the entity's table row, at the
/// price of an extra indirection when iterating.
///
/// Prefer `Table` unless the component is attached and removed frequently
/// or held by few entities.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentStorage {
    #[default]
    Table = 0,
    Sparse = 1,
}

impl ComponentStorage {
    /// Returns `true` for table storage.
    #[inline]
    pub const fn is_table(self) -> bool {
        matches!(self, ComponentStorage::Table)
    }

    /// Returns `true` for sparse storage.
    #[inline]
    pub const fn is_sparse(self) -> bool {
        matches!(self, ComponentStorage::Sparse)
    }
}
