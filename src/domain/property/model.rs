//! Property domain entity

/// A property listing owned by a tenant. Read-only to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub id: String,
    /// Owning tenant, denormalized onto each booking at creation.
    pub tenant_id: String,
    pub name: String,
    /// Property-wide guest cap, used when a room has no capacity of its
    /// own.
    pub max_guests: u32,
}
