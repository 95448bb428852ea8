//! Guest domain entity

/// A guest identity, resolved before a booking is created. Account
/// management lives with the user-management collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guest {
    pub id: String,
    pub full_name: String,
    pub email: String,
}
