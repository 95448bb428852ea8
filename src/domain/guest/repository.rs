//! Guest repository interface

use async_trait::async_trait;

use super::model::Guest;
use crate::domain::error::DomainResult;

#[async_trait]
pub trait GuestRepository: Send + Sync {
    /// Find a guest by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Guest>>;
}
