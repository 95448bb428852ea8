//! Property repository interface

use async_trait::async_trait;

use super::model::Property;
use crate::domain::error::DomainResult;

#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Find a property by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Property>>;
}
