//! SeaORM implementation of GuestRepository

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::domain::guest::{Guest, GuestRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::guest;

pub struct SeaOrmGuestRepository {
    db: DatabaseConnection,
}

impl SeaOrmGuestRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GuestRepository for SeaOrmGuestRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Guest>> {
        let model = guest::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        Ok(model.map(|m| Guest {
            id: m.id,
            full_name: m.full_name,
            email: m.email,
        }))
    }
}
