//! SeaORM implementation of PropertyRepository

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::domain::property::{Property, PropertyRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::property;

pub struct SeaOrmPropertyRepository {
    db: DatabaseConnection,
}

impl SeaOrmPropertyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: property::Model) -> Property {
    Property {
        id: m.id,
        tenant_id: m.tenant_id,
        name: m.name,
        max_guests: m.max_guests.max(0) as u32,
    }
}

#[async_trait]
impl PropertyRepository for SeaOrmPropertyRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Property>> {
        let model = property::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        Ok(model.map(model_to_domain))
    }
}
