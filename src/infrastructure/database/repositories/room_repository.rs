//! SeaORM implementation of RoomRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::domain::room::{OverrideKind, PriceOverride, Room, RoomRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{price_override, room, room_blocked_date};

pub struct SeaOrmRoomRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoomRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn room_to_domain(m: room::Model) -> Room {
    Room {
        id: m.id,
        property_id: m.property_id,
        name: m.name,
        base_price_cents: m.base_price_cents,
        capacity: m.capacity.map(|c| c as u32),
    }
}

fn override_to_domain(m: price_override::Model) -> DomainResult<PriceOverride> {
    let kind = OverrideKind::from_str(&m.kind)
        .ok_or_else(|| DomainError::Storage(format!("unknown override kind '{}'", m.kind)))?;
    Ok(PriceOverride {
        id: m.id,
        room_id: m.room_id,
        kind,
        value: m.value,
        starts_on: m.starts_on,
        ends_on: m.ends_on,
    })
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

// ── RoomRepository impl ─────────────────────────────────────────

#[async_trait]
impl RoomRepository for SeaOrmRoomRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Room>> {
        let model = room::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(room_to_domain))
    }

    async fn blocked_dates_in(
        &self,
        room_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> DomainResult<Vec<NaiveDate>> {
        let models = room_blocked_date::Entity::find()
            .filter(room_blocked_date::Column::RoomId.eq(room_id))
            .filter(room_blocked_date::Column::Date.gte(check_in))
            .filter(room_blocked_date::Column::Date.lt(check_out))
            .order_by_asc(room_blocked_date::Column::Date)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(|m| m.date).collect())
    }

    async fn overrides_overlapping(
        &self,
        room_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> DomainResult<Vec<PriceOverride>> {
        // window [starts_on, ends_on] is inclusive, the stay is half-open
        let models = price_override::Entity::find()
            .filter(price_override::Column::RoomId.eq(room_id))
            .filter(price_override::Column::StartsOn.lt(check_out))
            .filter(price_override::Column::EndsOn.gte(check_in))
            .order_by_asc(price_override::Column::StartsOn)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(override_to_domain).collect()
    }
}
