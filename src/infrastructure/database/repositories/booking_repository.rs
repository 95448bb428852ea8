//! SeaORM implementation of BookingRepository

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use log::debug;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::domain::booking::{Booking, BookingRepository, BookingStatus, PaymentMethod};
use crate::domain::{DomainError, DomainResult, SlotConflict};
use crate::infrastructure::database::entities::booking;

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: booking::Model) -> DomainResult<Booking> {
    let status = BookingStatus::from_str(&m.status)
        .ok_or_else(|| DomainError::Storage(format!("unknown booking status '{}'", m.status)))?;
    let payment_method = PaymentMethod::from_str(&m.payment_method).ok_or_else(|| {
        DomainError::Storage(format!("unknown payment method '{}'", m.payment_method))
    })?;

    Ok(Booking {
        id: m.id,
        order_code: m.order_code,
        guest_id: m.guest_id,
        tenant_id: m.tenant_id,
        property_id: m.property_id,
        room_id: m.room_id,
        check_in: m.check_in,
        check_out: m.check_out,
        nights: m.nights as i64,
        price_per_night_cents: m.price_per_night_cents,
        total_amount_cents: m.total_amount_cents,
        status,
        payment_method,
        created_at: m.created_at,
        expires_at: m.expires_at,
    })
}

fn domain_to_active(b: &Booking) -> booking::ActiveModel {
    booking::ActiveModel {
        id: Set(b.id.clone()),
        order_code: Set(b.order_code.clone()),
        guest_id: Set(b.guest_id.clone()),
        tenant_id: Set(b.tenant_id.clone()),
        property_id: Set(b.property_id.clone()),
        room_id: Set(b.room_id.clone()),
        check_in: Set(b.check_in),
        check_out: Set(b.check_out),
        nights: Set(b.nights as i32),
        price_per_night_cents: Set(b.price_per_night_cents),
        total_amount_cents: Set(b.total_amount_cents),
        status: Set(b.status.as_str().to_string()),
        payment_method: Set(b.payment_method.as_str().to_string()),
        created_at: Set(b.created_at),
        expires_at: Set(b.expires_at),
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn create(&self, b: Booking) -> DomainResult<Booking> {
        debug!("Creating booking {} for room {}", b.order_code, b.room_id);

        // The overlap re-check and the insert share one transaction, so a
        // concurrent committer that won the race is visible here and this
        // insert backs off instead of double-booking the room.
        let txn = self.db.begin().await.map_err(db_err)?;

        let conflicting = booking::Entity::find()
            .filter(booking::Column::RoomId.eq(b.room_id.clone()))
            .filter(booking::Column::Status.is_in(BookingStatus::slot_holding_strs()))
            .filter(booking::Column::CheckIn.lt(b.check_out))
            .filter(booking::Column::CheckOut.gt(b.check_in))
            .all(&txn)
            .await
            .map_err(db_err)?;

        if !conflicting.is_empty() {
            txn.rollback().await.map_err(db_err)?;
            let conflicts = conflicting
                .into_iter()
                .map(|m| SlotConflict {
                    order_code: m.order_code,
                    check_in: m.check_in,
                    check_out: m.check_out,
                })
                .collect();
            return Err(DomainError::RoomUnavailable {
                blocked_dates: vec![],
                conflicts,
            });
        }

        domain_to_active(&b).insert(&txn).await.map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;
        Ok(b)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find_by_order_code(&self, order_code: &str) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find()
            .filter(booking::Column::OrderCode.eq(order_code))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .order_by_desc(booking::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn find_overlapping(
        &self,
        room_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::RoomId.eq(room_id))
            .filter(booking::Column::Status.is_in(BookingStatus::slot_holding_strs()))
            .filter(booking::Column::CheckIn.lt(check_out))
            .filter(booking::Column::CheckOut.gt(check_in))
            .order_by_asc(booking::Column::CheckIn)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn transition(
        &self,
        id: &str,
        from: BookingStatus,
        to: BookingStatus,
    ) -> DomainResult<bool> {
        debug!("Transitioning booking {}: {} -> {}", id, from, to);

        let result = booking::Entity::update_many()
            .col_expr(booking::Column::Status, Expr::value(to.as_str()))
            .filter(booking::Column::Id.eq(id))
            .filter(booking::Column::Status.eq(from.as_str()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn expire_if_due(&self, id: &str, now: DateTime<Utc>) -> DomainResult<bool> {
        let result = booking::Entity::update_many()
            .col_expr(
                booking::Column::Status,
                Expr::value(BookingStatus::Expired.as_str()),
            )
            .filter(booking::Column::Id.eq(id))
            .filter(booking::Column::Status.eq(BookingStatus::WaitingPayment.as_str()))
            .filter(booking::Column::ExpiresAt.lt(now))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn find_due_for_expiry(&self, now: DateTime<Utc>) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::Status.eq(BookingStatus::WaitingPayment.as_str()))
            .filter(booking::Column::ExpiresAt.lt(now))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn set_payment_method(&self, id: &str, method: PaymentMethod) -> DomainResult<()> {
        let result = booking::Entity::update_many()
            .col_expr(
                booking::Column::PaymentMethod,
                Expr::value(method.as_str()),
            )
            .filter(booking::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: id.to_string(),
            });
        }
        Ok(())
    }
}
