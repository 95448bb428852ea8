//! Booking entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Human-readable unique code, e.g. BK-7QX2MRNF
    #[sea_orm(unique)]
    pub order_code: String,

    pub guest_id: String,
    pub tenant_id: String,
    pub property_id: String,
    pub room_id: String,

    /// Stay is the half-open range [check_in, check_out)
    pub check_in: Date,
    pub check_out: Date,
    pub nights: i32,

    /// Amounts in minor units; immutable once past waiting_payment
    pub price_per_night_cents: i64,
    pub total_amount_cents: i64,

    /// Booking status: waiting_payment, waiting_confirmation, processing,
    /// completed, canceled, expired
    pub status: String,

    /// Payment method: manual_transfer, payment_gateway
    pub payment_method: String,

    pub created_at: DateTimeUtc,
    pub expires_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::room::Entity",
        from = "Column::RoomId",
        to = "super::room::Column::Id"
    )]
    Room,
    #[sea_orm(
        belongs_to = "super::property::Entity",
        from = "Column::PropertyId",
        to = "super::property::Column::Id"
    )]
    Property,
    #[sea_orm(
        belongs_to = "super::guest::Entity",
        from = "Column::GuestId",
        to = "super::guest::Column::Id"
    )]
    Guest,
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl Related<super::property::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Property.def()
    }
}

impl Related<super::guest::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Guest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
