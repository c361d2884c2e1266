use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, Order, OrderStatus};
use crate::domain::ports::OrderRepository;
use crate::schema::production_orders;

use super::models::{NewOrderRow, OrderRow};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Store(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Store(e.to_string())
    }
}

// ── Repository ────────────────────────────────────────────────────────────────

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn into_orders(rows: Vec<OrderRow>) -> Result<Vec<Order>, DomainError> {
    rows.into_iter().map(Order::try_from).collect()
}

impl OrderRepository for DieselOrderRepository {
    fn insert(&self, order: NewOrder) -> Result<Uuid, DomainError> {
        let mut conn = self.pool.get()?;

        let id = Uuid::new_v4();
        diesel::insert_into(production_orders::table)
            .values(&NewOrderRow::from_domain(id, order)?)
            .execute(&mut conn)?;

        Ok(id)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        production_orders::table
            .filter(production_orders::id.eq(id))
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(Order::try_from)
            .transpose()
    }

    fn list_unfinished(&self) -> Result<Vec<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = production_orders::table
            .filter(production_orders::status.ne(OrderStatus::Finished.as_str()))
            .select(OrderRow::as_select())
            .order(production_orders::created_at.asc())
            .load(&mut conn)?;

        into_orders(rows)
    }

    fn list_all(&self) -> Result<Vec<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = production_orders::table
            .select(OrderRow::as_select())
            .order(production_orders::created_at.asc())
            .load(&mut conn)?;

        into_orders(rows)
    }

    fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        // Single UPDATE ... RETURNING, so the change is atomic per order.
        diesel::update(production_orders::table.filter(production_orders::id.eq(id)))
            .set((
                production_orders::status.eq(status.as_str()),
                production_orders::updated_at.eq(Some(updated_at)),
            ))
            .returning(OrderRow::as_returning())
            .get_result(&mut conn)
            .optional()?
            .map(Order::try_from)
            .transpose()
    }
}
