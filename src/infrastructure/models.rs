use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, Order, OrderStatus};
use crate::schema::production_orders;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = production_orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: Uuid,
    pub customer_id: String,
    pub items: Value,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = production_orders)]
pub struct NewOrderRow {
    pub id: Uuid,
    pub customer_id: String,
    pub items: Value,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl NewOrderRow {
    pub fn from_domain(id: Uuid, order: NewOrder) -> Result<Self, DomainError> {
        let items = serde_json::to_value(&order.items)
            .map_err(|e| DomainError::Store(format!("failed to encode items: {}", e)))?;
        Ok(Self {
            id,
            customer_id: order.customer_id,
            items,
            status: order.status.as_str().to_string(),
            created_at: order.created_at,
        })
    }
}

impl TryFrom<OrderRow> for Order {
    type Error = DomainError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<OrderStatus>().map_err(|_| {
            DomainError::Store(format!(
                "order {} has unrecognized status '{}'",
                row.id, row.status
            ))
        })?;
        let items = serde_json::from_value(row.items).map_err(|e| {
            DomainError::Store(format!("order {} has malformed items: {}", row.id, e))
        })?;
        Ok(Order {
            id: row.id,
            customer_id: row.customer_id,
            items,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
