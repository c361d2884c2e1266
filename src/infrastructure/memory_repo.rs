use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, Order, OrderStatus};
use crate::domain::ports::OrderRepository;

/// Process-local store keeping orders in insertion order.
///
/// Stands in for the database in service and HTTP-level tests.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: Mutex<Vec<Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored orders. Panics if the store is poisoned.
    pub fn len(&self) -> usize {
        self.orders
            .lock()
            .expect("in-memory order store is poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Order>>, DomainError> {
        self.orders
            .lock()
            .map_err(|_| DomainError::Store("in-memory order store is poisoned".to_string()))
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn insert(&self, order: NewOrder) -> Result<Uuid, DomainError> {
        let id = Uuid::new_v4();
        self.lock()?.push(Order {
            id,
            customer_id: order.customer_id,
            items: order.items,
            status: order.status,
            created_at: order.created_at,
            updated_at: None,
        });
        Ok(id)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        Ok(self.lock()?.iter().find(|o| o.id == id).cloned())
    }

    fn list_unfinished(&self) -> Result<Vec<Order>, DomainError> {
        Ok(self
            .lock()?
            .iter()
            .filter(|o| o.status.is_queued())
            .cloned()
            .collect())
    }

    fn list_all(&self) -> Result<Vec<Order>, DomainError> {
        Ok(self.lock()?.clone())
    }

    fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Order>, DomainError> {
        let mut orders = self.lock()?;
        let Some(order) = orders.iter_mut().find(|o| o.id == id) else {
            return Ok(None);
        };
        order.status = status;
        order.updated_at = Some(updated_at);
        Ok(Some(order.clone()))
    }
}
