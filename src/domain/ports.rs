use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;
use super::order::{NewOrder, Order, OrderStatus};

pub trait OrderRepository: Send + Sync + 'static {
    /// Persists the order and returns the identifier assigned by the store.
    fn insert(&self, order: NewOrder) -> Result<Uuid, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError>;
    /// Orders whose status is anything but `Finished`.
    fn list_unfinished(&self) -> Result<Vec<Order>, DomainError>;
    fn list_all(&self) -> Result<Vec<Order>, DomainError>;
    /// Sets `status` and `updated_at` in one atomic step and returns the
    /// updated order, or `None` when no order has this id.
    fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Order>, DomainError>;
}
