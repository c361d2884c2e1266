use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, Order, OrderItem, OrderStatus};
use crate::domain::ports::OrderRepository;

const INVALID_ORDER: &str = "Invalid order payload. 'customer_id' and 'items' are required.";

#[derive(Clone)]
pub struct OrderService {
    repo: Arc<dyn OrderRepository>,
}

impl OrderService {
    pub fn new(repo: Arc<dyn OrderRepository>) -> Self {
        Self { repo }
    }

    /// Validates the raw payload and stores it as a new `Received` order.
    ///
    /// Any status or timestamp the caller sent is ignored.
    pub fn create_order(
        &self,
        customer_id: Option<String>,
        items: Option<Value>,
    ) -> Result<Uuid, DomainError> {
        let order = NewOrder::received(
            parse_customer_id(customer_id)?,
            parse_items(items)?,
            Utc::now(),
        );
        self.repo.insert(order)
    }

    /// Every order that is not `Finished`.
    pub fn list_queue(&self) -> Result<Vec<Order>, DomainError> {
        self.repo.list_unfinished()
    }

    pub fn list_all(&self) -> Result<Vec<Order>, DomainError> {
        self.repo.list_all()
    }

    pub fn get_order(&self, id: &str) -> Result<Order, DomainError> {
        let id = parse_order_id(id)?;
        self.repo.find_by_id(id)?.ok_or(DomainError::NotFound)
    }

    /// Moves the order to `status`. Any recognized status is accepted from
    /// any current status.
    pub fn update_status(&self, id: &str, status: Option<&str>) -> Result<Order, DomainError> {
        let id = parse_order_id(id)?;
        let status = match status {
            Some(raw) => raw.parse::<OrderStatus>()?,
            None => {
                return Err(DomainError::Validation(format!(
                    "Invalid status. Use one of the following: {}",
                    OrderStatus::accepted_values()
                )))
            }
        };

        self.repo
            .update_status(id, status, Utc::now())?
            .ok_or(DomainError::NotFound)
    }
}

fn parse_order_id(raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw).map_err(|_| DomainError::Validation("Invalid order id.".to_string()))
}

fn parse_customer_id(raw: Option<String>) -> Result<String, DomainError> {
    match raw {
        Some(id) if !id.trim().is_empty() => Ok(id),
        _ => Err(DomainError::Validation(INVALID_ORDER.to_string())),
    }
}

fn parse_items(raw: Option<Value>) -> Result<Vec<OrderItem>, DomainError> {
    let Some(Value::Array(values)) = raw else {
        return Err(DomainError::Validation(INVALID_ORDER.to_string()));
    };
    if values.is_empty() {
        return Err(DomainError::Validation(INVALID_ORDER.to_string()));
    }

    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| match value {
            Value::Object(fields) => Ok(OrderItem::from(fields)),
            _ => Err(DomainError::Validation(format!(
                "Invalid item at position {}: expected an object",
                index
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::InMemoryOrderRepository;
    use serde_json::json;

    fn service() -> (OrderService, Arc<InMemoryOrderRepository>) {
        let repo = Arc::new(InMemoryOrderRepository::new());
        (OrderService::new(repo.clone()), repo)
    }

    fn create(service: &OrderService) -> Uuid {
        service
            .create_order(
                Some("c1".to_string()),
                Some(json!([{ "product_id": 1, "quantity": 1 }])),
            )
            .expect("create failed")
    }

    #[test]
    fn created_order_starts_received() {
        let (service, _) = service();
        let id = create(&service);

        let order = service.get_order(&id.to_string()).expect("get failed");
        assert_eq!(order.status, OrderStatus::Received);
        assert_eq!(order.customer_id, "c1");
        assert!(order.updated_at.is_none());
    }

    #[test]
    fn missing_customer_id_is_rejected_and_nothing_is_stored() {
        let (service, repo) = service();

        let err = service
            .create_order(None, Some(json!([{ "product_id": 1 }])))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = service
            .create_order(Some("".to_string()), Some(json!([{ "product_id": 1 }])))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        assert!(repo.is_empty());
    }

    #[test]
    fn items_must_be_a_non_empty_array() {
        let (service, repo) = service();

        for items in [None, Some(json!([])), Some(json!({ "product_id": 1 })), Some(json!("x"))] {
            let err = service
                .create_order(Some("c1".to_string()), items)
                .unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
        assert!(repo.is_empty());
    }

    #[test]
    fn item_fields_are_stored_as_sent() {
        let (service, _) = service();
        let items = json!([
            { "quantity": "two", "extra_sauce": true },
            { "product_id": 3, "unit_price": 9 }
        ]);

        let id = service
            .create_order(Some("c1".to_string()), Some(items.clone()))
            .expect("create failed");

        let order = service.get_order(&id.to_string()).expect("get failed");
        assert_eq!(serde_json::to_value(&order.items).unwrap(), items);
    }

    #[test]
    fn non_object_item_is_a_validation_error() {
        let (service, repo) = service();

        let err = service
            .create_order(Some("c1".to_string()), Some(json!([{ "product_id": 1 }, 42])))
            .unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("position 1")),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(repo.is_empty());
    }

    #[test]
    fn update_rejects_malformed_id() {
        let (service, _) = service();
        let err = service.update_status("not-an-id", Some("Ready")).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn update_rejects_missing_or_unknown_status_and_keeps_stored_status() {
        let (service, _) = service();
        let id = create(&service).to_string();

        assert!(matches!(
            service.update_status(&id, None).unwrap_err(),
            DomainError::Validation(_)
        ));
        assert!(matches!(
            service.update_status(&id, Some("Cancelled")).unwrap_err(),
            DomainError::Validation(_)
        ));

        let order = service.get_order(&id).expect("get failed");
        assert_eq!(order.status, OrderStatus::Received);
        assert!(order.updated_at.is_none());
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let (service, _) = service();
        let err = service
            .update_status(&Uuid::new_v4().to_string(), Some("Ready"))
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound));
    }

    #[test]
    fn any_status_can_follow_any_other() {
        let (service, _) = service();
        let id = create(&service).to_string();

        let finished = service.update_status(&id, Some("Finished")).expect("update failed");
        assert_eq!(finished.status, OrderStatus::Finished);

        let reopened = service.update_status(&id, Some("Received")).expect("update failed");
        assert_eq!(reopened.status, OrderStatus::Received);
    }

    #[test]
    fn repeating_an_update_keeps_the_status() {
        let (service, _) = service();
        let id = create(&service).to_string();

        let first = service.update_status(&id, Some("Ready")).expect("update failed");
        let second = service.update_status(&id, Some("Ready")).expect("update failed");

        assert_eq!(first.status, second.status);
        assert_eq!(first.created_at, second.created_at);
        assert!(second.updated_at >= first.updated_at);
    }

    #[test]
    fn queue_hides_finished_orders() {
        let (service, _) = service();
        let open = create(&service);
        let done = create(&service);
        service
            .update_status(&done.to_string(), Some("Finished"))
            .expect("update failed");

        let queue = service.list_queue().expect("queue failed");
        assert_eq!(queue.iter().map(|o| o.id).collect::<Vec<_>>(), vec![open]);
        assert_eq!(service.list_all().expect("list failed").len(), 2);
    }
}
