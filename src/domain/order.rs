use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use utoipa::ToSchema;
use uuid::Uuid;

use super::errors::DomainError;

/// Preparation lifecycle of a production order.
///
/// The declared order is `Received → InPreparation → Ready → Finished`, but
/// transitions are not enforced: any status may be set from any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum OrderStatus {
    #[serde(rename = "Received")]
    Received,
    #[serde(rename = "In preparation")]
    InPreparation,
    #[serde(rename = "Ready")]
    Ready,
    #[serde(rename = "Finished")]
    Finished,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Received,
        OrderStatus::InPreparation,
        OrderStatus::Ready,
        OrderStatus::Finished,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Received => "Received",
            OrderStatus::InPreparation => "In preparation",
            OrderStatus::Ready => "Ready",
            OrderStatus::Finished => "Finished",
        }
    }

    /// Whether an order in this status still belongs to the kitchen queue.
    pub fn is_queued(&self) -> bool {
        match self {
            OrderStatus::Received | OrderStatus::InPreparation | OrderStatus::Ready => true,
            OrderStatus::Finished => false,
        }
    }

    /// Comma-separated list of the accepted wire values.
    pub fn accepted_values() -> String {
        Self::ALL
            .iter()
            .map(OrderStatus::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                DomainError::Validation(format!(
                    "Invalid status. Use one of the following: {}",
                    OrderStatus::accepted_values()
                ))
            })
    }
}

/// One product entry of an order.
///
/// Items are kept exactly as sent. Known keys holding a value of the expected
/// type are exposed as typed fields; every other key, including known keys
/// with an unexpected type, is kept verbatim in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(from = "Map<String, Value>")]
pub struct OrderItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 1)]
    pub product_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Classic Burger")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Sandwich")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 2)]
    pub quantity: Option<i32>,
    /// Kept as a JSON number so `15` is not rewritten as `15.0`.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>, example = 15.5)]
    pub unit_price: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "No onions")]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

fn take_typed<T: DeserializeOwned>(fields: &mut Map<String, Value>, key: &str) -> Option<T> {
    let parsed = serde_json::from_value(fields.get(key)?.clone()).ok()?;
    fields.remove(key);
    Some(parsed)
}

impl From<Map<String, Value>> for OrderItem {
    fn from(mut fields: Map<String, Value>) -> Self {
        let unit_price = match fields.get("unit_price") {
            Some(Value::Number(n)) => {
                let n = n.clone();
                fields.remove("unit_price");
                Some(n)
            }
            _ => None,
        };
        Self {
            product_id: take_typed(&mut fields, "product_id"),
            product_name: take_typed(&mut fields, "product_name"),
            category: take_typed(&mut fields, "category"),
            quantity: take_typed(&mut fields, "quantity"),
            unit_price,
            notes: take_typed(&mut fields, "notes"),
            extra: fields.into_iter().collect(),
        }
    }
}

/// A validated order that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub customer_id: String,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl NewOrder {
    /// Builds an order in the initial `Received` status.
    pub fn received(customer_id: String, items: Vec<OrderItem>, created_at: DateTime<Utc>) -> Self {
        Self {
            customer_id,
            items,
            status: OrderStatus::Received,
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: Uuid,
    pub customer_id: String,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
