use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shelfwatch_core::{AlertId, Entity, ItemId};

use crate::item::{InventoryItem, StockStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    LowStock,
    Critical,
    OutOfStock,
    SensorError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertPriority {
    High,
    Medium,
    Low,
}

/// A notable condition tied to one item.
///
/// `item_name` is a snapshot taken when the alert was raised; renaming the
/// item later does not rewrite it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub(crate) id: AlertId,
    pub(crate) item_id: ItemId,
    pub(crate) item_name: String,
    #[serde(rename = "type")]
    pub(crate) alert_type: AlertType,
    pub(crate) message: String,
    pub(crate) timestamp: DateTime<Utc>,
    pub(crate) acknowledged: bool,
    pub(crate) priority: AlertPriority,
}

impl Alert {
    /// Raise a new, unacknowledged alert.
    pub fn new(
        id: AlertId,
        item_id: ItemId,
        item_name: impl Into<String>,
        alert_type: AlertType,
        message: impl Into<String>,
        priority: AlertPriority,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            item_id,
            item_name: item_name.into(),
            alert_type,
            message: message.into(),
            timestamp,
            acknowledged: false,
            priority,
        }
    }

    /// Alert describing an item that has just entered `status`.
    ///
    /// `Normal` raises nothing.
    pub fn for_status(item: &InventoryItem, status: StockStatus, at: DateTime<Utc>) -> Option<Self> {
        let remaining = format!("{:.1}{}", item.current_weight(), item.unit());
        let (alert_type, priority, message) = match status {
            StockStatus::Normal => return None,
            StockStatus::Low => (
                AlertType::LowStock,
                AlertPriority::Medium,
                format!("{} running low ({remaining} remaining)", item.name()),
            ),
            StockStatus::Critical => (
                AlertType::Critical,
                AlertPriority::High,
                format!("{} is critically low ({remaining} remaining)", item.name()),
            ),
            StockStatus::Out => (
                AlertType::OutOfStock,
                AlertPriority::High,
                format!("{} is out of stock", item.name()),
            ),
        };

        Some(Self::new(
            AlertId::generate(),
            item.id().clone(),
            item.name(),
            alert_type,
            message,
            priority,
            at,
        ))
    }

    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn alert_type(&self) -> AlertType {
        self.alert_type
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged
    }

    pub fn priority(&self) -> AlertPriority {
        self.priority
    }

    /// One-way flag; returns whether this call changed anything.
    pub(crate) fn acknowledge(&mut self) -> bool {
        let changed = !self.acknowledged;
        self.acknowledged = true;
        changed
    }
}

impl Entity for Alert {
    type Id = AlertId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
