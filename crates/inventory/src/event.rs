use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shelfwatch_core::{AlertId, ItemId};
use shelfwatch_events::Event;

use crate::alert::AlertType;
use crate::item::StockStatus;

/// Event: ItemAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub item_id: ItemId,
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemUpdated (merge patch or weight observation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemUpdated {
    pub item_id: ItemId,
    pub previous_status: StockStatus,
    pub status: StockStatus,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemRemoved, with the alerts removed alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRemoved {
    pub item_id: ItemId,
    pub removed_alerts: Vec<AlertId>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: AlertRaised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRaised {
    pub alert_id: AlertId,
    pub item_id: ItemId,
    pub alert_type: AlertType,
    pub occurred_at: DateTime<Utc>,
}

/// Event: AlertAcknowledged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertAcknowledged {
    pub alert_id: AlertId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CategorySelected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySelected {
    pub category: String,
    pub occurred_at: DateTime<Utc>,
}

/// Change notification published by the store after each applied mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryEvent {
    ItemAdded(ItemAdded),
    ItemUpdated(ItemUpdated),
    ItemRemoved(ItemRemoved),
    AlertRaised(AlertRaised),
    AlertAcknowledged(AlertAcknowledged),
    CategorySelected(CategorySelected),
}

impl Event for InventoryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::ItemAdded(_) => "inventory.item.added",
            InventoryEvent::ItemUpdated(_) => "inventory.item.updated",
            InventoryEvent::ItemRemoved(_) => "inventory.item.removed",
            InventoryEvent::AlertRaised(_) => "inventory.alert.raised",
            InventoryEvent::AlertAcknowledged(_) => "inventory.alert.acknowledged",
            InventoryEvent::CategorySelected(_) => "inventory.filter.category_selected",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InventoryEvent::ItemAdded(e) => e.occurred_at,
            InventoryEvent::ItemUpdated(e) => e.occurred_at,
            InventoryEvent::ItemRemoved(e) => e.occurred_at,
            InventoryEvent::AlertRaised(e) => e.occurred_at,
            InventoryEvent::AlertAcknowledged(e) => e.occurred_at,
            InventoryEvent::CategorySelected(e) => e.occurred_at,
        }
    }
}
