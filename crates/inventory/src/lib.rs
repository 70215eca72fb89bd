//! Inventory domain module.
//!
//! Weight-tracked shelf items, their alerts and sensors, held by a single
//! in-memory `InventoryStore`. Pure domain logic: no IO, no async.

pub mod alert;
pub mod config;
pub mod event;
pub mod filter;
pub mod fixtures;
pub mod item;
pub mod sensor;
pub mod store;
pub mod summary;

pub use alert::{Alert, AlertPriority, AlertType};
pub use config::StoreConfig;
pub use event::InventoryEvent;
pub use filter::{ALL_CATEGORIES, CategoryFilter};
pub use item::{
    DEFAULT_LOW_FACTOR, FillLevel, InventoryItem, ItemPatch, NewItem, StockStatus, Trend,
    WeightObservation,
};
pub use sensor::{BatteryBand, SensorStatus, ShelfSensor};
pub use shelfwatch_core::{AlertId, DomainError, DomainResult, Entity, ItemId, SensorId};
pub use shelfwatch_events::{Event, Subscription};
pub use store::{InventoryStore, StoreSnapshot};
pub use summary::DashboardSummary;
