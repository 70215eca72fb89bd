//! Seed data for a small café: five categories, twelve shelves.
//!
//! Statuses given here are the ones the shelves last reported; the store
//! reclassifies every item on construction, so they may be corrected.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};

use shelfwatch_core::{AlertId, DomainError, DomainResult, Entity, ItemId, SensorId};

use crate::alert::{Alert, AlertPriority, AlertType};
use crate::item::{InventoryItem, StockStatus, Trend};
use crate::sensor::{SensorStatus, ShelfSensor};

/// The three collections a store starts from.
#[derive(Debug, Clone, PartialEq)]
pub struct Seed {
    pub items: Vec<InventoryItem>,
    pub alerts: Vec<Alert>,
    pub sensors: Vec<ShelfSensor>,
}

impl Seed {
    /// Check the collections against the rules the store's write surface
    /// enforces: valid item fields, unique ids, every item on a known shelf
    /// and every alert pointing at a seeded item.
    pub fn validate(&self) -> DomainResult<()> {
        let mut shelves = HashSet::new();
        for sensor in &self.sensors {
            if !shelves.insert(sensor.id()) {
                return Err(DomainError::invariant(format!("duplicate sensor id {}", sensor.id())));
            }
        }

        let mut items = HashSet::new();
        for item in &self.items {
            if !items.insert(item.id()) {
                return Err(DomainError::invariant(format!("duplicate item id {}", item.id())));
            }
            item.validate()?;
            if !shelves.contains(item.shelf_id()) {
                return Err(DomainError::invariant(format!(
                    "item {} sits on unknown shelf {}",
                    item.id(),
                    item.shelf_id()
                )));
            }
        }

        let mut alerts = HashSet::new();
        for alert in &self.alerts {
            if !alerts.insert(alert.id()) {
                return Err(DomainError::invariant(format!("duplicate alert id {}", alert.id())));
            }
            if !items.contains(alert.item_id()) {
                return Err(DomainError::invariant(format!(
                    "alert {} references unknown item {}",
                    alert.id(),
                    alert.item_id()
                )));
            }
        }

        Ok(())
    }
}

/// Build the fixture data set with timestamps relative to `now`.
pub fn seed(now: DateTime<Utc>) -> Seed {
    let ago = |minutes: i64| now - Duration::minutes(minutes);

    #[rustfmt::skip]
    let items = vec![
        item("1", "Arabica Coffee Beans", "Coffee Beans", 3.2, 5.0, "kg", 64, 1.0, "SHELF-A1", ago(15), StockStatus::Normal, Trend::Decreasing),
        item("2", "Robusta Coffee Beans", "Coffee Beans", 0.8, 5.0, "kg", 16, 1.0, "SHELF-A2", ago(8), StockStatus::Low, Trend::Decreasing),
        item("3", "Whole Milk", "Milk & Dairy", 8.5, 12.0, "L", 8, 2.0, "SHELF-B1", ago(5), StockStatus::Normal, Trend::Stable),
        item("4", "Oat Milk", "Milk & Dairy", 1.2, 8.0, "L", 1, 2.0, "SHELF-B2", ago(3), StockStatus::Critical, Trend::Decreasing),
        item("5", "Almond Milk", "Milk & Dairy", 0.0, 8.0, "L", 0, 2.0, "SHELF-B3", ago(45), StockStatus::Out, Trend::Decreasing),
        item("6", "Vanilla Syrup", "Syrups", 2.8, 4.0, "L", 2, 0.5, "SHELF-C1", ago(12), StockStatus::Normal, Trend::Stable),
        item("7", "Caramel Syrup", "Syrups", 3.5, 4.0, "L", 3, 0.5, "SHELF-C2", ago(20), StockStatus::Normal, Trend::Decreasing),
        item("8", "Hazelnut Syrup", "Syrups", 0.4, 4.0, "L", 0, 0.5, "SHELF-C3", ago(7), StockStatus::Low, Trend::Decreasing),
        item("9", "Croissants", "Pastries", 1.8, 3.0, "kg", 24, 0.5, "SHELF-D1", ago(2), StockStatus::Normal, Trend::Stable),
        item("10", "Muffins", "Pastries", 2.2, 3.0, "kg", 18, 0.5, "SHELF-D2", ago(10), StockStatus::Normal, Trend::Decreasing),
        item("11", "Paper Cups (12oz)", "Supplies", 2.5, 5.0, "kg", 180, 1.0, "SHELF-E1", ago(18), StockStatus::Normal, Trend::Stable),
        item("12", "Napkins", "Supplies", 0.9, 3.0, "kg", 450, 0.8, "SHELF-E2", ago(25), StockStatus::Low, Trend::Decreasing),
    ];

    #[rustfmt::skip]
    let alerts = vec![
        alert("a1", "5", "Almond Milk", AlertType::OutOfStock, "Almond Milk is out of stock", ago(45), AlertPriority::High),
        alert("a2", "4", "Oat Milk", AlertType::Critical, "Oat Milk is critically low (1.2L remaining)", ago(3), AlertPriority::High),
        alert("a3", "2", "Robusta Coffee Beans", AlertType::LowStock, "Robusta Coffee Beans below minimum threshold", ago(8), AlertPriority::Medium),
        alert("a4", "8", "Hazelnut Syrup", AlertType::LowStock, "Hazelnut Syrup running low (0.4L remaining)", ago(7), AlertPriority::Medium),
        alert("a5", "12", "Napkins", AlertType::LowStock, "Napkins approaching minimum threshold", ago(25), AlertPriority::Low),
    ];

    let sensors = [
        ("SHELF-A1", "Storage Room - Shelf A1", 87, 2),
        ("SHELF-A2", "Storage Room - Shelf A2", 92, 1),
        ("SHELF-B1", "Refrigerator - Shelf B1", 78, 3),
        ("SHELF-B2", "Refrigerator - Shelf B2", 65, 1),
        ("SHELF-B3", "Refrigerator - Shelf B3", 71, 5),
        ("SHELF-C1", "Counter - Shelf C1", 94, 2),
        ("SHELF-C2", "Counter - Shelf C2", 88, 4),
        ("SHELF-C3", "Counter - Shelf C3", 45, 1),
        ("SHELF-D1", "Display Case - Shelf D1", 82, 1),
        ("SHELF-D2", "Display Case - Shelf D2", 76, 3),
        ("SHELF-E1", "Back Storage - Shelf E1", 91, 2),
        ("SHELF-E2", "Back Storage - Shelf E2", 68, 6),
    ]
    .into_iter()
    .map(|(id, location, battery, synced)| {
        ShelfSensor::new(SensorId::from(id), location, SensorStatus::Online, battery, ago(synced))
    })
    .collect();

    Seed {
        items,
        alerts,
        sensors,
    }
}

#[allow(clippy::too_many_arguments)]
fn item(
    id: &str,
    name: &str,
    category: &str,
    current_weight: f64,
    max_weight: f64,
    unit: &str,
    estimated_quantity: u32,
    min_threshold: f64,
    shelf_id: &str,
    last_updated: DateTime<Utc>,
    status: StockStatus,
    trend: Trend,
) -> InventoryItem {
    InventoryItem {
        id: ItemId::from(id),
        name: name.to_string(),
        category: category.to_string(),
        current_weight,
        max_weight,
        unit: unit.to_string(),
        estimated_quantity,
        min_threshold,
        shelf_id: SensorId::from(shelf_id),
        last_updated,
        status,
        trend,
    }
}

fn alert(
    id: &str,
    item_id: &str,
    item_name: &str,
    alert_type: AlertType,
    message: &str,
    timestamp: DateTime<Utc>,
    priority: AlertPriority,
) -> Alert {
    Alert::new(
        AlertId::from(id),
        ItemId::from(item_id),
        item_name,
        alert_type,
        message,
        priority,
        timestamp,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_expected_shape() {
        let seed = seed(Utc::now());
        assert_eq!(seed.items.len(), 12);
        assert_eq!(seed.alerts.len(), 5);
        assert_eq!(seed.sensors.len(), 12);
        assert!(seed.alerts.iter().all(|a| !a.is_acknowledged()));
    }

    #[test]
    fn every_item_sits_on_a_known_shelf() {
        let seed = seed(Utc::now());
        let shelves: HashSet<_> = seed.sensors.iter().map(|s| s.id().clone()).collect();
        assert!(seed.items.iter().all(|i| shelves.contains(i.shelf_id())));
    }

    #[test]
    fn every_alert_references_a_seeded_item() {
        let seed = seed(Utc::now());
        let items: HashSet<_> = seed.items.iter().map(|i| i.id().clone()).collect();
        assert!(seed.alerts.iter().all(|a| items.contains(a.item_id())));
    }

    #[test]
    fn fixture_seed_is_valid() {
        assert_eq!(seed(Utc::now()).validate(), Ok(()));
    }

    #[test]
    fn inconsistent_seeds_are_rejected() {
        let now = Utc::now();

        let mut duplicate = seed(now);
        let first = duplicate.items[0].clone();
        duplicate.items.push(first);
        assert!(matches!(duplicate.validate(), Err(DomainError::InvariantViolation(_))));

        let mut orphan_alert = seed(now);
        orphan_alert.items.retain(|i| i.id() != &ItemId::from("5"));
        assert!(matches!(orphan_alert.validate(), Err(DomainError::InvariantViolation(_))));

        let mut unknown_shelf = seed(now);
        unknown_shelf.sensors.retain(|s| s.id() != &SensorId::from("SHELF-A1"));
        assert!(matches!(unknown_shelf.validate(), Err(DomainError::InvariantViolation(_))));

        let mut blank_name = seed(now);
        blank_name.items[0].name = String::new();
        assert!(matches!(blank_name.validate(), Err(DomainError::Validation(_))));
    }
}
