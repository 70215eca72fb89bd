//! The inventory store: single owner of items, alerts and sensors.
//!
//! All mutation goes through the methods below and requires `&mut self`;
//! readers borrow `&self`, so no caller ever observes a half-applied change.
//! Every by-id operation reports `DomainError::NotFound` for unknown ids and
//! leaves state untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shelfwatch_core::{AlertId, DomainError, DomainResult, Entity, ItemId, SensorId};
use shelfwatch_events::{EventBus, InMemoryEventBus, Subscription};

use crate::alert::Alert;
use crate::config::StoreConfig;
use crate::event::{
    AlertAcknowledged, AlertRaised, CategorySelected, InventoryEvent, ItemAdded, ItemRemoved,
    ItemUpdated,
};
use crate::filter::{ALL_CATEGORIES, CategoryFilter};
use crate::fixtures::{self, Seed};
use crate::item::{
    InventoryItem, ItemPatch, NewItem, StockStatus, Trend, WeightObservation, ensure_non_negative,
};
use crate::sensor::ShelfSensor;
use crate::summary::DashboardSummary;

/// Owned copy of the whole read model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub items: Vec<InventoryItem>,
    pub alerts: Vec<Alert>,
    pub sensors: Vec<ShelfSensor>,
    pub selected_category: CategoryFilter,
}

#[derive(Debug)]
pub struct InventoryStore {
    items: Vec<InventoryItem>,
    alerts: Vec<Alert>,
    sensors: Vec<ShelfSensor>,
    selected_category: CategoryFilter,
    config: StoreConfig,
    bus: InMemoryEventBus<InventoryEvent>,
}

impl InventoryStore {
    /// Build a store from seed collections.
    ///
    /// The seed must satisfy the same rules as the write surface (see
    /// `Seed::validate`). Every seeded item is reclassified so stored statuses
    /// agree with the configured rule from the start.
    pub fn new(seed: Seed, config: StoreConfig) -> DomainResult<Self> {
        config.validate()?;
        if let Err(e) = seed.validate() {
            tracing::warn!(error = %e, "rejected seed");
            return Err(e);
        }
        Ok(Self::from_seed(seed, config))
    }

    /// Store seeded with the café fixture data and default configuration.
    pub fn with_fixtures(now: DateTime<Utc>) -> Self {
        Self::from_seed(fixtures::seed(now), StoreConfig::default())
    }

    fn from_seed(seed: Seed, config: StoreConfig) -> Self {
        let Seed {
            mut items,
            alerts,
            sensors,
        } = seed;

        for item in &mut items {
            let previous = item.reclassify(config.low_factor);
            if previous != item.status() {
                tracing::debug!(
                    item_id = %item.id(),
                    from = %previous,
                    to = %item.status(),
                    "seeded status reclassified"
                );
            }
        }

        Self {
            items,
            alerts,
            sensors,
            selected_category: CategoryFilter::All,
            config,
            bus: InMemoryEventBus::new(),
        }
    }

    // ---------------------------------------------------------------------
    // Read surface
    // ---------------------------------------------------------------------

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn sensors(&self) -> &[ShelfSensor] {
        &self.sensors
    }

    pub fn selected_category(&self) -> &CategoryFilter {
        &self.selected_category
    }

    pub fn item(&self, item_id: &ItemId) -> Option<&InventoryItem> {
        self.items.iter().find(|i| i.has_id(item_id))
    }

    pub fn alert(&self, alert_id: &AlertId) -> Option<&Alert> {
        self.alerts.iter().find(|a| a.has_id(alert_id))
    }

    pub fn sensor(&self, sensor_id: &SensorId) -> Option<&ShelfSensor> {
        self.sensors.iter().find(|s| s.has_id(sensor_id))
    }

    /// Items matching the selected category, in stored order.
    pub fn filtered_items(&self) -> Vec<&InventoryItem> {
        self.items
            .iter()
            .filter(|i| self.selected_category.matches(i))
            .collect()
    }

    /// `"All"` followed by each distinct item category in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        for item in &self.items {
            if !categories.iter().any(|c| c == item.category()) {
                categories.push(item.category().to_string());
            }
        }
        categories
    }

    /// Unacknowledged alerts, in stored order.
    pub fn active_alerts(&self) -> Vec<&Alert> {
        self.alerts.iter().filter(|a| !a.is_acknowledged()).collect()
    }

    /// Alerts raised for one item, acknowledged or not.
    pub fn alerts_for_item(&self, item_id: &ItemId) -> Vec<&Alert> {
        self.alerts.iter().filter(|a| a.item_id() == item_id).collect()
    }

    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary::compute(&self.items, &self.alerts, &self.sensors)
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            items: self.items.clone(),
            alerts: self.alerts.clone(),
            sensors: self.sensors.clone(),
            selected_category: self.selected_category.clone(),
        }
    }

    /// Receive an `InventoryEvent` for every mutation applied after this call.
    pub fn subscribe(&self) -> Subscription<InventoryEvent> {
        self.bus.subscribe()
    }

    // ---------------------------------------------------------------------
    // Write surface
    // ---------------------------------------------------------------------

    /// Replace the category filter. Any label is accepted.
    pub fn set_selected_category(&mut self, category: impl Into<CategoryFilter>) {
        self.selected_category = category.into();
        tracing::debug!(category = %self.selected_category, "category selected");
        self.publish(InventoryEvent::CategorySelected(CategorySelected {
            category: self.selected_category.to_string(),
            occurred_at: Utc::now(),
        }));
    }

    /// Mark an alert as acknowledged. Acknowledging twice is a no-op.
    pub fn acknowledge_alert(&mut self, alert_id: &AlertId) -> DomainResult<()> {
        let alert = self
            .alerts
            .iter_mut()
            .find(|a| a.has_id(alert_id))
            .ok_or_else(|| DomainError::not_found("alert", alert_id))?;

        if !alert.acknowledge() {
            tracing::debug!(alert_id = %alert_id, "alert already acknowledged");
            return Ok(());
        }

        tracing::info!(alert_id = %alert_id, item_id = %alert.item_id(), "alert acknowledged");
        self.publish(InventoryEvent::AlertAcknowledged(AlertAcknowledged {
            alert_id: alert_id.clone(),
            occurred_at: Utc::now(),
        }));
        Ok(())
    }

    /// Merge `patch` into an item and recompute its status.
    ///
    /// The patch is validated as a whole before anything is written.
    pub fn update_item(&mut self, item_id: &ItemId, patch: ItemPatch) -> DomainResult<()> {
        let idx = self.position(item_id)?;
        if let Err(e) = patch.validate() {
            tracing::warn!(item_id = %item_id, error = %e, "rejected item update");
            return Err(e);
        }
        if let Some(shelf_id) = &patch.shelf_id {
            self.ensure_sensor(shelf_id)?;
        }

        let now = Utc::now();
        patch.apply_to(&mut self.items[idx]);
        let previous = self.items[idx].reclassify(self.config.low_factor);

        tracing::info!(
            item_id = %item_id,
            status = %self.items[idx].status(),
            "item updated"
        );
        self.after_status_change(idx, previous, now);
        Ok(())
    }

    /// Create an empty item on a known shelf and return its id.
    pub fn add_item(&mut self, new_item: NewItem) -> DomainResult<ItemId> {
        if let Err(e) = new_item.validate() {
            tracing::warn!(error = %e, "rejected new item");
            return Err(e);
        }
        self.ensure_sensor(&new_item.shelf_id)?;

        let now = Utc::now();
        let item_id = ItemId::generate();
        let item = InventoryItem::from_new(item_id.clone(), new_item, now);

        tracing::info!(item_id = %item_id, name = item.name(), shelf_id = %item.shelf_id(), "item added");
        let event = InventoryEvent::ItemAdded(ItemAdded {
            item_id: item_id.clone(),
            name: item.name().to_string(),
            occurred_at: now,
        });
        self.items.push(item);
        self.publish(event);
        Ok(item_id)
    }

    /// Remove an item together with every alert that references it.
    pub fn remove_item(&mut self, item_id: &ItemId) -> DomainResult<InventoryItem> {
        let idx = self.position(item_id)?;
        let removed = self.items.remove(idx);

        let mut removed_alerts = Vec::new();
        self.alerts.retain(|a| {
            if a.item_id() == item_id {
                removed_alerts.push(a.id().clone());
                false
            } else {
                true
            }
        });

        tracing::info!(
            item_id = %item_id,
            alerts_removed = removed_alerts.len(),
            "item removed"
        );
        self.publish(InventoryEvent::ItemRemoved(ItemRemoved {
            item_id: item_id.clone(),
            removed_alerts,
            occurred_at: Utc::now(),
        }));
        Ok(removed)
    }

    /// Apply one weight reading: new weight, derived trend, recomputed status.
    ///
    /// Returns the item's status after the reading.
    pub fn record_weight(
        &mut self,
        item_id: &ItemId,
        observation: WeightObservation,
    ) -> DomainResult<StockStatus> {
        let idx = self.position(item_id)?;
        if let Err(e) = ensure_non_negative("weight", observation.weight) {
            tracing::warn!(item_id = %item_id, error = %e, "rejected weight reading");
            return Err(e);
        }

        let tolerance = self.config.trend_tolerance;
        let item = &mut self.items[idx];
        item.trend = Trend::from_delta(item.current_weight, observation.weight, tolerance);
        item.current_weight = observation.weight;
        if let Some(quantity) = observation.estimated_quantity {
            item.estimated_quantity = quantity;
        }
        item.last_updated = observation.observed_at;
        let previous = item.reclassify(self.config.low_factor);
        let status = item.status();

        tracing::debug!(
            item_id = %item_id,
            weight = observation.weight,
            trend = ?item.trend,
            %status,
            "weight recorded"
        );
        self.after_status_change(idx, previous, observation.observed_at);
        Ok(status)
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn position(&self, item_id: &ItemId) -> DomainResult<usize> {
        self.items
            .iter()
            .position(|i| i.has_id(item_id))
            .ok_or_else(|| DomainError::not_found("item", item_id))
    }

    fn ensure_sensor(&self, sensor_id: &SensorId) -> DomainResult<()> {
        if self.sensor(sensor_id).is_none() {
            tracing::warn!(shelf_id = %sensor_id, "unknown shelf");
            return Err(DomainError::validation(format!(
                "shelf_id {sensor_id} does not reference a known sensor"
            )));
        }
        Ok(())
    }

    /// Publish the update and, if the item got worse, raise an alert.
    fn after_status_change(&mut self, idx: usize, previous: StockStatus, at: DateTime<Utc>) {
        let item = &self.items[idx];
        let status = item.status();

        self.publish(InventoryEvent::ItemUpdated(ItemUpdated {
            item_id: item.id().clone(),
            previous_status: previous,
            status,
            occurred_at: at,
        }));

        if !self.config.auto_alerts || status.severity() <= previous.severity() {
            return;
        }

        let Some(alert) = Alert::for_status(item, status, at) else {
            return;
        };

        let duplicate = self.alerts.iter().any(|a| {
            !a.is_acknowledged() && a.item_id() == alert.item_id() && a.alert_type() == alert.alert_type()
        });
        if duplicate {
            tracing::debug!(item_id = %alert.item_id(), "open alert of same type exists; not raising");
            return;
        }

        tracing::info!(
            alert_id = %alert.id(),
            item_id = %alert.item_id(),
            alert_type = ?alert.alert_type(),
            "alert raised"
        );
        let event = InventoryEvent::AlertRaised(AlertRaised {
            alert_id: alert.id().clone(),
            item_id: alert.item_id().clone(),
            alert_type: alert.alert_type(),
            occurred_at: at,
        });
        self.alerts.push(alert);
        self.publish(event);
    }

    fn publish(&self, event: InventoryEvent) {
        if let Err(e) = self.bus.publish(event) {
            tracing::warn!(error = %e, "failed to publish inventory event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::AlertType;
    use crate::item::DEFAULT_LOW_FACTOR;
    use shelfwatch_events::Event;

    fn store() -> InventoryStore {
        InventoryStore::with_fixtures(Utc::now())
    }

    fn new_item(shelf: &str) -> NewItem {
        NewItem {
            name: "X".to_string(),
            category: "C".to_string(),
            max_weight: 5.0,
            unit: "kg".to_string(),
            min_threshold: 1.0,
            shelf_id: SensorId::from(shelf),
        }
    }

    fn weight(w: f64) -> ItemPatch {
        ItemPatch {
            current_weight: Some(w),
            ..ItemPatch::default()
        }
    }

    #[test]
    fn seeded_statuses_follow_classification_rule() {
        let store = store();
        for item in store.items() {
            assert_eq!(
                item.status(),
                StockStatus::classify(item.current_weight(), item.min_threshold(), DEFAULT_LOW_FACTOR),
                "item {}",
                item.id()
            );
        }
        assert_eq!(store.item(&"8".into()).unwrap().status(), StockStatus::Critical);
        assert_eq!(store.item(&"12".into()).unwrap().status(), StockStatus::Low);
    }

    #[test]
    fn summary_of_fixture_data() {
        let summary = store().summary();
        assert_eq!(
            summary,
            DashboardSummary {
                total_items: 12,
                low_stock: 4,
                out_of_stock: 1,
                active_alerts: 5,
                sensors_online: 12,
                sensors_total: 12,
            }
        );
    }

    #[test]
    fn add_item_creates_empty_record_with_unique_id() {
        let mut store = store();
        let before: Vec<ItemId> = store.items().iter().map(|i| i.id().clone()).collect();

        let id = store.add_item(new_item("SHELF-A1")).unwrap();

        assert_eq!(store.items().len(), before.len() + 1);
        assert!(!before.contains(&id));
        let item = store.item(&id).unwrap();
        assert_eq!(item.current_weight(), 0.0);
        assert_eq!(item.estimated_quantity(), 0);
        assert_eq!(item.status(), StockStatus::Out);
        assert_eq!(item.trend(), Trend::Stable);
        assert_eq!(item.name(), "X");
        assert_eq!(item.shelf_id(), &SensorId::from("SHELF-A1"));

        let second = store.add_item(new_item("SHELF-A1")).unwrap();
        assert_ne!(id, second);
    }

    #[test]
    fn add_item_rejects_invalid_input_without_storing() {
        let mut store = store();
        let before = store.snapshot();

        let mut blank = new_item("SHELF-A1");
        blank.name = String::new();
        assert!(matches!(store.add_item(blank), Err(DomainError::Validation(_))));

        let mut negative = new_item("SHELF-A1");
        negative.max_weight = -1.0;
        assert!(matches!(store.add_item(negative), Err(DomainError::Validation(_))));

        assert!(matches!(
            store.add_item(new_item("SHELF-Z9")),
            Err(DomainError::Validation(_))
        ));

        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn remove_item_cascades_to_its_alerts_only() {
        let mut store = store();
        let removed = store.remove_item(&"5".into()).unwrap();

        assert_eq!(removed.name(), "Almond Milk");
        assert!(store.item(&"5".into()).is_none());
        assert!(store.alerts().iter().all(|a| a.item_id() != &ItemId::from("5")));
        assert_eq!(store.items().len(), 11);
        assert_eq!(store.alerts().len(), 4);
        assert!(store.alert(&"a2".into()).is_some());
    }

    #[test]
    fn acknowledge_is_idempotent_and_scoped() {
        let mut store = store();
        store.acknowledge_alert(&"a1".into()).unwrap();
        let after_first = store.snapshot();

        store.acknowledge_alert(&"a1".into()).unwrap();

        assert!(store.alert(&"a1".into()).unwrap().is_acknowledged());
        assert_eq!(store.snapshot(), after_first);
        assert_eq!(
            store.alerts().iter().filter(|a| a.is_acknowledged()).count(),
            1
        );
        assert_eq!(store.active_alerts().len(), 4);
    }

    #[test]
    fn unknown_ids_report_not_found_and_change_nothing() {
        let mut store = store();
        let before = store.snapshot();
        let missing = ItemId::from("nonexistent");

        assert!(store.update_item(&missing, weight(1.0)).unwrap_err().is_not_found());
        assert!(store.remove_item(&missing).unwrap_err().is_not_found());
        assert!(store
            .acknowledge_alert(&AlertId::from("nonexistent"))
            .unwrap_err()
            .is_not_found());
        assert!(store
            .record_weight(&missing, WeightObservation::new(1.0, Utc::now()))
            .unwrap_err()
            .is_not_found());

        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn category_filter_is_pure() {
        let mut store = store();
        let before = store.snapshot();

        store.set_selected_category("Syrups");
        let syrups: Vec<_> = store.filtered_items().iter().map(|i| i.id().clone()).collect();
        assert_eq!(syrups, vec![ItemId::from("6"), ItemId::from("7"), ItemId::from("8")]);

        store.set_selected_category("Not A Category");
        assert!(store.filtered_items().is_empty());

        store.set_selected_category("All");
        assert_eq!(store.filtered_items().len(), 12);

        assert_eq!(store.items(), &before.items[..]);
        assert_eq!(store.alerts(), &before.alerts[..]);
        assert_eq!(store.sensors(), &before.sensors[..]);
    }

    #[test]
    fn categories_are_listed_in_first_seen_order() {
        assert_eq!(
            store().categories(),
            vec!["All", "Coffee Beans", "Milk & Dairy", "Syrups", "Pastries", "Supplies"]
        );
    }

    #[test]
    fn update_item_recomputes_status_at_boundaries() {
        let mut store = InventoryStore::new(
            fixtures::seed(Utc::now()),
            StoreConfig::default().with_auto_alerts(false),
        )
        .unwrap();
        let id = store
            .add_item(NewItem {
                max_weight: 4.0,
                min_threshold: 0.5,
                ..new_item("SHELF-C1")
            })
            .unwrap();

        let mut status_at = |w: f64| {
            store.update_item(&id, weight(w)).unwrap();
            store.item(&id).unwrap().status()
        };

        assert_eq!(status_at(0.0), StockStatus::Out);
        assert_eq!(status_at(0.5), StockStatus::Critical);
        assert_eq!(status_at(0.4), StockStatus::Critical);
        assert_eq!(status_at(1.0), StockStatus::Low);
        assert_eq!(status_at(1.01), StockStatus::Normal);
        assert_eq!(status_at(4.0), StockStatus::Normal);
    }

    #[test]
    fn update_item_merges_and_validates() {
        let mut store = store();
        let id = ItemId::from("3");

        store
            .update_item(
                &id,
                ItemPatch {
                    name: Some("Whole Milk (organic)".to_string()),
                    trend: Some(Trend::Increasing),
                    ..ItemPatch::default()
                },
            )
            .unwrap();
        let item = store.item(&id).unwrap();
        assert_eq!(item.name(), "Whole Milk (organic)");
        assert_eq!(item.trend(), Trend::Increasing);
        assert_eq!(item.current_weight(), 8.5);

        let before = store.snapshot();
        assert!(store.update_item(&id, weight(-2.0)).is_err());
        let bad_shelf = ItemPatch {
            shelf_id: Some(SensorId::from("SHELF-Z9")),
            ..ItemPatch::default()
        };
        assert!(store.update_item(&id, bad_shelf).is_err());
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn raising_threshold_can_worsen_status() {
        let mut store = store();
        let id = ItemId::from("9");
        store
            .update_item(
                &id,
                ItemPatch {
                    min_threshold: Some(2.0),
                    ..ItemPatch::default()
                },
            )
            .unwrap();

        assert_eq!(store.item(&id).unwrap().status(), StockStatus::Critical);
        assert_eq!(store.alerts_for_item(&id).len(), 1);
    }

    #[test]
    fn record_weight_derives_trend_and_raises_one_alert_per_worsening() {
        let mut store = store();
        let id = ItemId::from("6");
        let now = Utc::now();
        let alerts_before = store.alerts().len();

        let status = store
            .record_weight(&id, WeightObservation::new(0.9, now).with_quantity(1))
            .unwrap();
        assert_eq!(status, StockStatus::Low);
        let item = store.item(&id).unwrap();
        assert_eq!(item.trend(), Trend::Decreasing);
        assert_eq!(item.estimated_quantity(), 1);
        assert_eq!(item.last_updated(), now);

        store.record_weight(&id, WeightObservation::new(0.3, now)).unwrap();
        store.record_weight(&id, WeightObservation::new(0.3, now)).unwrap();
        assert_eq!(store.item(&id).unwrap().trend(), Trend::Stable);

        let status = store.record_weight(&id, WeightObservation::new(4.0, now)).unwrap();
        assert_eq!(status, StockStatus::Normal);
        assert_eq!(store.item(&id).unwrap().trend(), Trend::Increasing);

        // Back to low while the first low-stock alert is still open.
        store.record_weight(&id, WeightObservation::new(0.9, now)).unwrap();

        let raised: Vec<AlertType> = store.alerts()[alerts_before..]
            .iter()
            .map(|a| a.alert_type())
            .collect();
        assert_eq!(raised, vec![AlertType::LowStock, AlertType::Critical]);
        assert!(store.alerts_for_item(&id).iter().all(|a| a.item_name() == "Vanilla Syrup"));
    }

    #[test]
    fn acknowledged_alert_does_not_suppress_a_new_one() {
        let mut store = store();
        let id = ItemId::from("7");
        let now = Utc::now();

        store.record_weight(&id, WeightObservation::new(0.0, now)).unwrap();
        let first = store.alerts().last().unwrap().id().clone();
        store.acknowledge_alert(&first).unwrap();

        store.record_weight(&id, WeightObservation::new(3.0, now)).unwrap();
        store.record_weight(&id, WeightObservation::new(0.0, now)).unwrap();

        let out_alerts = store
            .alerts_for_item(&id)
            .into_iter()
            .filter(|a| a.alert_type() == AlertType::OutOfStock)
            .count();
        assert_eq!(out_alerts, 2);
    }

    #[test]
    fn auto_alerts_can_be_disabled() {
        let mut store = InventoryStore::new(
            fixtures::seed(Utc::now()),
            StoreConfig::default().with_auto_alerts(false),
        )
        .unwrap();
        store
            .record_weight(&"6".into(), WeightObservation::new(0.0, Utc::now()))
            .unwrap();
        assert_eq!(store.alerts().len(), 5);
    }

    #[test]
    fn record_weight_rejects_negative_readings() {
        let mut store = store();
        let before = store.snapshot();
        let err = store
            .record_weight(&"6".into(), WeightObservation::new(-0.1, Utc::now()))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn inconsistent_seed_is_rejected() {
        let mut seed = fixtures::seed(Utc::now());
        seed.alerts.push(Alert::for_status(&seed.items[0], StockStatus::Out, Utc::now()).unwrap());
        seed.items.remove(0);

        let err = InventoryStore::new(seed, StoreConfig::default()).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));

        let mut seed = fixtures::seed(Utc::now());
        seed.items[2].shelf_id = SensorId::from("SHELF-Z9");
        assert!(InventoryStore::new(seed, StoreConfig::default()).is_err());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = InventoryStore::new(
            fixtures::seed(Utc::now()),
            StoreConfig::default().with_trend_tolerance(-1.0),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn custom_low_factor_applies_to_seeded_items() {
        let store = InventoryStore::new(
            fixtures::seed(Utc::now()),
            StoreConfig::default().with_low_factor(1.0),
        )
        .unwrap();
        // Napkins: 0.9 over a 0.8 threshold leaves no low band at factor 1.
        assert_eq!(store.item(&"12".into()).unwrap().status(), StockStatus::Normal);
    }

    #[test]
    fn subscribers_see_each_applied_mutation() {
        let mut store = store();
        let sub = store.subscribe();

        let id = store.add_item(new_item("SHELF-B1")).unwrap();
        store.acknowledge_alert(&"a2".into()).unwrap();
        store.acknowledge_alert(&"a2".into()).unwrap();
        store.remove_item(&"4".into()).unwrap();
        let _ = store.remove_item(&"4".into());
        store.set_selected_category("Pastries");

        let kinds: Vec<&str> = sub.drain().iter().map(|e| e.event_type()).collect();
        assert_eq!(
            kinds,
            vec![
                "inventory.item.added",
                "inventory.alert.acknowledged",
                "inventory.item.removed",
                "inventory.filter.category_selected",
            ]
        );
        assert!(store.item(&id).is_some());
    }

    #[test]
    fn removal_event_lists_cascaded_alerts() {
        let mut store = store();
        let sub = store.subscribe();
        store.remove_item(&"12".into()).unwrap();

        match sub.try_recv().unwrap() {
            InventoryEvent::ItemRemoved(e) => {
                assert_eq!(e.item_id, ItemId::from("12"));
                assert_eq!(e.removed_alerts, vec![AlertId::from("a5")]);
            }
            other => panic!("Expected ItemRemoved, got {other:?}"),
        }
    }

    #[test]
    fn snapshot_serializes_with_wire_names() {
        let json = serde_json::to_value(store().snapshot()).unwrap();
        assert_eq!(json["selected_category"], "All");
        assert_eq!(json["alerts"][0]["type"], "out_of_stock");
        assert_eq!(json["items"][4]["status"], "out");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 200,
                ..ProptestConfig::default()
            })]

            /// Property: after any sequence of readings every item's status
            /// matches the classification of its stored weight, and alerts only
            /// ever reference live items.
            #[test]
            fn readings_keep_store_consistent(
                readings in proptest::collection::vec((1usize..=12, 0.0f64..15.0), 1..40),
                removals in proptest::collection::vec(1usize..=12, 0..4),
            ) {
                let mut store = store();
                let now = Utc::now();

                for (item, w) in readings {
                    let id = ItemId::from(item.to_string().as_str());
                    let _ = store.record_weight(&id, WeightObservation::new(w, now));
                }
                for item in removals {
                    let _ = store.remove_item(&ItemId::from(item.to_string().as_str()));
                }

                for item in store.items() {
                    prop_assert_eq!(
                        item.status(),
                        StockStatus::classify(item.current_weight(), item.min_threshold(), DEFAULT_LOW_FACTOR)
                    );
                }
                for alert in store.alerts() {
                    prop_assert!(store.item(alert.item_id()).is_some());
                }
            }
        }
    }
}
