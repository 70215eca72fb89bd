use serde::{Deserialize, Serialize};

use crate::alert::Alert;
use crate::item::{InventoryItem, StockStatus};
use crate::sensor::ShelfSensor;

/// Headline counters shown above the inventory table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_items: usize,
    /// Items in the `Low` or `Critical` band.
    pub low_stock: usize,
    pub out_of_stock: usize,
    /// Unacknowledged alerts.
    pub active_alerts: usize,
    pub sensors_online: usize,
    pub sensors_total: usize,
}

impl DashboardSummary {
    pub fn compute(items: &[InventoryItem], alerts: &[Alert], sensors: &[ShelfSensor]) -> Self {
        Self {
            total_items: items.len(),
            low_stock: items.iter().filter(|i| i.status().needs_restock()).count(),
            out_of_stock: items
                .iter()
                .filter(|i| i.status() == StockStatus::Out)
                .count(),
            active_alerts: alerts.iter().filter(|a| !a.is_acknowledged()).count(),
            sensors_online: sensors.iter().filter(|s| s.is_online()).count(),
            sensors_total: sensors.len(),
        }
    }
}
