//! Plain-text rendering of the store's read model.
//!
//! Everything here reads from `InventoryStore`; nothing writes to it.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use shelfwatch_inventory::{
    Alert, AlertPriority, AlertType, BatteryBand, Entity, InventoryItem, InventoryStore,
    ShelfSensor, StockStatus, Trend,
};

use crate::format::{fill_bar, relative_time};

const BAR_WIDTH: usize = 10;

/// Render the whole dashboard: counters, category tabs, table, alerts, sensors.
pub fn render_dashboard(store: &InventoryStore, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    render_summary(&mut out, store);
    render_categories(&mut out, store);
    render_items(&mut out, store, now);
    render_alerts(&mut out, store, now);
    render_sensors(&mut out, store, now);
    out
}

fn render_summary(out: &mut String, store: &InventoryStore) {
    let s = store.summary();
    let _ = writeln!(
        out,
        "Total Items: {} | Low Stock: {} | Out of Stock: {} | Active Alerts: {}",
        s.total_items, s.low_stock, s.out_of_stock, s.active_alerts
    );
    out.push('\n');
}

fn render_categories(out: &mut String, store: &InventoryStore) {
    let selected = store.selected_category().as_str();
    let tabs: Vec<String> = store
        .categories()
        .into_iter()
        .map(|c| if c == selected { format!("[{c}]") } else { c })
        .collect();
    let _ = writeln!(out, "{}", tabs.join("  "));
    out.push('\n');
}

fn render_items(out: &mut String, store: &InventoryStore, now: DateTime<Utc>) {
    let _ = writeln!(
        out,
        "{:<4} {:<22} {:<14} {:>9} {:<18} {:<9} {:<5} {}",
        "ID", "Item", "Category", "Stock", "Capacity", "Status", "Trend", "Updated"
    );
    for item in store.filtered_items() {
        let _ = writeln!(out, "{}", item_row(item, now));
    }
    out.push('\n');
}

fn item_row(item: &InventoryItem, now: DateTime<Utc>) -> String {
    let capacity = match item.fill_percentage() {
        Some(p) => format!("{} {:>3.0}%", fill_bar(p, BAR_WIDTH), p),
        None => "n/a".to_string(),
    };
    let flag = if matches!(item.status(), StockStatus::Critical | StockStatus::Out) {
        "!"
    } else {
        " "
    };
    format!(
        "{:<4} {:<22} {:<14} {:>9} {:<18} {:<9} {:<5} {}",
        item.id(),
        format!("{}{}", flag, item.name()),
        item.category(),
        format!("{:.1} {}", item.current_weight(), item.unit()),
        capacity,
        item.status().as_str().to_uppercase(),
        trend_glyph(item.trend()),
        relative_time(item.last_updated(), now),
    )
}

fn trend_glyph(trend: Trend) -> &'static str {
    match trend {
        Trend::Increasing => "up",
        Trend::Decreasing => "down",
        Trend::Stable => "-",
    }
}

fn render_alerts(out: &mut String, store: &InventoryStore, now: DateTime<Utc>) {
    let active = store.active_alerts();
    let _ = writeln!(out, "Alerts ({} Active)", active.len());
    if active.is_empty() {
        let _ = writeln!(out, "  All clear");
    }
    for alert in active {
        let _ = writeln!(out, "  {}", alert_line(alert, now));
    }
    out.push('\n');
}

fn alert_line(alert: &Alert, now: DateTime<Utc>) -> String {
    let priority = match alert.priority() {
        AlertPriority::High => "HIGH",
        AlertPriority::Medium => "MED ",
        AlertPriority::Low => "LOW ",
    };
    let kind = match alert.alert_type() {
        AlertType::LowStock => "low stock",
        AlertType::Critical => "critical",
        AlertType::OutOfStock => "out of stock",
        AlertType::SensorError => "sensor error",
    };
    format!(
        "{} {:<4} {:<13} {} ({})",
        priority,
        alert.id(),
        kind,
        alert.message(),
        relative_time(alert.timestamp(), now)
    )
}

fn render_sensors(out: &mut String, store: &InventoryStore, now: DateTime<Utc>) {
    let s = store.summary();
    let _ = writeln!(out, "Sensors ({}/{} Online)", s.sensors_online, s.sensors_total);
    for sensor in store.sensors() {
        let _ = writeln!(out, "  {}", sensor_line(sensor, now));
    }
}

fn sensor_line(sensor: &ShelfSensor, now: DateTime<Utc>) -> String {
    let battery = match sensor.battery_band() {
        BatteryBand::Full => "full",
        BatteryBand::Medium => "med",
        BatteryBand::Low => "low",
    };
    let status = if sensor.is_online() { "ONLINE" } else { "OFFLINE" };
    format!(
        "{:<9} {:<26} {:<7} {:>3}% ({:<4}) synced {}",
        sensor.id(),
        sensor.location(),
        status,
        sensor.battery_level(),
        battery,
        relative_time(sensor.last_sync(), now)
    )
}
