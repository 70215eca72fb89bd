use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shelfwatch_core::{DomainError, DomainResult, Entity, ItemId, SensorId};

/// Default multiplier applied to `min_threshold` for the upper edge of the
/// `Low` band.
pub const DEFAULT_LOW_FACTOR: f64 = 2.0;

/// Discrete stock-level classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Normal,
    Low,
    Critical,
    Out,
}

impl StockStatus {
    /// Classify a weight reading.
    ///
    /// ```text
    /// weight <= 0                         → Out
    /// weight <= min_threshold             → Critical
    /// weight <= min_threshold * low_factor → Low
    /// otherwise                           → Normal
    /// ```
    ///
    /// `max_weight` does not take part: fill percentage is a display concern.
    pub fn classify(current_weight: f64, min_threshold: f64, low_factor: f64) -> Self {
        if current_weight <= 0.0 {
            StockStatus::Out
        } else if current_weight <= min_threshold {
            StockStatus::Critical
        } else if current_weight <= min_threshold * low_factor {
            StockStatus::Low
        } else {
            StockStatus::Normal
        }
    }

    /// Ordering by urgency: Normal < Low < Critical < Out.
    pub fn severity(self) -> u8 {
        match self {
            StockStatus::Normal => 0,
            StockStatus::Low => 1,
            StockStatus::Critical => 2,
            StockStatus::Out => 3,
        }
    }

    /// Low or Critical, i.e. "needs restocking soon".
    pub fn needs_restock(self) -> bool {
        matches!(self, StockStatus::Low | StockStatus::Critical)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StockStatus::Normal => "normal",
            StockStatus::Low => "low",
            StockStatus::Critical => "critical",
            StockStatus::Out => "out",
        }
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Directional indicator of recent weight change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl Trend {
    /// Derive a trend from two consecutive readings.
    ///
    /// Changes within `tolerance` (inclusive) count as stable.
    pub fn from_delta(previous: f64, current: f64, tolerance: f64) -> Self {
        let delta = current - previous;
        if delta.abs() <= tolerance {
            Trend::Stable
        } else if delta > 0.0 {
            Trend::Increasing
        } else {
            Trend::Decreasing
        }
    }
}

/// Coarse fill band used to color capacity bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillLevel {
    High,
    Medium,
    Low,
}

impl FillLevel {
    /// `> 50%` high, `> 20%` medium, anything else low.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage > 50.0 {
            FillLevel::High
        } else if percentage > 20.0 {
            FillLevel::Medium
        } else {
            FillLevel::Low
        }
    }
}

/// One tracked stock-keeping unit on a physical shelf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub(crate) id: ItemId,
    pub(crate) name: String,
    pub(crate) category: String,
    pub(crate) current_weight: f64,
    pub(crate) max_weight: f64,
    pub(crate) unit: String,
    pub(crate) estimated_quantity: u32,
    pub(crate) min_threshold: f64,
    pub(crate) shelf_id: SensorId,
    pub(crate) last_updated: DateTime<Utc>,
    pub(crate) status: StockStatus,
    pub(crate) trend: Trend,
}

impl InventoryItem {
    /// Build a brand-new, empty item from validated input.
    pub(crate) fn from_new(id: ItemId, new_item: NewItem, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new_item.name,
            category: new_item.category,
            current_weight: 0.0,
            max_weight: new_item.max_weight,
            unit: new_item.unit,
            estimated_quantity: 0,
            min_threshold: new_item.min_threshold,
            shelf_id: new_item.shelf_id,
            last_updated: now,
            status: StockStatus::Out,
            trend: Trend::Stable,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn current_weight(&self) -> f64 {
        self.current_weight
    }

    pub fn max_weight(&self) -> f64 {
        self.max_weight
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn estimated_quantity(&self) -> u32 {
        self.estimated_quantity
    }

    pub fn min_threshold(&self) -> f64 {
        self.min_threshold
    }

    pub fn shelf_id(&self) -> &SensorId {
        &self.shelf_id
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    pub fn status(&self) -> StockStatus {
        self.status
    }

    pub fn trend(&self) -> Trend {
        self.trend
    }

    /// Fill level as a percentage of capacity (may exceed 100).
    ///
    /// `None` when capacity is not positive.
    pub fn fill_percentage(&self) -> Option<f64> {
        if self.max_weight > 0.0 {
            Some(self.current_weight / self.max_weight * 100.0)
        } else {
            None
        }
    }

    pub fn fill_level(&self) -> Option<FillLevel> {
        self.fill_percentage().map(FillLevel::from_percentage)
    }

    /// The field rules `NewItem::validate` enforces, plus a non-negative
    /// current weight. Used to check records that did not come through
    /// `add_item`.
    pub(crate) fn validate(&self) -> DomainResult<()> {
        ensure_not_blank("name", &self.name)?;
        ensure_not_blank("category", &self.category)?;
        ensure_not_blank("unit", &self.unit)?;
        ensure_positive("max_weight", self.max_weight)?;
        ensure_non_negative("min_threshold", self.min_threshold)?;
        ensure_non_negative("current_weight", self.current_weight)?;
        Ok(())
    }

    /// Recompute `status` from the current weight fields.
    ///
    /// Returns the previous status.
    pub(crate) fn reclassify(&mut self, low_factor: f64) -> StockStatus {
        let previous = self.status;
        self.status = StockStatus::classify(self.current_weight, self.min_threshold, low_factor);
        previous
    }
}

impl Entity for InventoryItem {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Input for creating an item. Everything else starts empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub category: String,
    pub max_weight: f64,
    pub unit: String,
    pub min_threshold: f64,
    pub shelf_id: SensorId,
}

impl NewItem {
    /// Field-level checks; shelf existence is checked by the store.
    pub fn validate(&self) -> DomainResult<()> {
        ensure_not_blank("name", &self.name)?;
        ensure_not_blank("category", &self.category)?;
        ensure_not_blank("unit", &self.unit)?;
        ensure_positive("max_weight", self.max_weight)?;
        ensure_non_negative("min_threshold", self.min_threshold)?;
        if self.shelf_id.as_str().trim().is_empty() {
            return Err(DomainError::validation("shelf_id cannot be empty"));
        }
        Ok(())
    }
}

/// Partial update merged into an existing item.
///
/// `status` is deliberately absent: it is always derived from the merged
/// weight fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub current_weight: Option<f64>,
    pub max_weight: Option<f64>,
    pub unit: Option<String>,
    pub estimated_quantity: Option<u32>,
    pub min_threshold: Option<f64>,
    pub shelf_id: Option<SensorId>,
    pub last_updated: Option<DateTime<Utc>>,
    pub trend: Option<Trend>,
}

impl ItemPatch {
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(name) = &self.name {
            ensure_not_blank("name", name)?;
        }
        if let Some(category) = &self.category {
            ensure_not_blank("category", category)?;
        }
        if let Some(unit) = &self.unit {
            ensure_not_blank("unit", unit)?;
        }
        if let Some(w) = self.current_weight {
            ensure_non_negative("current_weight", w)?;
        }
        if let Some(w) = self.max_weight {
            ensure_positive("max_weight", w)?;
        }
        if let Some(t) = self.min_threshold {
            ensure_non_negative("min_threshold", t)?;
        }
        Ok(())
    }

    /// Merge present fields into `item`. Call `validate` first.
    pub(crate) fn apply_to(self, item: &mut InventoryItem) {
        if let Some(v) = self.name {
            item.name = v;
        }
        if let Some(v) = self.category {
            item.category = v;
        }
        if let Some(v) = self.current_weight {
            item.current_weight = v;
        }
        if let Some(v) = self.max_weight {
            item.max_weight = v;
        }
        if let Some(v) = self.unit {
            item.unit = v;
        }
        if let Some(v) = self.estimated_quantity {
            item.estimated_quantity = v;
        }
        if let Some(v) = self.min_threshold {
            item.min_threshold = v;
        }
        if let Some(v) = self.shelf_id {
            item.shelf_id = v;
        }
        if let Some(v) = self.last_updated {
            item.last_updated = v;
        }
        if let Some(v) = self.trend {
            item.trend = v;
        }
    }
}

/// One reading from a shelf's weight feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightObservation {
    pub weight: f64,
    pub estimated_quantity: Option<u32>,
    pub observed_at: DateTime<Utc>,
}

impl WeightObservation {
    pub fn new(weight: f64, observed_at: DateTime<Utc>) -> Self {
        Self {
            weight,
            estimated_quantity: None,
            observed_at,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.estimated_quantity = Some(quantity);
        self
    }
}

fn ensure_not_blank(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn ensure_positive(field: &str, value: f64) -> DomainResult<()> {
    if !(value.is_finite() && value > 0.0) {
        return Err(DomainError::validation(format!(
            "{field} must be a finite positive number (got {value})"
        )));
    }
    Ok(())
}

pub(crate) fn ensure_non_negative(field: &str, value: f64) -> DomainResult<()> {
    if !(value.is_finite() && value >= 0.0) {
        return Err(DomainError::validation(format!(
            "{field} must be a finite non-negative number (got {value})"
        )));
    }
    Ok(())
}
