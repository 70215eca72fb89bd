use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shelfwatch_core::{Entity, SensorId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorStatus {
    Online,
    Offline,
    Error,
}

/// Battery display band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatteryBand {
    Full,
    Medium,
    Low,
}

impl BatteryBand {
    /// `> 75` full, `> 40` medium, anything else low.
    pub fn from_level(level: u8) -> Self {
        if level > 75 {
            BatteryBand::Full
        } else if level > 40 {
            BatteryBand::Medium
        } else {
            BatteryBand::Low
        }
    }
}

/// A physical weight-sensing shelf. Reference data: the store never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelfSensor {
    id: SensorId,
    location: String,
    status: SensorStatus,
    battery_level: u8,
    last_sync: DateTime<Utc>,
}

impl ShelfSensor {
    /// Battery level is clamped to 0..=100.
    pub fn new(
        id: SensorId,
        location: impl Into<String>,
        status: SensorStatus,
        battery_level: u8,
        last_sync: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            location: location.into(),
            status,
            battery_level: battery_level.min(100),
            last_sync,
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn status(&self) -> SensorStatus {
        self.status
    }

    pub fn is_online(&self) -> bool {
        self.status == SensorStatus::Online
    }

    pub fn battery_level(&self) -> u8 {
        self.battery_level
    }

    pub fn battery_band(&self) -> BatteryBand {
        BatteryBand::from_level(self.battery_level)
    }

    pub fn last_sync(&self) -> DateTime<Utc> {
        self.last_sync
    }
}

impl Entity for ShelfSensor {
    type Id = SensorId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
