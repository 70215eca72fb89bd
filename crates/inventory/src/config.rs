//! Store configuration.

use serde::{Deserialize, Serialize};

use shelfwatch_core::{DomainError, DomainResult};

use crate::item::DEFAULT_LOW_FACTOR;

pub const ENV_LOW_FACTOR: &str = "SHELFWATCH_LOW_FACTOR";
pub const ENV_TREND_TOLERANCE: &str = "SHELFWATCH_TREND_TOLERANCE";
pub const ENV_AUTO_ALERTS: &str = "SHELFWATCH_AUTO_ALERTS";

/// Tunables for classification, trend derivation and alert synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Upper edge of the `Low` band as a multiple of `min_threshold`.
    pub low_factor: f64,
    /// Weight changes up to this magnitude keep the trend `Stable`.
    pub trend_tolerance: f64,
    /// Raise alerts when an item's status worsens.
    pub auto_alerts: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            low_factor: DEFAULT_LOW_FACTOR,
            trend_tolerance: 0.05,
            auto_alerts: true,
        }
    }
}

impl StoreConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    ///
    /// Unparsable or out-of-range values fall back to the default for that
    /// field (with a warning) rather than failing startup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let low_factor = parse_or(&lookup, ENV_LOW_FACTOR, defaults.low_factor, |v: &f64| {
            v.is_finite() && *v >= 1.0
        });
        let trend_tolerance =
            parse_or(&lookup, ENV_TREND_TOLERANCE, defaults.trend_tolerance, |v: &f64| {
                v.is_finite() && *v >= 0.0
            });
        let auto_alerts = match lookup(ENV_AUTO_ALERTS) {
            None => defaults.auto_alerts,
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    tracing::warn!(key = ENV_AUTO_ALERTS, value = %raw, "invalid boolean; using default");
                    defaults.auto_alerts
                }
            },
        };

        Self {
            low_factor,
            trend_tolerance,
            auto_alerts,
        }
    }

    pub fn with_low_factor(mut self, low_factor: f64) -> Self {
        self.low_factor = low_factor;
        self
    }

    pub fn with_trend_tolerance(mut self, trend_tolerance: f64) -> Self {
        self.trend_tolerance = trend_tolerance;
        self
    }

    pub fn with_auto_alerts(mut self, auto_alerts: bool) -> Self {
        self.auto_alerts = auto_alerts;
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        if !(self.low_factor.is_finite() && self.low_factor >= 1.0) {
            return Err(DomainError::validation(
                "low_factor must be a finite number >= 1",
            ));
        }
        if !(self.trend_tolerance.is_finite() && self.trend_tolerance >= 0.0) {
            return Err(DomainError::validation(
                "trend_tolerance must be a finite non-negative number",
            ));
        }
        Ok(())
    }
}

fn parse_or<T, F>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T, accept: F) -> T
where
    T: core::str::FromStr + Copy,
    F: Fn(&T) -> bool,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(v) if accept(&v) => v,
        _ => {
            tracing::warn!(key, value = %raw, "invalid config value; using default");
            default
        }
    }
}
