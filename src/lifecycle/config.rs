//! Runtime configuration, read from the environment.
//!
//! Every setting has a default. A missing variable is logged at `info`, an
//! unparsable one at `warn`, and both fall back to the default.

use crate::model::default_stages;
use crate::order_actor::StageTiming;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

pub const STORE_DIR_VAR: &str = "CALZADITA_STORE_DIR";
pub const STEP_MS_VAR: &str = "CALZADITA_STEP_MS";
pub const FINAL_MS_VAR: &str = "CALZADITA_FINAL_MS";
pub const VENDOR_PHONE_VAR: &str = "CALZADITA_VENDOR_PHONE";

#[derive(Debug, Clone, PartialEq)]
pub struct OrderingConfig {
    /// Directory holding the saved phone files.
    pub store_dir: PathBuf,
    pub timing: StageTiming,
    /// Labels of the fulfillment stages, in order.
    pub stages: Vec<String>,
    /// Vendor number for the handoff link. No link is built without it.
    pub vendor_phone: Option<String>,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from(".calzadita"),
            timing: StageTiming::default(),
            stages: default_stages(),
            vendor_phone: None,
        }
    }
}

impl OrderingConfig {
    pub fn load() -> Self {
        Self::load_from(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let step_ms = try_load(&lookup, STEP_MS_VAR, millis(defaults.timing.step_dwell));
        let final_ms = try_load(&lookup, FINAL_MS_VAR, millis(defaults.timing.final_dwell));

        Self {
            store_dir: try_load(&lookup, STORE_DIR_VAR, defaults.store_dir.display().to_string())
                .into(),
            timing: StageTiming {
                step_dwell: Duration::from_millis(step_ms),
                final_dwell: Duration::from_millis(final_ms),
            },
            stages: defaults.stages,
            vendor_phone: lookup(VENDOR_PHONE_VAR).filter(|v| !v.trim().is_empty()),
        }
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        info!("{key} not set, using default: {default}");
        return default;
    };
    raw.trim().parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
        default
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> OrderingConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        OrderingConfig::load_from(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(load(&[]), OrderingConfig::default());
    }

    #[test]
    fn test_values_are_read() {
        let config = load(&[
            (STORE_DIR_VAR, "/tmp/phones"),
            (STEP_MS_VAR, "10"),
            (FINAL_MS_VAR, " 20 "),
            (VENDOR_PHONE_VAR, "524435550000"),
        ]);
        assert_eq!(config.store_dir, PathBuf::from("/tmp/phones"));
        assert_eq!(config.timing.step_dwell, Duration::from_millis(10));
        assert_eq!(config.timing.final_dwell, Duration::from_millis(20));
        assert_eq!(config.vendor_phone.as_deref(), Some("524435550000"));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = load(&[(STEP_MS_VAR, "fast"), (FINAL_MS_VAR, "-1"), (VENDOR_PHONE_VAR, " ")]);
        assert_eq!(config.timing, StageTiming::default());
        assert!(config.vendor_phone.is_none());
    }
}
