use crate::geo::math::Point;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tracking: TrackingConfig,

    #[serde(default)]
    pub checkout: CheckoutConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingConfig {
    #[serde(default = "default_journey_ms")]
    pub journey_ms: u64,

    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    #[serde(default = "default_restaurant")]
    pub restaurant: Point,

    #[serde(default = "default_customer")]
    pub customer: Point,

    #[serde(default = "default_stage_interval_ms")]
    pub stage_interval_ms: u64,

    #[serde(default = "default_eta_tick_ms")]
    pub eta_tick_ms: u64,

    #[serde(default = "default_eta_start")]
    pub eta_start: u8,

    #[serde(default = "default_eta_step")]
    pub eta_step: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutConfig {
    #[serde(default = "default_delivery_fee")]
    pub delivery_fee: f64,

    #[serde(default = "default_tip_options")]
    pub tip_options: Vec<u8>,

    #[serde(default = "default_tip")]
    pub default_tip: u8,

    #[serde(default = "default_submit_delay_ms")]
    pub submit_delay_ms: u64,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            journey_ms: default_journey_ms(),
            tick_ms: default_tick_ms(),
            restaurant: default_restaurant(),
            customer: default_customer(),
            stage_interval_ms: default_stage_interval_ms(),
            eta_tick_ms: default_eta_tick_ms(),
            eta_start: default_eta_start(),
            eta_step: default_eta_step(),
        }
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            delivery_fee: default_delivery_fee(),
            tip_options: default_tip_options(),
            default_tip: default_tip(),
            submit_delay_ms: default_submit_delay_ms(),
        }
    }
}

fn default_journey_ms() -> u64 {
    20_000
}

fn default_tick_ms() -> u64 {
    100
}

fn default_restaurant() -> Point {
    Point::new(15.0, 15.0)
}

fn default_customer() -> Point {
    Point::new(80.0, 85.0)
}

fn default_stage_interval_ms() -> u64 {
    8_000
}

fn default_eta_tick_ms() -> u64 {
    1_000
}

fn default_eta_start() -> u8 {
    10
}

fn default_eta_step() -> u8 {
    4
}

fn default_delivery_fee() -> f64 {
    5.0
}

fn default_tip_options() -> Vec<u8> {
    vec![15, 20, 25]
}

fn default_tip() -> u8 {
    15
}

fn default_submit_delay_ms() -> u64 {
    1_500
}

impl TrackingConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    pub fn stage_interval(&self) -> Duration {
        Duration::from_millis(self.stage_interval_ms.max(1))
    }

    pub fn eta_interval(&self) -> Duration {
        Duration::from_millis(self.eta_tick_ms.max(1))
    }

    /// Number of rider ticks in one journey.
    pub fn total_steps(&self) -> u32 {
        let steps = self.journey_ms / self.tick_ms.max(1);
        u32::try_from(steps).unwrap_or(u32::MAX)
    }
}

impl CheckoutConfig {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join("dishdash").join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            Self::parse(&contents)
        } else {
            Ok(Config::default())
        }
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.tracking.journey_ms, 20_000);
        assert_eq!(config.tracking.total_steps(), 200);
        assert_eq!(config.tracking.customer, Point::new(80.0, 85.0));
        assert_eq!(config.checkout.tip_options, vec![15, 20, 25]);
        assert_eq!(config.checkout.submit_delay(), Duration::from_millis(1_500));
    }

    #[test]
    fn partial_tables_keep_remaining_defaults() {
        let config = Config::parse(
            r#"
            [tracking]
            journey_ms = 1000
            restaurant = { top = 5.0, left = 10.0 }

            [checkout]
            delivery_fee = 2.5
            "#,
        )
        .unwrap();
        assert_eq!(config.tracking.total_steps(), 10);
        assert_eq!(config.tracking.restaurant, Point::new(5.0, 10.0));
        assert_eq!(config.tracking.stage_interval_ms, 8_000);
        assert_eq!(config.checkout.delivery_fee, 2.5);
        assert_eq!(config.checkout.default_tip, 15);
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(Config::parse("[tracking]\njourney_ms = \"soon\"").is_err());
    }
}
