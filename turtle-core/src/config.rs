//! Engine configuration.
//!
//! Every process-wide constant (cash, risk fraction, lookback windows, caps)
//! and every selectable policy lives here. The config is immutable once
//! handed to the engine; an empty TOML document yields the defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// How true range is measured for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrueRangeMode {
    /// max(high-low, high-prev_close, prev_close-low, high-open, open-low)
    Extended,
    /// max(high-low, |high-prev_close|, |low-prev_close|)
    Classic,
}

/// Which prices feed the breakout channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelSource {
    /// Max of highs, min of lows.
    HighLow,
    /// Max and min of closes.
    Close,
}

/// Which bar price becomes the limit price of an entry/add order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitPriceSource {
    High,
    Low,
    Close,
}

/// What a `PartiallyFilled` event does to instrument state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartialFillPolicy {
    /// Log a warning and leave state untouched.
    Ignore,
    /// Apply the partial quantity and price; the order stays open.
    Track,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurtleConfig {
    /// Account cash used for unit sizing. Fixed for the engine's lifetime.
    pub total_cash: f64,
    /// Fraction of cash risked per unit per N of adverse move.
    pub risk_fraction: f64,
    /// Smoothing period for N.
    pub atr_period: usize,
    /// Window of the entry (max) channel.
    pub entry_window: usize,
    /// Window of the exit (min) channel.
    pub exit_window: usize,
    /// Maximum number of units held per instrument.
    pub position_cap: u32,
    /// Per-instrument notional cap; `floor(notional_cap / high)` bounds shares held.
    pub notional_cap: f64,
    /// Force-quit when the last fill is this many N above the current high.
    pub stop_multiple: f64,
    /// Add a unit when the low clears the last fill by this many N.
    pub add_step: f64,
    pub true_range: TrueRangeMode,
    pub channel_source: ChannelSource,
    pub limit_price: LimitPriceSource,
    pub partial_fills: PartialFillPolicy,
    /// Reset an instrument when a bar arrives from a new UTC date. Off by
    /// default: the host scheduler calls `start_session`.
    pub auto_session_reset: bool,
}

impl Default for TurtleConfig {
    fn default() -> Self {
        Self {
            total_cash: 100_000.0,
            risk_fraction: 0.01,
            atr_period: 20,
            entry_window: 55,
            exit_window: 20,
            position_cap: 4,
            notional_cap: 50_000.0,
            stop_multiple: 2.0,
            add_step: 0.5,
            true_range: TrueRangeMode::Extended,
            channel_source: ChannelSource::HighLow,
            limit_price: LimitPriceSource::High,
            partial_fills: PartialFillPolicy::Ignore,
            auto_session_reset: false,
        }
    }
}

impl TurtleConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: TurtleConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Longest number of bars before decisions can be made.
    pub fn warmup_bars(&self) -> usize {
        self.atr_period
            .max(self.entry_window + 1)
            .max(self.exit_window + 1)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("total_cash", self.total_cash)?;
        positive("notional_cap", self.notional_cap)?;
        positive("stop_multiple", self.stop_multiple)?;
        if !(self.risk_fraction > 0.0 && self.risk_fraction <= 1.0) {
            return Err(invalid("risk_fraction", format!("{} is outside (0, 1]", self.risk_fraction)));
        }
        if !self.add_step.is_finite() || self.add_step < 0.0 {
            return Err(invalid("add_step", format!("{} must be finite and >= 0", self.add_step)));
        }
        nonzero("atr_period", self.atr_period)?;
        nonzero("entry_window", self.entry_window)?;
        nonzero("exit_window", self.exit_window)?;
        if self.position_cap == 0 {
            return Err(invalid("position_cap", "must be >= 1".into()));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must be finite and > 0")))
    }
}

fn nonzero(field: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        Err(invalid(field, "must be >= 1".into()))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = TurtleConfig::from_toml_str("").unwrap();
        assert_eq!(config, TurtleConfig::default());
    }

    #[test]
    fn overrides_and_enums_parse() {
        let config = TurtleConfig::from_toml_str(
            r#"
            total_cash = 250000.0
            atr_period = 1
            entry_window = 20
            true_range = "classic"
            channel_source = "close"
            limit_price = "low"
            partial_fills = "track"
            "#,
        )
        .unwrap();
        assert_eq!(config.total_cash, 250_000.0);
        assert_eq!(config.atr_period, 1);
        assert_eq!(config.entry_window, 20);
        assert_eq!(config.exit_window, 20);
        assert_eq!(config.true_range, TrueRangeMode::Classic);
        assert_eq!(config.channel_source, ChannelSource::Close);
        assert_eq!(config.limit_price, LimitPriceSource::Low);
        assert_eq!(config.partial_fills, PartialFillPolicy::Track);
    }

    #[test]
    fn rejects_zero_window() {
        let err = TurtleConfig::from_toml_str("exit_window = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "exit_window", .. }));
    }

    #[test]
    fn rejects_bad_risk_fraction() {
        let config = TurtleConfig {
            risk_fraction: 1.5,
            ..TurtleConfig::default()
        };
        assert!(config.validate().is_err());
        let config = TurtleConfig {
            risk_fraction: 0.0,
            ..TurtleConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_non_finite_cash() {
        let config = TurtleConfig {
            total_cash: f64::NAN,
            ..TurtleConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "total_cash", .. })
        ));
    }

    #[test]
    fn rejects_unknown_enum_variant() {
        let err = TurtleConfig::from_toml_str("limit_price = \"open\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("turtle.toml");
        std::fs::write(&path, "position_cap = 2\n").unwrap();
        let config = TurtleConfig::load(&path).unwrap();
        assert_eq!(config.position_cap, 2);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = TurtleConfig::load("/nonexistent/turtle.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn warmup_covers_channels_and_atr() {
        let config = TurtleConfig::default();
        assert_eq!(config.warmup_bars(), 56);
    }
}
