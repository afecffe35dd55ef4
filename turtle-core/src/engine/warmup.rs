//! Per-instrument warm-up countdown.

use crate::config::TurtleConfig;

/// Counts bars until both N and the lagged channels can be read.
///
/// N needs `atr_period` bars including the current one. A decision reads the
/// channel over the bars before the current one, so each channel needs its
/// window plus one.
#[derive(Debug, Clone)]
pub struct WarmupState {
    volatility_bars: usize,
    channel_bars: usize,
    seen: usize,
}

impl WarmupState {
    pub fn from_config(config: &TurtleConfig) -> Self {
        Self {
            volatility_bars: config.atr_period,
            channel_bars: config.entry_window.max(config.exit_window) + 1,
            seen: 0,
        }
    }

    pub fn observe(&mut self) {
        self.seen += 1;
    }

    pub fn is_warm(&self) -> bool {
        self.seen >= self.required()
    }

    pub fn required(&self) -> usize {
        self.volatility_bars.max(self.channel_bars)
    }

    pub fn bars_seen(&self) -> usize {
        self.seen
    }

    pub fn remaining(&self) -> usize {
        self.required().saturating_sub(self.seen)
    }

    /// The component still warming up with the longest wait.
    pub fn pending(&self) -> Option<&'static str> {
        if self.is_warm() {
            None
        } else if self.channel_bars >= self.volatility_bars {
            Some("channel")
        } else {
            Some("volatility")
        }
    }
}
