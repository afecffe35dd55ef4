//! Breakout channel — rolling highest/lowest price over trailing windows.
//!
//! The upper and lower bands keep independent window lengths (e.g. 55-bar
//! high, 20-bar low). Each band stores the last W prices and recomputes its
//! extremum after every insertion.

use crate::config::ChannelSource;
use crate::domain::Bar;
use std::collections::VecDeque;

/// Which band of the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelBand {
    Upper,
    Lower,
}

/// Fixed-size window over one price series.
#[derive(Debug, Clone)]
pub struct RollingBand {
    band: ChannelBand,
    window: usize,
    values: VecDeque<f64>,
    extreme: f64,
}

impl RollingBand {
    pub fn new(band: ChannelBand, window: usize) -> Self {
        assert!(window >= 1, "channel window must be >= 1");
        Self {
            band,
            window,
            values: VecDeque::with_capacity(window),
            extreme: f64::NAN,
        }
    }

    pub fn push(&mut self, value: f64) {
        if self.values.len() == self.window {
            self.values.pop_front();
        }
        self.values.push_back(value);
        let values = self.values.iter().copied();
        self.extreme = match self.band {
            ChannelBand::Upper => values.fold(f64::NEG_INFINITY, f64::max),
            ChannelBand::Lower => values.fold(f64::INFINITY, f64::min),
        };
    }

    /// Extremum over the window, or None until W values are held.
    pub fn value(&self) -> Option<f64> {
        self.is_ready().then_some(self.extreme)
    }

    pub fn is_ready(&self) -> bool {
        self.values.len() == self.window
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

/// Channel levels read by the signal evaluator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelLevels {
    pub max: f64,
    pub min: f64,
}

#[derive(Debug, Clone)]
pub struct BreakoutChannel {
    upper: RollingBand,
    lower: RollingBand,
    source: ChannelSource,
}

impl BreakoutChannel {
    pub fn new(entry_window: usize, exit_window: usize, source: ChannelSource) -> Self {
        Self {
            upper: RollingBand::new(ChannelBand::Upper, entry_window),
            lower: RollingBand::new(ChannelBand::Lower, exit_window),
            source,
        }
    }

    /// Insert a bar and return the levels over the windows ending at it.
    pub fn update(&mut self, bar: &Bar) -> Option<ChannelLevels> {
        let (hi, lo) = match self.source {
            ChannelSource::HighLow => (bar.high, bar.low),
            ChannelSource::Close => (bar.close, bar.close),
        };
        self.upper.push(hi);
        self.lower.push(lo);
        self.levels()
    }

    /// Current levels; None until both windows are full.
    pub fn levels(&self) -> Option<ChannelLevels> {
        Some(ChannelLevels {
            max: self.upper.value()?,
            min: self.lower.value()?,
        })
    }

    pub fn is_ready(&self) -> bool {
        self.upper.is_ready() && self.lower.is_ready()
    }
}
