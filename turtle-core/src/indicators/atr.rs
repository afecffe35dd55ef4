//! Volatility tracker — smoothed true range ("N").
//!
//! N_t = ((period - 1) * N_{t-1} + TR_t) / period, seeded with N_0 = TR_0.
//! N is reported only once `period` bars have been observed.

use crate::config::TrueRangeMode;
use crate::domain::Bar;

/// True range of one bar given the previous close (if any).
///
/// Without a previous close only the intrabar terms apply.
pub fn true_range(bar: &Bar, prev_close: Option<f64>, mode: TrueRangeMode) -> f64 {
    let (h, l, o) = (bar.high, bar.low, bar.open);
    let mut tr = h - l;
    match mode {
        TrueRangeMode::Extended => {
            tr = tr.max(h - o).max(o - l);
            if let Some(pc) = prev_close {
                tr = tr.max(h - pc).max(pc - l);
            }
        }
        TrueRangeMode::Classic => {
            if let Some(pc) = prev_close {
                tr = tr.max((h - pc).abs()).max((l - pc).abs());
            }
        }
    }
    tr
}

#[derive(Debug, Clone)]
pub struct VolatilityTracker {
    period: usize,
    mode: TrueRangeMode,
    prev_close: Option<f64>,
    n: f64,
    samples: usize,
}

impl VolatilityTracker {
    pub fn new(period: usize, mode: TrueRangeMode) -> Self {
        assert!(period >= 1, "ATR period must be >= 1");
        Self {
            period,
            mode,
            prev_close: None,
            n: 0.0,
            samples: 0,
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Feed one bar. Returns N once warm.
    pub fn update(&mut self, bar: &Bar) -> Option<f64> {
        let tr = true_range(bar, self.prev_close, self.mode);
        self.n = if self.samples == 0 {
            tr
        } else {
            let p = self.period as f64;
            ((p - 1.0) * self.n + tr) / p
        };
        self.prev_close = Some(bar.close);
        self.samples += 1;
        self.n()
    }

    /// Smoothed N, or None during warm-up.
    pub fn n(&self) -> Option<f64> {
        self.is_ready().then_some(self.n)
    }

    pub fn is_ready(&self) -> bool {
        self.samples >= self.period
    }

    pub fn samples(&self) -> usize {
        self.samples
    }
}
