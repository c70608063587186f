use serde::{Deserialize, Serialize};

use crate::error::{FlameError, Result};

/// Inclusive `[min, max]` bound on one HSV channel, both ends in [0.0, 1.0].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct HsvRange {
    pub min: f32,
    pub max: f32,
}

impl HsvRange {
    pub const FULL: HsvRange = HsvRange { min: 0.0, max: 1.0 };

    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp both ends into [0, 1] and reject inverted or non-finite bounds.
    pub fn validated(&self, channel: &str) -> Result<HsvRange> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(FlameError::InvalidConfig(format!(
                "{channel} range must be finite, got [{}, {}]",
                self.min, self.max
            )));
        }
        let min = self.min.clamp(0.0, 1.0);
        let max = self.max.clamp(0.0, 1.0);
        if min > max {
            return Err(FlameError::InvalidConfig(format!(
                "{channel} range min {min} exceeds max {max}"
            )));
        }
        Ok(HsvRange { min, max })
    }
}

impl From<[f32; 2]> for HsvRange {
    fn from(pair: [f32; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

impl From<HsvRange> for [f32; 2] {
    fn from(range: HsvRange) -> Self {
        [range.min, range.max]
    }
}

/// Per-channel bounds a pixel must satisfy simultaneously to be flame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HsvThresholds {
    pub h: HsvRange,
    pub s: HsvRange,
    pub v: HsvRange,
}

impl HsvThresholds {
    pub fn new(h: HsvRange, s: HsvRange, v: HsvRange) -> Self {
        Self { h, s, v }
    }

    #[inline]
    pub fn contains(&self, hue: f32, sat: f32, val: f32) -> bool {
        self.h.contains(hue) && self.s.contains(sat) && self.v.contains(val)
    }

    pub fn validated(&self) -> Result<HsvThresholds> {
        Ok(HsvThresholds {
            h: self.h.validated("h")?,
            s: self.s.validated("s")?,
            v: self.v.validated("v")?,
        })
    }
}

impl Default for HsvThresholds {
    /// Bright, saturated red-to-yellow hues.
    fn default() -> Self {
        Self {
            h: HsvRange::new(0.0, 0.17),
            s: HsvRange::new(0.3, 1.0),
            v: HsvRange::new(0.5, 1.0),
        }
    }
}
