use serde::{Deserialize, Serialize};

use crate::detection::{BoundingBox, FlameTip};

/// Numeric measurements kept for one frame of a batch run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSample {
    /// Leading edge: largest flame column in the primary crop.
    pub highest_column: usize,
    /// Trailing edge: smallest flame column in the primary crop.
    pub lowest_column: usize,
    /// Flame bounding box in secondary-crop coordinates.
    pub bounding_box: BoundingBox,
    /// Flame tip in secondary-crop coordinates.
    pub flame_tip: FlameTip,
}

impl FrameSample {
    /// Value recorded for an empty mask or a frame that could not be analyzed.
    pub const EMPTY: FrameSample = FrameSample {
        highest_column: 0,
        lowest_column: 0,
        bounding_box: BoundingBox::EMPTY,
        flame_tip: FlameTip::EMPTY,
    };
}

/// Per-frame samples of one run. Slot `i` holds frame `i` of the source.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    samples: Vec<FrameSample>,
}

impl TimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    /// Rebuild a series from leading-edge values alone (e.g. a raw export);
    /// companion measurements are left at their sentinels.
    pub fn from_highest_columns(values: &[usize]) -> Self {
        Self {
            samples: values
                .iter()
                .map(|&highest_column| FrameSample {
                    highest_column,
                    ..FrameSample::EMPTY
                })
                .collect(),
        }
    }

    pub(crate) fn push(&mut self, sample: FrameSample) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[FrameSample] {
        &self.samples
    }

    pub fn get(&self, index: usize) -> Option<&FrameSample> {
        self.samples.get(index)
    }

    pub fn highest_columns(&self) -> Vec<usize> {
        self.samples.iter().map(|s| s.highest_column).collect()
    }
}

impl FromIterator<FrameSample> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = FrameSample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}
