use serde::{Deserialize, Serialize};

/// Summary of a column that may contain missing values.
///
/// Missing entries are ignored. Fields are `None` when too few values remain
/// (`std` needs at least two).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeedStatistics {
    pub count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    /// Sample standard deviation (n - 1 denominator).
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

pub fn summarize(values: &[Option<f64>]) -> SpeedStatistics {
    let mut present: Vec<f64> = values
        .iter()
        .flatten()
        .copied()
        .filter(|v| v.is_finite())
        .collect();
    let n = present.len();
    if n == 0 {
        return SpeedStatistics::default();
    }

    present.sort_unstable_by(|a, b| a.total_cmp(b));
    let mean = present.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 1 {
        present[n / 2]
    } else {
        (present[n / 2 - 1] + present[n / 2]) * 0.5
    };
    let std = (n > 1).then(|| {
        let var = present.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        var.sqrt()
    });

    SpeedStatistics {
        count: n,
        mean: Some(mean),
        median: Some(median),
        std,
        min: present.first().copied(),
        max: present.last().copied(),
    }
}
