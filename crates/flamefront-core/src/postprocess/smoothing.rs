/// Trailing moving average with a fixed window.
///
/// Entry `i` averages `values[i + 1 - window ..= i]`; the first `window - 1`
/// entries are `None`. A zero window yields all `None`.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 {
        return out;
    }

    let mut sum = 0.0;
    for (i, &v) in values.iter().enumerate() {
        sum += v;
        if i >= window {
            sum -= values[i - window];
        }
        if i + 1 >= window {
            out[i] = Some(sum / window as f64);
        }
    }
    out
}

/// Discrete derivative `dv/dt` between consecutive samples.
///
/// Entry 0 is `None`, as is any entry whose neighbour is missing or whose
/// time step is zero.
pub fn derivative(values: &[Option<f64>], seconds: &[f64]) -> Vec<Option<f64>> {
    let n = values.len().min(seconds.len());
    let mut out = vec![None; values.len()];

    for i in 1..n {
        if let (Some(v1), Some(v0)) = (values[i], values[i - 1]) {
            let dt = seconds[i] - seconds[i - 1];
            if dt != 0.0 {
                out[i] = Some((v1 - v0) / dt);
            }
        }
    }
    out
}
