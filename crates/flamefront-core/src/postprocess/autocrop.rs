use std::ops::Range;

/// Index range of the analytically valid part of a leading-edge series.
///
/// Starts at the first strictly positive value and stops just before the
/// (first) global maximum: `[first_positive, argmax)`. Returns an empty range
/// when no value is positive or when the first positive value is the maximum.
pub fn auto_crop_range(values: &[usize]) -> Range<usize> {
    let Some(first_positive) = values.iter().position(|&v| v > 0) else {
        return 0..0;
    };

    let mut max_index = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[max_index] {
            max_index = i;
        }
    }

    first_positive..max_index.max(first_positive)
}
