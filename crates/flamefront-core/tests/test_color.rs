use approx::assert_abs_diff_eq;
use ndarray::Array3;

use flamefront_core::color::{rgb_to_hsv, ColorMapper, ColorStrategy, HsvLookup};

#[test]
fn test_primary_colors() {
    assert_eq!(rgb_to_hsv(255, 0, 0), [0.0, 1.0, 1.0]);
    let green = rgb_to_hsv(0, 255, 0);
    assert_abs_diff_eq!(green[0], 120.0 / 360.0, epsilon = 1e-6);
    let blue = rgb_to_hsv(0, 0, 255);
    assert_abs_diff_eq!(blue[0], 240.0 / 360.0, epsilon = 1e-6);
}

#[test]
fn test_black_and_grey_have_zero_hue_and_saturation() {
    assert_eq!(rgb_to_hsv(0, 0, 0), [0.0, 0.0, 0.0]);
    let grey = rgb_to_hsv(128, 128, 128);
    assert_eq!(grey[0], 0.0);
    assert_eq!(grey[1], 0.0);
    assert_abs_diff_eq!(grey[2], 128.0 / 255.0, epsilon = 1e-6);
}

#[test]
fn test_magenta_hue_wraps_positive() {
    let hsv = rgb_to_hsv(255, 0, 255);
    assert_abs_diff_eq!(hsv[0], 300.0 / 360.0, epsilon = 1e-6);
}

#[test]
fn test_all_channels_in_unit_range() {
    for r in (0..=255u16).step_by(17) {
        for g in (0..=255u16).step_by(17) {
            for b in (0..=255u16).step_by(17) {
                let hsv = rgb_to_hsv(r as u8, g as u8, b as u8);
                for v in hsv {
                    assert!((0.0..=1.0).contains(&v), "({r},{g},{b}) -> {hsv:?}");
                }
            }
        }
    }
}

#[test]
fn test_lookup_matches_direct_formula() {
    let lookup = HsvLookup::shared();
    assert_eq!(lookup.len(), 1 << 24);

    let tol = 1.0 / 255.0;
    for r in (0..=255u16).step_by(5) {
        for g in (0..=255u16).step_by(7) {
            for b in (0..=255u16).step_by(11) {
                let (r, g, b) = (r as u8, g as u8, b as u8);
                let direct = rgb_to_hsv(r, g, b);
                let table = lookup.get(r, g, b);
                for ch in 0..3 {
                    assert!(
                        (direct[ch] - table[ch]).abs() <= tol,
                        "({r},{g},{b}) channel {ch}: {} vs {}",
                        direct[ch],
                        table[ch]
                    );
                }
            }
        }
    }
}

#[test]
fn test_mapper_strategies_agree_on_frame() {
    let frame = Array3::from_shape_fn((6, 9, 3), |(r, c, ch)| {
        ((r * 41 + c * 23 + ch * 97) % 256) as u8
    });

    let direct = ColorMapper::from_strategy(ColorStrategy::Direct).to_hsv(frame.view());
    let lookup = ColorMapper::from_strategy(ColorStrategy::Lookup).to_hsv(frame.view());

    assert_eq!(direct.dim(), (6, 9, 3));
    assert_eq!(lookup.dim(), (6, 9, 3));
    for (a, b) in direct.iter().zip(lookup.iter()) {
        assert_abs_diff_eq!(*a, *b, epsilon = 1.0 / 255.0);
    }
}

#[test]
fn test_mapper_reports_strategy() {
    assert_eq!(
        ColorMapper::from_strategy(ColorStrategy::Direct).strategy(),
        ColorStrategy::Direct
    );
    assert_eq!(
        ColorMapper::from_strategy(ColorStrategy::Lookup).strategy(),
        ColorStrategy::Lookup
    );
}

#[test]
fn test_large_frame_uses_same_values_as_pixel() {
    // Above the parallel threshold.
    let frame = Array3::from_shape_fn((300, 300, 3), |(r, c, ch)| {
        ((r + 2 * c + 3 * ch) % 256) as u8
    });
    let mapper = ColorMapper::from_strategy(ColorStrategy::Direct);
    let hsv = mapper.to_hsv(frame.view());

    for &(r, c) in &[(0, 0), (150, 77), (299, 299)] {
        let expected = rgb_to_hsv(frame[[r, c, 0]], frame[[r, c, 1]], frame[[r, c, 2]]);
        for ch in 0..3 {
            assert_eq!(hsv[[r, c, ch]], expected[ch]);
        }
    }
}
