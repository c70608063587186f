pub mod hsv;
pub mod lookup;

pub use hsv::{rgb_to_hsv, ColorMapper, ColorStrategy};
pub use lookup::HsvLookup;
