pub mod config;
pub mod contours;
pub mod region;
pub mod threshold;

pub use config::{HsvRange, HsvThresholds};
pub use contours::{contours, highest_contour_column, Contour};
pub use region::{
    bounding_box, flame_tip, highest_column, lowest_column, topmost_row, BoundingBox, FlameTip,
};
pub use threshold::{mask_area, segment};
