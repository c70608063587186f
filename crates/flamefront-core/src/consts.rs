/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Number of channels in an RGB frame.
pub const COLOR_CHANNEL_COUNT: usize = 3;

/// Number of entries in the RGB -> HSV lookup table (256^3).
pub const HSV_LOOKUP_ENTRIES: usize = 1 << 24;

/// Iso-level used when tracing mask contours.
pub const DEFAULT_CONTOUR_LEVEL: f32 = 0.8;

/// Trailing moving-average window applied to the leading-edge series, in frames.
pub const DEFAULT_SMOOTHING_WINDOW: usize = 100;

/// Results table written by the post-processor.
pub const RESULTS_CSV_NAME: &str = "highestXPos.csv";

/// Two-panel position/speed plot written by the plot process.
pub const RESULTS_PLOT_NAME: &str = "highestXPos.png";

/// Structured run metadata.
pub const METADATA_NAME: &str = "metadata.json";

/// Raw leading-edge series, one value per line, written after a batch run.
pub const RAW_SERIES_NAME: &str = "highestXPos.txt";

/// Plot canvas size in pixels (width, height).
pub const PLOT_SIZE: (u32, u32) = (1000, 1000);

/// Margin between the canvas border and each plot panel, in pixels.
pub const PLOT_MARGIN: u32 = 60;

/// Image file extensions recognized when reading an image sequence directory.
pub const IMAGE_SEQUENCE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff"];

/// Tool version recorded in exported metadata.
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");
