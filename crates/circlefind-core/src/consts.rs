/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;

/// Default input directory for batch runs.
pub const DEFAULT_IMAGE_DIR: &str = "images";

/// Default output directory for batch runs.
pub const DEFAULT_OUTPUT_DIR: &str = "tests";

/// Default (requested) Gaussian blur kernel size.
pub const DEFAULT_BLUR_KSIZE: u32 = 11;

/// Default low hysteresis threshold for Canny, on the 8-bit gradient scale.
pub const DEFAULT_CANNY_THRESHOLD1: f32 = 25.0;

/// Default high hysteresis threshold for Canny, on the 8-bit gradient scale.
pub const DEFAULT_CANNY_THRESHOLD2: f32 = 150.0;

/// Default smallest radius tested by the Hough search.
pub const DEFAULT_MIN_RADIUS: u32 = 100;

/// Default radius bound; the sweep stops strictly below it.
pub const DEFAULT_MAX_RADIUS: u32 = 200;

/// Default spacing between tested radii.
pub const DEFAULT_RADIUS_STEP: u32 = 2;

/// Default acceptance threshold as a fraction of the strongest vote.
pub const DEFAULT_HOUGH_THRESHOLD_FACTOR: f32 = 0.45;

/// Default minimum x separation between accepted circle centres.
pub const DEFAULT_MIN_XDISTANCE: u32 = 40;

/// Default minimum y separation between accepted circle centres.
pub const DEFAULT_MIN_YDISTANCE: u32 = 40;

/// Default JPEG quality for output figures.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Extension of every written figure.
pub const OUTPUT_EXTENSION: &str = "jpeg";

/// Circle outline colour (green).
pub const OUTLINE_COLOR: [u8; 3] = [0, 255, 0];

/// Circle outline thickness in pixels.
pub const OUTLINE_THICKNESS: i32 = 3;

/// Centre marker colour (yellow).
pub const CENTER_MARKER_COLOR: [u8; 3] = [255, 255, 0];

/// Radius of the filled centre marker in pixels.
pub const CENTER_MARKER_RADIUS: i32 = 12;

/// Figure background (dark turquoise).
pub const FIGURE_BACKGROUND: [u8; 3] = [0, 206, 209];

/// Panel title colour.
pub const TITLE_COLOR: [u8; 3] = [0, 0, 0];

/// Largest figure width written; wider figures are scaled down as a whole.
pub const MAX_FIGURE_WIDTH: u32 = 6000;

/// Largest figure height written.
pub const MAX_FIGURE_HEIGHT: u32 = 3000;

/// Side length of one glyph of the built-in bitmap font.
pub const GLYPH_SIZE: u32 = 8;

/// Panel titles, left to right.
pub const PANEL_TITLES: [&str; 3] = ["Original Image", "Detected Edges", "Detected Circles"];
