/// Application name shown in the header
pub const APP_NAME: &str = "Your Circle";

/// Placeholder shown in the header search input
pub const SEARCH_PLACEHOLDER: &str = "Search connections...";

/// Carousel: lateral offset per step of circular distance (percent of card width)
pub const CAROUSEL_STEP_PERCENT: f64 = 110.0;

/// Carousel: opacity lost per step of distance, and the floor
pub const CAROUSEL_OPACITY_STEP: f64 = 0.3;
pub const CAROUSEL_MIN_OPACITY: f64 = 0.3;

/// Carousel: scale lost per step of distance, and the floor
pub const CAROUSEL_SCALE_STEP: f64 = 0.1;
pub const CAROUSEL_MIN_SCALE: f64 = 0.8;

/// Carousel: entering / leaving cards start or end one full width away
pub const CAROUSEL_OFFSCREEN_PERCENT: f64 = 100.0;

/// Carousel fade / scale duration in seconds
pub const CAROUSEL_FADE_SECS: f64 = 0.5;

/// Spring used for carousel sliding
pub const CAROUSEL_SPRING_STIFFNESS: f64 = 300.0;
pub const CAROUSEL_SPRING_DAMPING: f64 = 30.0;

/// Spring used for tiles and file cards
pub const TILE_SPRING_STIFFNESS: f64 = 300.0;
pub const TILE_SPRING_DAMPING: f64 = 20.0;

/// Z-index given to a hovered or expanded tile
pub const RAISED_Z_INDEX: i32 = 10;

/// Utility button geometry (pixels)
pub const UTILITY_BUTTON_SIZE: f64 = 48.0;
pub const UTILITY_BUTTON_SPACING: f64 = 12.0;

/// Stagger between utility options fanning out, in seconds
pub const UTILITY_STAGGER_SECS: f64 = 0.05;

/// Route of the carousel page
pub const HOME_ROUTE: &str = "/";

/// Route of the file browser page
pub const FILES_ROUTE: &str = "/files";
