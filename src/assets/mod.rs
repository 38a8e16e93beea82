//! Still-image preloading for scene backgrounds and map art.

/// Parallel decode of image and SVG assets.
pub mod preload;
