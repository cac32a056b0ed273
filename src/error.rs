//! Error types for wcagpdf library.

use std::io;
use thiserror::Error;

/// Result type alias for wcagpdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while ingesting trees or loading rasters.
///
/// Analysis itself never fails: unexplained nodes degrade to a zero score
/// and degenerate contrast regions are reported, not raised.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The serialized tree is not valid JSON or does not match the node shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A page raster could not be decoded.
    #[error("Image decoding error: {0}")]
    Image(#[from] image::ImageError),

    /// The tree decoded but carries values that cannot form a node.
    #[error("Malformed tree: {0}")]
    MalformedTree(String),

    /// No raster is available for the requested page.
    #[error("Page {0} has no rendered raster")]
    PageNotRendered(u32),

    /// A raster region is empty or lies outside the raster.
    #[error("Invalid raster region: {0}")]
    InvalidRegion(String),

    /// Error while serializing a report.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
