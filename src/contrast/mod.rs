//! Text contrast analysis of rendered pages.
//!
//! A region of pixels is reduced to a colour-frequency histogram ordered by
//! luminosity. The local maxima of that histogram are the visually dominant
//! colours; the two most present of them stand for foreground and
//! background, and their luminosities give the WCAG contrast ratio.
//!
//! ```
//! use wcagpdf::contrast::{ContrastRatioChecker, RgbRaster, TextType};
//!
//! let mut raster = RgbRaster::filled(32, 16, [255, 255, 255]);
//! raster.fill_rect(4, 4, 20, 6, [0, 0, 0]);
//!
//! let verdict = ContrastRatioChecker::new().check(&raster.full_region(), TextType::Regular, false);
//! assert!(verdict.compliant);
//! ```

mod checker;
mod histogram;
mod luminosity;
mod peaks;
mod raster;

pub use checker::{
    is_compliant, ContrastAnalysis, ContrastRatioChecker, ContrastVerdict, TextType,
    LARGE_HIGH_VISIBILITY_MIN_RATIO, LARGE_MIN_RATIO, REGULAR_HIGH_VISIBILITY_MIN_RATIO,
    REGULAR_MIN_RATIO,
};
pub use histogram::{color_counts, histogram, DataPoint};
pub use luminosity::{contrast_ratio, relative_luminosity};
pub use peaks::{local_maxima, two_most_present};
pub use raster::{
    DirectoryRasterSource, MemoryRasterSource, PageRaster, RasterRegion, RasterSource, RgbRaster,
};
