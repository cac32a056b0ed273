//! WCAG text contrast verdicts for raster regions.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::histogram::{histogram, DataPoint};
use super::luminosity::contrast_ratio;
use super::peaks::{local_maxima, two_most_present};
use super::raster::RasterRegion;
use crate::model::TextChunk;
use crate::options::{AnalysisOptions, LargeTextThreshold};

/// Minimum ratio for regular text.
pub const REGULAR_MIN_RATIO: f64 = 4.5;
/// Minimum ratio for regular text in high-visibility mode.
pub const REGULAR_HIGH_VISIBILITY_MIN_RATIO: f64 = 7.0;
/// Minimum ratio for large text.
pub const LARGE_MIN_RATIO: f64 = 3.0;
/// Minimum ratio for large text in high-visibility mode.
pub const LARGE_HIGH_VISIBILITY_MIN_RATIO: f64 = 4.5;

/// Category of text for contrast purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextType {
    Regular,
    Large,
    /// Part of a logo or brand name; exempt
    Logo,
    /// Decorative or otherwise unclassified text
    Incidental,
}

impl TextType {
    /// Regular or large, from the chunk's font.
    pub fn for_chunk(chunk: &TextChunk, threshold: &LargeTextThreshold) -> Self {
        if threshold.is_large(chunk.font_size, chunk.is_bold()) {
            TextType::Large
        } else {
            TextType::Regular
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TextType::Regular => "regular",
            TextType::Large => "large",
            TextType::Logo => "logo",
            TextType::Incidental => "incidental",
        }
    }
}

impl fmt::Display for TextType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check a contrast ratio against the threshold for `text_type`.
pub fn is_compliant(ratio: f64, text_type: TextType, high_visibility: bool) -> bool {
    match (text_type, high_visibility) {
        (TextType::Regular, true) => ratio >= REGULAR_HIGH_VISIBILITY_MIN_RATIO,
        (TextType::Regular, false) => ratio >= REGULAR_MIN_RATIO,
        (TextType::Large, true) => ratio >= LARGE_HIGH_VISIBILITY_MIN_RATIO,
        (TextType::Large, false) => ratio >= LARGE_MIN_RATIO,
        (TextType::Logo, _) => true,
        (TextType::Incidental, _) => false,
    }
}

/// Dominant colours of a region and their contrast ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastAnalysis {
    pub most_present: DataPoint,
    pub second_present: DataPoint,
    pub ratio: f64,
}

impl ContrastAnalysis {
    /// Fewer than two dominant colours; the ratio is meaningless.
    pub fn is_degenerate(&self) -> bool {
        self.most_present.is_absent() || self.second_present.is_absent()
    }

    /// Judge the measured ratio for `text_type`.
    pub fn verdict(&self, text_type: TextType, high_visibility: bool) -> ContrastVerdict {
        ContrastVerdict {
            ratio: self.ratio,
            text_type,
            high_visibility,
            compliant: is_compliant(self.ratio, text_type, high_visibility),
        }
    }
}

/// Contrast verdict attached to a text chunk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastVerdict {
    pub ratio: f64,
    pub text_type: TextType,
    pub high_visibility: bool,
    pub compliant: bool,
}

/// Computes contrast ratios of raster regions.
#[derive(Debug, Clone)]
pub struct ContrastRatioChecker {
    parallel: bool,
    parallel_pixel_threshold: usize,
}

impl ContrastRatioChecker {
    pub fn new() -> Self {
        Self::from_options(&AnalysisOptions::default())
    }

    pub fn from_options(options: &AnalysisOptions) -> Self {
        Self {
            parallel: options.parallel,
            parallel_pixel_threshold: options.parallel_pixel_threshold,
        }
    }

    /// Find the two dominant colours of `region` and their ratio.
    pub fn analyze(&self, region: &RasterRegion<'_>) -> ContrastAnalysis {
        let parallel = self.parallel && region.pixel_count() >= self.parallel_pixel_threshold;
        let points = histogram(region, parallel);
        let maxima = local_maxima(&points);
        let (most_present, second_present) = two_most_present(&maxima);

        let ratio = contrast_ratio(most_present.luminosity, second_present.luminosity);

        ContrastAnalysis {
            most_present,
            second_present,
            ratio,
        }
    }

    pub fn contrast_ratio(&self, region: &RasterRegion<'_>) -> f64 {
        self.analyze(region).ratio
    }

    /// Ratio of `region` and whether it passes for `text_type`.
    pub fn check(
        &self,
        region: &RasterRegion<'_>,
        text_type: TextType,
        high_visibility: bool,
    ) -> ContrastVerdict {
        self.analyze(region).verdict(text_type, high_visibility)
    }
}

impl Default for ContrastRatioChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contrast::RgbRaster;

    #[test]
    fn test_thresholds() {
        assert!(is_compliant(4.5, TextType::Regular, false));
        assert!(!is_compliant(4.49999, TextType::Regular, false));
        assert!(!is_compliant(6.9, TextType::Regular, true));
        assert!(is_compliant(3.0, TextType::Large, false));
        assert!(!is_compliant(4.4, TextType::Large, true));
        assert!(is_compliant(1.0, TextType::Logo, true));
        assert!(!is_compliant(21.0, TextType::Incidental, false));
    }

    #[test]
    fn test_black_text_on_white() {
        let mut raster = RgbRaster::filled(40, 20, [255, 255, 255]);
        raster.fill_rect(5, 5, 20, 6, [0, 0, 0]);
        let checker = ContrastRatioChecker::new();

        let analysis = checker.analyze(&raster.full_region());
        assert!(!analysis.is_degenerate());
        assert_eq!(analysis.most_present.color, [255, 255, 255]);
        assert!((analysis.ratio - 21.0).abs() < 1e-9);

        let verdict = checker.check(&raster.full_region(), TextType::Regular, true);
        assert!(verdict.compliant);
    }

    #[test]
    fn test_verdict_from_analysis_matches_check() {
        let mut raster = RgbRaster::filled(40, 20, [255, 255, 255]);
        raster.fill_rect(5, 5, 20, 6, [0x94, 0x94, 0x94]);
        let checker = ContrastRatioChecker::new();
        let region = raster.full_region();

        let analysis = checker.analyze(&region);
        for text_type in [TextType::Regular, TextType::Large] {
            for high_visibility in [false, true] {
                assert_eq!(
                    analysis.verdict(text_type, high_visibility),
                    checker.check(&region, text_type, high_visibility)
                );
            }
        }
        let large = analysis.verdict(TextType::Large, false);
        assert_eq!(large.ratio, analysis.ratio);
        assert!(large.compliant);
        assert!(!analysis.verdict(TextType::Regular, false).compliant);
    }

    #[test]
    fn test_single_color_is_degenerate() {
        let raster = RgbRaster::filled(10, 10, [30, 30, 30]);
        let analysis = ContrastRatioChecker::new().analyze(&raster.full_region());
        assert!(analysis.is_degenerate());
        assert!(analysis.ratio < 1.0);
    }

    #[test]
    fn test_antialiasing_noise_ignored() {
        let mut raster = RgbRaster::filled(50, 50, [255, 255, 255]);
        raster.fill_rect(10, 10, 30, 10, [0, 0, 0]);
        // A thin grey edge between the two dominant colours
        raster.fill_rect(10, 20, 30, 1, [128, 128, 128]);
        let ratio = ContrastRatioChecker::new().contrast_ratio(&raster.full_region());
        assert!((ratio - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_text_type_for_chunk() {
        use crate::model::BoundingBox;

        let threshold = LargeTextThreshold::default();
        let chunk = TextChunk::new("x", BoundingBox::new(0.0, 0.0, 10.0, 12.0), 2.0, 0)
            .with_font("Helvetica", 12.0);
        assert_eq!(TextType::for_chunk(&chunk, &threshold), TextType::Regular);

        let bold = chunk.clone().with_font("Helvetica-Bold", 14.0);
        assert_eq!(TextType::for_chunk(&bold, &threshold), TextType::Large);
    }
}
