//! Analysis options and configuration.

/// Options for analysing a semantic tree.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOptions {
    /// Use the stricter contrast thresholds (7.0 regular, 4.5 large)
    pub high_visibility: bool,

    /// Whether to scan large raster regions in parallel
    pub parallel: bool,

    /// Minimum pixel count of a region before the parallel scan is used
    pub parallel_pixel_threshold: usize,

    /// Font size boundaries for large text
    pub large_text: LargeTextThreshold,

    /// Minimum number of items before a run of labelled lines becomes a list
    pub list_min_items: usize,

    /// Error handling mode while ingesting trees
    pub error_mode: ErrorMode,
}

impl AnalysisOptions {
    /// Create new analysis options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable high-visibility contrast thresholds.
    pub fn with_high_visibility(mut self, high_visibility: bool) -> Self {
        self.high_visibility = high_visibility;
        self
    }

    /// Enable or disable parallel raster scanning.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel raster scanning.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the pixel count above which regions are scanned in parallel.
    pub fn with_parallel_threshold(mut self, pixels: usize) -> Self {
        self.parallel_pixel_threshold = pixels;
        self
    }

    /// Set the large text boundaries.
    pub fn with_large_text(mut self, threshold: LargeTextThreshold) -> Self {
        self.large_text = threshold;
        self
    }

    /// Set the minimum list length. Values below 2 are raised to 2.
    pub fn with_list_min_items(mut self, items: usize) -> Self {
        self.list_min_items = items.max(2);
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (malformed chunks become plain nodes).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            high_visibility: false,
            parallel: true,
            parallel_pixel_threshold: 65_536,
            large_text: LargeTextThreshold::default(),
            list_min_items: 2,
            error_mode: ErrorMode::Strict,
        }
    }
}

/// Font size at which text counts as large for contrast purposes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LargeTextThreshold {
    /// Size in points for regular weight text
    pub regular_size: f64,
    /// Size in points for bold text
    pub bold_size: f64,
}

impl LargeTextThreshold {
    /// Check whether text of this size and boldness is large.
    pub fn is_large(&self, font_size: f64, bold: bool) -> bool {
        if bold {
            font_size >= self.bold_size
        } else {
            font_size >= self.regular_size
        }
    }
}

impl Default for LargeTextThreshold {
    fn default() -> Self {
        Self {
            regular_size: 18.0,
            bold_size: 14.0,
        }
    }
}

/// Error handling mode during ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any malformed node
    #[default]
    Strict,
    /// Keep malformed chunks as plain nodes and continue.
    ///
    /// The resulting tree is partial: a malformed chunk stands in as an
    /// untyped plain leaf with no geometry, which scores 0 and drags its
    /// ancestors' scores down. Opt-in only; [`ErrorMode::Strict`] yields no
    /// tree at all.
    Lenient,
}
