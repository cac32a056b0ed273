//! # wcagpdf
//!
//! Accessibility analysis of PDF content trees.
//!
//! This library recovers the reading structure of an extracted PDF content
//! tree (spans, paragraphs, lists), scores how well the existing tagging
//! explains it, and checks text contrast against rendered page images.
//!
//! ## Quick Start
//!
//! ```no_run
//! use wcagpdf::{report, Analyzer, DirectoryRasterSource};
//!
//! fn main() -> wcagpdf::Result<()> {
//!     let analyzer = Analyzer::new().high_visibility();
//!     let mut tree = analyzer.load("document.json")?;
//!
//!     let pages = DirectoryRasterSource::new("render/page-{page}.png");
//!     let result = analyzer.analyze_with_rasters(&mut tree, &pages);
//!     println!("{}", report::to_json(&result, report::JsonFormat::Pretty)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Post-order analysis passes**: consumers see every child before its parent
//! - **Structure recovery**: spans, paragraphs and lists with a correctness score
//! - **Contrast checks**: WCAG ratios from dominant colours of rendered pixels
//! - **Parallel processing**: Uses Rayon for large raster regions

pub mod consumer;
pub mod contrast;
pub mod error;
pub mod model;
pub mod options;
pub mod parser;
pub mod report;
pub mod tree;

// Re-export commonly used types
pub use consumer::{
    AccumulatedNodeConsumer, AccumulatedNodeMapper, AnalysisStats, ConsumerChain,
    ContrastConsumer, NodeConsumer, StatsConsumer,
};
pub use contrast::{
    ContrastRatioChecker, ContrastVerdict, DirectoryRasterSource, MemoryRasterSource, PageRaster,
    RasterSource, RgbRaster, TextType,
};
pub use error::{Error, Result};
pub use model::{
    BoundingBox, ListItemInfo, Node, NodeContent, NodeId, Placement, SemanticType, TextChunk,
};
pub use options::{AnalysisOptions, ErrorMode, LargeTextThreshold};
pub use parser::{try_load_tree, TreeParser};
pub use report::{AnalysisReport, JsonFormat};
pub use tree::SemanticTree;

use std::path::Path;

/// Load a content tree from a JSON file.
///
/// Returns `None` when the file cannot be read or does not describe a tree;
/// the cause is logged.
///
/// # Example
///
/// ```no_run
/// use wcagpdf::load_tree;
///
/// if let Some(tree) = load_tree("document.json") {
///     println!("Nodes: {}", tree.len());
/// }
/// ```
pub fn load_tree<P: AsRef<Path>>(path: P) -> Option<SemanticTree> {
    try_load_tree(path)
}

/// Load a content tree from a file and analyse its structure.
///
/// # Example
///
/// ```no_run
/// use wcagpdf::analyze_file;
///
/// let report = analyze_file("document.json").unwrap();
/// println!("Score: {:.3}", report.root_score);
/// ```
pub fn analyze_file<P: AsRef<Path>>(path: P) -> Result<AnalysisReport> {
    Analyzer::new().analyze_file(path)
}

/// Analyse the structure of a tree with default options.
pub fn analyze_tree(tree: &mut SemanticTree) -> AnalysisReport {
    Analyzer::new().analyze(tree)
}

/// Builder for running the analysis passes over a tree.
///
/// # Example
///
/// ```
/// use wcagpdf::{Analyzer, Node, SemanticTree};
///
/// let mut tree = SemanticTree::new(Node::plain(None));
/// let report = Analyzer::new().sequential().analyze(&mut tree);
/// assert_eq!(report.root_score, 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    options: AnalysisOptions,
}

impl Analyzer {
    /// Create a new analyzer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all options.
    pub fn with_options(mut self, options: AnalysisOptions) -> Self {
        self.options = options;
        self
    }

    /// Use high-visibility contrast thresholds.
    pub fn high_visibility(mut self) -> Self {
        self.options = self.options.with_high_visibility(true);
        self
    }

    /// Disable parallel raster scanning.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Keep malformed chunks as plain nodes while loading.
    pub fn lenient(mut self) -> Self {
        self.options = self.options.lenient();
        self
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Load a tree honouring the configured error mode.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<SemanticTree> {
        TreeParser::new()
            .with_error_mode(self.options.error_mode)
            .parse_file(path)
    }

    /// Load and analyse the structure of a tree file.
    pub fn analyze_file<P: AsRef<Path>>(&self, path: P) -> Result<AnalysisReport> {
        let mut tree = self.load(path)?;
        Ok(self.analyze(&mut tree))
    }

    /// Recover structure and score every node.
    pub fn analyze(&self, tree: &mut SemanticTree) -> AnalysisReport {
        let mut structure = AccumulatedNodeConsumer::new(&self.options);
        consumer::run_pass(tree, &mut structure);
        let mapper = structure.into_mapper();

        let mut stats = StatsConsumer::new().with_mapper(&mapper);
        consumer::run_pass(tree, &mut stats);
        AnalysisReport::from_tree(tree, stats.into_stats())
    }

    /// Recover structure, then check contrast of every text chunk against `source`.
    pub fn analyze_with_rasters(
        &self,
        tree: &mut SemanticTree,
        source: &dyn RasterSource,
    ) -> AnalysisReport {
        let mut structure = AccumulatedNodeConsumer::new(&self.options);
        consumer::run_pass(tree, &mut structure);
        let mapper = structure.into_mapper();

        let mut contrast = ContrastConsumer::new(source, &self.options);
        let mut stats = StatsConsumer::new().with_mapper(&mapper);
        ConsumerChain::new()
            .with_consumer(&mut contrast)
            .with_consumer(&mut stats)
            .run(tree);

        log::info!(
            "Contrast checked {} chunks, {} failing, {} skipped",
            contrast.checked(),
            contrast.failures(),
            contrast.skipped()
        );
        AnalysisReport::from_tree(tree, stats.into_stats())
    }
}
