//! Contrast pass over the text chunks of a tree.

use std::collections::HashMap;

use super::NodeConsumer;
use crate::contrast::{ContrastRatioChecker, PageRaster, RasterSource, TextType};
use crate::model::{Chunk, NodeContent, NodeId};
use crate::options::{AnalysisOptions, LargeTextThreshold};
use crate::tree::SemanticTree;

/// Checks every text chunk against its page raster and records the verdict on the chunk.
///
/// Each page is fetched from the source at most once per consumer. Chunks
/// whose region is empty or has fewer than two dominant colours are skipped.
pub struct ContrastConsumer<'a> {
    source: &'a dyn RasterSource,
    checker: ContrastRatioChecker,
    high_visibility: bool,
    large_text: LargeTextThreshold,
    text_type: Option<TextType>,
    pages: HashMap<u32, Option<PageRaster>>,
    checked: usize,
    failures: usize,
    skipped: usize,
}

impl<'a> ContrastConsumer<'a> {
    pub fn new(source: &'a dyn RasterSource, options: &AnalysisOptions) -> Self {
        Self {
            source,
            checker: ContrastRatioChecker::from_options(options),
            high_visibility: options.high_visibility,
            large_text: options.large_text,
            text_type: None,
            pages: HashMap::new(),
            checked: 0,
            failures: 0,
            skipped: 0,
        }
    }

    /// Classify every chunk as `text_type` instead of deriving it from the font.
    pub fn with_text_type(mut self, text_type: TextType) -> Self {
        self.text_type = Some(text_type);
        self
    }

    /// Chunks that received a verdict.
    pub fn checked(&self) -> usize {
        self.checked
    }

    /// Chunks whose verdict is non-compliant.
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Chunks left without a verdict.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl NodeConsumer for ContrastConsumer<'_> {
    fn accept(&mut self, tree: &mut SemanticTree, node: NodeId) {
        let NodeContent::Text(chunk) = tree.node(node).content() else {
            return;
        };
        let Some(page) = chunk.page_number() else {
            self.skipped += 1;
            return;
        };
        let bounding_box = *chunk.bounding_box();
        let text_type = self
            .text_type
            .unwrap_or_else(|| TextType::for_chunk(chunk, &self.large_text));

        let source = self.source;
        let raster = self
            .pages
            .entry(page)
            .or_insert_with(|| match source.page_raster(page) {
                Ok(raster) => Some(raster),
                Err(e) => {
                    log::warn!("Page {} raster unavailable: {}", page, e);
                    None
                }
            });
        let Some(raster) = raster.as_ref() else {
            self.skipped += 1;
            return;
        };
        let Some(region) = raster.crop(&bounding_box) else {
            log::debug!("Node {} has no visible pixels on page {}", node, page);
            self.skipped += 1;
            return;
        };

        let analysis = self.checker.analyze(&region);
        if analysis.is_degenerate() {
            log::debug!(
                "Node {} region has fewer than two dominant colours, skipping",
                node
            );
            self.skipped += 1;
            return;
        }

        let verdict = analysis.verdict(text_type, self.high_visibility);
        self.checked += 1;
        if !verdict.compliant {
            self.failures += 1;
        }
        if let NodeContent::Text(chunk) = tree.node_mut(node).content_mut() {
            chunk.contrast = Some(verdict);
        }
    }

    fn on_pass_start(&mut self, _tree: &SemanticTree) {
        self.checked = 0;
        self.failures = 0;
        self.skipped = 0;
    }

    fn on_pass_end(&mut self, _tree: &SemanticTree) {
        log::debug!(
            "Contrast pass: {} checked, {} failing, {} skipped",
            self.checked,
            self.failures,
            self.skipped
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consumer::run_pass;
    use crate::contrast::{ContrastVerdict, MemoryRasterSource, RgbRaster};
    use crate::model::{BoundingBox, Node, TextChunk};

    fn page_with_text(ink: [u8; 3]) -> PageRaster {
        let mut raster = RgbRaster::filled(200, 100, [255, 255, 255]);
        // Text at page y 60..70 is pixel rows 30..40
        raster.fill_rect(12, 32, 60, 6, ink);
        PageRaster::at_native_scale(raster)
    }

    fn text_node(page: u32, bbox: BoundingBox) -> Node {
        Node::new(NodeContent::Text(
            TextChunk::new("Sample", bbox, 62.0, page).with_font("Helvetica", 10.0),
        ))
    }

    fn verdict(tree: &SemanticTree, id: NodeId) -> Option<ContrastVerdict> {
        match tree.node(id).content() {
            NodeContent::Text(chunk) => chunk.contrast,
            _ => None,
        }
    }

    #[test]
    fn test_attaches_verdicts() {
        let source = MemoryRasterSource::new()
            .with_page(0, page_with_text([0, 0, 0]))
            .with_page(1, page_with_text([200, 200, 200]));
        let mut tree = SemanticTree::new(Node::plain(None));
        let root = tree.root();
        let dark = tree.add_child(root, text_node(0, BoundingBox::new(10.0, 60.0, 80.0, 70.0)));
        let light = tree.add_child(root, text_node(1, BoundingBox::new(10.0, 60.0, 80.0, 70.0)));

        let options = AnalysisOptions::default();
        let mut consumer = ContrastConsumer::new(&source, &options);
        run_pass(&mut tree, &mut consumer);

        let dark = verdict(&tree, dark).unwrap();
        assert!(dark.compliant);
        assert_eq!(dark.text_type, TextType::Regular);
        assert!((dark.ratio - 21.0).abs() < 1e-9);

        let light = verdict(&tree, light).unwrap();
        assert!(!light.compliant);
        assert_eq!(consumer.checked(), 2);
        assert_eq!(consumer.failures(), 1);
    }

    #[test]
    fn test_skips_blank_and_missing_pages() {
        let source = MemoryRasterSource::new().with_page(0, page_with_text([0, 0, 0]));
        let mut tree = SemanticTree::new(Node::plain(None));
        let root = tree.root();
        let blank = tree.add_child(root, text_node(0, BoundingBox::new(100.0, 0.0, 150.0, 20.0)));
        let missing = tree.add_child(root, text_node(4, BoundingBox::new(10.0, 60.0, 80.0, 70.0)));

        let options = AnalysisOptions::default();
        let mut consumer = ContrastConsumer::new(&source, &options);
        run_pass(&mut tree, &mut consumer);

        assert!(verdict(&tree, blank).is_none());
        assert!(verdict(&tree, missing).is_none());
        assert_eq!(consumer.skipped(), 2);
        assert_eq!(consumer.checked(), 0);
    }

    #[test]
    fn test_logo_override_always_passes() {
        let source = MemoryRasterSource::new().with_page(0, page_with_text([250, 250, 250]));
        let mut tree = SemanticTree::new(text_node(0, BoundingBox::new(10.0, 60.0, 80.0, 70.0)));

        let options = AnalysisOptions::default().with_high_visibility(true);
        let mut consumer = ContrastConsumer::new(&source, &options).with_text_type(TextType::Logo);
        run_pass(&mut tree, &mut consumer);

        let verdict = verdict(&tree, tree.root()).unwrap();
        assert!(verdict.compliant);
        assert!(verdict.high_visibility);
    }
}
