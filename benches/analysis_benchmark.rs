//! Benchmarks for wcagpdf analysis performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic trees and rasters.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wcagpdf::contrast::{ContrastRatioChecker, RgbRaster};
use wcagpdf::model::{BoundingBox, Node, NodeContent, SemanticType, TextChunk};
use wcagpdf::{AnalysisOptions, Analyzer, SemanticTree};

/// Creates a document of `paragraphs` paragraphs with five lines each.
fn create_test_tree(paragraphs: usize) -> SemanticTree {
    let mut tree = SemanticTree::new(Node::plain(Some(SemanticType::Document)));
    let root = tree.root();
    for p in 0..paragraphs {
        let para = tree.add_child(root, Node::plain(Some(SemanticType::Paragraph)));
        for line in 0..5 {
            let baseline = 780.0 - (p * 5 + line) as f64 * 12.0;
            let chunk = TextChunk::new(
                "Lorem ipsum dolor sit amet",
                BoundingBox::new(72.0, baseline - 2.0, 300.0, baseline + 8.0),
                baseline,
                (p / 10) as u32,
            )
            .with_font("Helvetica", 10.0);
            tree.add_child(para, Node::new(NodeContent::Text(chunk)));
        }
    }
    tree
}

/// Creates a noisy raster with dark text stripes on white.
fn create_test_raster(width: u32, height: u32) -> RgbRaster {
    let mut raster = RgbRaster::filled(width, height, [255, 255, 255]);
    for y in (0..height).step_by(12) {
        raster.fill_rect(0, y, width, 6, [20, 20, 20]);
        raster.fill_rect(0, y + 6, width, 1, [128, 128, 128]);
    }
    raster
}

fn bench_structure_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("structure");

    for paragraphs in [10, 100, 1000] {
        let tree = create_test_tree(paragraphs);
        group.bench_function(format!("{}_paragraphs", paragraphs), |b| {
            b.iter(|| {
                let mut tree = tree.clone();
                black_box(Analyzer::new().analyze(&mut tree))
            })
        });
    }

    group.finish();
}

fn bench_traversal(c: &mut Criterion) {
    let tree = create_test_tree(1000);
    c.bench_function("depth_first_iter", |b| {
        b.iter(|| black_box(tree.depth_first_iter().count()))
    });
}

fn bench_contrast_ratio(c: &mut Criterion) {
    let mut group = c.benchmark_group("contrast");
    let raster = create_test_raster(1200, 800);

    let sequential = ContrastRatioChecker::from_options(&AnalysisOptions::new().sequential());
    group.bench_function("sequential_1200x800", |b| {
        b.iter(|| black_box(sequential.contrast_ratio(&raster.full_region())))
    });

    let parallel = ContrastRatioChecker::from_options(&AnalysisOptions::new());
    group.bench_function("parallel_1200x800", |b| {
        b.iter(|| black_box(parallel.contrast_ratio(&raster.full_region())))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_structure_analysis,
    bench_traversal,
    bench_contrast_ratio
);
criterion_main!(benches);
