//! Leaf content chunks: text, images and line art.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::geometry::{BoundingBox, Placement};
use crate::contrast::ContrastVerdict;

/// Two baselines closer than this are treated as the same line.
pub const BASELINE_EPSILON: f64 = 1e-7;

/// Geometry shared by every chunk kind.
pub trait Chunk {
    /// Placement of the chunk on its page.
    fn placement(&self) -> &Placement;

    fn bounding_box(&self) -> &BoundingBox {
        &self.placement().bounding_box
    }

    fn page_number(&self) -> Option<u32> {
        self.placement().page_number
    }

    fn left_x(&self) -> f64 {
        self.bounding_box().left_x()
    }

    fn right_x(&self) -> f64 {
        self.bounding_box().right_x()
    }

    fn bottom_y(&self) -> f64 {
        self.bounding_box().bottom_y()
    }

    fn top_y(&self) -> f64 {
        self.bounding_box().top_y()
    }
}

/// A run of text drawn with a single font.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextChunk {
    /// The text content
    pub text: String,

    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,

    /// Font size in points
    pub font_size: f64,

    /// Font weight (400 = regular, 700 = bold)
    pub font_weight: f64,

    /// Italic angle in degrees
    pub italic_angle: f64,

    /// Fill colour as RGBA components in 0..=1
    pub color: [f64; 4],

    /// Baseline y-coordinate
    pub baseline: f64,

    /// Box and page
    pub placement: Placement,

    /// Contrast verdict, set once the chunk's region has been checked
    pub contrast: Option<ContrastVerdict>,
}

impl TextChunk {
    /// Create a text chunk with default styling.
    pub fn new(text: impl Into<String>, bounding_box: BoundingBox, baseline: f64, page: u32) -> Self {
        Self {
            text: text.into(),
            font_name: String::new(),
            font_size: bounding_box.height(),
            font_weight: 400.0,
            italic_angle: 0.0,
            color: [0.0, 0.0, 0.0, 1.0],
            baseline,
            placement: Placement::new(bounding_box, page),
            contrast: None,
        }
    }

    /// Set the font name and size.
    pub fn with_font(mut self, name: impl Into<String>, size: f64) -> Self {
        self.font_name = name.into();
        self.font_size = size;
        self
    }

    /// Set the font weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.font_weight = weight;
        self
    }

    /// Check if the font weight or name marks this chunk as bold.
    pub fn is_bold(&self) -> bool {
        let name = self.font_name.to_lowercase();
        self.font_weight >= 700.0
            || name.contains("bold")
            || name.contains("black")
            || name.contains("heavy")
    }

    /// Check if the chunk carries no visible text.
    pub fn is_whitespace(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Fill colour as 8-bit RGB, alpha discarded.
    pub fn color_rgb8(&self) -> [u8; 3] {
        let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [
            channel(self.color[0]),
            channel(self.color[1]),
            channel(self.color[2]),
        ]
    }

    /// Layout order: by baseline, then by left edge when baselines coincide.
    ///
    /// Baselines within [`BASELINE_EPSILON`] compare equal. The relation is
    /// therefore not transitive and must not be handed to a sort routine.
    pub fn layout_cmp(&self, other: &TextChunk) -> Ordering {
        if (self.baseline - other.baseline).abs() < BASELINE_EPSILON {
            self.left_x().total_cmp(&other.left_x())
        } else {
            self.baseline.total_cmp(&other.baseline)
        }
    }
}

impl Chunk for TextChunk {
    fn placement(&self) -> &Placement {
        &self.placement
    }
}

/// An image drawn on the page. Only its geometry is tracked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageChunk {
    pub placement: Placement,
}

impl ImageChunk {
    pub fn new(bounding_box: BoundingBox, page: u32) -> Self {
        Self {
            placement: Placement::new(bounding_box, page),
        }
    }
}

impl Chunk for ImageChunk {
    fn placement(&self) -> &Placement {
        &self.placement
    }
}

/// Vector line art (rules, bullets, borders). Only its geometry is tracked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineArtChunk {
    pub placement: Placement,
}

impl LineArtChunk {
    pub fn new(bounding_box: BoundingBox, page: u32) -> Self {
        Self {
            placement: Placement::new(bounding_box, page),
        }
    }
}

impl Chunk for LineArtChunk {
    fn placement(&self) -> &Placement {
        &self.placement
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk_at(left: f64, baseline: f64) -> TextChunk {
        TextChunk::new(
            "x",
            BoundingBox::new(left, baseline - 2.0, left + 5.0, baseline + 8.0),
            baseline,
            0,
        )
    }

    #[test]
    fn test_layout_cmp_within_epsilon_uses_left_edge() {
        let a = chunk_at(50.0, 100.0);
        let b = chunk_at(10.0, 100.0 + 5e-8);
        assert_eq!(a.layout_cmp(&b), Ordering::Greater);
        assert_eq!(b.layout_cmp(&a), Ordering::Less);
    }

    #[test]
    fn test_layout_cmp_beyond_epsilon_uses_baseline() {
        let a = chunk_at(50.0, 100.0);
        let b = chunk_at(10.0, 100.0 + 1e-6);
        assert_eq!(a.layout_cmp(&b), Ordering::Less);
        assert_eq!(b.layout_cmp(&a), Ordering::Greater);
    }

    #[test]
    fn test_geometry_accessors() {
        let chunk = chunk_at(10.0, 100.0);
        assert_eq!(chunk.left_x(), 10.0);
        assert_eq!(chunk.right_x(), 15.0);
        assert_eq!(chunk.bottom_y(), 98.0);
        assert_eq!(chunk.top_y(), 108.0);
        assert_eq!(chunk.page_number(), Some(0));
    }

    #[test]
    fn test_bold_detection() {
        let chunk = chunk_at(0.0, 0.0).with_font("Helvetica-Bold", 12.0);
        assert!(chunk.is_bold());
        let chunk = chunk_at(0.0, 0.0).with_font("Helvetica", 12.0).with_weight(700.0);
        assert!(chunk.is_bold());
        let chunk = chunk_at(0.0, 0.0).with_font("Helvetica", 12.0);
        assert!(!chunk.is_bold());
    }

    #[test]
    fn test_color_rgb8() {
        let mut chunk = chunk_at(0.0, 0.0);
        chunk.color = [1.0, 0.5, 0.0, 0.3];
        assert_eq!(chunk.color_rgb8(), [255, 128, 0]);
    }
}
