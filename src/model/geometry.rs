//! Page-space geometry shared by every node.

use serde::{Deserialize, Serialize};

/// An axis-aligned box in page-space units.
///
/// The coordinates are stored as `[left, bottom, right, top]`. This index
/// order is part of the serialized contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoundingBox([f64; 4]);

impl BoundingBox {
    /// Create a box from its edges.
    pub fn new(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        Self([left, bottom, right, top])
    }

    /// Create a box from the raw `[left, bottom, right, top]` array.
    pub fn from_array(coords: [f64; 4]) -> Self {
        Self(coords)
    }

    /// Raw `[left, bottom, right, top]` array.
    pub fn as_array(&self) -> [f64; 4] {
        self.0
    }

    pub fn left_x(&self) -> f64 {
        self.0[0]
    }

    pub fn bottom_y(&self) -> f64 {
        self.0[1]
    }

    pub fn right_x(&self) -> f64 {
        self.0[2]
    }

    pub fn top_y(&self) -> f64 {
        self.0[3]
    }

    pub fn width(&self) -> f64 {
        self.right_x() - self.left_x()
    }

    pub fn height(&self) -> f64 {
        self.top_y() - self.bottom_y()
    }

    /// Check whether the box encloses no area.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Check whether the box is the all-zero "no geometry yet" box.
    pub fn is_unset(&self) -> bool {
        self.0 == [0.0; 4]
    }

    /// Smallest box enclosing both boxes.
    ///
    /// An unset box yields the other box.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        if self.is_unset() {
            return *other;
        }
        if other.is_unset() {
            return *self;
        }
        BoundingBox::new(
            self.left_x().min(other.left_x()),
            self.bottom_y().min(other.bottom_y()),
            self.right_x().max(other.right_x()),
            self.top_y().max(other.top_y()),
        )
    }

    /// Vertical overlap between the two boxes (0 when disjoint).
    pub fn vertical_overlap(&self, other: &BoundingBox) -> f64 {
        let low = self.bottom_y().max(other.bottom_y());
        let high = self.top_y().min(other.top_y());
        (high - low).max(0.0)
    }
}

/// Where a node sits in the document: its box and, when known, its page.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Placement {
    /// Extent in page-space units
    pub bounding_box: BoundingBox,

    /// Zero-based page index, absent for nodes that span no single page
    pub page_number: Option<u32>,
}

impl Placement {
    /// Create a placement on a page.
    pub fn new(bounding_box: BoundingBox, page_number: u32) -> Self {
        Self {
            bounding_box,
            page_number: Some(page_number),
        }
    }

    /// Grow this placement to also cover `other`.
    ///
    /// The page is kept only while both placements agree on it.
    pub fn absorb(&mut self, other: &Placement) {
        let was_empty = self.bounding_box.is_unset() && self.page_number.is_none();
        self.bounding_box = self.bounding_box.union(&other.bounding_box);
        self.page_number = if was_empty {
            other.page_number
        } else if self.page_number == other.page_number {
            self.page_number
        } else {
            None
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessor_index_contract() {
        let bbox = BoundingBox::from_array([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(bbox.left_x(), 1.0);
        assert_eq!(bbox.bottom_y(), 2.0);
        assert_eq!(bbox.right_x(), 3.0);
        assert_eq!(bbox.top_y(), 4.0);
    }

    #[test]
    fn test_union() {
        let a = BoundingBox::new(10.0, 10.0, 20.0, 20.0);
        let b = BoundingBox::new(15.0, 5.0, 30.0, 18.0);
        assert_eq!(a.union(&b), BoundingBox::new(10.0, 5.0, 30.0, 20.0));
        assert_eq!(BoundingBox::default().union(&b), b);
    }

    #[test]
    fn test_empty_box() {
        assert!(BoundingBox::default().is_empty());
        assert!(!BoundingBox::new(0.0, 0.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn test_unset_box() {
        assert!(BoundingBox::default().is_unset());
        assert!(!BoundingBox::new(0.0, 0.0, 0.0, 1.0).is_unset());
    }

    #[test]
    fn test_absorb_drops_page_on_mismatch() {
        let mut placement = Placement::new(BoundingBox::new(0.0, 0.0, 1.0, 1.0), 0);
        placement.absorb(&Placement::new(BoundingBox::new(1.0, 1.0, 2.0, 2.0), 0));
        assert_eq!(placement.page_number, Some(0));

        placement.absorb(&Placement::new(BoundingBox::new(1.0, 1.0, 2.0, 2.0), 1));
        assert_eq!(placement.page_number, None);
    }

    #[test]
    fn test_absorb_into_default() {
        let mut placement = Placement::default();
        placement.absorb(&Placement::new(BoundingBox::new(1.0, 1.0, 2.0, 2.0), 4));
        assert_eq!(placement.page_number, Some(4));
        assert_eq!(placement.bounding_box, BoundingBox::new(1.0, 1.0, 2.0, 2.0));
    }
}
