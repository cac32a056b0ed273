//! Probabilities that a line continues a text block.
//!
//! Every factor is measured in units of the larger font size of the two
//! lines, so the same thresholds hold for 8 pt footnotes and 30 pt titles.

use crate::model::{SemanticText, TextLine, BASELINE_EPSILON};

/// Baseline drift (in font sizes) at which a same-line merge becomes impossible.
const SAME_LINE_BASELINE_TOLERANCE: f64 = 0.3;

/// Horizontal gap (in font sizes) below which chunks read as overlapping.
const MIN_SAME_LINE_GAP: f64 = -0.1;
/// Largest horizontal gap still read as an ordinary word space.
const WORD_SPACE_GAP: f64 = 0.6;
/// Horizontal gap at which a same-line merge becomes impossible.
const MAX_SAME_LINE_GAP: f64 = 3.0;

/// Leading (in font sizes) below which lines collide.
const MIN_LEADING: f64 = 0.5;
/// Range of leading typical for consecutive lines of one paragraph.
const NORMAL_LEADING: (f64, f64) = (1.0, 1.5);
/// Leading at which the gap reads as a paragraph break.
const MAX_LEADING: f64 = 2.5;

/// Left offsets (in font sizes) accepted as aligned; negative allows a first-line indent.
const ALIGNED_OFFSET: (f64, f64) = (-4.0, 0.5);
const MAX_RIGHT_OFFSET: f64 = 3.0;
const MAX_LEFT_OFFSET: f64 = -8.0;

/// How a line joins the block before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeKind {
    /// The line continues the block's last line
    SameLine,
    /// The line starts a new line under the block
    NextLine,
}

/// Best way to join a line to a block, with its probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMerge {
    pub probability: f64,
    pub kind: MergeKind,
}

/// Probability that `next` continues `prev` on the same baseline.
pub fn same_line_probability(prev: &TextLine, next: &TextLine) -> f64 {
    let font_size = prev.font_size().max(next.font_size());
    if font_size <= 0.0 {
        return 0.0;
    }

    let drift = (prev.baseline() - next.baseline()).abs();
    let baseline_factor = if drift < BASELINE_EPSILON {
        1.0
    } else {
        1.0 - (drift / font_size / SAME_LINE_BASELINE_TOLERANCE).min(1.0)
    };

    let gap = (next.left_x() - prev.right_x()) / font_size;
    let gap_factor = if gap < MIN_SAME_LINE_GAP {
        0.0
    } else if gap <= WORD_SPACE_GAP {
        1.0
    } else {
        ((MAX_SAME_LINE_GAP - gap) / (MAX_SAME_LINE_GAP - WORD_SPACE_GAP)).max(0.0)
    };

    baseline_factor * gap_factor * font_size_ratio(prev, next)
}

/// Probability that `next` is the line following `block`.
pub fn next_line_probability(block: &SemanticText, next: &TextLine) -> f64 {
    let Some(prev) = block.last_line() else {
        return 0.0;
    };
    let font_size = prev.font_size().max(next.font_size());
    if font_size <= 0.0 {
        return 0.0;
    }

    let leading = prev.baseline() - next.baseline();
    if leading <= BASELINE_EPSILON {
        return 0.0;
    }
    let leading = leading / font_size;
    let leading_factor = if leading < MIN_LEADING {
        0.0
    } else if leading < NORMAL_LEADING.0 {
        (leading - MIN_LEADING) / (NORMAL_LEADING.0 - MIN_LEADING)
    } else if leading <= NORMAL_LEADING.1 {
        1.0
    } else {
        ((MAX_LEADING - leading) / (MAX_LEADING - NORMAL_LEADING.1)).max(0.0)
    };

    let offset = (next.left_x() - block.left_x()) / font_size;
    let alignment_factor = if offset > ALIGNED_OFFSET.1 {
        ((MAX_RIGHT_OFFSET - offset) / (MAX_RIGHT_OFFSET - ALIGNED_OFFSET.1)).max(0.0)
    } else if offset < ALIGNED_OFFSET.0 {
        ((offset - MAX_LEFT_OFFSET) / (ALIGNED_OFFSET.0 - MAX_LEFT_OFFSET)).max(0.0)
    } else {
        1.0
    };

    leading_factor * alignment_factor * font_size_ratio(prev, next)
}

/// Best merge of `next` into `block`; ties favour continuing the same line.
pub fn merge_probability(block: &SemanticText, next: &TextLine) -> LineMerge {
    let same_line = block
        .last_line()
        .map(|prev| same_line_probability(prev, next))
        .unwrap_or(0.0);
    let next_line = next_line_probability(block, next);

    if same_line >= next_line {
        LineMerge {
            probability: same_line,
            kind: MergeKind::SameLine,
        }
    } else {
        LineMerge {
            probability: next_line,
            kind: MergeKind::NextLine,
        }
    }
}

fn font_size_ratio(a: &TextLine, b: &TextLine) -> f64 {
    let (small, large) = if a.font_size() <= b.font_size() {
        (a.font_size(), b.font_size())
    } else {
        (b.font_size(), a.font_size())
    };
    if large <= 0.0 {
        0.0
    } else {
        small / large
    }
}
