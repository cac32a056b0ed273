//! Lines of text chunks and the text blocks built from them.

use serde::{Deserialize, Serialize};

use super::chunk::{Chunk, TextChunk};
use super::geometry::{BoundingBox, Placement};

/// Text chunks sharing one baseline, kept in layout order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextLine {
    chunks: Vec<TextChunk>,
    bounding_box: BoundingBox,
}

impl TextLine {
    /// Create an empty line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a line holding a single chunk.
    pub fn from_chunk(chunk: TextChunk) -> Self {
        let mut line = Self::new();
        line.push(chunk);
        line
    }

    /// Insert a chunk at its layout position.
    pub fn push(&mut self, chunk: TextChunk) {
        self.bounding_box = self.bounding_box.union(chunk.bounding_box());
        let at = self
            .chunks
            .iter()
            .position(|c| c.layout_cmp(&chunk).is_gt())
            .unwrap_or(self.chunks.len());
        self.chunks.insert(at, chunk);
    }

    /// Move every chunk of `other` into this line.
    pub fn append(&mut self, other: TextLine) {
        for chunk in other.chunks {
            self.push(chunk);
        }
    }

    pub fn chunks(&self) -> &[TextChunk] {
        &self.chunks
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    /// Baseline of the line (0 when empty).
    pub fn baseline(&self) -> f64 {
        self.chunks.first().map(|c| c.baseline).unwrap_or(0.0)
    }

    /// Largest font size on the line.
    pub fn font_size(&self) -> f64 {
        self.chunks.iter().map(|c| c.font_size).fold(0.0, f64::max)
    }

    pub fn page_number(&self) -> Option<u32> {
        self.chunks.first().and_then(|c| c.page_number())
    }

    pub fn left_x(&self) -> f64 {
        self.bounding_box.left_x()
    }

    pub fn right_x(&self) -> f64 {
        self.bounding_box.right_x()
    }

    pub fn bottom_y(&self) -> f64 {
        self.bounding_box.bottom_y()
    }

    pub fn top_y(&self) -> f64 {
        self.bounding_box.top_y()
    }

    /// Text of the line, with a space wherever chunks are visibly apart.
    pub fn text(&self) -> String {
        let mut result = String::new();
        for (i, chunk) in self.chunks.iter().enumerate() {
            if i > 0 {
                let prev = &self.chunks[i - 1];
                let gap = chunk.left_x() - prev.right_x();
                let touching_space = prev.text.ends_with(char::is_whitespace)
                    || chunk.text.starts_with(char::is_whitespace);
                if gap > chunk.font_size.max(prev.font_size) * 0.1 && !touching_space {
                    result.push(' ');
                }
            }
            result.push_str(&chunk.text);
        }
        result
    }
}

/// Lines grouped into a span or paragraph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SemanticText {
    /// Box and page of the whole block
    pub placement: Placement,

    lines: Vec<TextLine>,
}

impl SemanticText {
    /// Create a block from its first line.
    pub fn from_line(line: TextLine) -> Self {
        let placement = Placement {
            bounding_box: *line.bounding_box(),
            page_number: line.page_number(),
        };
        Self {
            placement,
            lines: vec![line],
        }
    }

    pub fn lines(&self) -> &[TextLine] {
        &self.lines
    }

    pub fn first_line(&self) -> Option<&TextLine> {
        self.lines.first()
    }

    pub fn last_line(&self) -> Option<&TextLine> {
        self.lines.last()
    }

    /// Leftmost edge over all lines.
    pub fn left_x(&self) -> f64 {
        self.lines
            .iter()
            .map(TextLine::left_x)
            .fold(f64::INFINITY, f64::min)
    }

    /// Continue the last line with the chunks of `line`.
    pub fn extend_last_line(&mut self, line: TextLine) {
        self.absorb_placement(&line);
        match self.lines.last_mut() {
            Some(last) => last.append(line),
            None => self.lines.push(line),
        }
    }

    /// Start a new line below the existing ones.
    pub fn push_line(&mut self, line: TextLine) {
        self.absorb_placement(&line);
        self.lines.push(line);
    }

    /// Text of the block, lines joined by single spaces.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(TextLine::text)
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn absorb_placement(&mut self, line: &TextLine) {
        self.placement.absorb(&Placement {
            bounding_box: *line.bounding_box(),
            page_number: line.page_number(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str, left: f64, right: f64, baseline: f64) -> TextChunk {
        TextChunk::new(
            text,
            BoundingBox::new(left, baseline - 2.0, right, baseline + 8.0),
            baseline,
            0,
        )
        .with_font("Helvetica", 10.0)
    }

    #[test]
    fn test_push_keeps_layout_order() {
        let mut line = TextLine::new();
        line.push(chunk("world", 60.0, 90.0, 100.0));
        line.push(chunk("Hello", 20.0, 55.0, 100.0));
        assert_eq!(line.text(), "Hello world");
        assert_eq!(line.left_x(), 20.0);
        assert_eq!(line.right_x(), 90.0);
    }

    #[test]
    fn test_text_without_gap_has_no_space() {
        let mut line = TextLine::new();
        line.push(chunk("Hel", 20.0, 35.0, 100.0));
        line.push(chunk("lo", 35.0, 45.0, 100.0));
        assert_eq!(line.text(), "Hello");
    }

    #[test]
    fn test_semantic_text_lines() {
        let mut block = SemanticText::from_line(TextLine::from_chunk(chunk("one", 30.0, 50.0, 100.0)));
        block.extend_last_line(TextLine::from_chunk(chunk("two", 53.0, 70.0, 100.0)));
        block.push_line(TextLine::from_chunk(chunk("three", 20.0, 50.0, 88.0)));

        assert_eq!(block.lines().len(), 2);
        assert_eq!(block.text(), "one two three");
        assert_eq!(block.left_x(), 20.0);
        assert_eq!(block.placement.bounding_box.bottom_y(), 86.0);
        assert_eq!(block.placement.page_number, Some(0));
    }
}
