//! Tree nodes: content payloads plus the mutable semantic verdict.

use std::fmt;

use super::chunk::{ImageChunk, LineArtChunk, TextChunk};
use super::geometry::{BoundingBox, Placement};
use super::list_item::SemanticList;
use super::semantic_type::SemanticType;
use super::text_line::SemanticText;

/// Stable index of a node inside its [`SemanticTree`](crate::tree::SemanticTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Arena position of the node.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a node carries besides its children.
#[derive(Debug, Clone)]
pub enum NodeContent {
    /// A grouping node without payload
    Plain(Placement),
    /// A text chunk leaf
    Text(TextChunk),
    /// An image leaf
    Image(ImageChunk),
    /// A line-art leaf
    LineArt(LineArtChunk),
    /// Lines merged into a paragraph
    Paragraph(SemanticText),
    /// Chunks merged into an inline span
    Span(SemanticText),
    /// Items recognised as a list
    List(SemanticList),
}

impl NodeContent {
    pub fn placement(&self) -> &Placement {
        match self {
            NodeContent::Plain(placement) => placement,
            NodeContent::Text(chunk) => &chunk.placement,
            NodeContent::Image(chunk) => &chunk.placement,
            NodeContent::LineArt(chunk) => &chunk.placement,
            NodeContent::Paragraph(text) | NodeContent::Span(text) => &text.placement,
            NodeContent::List(list) => &list.placement,
        }
    }

    pub fn placement_mut(&mut self) -> &mut Placement {
        match self {
            NodeContent::Plain(placement) => placement,
            NodeContent::Text(chunk) => &mut chunk.placement,
            NodeContent::Image(chunk) => &mut chunk.placement,
            NodeContent::LineArt(chunk) => &mut chunk.placement,
            NodeContent::Paragraph(text) | NodeContent::Span(text) => &mut text.placement,
            NodeContent::List(list) => &mut list.placement,
        }
    }

    /// Text-bearing payload (span or paragraph).
    pub fn semantic_text(&self) -> Option<&SemanticText> {
        match self {
            NodeContent::Paragraph(text) | NodeContent::Span(text) => Some(text),
            _ => None,
        }
    }

    /// Short name of the variant, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            NodeContent::Plain(_) => "plain",
            NodeContent::Text(_) => "text",
            NodeContent::Image(_) => "image",
            NodeContent::LineArt(_) => "line-art",
            NodeContent::Paragraph(_) => "paragraph",
            NodeContent::Span(_) => "span",
            NodeContent::List(_) => "list",
        }
    }
}

/// A tree element: payload, children and the semantic verdict consumers write.
#[derive(Debug, Clone)]
pub struct Node {
    semantic_type: Option<SemanticType>,
    correct_semantic_score: f64,
    children: Option<Vec<NodeId>>,
    content: NodeContent,
}

impl Node {
    /// Create a leaf node.
    pub fn new(content: NodeContent) -> Self {
        Self {
            semantic_type: None,
            correct_semantic_score: 0.0,
            children: None,
            content,
        }
    }

    /// Create a plain grouping node with no payload.
    pub fn plain(semantic_type: Option<SemanticType>) -> Self {
        let mut node = Self::new(NodeContent::Plain(Placement::default()));
        node.semantic_type = semantic_type;
        node
    }

    pub fn semantic_type(&self) -> Option<SemanticType> {
        self.semantic_type
    }

    pub fn set_semantic_type(&mut self, semantic_type: Option<SemanticType>) {
        self.semantic_type = semantic_type;
    }

    /// Confidence in `[0, 1]` that the recovered structure is right.
    pub fn correct_semantic_score(&self) -> f64 {
        self.correct_semantic_score
    }

    pub fn set_correct_semantic_score(&mut self, score: f64) {
        self.correct_semantic_score = score;
    }

    /// Child ids in order; empty for leaves.
    pub fn children(&self) -> &[NodeId] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn child_count(&self) -> usize {
        self.children().len()
    }

    pub fn is_leaf(&self) -> bool {
        self.child_count() < 1
    }

    pub(crate) fn push_child(&mut self, child: NodeId) {
        self.children.get_or_insert_with(Vec::new).push(child);
    }

    pub fn content(&self) -> &NodeContent {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut NodeContent {
        &mut self.content
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.content.placement().bounding_box
    }

    pub fn set_bounding_box(&mut self, bounding_box: BoundingBox) {
        self.content.placement_mut().bounding_box = bounding_box;
    }

    pub fn page_number(&self) -> Option<u32> {
        self.content.placement().page_number
    }

    /// Visible text of the node's own payload.
    pub fn text(&self) -> Option<String> {
        match &self.content {
            NodeContent::Text(chunk) => Some(chunk.text.clone()),
            NodeContent::Paragraph(text) | NodeContent::Span(text) => Some(text.text()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_without_children() {
        let node = Node::plain(None);
        assert!(node.is_leaf());
        assert_eq!(node.child_count(), 0);
        assert_eq!(node.correct_semantic_score(), 0.0);
    }

    #[test]
    fn test_push_child_makes_internal() {
        let mut node = Node::plain(Some(SemanticType::Div));
        node.push_child(NodeId(3));
        assert!(!node.is_leaf());
        assert_eq!(node.children(), &[NodeId(3)]);
    }

    #[test]
    fn test_bounding_box_dispatch() {
        let bbox = BoundingBox::new(1.0, 2.0, 3.0, 4.0);
        let mut node = Node::new(NodeContent::Image(ImageChunk::new(bbox, 0)));
        assert_eq!(node.bounding_box(), &bbox);

        let grown = BoundingBox::new(0.0, 0.0, 5.0, 5.0);
        node.set_bounding_box(grown);
        match node.content() {
            NodeContent::Image(chunk) => assert_eq!(chunk.placement.bounding_box, grown),
            _ => unreachable!(),
        }
    }
}
