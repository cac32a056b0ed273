//! List items and the lists built from them.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::chunk::{ImageChunk, LineArtChunk};
use super::geometry::Placement;
use super::semantic_type::SemanticType;
use super::text_line::TextLine;

/// One item of a detected list.
///
/// Identity is the `(index, semantic_type)` pair; the label payload does not
/// take part in equality or hashing. Payloads are shared, so copies made with
/// [`ListItemInfo::create_list_item_info`] point at the same line or chunk.
#[derive(Debug, Clone)]
pub enum ListItemInfo {
    /// An item without a recognised label
    Plain {
        index: usize,
        semantic_type: SemanticType,
    },
    /// An item whose label is text at the start of its first line
    Text {
        index: usize,
        semantic_type: SemanticType,
        line: Arc<TextLine>,
        label: String,
    },
    /// An item labelled by an image bullet
    Image {
        index: usize,
        semantic_type: SemanticType,
        chunk: Arc<ImageChunk>,
    },
    /// An item labelled by a line-art bullet
    LineArt {
        index: usize,
        semantic_type: SemanticType,
        chunk: Arc<LineArtChunk>,
    },
}

impl ListItemInfo {
    /// Copy an item, keeping its variant and payload.
    pub fn create_list_item_info(info: &ListItemInfo) -> ListItemInfo {
        match info {
            ListItemInfo::Plain {
                index,
                semantic_type,
            } => ListItemInfo::Plain {
                index: *index,
                semantic_type: *semantic_type,
            },
            ListItemInfo::Text {
                index,
                semantic_type,
                line,
                label,
            } => ListItemInfo::Text {
                index: *index,
                semantic_type: *semantic_type,
                line: Arc::clone(line),
                label: label.clone(),
            },
            ListItemInfo::Image {
                index,
                semantic_type,
                chunk,
            } => ListItemInfo::Image {
                index: *index,
                semantic_type: *semantic_type,
                chunk: Arc::clone(chunk),
            },
            ListItemInfo::LineArt {
                index,
                semantic_type,
                chunk,
            } => ListItemInfo::LineArt {
                index: *index,
                semantic_type: *semantic_type,
                chunk: Arc::clone(chunk),
            },
        }
    }

    /// Position of the item within its list.
    pub fn index(&self) -> usize {
        match self {
            ListItemInfo::Plain { index, .. }
            | ListItemInfo::Text { index, .. }
            | ListItemInfo::Image { index, .. }
            | ListItemInfo::LineArt { index, .. } => *index,
        }
    }

    pub fn semantic_type(&self) -> SemanticType {
        match self {
            ListItemInfo::Plain { semantic_type, .. }
            | ListItemInfo::Text { semantic_type, .. }
            | ListItemInfo::Image { semantic_type, .. }
            | ListItemInfo::LineArt { semantic_type, .. } => *semantic_type,
        }
    }

    fn index_mut(&mut self) -> &mut usize {
        match self {
            ListItemInfo::Plain { index, .. }
            | ListItemInfo::Text { index, .. }
            | ListItemInfo::Image { index, .. }
            | ListItemInfo::LineArt { index, .. } => index,
        }
    }

    /// First line of a text-labelled item.
    pub fn text_line(&self) -> Option<&TextLine> {
        match self {
            ListItemInfo::Text { line, .. } => Some(line.as_ref()),
            _ => None,
        }
    }

    /// Label text of a text-labelled item.
    pub fn label(&self) -> Option<&str> {
        match self {
            ListItemInfo::Text { label, .. } => Some(label.as_str()),
            _ => None,
        }
    }

    pub fn image_chunk(&self) -> Option<&ImageChunk> {
        match self {
            ListItemInfo::Image { chunk, .. } => Some(chunk.as_ref()),
            _ => None,
        }
    }

    pub fn line_art_chunk(&self) -> Option<&LineArtChunk> {
        match self {
            ListItemInfo::LineArt { chunk, .. } => Some(chunk.as_ref()),
            _ => None,
        }
    }
}

impl PartialEq for ListItemInfo {
    fn eq(&self, other: &Self) -> bool {
        self.index() == other.index() && self.semantic_type() == other.semantic_type()
    }
}

impl Eq for ListItemInfo {}

impl Hash for ListItemInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index().hash(state);
        self.semantic_type().hash(state);
    }
}

/// A detected list: items in reading order.
#[derive(Debug, Clone, Default)]
pub struct SemanticList {
    /// Box and page of the whole list
    pub placement: Placement,

    items: Vec<ListItemInfo>,
}

impl SemanticList {
    pub fn new(placement: Placement) -> Self {
        Self {
            placement,
            items: Vec::new(),
        }
    }

    /// Add an item; its index becomes its position in the list.
    pub fn push(&mut self, mut item: ListItemInfo) {
        *item.index_mut() = self.items.len();
        self.items.push(item);
    }

    /// Re-home every item of `other` at the end of this list.
    pub fn append(&mut self, other: &SemanticList) {
        for item in &other.items {
            self.push(ListItemInfo::create_list_item_info(item));
        }
        self.placement.absorb(&other.placement);
    }

    pub fn items(&self) -> &[ListItemInfo] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
