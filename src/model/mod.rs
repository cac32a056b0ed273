//! Content model for semantic structure recovery.
//!
//! Leaf chunks (text, images, line art) come from an external PDF engine.
//! Consumers merge them into spans, paragraphs and lists, which are stored
//! as further [`NodeContent`] variants next to the original tree.

mod chunk;
mod geometry;
mod list_item;
mod node;
mod semantic_type;
mod text_line;

pub use chunk::{Chunk, ImageChunk, LineArtChunk, TextChunk, BASELINE_EPSILON};
pub use geometry::{BoundingBox, Placement};
pub use list_item::{ListItemInfo, SemanticList};
pub use node::{Node, NodeContent, NodeId};
pub use semantic_type::SemanticType;
pub use text_line::{SemanticText, TextLine};
