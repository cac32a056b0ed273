//! Semantic tree parser for the JSON interchange format.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{
    BoundingBox, ImageChunk, LineArtChunk, Node, NodeContent, Placement, SemanticType, TextChunk,
};
use crate::options::ErrorMode;
use crate::tree::SemanticTree;

const TEXT_CHUNK_TAGS: &[&str] = &["PDTextChunk", "TextChunk"];
const IMAGE_CHUNK_TAGS: &[&str] = &["PDImageChunk", "ImageChunk"];
const LINE_ART_CHUNK_TAGS: &[&str] = &["PDLineArtChunk", "LineArtChunk"];

/// One node of a serialized content tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonNode {
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic_angle: Option<f64>,
    /// RGB or RGBA, each channel in 0..1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<[f64; 4]>,
    #[serde(rename = "baseLine", default, skip_serializing_if = "Option::is_none")]
    pub base_line: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<JsonNode>,
}

/// Builds a [`SemanticTree`] from serialized content trees.
#[derive(Debug, Clone, Default)]
pub struct TreeParser {
    error_mode: ErrorMode,
}

impl TreeParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose how malformed chunks are handled.
    ///
    /// With [`ErrorMode::Lenient`] a malformed chunk is logged and replaced by
    /// a plain leaf instead of failing the parse.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Parse a tree from a JSON string.
    pub fn parse_str(&self, json: &str) -> Result<SemanticTree> {
        let root: JsonNode = serde_json::from_str(json)?;
        self.build(&root)
    }

    /// Parse a tree from a reader.
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<SemanticTree> {
        let root: JsonNode = serde_json::from_reader(reader)?;
        self.build(&root)
    }

    /// Parse a tree from a file.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<SemanticTree> {
        let file = File::open(path.as_ref())?;
        self.parse_reader(BufReader::new(file))
    }

    /// Convert a deserialized node and its descendants.
    pub fn build(&self, root: &JsonNode) -> Result<SemanticTree> {
        let mut tree = SemanticTree::new(self.node(root)?);
        let mut pending = vec![(root, tree.root())];

        while let Some((json, id)) = pending.pop() {
            for child in &json.children {
                let child_id = tree.add_child(id, self.node(child)?);
                pending.push((child, child_id));
            }
        }

        tree.refresh_placements();
        log::debug!("Parsed tree with {} nodes", tree.len());
        Ok(tree)
    }

    fn node(&self, json: &JsonNode) -> Result<Node> {
        let tag = json.node_type.as_str();
        let chunk = if TEXT_CHUNK_TAGS.contains(&tag) {
            text_chunk(json).map(NodeContent::Text)
        } else if IMAGE_CHUNK_TAGS.contains(&tag) {
            placement(json).map(|p| NodeContent::Image(ImageChunk { placement: p }))
        } else if LINE_ART_CHUNK_TAGS.contains(&tag) {
            placement(json).map(|p| NodeContent::LineArt(LineArtChunk { placement: p }))
        } else {
            let mut node = Node::plain(SemanticType::from_tag(tag));
            if let Ok(placement) = placement(json) {
                *node.content_mut().placement_mut() = placement;
            }
            return Ok(node);
        };

        match (chunk, self.error_mode) {
            (Ok(content), _) => Ok(Node::new(content)),
            (Err(e), ErrorMode::Strict) => Err(e),
            (Err(e), ErrorMode::Lenient) => {
                log::warn!("Keeping malformed {} as plain node: {}", tag, e);
                Ok(Node::plain(None))
            }
        }
    }
}

fn placement(json: &JsonNode) -> Result<Placement> {
    let bbox = json.bounding_box.ok_or_else(|| {
        Error::MalformedTree(format!("{} without boundingBox", json.node_type))
    })?;
    if bbox.iter().any(|v| !v.is_finite()) {
        return Err(Error::MalformedTree(format!(
            "{} with non-finite boundingBox",
            json.node_type
        )));
    }
    let page = json
        .page_number
        .ok_or_else(|| Error::MalformedTree(format!("{} without pageNumber", json.node_type)))?;
    Ok(Placement::new(BoundingBox::from_array(bbox), page))
}

fn text_chunk(json: &JsonNode) -> Result<TextChunk> {
    let placement = placement(json)?;
    let text = json
        .value
        .clone()
        .ok_or_else(|| Error::MalformedTree(format!("{} without value", json.node_type)))?;
    let bbox = placement.bounding_box;
    let baseline = json.base_line.unwrap_or_else(|| bbox.bottom_y());
    let page = placement.page_number.unwrap_or_default();

    let mut chunk = TextChunk::new(text, bbox, baseline, page);
    if let Some(name) = &json.font_name {
        chunk.font_name = name.clone();
    }
    if let Some(size) = json.font_size.filter(|s| *s > 0.0) {
        chunk.font_size = size;
    }
    if let Some(weight) = json.font_weight {
        chunk.font_weight = weight;
    }
    if let Some(angle) = json.italic_angle {
        chunk.italic_angle = angle;
    }
    if let Some(color) = &json.color {
        for (slot, value) in chunk.color.iter_mut().zip(color) {
            *slot = *value;
        }
    }
    Ok(chunk)
}

/// Parse a tree from a JSON string in strict mode.
pub fn tree_from_json(json: &str) -> Result<SemanticTree> {
    TreeParser::new().parse_str(json)
}

/// Parse a tree from a reader in strict mode.
pub fn tree_from_reader<R: Read>(reader: R) -> Result<SemanticTree> {
    TreeParser::new().parse_reader(reader)
}

/// Load a tree from a file, or `None` when it cannot be read or is malformed.
pub fn try_load_tree<P: AsRef<Path>>(path: P) -> Option<SemanticTree> {
    let path = path.as_ref();
    match TreeParser::new().parse_file(path) {
        Ok(tree) => Some(tree),
        Err(e) => {
            log::warn!("No tree loaded from {}: {}", path.display(), e);
            None
        }
    }
}
