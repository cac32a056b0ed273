//! Substitution table from original nodes to their accumulated representatives.

use std::collections::HashMap;

use crate::model::{NodeId, SemanticType};
use crate::tree::SemanticTree;

/// Maps a node to the node that now represents it after merging.
///
/// Lookups of unmapped nodes resolve to the node itself. The table lives for
/// one analysis pass over one tree and is keyed by arena index, so identity
/// is stable for the whole pass.
#[derive(Debug, Clone, Default)]
pub struct AccumulatedNodeMapper {
    accumulated: HashMap<NodeId, NodeId>,
}

impl AccumulatedNodeMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current representative of `node`, or `node` itself when unmapped.
    pub fn get(&self, node: NodeId) -> NodeId {
        self.accumulated.get(&node).copied().unwrap_or(node)
    }

    /// Record that `node` is now represented by `accumulated`.
    pub fn put(&mut self, node: NodeId, accumulated: NodeId) {
        self.accumulated.insert(node, accumulated);
    }

    /// Check whether `node` has an explicit representative.
    pub fn contains(&self, node: NodeId) -> bool {
        self.accumulated.contains_key(&node)
    }

    pub fn len(&self) -> usize {
        self.accumulated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accumulated.is_empty()
    }

    /// Record the verdict for `node`.
    ///
    /// Without a representative the node scores 0 and no mapping is kept.
    /// Otherwise the original node receives the score and semantic type,
    /// the representative receives the node's bounding box and the same
    /// score, and `node` is mapped to the representative.
    ///
    /// An original without geometry (an unset box, as on plain nodes built
    /// in code) leaves the representative's merged extent in place.
    pub fn update_node(
        &mut self,
        tree: &mut SemanticTree,
        node: NodeId,
        accumulated: Option<NodeId>,
        score: f64,
        semantic_type: SemanticType,
    ) {
        let Some(accumulated) = accumulated else {
            log::debug!("Node {} has no representative, score collapses to 0", node);
            tree.node_mut(node).set_correct_semantic_score(0.0);
            return;
        };

        let original = tree.node_mut(node);
        original.set_correct_semantic_score(score);
        original.set_semantic_type(Some(semantic_type));
        let bounding_box = *original.bounding_box();

        let representative = tree.node_mut(accumulated);
        if !bounding_box.is_unset() {
            representative.set_bounding_box(bounding_box);
        }
        representative.set_correct_semantic_score(score);

        self.put(node, accumulated);
    }
}
