//! Summary counts of an analysed tree.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{AccumulatedNodeMapper, NodeConsumer};
use crate::model::{NodeContent, NodeId, SemanticType};
use crate::tree::SemanticTree;

/// Counts gathered by [`StatsConsumer`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisStats {
    pub nodes: usize,
    pub paragraphs: usize,
    pub spans: usize,
    pub lists: usize,
    pub list_items: usize,
    pub figures: usize,
    pub containers: usize,
    /// Nodes scored 0
    pub unclassified: usize,
    pub chunks_checked: usize,
    pub contrast_failures: usize,
}

/// Tallies node classifications after the structural pass.
///
/// With a mapper, nodes that share a representative are classified once, so
/// a wrapper passing its single child through is not counted twice.
#[derive(Debug, Clone, Default)]
pub struct StatsConsumer<'a> {
    mapper: Option<&'a AccumulatedNodeMapper>,
    seen: HashSet<NodeId>,
    stats: AnalysisStats,
}

impl<'a> StatsConsumer<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify by representative, counting list items from the merged lists.
    pub fn with_mapper(mut self, mapper: &'a AccumulatedNodeMapper) -> Self {
        self.mapper = Some(mapper);
        self
    }

    pub fn stats(&self) -> &AnalysisStats {
        &self.stats
    }

    pub fn into_stats(self) -> AnalysisStats {
        self.stats
    }
}

impl NodeConsumer for StatsConsumer<'_> {
    fn accept(&mut self, tree: &mut SemanticTree, id: NodeId) {
        let node = tree.node(id);
        let stats = &mut self.stats;
        stats.nodes += 1;

        if node.correct_semantic_score() <= 0.0 {
            stats.unclassified += 1;
        }
        if let NodeContent::Text(chunk) = node.content() {
            if let Some(verdict) = &chunk.contrast {
                stats.chunks_checked += 1;
                if !verdict.compliant {
                    stats.contrast_failures += 1;
                }
            }
        }

        let representative = self.mapper.map_or(id, |m| m.get(id));
        if !self.seen.insert(representative) {
            return;
        }
        match node.semantic_type() {
            Some(SemanticType::Paragraph) => stats.paragraphs += 1,
            Some(SemanticType::Span) => stats.spans += 1,
            Some(SemanticType::List) => {
                stats.lists += 1;
                if let NodeContent::List(list) = tree.node(representative).content() {
                    stats.list_items += list.len();
                }
            }
            Some(SemanticType::Figure) => stats.figures += 1,
            Some(t) if t.is_grouping() && !node.is_leaf() => stats.containers += 1,
            _ => {}
        }
    }

    fn on_pass_start(&mut self, _tree: &SemanticTree) {
        self.seen.clear();
        self.stats = AnalysisStats::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consumer::{run_pass, AccumulatedNodeConsumer};
    use crate::model::{BoundingBox, Node, TextChunk};

    fn text(value: &str, baseline: f64) -> Node {
        Node::new(NodeContent::Text(
            TextChunk::new(
                value,
                BoundingBox::new(10.0, baseline - 2.0, 90.0, baseline + 8.0),
                baseline,
                0,
            )
            .with_font("Helvetica", 10.0),
        ))
    }

    #[test]
    fn test_counts_after_structural_pass() {
        let mut tree = SemanticTree::new(Node::plain(Some(SemanticType::Document)));
        let root = tree.root();
        let para = tree.add_child(root, Node::plain(None));
        tree.add_child(para, text("First line", 100.0));
        tree.add_child(para, text("second line", 88.0));
        tree.add_child(root, Node::plain(None));

        run_pass(&mut tree, &mut AccumulatedNodeConsumer::default());
        let mut stats = StatsConsumer::new();
        run_pass(&mut tree, &mut stats);
        let stats = stats.into_stats();

        assert_eq!(stats.nodes, 5);
        assert_eq!(stats.paragraphs, 1);
        assert_eq!(stats.spans, 2);
        assert_eq!(stats.containers, 1);
        assert_eq!(stats.unclassified, 1);
        assert_eq!(stats.chunks_checked, 0);
    }

    #[test]
    fn test_mapper_dedupes_pass_through_and_counts_items() {
        let mut tree = SemanticTree::new(Node::plain(Some(SemanticType::Document)));
        let root = tree.root();
        let list = tree.add_child(root, Node::plain(None));
        tree.add_child(list, text("1. Apples", 100.0));
        tree.add_child(list, text("2. Pears", 88.0));

        let mut structure = AccumulatedNodeConsumer::default();
        run_pass(&mut tree, &mut structure);
        let mapper = structure.into_mapper();
        let mut stats = StatsConsumer::new().with_mapper(&mapper);
        run_pass(&mut tree, &mut stats);

        assert_eq!(stats.stats().lists, 1);
        assert_eq!(stats.stats().list_items, 2);
        assert_eq!(stats.stats().spans, 2);
    }
}
