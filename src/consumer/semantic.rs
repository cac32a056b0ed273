//! Bottom-up recovery of spans, paragraphs and lists.

use std::sync::Arc;

use super::accumulated::AccumulatedNodeMapper;
use super::list::ListLabelDetector;
use super::merge::{merge_probability, MergeKind};
use super::NodeConsumer;
use crate::model::{
    ListItemInfo, Node, NodeContent, NodeId, Placement, SemanticList, SemanticText, SemanticType,
    TextLine,
};
use crate::options::AnalysisOptions;
use crate::tree::SemanticTree;

/// Structural consumer that explains each node through its accumulated children.
///
/// Runs in post-order, so every child already has a verdict and a
/// representative in the mapper when its parent is visited. Every verdict is
/// recorded with [`AccumulatedNodeMapper::update_node`].
#[derive(Debug, Clone)]
pub struct AccumulatedNodeConsumer {
    mapper: AccumulatedNodeMapper,
    labels: ListLabelDetector,
    list_min_items: usize,
}

impl AccumulatedNodeConsumer {
    pub fn new(options: &AnalysisOptions) -> Self {
        Self {
            mapper: AccumulatedNodeMapper::new(),
            labels: ListLabelDetector::new(),
            list_min_items: options.list_min_items.max(2),
        }
    }

    /// Substitutions recorded so far.
    pub fn mapper(&self) -> &AccumulatedNodeMapper {
        &self.mapper
    }

    pub fn into_mapper(self) -> AccumulatedNodeMapper {
        self.mapper
    }

    fn accept_leaf(&mut self, tree: &mut SemanticTree, node: NodeId) {
        match tree.node(node).content() {
            NodeContent::Text(chunk) => {
                let span = SemanticText::from_line(TextLine::from_chunk(chunk.clone()));
                let span = detached(tree, NodeContent::Span(span), SemanticType::Span);
                self.mapper
                    .update_node(tree, node, Some(span), 1.0, SemanticType::Span);
            }
            NodeContent::Image(_) | NodeContent::LineArt(_) => {
                self.mapper
                    .update_node(tree, node, Some(node), 1.0, SemanticType::Figure);
            }
            NodeContent::Paragraph(_) => {
                self.mapper
                    .update_node(tree, node, Some(node), 1.0, SemanticType::Paragraph);
            }
            NodeContent::Span(_) => {
                self.mapper
                    .update_node(tree, node, Some(node), 1.0, SemanticType::Span);
            }
            NodeContent::List(_) => {
                self.mapper
                    .update_node(tree, node, Some(node), 1.0, SemanticType::List);
            }
            NodeContent::Plain(_) => {
                self.mapper
                    .update_node(tree, node, None, 0.0, SemanticType::Div);
            }
        }
    }

    fn accept_internal(&mut self, tree: &mut SemanticTree, node: NodeId) {
        let children: Vec<NodeId> = tree.node(node).children().to_vec();

        if children.len() == 1 {
            let child = children[0];
            let representative = self.mapper.contains(child).then(|| self.mapper.get(child));
            let child_node = tree.node(child);
            let score = child_node.correct_semantic_score();
            let semantic_type = child_node.semantic_type().unwrap_or(SemanticType::Div);
            self.mapper
                .update_node(tree, node, representative, score, semantic_type);
            return;
        }

        let scores: Vec<f64> = children
            .iter()
            .map(|&c| tree.node(c).correct_semantic_score())
            .collect();

        if children.iter().any(|&c| !self.mapper.contains(c)) {
            log::debug!("Node {} has unexplained children, grouping as container", node);
            self.accept_container(tree, node, &scores);
            return;
        }

        let accumulated: Vec<NodeId> = children.iter().map(|&c| self.mapper.get(c)).collect();
        let min_score = scores.iter().copied().fold(1.0, f64::min);

        let all_text = accumulated
            .iter()
            .all(|&a| tree.node(a).content().semantic_text().is_some());
        if all_text {
            if let Some(list) = self.text_labelled_list(tree, &accumulated) {
                log::debug!("Node {} recognised as list of {} items", node, list.len());
                let list = detached(tree, NodeContent::List(list), SemanticType::List);
                self.mapper
                    .update_node(tree, node, Some(list), min_score, SemanticType::List);
                return;
            }
            self.accept_text(tree, node, &accumulated, min_score);
            return;
        }

        let all_lists = accumulated
            .iter()
            .all(|&a| matches!(tree.node(a).content(), NodeContent::List(_)));
        if all_lists {
            if let Some(list) = self.continued_list(tree, &accumulated) {
                let list = detached(tree, NodeContent::List(list), SemanticType::List);
                self.mapper
                    .update_node(tree, node, Some(list), min_score, SemanticType::List);
                return;
            }
        }

        if let Some(list) = self.graphic_labelled_list(tree, &accumulated) {
            log::debug!("Node {} recognised as bulleted list of {} items", node, list.len());
            let list = detached(tree, NodeContent::List(list), SemanticType::List);
            self.mapper
                .update_node(tree, node, Some(list), min_score, SemanticType::List);
            return;
        }

        self.accept_container(tree, node, &scores);
    }

    /// Merge text-bearing representatives into one span or paragraph.
    fn accept_text(
        &mut self,
        tree: &mut SemanticTree,
        node: NodeId,
        accumulated: &[NodeId],
        min_score: f64,
    ) {
        let Some((block, probability, same_line)) = merge_text(tree, accumulated) else {
            log::debug!("Node {} spans several pages, no merged representative", node);
            self.mapper
                .update_node(tree, node, None, 0.0, SemanticType::Paragraph);
            return;
        };

        let score = min_score.min(probability);
        let (content, semantic_type) = if same_line {
            (NodeContent::Span(block), SemanticType::Span)
        } else {
            (NodeContent::Paragraph(block), SemanticType::Paragraph)
        };
        log::debug!(
            "Node {} merged into {} with score {:.4}",
            node,
            semantic_type,
            score
        );
        let merged = detached(tree, content, semantic_type);
        self.mapper
            .update_node(tree, node, Some(merged), score, semantic_type);
    }

    /// Group children that stay separate blocks.
    fn accept_container(&mut self, tree: &mut SemanticTree, node: NodeId, scores: &[f64]) {
        let mean = if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<f64>() / scores.len() as f64
        };
        let semantic_type = tree
            .node(node)
            .semantic_type()
            .filter(SemanticType::is_grouping)
            .unwrap_or(SemanticType::Div);
        self.mapper
            .update_node(tree, node, Some(node), mean, semantic_type);
    }

    fn text_labelled_list(&self, tree: &SemanticTree, accumulated: &[NodeId]) -> Option<SemanticList> {
        if accumulated.len() < self.list_min_items {
            return None;
        }

        let mut labels = Vec::with_capacity(accumulated.len());
        let mut items = Vec::with_capacity(accumulated.len());
        for &acc in accumulated {
            let text = tree.node(acc).content().semantic_text()?;
            let line = text.first_line()?;
            let (label, spelled) = self.labels.detect(&line.text())?;
            labels.push(label);
            items.push((Arc::new(line.clone()), spelled, text.placement));
        }
        if !ListLabelDetector::is_sequence(&labels) {
            return None;
        }

        let mut list = SemanticList::new(Placement::default());
        for (line, label, placement) in items {
            list.placement.absorb(&placement);
            list.push(ListItemInfo::Text {
                index: 0,
                semantic_type: SemanticType::ListItem,
                line,
                label,
            });
        }
        Some(list)
    }

    /// Items alternating between a graphic bullet and its text.
    fn graphic_labelled_list(
        &self,
        tree: &SemanticTree,
        accumulated: &[NodeId],
    ) -> Option<SemanticList> {
        if accumulated.len() % 2 != 0 || accumulated.len() < 2 * self.list_min_items {
            return None;
        }

        let mut list = SemanticList::new(Placement::default());
        let mut bullet_kind = None;
        for pair in accumulated.chunks(2) {
            let bullet = tree.node(pair[0]).content();
            let text = tree.node(pair[1]).content().semantic_text()?;
            let first_line = text.first_line()?;

            let bullet_box = bullet.placement().bounding_box;
            if bullet_box.right_x() > first_line.left_x()
                || bullet_box.vertical_overlap(first_line.bounding_box()) <= 0.0
            {
                return None;
            }

            let item = match bullet {
                NodeContent::Image(chunk) => ListItemInfo::Image {
                    index: 0,
                    semantic_type: SemanticType::ListItem,
                    chunk: Arc::new(chunk.clone()),
                },
                NodeContent::LineArt(chunk) => ListItemInfo::LineArt {
                    index: 0,
                    semantic_type: SemanticType::ListItem,
                    chunk: Arc::new(chunk.clone()),
                },
                _ => return None,
            };
            let kind = bullet.kind();
            if *bullet_kind.get_or_insert(kind) != kind {
                return None;
            }

            list.placement.absorb(bullet.placement());
            list.placement.absorb(&text.placement);
            list.push(item);
        }
        Some(list)
    }

    /// Join lists whose numbering carries on from one to the next.
    fn continued_list(&self, tree: &SemanticTree, accumulated: &[NodeId]) -> Option<SemanticList> {
        let mut merged: Option<SemanticList> = None;
        for &acc in accumulated {
            let NodeContent::List(list) = tree.node(acc).content() else {
                return None;
            };
            match merged.as_mut() {
                None => merged = Some(list.clone()),
                Some(current) => {
                    let last = current.items().last()?;
                    let first = list.items().first()?;
                    if !self.items_continue(last, first) {
                        return None;
                    }
                    current.append(list);
                }
            }
        }
        merged
    }

    fn items_continue(&self, last: &ListItemInfo, next: &ListItemInfo) -> bool {
        match (last, next) {
            (ListItemInfo::Text { label: a, .. }, ListItemInfo::Text { label: b, .. }) => {
                match (self.labels.detect(a), self.labels.detect(b)) {
                    (Some((a, _)), Some((b, _))) => ListLabelDetector::continues(a, b),
                    _ => false,
                }
            }
            (ListItemInfo::Image { .. }, ListItemInfo::Image { .. })
            | (ListItemInfo::LineArt { .. }, ListItemInfo::LineArt { .. }) => true,
            _ => false,
        }
    }
}

impl Default for AccumulatedNodeConsumer {
    fn default() -> Self {
        Self::new(&AnalysisOptions::default())
    }
}

impl NodeConsumer for AccumulatedNodeConsumer {
    fn accept(&mut self, tree: &mut SemanticTree, node: NodeId) {
        if tree.node(node).is_leaf() {
            self.accept_leaf(tree, node);
        } else {
            self.accept_internal(tree, node);
        }
    }

    fn on_pass_start(&mut self, _tree: &SemanticTree) {
        self.mapper = AccumulatedNodeMapper::new();
    }
}

fn detached(tree: &mut SemanticTree, content: NodeContent, semantic_type: SemanticType) -> NodeId {
    let mut node = Node::new(content);
    node.set_semantic_type(Some(semantic_type));
    tree.add_detached(node)
}

/// Concatenate text representatives in order.
///
/// Returns the merged block, the lowest join probability, and whether every
/// join continued the same line. `None` when the pieces sit on different pages.
fn merge_text(tree: &SemanticTree, accumulated: &[NodeId]) -> Option<(SemanticText, f64, bool)> {
    let (first, rest) = accumulated.split_first()?;
    let first_content = tree.node(*first).content();
    let mut block = first_content.semantic_text()?.clone();
    let page = block.placement.page_number;
    let mut same_line = matches!(first_content, NodeContent::Span(_));
    let mut probability: f64 = 1.0;

    for &acc in rest {
        let content = tree.node(acc).content();
        let text = content.semantic_text()?;
        if page.is_none() || text.placement.page_number != page {
            return None;
        }
        same_line &= matches!(content, NodeContent::Span(_));

        let mut lines = text.lines().iter().cloned();
        let Some(first_line) = lines.next() else {
            continue;
        };
        let merge = merge_probability(&block, &first_line);
        probability = probability.min(merge.probability);
        match merge.kind {
            MergeKind::SameLine => block.extend_last_line(first_line),
            MergeKind::NextLine => {
                same_line = false;
                block.push_line(first_line);
            }
        }
        for line in lines {
            same_line = false;
            block.push_line(line);
        }
    }

    Some((block, probability, same_line))
}
