//! Arena-backed semantic tree and its traversal.
//!
//! Nodes live in one contiguous arena and refer to their children by
//! [`NodeId`]. Nodes created by consumers (merged spans, paragraphs, lists)
//! are added as detached entries: they share the arena but are not reachable
//! from the root, so traversal only ever visits the original tree.

mod iter;

pub use iter::{DepthFirst, DepthFirstCursor};

use crate::consumer::NodeConsumer;
use crate::model::{Node, NodeContent, NodeId};

/// A tree of content nodes owned by a single arena.
#[derive(Debug, Clone)]
pub struct SemanticTree {
    nodes: Vec<Node>,
    root: NodeId,
}

#[allow(clippy::len_without_is_empty)]
impl SemanticTree {
    /// Create a tree holding only `root`.
    pub fn new(root: Node) -> Self {
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Borrow a node.
    ///
    /// Ids are only handed out by this tree, so every id is in range.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Append `node` as the last child of `parent`.
    pub fn add_child(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = self.add_detached(node);
        self.nodes[parent.0].push_child(id);
        id
    }

    /// Store a node that is not part of the traversed tree.
    pub fn add_detached(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Number of arena entries, detached nodes included.
    pub fn arena_len(&self) -> usize {
        self.nodes.len()
    }

    /// Number of nodes reachable from the root.
    ///
    /// Always at least 1 since a tree cannot exist without its root.
    pub fn len(&self) -> usize {
        self.depth_first_iter().count()
    }

    /// Post-order traversal from the root. Each call starts afresh.
    pub fn depth_first_iter(&self) -> DepthFirst<'_> {
        DepthFirst::new(self)
    }

    /// Apply `consumer` to every reachable node, children before parents.
    pub fn for_each<C: NodeConsumer + ?Sized>(&mut self, consumer: &mut C) {
        let mut cursor = DepthFirstCursor::new(self.root);
        while let Some(id) = cursor.next(self) {
            consumer.accept(self, id);
        }
    }

    /// Score of the root node.
    pub fn root_score(&self) -> f64 {
        self.node(self.root).correct_semantic_score()
    }

    /// Grow every plain node's placement to cover its children.
    pub fn refresh_placements(&mut self) {
        let order: Vec<NodeId> = self.depth_first_iter().collect();
        for id in order {
            if !matches!(self.node(id).content(), NodeContent::Plain(_)) {
                continue;
            }
            let placements: Vec<_> = self
                .node(id)
                .children()
                .iter()
                .map(|&child| *self.node(child).content().placement())
                .collect();
            let own = self.node_mut(id).content_mut().placement_mut();
            for placement in &placements {
                own.absorb(placement);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, ImageChunk, Node, NodeContent};

    fn balanced(depth: usize, fanout: usize) -> SemanticTree {
        let mut tree = SemanticTree::new(Node::plain(None));
        let mut level = vec![tree.root()];
        for _ in 0..depth {
            let mut next = Vec::new();
            for parent in level {
                for _ in 0..fanout {
                    next.push(tree.add_child(parent, Node::plain(None)));
                }
            }
            level = next;
        }
        tree
    }

    #[test]
    fn test_root_is_visited_last() {
        let tree = balanced(2, 3);
        let order: Vec<NodeId> = tree.depth_first_iter().collect();
        assert_eq!(order.len(), 13);
        assert_eq!(order.iter().position(|&id| id == tree.root()), Some(12));
    }

    #[test]
    fn test_children_before_parent() {
        let tree = balanced(3, 2);
        let order: Vec<NodeId> = tree.depth_first_iter().collect();
        for (pos, &id) in order.iter().enumerate() {
            for child in tree.node(id).children() {
                let child_pos = order.iter().position(|c| c == child).unwrap();
                assert!(child_pos < pos);
            }
        }
    }

    #[test]
    fn test_detached_nodes_are_not_traversed() {
        let mut tree = balanced(1, 2);
        tree.add_detached(Node::plain(None));
        assert_eq!(tree.arena_len(), 4);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_for_each_sees_earlier_mutations() {
        let mut tree = balanced(1, 2);
        tree.for_each(&mut |tree: &mut SemanticTree, id: NodeId| {
            let sum: f64 = tree
                .node(id)
                .children()
                .iter()
                .map(|&c| tree.node(c).correct_semantic_score())
                .sum();
            let node = tree.node_mut(id);
            node.set_correct_semantic_score(if node.is_leaf() { 1.0 } else { sum });
        });
        assert_eq!(tree.root_score(), 2.0);
    }

    #[test]
    fn test_len_counts_root() {
        let mut tree = SemanticTree::new(Node::plain(None));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.arena_len(), 1);

        let root = tree.root();
        tree.add_detached(Node::plain(None));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.arena_len(), 2);

        tree.add_child(root, Node::plain(None));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_refresh_placements() {
        let mut tree = SemanticTree::new(Node::plain(None));
        let root = tree.root();
        tree.add_child(
            root,
            Node::new(NodeContent::Image(ImageChunk::new(
                BoundingBox::new(0.0, 0.0, 10.0, 10.0),
                1,
            ))),
        );
        tree.add_child(
            root,
            Node::new(NodeContent::Image(ImageChunk::new(
                BoundingBox::new(5.0, 5.0, 20.0, 30.0),
                1,
            ))),
        );
        tree.refresh_placements();
        assert_eq!(
            tree.node(root).bounding_box(),
            &BoundingBox::new(0.0, 0.0, 20.0, 30.0)
        );
        assert_eq!(tree.node(root).page_number(), Some(1));
    }
}
