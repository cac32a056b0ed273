//! Depth-first traversal yielding children before their parent.

use super::SemanticTree;
use crate::model::NodeId;

/// Resumable post-order cursor over a [`SemanticTree`].
///
/// The cursor keeps an explicit stack of `(node, next unvisited child)` pairs
/// and holds no borrow of the tree between steps, so callers may mutate node
/// fields while a traversal is in progress.
#[derive(Debug, Clone)]
pub struct DepthFirstCursor {
    root: NodeId,
    stack: Vec<(NodeId, usize)>,
    current: Option<NodeId>,
}

impl DepthFirstCursor {
    /// Create a cursor positioned before the first node.
    pub fn new(root: NodeId) -> Self {
        Self {
            root,
            stack: vec![(root, 0)],
            current: None,
        }
    }

    /// Node yielded by the last step, if any.
    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    /// Restart the traversal and return its first node.
    pub fn first(&mut self, tree: &SemanticTree) -> Option<NodeId> {
        self.stack.clear();
        self.stack.push((self.root, 0));
        self.current = None;
        self.next(tree)
    }

    /// Advance to the next node, or `None` once every node was yielded.
    pub fn next(&mut self, tree: &SemanticTree) -> Option<NodeId> {
        loop {
            let Some(&(id, next_child)) = self.stack.last() else {
                self.current = None;
                return None;
            };
            match tree.node(id).children().get(next_child).copied() {
                Some(child) => {
                    if let Some(top) = self.stack.last_mut() {
                        top.1 += 1;
                    }
                    self.stack.push((child, 0));
                }
                None => {
                    self.stack.pop();
                    self.current = Some(id);
                    return Some(id);
                }
            }
        }
    }
}

/// Borrowing iterator adapter over [`DepthFirstCursor`].
pub struct DepthFirst<'a> {
    tree: &'a SemanticTree,
    cursor: DepthFirstCursor,
}

impl<'a> DepthFirst<'a> {
    pub(crate) fn new(tree: &'a SemanticTree) -> Self {
        Self {
            tree,
            cursor: DepthFirstCursor::new(tree.root()),
        }
    }

    pub fn current(&self) -> Option<NodeId> {
        self.cursor.current()
    }
}

impl Iterator for DepthFirst<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next(self.tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Node;

    /// root(a(c, d), b)
    fn small_tree() -> (SemanticTree, [NodeId; 5]) {
        let mut tree = SemanticTree::new(Node::plain(None));
        let root = tree.root();
        let a = tree.add_child(root, Node::plain(None));
        let b = tree.add_child(root, Node::plain(None));
        let c = tree.add_child(a, Node::plain(None));
        let d = tree.add_child(a, Node::plain(None));
        (tree, [root, a, b, c, d])
    }

    #[test]
    fn test_post_order() {
        let (tree, [root, a, b, c, d]) = small_tree();
        let order: Vec<NodeId> = tree.depth_first_iter().collect();
        assert_eq!(order, vec![c, d, a, b, root]);
    }

    #[test]
    fn test_cursor_first_restarts() {
        let (tree, [_, _, _, c, d]) = small_tree();
        let mut cursor = DepthFirstCursor::new(tree.root());
        assert_eq!(cursor.next(&tree), Some(c));
        assert_eq!(cursor.next(&tree), Some(d));
        assert_eq!(cursor.current(), Some(d));
        assert_eq!(cursor.first(&tree), Some(c));
    }

    #[test]
    fn test_cursor_exhausts() {
        let tree = SemanticTree::new(Node::plain(None));
        let mut cursor = DepthFirstCursor::new(tree.root());
        assert_eq!(cursor.next(&tree), Some(tree.root()));
        assert_eq!(cursor.next(&tree), None);
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.next(&tree), None);
    }

    #[test]
    fn test_deep_chain_does_not_recurse() {
        let mut tree = SemanticTree::new(Node::plain(None));
        let mut parent = tree.root();
        for _ in 0..100_000 {
            parent = tree.add_child(parent, Node::plain(None));
        }
        assert_eq!(tree.depth_first_iter().count(), 100_001);
        assert_eq!(tree.depth_first_iter().next(), Some(parent));
    }
}
