//! Analysis passes run over a [`SemanticTree`].
//!
//! A consumer is applied to every reachable node in post-order through
//! [`SemanticTree::for_each`]. Consumers may freely mutate the node they are
//! given and anything already visited below it. Several consumers compose as
//! sequential full passes, so a later pass observes every mutation made by an
//! earlier one.
//!
//! # Example
//!
//! ```
//! use wcagpdf::consumer::{ConsumerChain, NodeConsumer};
//! use wcagpdf::model::{Node, NodeId};
//! use wcagpdf::tree::SemanticTree;
//!
//! struct LeafCounter(usize);
//!
//! impl NodeConsumer for LeafCounter {
//!     fn accept(&mut self, tree: &mut SemanticTree, node: NodeId) {
//!         if tree.node(node).is_leaf() {
//!             self.0 += 1;
//!         }
//!     }
//! }
//!
//! let mut tree = SemanticTree::new(Node::plain(None));
//! let root = tree.root();
//! tree.add_child(root, Node::plain(None));
//!
//! let mut counter = LeafCounter(0);
//! tree.for_each(&mut counter);
//! assert_eq!(counter.0, 1);
//! ```

mod accumulated;
mod contrast;
mod list;
mod merge;
mod semantic;
mod stats;

pub use accumulated::AccumulatedNodeMapper;
pub use contrast::ContrastConsumer;
pub use list::{ListLabel, ListLabelDetector, OrdinalStyle};
pub use merge::{
    merge_probability, next_line_probability, same_line_probability, LineMerge, MergeKind,
};
pub use semantic::AccumulatedNodeConsumer;
pub use stats::{AnalysisStats, StatsConsumer};

use crate::model::NodeId;
use crate::tree::SemanticTree;

/// A single-argument operation applied to each node of a traversal.
pub trait NodeConsumer {
    /// Called once per reachable node, after all of its children.
    fn accept(&mut self, tree: &mut SemanticTree, node: NodeId);

    /// Called once before the first node of a pass.
    fn on_pass_start(&mut self, tree: &SemanticTree) {
        let _ = tree;
    }

    /// Called once after the last node of a pass.
    fn on_pass_end(&mut self, tree: &SemanticTree) {
        let _ = tree;
    }
}

impl<F> NodeConsumer for F
where
    F: FnMut(&mut SemanticTree, NodeId),
{
    fn accept(&mut self, tree: &mut SemanticTree, node: NodeId) {
        self(tree, node)
    }
}

/// Run one full pass of `consumer`, including its start and end hooks.
pub fn run_pass<C: NodeConsumer + ?Sized>(tree: &mut SemanticTree, consumer: &mut C) {
    consumer.on_pass_start(tree);
    tree.for_each(consumer);
    consumer.on_pass_end(tree);
}

/// Consumers run one after another, each over the whole tree.
///
/// Passes never interleave: the second consumer starts only once the first
/// has seen every node.
pub struct ConsumerChain<'a> {
    consumers: Vec<&'a mut dyn NodeConsumer>,
}

impl<'a> ConsumerChain<'a> {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self {
            consumers: Vec::new(),
        }
    }

    /// Add a consumer to the end of the chain.
    pub fn with_consumer(mut self, consumer: &'a mut dyn NodeConsumer) -> Self {
        self.consumers.push(consumer);
        self
    }

    /// Number of passes in the chain.
    pub fn len(&self) -> usize {
        self.consumers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consumers.is_empty()
    }

    /// Run every pass in order.
    pub fn run(&mut self, tree: &mut SemanticTree) {
        for consumer in self.consumers.iter_mut() {
            log::trace!("Starting pass over {} nodes", tree.arena_len());
            run_pass(tree, &mut **consumer);
        }
    }
}

impl Default for ConsumerChain<'_> {
    fn default() -> Self {
        Self::new()
    }
}
