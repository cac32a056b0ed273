//! Content tree ingestion.

mod tree_parser;

pub use tree_parser::{tree_from_json, tree_from_reader, try_load_tree, JsonNode, TreeParser};
