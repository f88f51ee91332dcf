//! Graph representation and algorithms module

pub mod adjacency;
pub mod builder;
pub mod traversal;

pub use adjacency::{Graph, NodeId, NodeIndex};
pub use builder::GraphBuilder;
pub use traversal::UNREACHABLE;
