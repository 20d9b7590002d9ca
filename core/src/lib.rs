//! graph-engine-core: In-memory graph store and traversal engine.
//!
//! A pure Rust library that keeps an insertion-ordered adjacency list for a
//! directed or undirected graph and answers reachability questions over it:
//! DFS, BFS with distances, path finding (any path or shortest), cycle
//! detection and connected components.
//!
//! Single-threaded and synchronous. Traversal results are owned snapshots
//! that never alias the graph's internal storage.
//!
//! ```
//! use graph_engine_core::{Graph, Node};
//!
//! let mut graph = Graph::undirected();
//! let (a, b, c) = (Node::named("a"), Node::named("b"), Node::named("c"));
//! graph.add_edge(&a, &b)?;
//! graph.add_edge(&b, &c)?;
//!
//! let path = graph.shortest_path(&a, &c)?;
//! assert_eq!(path.len(), 3);
//! assert_eq!(graph.distance(&a, &c), Some(2));
//! assert!(!graph.has_cycle());
//! # Ok::<(), graph_engine_core::GraphError>(())
//! ```

mod config;
mod error;
mod graph;
mod node;
mod result;
mod traversal;

pub use config::{CycleMode, GraphConfig, Orientation};
pub use error::{ErrorKind, GraphError, Result};
pub use graph::Graph;
pub use node::Node;
pub use result::{DegreeResult, PathStrategy, TraversalResult};
pub use traversal::{reconstruct_path, Traversal};
