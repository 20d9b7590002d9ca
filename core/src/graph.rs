use std::collections::HashMap;

use indexmap::IndexSet;
use tracing::{debug, warn};

use crate::config::{GraphConfig, Orientation};
use crate::error::{GraphError, Result};
use crate::node::Node;
use crate::result::{DegreeResult, PathStrategy, TraversalResult};
use crate::traversal::{reconstruct_path, Adjacency, Traversal};

/// In-memory graph: an insertion-ordered adjacency list plus a fixed orientation.
///
/// Undirected edges are stored twice (`a → b` and `b → a`). Self-loops are
/// rejected for both orientations. Node and neighbor iteration follow
/// insertion order.
///
/// Not thread-safe. Traversals borrow the adjacency map, so the borrow
/// checker rules out mutation while one is in flight.
#[derive(Debug, Clone)]
pub struct Graph<T> {
    adjacency: Adjacency<T>,
    config: GraphConfig,
}

impl<T> Graph<T> {
    pub fn new(orientation: Orientation) -> Self {
        Self::with_config(GraphConfig::new(orientation))
    }

    pub fn directed() -> Self {
        Self::new(Orientation::Directed)
    }

    pub fn undirected() -> Self {
        Self::new(Orientation::Undirected)
    }

    /// Pre-allocate for a known node count.
    pub fn with_capacity(orientation: Orientation, node_count: usize) -> Self {
        Self::with_config(GraphConfig::new(orientation).with_node_capacity(node_count))
    }

    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            adjacency: Adjacency::with_capacity(config.node_capacity),
            config,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.config.orientation
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub(crate) fn adjacency(&self) -> &Adjacency<T> {
        &self.adjacency
    }

    pub fn node_exists(&self, node: &Node<T>) -> bool {
        self.adjacency.contains_key(node)
    }

    /// Look up the stored node by name.
    pub fn node(&self, name: &str) -> Option<&Node<T>> {
        self.adjacency.get_key_value(name).map(|(k, _)| k)
    }

    /// All nodes in order of first insertion.
    pub fn nodes(&self) -> Vec<&Node<T>> {
        self.adjacency.keys().collect()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Number of edges. Undirected edges are stored twice but counted once.
    pub fn edge_count(&self) -> usize {
        let stored: usize = self.adjacency.values().map(|v| v.len()).sum();
        match self.orientation() {
            Orientation::Directed => stored,
            Orientation::Undirected => stored / 2,
        }
    }

    /// All edges as `(from, to)` pairs in adjacency order. Undirected edges
    /// are listed once, with the earlier-inserted endpoint first.
    pub fn edges(&self) -> Vec<(&Node<T>, &Node<T>)> {
        let directed = self.orientation().is_directed();
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(i, (from, neighbors))| {
                neighbors
                    .iter()
                    .filter(move |to| {
                        directed || self.adjacency.get_index_of(*to).is_some_and(|j| j > i)
                    })
                    .map(move |to| (from, to))
            })
            .collect()
    }

    pub fn has_edge(&self, from: &Node<T>, to: &Node<T>) -> bool {
        self.adjacency
            .get(from)
            .is_some_and(|neighbors| neighbors.contains(to))
    }

    /// Out-neighbors in insertion order. Empty for an absent node.
    pub fn neighbors(&self, node: &Node<T>) -> Vec<&Node<T>> {
        self.adjacency
            .get(node)
            .map(|neighbors| neighbors.iter().collect())
            .unwrap_or_default()
    }

    /// Out-degree (the plain degree for undirected graphs). Zero for an absent node.
    pub fn degree(&self, node: &Node<T>) -> usize {
        self.adjacency.get(node).map_or(0, |neighbors| neighbors.len())
    }

    /// Direct adjacency, not reachability. Reflexive for present nodes.
    pub fn is_connected(&self, a: &Node<T>, b: &Node<T>) -> bool {
        if !self.node_exists(a) || !self.node_exists(b) {
            return false;
        }
        a == b || self.has_edge(a, b)
    }

    /// Approximate memory held by the adjacency structure, in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let node_size = size_of::<Node<T>>();
        let set_size = size_of::<IndexSet<Node<T>>>();
        self.adjacency
            .iter()
            .map(|(node, neighbors)| {
                let entries: usize = neighbors
                    .iter()
                    .map(|nb| node_size + nb.name().len())
                    .sum();
                node_size + node.name().len() + set_size + entries
            })
            .sum()
    }

    /// Remove every node and edge. Orientation and configuration are kept.
    pub fn clear(&mut self) {
        debug!(nodes = self.adjacency.len(), "cleared graph");
        self.adjacency.clear();
    }

    fn require_identity(node: &Node<T>) -> Result<()> {
        if node.is_blank() {
            warn!("rejected node with blank name");
            return Err(GraphError::InvalidArgument {
                reason: "node name must not be blank".to_string(),
            });
        }
        Ok(())
    }

    fn require_present(&self, node: &Node<T>) -> Result<()> {
        if !self.node_exists(node) {
            warn!(node = %node, "node not found");
            return Err(GraphError::not_found(node.name()));
        }
        Ok(())
    }

    fn reject_self_loop(&self, from: &Node<T>, to: &Node<T>, verb: &str) -> Result<()> {
        if from == to {
            warn!(node = %from, "rejected self-loop");
            return Err(GraphError::InvalidOperation {
                operation: format!("{} self-loop '{}' -> '{}'", verb, from, to),
                orientation: self.orientation(),
            });
        }
        Ok(())
    }
}

impl<T: Clone> Graph<T> {
    /// Hand out a traversal engine bound to the current adjacency list.
    pub fn traversal(&self) -> Traversal<'_, T> {
        Traversal::new(&self.adjacency, self.config.orientation, self.config.cycle_mode)
    }

    /// Insert a node. A node with the same name already present is left as is.
    pub fn add_node(&mut self, node: Node<T>) -> Result<()> {
        Self::require_identity(&node)?;
        if self.adjacency.contains_key(&node) {
            return Ok(());
        }
        debug!(node = %node, "added node");
        self.adjacency.insert(node, IndexSet::new());
        Ok(())
    }

    /// Remove a node and every edge pointing at it. Returns the stored node.
    pub fn remove_node(&mut self, node: &Node<T>) -> Result<Node<T>> {
        Self::require_identity(node)?;

        let Some((removed, _)) = self.adjacency.shift_remove_entry(node) else {
            warn!(node = %node, "node not found");
            return Err(GraphError::not_found(node.name()));
        };
        for neighbors in self.adjacency.values_mut() {
            neighbors.shift_remove(node);
        }
        debug!(node = %removed, "removed node");
        Ok(removed)
    }

    /// Stored copy of `node`, inserting it first if absent.
    fn intern(&mut self, node: &Node<T>) -> Node<T> {
        let entry = self.adjacency.entry(node.clone());
        let key = entry.key().clone();
        entry.or_default();
        key
    }

    /// Add an edge, inserting missing endpoints. Existing edges are left as
    /// is. Undirected graphs also store the mirror edge.
    pub fn add_edge(&mut self, from: &Node<T>, to: &Node<T>) -> Result<()> {
        Self::require_identity(from)?;
        Self::require_identity(to)?;
        self.reject_self_loop(from, to, "add")?;

        let from = self.intern(from);
        let to = self.intern(to);
        let directed = self.orientation().is_directed();

        let added = self
            .adjacency
            .entry(from.clone())
            .or_default()
            .insert(to.clone());
        if !directed {
            self.adjacency.entry(to.clone()).or_default().insert(from.clone());
        }

        if added {
            debug!(from = %from, to = %to, "added edge");
        }
        Ok(())
    }

    /// Remove an edge (both directions when undirected). Both endpoints must
    /// exist; a missing edge between present nodes is a no-op.
    pub fn remove_edge(&mut self, from: &Node<T>, to: &Node<T>) -> Result<()> {
        Self::require_identity(from)?;
        Self::require_identity(to)?;
        self.reject_self_loop(from, to, "remove")?;
        self.require_present(from)?;
        self.require_present(to)?;

        let mut removed = self
            .adjacency
            .get_mut(from)
            .is_some_and(|neighbors| neighbors.shift_remove(to));
        if !self.orientation().is_directed() {
            removed |= self
                .adjacency
                .get_mut(to)
                .is_some_and(|neighbors| neighbors.shift_remove(from));
        }

        if removed {
            debug!(from = %from, to = %to, "removed edge");
        }
        Ok(())
    }

    /// Add each `(from, to)` pair in turn, stopping at the first failure.
    pub fn extend_edges<I>(&mut self, edges: I) -> Result<()>
    where
        I: IntoIterator<Item = (Node<T>, Node<T>)>,
    {
        for (from, to) in edges {
            self.add_edge(&from, &to)?;
        }
        Ok(())
    }

    pub fn dfs(&self, start: &Node<T>) -> TraversalResult<T> {
        self.traversal().dfs(start)
    }

    pub fn bfs(&self, start: &Node<T>) -> TraversalResult<T> {
        self.traversal().bfs(start)
    }

    /// Hop count of the shortest path, or `None` if `b` is unreachable or
    /// either endpoint is absent.
    pub fn distance(&self, a: &Node<T>, b: &Node<T>) -> Option<usize> {
        if !self.node_exists(a) || !self.node_exists(b) {
            return None;
        }
        if a == b {
            return Some(0);
        }
        self.traversal().bfs(a).distance_to(b)
    }

    pub fn is_reachable(&self, a: &Node<T>, b: &Node<T>) -> bool {
        self.distance(a, b).is_some()
    }

    /// Validate path endpoints and return their stored instances.
    fn path_endpoints(&self, start: &Node<T>, end: &Node<T>) -> Result<(Node<T>, Node<T>)> {
        Self::require_identity(start)?;
        Self::require_identity(end)?;
        let start = self
            .node(start.name())
            .ok_or_else(|| GraphError::not_found(start.name()))?;
        let end = self
            .node(end.name())
            .ok_or_else(|| GraphError::not_found(end.name()))?;
        Ok((start.clone(), end.clone()))
    }

    fn search_path(
        &self,
        start: &Node<T>,
        end: &Node<T>,
        strategy: PathStrategy,
    ) -> Result<Vec<Node<T>>> {
        let (start, end) = self.path_endpoints(start, end)?;
        if start == end {
            return Ok(vec![start]);
        }

        let result = match strategy {
            PathStrategy::DepthFirst => self.traversal().dfs_with_parents(&start, &end),
            PathStrategy::Shortest => self.traversal().bfs_with_parents(&start, &end),
        };
        if !result.target_reached {
            debug!(start = %start, end = %end, visited = result.len(), "no path");
            return Ok(Vec::new());
        }
        Ok(reconstruct_path(&result.parents, &end))
    }

    /// Some path from `start` to `end` via depth-first search, or an empty
    /// list if `end` is unreachable. Not necessarily the shortest.
    #[tracing::instrument(level = "debug", skip_all, fields(start = %start, end = %end))]
    pub fn find_path(&self, start: &Node<T>, end: &Node<T>) -> Result<Vec<Node<T>>> {
        self.search_path(start, end, PathStrategy::DepthFirst)
    }

    /// A path with the fewest edges via breadth-first search, or an empty
    /// list if `end` is unreachable.
    #[tracing::instrument(level = "debug", skip_all, fields(start = %start, end = %end))]
    pub fn shortest_path(&self, start: &Node<T>, end: &Node<T>) -> Result<Vec<Node<T>>> {
        self.search_path(start, end, PathStrategy::Shortest)
    }

    /// Like [`find_path`](Self::find_path) / [`shortest_path`](Self::shortest_path),
    /// but an unreachable target is an error.
    #[tracing::instrument(level = "debug", skip_all, fields(start = %start, end = %end, strategy = ?strategy))]
    pub fn require_path(
        &self,
        start: &Node<T>,
        end: &Node<T>,
        strategy: PathStrategy,
    ) -> Result<Vec<Node<T>>> {
        let path = self.search_path(start, end, strategy)?;
        if path.is_empty() {
            return Err(GraphError::NoPath {
                from: start.name().to_string(),
                to: end.name().to_string(),
            });
        }
        Ok(path)
    }

    pub fn has_cycle(&self) -> bool {
        self.traversal().has_cycle()
    }

    pub fn connected_components(&self) -> Vec<Vec<Node<T>>> {
        self.traversal().connected_components()
    }

    /// Nodes ranked by total degree, descending; ties broken by name.
    ///
    /// `top_n == 0` returns every node.
    pub fn degree_centrality(&self, top_n: usize) -> Vec<DegreeResult<T>> {
        let directed = self.orientation().is_directed();

        let mut in_degrees: HashMap<&str, usize> = HashMap::new();
        if directed {
            for neighbor in self.adjacency.values().flatten() {
                *in_degrees.entry(neighbor.name()).or_default() += 1;
            }
        }

        let mut results: Vec<DegreeResult<T>> = self
            .adjacency
            .iter()
            .map(|(node, neighbors)| {
                let out_degree = neighbors.len();
                let (in_degree, total_degree) = if directed {
                    let in_degree = in_degrees.get(node.name()).copied().unwrap_or(0);
                    (in_degree, out_degree + in_degree)
                } else {
                    (out_degree, out_degree)
                };
                DegreeResult {
                    node: node.clone(),
                    out_degree,
                    in_degree,
                    total_degree,
                }
            })
            .collect();

        results.sort_by(|a, b| {
            b.total_degree
                .cmp(&a.total_degree)
                .then_with(|| a.node.name().cmp(b.node.name()))
        });

        if top_n > 0 && top_n < results.len() {
            results.truncate(top_n);
        }

        results
    }
}

impl<T> Default for Graph<T> {
    fn default() -> Self {
        Self::with_config(GraphConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CycleMode;
    use crate::error::ErrorKind;

    fn n(name: &str) -> Node<()> {
        Node::named(name)
    }

    fn names(nodes: &[Node<()>]) -> Vec<&str> {
        nodes.iter().map(|n| n.name()).collect()
    }

    fn ref_names<'a>(nodes: &[&'a Node<()>]) -> Vec<&'a str> {
        nodes.iter().map(|n| n.name()).collect()
    }

    fn build(orientation: Orientation, edges: &[(&str, &str)]) -> Graph<()> {
        let mut g = Graph::new(orientation);
        g.extend_edges(edges.iter().map(|(a, b)| (n(a), n(b))))
            .unwrap();
        g
    }

    /// Undirected A-B, B-C, C-D, D-E, A-C.
    fn make_scenario() -> Graph<()> {
        build(
            Orientation::Undirected,
            &[("A", "B"), ("B", "C"), ("C", "D"), ("D", "E"), ("A", "C")],
        )
    }

    // --- Nodes ---

    #[test]
    fn test_add_node_idempotent() {
        let mut g = Graph::undirected();
        g.add_node(Node::new("A", 1)).unwrap();
        g.add_node(Node::new("A", 2)).unwrap();
        assert_eq!(g.node_count(), 1);
        // First payload wins
        assert_eq!(g.node("A").map(|n| *n.payload()), Some(1));
    }

    #[test]
    fn test_add_node_blank_rejected() {
        let mut g: Graph<()> = Graph::undirected();
        let err = g.add_node(n("   ")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(g.is_empty());
    }

    #[test]
    fn test_nodes_insertion_order() {
        let g = build(Orientation::Directed, &[("C", "A"), ("B", "A"), ("D", "C")]);
        assert_eq!(ref_names(&g.nodes()), vec!["C", "A", "B", "D"]);
    }

    #[test]
    fn test_remove_node_strips_references() {
        let mut g = make_scenario();
        let removed = g.remove_node(&n("C")).unwrap();
        assert_eq!(removed.name(), "C");
        assert!(!g.node_exists(&n("C")));
        assert_eq!(g.node_count(), 4);
        for node in g.nodes() {
            assert!(!g.neighbors(node).iter().any(|nb| nb.name() == "C"));
        }
        // A-B and D-E remain
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn test_remove_node_directed_incoming() {
        let mut g = build(Orientation::Directed, &[("A", "B"), ("C", "B"), ("B", "D")]);
        g.remove_node(&n("B")).unwrap();
        assert!(g.neighbors(&n("A")).is_empty());
        assert!(g.neighbors(&n("C")).is_empty());
        assert_eq!(g.edge_count(), 0);
        assert_eq!(ref_names(&g.nodes()), vec!["A", "C", "D"]);
    }

    #[test]
    fn test_remove_node_missing() {
        let mut g = make_scenario();
        let err = g.remove_node(&n("Z")).unwrap_err();
        assert_eq!(err, GraphError::NodeNotFound { name: "Z".into() });
        assert_eq!(g.node_count(), 5);
    }

    // --- Edges ---

    #[test]
    fn test_add_edge_auto_inserts_endpoints() {
        let mut g = Graph::directed();
        g.add_edge(&n("A"), &n("B")).unwrap();
        assert!(g.node_exists(&n("A")));
        assert!(g.node_exists(&n("B")));
        assert_eq!(g.node_count(), 2);
    }

    #[test]
    fn test_add_edge_uses_stored_node() {
        let mut g = Graph::directed();
        g.add_node(Node::new("A", "stored")).unwrap();
        g.add_edge(&Node::new("B", "b"), &Node::new("A", "other")).unwrap();
        let neighbors = g.neighbors(&Node::new("B", ""));
        assert_eq!(*neighbors[0].payload(), "stored");
    }

    #[test]
    fn test_add_edge_idempotent() {
        let mut g = Graph::undirected();
        g.add_edge(&n("A"), &n("B")).unwrap();
        g.add_edge(&n("A"), &n("B")).unwrap();
        g.add_edge(&n("B"), &n("A")).unwrap();
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.degree(&n("A")), 1);
        assert_eq!(g.degree(&n("B")), 1);
    }

    #[test]
    fn test_self_loop_rejected() {
        for orientation in [Orientation::Directed, Orientation::Undirected] {
            let mut g = Graph::new(orientation);
            let err = g.add_edge(&n("A"), &n("A")).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidOperation);
            match err {
                GraphError::InvalidOperation { orientation: o, .. } => assert_eq!(o, orientation),
                other => panic!("unexpected error: {other:?}"),
            }
            // Nothing was inserted
            assert!(g.is_empty());
        }
    }

    #[test]
    fn test_add_edge_blank_endpoint() {
        let mut g = Graph::directed();
        let err = g.add_edge(&n("A"), &n("")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(g.is_empty());
    }

    #[test]
    fn test_directed_edge_one_way() {
        let g = build(Orientation::Directed, &[("A", "B")]);
        assert!(g.has_edge(&n("A"), &n("B")));
        assert!(!g.has_edge(&n("B"), &n("A")));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_undirected_edge_mirrored() {
        let g = build(Orientation::Undirected, &[("A", "B")]);
        assert!(g.has_edge(&n("A"), &n("B")));
        assert!(g.has_edge(&n("B"), &n("A")));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_has_edge_absent_nodes() {
        let g = build(Orientation::Directed, &[("A", "B")]);
        assert!(!g.has_edge(&n("A"), &n("Z")));
        assert!(!g.has_edge(&n("Z"), &n("A")));
    }

    #[test]
    fn test_remove_edge_undirected_both_directions() {
        let mut g = make_scenario();
        g.remove_edge(&n("C"), &n("A")).unwrap();
        assert!(!g.has_edge(&n("A"), &n("C")));
        assert!(!g.has_edge(&n("C"), &n("A")));
        assert_eq!(g.edge_count(), 4);
    }

    #[test]
    fn test_remove_edge_directed_keeps_reverse() {
        let mut g = build(Orientation::Directed, &[("A", "B"), ("B", "A")]);
        g.remove_edge(&n("A"), &n("B")).unwrap();
        assert!(!g.has_edge(&n("A"), &n("B")));
        assert!(g.has_edge(&n("B"), &n("A")));
    }

    #[test]
    fn test_remove_edge_missing_edge_is_noop() {
        let mut g = build(Orientation::Undirected, &[("A", "B"), ("C", "D")]);
        g.remove_edge(&n("A"), &n("C")).unwrap();
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn test_remove_edge_errors() {
        let mut g = build(Orientation::Undirected, &[("A", "B")]);
        assert_eq!(
            g.remove_edge(&n("A"), &n("Z")).unwrap_err(),
            GraphError::NodeNotFound { name: "Z".into() }
        );
        assert_eq!(
            g.remove_edge(&n("A"), &n("A")).unwrap_err().kind(),
            ErrorKind::InvalidOperation
        );
        assert_eq!(
            g.remove_edge(&n(""), &n("A")).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_neighbors_and_degree_absent_node() {
        let g = make_scenario();
        assert!(g.neighbors(&n("Z")).is_empty());
        assert_eq!(g.degree(&n("Z")), 0);
    }

    #[test]
    fn test_neighbors_order() {
        let g = make_scenario();
        assert_eq!(ref_names(&g.neighbors(&n("C"))), vec!["B", "D", "A"]);
        assert_eq!(g.degree(&n("C")), 3);
    }

    #[test]
    fn test_edges_listing() {
        let g = make_scenario();
        let edges: Vec<(&str, &str)> = g
            .edges()
            .into_iter()
            .map(|(a, b)| (a.name(), b.name()))
            .collect();
        assert_eq!(
            edges,
            vec![("A", "B"), ("A", "C"), ("B", "C"), ("C", "D"), ("D", "E")]
        );

        let g = build(Orientation::Directed, &[("B", "A"), ("A", "B")]);
        assert_eq!(g.edges().len(), 2);
    }

    #[test]
    fn test_extend_edges_stops_at_failure() {
        let mut g = Graph::directed();
        let err = g
            .extend_edges(vec![(n("A"), n("B")), (n("C"), n("C")), (n("D"), n("E"))])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
        assert_eq!(g.edge_count(), 1);
        assert!(!g.node_exists(&n("D")));
    }

    // --- Connectivity ---

    #[test]
    fn test_is_connected_direct_only() {
        let g = make_scenario();
        assert!(g.is_connected(&n("A"), &n("B")));
        assert!(g.is_connected(&n("A"), &n("A")));
        // Reachable but not adjacent
        assert!(!g.is_connected(&n("A"), &n("E")));
        assert!(!g.is_connected(&n("A"), &n("Z")));
        assert!(!g.is_connected(&n("Z"), &n("Z")));
    }

    #[test]
    fn test_distance_and_reachability() {
        let g = make_scenario();
        assert_eq!(g.distance(&n("A"), &n("A")), Some(0));
        assert_eq!(g.distance(&n("A"), &n("E")), Some(3));
        assert!(g.is_reachable(&n("E"), &n("A")));

        let g = build(Orientation::Directed, &[("A", "B"), ("C", "D")]);
        assert_eq!(g.distance(&n("A"), &n("D")), None);
        assert!(!g.is_reachable(&n("A"), &n("D")));
        assert!(!g.is_reachable(&n("B"), &n("A")));
        assert_eq!(g.distance(&n("A"), &n("Z")), None);
    }

    // --- Paths ---

    #[test]
    fn test_scenario_undirected_counts_and_paths() {
        let g = make_scenario();
        assert_eq!(g.node_count(), 5);
        assert_eq!(g.edge_count(), 5);

        let shortest = g.shortest_path(&n("A"), &n("E")).unwrap();
        assert_eq!(names(&shortest), vec!["A", "C", "D", "E"]);

        let any = g.find_path(&n("A"), &n("E")).unwrap();
        assert_eq!(any.first().map(|n| n.name()), Some("A"));
        assert_eq!(any.last().map(|n| n.name()), Some("E"));
        assert!(any.len() >= shortest.len());
        for pair in any.windows(2) {
            assert!(g.has_edge(&pair[0], &pair[1]));
        }
    }

    #[test]
    fn test_path_to_self() {
        let g = make_scenario();
        assert_eq!(names(&g.find_path(&n("B"), &n("B")).unwrap()), vec!["B"]);
        assert_eq!(names(&g.shortest_path(&n("B"), &n("B")).unwrap()), vec!["B"]);
    }

    #[test]
    fn test_path_unreachable_is_empty() {
        let g = build(Orientation::Directed, &[("A", "B"), ("C", "D")]);
        assert!(g.find_path(&n("A"), &n("D")).unwrap().is_empty());
        assert!(g.shortest_path(&n("A"), &n("D")).unwrap().is_empty());
        assert!(g.shortest_path(&n("B"), &n("A")).unwrap().is_empty());
    }

    #[test]
    fn test_path_missing_endpoint() {
        let g = make_scenario();
        assert_eq!(
            g.find_path(&n("A"), &n("Z")).unwrap_err(),
            GraphError::NodeNotFound { name: "Z".into() }
        );
        assert_eq!(
            g.shortest_path(&n("Y"), &n("A")).unwrap_err(),
            GraphError::NodeNotFound { name: "Y".into() }
        );
    }

    #[test]
    fn test_require_path() {
        let g = build(Orientation::Directed, &[("A", "B"), ("B", "C"), ("X", "Y")]);
        let path = g.require_path(&n("A"), &n("C"), PathStrategy::Shortest).unwrap();
        assert_eq!(names(&path), vec!["A", "B", "C"]);
        let path = g.require_path(&n("A"), &n("C"), PathStrategy::DepthFirst).unwrap();
        assert_eq!(names(&path), vec!["A", "B", "C"]);

        let err = g.require_path(&n("A"), &n("Y"), PathStrategy::Shortest).unwrap_err();
        assert_eq!(
            err,
            GraphError::NoPath {
                from: "A".into(),
                to: "Y".into()
            }
        );
        assert_eq!(
            g.require_path(&n("A"), &n("Q"), PathStrategy::DepthFirst)
                .unwrap_err()
                .kind(),
            ErrorKind::NotFound
        );
    }

    // --- Cycles & components ---

    #[test]
    fn test_scenario_directed_cycle() {
        let g = build(
            Orientation::Directed,
            &[("A", "B"), ("B", "C"), ("C", "D"), ("D", "A")],
        );
        assert!(!g.has_edge(&n("B"), &n("A")));
        assert!(g.has_cycle());
        let components = g.connected_components();
        assert_eq!(components.len(), 1);
        assert_eq!(names(&components[0]), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_scenario_disconnected_components() {
        let g = build(Orientation::Undirected, &[("A", "B"), ("C", "D")]);
        let components = g.connected_components();
        assert_eq!(components.len(), 2);
        assert_eq!(names(&components[0]), vec!["A", "B"]);
        assert_eq!(names(&components[1]), vec!["C", "D"]);
    }

    #[test]
    fn test_undirected_cycle_modes() {
        let mut g = Graph::undirected();
        g.add_edge(&n("A"), &n("B")).unwrap();
        assert!(!g.has_cycle());
        g.add_edge(&n("B"), &n("C")).unwrap();
        g.add_edge(&n("C"), &n("A")).unwrap();
        assert!(g.has_cycle());

        let config = GraphConfig::new(Orientation::Undirected).with_cycle_mode(CycleMode::Strict);
        let mut strict = Graph::with_config(config);
        strict.add_edge(&n("A"), &n("B")).unwrap();
        assert!(strict.has_cycle());
    }

    #[test]
    fn test_cycle_mode_ignored_when_directed() {
        let config = GraphConfig::new(Orientation::Directed).with_cycle_mode(CycleMode::Strict);
        let mut g = Graph::with_config(config);
        g.add_edge(&n("A"), &n("B")).unwrap();
        assert!(!g.has_cycle());
    }

    // --- Degree centrality ---

    #[test]
    fn test_degree_centrality_undirected() {
        let g = make_scenario();
        let ranked = g.degree_centrality(0);
        let order: Vec<(&str, usize)> = ranked
            .iter()
            .map(|d| (d.node.name(), d.total_degree))
            .collect();
        assert_eq!(
            order,
            vec![("C", 3), ("A", 2), ("B", 2), ("D", 2), ("E", 1)]
        );
        assert!(ranked.iter().all(|d| d.in_degree == d.out_degree));
    }

    #[test]
    fn test_degree_centrality_directed_top_n() {
        let g = build(Orientation::Directed, &[("hub", "a"), ("hub", "b"), ("a", "b")]);
        let ranked = g.degree_centrality(2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].node.name(), "a");
        assert_eq!(ranked[0].out_degree, 1);
        assert_eq!(ranked[0].in_degree, 1);
        assert_eq!(ranked[1].node.name(), "b");
        assert_eq!(ranked[1].in_degree, 2);
        // hub also has total 2 but sorts after "a" and "b"
        assert!(g.degree_centrality(0).iter().any(|d| d.node.name() == "hub"));
    }

    // --- Lifecycle ---

    #[test]
    fn test_clear_keeps_orientation() {
        let mut g = build(Orientation::Directed, &[("A", "B")]);
        g.clear();
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.orientation(), Orientation::Directed);
    }

    #[test]
    fn test_with_config_and_default() {
        let g: Graph<()> = Graph::with_capacity(Orientation::Directed, 128);
        assert_eq!(g.config().node_capacity, 128);
        assert!(g.orientation().is_directed());

        let g: Graph<()> = Graph::default();
        assert_eq!(g.orientation(), Orientation::Undirected);
    }

    #[test]
    fn test_memory_usage_nonzero() {
        let g = make_scenario();
        assert!(g.memory_usage() > 0);
        let empty: Graph<()> = Graph::undirected();
        assert_eq!(empty.memory_usage(), 0);
    }
}
