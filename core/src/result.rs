use indexmap::IndexMap;

use crate::node::Node;
use crate::traversal::reconstruct_path;

/// Snapshot returned by every traversal.
///
/// Owns clones of the nodes it mentions, so it stays valid after the graph
/// it was computed from is mutated or dropped.
#[derive(Debug, Clone)]
pub struct TraversalResult<T> {
    /// Nodes in visitation order.
    pub visited: Vec<Node<T>>,
    /// Node → the node it was first discovered from. The start has no entry.
    pub parents: IndexMap<Node<T>, Node<T>>,
    /// Hop count from the start. Populated by BFS only; unreached nodes are absent.
    pub distances: IndexMap<Node<T>, usize>,
    /// Whether the designated target was popped. Always false without a target.
    pub target_reached: bool,
}

impl<T> TraversalResult<T> {
    pub(crate) fn empty() -> Self {
        Self {
            visited: Vec::new(),
            parents: IndexMap::new(),
            distances: IndexMap::new(),
            target_reached: false,
        }
    }

    pub fn len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }

    pub fn contains(&self, node: &Node<T>) -> bool {
        self.visited.contains(node)
    }

    pub fn distance_to(&self, node: &Node<T>) -> Option<usize> {
        self.distances.get(node).copied()
    }
}

impl<T: Clone> TraversalResult<T> {
    /// Path from the traversal's start to `end`, following the parent map.
    ///
    /// Empty when `end` was never visited.
    pub fn path_to(&self, end: &Node<T>) -> Vec<Node<T>> {
        match self.visited.iter().find(|n| *n == end) {
            Some(stored) => reconstruct_path(&self.parents, stored),
            None => Vec::new(),
        }
    }
}

/// Degree information for a single node.
#[derive(Debug, Clone)]
pub struct DegreeResult<T> {
    pub node: Node<T>,
    pub out_degree: usize,
    pub in_degree: usize,
    /// Distinct incident edges: `out + in` when directed, the plain degree when undirected.
    pub total_degree: usize,
}

/// Search order used by strict path finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathStrategy {
    /// Stack-based walk; finds some path, not necessarily the shortest.
    DepthFirst,
    /// Queue-based walk; finds a path with the fewest edges.
    #[default]
    Shortest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_to_walks_parents() {
        let (a, b, c) = (Node::named("A"), Node::named("B"), Node::named("C"));
        let mut result = TraversalResult::empty();
        result.visited = vec![a.clone(), b.clone(), c.clone()];
        result.parents.insert(b.clone(), a.clone());
        result.parents.insert(c.clone(), b.clone());

        let path = result.path_to(&c);
        let names: Vec<&str> = path.iter().map(|n| n.name()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(result.path_to(&a).len(), 1);
    }

    #[test]
    fn test_path_to_unvisited_is_empty() {
        let mut result = TraversalResult::empty();
        result.visited = vec![Node::named("A")];
        assert!(result.path_to(&Node::named("Z")).is_empty());
    }

    #[test]
    fn test_empty_result() {
        let result: TraversalResult<()> = TraversalResult::empty();
        assert!(result.is_empty());
        assert_eq!(result.len(), 0);
        assert!(!result.target_reached);
        assert_eq!(result.distance_to(&Node::named("A")), None);
    }
}
