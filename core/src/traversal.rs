use std::collections::{HashSet, VecDeque};

use indexmap::{IndexMap, IndexSet};

use crate::config::{CycleMode, Orientation};
use crate::node::Node;
use crate::result::TraversalResult;

/// Node → ordered, duplicate-free out-neighbors. Owned by [`Graph`](crate::Graph).
pub(crate) type Adjacency<T> = IndexMap<Node<T>, IndexSet<Node<T>>>;

/// Read-only traversal engine over a graph's adjacency list.
///
/// Holds a shared borrow of the adjacency map, so the graph cannot be
/// mutated while a `Traversal` is alive. Keeps no state between calls;
/// every result is an owned snapshot.
pub struct Traversal<'a, T> {
    adjacency: &'a Adjacency<T>,
    orientation: Orientation,
    cycle_mode: CycleMode,
}

/// Raw output of one stack walk, still borrowing from the adjacency map.
struct Walk<'a, T> {
    order: Vec<&'a Node<T>>,
    parents: IndexMap<&'a Node<T>, &'a Node<T>>,
    reached: bool,
}

enum Frame<'a, T> {
    Enter {
        node: &'a Node<T>,
        parent: Option<&'a Node<T>>,
    },
    /// Backtrack marker: the node's subtree is finished.
    Exit(&'a Node<T>),
}

impl<'a, T: Clone> Traversal<'a, T> {
    pub(crate) fn new(
        adjacency: &'a Adjacency<T>,
        orientation: Orientation,
        cycle_mode: CycleMode,
    ) -> Self {
        Self {
            adjacency,
            orientation,
            cycle_mode,
        }
    }

    /// Stored instance of `node`, if present.
    fn key(&self, node: &Node<T>) -> Option<&'a Node<T>> {
        self.adjacency.get_key_value(node).map(|(k, _)| k)
    }

    fn neighbors(&self, node: &Node<T>) -> impl Iterator<Item = &'a Node<T>> + 'a {
        self.adjacency.get(node).into_iter().flatten()
    }

    /// Depth-first reachability from `start`, pre-order.
    ///
    /// Neighbors are pushed in stored order and therefore explored in reverse
    /// insertion order. An absent start yields an empty result.
    pub fn dfs(&self, start: &Node<T>) -> TraversalResult<T> {
        let Some(start) = self.key(start) else {
            return TraversalResult::empty();
        };
        let walk = self.dfs_from(start, None, &mut HashSet::new());
        tracing::trace!(start = %start, visited = walk.order.len(), "dfs complete");
        snapshot(walk, IndexMap::new())
    }

    /// Depth-first search that records discovering parents and stops as soon
    /// as `target` is popped.
    pub fn dfs_with_parents(&self, start: &Node<T>, target: &Node<T>) -> TraversalResult<T> {
        let Some(start) = self.key(start) else {
            return TraversalResult::empty();
        };
        let walk = self.dfs_from(start, Some(target), &mut HashSet::new());
        tracing::trace!(
            start = %start,
            target = %target,
            visited = walk.order.len(),
            target_reached = walk.reached,
            "dfs with parents complete"
        );
        snapshot(walk, IndexMap::new())
    }

    /// Stack walk shared by DFS and component discovery. `visited` may carry
    /// nodes claimed by earlier walks.
    fn dfs_from(
        &self,
        start: &'a Node<T>,
        target: Option<&Node<T>>,
        visited: &mut HashSet<&'a Node<T>>,
    ) -> Walk<'a, T> {
        let mut order = Vec::new();
        let mut parents: IndexMap<&'a Node<T>, &'a Node<T>> = IndexMap::new();
        let mut stack = vec![start];

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            order.push(current);

            if target == Some(current) {
                return Walk {
                    order,
                    parents,
                    reached: true,
                };
            }

            for neighbor in self.neighbors(current) {
                if !visited.contains(neighbor) {
                    // First discovery wins; a parent is never reassigned.
                    parents.entry(neighbor).or_insert(current);
                    stack.push(neighbor);
                }
            }
        }

        Walk {
            order,
            parents,
            reached: false,
        }
    }

    /// Breadth-first reachability from `start` with hop distances.
    ///
    /// Every reached node appears in `distances`; unreached nodes are absent.
    pub fn bfs(&self, start: &Node<T>) -> TraversalResult<T> {
        let Some(start) = self.key(start) else {
            return TraversalResult::empty();
        };
        let (walk, distances) = self.bfs_from(start, None);
        tracing::trace!(start = %start, visited = walk.order.len(), "bfs complete");
        snapshot(walk, distances)
    }

    /// Breadth-first search with parent tracking. The parent chain of
    /// `target` is a path with the fewest possible edges.
    pub fn bfs_with_parents(&self, start: &Node<T>, target: &Node<T>) -> TraversalResult<T> {
        let Some(start) = self.key(start) else {
            return TraversalResult::empty();
        };
        let (walk, distances) = self.bfs_from(start, Some(target));
        tracing::trace!(
            start = %start,
            target = %target,
            visited = walk.order.len(),
            target_reached = walk.reached,
            "bfs with parents complete"
        );
        snapshot(walk, distances)
    }

    fn bfs_from(
        &self,
        start: &'a Node<T>,
        target: Option<&Node<T>>,
    ) -> (Walk<'a, T>, IndexMap<&'a Node<T>, usize>) {
        // distances doubles as the visited set: a node is claimed on first discovery
        let mut distances: IndexMap<&'a Node<T>, usize> = IndexMap::new();
        let mut parents: IndexMap<&'a Node<T>, &'a Node<T>> = IndexMap::new();
        let mut order = Vec::new();
        let mut queue: VecDeque<(&'a Node<T>, usize)> = VecDeque::new();

        distances.insert(start, 0);
        queue.push_back((start, 0));

        while let Some((current, depth)) = queue.pop_front() {
            order.push(current);

            if target == Some(current) {
                let walk = Walk {
                    order,
                    parents,
                    reached: true,
                };
                return (walk, distances);
            }

            for neighbor in self.neighbors(current) {
                if !distances.contains_key(neighbor) {
                    distances.insert(neighbor, depth + 1);
                    parents.insert(neighbor, current);
                    queue.push_back((neighbor, depth + 1));
                }
            }
        }

        let walk = Walk {
            order,
            parents,
            reached: false,
        };
        (walk, distances)
    }

    /// Whether any cycle exists anywhere in the graph.
    ///
    /// Iterative white/gray/black walk: a neighbor found on the current path
    /// closes a cycle. For undirected graphs in [`CycleMode::ParentAware`] the
    /// mirrored edge back to the discovering node is skipped.
    pub fn has_cycle(&self) -> bool {
        let skip_parent_edge =
            !self.orientation.is_directed() && self.cycle_mode == CycleMode::ParentAware;

        let mut visited: HashSet<&'a Node<T>> = HashSet::new();
        let mut on_path: HashSet<&'a Node<T>> = HashSet::new();

        for root in self.adjacency.keys() {
            if visited.contains(root) {
                continue;
            }

            let mut stack = vec![Frame::Enter {
                node: root,
                parent: None,
            }];

            while let Some(frame) = stack.pop() {
                let (node, parent) = match frame {
                    Frame::Exit(node) => {
                        on_path.remove(node);
                        continue;
                    }
                    Frame::Enter { node, parent } => (node, parent),
                };

                if !visited.insert(node) {
                    continue;
                }
                on_path.insert(node);
                stack.push(Frame::Exit(node));

                for neighbor in self.neighbors(node) {
                    if skip_parent_edge && parent == Some(neighbor) {
                        continue;
                    }
                    if on_path.contains(neighbor) {
                        tracing::trace!(from = %node, to = %neighbor, "cycle closed");
                        return true;
                    }
                    if !visited.contains(neighbor) {
                        stack.push(Frame::Enter {
                            node: neighbor,
                            parent: Some(node),
                        });
                    }
                }
            }
        }

        false
    }

    /// Partition all nodes into components, each in DFS discovery order.
    ///
    /// Roots are taken in adjacency order and the visited set is shared, so
    /// for directed graphs a component is "reachable from this root and not
    /// yet claimed", not a strongly connected component.
    pub fn connected_components(&self) -> Vec<Vec<Node<T>>> {
        let mut visited: HashSet<&'a Node<T>> = HashSet::new();
        let mut components: Vec<Vec<Node<T>>> = Vec::new();

        for root in self.adjacency.keys() {
            if visited.contains(root) {
                continue;
            }
            let walk = self.dfs_from(root, None, &mut visited);
            components.push(walk.order.into_iter().cloned().collect());
        }

        tracing::trace!(components = components.len(), "components complete");
        components
    }
}

fn snapshot<T: Clone>(
    walk: Walk<'_, T>,
    distances: IndexMap<&Node<T>, usize>,
) -> TraversalResult<T> {
    TraversalResult {
        visited: walk.order.into_iter().cloned().collect(),
        parents: walk
            .parents
            .into_iter()
            .map(|(child, parent)| (child.clone(), parent.clone()))
            .collect(),
        distances: distances
            .into_iter()
            .map(|(node, d)| (node.clone(), d))
            .collect(),
        target_reached: walk.reached,
    }
}

/// Walk parent pointers back from `end` until a node without a parent (the
/// start), returning the path in start → end order.
///
/// Parent maps built by DFS/BFS assign each node at most one parent, so the
/// chain always terminates.
pub fn reconstruct_path<T: Clone>(
    parents: &IndexMap<Node<T>, Node<T>>,
    end: &Node<T>,
) -> Vec<Node<T>> {
    let mut path = vec![end.clone()];
    let mut current = end;

    while let Some(parent) = parents.get(current) {
        path.push(parent.clone());
        current = parent;
    }

    path.reverse();
    path
}
