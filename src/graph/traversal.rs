//! Breadth-first and depth-first traversal, topological order, and cycle
//! detection.
//!
//! All traversals take a shared borrow of the graph and own their working
//! state. The depth-first walks run on an explicit frame stack, so deep
//! graphs cannot exhaust the call stack.

use core::fmt;
use core::hash::Hash;
use std::collections::{HashMap, HashSet, VecDeque};

use num_traits::Num;
use serde::Serialize;

use crate::graph::{Distance, Graph, GraphError};

/// Level and parent maps produced by a breadth-first search.
///
/// Both maps hold an entry for every vertex of the graph: unreached vertices
/// keep `Distance::Infinite` and a `None` parent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BfsTree<V: Eq + Hash> {
    /// Hop count from the search source.
    pub level: HashMap<V, Distance<usize>>,
    /// Predecessor pointers of the search tree; `None` for the source and
    /// for unreached vertices.
    pub parent: HashMap<V, Option<V>>,
}

/// Parent map and reverse finishing order produced by a depth-first sweep
/// over the whole graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DfsForest<V: Eq + Hash> {
    /// Predecessor pointers of the forest; `None` for every root.
    pub parent: HashMap<V, Option<V>>,
    /// Vertices in reverse finishing order. A valid topological order iff
    /// the graph is acyclic.
    pub order: Vec<V>,
}

impl<V, W> Graph<V, W>
where
    V: Clone + Eq + Hash + fmt::Debug,
    W: Copy + PartialOrd + Num,
{
    /// Runs a breadth-first search from `source`.
    ///
    /// Levels count hops, not weights. When `destination` is given the
    /// search returns as soon as that vertex is discovered; the maps then
    /// cover only the explored region.
    ///
    /// # Errors
    /// Returns [`GraphError::MissingVertex`] if `source` is not stored.
    pub fn breadth_first_search(
        &self,
        source: &V,
        destination: Option<&V>,
    ) -> Result<BfsTree<V>, GraphError<V>> {
        if !self.contains(source) {
            return Err(GraphError::MissingVertex(source.clone()));
        }

        let mut level: HashMap<V, Distance<usize>> = self
            .vertices()
            .map(|v| (v.clone(), Distance::Infinite))
            .collect();
        let mut parent: HashMap<V, Option<V>> =
            self.vertices().map(|v| (v.clone(), None)).collect();
        level.insert(source.clone(), Distance::Finite(0));

        let mut frontier = VecDeque::new();
        frontier.push_back((source.clone(), 0usize));
        while let Some((node, depth)) = frontier.pop_front() {
            for (neighbor, _) in self.neighbor_pairs(&node) {
                if level[neighbor].is_finite() {
                    continue;
                }
                level.insert(neighbor.clone(), Distance::Finite(depth + 1));
                parent.insert(neighbor.clone(), Some(node.clone()));
                if destination == Some(neighbor) {
                    return Ok(BfsTree { level, parent });
                }
                frontier.push_back((neighbor.clone(), depth + 1));
            }
        }

        Ok(BfsTree { level, parent })
    }

    /// Runs a depth-first sweep over every vertex, in insertion order.
    pub fn depth_first_search(&self) -> DfsForest<V> {
        self.dfs()
    }

    /// Returns the vertices in reverse depth-first finishing order.
    ///
    /// The result is a valid topological order only when the graph is a DAG;
    /// check with [`is_cyclic`](Self::is_cyclic) first if that matters.
    pub fn topological_sort(&self) -> Vec<V> {
        self.dfs().order
    }

    fn dfs(&self) -> DfsForest<V> {
        let mut parent: HashMap<V, Option<V>> = HashMap::with_capacity(self.vertex_count());
        let mut finished: Vec<V> = Vec::with_capacity(self.vertex_count());

        for root in self.vertices() {
            if parent.contains_key(root) {
                continue;
            }
            parent.insert(root.clone(), None);

            // Frames carry the vertex and its remaining-neighbor iterator.
            let mut stack = vec![(root.clone(), self.neighbor_pairs(root).iter())];
            while let Some((node, mut neighbors)) = stack.pop() {
                if let Some((neighbor, _)) = neighbors.next() {
                    let discovered = !parent.contains_key(neighbor);
                    if discovered {
                        parent.insert(neighbor.clone(), Some(node.clone()));
                    }
                    stack.push((node, neighbors));
                    if discovered {
                        stack.push((neighbor.clone(), self.neighbor_pairs(neighbor).iter()));
                    }
                } else {
                    // All descendants explored.
                    finished.push(node);
                }
            }
        }

        finished.reverse();
        DfsForest {
            parent,
            order: finished,
        }
    }

    /// Returns `true` if the graph contains a directed cycle.
    ///
    /// Vertices move through three states: unvisited, on the current walk,
    /// and finished. An edge back into the current walk is a cycle;
    /// self-loops count.
    pub fn is_cyclic(&self) -> bool {
        let mut visited: HashSet<V> = HashSet::with_capacity(self.vertex_count());
        let mut on_path: HashSet<V> = HashSet::new();

        for start in self.vertices() {
            if visited.contains(start) {
                continue;
            }
            visited.insert(start.clone());
            on_path.insert(start.clone());

            let mut stack = vec![(start.clone(), self.neighbor_pairs(start).iter())];
            while let Some((node, mut neighbors)) = stack.pop() {
                if let Some((neighbor, _)) = neighbors.next() {
                    if on_path.contains(neighbor) {
                        return true;
                    }
                    stack.push((node, neighbors));
                    if !visited.contains(neighbor) {
                        visited.insert(neighbor.clone());
                        on_path.insert(neighbor.clone());
                        stack.push((neighbor.clone(), self.neighbor_pairs(neighbor).iter()));
                    }
                } else {
                    on_path.remove(&node);
                }
            }
        }

        false
    }
}
