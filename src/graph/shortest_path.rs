//! Single-source and single-pair shortest paths over weighted graphs.
//!
//! Dijkstra runs over the indexed [`PriorityQueue`]: every relaxation calls
//! `update_priority` instead of pushing stale duplicate entries. A* keeps its
//! cost-so-far and estimated-total maps separate and only ever queues
//! vertices it has actually discovered.
//!
//! Both algorithms require non-negative edge weights; this is a documented
//! precondition, not a validated one.

use core::fmt;
use core::hash::Hash;
use std::collections::{HashMap, HashSet};

use num_traits::Num;
use serde::Serialize;

use crate::collections::{Order, PriorityQueue};
use crate::graph::{Distance, Graph, GraphError};

/// Distance and parent maps produced by a single-source shortest-path run.
///
/// Both maps hold an entry for every vertex of the graph: unreachable
/// vertices keep `Distance::Infinite` and a `None` parent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortestPaths<V: Eq + Hash, W> {
    /// Accumulated weight of the shortest route from the source.
    pub dist: HashMap<V, Distance<W>>,
    /// Predecessor pointers of the shortest-path tree; `None` for the source
    /// and for unreachable vertices.
    pub parent: HashMap<V, Option<V>>,
}

/// Walks `parent` pointers from `destination` back to the root of its search
/// tree and returns the path in source-to-destination order.
///
/// # Errors
/// Returns [`GraphError::MissingVertex`] if `destination` (or any vertex on
/// the walk) has no entry in `parent`.
pub fn reconstruct_path<V>(
    destination: &V,
    parent: &HashMap<V, Option<V>>,
) -> Result<Vec<V>, GraphError<V>>
where
    V: Clone + Eq + Hash + fmt::Debug,
{
    let mut cursor = parent
        .get(destination)
        .ok_or_else(|| GraphError::MissingVertex(destination.clone()))?;

    let mut path = vec![destination.clone()];
    while let Some(previous) = cursor {
        path.push(previous.clone());
        cursor = parent
            .get(previous)
            .ok_or_else(|| GraphError::MissingVertex(previous.clone()))?;
    }
    path.reverse();
    Ok(path)
}

impl<V, W> Graph<V, W>
where
    V: Clone + Eq + Hash + fmt::Debug,
    W: Copy + PartialOrd + Num,
{
    /// Computes shortest distances from `source` to every vertex.
    ///
    /// Precondition: all edge weights are non-negative. Negative weights are
    /// not detected and leave the result meaningless.
    ///
    /// # Errors
    /// Returns [`GraphError::MissingVertex`] if `source` is not stored.
    pub fn dijkstra(&self, source: &V) -> Result<ShortestPaths<V, W>, GraphError<V>> {
        if !self.contains(source) {
            return Err(GraphError::MissingVertex(source.clone()));
        }

        let mut dist: HashMap<V, Distance<W>> = self
            .vertices()
            .map(|v| (v.clone(), Distance::Infinite))
            .collect();
        let mut parent: HashMap<V, Option<V>> =
            self.vertices().map(|v| (v.clone(), None)).collect();
        dist.insert(source.clone(), Distance::Finite(W::zero()));

        let mut queue = PriorityQueue::with_capacity(Order::Min, self.vertex_count());
        for vertex in self.vertices() {
            queue
                .insert(vertex.clone(), dist[vertex])
                .expect("graph vertices are unique");
        }

        while let Ok((node, _)) = queue.extract() {
            let through = dist[&node];
            for (neighbor, weight) in self.neighbor_pairs(&node) {
                let length = through.plus(*weight);
                if length < dist[neighbor] {
                    dist.insert(neighbor.clone(), length);
                    parent.insert(neighbor.clone(), Some(node.clone()));
                    queue
                        .update_priority(neighbor, length)
                        .expect("relaxed vertex is still queued");
                }
            }
        }

        Ok(ShortestPaths { dist, parent })
    }

    /// Finds a shortest path from `source` to `destination` guided by the
    /// `heuristic` estimate of remaining cost.
    ///
    /// The heuristic must be admissible (never overestimate the true
    /// remaining cost); `|_, _| W::zero()` degenerates to Dijkstra. A vertex
    /// is expanded at most once, and neighbors enter the queue only when
    /// first discovered.
    ///
    /// Returns `None` when the queue drains before `destination` is reached.
    ///
    /// # Errors
    /// Returns [`GraphError::MissingVertex`] if `source` or `destination` is
    /// not stored.
    pub fn a_star<H>(
        &self,
        source: &V,
        destination: &V,
        heuristic: H,
    ) -> Result<Option<Vec<V>>, GraphError<V>>
    where
        H: Fn(&V, &V) -> W,
    {
        for vertex in [source, destination] {
            if !self.contains(vertex) {
                return Err(GraphError::MissingVertex(vertex.clone()));
            }
        }

        let mut closed: HashSet<V> = HashSet::new();
        // Seeding the source as a root lets reconstruction terminate there.
        let mut parent: HashMap<V, Option<V>> = HashMap::new();
        parent.insert(source.clone(), None);

        // Cost from the source, and estimated total through each vertex.
        let mut dist: HashMap<V, Distance<W>> = self
            .vertices()
            .map(|v| (v.clone(), Distance::Infinite))
            .collect();
        let mut estimate = dist.clone();
        dist.insert(source.clone(), Distance::Finite(W::zero()));
        estimate.insert(
            source.clone(),
            Distance::Finite(heuristic(source, destination)),
        );

        let mut open = PriorityQueue::new();
        open.insert(source.clone(), estimate[source])
            .expect("open set starts empty");

        while let Ok((node, _)) = open.extract() {
            if node == *destination {
                return reconstruct_path(destination, &parent).map(Some);
            }
            closed.insert(node.clone());

            for (neighbor, weight) in self.neighbor_pairs(&node) {
                if closed.contains(neighbor) {
                    continue;
                }
                if !open.contains(neighbor) {
                    open.insert(neighbor.clone(), estimate[neighbor])
                        .expect("neighbor was absent from the open set");
                }
                let length = dist[&node].plus(*weight);
                if length < dist[neighbor] {
                    parent.insert(neighbor.clone(), Some(node.clone()));
                    dist.insert(neighbor.clone(), length);
                    let total = length.plus(heuristic(neighbor, destination));
                    estimate.insert(neighbor.clone(), total);
                    open.update_priority(neighbor, total)
                        .expect("discovered neighbor is queued");
                }
            }
        }

        Ok(None)
    }
}
