//! Adjacency-list directed graph over arbitrary hashable vertex identities.
//!
//! Vertices can be anything `Clone + Eq + Hash + Debug`; edges are directed
//! and carry a numeric weight (`W::one()` when none is given). Undirected
//! edges are modeled as two directed edges. Successor and predecessor lists
//! are kept per vertex, so out-degree and in-degree are both O(1) and vertex
//! removal can cascade over incident edges in both directions.
//!
//! Vertex iteration follows insertion order, which makes traversal results
//! and tie-breaking deterministic.
//!
//! Every mutating operation validates its arguments completely before
//! touching any state: a returned error implies the graph is unchanged.

use core::fmt;
use core::hash::Hash;

use indexmap::IndexMap;
use num_traits::Num;
use thiserror::Error;

use crate::graph::eccentricity::EccentricityCache;

/// Errors raised by graph mutation and lookup operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError<V: fmt::Debug> {
    /// `add_vertex` of an identity the graph already stores.
    #[error("vertex {0:?} already present in graph")]
    DuplicateVertex(V),
    /// An operation referenced a vertex the graph does not store.
    #[error("vertex {0:?} not present in graph")]
    MissingVertex(V),
    /// A weight lookup or edge removal referenced an absent edge.
    #[error("edge ({0:?}, {1:?}) not present in graph")]
    MissingEdge(V, V),
}

/// A directed, optionally weighted adjacency-list graph.
pub struct Graph<V, W = i64> {
    adj: IndexMap<V, Vec<(V, W)>>,
    pred: IndexMap<V, Vec<V>>,
    pub(crate) ecc: EccentricityCache<V>,
}

impl<V, W> Graph<V, W>
where
    V: Clone + Eq + Hash + fmt::Debug,
    W: Copy + PartialOrd + Num,
{
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            adj: IndexMap::new(),
            pred: IndexMap::new(),
            ecc: EccentricityCache::default(),
        }
    }

    /// Builds a graph from an adjacency specification of bare neighbor
    /// identities; every edge gets weight `W::one()`.
    ///
    /// Neighbors that were not declared as vertices of their own are
    /// registered before the edge is added.
    pub fn from_adjacency<I, N>(spec: I) -> Self
    where
        I: IntoIterator<Item = (V, N)>,
        N: IntoIterator<Item = V>,
    {
        let mut graph = Self::new();
        for (node, neighbors) in spec {
            graph.ensure_vertex(&node);
            for neighbor in neighbors {
                graph.ensure_vertex(&neighbor);
                graph.insert_edge(&node, &neighbor, W::one());
            }
        }
        graph
    }

    /// Builds a graph from an adjacency specification of `(neighbor, weight)`
    /// pairs.
    ///
    /// Neighbors that were not declared as vertices of their own are
    /// registered before the edge is added.
    pub fn from_weighted_adjacency<I, N>(spec: I) -> Self
    where
        I: IntoIterator<Item = (V, N)>,
        N: IntoIterator<Item = (V, W)>,
    {
        let mut graph = Self::new();
        for (node, neighbors) in spec {
            graph.ensure_vertex(&node);
            for (neighbor, weight) in neighbors {
                graph.ensure_vertex(&neighbor);
                graph.insert_edge(&node, &neighbor, weight);
            }
        }
        graph
    }

    /// Returns `true` if `vertex` is stored.
    pub fn contains(&self, vertex: &V) -> bool {
        self.adj.contains_key(vertex)
    }

    /// Returns the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.adj.len()
    }

    /// Returns the number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adj.values().map(Vec::len).sum()
    }

    /// Returns `true` if the graph stores no vertices.
    pub fn is_empty(&self) -> bool {
        self.adj.is_empty()
    }

    /// Iterates over the vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.adj.keys()
    }

    /// Iterates over all directed edges as `(from, to, weight)`.
    pub fn edges(&self) -> impl Iterator<Item = (&V, &V, W)> {
        self.adj
            .iter()
            .flat_map(|(node, neighbors)| {
                neighbors.iter().map(move |(neighbor, weight)| (node, neighbor, *weight))
            })
    }

    /// Iterates over the successors of `vertex` in edge insertion order.
    ///
    /// # Errors
    /// Returns [`GraphError::MissingVertex`] if `vertex` is not stored.
    pub fn adjacent(&self, vertex: &V) -> Result<impl Iterator<Item = &V>, GraphError<V>> {
        let neighbors = self
            .adj
            .get(vertex)
            .ok_or_else(|| GraphError::MissingVertex(vertex.clone()))?;
        Ok(neighbors.iter().map(|(neighbor, _)| neighbor))
    }

    /// Iterates over `(successor, weight)` pairs of `vertex`.
    ///
    /// # Errors
    /// Returns [`GraphError::MissingVertex`] if `vertex` is not stored.
    pub fn weighted_adjacent(
        &self,
        vertex: &V,
    ) -> Result<impl Iterator<Item = (&V, W)>, GraphError<V>> {
        let neighbors = self
            .adj
            .get(vertex)
            .ok_or_else(|| GraphError::MissingVertex(vertex.clone()))?;
        Ok(neighbors.iter().map(|(neighbor, weight)| (neighbor, *weight)))
    }

    /// Iterates over the predecessors of `vertex`.
    ///
    /// # Errors
    /// Returns [`GraphError::MissingVertex`] if `vertex` is not stored.
    pub fn predecessors(&self, vertex: &V) -> Result<impl Iterator<Item = &V>, GraphError<V>> {
        let preds = self
            .pred
            .get(vertex)
            .ok_or_else(|| GraphError::MissingVertex(vertex.clone()))?;
        Ok(preds.iter())
    }

    /// Returns `true` if the edge `(from, to)` is stored.
    pub fn is_adjacent(&self, from: &V, to: &V) -> bool {
        self.adj
            .get(from)
            .is_some_and(|neighbors| neighbors.iter().any(|(neighbor, _)| neighbor == to))
    }

    /// Returns the weight of the edge `(from, to)`.
    ///
    /// # Errors
    /// Returns [`GraphError::MissingVertex`] if `from` is not stored, and
    /// [`GraphError::MissingEdge`] if the edge is absent.
    pub fn weight(&self, from: &V, to: &V) -> Result<W, GraphError<V>> {
        let neighbors = self
            .adj
            .get(from)
            .ok_or_else(|| GraphError::MissingVertex(from.clone()))?;
        neighbors
            .iter()
            .find(|(neighbor, _)| neighbor == to)
            .map(|(_, weight)| *weight)
            .ok_or_else(|| GraphError::MissingEdge(from.clone(), to.clone()))
    }

    /// Returns the number of outgoing edges of `vertex`.
    ///
    /// # Errors
    /// Returns [`GraphError::MissingVertex`] if `vertex` is not stored.
    pub fn degree(&self, vertex: &V) -> Result<usize, GraphError<V>> {
        self.adj
            .get(vertex)
            .map(Vec::len)
            .ok_or_else(|| GraphError::MissingVertex(vertex.clone()))
    }

    /// Alias of [`degree`](Self::degree): the number of edges starting at
    /// `vertex`.
    ///
    /// # Errors
    /// Returns [`GraphError::MissingVertex`] if `vertex` is not stored.
    pub fn outdegree(&self, vertex: &V) -> Result<usize, GraphError<V>> {
        self.degree(vertex)
    }

    /// Returns the number of edges ending at `vertex`.
    ///
    /// # Errors
    /// Returns [`GraphError::MissingVertex`] if `vertex` is not stored.
    pub fn indegree(&self, vertex: &V) -> Result<usize, GraphError<V>> {
        self.pred
            .get(vertex)
            .map(Vec::len)
            .ok_or_else(|| GraphError::MissingVertex(vertex.clone()))
    }

    /// Adds an unconnected vertex.
    ///
    /// # Errors
    /// Returns [`GraphError::DuplicateVertex`] if the identity is already
    /// stored.
    pub fn add_vertex(&mut self, vertex: V) -> Result<(), GraphError<V>> {
        if self.adj.contains_key(&vertex) {
            return Err(GraphError::DuplicateVertex(vertex));
        }
        self.ecc.invalidate();
        self.pred.insert(vertex.clone(), Vec::new());
        self.adj.insert(vertex, Vec::new());
        Ok(())
    }

    /// Adds a batch of vertices; the graph is untouched if any would fail.
    ///
    /// # Errors
    /// Returns [`GraphError::DuplicateVertex`] if any identity is already
    /// stored or occurs twice in the batch.
    pub fn add_vertices<I>(&mut self, vertices: I) -> Result<(), GraphError<V>>
    where
        I: IntoIterator<Item = V>,
    {
        let vertices: Vec<V> = vertices.into_iter().collect();
        for (i, vertex) in vertices.iter().enumerate() {
            if self.adj.contains_key(vertex) || vertices[..i].contains(vertex) {
                return Err(GraphError::DuplicateVertex(vertex.clone()));
            }
        }
        for vertex in vertices {
            self.ecc.invalidate();
            self.pred.insert(vertex.clone(), Vec::new());
            self.adj.insert(vertex, Vec::new());
        }
        Ok(())
    }

    /// Adds the directed edge `(from, to)` with weight `W::one()`.
    ///
    /// # Errors
    /// Returns [`GraphError::MissingVertex`] if either endpoint is absent.
    pub fn add_edge(&mut self, from: &V, to: &V) -> Result<(), GraphError<V>> {
        self.add_weighted_edge(from, to, W::one())
    }

    /// Adds the directed edge `(from, to)` with `weight`.
    ///
    /// Re-adding an existing edge overwrites its weight.
    ///
    /// # Errors
    /// Returns [`GraphError::MissingVertex`] if either endpoint is absent.
    pub fn add_weighted_edge(&mut self, from: &V, to: &V, weight: W) -> Result<(), GraphError<V>> {
        self.check_vertices([from, to])?;
        self.insert_edge(from, to, weight);
        Ok(())
    }

    /// Adds the two directed edges of an undirected edge, each with weight
    /// `W::one()`.
    ///
    /// # Errors
    /// Returns [`GraphError::MissingVertex`] if either endpoint is absent.
    pub fn add_undirected_edge(&mut self, a: &V, b: &V) -> Result<(), GraphError<V>> {
        self.add_weighted_undirected_edge(a, b, W::one())
    }

    /// Adds the two directed edges of an undirected edge with `weight`.
    ///
    /// # Errors
    /// Returns [`GraphError::MissingVertex`] if either endpoint is absent.
    pub fn add_weighted_undirected_edge(
        &mut self,
        a: &V,
        b: &V,
        weight: W,
    ) -> Result<(), GraphError<V>> {
        self.check_vertices([a, b])?;
        self.insert_edge(a, b, weight);
        self.insert_edge(b, a, weight);
        Ok(())
    }

    /// Adds a batch of directed edges, each with weight `W::one()`; the graph
    /// is untouched if any endpoint is absent.
    ///
    /// # Errors
    /// Returns [`GraphError::MissingVertex`] on the first absent endpoint.
    pub fn add_edges<I>(&mut self, edges: I) -> Result<(), GraphError<V>>
    where
        I: IntoIterator<Item = (V, V)>,
    {
        let edges: Vec<(V, V)> = edges.into_iter().collect();
        for (from, to) in &edges {
            self.check_vertices([from, to])?;
        }
        for (from, to) in &edges {
            self.insert_edge(from, to, W::one());
        }
        Ok(())
    }

    /// Adds a batch of weighted directed edges; the graph is untouched if any
    /// endpoint is absent.
    ///
    /// # Errors
    /// Returns [`GraphError::MissingVertex`] on the first absent endpoint.
    pub fn add_weighted_edges<I>(&mut self, edges: I) -> Result<(), GraphError<V>>
    where
        I: IntoIterator<Item = (V, V, W)>,
    {
        let edges: Vec<(V, V, W)> = edges.into_iter().collect();
        for (from, to, _) in &edges {
            self.check_vertices([from, to])?;
        }
        for (from, to, weight) in &edges {
            self.insert_edge(from, to, *weight);
        }
        Ok(())
    }

    /// Removes the directed edge `(from, to)`.
    ///
    /// # Errors
    /// Returns [`GraphError::MissingVertex`] if either endpoint is absent and
    /// [`GraphError::MissingEdge`] if the edge is not stored.
    pub fn remove_edge(&mut self, from: &V, to: &V) -> Result<(), GraphError<V>> {
        self.check_vertices([from, to])?;
        if !self.is_adjacent(from, to) {
            return Err(GraphError::MissingEdge(from.clone(), to.clone()));
        }
        self.delete_edge(from, to);
        Ok(())
    }

    /// Removes both directed edges of an undirected edge.
    ///
    /// # Errors
    /// Returns [`GraphError::MissingVertex`] if either endpoint is absent and
    /// [`GraphError::MissingEdge`] if either direction is not stored.
    pub fn remove_undirected_edge(&mut self, a: &V, b: &V) -> Result<(), GraphError<V>> {
        self.check_vertices([a, b])?;
        if !self.is_adjacent(a, b) {
            return Err(GraphError::MissingEdge(a.clone(), b.clone()));
        }
        if !self.is_adjacent(b, a) {
            return Err(GraphError::MissingEdge(b.clone(), a.clone()));
        }
        self.delete_edge(a, b);
        if a != b {
            self.delete_edge(b, a);
        }
        Ok(())
    }

    /// Removes a batch of directed edges; the graph is untouched if any is
    /// absent (a pair listed twice counts as absent the second time).
    ///
    /// # Errors
    /// Returns [`GraphError::MissingVertex`] or [`GraphError::MissingEdge`]
    /// on the first failing pair.
    pub fn remove_edges<I>(&mut self, edges: I) -> Result<(), GraphError<V>>
    where
        I: IntoIterator<Item = (V, V)>,
    {
        let edges: Vec<(V, V)> = edges.into_iter().collect();
        for (i, (from, to)) in edges.iter().enumerate() {
            self.check_vertices([from, to])?;
            let duplicate = edges[..i].contains(&(from.clone(), to.clone()));
            if duplicate || !self.is_adjacent(from, to) {
                return Err(GraphError::MissingEdge(from.clone(), to.clone()));
            }
        }
        for (from, to) in &edges {
            self.delete_edge(from, to);
        }
        Ok(())
    }

    /// Removes a batch of undirected edges (both directions each); the graph
    /// is untouched if any direction is absent.
    ///
    /// # Errors
    /// Returns [`GraphError::MissingVertex`] or [`GraphError::MissingEdge`]
    /// on the first failing pair.
    pub fn remove_undirected_edges<I>(&mut self, edges: I) -> Result<(), GraphError<V>>
    where
        I: IntoIterator<Item = (V, V)>,
    {
        let edges: Vec<(V, V)> = edges.into_iter().collect();
        for (i, (a, b)) in edges.iter().enumerate() {
            self.check_vertices([a, b])?;
            let duplicate = edges[..i]
                .iter()
                .any(|(x, y)| (x == a && y == b) || (x == b && y == a));
            if duplicate || !self.is_adjacent(a, b) {
                return Err(GraphError::MissingEdge(a.clone(), b.clone()));
            }
            if !self.is_adjacent(b, a) {
                return Err(GraphError::MissingEdge(b.clone(), a.clone()));
            }
        }
        for (a, b) in &edges {
            self.delete_edge(a, b);
            if a != b {
                self.delete_edge(b, a);
            }
        }
        Ok(())
    }

    /// Removes `vertex` and every edge incident to it.
    ///
    /// # Errors
    /// Returns [`GraphError::MissingVertex`] if `vertex` is not stored.
    pub fn remove_vertex(&mut self, vertex: &V) -> Result<(), GraphError<V>> {
        if !self.adj.contains_key(vertex) {
            return Err(GraphError::MissingVertex(vertex.clone()));
        }
        self.ecc.invalidate();

        let successors: Vec<V> = self.adj[vertex].iter().map(|(v, _)| v.clone()).collect();
        let predecessors: Vec<V> = self.pred[vertex].clone();
        for successor in successors {
            if let Some(preds) = self.pred.get_mut(&successor) {
                preds.retain(|p| p != vertex);
            }
        }
        for predecessor in predecessors {
            if let Some(neighbors) = self.adj.get_mut(&predecessor) {
                neighbors.retain(|(v, _)| v != vertex);
            }
        }

        self.adj.shift_remove(vertex);
        self.pred.shift_remove(vertex);
        Ok(())
    }

    /// Removes a batch of vertices with their incident edges; the graph is
    /// untouched if any is absent.
    ///
    /// # Errors
    /// Returns [`GraphError::MissingVertex`] on the first absent or repeated
    /// identity.
    pub fn remove_vertices<I>(&mut self, vertices: I) -> Result<(), GraphError<V>>
    where
        I: IntoIterator<Item = V>,
    {
        let vertices: Vec<V> = vertices.into_iter().collect();
        for (i, vertex) in vertices.iter().enumerate() {
            if !self.adj.contains_key(vertex) || vertices[..i].contains(vertex) {
                return Err(GraphError::MissingVertex(vertex.clone()));
            }
        }
        for vertex in &vertices {
            self.remove_vertex(vertex)?;
        }
        Ok(())
    }

    pub(crate) fn neighbor_pairs(&self, vertex: &V) -> &[(V, W)] {
        match self.adj.get(vertex) {
            Some(neighbors) => neighbors,
            None => &[],
        }
    }

    pub(crate) fn degree_or_zero(&self, vertex: &V) -> usize {
        self.adj.get(vertex).map_or(0, Vec::len)
    }

    fn ensure_vertex(&mut self, vertex: &V) {
        if !self.adj.contains_key(vertex) {
            self.ecc.invalidate();
            self.pred.insert(vertex.clone(), Vec::new());
            self.adj.insert(vertex.clone(), Vec::new());
        }
    }

    fn check_vertices<'a, I>(&self, vertices: I) -> Result<(), GraphError<V>>
    where
        I: IntoIterator<Item = &'a V>,
        V: 'a,
    {
        for vertex in vertices {
            if !self.adj.contains_key(vertex) {
                return Err(GraphError::MissingVertex(vertex.clone()));
            }
        }
        Ok(())
    }

    // Both endpoints must already be vertices.
    fn insert_edge(&mut self, from: &V, to: &V, weight: W) {
        self.ecc.invalidate();
        let neighbors = self.adj.get_mut(from).expect("edge endpoint is a vertex");
        if let Some(slot) = neighbors.iter_mut().find(|(neighbor, _)| neighbor == to) {
            slot.1 = weight;
            return;
        }
        neighbors.push((to.clone(), weight));
        self.pred
            .get_mut(to)
            .expect("edge endpoint is a vertex")
            .push(from.clone());
    }

    // The edge must already be stored.
    fn delete_edge(&mut self, from: &V, to: &V) {
        self.ecc.invalidate();
        if let Some(neighbors) = self.adj.get_mut(from) {
            neighbors.retain(|(neighbor, _)| neighbor != to);
        }
        if let Some(preds) = self.pred.get_mut(to) {
            if let Some(position) = preds.iter().position(|p| p == from) {
                preds.remove(position);
            }
        }
    }
}

impl<V, W> Default for Graph<V, W>
where
    V: Clone + Eq + Hash + fmt::Debug,
    W: Copy + PartialOrd + Num,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, W> fmt::Debug for Graph<V, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("vertices", &self.adj.len())
            .field("edges", &self.adj.values().map(Vec::len).sum::<usize>())
            .finish()
    }
}
