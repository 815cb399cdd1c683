//! Eccentricity estimation by iterative bound narrowing, with the derived
//! radius, diameter, center, and periphery.
//!
//! Instead of one BFS per vertex, the estimator keeps a lower and an upper
//! eccentricity bound for every vertex and repeatedly runs a single BFS from
//! a promising pivot, tightening all bounds through the triangle inequality:
//! for d = d(p, v), `max(ecc(p) - d, d) <= ecc(v) <= ecc(p) + d`. A vertex
//! whose bounds meet is exact and leaves the working set; the pivot itself
//! always resolves, so the loop terminates. On well-connected graphs only a
//! handful of searches remain.
//!
//! The converged map is cached on the graph and recomputed lazily after any
//! mutation. On a disconnected graph every eccentricity is reported
//! `Infinite`; this is the expected reading of unreachable vertices, not an
//! error.

use core::fmt;
use core::hash::Hash;
use std::collections::HashMap;

use num_traits::Num;

use crate::graph::{Distance, Graph, GraphError};

/// Lazily computed eccentricity map, dropped whenever the graph mutates.
#[derive(Debug, Clone)]
pub(crate) struct EccentricityCache<V> {
    pub(crate) map: Option<HashMap<V, Distance<usize>>>,
}

impl<V> EccentricityCache<V> {
    pub(crate) fn invalidate(&mut self) {
        self.map = None;
    }
}

impl<V> Default for EccentricityCache<V> {
    fn default() -> Self {
        Self { map: None }
    }
}

impl<V, W> Graph<V, W>
where
    V: Clone + Eq + Hash + fmt::Debug,
    W: Copy + PartialOrd + Num,
{
    /// Returns the eccentricity of every vertex, computing and caching the
    /// map on first use.
    pub fn eccentricities(&mut self) -> &HashMap<V, Distance<usize>> {
        if self.ecc.map.is_none() {
            let computed = self.narrow_bounds();
            self.ecc.map = Some(computed);
        }
        self.ecc.map.as_ref().expect("eccentricity cache is filled")
    }

    /// Returns the eccentricity of `vertex`.
    ///
    /// # Errors
    /// Returns [`GraphError::MissingVertex`] if `vertex` is not stored.
    pub fn eccentricity(&mut self, vertex: &V) -> Result<Distance<usize>, GraphError<V>> {
        if !self.contains(vertex) {
            return Err(GraphError::MissingVertex(vertex.clone()));
        }
        Ok(self.eccentricities()[vertex])
    }

    /// Returns the smallest eccentricity, or `None` for an empty graph.
    pub fn radius(&mut self) -> Option<Distance<usize>> {
        self.eccentricities()
            .values()
            .copied()
            .reduce(|best, e| if e < best { e } else { best })
    }

    /// Returns the largest eccentricity, or `None` for an empty graph.
    pub fn diameter(&mut self) -> Option<Distance<usize>> {
        self.eccentricities()
            .values()
            .copied()
            .reduce(|best, e| if e > best { e } else { best })
    }

    /// Returns the vertices whose eccentricity equals the radius, in
    /// insertion order.
    pub fn center(&mut self) -> Vec<V> {
        let radius = match self.radius() {
            Some(radius) => radius,
            None => return Vec::new(),
        };
        match &self.ecc.map {
            Some(map) => self
                .vertices()
                .filter(|v| map[*v] == radius)
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    /// Returns the vertices whose eccentricity equals the diameter, in
    /// insertion order.
    pub fn periphery(&mut self) -> Vec<V> {
        let diameter = match self.diameter() {
            Some(diameter) => diameter,
            None => return Vec::new(),
        };
        match &self.ecc.map {
            Some(map) => self
                .vertices()
                .filter(|v| map[*v] == diameter)
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    fn narrow_bounds(&self) -> HashMap<V, Distance<usize>> {
        if self.is_empty() {
            return HashMap::new();
        }

        let mut exact: HashMap<V, usize> = HashMap::with_capacity(self.vertex_count());
        let mut lower: HashMap<V, usize> =
            self.vertices().map(|v| (v.clone(), 0)).collect();
        let mut upper: HashMap<V, usize> =
            self.vertices().map(|v| (v.clone(), usize::MAX)).collect();
        let mut possibilities: Vec<V> = self.vertices().cloned().collect();

        // The first pivot is the best-connected vertex; after that the
        // phases alternate between chasing the smallest lower bound and the
        // largest upper bound.
        let mut minlower = self.best_connected(&possibilities);
        let mut maxupper: Option<V> = None;
        let mut high = false;

        while !possibilities.is_empty() {
            let pivot = if high { maxupper.clone() } else { minlower.clone() }
                .expect("candidates are tracked while vertices remain");
            high = !high;

            let bfs = self
                .breadth_first_search(&pivot, None)
                .expect("pivot is a graph vertex");

            let mut pivot_ecc = 0usize;
            let mut disconnected = false;
            for level in bfs.level.values() {
                match level {
                    Distance::Finite(d) => pivot_ecc = pivot_ecc.max(*d),
                    Distance::Infinite => {
                        disconnected = true;
                        break;
                    }
                }
            }
            if disconnected {
                // An unreachable vertex pushes every eccentricity out of
                // bounds.
                return self
                    .vertices()
                    .map(|v| (v.clone(), Distance::Infinite))
                    .collect();
            }

            #[cfg(feature = "tracing")]
            tracing::trace!(
                pivot = ?pivot,
                eccentricity = pivot_ecc,
                unresolved = possibilities.len(),
                "tightened eccentricity bounds"
            );

            let mut unresolved = Vec::with_capacity(possibilities.len());
            for vertex in possibilities {
                let level = bfs.level[&vertex]
                    .finite()
                    .expect("every vertex is reachable from the pivot");
                let low = lower.get_mut(&vertex).expect("bounds cover every vertex");
                *low = (*low).max(pivot_ecc - level).max(level);
                let low = *low;
                let up = upper.get_mut(&vertex).expect("bounds cover every vertex");
                *up = (*up).min(pivot_ecc.saturating_add(level));
                if low == *up {
                    exact.insert(vertex, low);
                } else {
                    unresolved.push(vertex);
                }
            }
            possibilities = unresolved;

            minlower = None;
            maxupper = None;
            for vertex in &possibilities {
                let take_low = match &minlower {
                    None => true,
                    Some(best) => {
                        lower[vertex] < lower[best]
                            || (lower[vertex] == lower[best]
                                && self.degree_or_zero(vertex) > self.degree_or_zero(best))
                    }
                };
                if take_low {
                    minlower = Some(vertex.clone());
                }
                let take_high = match &maxupper {
                    None => true,
                    Some(best) => {
                        upper[vertex] > upper[best]
                            || (upper[vertex] == upper[best]
                                && self.degree_or_zero(vertex) > self.degree_or_zero(best))
                    }
                };
                if take_high {
                    maxupper = Some(vertex.clone());
                }
            }
        }

        exact
            .into_iter()
            .map(|(vertex, e)| (vertex, Distance::Finite(e)))
            .collect()
    }

    // Highest out-degree wins; the first such vertex on ties.
    fn best_connected(&self, candidates: &[V]) -> Option<V> {
        let mut best: Option<&V> = None;
        for vertex in candidates {
            let better = match best {
                None => true,
                Some(current) => self.degree_or_zero(vertex) > self.degree_or_zero(current),
            };
            if better {
                best = Some(vertex);
            }
        }
        best.cloned()
    }
}
