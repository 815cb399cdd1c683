//! # `sextant` - Graph Search and Indexed Heap Toolkit
//!
//! An in-process algorithms library built from two layers:
//!
//! - **Containers**: a comparator-driven [`BinaryHeap`] and an indexed
//!   [`PriorityQueue`] whose side table makes arbitrary-item priority updates
//!   and removals logarithmic.
//! - **Graphs**: an adjacency-list [`Graph`] over arbitrary hashable vertex
//!   identities, with BFS, iterative DFS and topological ordering, cycle
//!   detection, Dijkstra, A*, and a bound-narrowing eccentricity estimator
//!   feeding radius, diameter, center, and periphery.
//!
//! ## Architecture
//!
//! The graph algorithms consume the containers only through their public
//! contracts: Dijkstra and A* drive the [`PriorityQueue`] via
//! `update_priority`, and the traversals stage work on std `Vec` and
//! `VecDeque`. Searches borrow the graph immutably and own their working
//! maps, so results stay valid however they are used; the one cached product
//! (eccentricities) is invalidated by every mutation and recomputed lazily.
//!
//! Everything is single-threaded and in-memory. Fallible operations return
//! typed errors; an unreachable destination is a value
//! ([`Distance::Infinite`] or `None`), never an error.
//!
//! ## Example
//!
//! ```rust
//! use sextant::{Distance, Graph};
//!
//! let graph: Graph<&str> = Graph::from_adjacency([
//!     ("a", vec!["b", "e"]),
//!     ("b", vec!["a", "f"]),
//!     ("e", vec!["a"]),
//!     ("f", vec!["b"]),
//! ]);
//!
//! let bfs = graph.breadth_first_search(&"a", None).unwrap();
//! assert_eq!(bfs.level[&"f"], Distance::Finite(2));
//! assert_eq!(bfs.parent[&"f"], Some("b"));
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]

pub mod collections;
pub mod graph;

pub use collections::{BinaryHeap, Comparator, EmptyError, Order, PriorityQueue, QueueError};
pub use graph::{
    reconstruct_path, BfsTree, DfsForest, Distance, Graph, GraphError, ShortestPaths,
};
