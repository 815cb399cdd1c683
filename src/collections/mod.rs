//! Ordered containers backing the search algorithms.
//!
//! - [`heap`]: a comparator-driven binary heap.
//! - [`priority_queue`]: an indexed queue with logarithmic arbitrary-item
//!   priority updates, the engine under Dijkstra and A*.

pub mod heap;
pub mod priority_queue;

pub use heap::{BinaryHeap, Comparator, EmptyError};
pub use priority_queue::{Order, PriorityQueue, QueueError};
