//! Path lengths that may be unreachable.

use core::cmp::Ordering;
use core::ops::Add;

use serde::{Deserialize, Serialize};

/// A shortest-path length: either an accumulated finite weight or
/// unreachable.
///
/// `Finite(a)` compares below `Infinite` for every `a`, so the variant can be
/// used directly as a priority in a min-first queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Distance<W> {
    /// A reachable, accumulated length.
    Finite(W),
    /// No connecting route.
    Infinite,
}

impl<W> Distance<W> {
    /// Returns `true` for a finite length.
    pub fn is_finite(&self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    /// Unwraps a finite length, or `None` when unreachable.
    pub fn finite(self) -> Option<W> {
        match self {
            Distance::Finite(length) => Some(length),
            Distance::Infinite => None,
        }
    }
}

impl<W: Copy + Add<Output = W>> Distance<W> {
    /// Extends the length by one edge weight; absorbing on `Infinite`.
    pub fn plus(self, weight: W) -> Self {
        match self {
            Distance::Finite(length) => Distance::Finite(length + weight),
            Distance::Infinite => Distance::Infinite,
        }
    }
}

impl<W: PartialOrd> PartialOrd for Distance<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Distance::Finite(a), Distance::Finite(b)) => a.partial_cmp(b),
            (Distance::Finite(_), Distance::Infinite) => Some(Ordering::Less),
            (Distance::Infinite, Distance::Finite(_)) => Some(Ordering::Greater),
            (Distance::Infinite, Distance::Infinite) => Some(Ordering::Equal),
        }
    }
}
