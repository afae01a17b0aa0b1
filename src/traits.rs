// Copyright (c) 2015-2022, 2026 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

//! Traits describing the read-only graph view consumed by the search.
//!
//! A routing graph is a directed multigraph. Every edge is stored with an
//! orientation `(u, v)` and access flags for both directions. During a search
//! edges are always seen *from* some node, the *base* node, so an [`EdgeRef`]
//! is a view of a stored edge that may be flipped with respect to storage.
//!
//! Contraction hierarchies add *shortcuts*: one-way edges replacing a path of
//! two (possibly shortcut) edges. They are only traversable in storage
//! orientation and carry their own aggregated weight, distance and time.

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// Identifier of a node.
pub type NodeId = u32;

/// Identifier of an edge (original edge or shortcut).
pub type EdgeId = u32;

/// Marker for "no edge", e.g. the incoming edge of a root entry.
pub const NO_EDGE: EdgeId = EdgeId::MAX;

/// Marker disabling an edge restriction in edge-to-edge queries.
pub const ANY_EDGE: EdgeId = EdgeId::MAX - 1;

/// Direction of a search.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Direction {
    /// Search from the source along outgoing edges.
    Forward,
    /// Search from the target along incoming edges.
    Backward,
}

impl Direction {
    /// Return `true` for the backward direction.
    pub fn is_reverse(self) -> bool {
        self == Direction::Backward
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Data of a contraction hierarchy shortcut.
///
/// All fields refer to the storage orientation `(u, v)` of the shortcut.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Shortcut {
    /// The two bypassed edges, the one incident to `u` first.
    pub skipped: [EdgeId; 2],
    /// The weight of the bypassed path.
    pub weight: f64,
    /// The distance of the bypassed path.
    pub distance: f64,
    /// The travel time of the bypassed path in milliseconds.
    pub millis: u64,
    /// The original edge incident to `u`.
    pub orig_first: EdgeId,
    /// The original edge incident to `v`.
    pub orig_last: EdgeId,
}

/// A view of an edge as seen from its base node.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct EdgeRef {
    /// The edge id.
    pub edge: EdgeId,
    /// The node the edge is seen from.
    pub base: NodeId,
    /// The node at the other end.
    pub adj: NodeId,
    /// The (geometric) length of the edge.
    pub distance: f64,
    /// `true` if `base` is the second node in storage orientation.
    flipped: bool,
    /// Access in storage orientation `[u -> v, v -> u]`.
    access: [bool; 2],
    shortcut: Option<Shortcut>,
}

impl EdgeRef {
    /// Create an original edge `u -> v` in storage orientation.
    ///
    /// `access` tells whether the edge may be traversed from `u` to `v` and
    /// from `v` to `u`.
    pub fn original(edge: EdgeId, u: NodeId, v: NodeId, distance: f64, access: [bool; 2]) -> EdgeRef {
        EdgeRef {
            edge,
            base: u,
            adj: v,
            distance,
            flipped: false,
            access,
            shortcut: None,
        }
    }

    /// Create a shortcut `u -> v` in storage orientation.
    pub fn shortcut(edge: EdgeId, u: NodeId, v: NodeId, shortcut: Shortcut) -> EdgeRef {
        EdgeRef {
            edge,
            base: u,
            adj: v,
            distance: shortcut.distance,
            flipped: false,
            access: [true, false],
            shortcut: Some(shortcut),
        }
    }

    /// Return the same edge seen from the other end.
    pub fn flip(self) -> EdgeRef {
        EdgeRef {
            base: self.adj,
            adj: self.base,
            flipped: !self.flipped,
            ..self
        }
    }

    /// Return `true` if `base` is the second node in storage orientation.
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn is_shortcut(&self) -> bool {
        self.shortcut.is_some()
    }

    pub fn shortcut_data(&self) -> Option<&Shortcut> {
        self.shortcut.as_ref()
    }

    /// Return `true` if traversing the edge in the given direction follows its
    /// storage orientation.
    ///
    /// If `reverse` is `false` the edge is traversed from `base` to `adj`,
    /// otherwise from `adj` to `base`.
    pub fn follows_storage(&self, reverse: bool) -> bool {
        self.flipped == reverse
    }

    /// Return `true` if the edge may be traversed in the given direction.
    pub fn can_traverse(&self, reverse: bool) -> bool {
        if self.follows_storage(reverse) {
            self.access[0]
        } else {
            self.access[1]
        }
    }

    /// The original edge incident to the base node.
    ///
    /// This is the edge itself unless it is a shortcut.
    pub fn orig_at_base(&self) -> EdgeId {
        match self.shortcut {
            Some(ref sc) if self.flipped => sc.orig_last,
            Some(ref sc) => sc.orig_first,
            None => self.edge,
        }
    }

    /// The original edge incident to the adjacent node.
    pub fn orig_at_adj(&self) -> EdgeId {
        match self.shortcut {
            Some(ref sc) if self.flipped => sc.orig_first,
            Some(ref sc) => sc.orig_last,
            None => self.edge,
        }
    }
}

/// A read-only directed graph suitable for routing.
///
/// Implementations must be safe for concurrent read access, searches never
/// modify the graph.
pub trait RoutingGraph {
    /// Iterator over the edges incident to some node.
    type EdgeIt<'a>: Iterator<Item = EdgeRef>
    where
        Self: 'a;

    /// Return the number of nodes.
    fn num_nodes(&self) -> usize;

    /// Return the number of edges (including shortcuts).
    fn num_edges(&self) -> usize;

    /// Return the edges of `u` traversable in direction `dir`.
    ///
    /// Each returned edge has `base == u`. For [`Direction::Forward`] these
    /// are the edges that may be traversed from `u` to `adj`, for
    /// [`Direction::Backward`] those that may be traversed from `adj` to `u`.
    fn edges(&self, u: NodeId, dir: Direction) -> Self::EdgeIt<'_>;

    /// Return the edge with the given id in storage orientation.
    fn edge(&self, e: EdgeId) -> Option<EdgeRef>;
}

/// A routing graph with contraction hierarchy levels.
pub trait ChGraph: RoutingGraph {
    /// Return the contraction level of a node.
    fn level(&self, u: NodeId) -> u32;
}

impl<'g, G> RoutingGraph for &'g G
where
    G: RoutingGraph,
{
    type EdgeIt<'a> = G::EdgeIt<'a> where Self: 'a;

    fn num_nodes(&self) -> usize {
        (**self).num_nodes()
    }

    fn num_edges(&self) -> usize {
        (**self).num_edges()
    }

    fn edges(&self, u: NodeId, dir: Direction) -> Self::EdgeIt<'_> {
        (**self).edges(u, dir)
    }

    fn edge(&self, e: EdgeId) -> Option<EdgeRef> {
        (**self).edge(e)
    }
}

impl<'g, G> ChGraph for &'g G
where
    G: ChGraph,
{
    fn level(&self, u: NodeId) -> u32 {
        (**self).level(u)
    }
}
