// Copyright (c) 2015-2021, 2026 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Traits for constructing routing graphs.

use crate::error::Result;
use crate::traits::{EdgeId, NodeId};

/// A trait to construct routing graphs.
///
/// Routing graphs are static objects. In order to build a graph, one uses a
/// builder and, once the construction is complete, converts it into a graph.
/// Contraction levels and shortcuts are added by the builder as well, they
/// are produced by some external contraction and only stored here.
pub trait Builder
where
    Self: Sized,
{
    /// The graph type produced by this builder.
    type Graph;

    /// Create a new, empty builder.
    fn new() -> Self {
        Self::with_capacities(0, 0)
    }

    /// Create a new, empty builder.
    ///
    /// The builder might be passed a guess of the number of nodes and
    /// edges. This might be used to reserve the appropriate internal
    /// memory, but is no strict requirement for the number of nodes
    /// and edges to be added to the graph.
    fn with_capacities(nnodes: usize, nedges: usize) -> Self;

    /// Reserve memory for a certain number of nodes and edges.
    fn reserve(&mut self, nnodes: usize, nedges: usize);

    /// Return the current number of nodes.
    fn num_nodes(&self) -> usize;

    /// Return the current number of edges (including shortcuts).
    fn num_edges(&self) -> usize;

    /// Add a new node.
    fn add_node(&mut self) -> NodeId;

    /// Add `n` new nodes.
    fn add_nodes(&mut self, n: usize) -> Vec<NodeId> {
        (0..n).map(|_| self.add_node()).collect()
    }

    /// Add a new edge traversable in both directions.
    fn add_edge(&mut self, u: NodeId, v: NodeId, distance: f64) -> EdgeId {
        self.add_edge_with_access(u, v, distance, [true, true])
    }

    /// Add a new edge traversable from `u` to `v` only.
    fn add_oneway_edge(&mut self, u: NodeId, v: NodeId, distance: f64) -> EdgeId {
        self.add_edge_with_access(u, v, distance, [true, false])
    }

    /// Add a new edge with access flags `[u -> v, v -> u]`.
    fn add_edge_with_access(&mut self, u: NodeId, v: NodeId, distance: f64, access: [bool; 2]) -> EdgeId;

    /// Add a shortcut `u -> v` replacing the edges `skipped`.
    ///
    /// The first skipped edge must be incident to `u`, the second to `v` and
    /// both must share a common node. Distance and the original edges at both
    /// ends are derived from the skipped edges.
    fn add_shortcut(&mut self, u: NodeId, v: NodeId, skipped: [EdgeId; 2], weight: f64, millis: u64) -> Result<EdgeId>;

    /// Set the contraction level of a node.
    fn set_level(&mut self, u: NodeId, level: u32);

    /// Turn the builder into a graph.
    fn into_graph(self) -> Self::Graph;
}

/// A graph with a default builder.
pub trait Buildable
where
    Self: Sized,
{
    type Builder: Builder<Graph = Self>;

    /// Create a new builder for this graph type.
    fn new_builder() -> Self::Builder {
        Self::Builder::new()
    }

    /// Create a new graph by passing the builder to the callback `f`.
    ///
    /// # Example
    ///
    /// ```
    /// use rs_chroute::{Buildable, Builder, VecGraph};
    /// use rs_chroute::traits::RoutingGraph;
    ///
    /// let g = VecGraph::new_with(|b| {
    ///     let u = b.add_node();
    ///     let v = b.add_node();
    ///     b.add_edge(u, v, 3.0);
    /// });
    ///
    /// assert_eq!(g.num_nodes(), 2);
    /// assert_eq!(g.num_edges(), 1);
    /// ```
    fn new_with<F>(f: F) -> Self
    where
        F: FnOnce(&mut Self::Builder),
    {
        let mut b = Self::new_builder();
        f(&mut b);
        b.into_graph()
    }

    /// Create a new graph by passing the builder to the fallible callback `f`.
    fn try_new_with<F, E>(f: F) -> std::result::Result<Self, E>
    where
        F: FnOnce(&mut Self::Builder) -> std::result::Result<(), E>,
    {
        let mut b = Self::new_builder();
        f(&mut b)?;
        Ok(b.into_graph())
    }
}
