// Copyright (c) 2016-2021, 2026 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! # Shortest path search algorithms.
//!
//! All algorithms implement [`RoutingAlgorithm`]. The bidirectional searches
//! are instances of one generic control loop, [`bidir::BidirSearch`], with
//! different strategies plugged in:
//!
//! - an [`EdgeFilter`] restricting the expanded edges, e.g. to upward edges of
//!   a contraction hierarchy,
//! - a [`Heuristic`] (potential) turning the search into an A*-search,
//! - [`SearchOptions`](crate::SearchOptions) choosing node- or edge-based
//!   traversal and the stall-on-demand policy.
//!
//! Except for [`DijkstraOneToMany`], every algorithm instance answers exactly
//! one query.

pub mod bidir;
pub mod onetomany;
mod stall;
pub mod tdijkstra;

pub use self::bidir::{AStarBidirection, BidirSearch, DijkstraBidirection, DijkstraBidirectionCH};
pub use self::onetomany::DijkstraOneToMany;
pub use self::tdijkstra::TimeDependentDijkstra;

use crate::error::{Error, Result};
use crate::path::Path;
use crate::traits::{ChGraph, EdgeId, EdgeRef, NodeId, RoutingGraph};

/// A shortest path algorithm.
pub trait RoutingAlgorithm {
    /// Compute a shortest path from `from` to `to`.
    ///
    /// If no path exists (or a limit has been reached before one has been
    /// proven optimal), the returned path is not found. Errors are reserved
    /// for misuse and corrupted internal state.
    fn calc_path(&mut self, from: NodeId, to: NodeId) -> Result<Path>;

    /// Do not create tree entries heavier than `limit`.
    fn set_weight_limit(&mut self, limit: f64);

    /// Settle at most `max` nodes.
    ///
    /// A query that hits the limit before its path is proven optimal reports
    /// the path as not found.
    fn set_max_visited_nodes(&mut self, max: usize);

    /// The name of the algorithm, e.g. for diagnostics.
    fn name(&self) -> String;

    /// The number of nodes settled so far.
    fn visited_nodes(&self) -> usize;
}

/// A routing algorithm supporting edge-to-edge queries.
pub trait BidirRoutingAlgorithm: RoutingAlgorithm {
    /// Compute a shortest path from `from` to `to` starting with the original
    /// edge `from_out_edge` and ending with `to_in_edge`.
    ///
    /// Either restriction may be disabled by passing
    /// [`ANY_EDGE`](crate::traits::ANY_EDGE).
    fn calc_path_edges(&mut self, from: NodeId, to: NodeId, from_out_edge: EdgeId, to_in_edge: EdgeId) -> Result<Path>;
}

/// A potential for A*-search.
///
/// For the bidirectional search the potential $h$ must be consistent for
/// both directions, i.e. $w(u,v) - h(u) + h(v) \ge 0$ and $w(u,v) + h(u) -
/// h(v) \ge 0$ for all edges $(u,v)$. If $h_s$ and $h_t$ are lower bounds
/// on the distance to the source and the target, the canonical choice is
/// $h(u) = \frac12 (h_t(u) - h_s(u))$.
pub trait Heuristic {
    fn call(&self, u: NodeId) -> f64;

    /// Return `true` if the potential is zero everywhere.
    fn is_zero(&self) -> bool {
        false
    }
}

impl<F> Heuristic for F
where
    F: Fn(NodeId) -> f64,
{
    fn call(&self, u: NodeId) -> f64 {
        (*self)(u)
    }
}

/// The zero potential.
#[derive(Clone, Copy, Default, Debug)]
pub struct NoHeur;

impl Heuristic for NoHeur {
    fn call(&self, _u: NodeId) -> f64 {
        0.0
    }

    fn is_zero(&self) -> bool {
        true
    }
}

/// Decides which edges a search may expand.
pub trait EdgeFilter<G: ?Sized> {
    fn accept(&self, graph: &G, e: &EdgeRef) -> bool;

    /// Return `true` if the filter restricts the search to a contraction
    /// hierarchy.
    fn is_hierarchy(&self) -> bool {
        false
    }
}

/// Accept every edge.
#[derive(Clone, Copy, Default, Debug)]
pub struct AllEdges;

impl<G> EdgeFilter<G> for AllEdges
where
    G: RoutingGraph + ?Sized,
{
    fn accept(&self, _graph: &G, _e: &EdgeRef) -> bool {
        true
    }
}

/// Accept edges leading to a node of equal or higher level.
///
/// Since every edge is seen from the node it is expanded from, this is the
/// upward restriction for the forward search and the symmetric one for the
/// backward search.
#[derive(Clone, Copy, Default, Debug)]
pub struct UpwardEdges;

impl<G> EdgeFilter<G> for UpwardEdges
where
    G: ChGraph + ?Sized,
{
    fn accept(&self, graph: &G, e: &EdgeRef) -> bool {
        graph.level(e.base) <= graph.level(e.adj)
    }

    fn is_hierarchy(&self) -> bool {
        true
    }
}

/// Fail if `u` is not a node of `graph`.
pub(crate) fn check_node<G: RoutingGraph>(graph: &G, u: NodeId) -> Result<()> {
    if (u as usize) < graph.num_nodes() {
        Ok(())
    } else {
        Err(Error::NodeOutOfRange {
            node: u,
            num_nodes: graph.num_nodes(),
        })
    }
}
