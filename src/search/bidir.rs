/*
 * Copyright (c) 2019, 2021, 2026 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! Bidirectional search.
//!
//! Two searches run alternately, one from the source along outgoing edges and
//! one from the target along incoming edges. Whenever an entry is added or
//! improved in one direction, it is combined with the entries of the other
//! direction at the same node, giving a candidate path (the *meeting*). The
//! best meeting is the result once it can no longer be improved:
//!
//! - for plain (A*-)searches if one direction is exhausted or the keys of the
//!   last popped entries sum up to at least the best meeting weight,
//! - for contraction hierarchy searches if both directions are exhausted or
//!   both last popped weights are at least the best meeting weight. A
//!   direction stops as soon as it pops an entry heavier than the best
//!   meeting.
//!
//! With an A* potential $h$ the forward keys are $d(u) + h(u)$ and the
//! backward keys $d(u) - h(u)$, which leaves the stopping rule unchanged.
//!
//! In edge-based traversal the entries are states `(node, incoming edge)`. A
//! forward state arriving at $v$ via edge $a$ meets a backward state leaving
//! $v$ via edge $c$ with the additional turn cost of $(a, v, c)$, so the turn
//! at the meeting node is charged exactly once.
//!
//! # Example
//!
//! ```
//! use rs_chroute::{Buildable, Builder, VecGraph, SearchOptions};
//! use rs_chroute::search::{DijkstraBidirection, RoutingAlgorithm};
//! use rs_chroute::weighting::ShortestWeighting;
//!
//! // 0 - 1 - 2 - 3 with a detour 0 - 4 - 3
//! let g = VecGraph::new_with(|b| {
//!     let n = b.add_nodes(5);
//!     b.add_edge(n[0], n[1], 1.0);
//!     b.add_edge(n[1], n[2], 1.0);
//!     b.add_edge(n[2], n[3], 1.0);
//!     b.add_edge(n[0], n[4], 2.0);
//!     b.add_edge(n[4], n[3], 2.0);
//! });
//!
//! let w = ShortestWeighting::default();
//! let mut algo = DijkstraBidirection::new(&g, &w, SearchOptions::default()).unwrap();
//! let path = algo.calc_path(0, 3).unwrap();
//!
//! assert!(path.found());
//! assert_eq!(path.weight(), 3.0);
//! assert_eq!(path.edges(), &[0, 1, 2]);
//! assert_eq!(path.nodes(), &[0, 1, 2, 3]);
//!
//! // instances cannot be reused
//! assert!(algo.calc_path(0, 3).is_err());
//! ```

use super::stall::Staller;
use super::{check_node, AllEdges, BidirRoutingAlgorithm, EdgeFilter, Heuristic, NoHeur, RoutingAlgorithm, UpwardEdges};
use crate::error::{Error, Result};
use crate::extract::PathExtractor;
use crate::frontier::Frontier;
use crate::options::{SearchOptions, StallPolicy};
use crate::path::Path;
use crate::spt::{EntryId, SptArena, SptEntry, TraversalId};
use crate::traits::{ChGraph, Direction, EdgeId, NodeId, RoutingGraph, ANY_EDGE, NO_EDGE};
use crate::weighting::{calc_weight, Weighting};

use log::debug;

/// Information about the best meeting.
#[derive(Clone, Copy, Debug)]
struct Meet {
    fwd: EntryId,
    bwd: EntryId,
    weight: f64,
}

/// Generic bidirectional search.
///
/// - `F` restricts the expanded edges,
/// - `H` is the A* potential.
pub struct BidirSearch<'g, G, W, F = AllEdges, H = NoHeur> {
    graph: &'g G,
    weighting: &'g W,
    filter: F,
    heur: H,
    options: SearchOptions,
    fwd: Frontier,
    bwd: Frontier,
    meet: Option<Meet>,
    used: bool,
}

/// Bidirectional Dijkstra on the full graph.
pub type DijkstraBidirection<'g, G, W> = BidirSearch<'g, G, W, AllEdges, NoHeur>;

/// Bidirectional A*-search on the full graph.
pub type AStarBidirection<'g, G, W, H> = BidirSearch<'g, G, W, AllEdges, H>;

/// Bidirectional Dijkstra on the upward graph of a contraction hierarchy.
pub type DijkstraBidirectionCH<'g, G, W> = BidirSearch<'g, G, W, UpwardEdges, NoHeur>;

impl<'g, G, W> BidirSearch<'g, G, W, AllEdges, NoHeur>
where
    G: RoutingGraph,
    W: Weighting,
{
    pub fn new(graph: &'g G, weighting: &'g W, options: SearchOptions) -> Result<Self> {
        BidirSearch::with_parts(graph, weighting, AllEdges, NoHeur, options)
    }
}

impl<'g, G, W, H> BidirSearch<'g, G, W, AllEdges, H>
where
    G: RoutingGraph,
    W: Weighting,
    H: Heuristic,
{
    pub fn with_heuristic(graph: &'g G, weighting: &'g W, heur: H, options: SearchOptions) -> Result<Self> {
        BidirSearch::with_parts(graph, weighting, AllEdges, heur, options)
    }
}

impl<'g, G, W> BidirSearch<'g, G, W, UpwardEdges, NoHeur>
where
    G: ChGraph,
    W: Weighting,
{
    /// Create a contraction hierarchy search.
    ///
    /// Fails if stall-on-demand is combined with edge-based traversal.
    pub fn new(graph: &'g G, weighting: &'g W, options: SearchOptions) -> Result<Self> {
        BidirSearch::with_parts(graph, weighting, UpwardEdges, NoHeur, options)
    }
}

impl<'g, G, W, F, H> BidirSearch<'g, G, W, F, H>
where
    G: RoutingGraph,
    W: Weighting,
    F: EdgeFilter<G>,
    H: Heuristic,
{
    /// Create a search from its strategies.
    ///
    /// Fails if a hierarchy search is combined with an A* potential, with
    /// turn costs in node-based traversal or with stall-on-demand in
    /// edge-based traversal.
    pub fn with_parts(graph: &'g G, weighting: &'g W, filter: F, heur: H, options: SearchOptions) -> Result<Self> {
        if filter.is_hierarchy() {
            if !heur.is_zero() {
                return Err(Error::PotentialOnHierarchy);
            }
            if options.is_edge_based() && options.stalling != StallPolicy::Disabled {
                return Err(Error::StallingRequiresNodeBased);
            }
            if !options.is_edge_based() && weighting.has_turn_costs() {
                return Err(Error::TurnCostsRequireEdgeBased);
            }
        }
        let edge_based = options.is_edge_based();
        let capacity = options.initial_capacity;
        Ok(BidirSearch {
            graph,
            weighting,
            filter,
            heur,
            fwd: Frontier::new(false, edge_based, capacity),
            bwd: Frontier::new(true, edge_based, capacity),
            options,
            meet: None,
            used: false,
        })
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// The shortest path tree of the forward search.
    pub fn forward_tree(&self) -> &SptArena {
        self.fwd.spt()
    }

    /// The shortest path tree of the backward search.
    pub fn backward_tree(&self) -> &SptArena {
        self.bwd.spt()
    }

    fn frontier(&self, dir: Direction) -> &Frontier {
        match dir {
            Direction::Forward => &self.fwd,
            Direction::Backward => &self.bwd,
        }
    }

    fn frontier_mut(&mut self, dir: Direction) -> &mut Frontier {
        match dir {
            Direction::Forward => &mut self.fwd,
            Direction::Backward => &mut self.bwd,
        }
    }

    fn best_weight(&self) -> f64 {
        self.meet.map(|m| m.weight).unwrap_or(f64::INFINITY)
    }

    fn potential(&self, dir: Direction, u: NodeId) -> f64 {
        match dir {
            Direction::Forward => self.heur.call(u),
            Direction::Backward => -self.heur.call(u),
        }
    }

    fn run(&mut self) {
        while !self.finished() {
            for &dir in &[Direction::Forward, Direction::Backward] {
                if self.visited_nodes() >= self.options.max_visited_nodes {
                    debug!("{}: visited node limit {} reached", self.name(), self.options.max_visited_nodes);
                    return;
                }
                if !self.frontier(dir).is_finished() && !self.fill_edges(dir) {
                    self.frontier_mut(dir).set_finished();
                }
            }
        }
    }

    fn finished(&self) -> bool {
        let best = self.best_weight();
        if self.filter.is_hierarchy() {
            (self.fwd.is_finished() && self.bwd.is_finished())
                || (self.fwd.current_weight() >= best && self.bwd.current_weight() >= best)
        } else {
            self.fwd.is_finished() || self.bwd.is_finished() || self.fwd.current_key() + self.bwd.current_key() >= best
        }
    }

    /// Pop and expand one entry. Returns `false` if the direction is done.
    fn fill_edges(&mut self, dir: Direction) -> bool {
        let id = match self.frontier_mut(dir).pop() {
            Some(id) => id,
            None => return false,
        };

        if self.is_stallable(dir, id) {
            return true;
        }

        if self.filter.is_hierarchy() && self.frontier(dir).entry(id).weight > self.best_weight() {
            return false;
        }

        self.expand(dir, id);
        true
    }

    fn is_stallable(&mut self, dir: Direction, id: EntryId) -> bool {
        if !self.filter.is_hierarchy() || self.options.is_edge_based() {
            return false;
        }
        let staller = Staller {
            graph: self.graph,
            weighting: self.weighting,
            filter: &self.filter,
            policy: self.options.stalling,
            eps: self.options.stall_epsilon,
        };
        let frontier = match dir {
            Direction::Forward => &mut self.fwd,
            Direction::Backward => &mut self.bwd,
        };
        staller.is_stallable(frontier, id)
    }

    /// Relax all edges of a settled entry.
    fn expand(&mut self, dir: Direction, id: EntryId) {
        let graph = self.graph;
        let reverse = dir.is_reverse();
        let edge_based = self.options.is_edge_based();
        let entry = *self.frontier(dir).entry(id);
        let node = entry.adj_node;
        let restriction = if entry.is_root() {
            self.frontier(dir).root_restriction()
        } else {
            None
        };

        for e in graph.edges(node, dir) {
            if !self.filter.accept(graph, &e) {
                continue;
            }
            if restriction.map(|r| e.orig_at_base() != r).unwrap_or(false) {
                continue;
            }
            // no u-turns in node-based traversal
            if !edge_based && e.edge == entry.edge {
                continue;
            }

            let mut w = calc_weight(self.weighting, &e, reverse);
            if edge_based && entry.incoming_edge != NO_EDGE {
                w += if reverse {
                    self.weighting.turn_weight(e.orig_at_base(), node, entry.incoming_edge)
                } else {
                    self.weighting.turn_weight(entry.incoming_edge, node, e.orig_at_base())
                };
            }
            if !w.is_finite() {
                continue;
            }

            let weight = entry.weight + w;
            if weight > self.options.weight_limit {
                continue;
            }

            let candidate = SptEntry {
                edge: e.edge,
                adj_node: e.adj,
                weight,
                parent: Some(id),
                incoming_edge: e.orig_at_adj(),
                time: 0,
            };
            let key = weight + self.potential(dir, e.adj);
            if let Some(new_id) = self.frontier_mut(dir).relax(candidate, key) {
                self.update_best(dir, new_id);
            }
        }
    }

    /// Combine a new or improved entry with the other direction's entries at
    /// the same node.
    fn update_best(&mut self, dir: Direction, id: EntryId) {
        let (this, other) = match dir {
            Direction::Forward => (&self.fwd, &self.bwd),
            Direction::Backward => (&self.bwd, &self.fwd),
        };
        let node = this.entry(id).adj_node;

        let mut best = self.meet;
        let mut consider = |other_id: EntryId| {
            let (fwd, bwd) = match dir {
                Direction::Forward => (id, other_id),
                Direction::Backward => (other_id, id),
            };
            let weight = self.meeting_weight(fwd, bwd);
            if weight <= self.options.weight_limit && best.map(|m| weight < m.weight).unwrap_or(weight.is_finite()) {
                best = Some(Meet { fwd, bwd, weight });
            }
        };

        if self.options.is_edge_based() {
            for &other_id in other.entries_at(node) {
                consider(other_id);
            }
        } else if let Some(other_id) = other.best_entry(TraversalId::Node(node)) {
            consider(other_id);
        }

        self.meet = best;
    }

    /// The weight of the path through a forward and a backward entry at the
    /// same node.
    fn meeting_weight(&self, fwd: EntryId, bwd: EntryId) -> f64 {
        let (f, b) = (self.fwd.entry(fwd), self.bwd.entry(bwd));
        let weight = f.weight + b.weight;
        if !self.options.is_edge_based() {
            return weight;
        }

        let (a, c) = (f.incoming_edge, b.incoming_edge);
        let allowed = |restriction: Option<EdgeId>, e: EdgeId| restriction.map(|r| r == e).unwrap_or(true);
        let turn = if a == NO_EDGE && c == NO_EDGE {
            if self.fwd.root_restriction().is_none() && self.bwd.root_restriction().is_none() {
                0.0
            } else {
                f64::INFINITY
            }
        } else if a == NO_EDGE {
            // at the source, the first edge must match the restriction
            if allowed(self.fwd.root_restriction(), c) {
                0.0
            } else {
                f64::INFINITY
            }
        } else if c == NO_EDGE {
            if allowed(self.bwd.root_restriction(), a) {
                0.0
            } else {
                f64::INFINITY
            }
        } else {
            self.weighting.turn_weight(a, f.adj_node, c)
        };

        weight + turn
    }

    fn extract_path(&self) -> Result<Path> {
        if !self.finished() {
            return Ok(Path::not_found());
        }
        match self.meet {
            Some(meet) => PathExtractor::new(self.graph, self.weighting, self.options.is_edge_based()).extract(
                self.fwd.spt(),
                meet.fwd,
                self.bwd.spt(),
                meet.bwd,
                meet.weight,
            ),
            None => Ok(Path::not_found()),
        }
    }
}

impl<'g, G, W, F, H> RoutingAlgorithm for BidirSearch<'g, G, W, F, H>
where
    G: RoutingGraph,
    W: Weighting,
    F: EdgeFilter<G>,
    H: Heuristic,
{
    fn calc_path(&mut self, from: NodeId, to: NodeId) -> Result<Path> {
        self.calc_path_edges(from, to, ANY_EDGE, ANY_EDGE)
    }

    fn set_weight_limit(&mut self, limit: f64) {
        self.options.weight_limit = limit;
    }

    fn set_max_visited_nodes(&mut self, max: usize) {
        self.options.max_visited_nodes = max;
    }

    fn name(&self) -> String {
        let mut name = String::from(if self.heur.is_zero() { "dijkstrabi" } else { "astarbi" });
        if self.filter.is_hierarchy() {
            name.push_str("|ch");
            match self.options.stalling {
                StallPolicy::Disabled => name.push_str("|nosod"),
                StallPolicy::SingleHop => (),
                StallPolicy::Aggressive => name.push_str("|aggressive_sod"),
            }
        }
        if self.options.is_edge_based() {
            name.push_str("|edge");
        }
        name
    }

    fn visited_nodes(&self) -> usize {
        self.fwd.settled() + self.bwd.settled()
    }
}

impl<'g, G, W, F, H> BidirRoutingAlgorithm for BidirSearch<'g, G, W, F, H>
where
    G: RoutingGraph,
    W: Weighting,
    F: EdgeFilter<G>,
    H: Heuristic,
{
    fn calc_path_edges(&mut self, from: NodeId, to: NodeId, from_out_edge: EdgeId, to_in_edge: EdgeId) -> Result<Path> {
        if self.used {
            debug!("{}: instance already used, rejecting query {} -> {}", self.name(), from, to);
            return Err(Error::AlreadyRun);
        }
        self.used = true;
        check_node(self.graph, from)?;
        check_node(self.graph, to)?;

        let restricted = from_out_edge != ANY_EDGE || to_in_edge != ANY_EDGE;
        if restricted && !self.options.is_edge_based() {
            return Err(Error::EdgeRestrictionRequiresEdgeBased);
        }

        let fwd_key = self.potential(Direction::Forward, from);
        let bwd_key = self.potential(Direction::Backward, to);
        let fwd_root = self.fwd.init(from, fwd_key, from_out_edge);
        let bwd_root = self.bwd.init(to, bwd_key, to_in_edge);
        if from == to && !restricted {
            self.meet = Some(Meet {
                fwd: fwd_root,
                bwd: bwd_root,
                weight: 0.0,
            });
            self.fwd.set_finished();
            self.bwd.set_finished();
        }

        self.run();

        let path = self.extract_path()?;
        debug!(
            "{}: {} -> {}, found: {}, weight: {}, visited nodes: {}",
            self.name(),
            from,
            to,
            path.found(),
            path.weight(),
            self.visited_nodes()
        );
        Ok(path)
    }
}
