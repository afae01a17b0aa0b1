/*
 * Copyright (c) 2026 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Dijkstra from one source to many targets.
//!
//! The first query fixes the source. The forward tree is kept between queries
//! and only extended until the requested target is settled, paths to already
//! settled targets are extracted (and cached) without any further search.
//!
//! # Example
//!
//! ```
//! use rs_chroute::{Buildable, Builder, VecGraph, SearchOptions};
//! use rs_chroute::search::{DijkstraOneToMany, RoutingAlgorithm};
//! use rs_chroute::weighting::ShortestWeighting;
//!
//! let g = VecGraph::new_with(|b| {
//!     let n = b.add_nodes(4);
//!     b.add_edge(n[0], n[1], 1.0);
//!     b.add_edge(n[1], n[2], 1.0);
//!     b.add_edge(n[2], n[3], 1.0);
//! });
//! let w = ShortestWeighting::default();
//!
//! let mut algo = DijkstraOneToMany::new(&g, &w, SearchOptions::default()).unwrap();
//! assert_eq!(algo.calc_path(0, 3).unwrap().weight(), 3.0);
//! // node 1 has already been settled
//! let visited = algo.visited_nodes();
//! assert_eq!(algo.calc_path(0, 1).unwrap().weight(), 1.0);
//! assert_eq!(algo.visited_nodes(), visited);
//!
//! // another source requires a reset
//! assert!(algo.calc_path(1, 3).is_err());
//! algo.clear();
//! assert_eq!(algo.calc_path(1, 3).unwrap().weight(), 2.0);
//! ```

use super::{check_node, RoutingAlgorithm};
use crate::error::{Error, Result};
use crate::extract::PathExtractor;
use crate::frontier::Frontier;
use crate::options::SearchOptions;
use crate::path::Path;
use crate::spt::{EntryId, SptEntry, TraversalId};
use crate::traits::{Direction, NodeId, RoutingGraph, ANY_EDGE};
use crate::weighting::{calc_weight, Weighting};

use log::debug;
use rustc_hash::FxHashMap;

pub struct DijkstraOneToMany<'g, G, W> {
    graph: &'g G,
    weighting: &'g W,
    options: SearchOptions,
    frontier: Frontier,
    /// The fixed source, if any.
    source: Option<NodeId>,
    paths: FxHashMap<NodeId, Path>,
}

impl<'g, G, W> DijkstraOneToMany<'g, G, W>
where
    G: RoutingGraph,
    W: Weighting,
{
    /// Create a new search. Only node-based traversal is supported.
    pub fn new(graph: &'g G, weighting: &'g W, options: SearchOptions) -> Result<Self> {
        if options.is_edge_based() {
            return Err(Error::UnsupportedTraversal("one-to-many search"));
        }
        let capacity = options.initial_capacity;
        Ok(DijkstraOneToMany {
            graph,
            weighting,
            options,
            frontier: Frontier::new(false, false, capacity),
            source: None,
            paths: FxHashMap::default(),
        })
    }

    /// The fixed source node, if any.
    pub fn source(&self) -> Option<NodeId> {
        self.source
    }

    /// Drop the search tree and all cached paths and release the source.
    pub fn clear(&mut self) {
        debug!("one-to-many: reset (source {:?}, {} cached paths)", self.source, self.paths.len());
        self.frontier.clear();
        self.paths.clear();
        self.source = None;
    }

    /// Restart the search at the fixed source, e.g. because the tree was
    /// pruned at another weight limit.
    fn restart(&mut self) {
        self.paths.clear();
        match self.source {
            Some(source) => {
                debug!("one-to-many: restarting at source {}", source);
                self.frontier.init(source, 0.0, ANY_EDGE);
            }
            None => self.frontier.clear(),
        }
    }

    /// Continue the search until `to` is settled.
    fn settle(&mut self, to: NodeId) -> Option<EntryId> {
        let target = TraversalId::Node(to);
        while self.frontier.settled_entry(target).is_none() {
            if self.frontier.settled() >= self.options.max_visited_nodes {
                return None;
            }
            let id = self.frontier.pop()?;
            self.expand(id);
        }
        self.frontier.settled_entry(target)
    }

    fn expand(&mut self, id: EntryId) {
        let graph = self.graph;
        let entry = *self.frontier.entry(id);
        for e in graph.edges(entry.adj_node, Direction::Forward) {
            if e.edge == entry.edge {
                continue;
            }
            let w = calc_weight(self.weighting, &e, false);
            if !w.is_finite() {
                continue;
            }
            let weight = entry.weight + w;
            if weight > self.options.weight_limit {
                continue;
            }
            self.frontier.relax(
                SptEntry {
                    edge: e.edge,
                    adj_node: e.adj,
                    weight,
                    parent: Some(id),
                    incoming_edge: e.edge,
                    time: 0,
                },
                weight,
            );
        }
    }
}

impl<'g, G, W> RoutingAlgorithm for DijkstraOneToMany<'g, G, W>
where
    G: RoutingGraph,
    W: Weighting,
{
    fn calc_path(&mut self, from: NodeId, to: NodeId) -> Result<Path> {
        match self.source {
            Some(source) if source != from => {
                debug!("one-to-many: fixed to source {}, rejecting query from {}", source, from);
                return Err(Error::SourceMismatch {
                    fixed: source,
                    requested: from,
                });
            }
            Some(_) => (),
            None => {
                check_node(self.graph, from)?;
                self.frontier.init(from, 0.0, ANY_EDGE);
                self.source = Some(from);
            }
        }
        check_node(self.graph, to)?;

        if let Some(path) = self.paths.get(&to) {
            debug!("one-to-many: cached path {} -> {}", from, to);
            return Ok(path.clone());
        }

        match self.settle(to) {
            Some(id) => {
                let path =
                    PathExtractor::new(self.graph, self.weighting, false).extract_forward(self.frontier.spt(), id)?;
                self.paths.insert(to, path.clone());
                Ok(path)
            }
            None => Ok(Path::not_found()),
        }
    }

    /// Set the weight limit. Changing the limit discards the search tree and
    /// all cached paths, the source stays fixed.
    fn set_weight_limit(&mut self, limit: f64) {
        if limit != self.options.weight_limit {
            self.options.weight_limit = limit;
            self.restart();
        }
    }

    fn set_max_visited_nodes(&mut self, max: usize) {
        self.options.max_visited_nodes = max;
    }

    fn name(&self) -> String {
        "dijkstra_one_to_many".to_string()
    }

    fn visited_nodes(&self) -> usize {
        self.frontier.settled()
    }
}
