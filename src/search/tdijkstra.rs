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

//! Time-dependent Dijkstra.
//!
//! Each tree entry carries the time at which its node is reached. The cost of
//! an edge is evaluated at the time stamp of the entry it is relaxed from.
//! Shortcuts are never expanded because their stored weights are not valid
//! for all departure times.

use super::{check_node, RoutingAlgorithm};
use crate::error::{Error, Result};
use crate::extract::PathExtractor;
use crate::frontier::Frontier;
use crate::options::SearchOptions;
use crate::path::Path;
use crate::spt::{EntryId, SptEntry};
use crate::traits::{Direction, NodeId, RoutingGraph, ANY_EDGE};
use crate::weighting::TimeDependentWeighting;

use log::debug;

pub struct TimeDependentDijkstra<'g, G, W> {
    graph: &'g G,
    weighting: &'g W,
    options: SearchOptions,
    frontier: Frontier,
    used: bool,
}

impl<'g, G, W> TimeDependentDijkstra<'g, G, W>
where
    G: RoutingGraph,
    W: TimeDependentWeighting,
{
    pub fn new(graph: &'g G, weighting: &'g W, options: SearchOptions) -> Result<Self> {
        if options.is_edge_based() {
            return Err(Error::UnsupportedTraversal("time-dependent search"));
        }
        let capacity = options.initial_capacity;
        Ok(TimeDependentDijkstra {
            graph,
            weighting,
            options,
            frontier: Frontier::new(false, false, capacity),
            used: false,
        })
    }

    /// Compute a path leaving `from` at time `departure` (in milliseconds).
    ///
    /// The time of the returned path is the arrival time minus the departure
    /// time.
    pub fn calc_path_at(&mut self, from: NodeId, to: NodeId, departure: u64) -> Result<Path> {
        if self.used {
            return Err(Error::AlreadyRun);
        }
        self.used = true;
        check_node(self.graph, from)?;
        check_node(self.graph, to)?;

        let mut root = SptEntry::root(from, 0.0);
        root.time = departure;
        self.frontier.init_with(root, 0.0, ANY_EDGE);

        let found = loop {
            if self.frontier.settled() >= self.options.max_visited_nodes {
                break None;
            }
            match self.frontier.pop() {
                Some(id) if self.frontier.entry(id).adj_node == to => break Some(id),
                Some(id) => self.expand(id),
                None => break None,
            }
        };

        let path = match found {
            Some(id) => {
                PathExtractor::new(self.graph, self.weighting, false).extract_time_dependent(self.frontier.spt(), id)?
            }
            None => Path::not_found(),
        };
        debug!(
            "{}: {} -> {} departing at {}: found={} weight={} time={} visited={}",
            self.name(),
            from,
            to,
            departure,
            path.found(),
            path.weight(),
            path.time(),
            self.visited_nodes()
        );
        Ok(path)
    }

    fn expand(&mut self, id: EntryId) {
        let graph = self.graph;
        let entry = *self.frontier.entry(id);
        for e in graph.edges(entry.adj_node, Direction::Forward) {
            if e.is_shortcut() || e.edge == entry.edge || !e.can_traverse(false) {
                continue;
            }
            let millis = match self.weighting.td_edge_millis(&e, false, entry.time) {
                Some(ms) => ms,
                None => continue,
            };
            let w = self.weighting.td_edge_weight(&e, false, entry.time);
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
                    time: entry.time.saturating_add(millis),
                },
                weight,
            );
        }
    }
}

impl<'g, G, W> RoutingAlgorithm for TimeDependentDijkstra<'g, G, W>
where
    G: RoutingGraph,
    W: TimeDependentWeighting,
{
    /// Compute a path departing at time 0.
    fn calc_path(&mut self, from: NodeId, to: NodeId) -> Result<Path> {
        self.calc_path_at(from, to, 0)
    }

    fn set_weight_limit(&mut self, limit: f64) {
        self.options.weight_limit = limit;
    }

    fn set_max_visited_nodes(&mut self, max: usize) {
        self.options.max_visited_nodes = max;
    }

    fn name(&self) -> String {
        "td_dijkstra".to_string()
    }

    fn visited_nodes(&self) -> usize {
        self.frontier.settled()
    }
}
