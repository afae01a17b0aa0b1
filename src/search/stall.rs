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

//! Stall-on-demand.
//!
//! An entry at node $n$ with weight $d$ is stallable if some node $u$ known
//! to the same frontier reaches $n$ more cheaply, i.e. if $d(u) + w(u, n) <
//! d - \varepsilon$. Then $d$ is not the distance of $n$ and the entry
//! cannot be part of a shortest up-down path, so its edges need not be
//! relaxed. The entry stays in the tree and remains a valid meeting
//! candidate.
//!
//! The edges $(u, n)$ are taken from the full graph, not only from the
//! upward edges, because the cheaper paths typically come down from a higher
//! node.

use super::EdgeFilter;
use crate::frontier::Frontier;
use crate::options::StallPolicy;
use crate::spt::EntryId;
use crate::traits::{Direction, NodeId, RoutingGraph};
use crate::weighting::{calc_weight, Weighting};

use log::trace;

use std::collections::VecDeque;

pub(crate) struct Staller<'a, G, W, F> {
    pub graph: &'a G,
    pub weighting: &'a W,
    pub filter: &'a F,
    pub policy: StallPolicy,
    pub eps: f64,
}

impl<'a, G, W, F> Staller<'a, G, W, F>
where
    G: RoutingGraph,
    W: Weighting,
    F: EdgeFilter<G>,
{
    /// Return `true` if the expansion of a popped entry can be skipped.
    pub fn is_stallable(&self, frontier: &mut Frontier, id: EntryId) -> bool {
        let (node, weight) = {
            let entry = frontier.entry(id);
            (entry.adj_node, entry.weight)
        };
        match self.policy {
            StallPolicy::Disabled => false,
            StallPolicy::SingleHop => self.cheaper_bound(frontier, id).is_some(),
            StallPolicy::Aggressive => {
                if frontier.stall_bound(node).map(|b| b < weight - self.eps).unwrap_or(false) {
                    return true;
                }
                match self.cheaper_bound(frontier, id) {
                    Some(bound) => {
                        self.propagate(frontier, node, bound);
                        true
                    }
                    None => false,
                }
            }
        }
    }

    /// Return the smallest weight of reaching the entry's node through a
    /// known neighbor if it is smaller than the entry's weight.
    fn cheaper_bound(&self, frontier: &Frontier, id: EntryId) -> Option<f64> {
        let entry = frontier.entry(id);
        let reverse = frontier.is_reverse();
        let dir = if reverse { Direction::Backward } else { Direction::Forward };

        let mut bound: Option<f64> = None;
        for e in self.graph.edges(entry.adj_node, dir.opposite()) {
            if e.edge == entry.edge {
                continue;
            }
            if let Some(w) = frontier.best_weight(e.adj) {
                let b = w + calc_weight(self.weighting, &e, !reverse);
                if b < entry.weight - self.eps && bound.map(|x| b < x).unwrap_or(true) {
                    trace!(
                        "stall node {} (weight {}) via node {} (bound {})",
                        entry.adj_node,
                        entry.weight,
                        e.adj,
                        b
                    );
                    bound = Some(b);
                    if self.policy == StallPolicy::SingleHop {
                        break;
                    }
                }
            }
        }
        bound
    }

    /// Propagate a cheaper bound of `node` to the known nodes reachable via
    /// accepted edges.
    fn propagate(&self, frontier: &mut Frontier, node: NodeId, bound: f64) {
        let reverse = frontier.is_reverse();
        let dir = if reverse { Direction::Backward } else { Direction::Forward };

        frontier.lower_stall_bound(node, bound);
        let mut queue = VecDeque::new();
        queue.push_back((node, bound));
        while let Some((u, b)) = queue.pop_front() {
            for e in self.graph.edges(u, dir) {
                if !self.filter.accept(self.graph, &e) {
                    continue;
                }
                let bv = b + calc_weight(self.weighting, &e, reverse);
                if !bv.is_finite() {
                    continue;
                }
                let v = e.adj;
                if let Some(w) = frontier.best_weight(v) {
                    if bv < w - self.eps && frontier.lower_stall_bound(v, bv) {
                        trace!("propagate stall bound {} to node {} (weight {})", bv, v, w);
                        queue.push_back((v, bv));
                    }
                }
            }
        }
    }
}
