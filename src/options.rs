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

//! Configuration of a search.

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// Tolerance of the stall-on-demand comparison.
///
/// The value is given in units of the weighting (e.g. seconds for a fastest
/// weighting, meters for a shortest weighting). It compensates rounding of
/// shortcut weights, an entry is only stalled if it is more expensive than
/// the alternative by more than this amount.
pub const DEFAULT_STALL_EPSILON: f64 = 0.001;

/// How frontier states are identified.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TraversalMode {
    /// One state per node.
    NodeBased,
    /// One state per pair of node and incoming edge, required for turn costs.
    EdgeBased,
}

/// Stall-on-demand policy of contraction hierarchy searches.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StallPolicy {
    /// Always expand.
    Disabled,
    /// Skip the expansion of an entry if a neighbor known to the same
    /// frontier reaches it more cheaply.
    SingleHop,
    /// Like `SingleHop`, but additionally propagate the cheaper bound to the
    /// known entries reachable from a stalled one.
    Aggressive,
}

/// Options of a search.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
pub struct SearchOptions {
    pub traversal: TraversalMode,
    /// Only used by contraction hierarchy searches.
    pub stalling: StallPolicy,
    pub stall_epsilon: f64,
    /// Entries heavier than this are never created.
    pub weight_limit: f64,
    /// At most this many nodes are settled.
    pub max_visited_nodes: usize,
    /// Initial capacity of the per-direction data structures.
    pub initial_capacity: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            traversal: TraversalMode::NodeBased,
            stalling: StallPolicy::SingleHop,
            stall_epsilon: DEFAULT_STALL_EPSILON,
            weight_limit: f64::INFINITY,
            max_visited_nodes: usize::MAX,
            initial_capacity: 200,
        }
    }
}

impl SearchOptions {
    /// Default options for an edge-based search.
    ///
    /// Stalling is disabled because it is not supported with turn costs.
    pub fn edge_based() -> Self {
        SearchOptions {
            traversal: TraversalMode::EdgeBased,
            stalling: StallPolicy::Disabled,
            ..Default::default()
        }
    }

    pub fn is_edge_based(&self) -> bool {
        self.traversal == TraversalMode::EdgeBased
    }

    pub fn with_stalling(mut self, stalling: StallPolicy) -> Self {
        self.stalling = stalling;
        self
    }

    pub fn with_stall_epsilon(mut self, eps: f64) -> Self {
        self.stall_epsilon = eps;
        self
    }

    pub fn with_weight_limit(mut self, limit: f64) -> Self {
        self.weight_limit = limit;
        self
    }

    pub fn with_max_visited_nodes(mut self, max: usize) -> Self {
        self.max_visited_nodes = max;
        self
    }
}
